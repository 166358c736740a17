//! tdsgen - Generate Tableau datasource documents
//!
//! This library provides:
//! - An imperative builder for datasource documents (relations, joins,
//!   column aliases, calculations, filters, extract binding)
//! - Declarative YAML definitions replayed through the builder
//! - Rendering to the exact `.tds` XML layout, and saving with an extract
//!   writer and packager supplied by the caller
//! - The workbook "Parameters" datasource
//! - The server permission model: capability and role tables per API
//!   version, and grantee capability maps
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `xml/` - owned element tree and pretty printer
//! - `datasource/` - document model (Relation, FilterSpec, ColumnAlias, ...)
//! - `definition/` - YAML datasource definitions
//! - `permissions/` - capabilities, roles, grantees
//!
//! **Verb modules** (transformations):
//! - `builder/` - imperative calls → accumulated document model
//! - `compiler/` - Relation / FilterSpec → XML fragments
//! - `emitter/` - document model → `<datasource>` tree and text
//! - `output/` - text → `.tds` / `.tdsx` on disk
//! - `parser/` - YAML → DatasourceDefinition
//! - `parameters/` - parameter list → Parameters datasource
//!
//! # Example
//!
//! ```ignore
//! use tdsgen::{CategoricalFilter, ConnectionSettings, DatasourceBuilder, JoinKind};
//!
//! let settings = ConnectionSettings::new("PostgreSQL", "Superstore", "superstore");
//! let mut builder = DatasourceBuilder::new(settings)?;
//! builder.set_root_table("orders", "Orders")?;
//! let on = DatasourceBuilder::define_join_clause("Orders", "region", "=", "People", "region");
//! builder.join_table(JoinKind::Left, "people", "People", vec![on])?;
//! builder.add_datasource_filter(CategoricalFilter::include("region", vec!["East".into()]))?;
//! let xml = builder.to_xml_string()?;
//! ```

pub mod builder;
pub mod compiler;
pub mod datasource;
pub mod definition;
pub mod emitter;
pub mod error;
pub mod output;
pub mod parameters;
pub mod parser;
pub mod permissions;
pub mod xml;

// Re-export commonly used types
pub use builder::{BuildError, DatasourceBuilder, IdGenerator, RandomCalculationIds, SequenceIds};
pub use datasource::{
    CategoricalFilter, ColumnAlias, ColumnRole, ConnectionSettings, Continuity, ContinuousFilter, Datatype,
    FilterMode, FilterSpec, FilterValue, JoinKind, OnClause, PeriodType, Relation, RelativeDateFilter,
    RelativeWindow,
};
pub use definition::DatasourceDefinition;
pub use emitter::{Clock, EmitError, FixedClock, SystemClock};
pub use error::ParseError;
pub use output::{save, DirectoryPackager, ExtractWriter, OutputError, OutputTarget, Packager};
pub use parameters::{ParameterDomain, ParametersBuilder};
pub use permissions::{Capability, CapabilityVersion, Grantee, GranteeKind, Mode, ObjectType, PermissionError};
pub use xml::XmlElement;
