//! Shared test utilities for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use tdsgen::datasource::ColumnTypeTable;
use tdsgen::{
    parser, ConnectionSettings, DatasourceBuilder, DatasourceDefinition, ExtractWriter, FixedClock, SequenceIds,
    XmlElement,
};

/// Instant used by every deterministic builder
pub fn fixed_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 3, 14)
        .and_then(|d| d.and_hms_opt(13, 5, 0))
        .expect("valid fixed instant")
}

/// Load a definition from the tests/test_data directory
pub fn load_fixture(name: &str) -> DatasourceDefinition {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path).unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Builder with sequential calculation ids and a fixed clock
pub fn deterministic_builder(settings: ConnectionSettings) -> DatasourceBuilder {
    DatasourceBuilder::new(settings)
        .expect("connection type should be in the catalog")
        .with_id_generator(SequenceIds::new())
        .with_clock(FixedClock(fixed_instant()))
}

/// Replay a fixture into a deterministic builder
pub fn build_fixture(name: &str) -> DatasourceBuilder {
    let definition = load_fixture(name);
    let mut builder = deterministic_builder(definition.connection.clone());
    definition
        .apply(&mut builder)
        .unwrap_or_else(|e| panic!("Failed to replay {}: {}", name, e));
    builder
}

/// A postgres builder with `orders` as root
pub fn orders_builder() -> DatasourceBuilder {
    let mut builder = deterministic_builder(ConnectionSettings::new("PostgreSQL", "Orders", "superstore"));
    builder.set_root_table("orders", "Orders").expect("root should be accepted");
    builder
}

// =============================================================================
// Document Inspection Utilities
// =============================================================================

/// The top-level relation under `<connection>`
pub fn root_relation(doc: &XmlElement) -> &XmlElement {
    doc.child("connection")
        .and_then(|c| c.child("relation"))
        .expect("document should have a relation")
}

/// Number of nested join levels
pub fn join_depth(relation: &XmlElement) -> usize {
    if relation.attr("type") != Some("join") {
        return 0;
    }
    let left = relation
        .children_named("relation")
        .next()
        .expect("join should have a left relation");
    1 + join_depth(left)
}

/// Left and right relations of a join
pub fn join_sides(relation: &XmlElement) -> (&XmlElement, &XmlElement) {
    let sides: Vec<&XmlElement> = relation.children_named("relation").collect();
    assert_eq!(sides.len(), 2, "join should have exactly two relations");
    (sides[0], sides[1])
}

/// Top-level filters in document order
pub fn datasource_filters(doc: &XmlElement) -> Vec<&XmlElement> {
    doc.children_named("filter").collect()
}

// =============================================================================
// Collaborators
// =============================================================================

/// Extract writer that records its calls and writes a marker file
#[derive(Default)]
pub struct RecordingExtractWriter {
    pub calls: RefCell<Vec<(ColumnTypeTable, PathBuf)>>,
}

impl ExtractWriter for RecordingExtractWriter {
    fn create(&self, columns: &ColumnTypeTable, path: &Path) -> io::Result<()> {
        self.calls.borrow_mut().push((columns.clone(), path.to_path_buf()));
        std::fs::write(path, b"extract")
    }
}

/// Extract writer that always fails
pub struct FailingExtractWriter;

impl ExtractWriter for FailingExtractWriter {
    fn create(&self, _columns: &ColumnTypeTable, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "extract engine unavailable"))
    }
}
