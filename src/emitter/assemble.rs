//! Document assembly
//!
//! Child order under `<datasource>` is fixed:
//!
//! 1. `connection` holding the relation tree
//! 2. `cols` (only when table column mappings exist)
//! 3. `aliases` followed by one `column` per alias (only when aliases exist)
//! 4. `column-instance` elements
//! 5. datasource `filter` elements
//! 6. `extract` (only when an extract is bound)

use log::{debug, trace};

use super::clock::Clock;
use super::error::EmitError;
use crate::builder::{BuildError, DatasourceBuilder};
use crate::compiler::{compile_filters, render_relation, USER_NAMESPACE};
use crate::datasource::{ColumnAlias, ColumnInstance, ConnectionSettings, ExtractBinding, FilterSpec};
use crate::xml::{write_document, XmlElement};

const DOCUMENT_VERSION: &str = "9.3";
const FORMATTED_NAME_SUFFIX: &str = "1ch1jwefjwfw";

/// Walk the builder state and produce the document tree
pub fn assemble(builder: &DatasourceBuilder) -> Result<XmlElement, BuildError> {
    let relation = builder.relation()?;

    let mut root = XmlElement::new("datasource")
        .with_attr("xmlns:user", USER_NAMESPACE)
        .with_attr(
            "formatted-name",
            format!("{}.{}", builder.connection_class(), FORMATTED_NAME_SUFFIX),
        )
        .with_attr("inline", "true")
        .with_attr("version", DOCUMENT_VERSION);

    root.push_child(connection_element(builder.settings(), builder.connection_class()).with_child(render_relation(&relation)));

    if let Some(cols) = cols_element(builder.column_mappings()) {
        root.push_child(cols);
    }

    if !builder.column_aliases().is_empty() {
        root.push_child(XmlElement::new("aliases").with_attr("enabled", "yes"));
        root.children.extend(builder.column_aliases().iter().map(alias_element));
    }

    root.children
        .extend(builder.column_instances().iter().map(instance_element));
    root.children.extend(compile_filters(builder.datasource_filters()));

    if let Some(binding) = builder.extract() {
        root.push_child(extract_element(binding, builder.extract_filters(), builder.clock()));
    }

    debug!(
        "Assembled datasource '{}' with {} top-level elements",
        builder.settings().name,
        root.children.len()
    );
    Ok(root)
}

/// Assemble and pretty-print the document with its XML declaration
pub fn render(builder: &DatasourceBuilder) -> Result<String, EmitError> {
    let document = assemble(builder)?;
    let xml = write_document(&document)?;
    trace!("Rendered datasource document:\n{}", xml);
    Ok(xml)
}

fn connection_element(settings: &ConnectionSettings, class: &str) -> XmlElement {
    let mut connection = XmlElement::new("connection")
        .with_attr("class", class)
        .with_attr("dbname", settings.dbname.as_str())
        .with_attr("odbc-native-protocol", "yes");
    if let Some(server) = &settings.server {
        connection.set_attr("server", server.as_str());
    }
    connection.set_attr("authentication", settings.authentication.as_str());
    if let Some(sql) = &settings.initial_sql {
        connection.set_attr("one-time-sql", sql.as_str());
    }
    connection
}

fn cols_element(mappings: &[(String, String)]) -> Option<XmlElement> {
    if mappings.is_empty() {
        return None;
    }
    let cols = mappings.iter().fold(XmlElement::new("cols"), |cols, (key, value)| {
        cols.with_child(
            XmlElement::new("map")
                .with_attr("key", format!("[{}]", key))
                .with_attr("value", value.as_str()),
        )
    });
    Some(cols)
}

fn alias_element(alias: &ColumnAlias) -> XmlElement {
    let mut column = XmlElement::new("column")
        .with_attr("name", format!("[{}]", alias.field_name))
        .with_attr("datatype", alias.datatype.as_str());
    if let Some(caption) = &alias.caption {
        column.set_attr("caption", caption.as_str());
    }
    column.set_attr("role", alias.role.as_str());
    column.set_attr("type", alias.logical_type.as_str());
    if let Some(formula) = &alias.calculation {
        column.push_child(
            XmlElement::new("calculation")
                .with_attr("class", "tableau")
                .with_attr("formula", formula.as_str()),
        );
    }
    column
}

fn instance_element(instance: &ColumnInstance) -> XmlElement {
    XmlElement::new("column-instance")
        .with_attr("column", format!("[{}]", instance.source_column))
        .with_attr("derivation", "None")
        .with_attr("name", format!("[{}]", instance.derived_name))
        .with_attr("pivot", "key")
        .with_attr("type", instance.semantic_type.as_str())
}

fn extract_element(binding: &ExtractBinding, filters: &[FilterSpec], clock: &dyn Clock) -> XmlElement {
    let refresh = match &binding.incremental_key {
        Some(key) => XmlElement::new("refresh")
            .with_attr("increment-key", key.as_str())
            .with_attr("incremental-updates", "true"),
        None => XmlElement::new("refresh")
            .with_attr("increment-key", "")
            .with_attr("incremental-updates", "false"),
    };

    let connection = XmlElement::new("connection")
        .with_attr("class", "dataengine")
        .with_attr("dbname", binding.internal_path())
        .with_attr("schema", "Extract")
        .with_attr("tablename", "Extract")
        .with_attr("update-time", clock.update_time())
        .with_child(
            XmlElement::new("relation")
                .with_attr("name", "Extract")
                .with_attr("table", "[Extract].[Extract]")
                .with_attr("type", "table"),
        )
        .with_child(
            XmlElement::new("calculations").with_child(
                XmlElement::new("calculation")
                    .with_attr("column", "[Number of Records]")
                    .with_attr("formula", "1"),
            ),
        )
        .with_child(refresh);

    let mut extract = XmlElement::new("extract")
        .with_attr("count", "-1")
        .with_attr("enabled", "true")
        .with_attr("units", "records")
        .with_child(connection);
    extract.children.extend(compile_filters(filters));
    extract
}
