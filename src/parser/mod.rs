//! Definition parser (verb module)
//!
//! Transforms YAML files into datasource definitions.

use std::path::Path;

use crate::builder::DatasourceBuilder;
use crate::definition::DatasourceDefinition;
use crate::error::ParseError;

/// Parse a definition from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DatasourceDefinition, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse a definition from a YAML string
pub fn parse_str(yaml: &str) -> Result<DatasourceDefinition, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a definition file and replay it into a builder
pub fn load_builder<P: AsRef<Path>>(path: P) -> Result<DatasourceBuilder, ParseError> {
    Ok(parse_file(path)?.into_builder()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{FilterMode, FilterValue, JoinKind};
    use crate::definition::FilterDefinition;

    const SUPERSTORE: &str = r#"
connection:
  type: PostgreSQL
  name: Superstore
  server: db.local
  dbname: superstore
root:
  table: orders
  alias: Orders
joins:
  - kind: left
    table: people
    alias: People
    on:
      - { left_alias: Orders, left_field: region, right_alias: People, right_field: region }
filters:
  - type: categorical
    column: region
    values: [East, West]
  - type: continuous
    column: profit
    min: 20
extract:
  file: Superstore.tde
  filters:
    - type: relative_date
      column: order_date
      period_type: year
      periods: 4
"#;

    #[test]
    fn test_parse_superstore() {
        let definition = parse_str(SUPERSTORE).unwrap();
        assert_eq!(definition.connection.connection_type, "PostgreSQL");
        assert_eq!(definition.connection.authentication, "sspi");
        assert_eq!(definition.root.table.as_deref(), Some("orders"));
        assert_eq!(definition.joins[0].kind, JoinKind::Left);
        assert_eq!(definition.joins[0].on[0].operator, "=");

        match &definition.filters[0] {
            FilterDefinition::Categorical { values, mode, .. } => {
                assert_eq!(values, &vec![FilterValue::from("East"), FilterValue::from("West")]);
                assert_eq!(*mode, FilterMode::Include);
            }
            other => panic!("unexpected filter {:?}", other),
        }
        assert!(matches!(
            definition.filters[1],
            FilterDefinition::Continuous { min: Some(FilterValue::Int(20)), max: None, .. }
        ));
    }

    #[test]
    fn test_replay_into_builder() {
        let builder = parse_str(SUPERSTORE).unwrap().into_builder().unwrap();
        assert_eq!(builder.connection_class(), "postgres");
        assert_eq!(builder.joins().len(), 1);
        assert_eq!(builder.datasource_filters().len(), 2);
        assert_eq!(builder.extract_filters().len(), 1);
        assert_eq!(builder.column_instances().len(), 1);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("not: [valid: yaml");
        assert!(matches!(result, Err(ParseError::Yaml { .. })));
    }

    #[test]
    fn test_unknown_join_kind_is_rejected() {
        let yaml = SUPERSTORE.replace("kind: left", "kind: sideways");
        assert!(parse_str(&yaml).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = parse_file("tests/test_data/does_not_exist.yaml");
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
