//! Extract writer collaborator

use std::io;
use std::path::Path;

use crate::datasource::ColumnTypeTable;

/// Produces an extract file from a column-type table
///
/// Implementations either write a complete artifact at `path` or fail.
pub trait ExtractWriter {
    fn create(&self, columns: &ColumnTypeTable, path: &Path) -> io::Result<()>;
}

/// Writes the column-type table as a JSON manifest instead of a real extract
///
/// Stands in for the extract engine wherever only the table definition matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonManifestWriter;

impl ExtractWriter for JsonManifestWriter {
    fn create(&self, columns: &ColumnTypeTable, path: &Path) -> io::Result<()> {
        let body = serde_json::to_vec_pretty(columns).map_err(io::Error::other)?;
        std::fs::write(path, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::ExtractColumnType;

    #[test]
    fn test_manifest_lists_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Orders.tde");
        let mut columns = ColumnTypeTable::new();
        columns.insert("region".to_string(), ExtractColumnType::Str);
        columns.insert("order_date".to_string(), ExtractColumnType::Datetime);

        JsonManifestWriter.create(&columns, &path).unwrap();

        let written: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"order_date": "datetime", "region": "str"}));
    }
}
