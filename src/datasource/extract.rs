//! Extract binding and the column-type table handed to extract writers

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Extract file bound into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractBinding {
    /// File name inside the packaged datasource, e.g. `Datasource.tde`
    pub filename: String,
    /// Column used for incremental refreshes
    pub incremental_key: Option<String>,
}

impl ExtractBinding {
    /// Path of the extract inside the packaged datasource
    pub fn internal_path(&self) -> String {
        format!("Data/Datasources/{}", self.filename)
    }
}

/// Column types an extract writer must support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractColumnType {
    Str,
    Int,
    Datetime,
}

impl ExtractColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractColumnType::Str => "str",
            ExtractColumnType::Int => "int",
            ExtractColumnType::Datetime => "datetime",
        }
    }
}

impl fmt::Display for ExtractColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column name → type, in name order
pub type ColumnTypeTable = BTreeMap<String, ExtractColumnType>;

/// Placeholder column used when no extract filters exist
pub const PLACEHOLDER_COLUMN: &str = "Generic Field";
