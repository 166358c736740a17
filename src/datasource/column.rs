//! Column aliases and column instances

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::builder::BuildError;

/// Whether a field is a dimension or a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ColumnRole {
    Dimension,
    Measure,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Dimension => "dimension",
            ColumnRole::Measure => "measure",
        }
    }
}

impl FromStr for ColumnRole {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dimension" => Ok(ColumnRole::Dimension),
            "measure" => Ok(ColumnRole::Measure),
            _ => Err(BuildError::InvalidArgument(format!(
                "'{}' should be either measure or dimension",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ColumnRole {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Discrete or continuous field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Continuity {
    Discrete,
    Continuous,
}

impl FromStr for Continuity {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discrete" => Ok(Continuity::Discrete),
            "continuous" => Ok(Continuity::Continuous),
            _ => Err(BuildError::InvalidArgument(format!(
                "'{}' should be either discrete or continuous",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Continuity {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Column datatypes understood by the document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Datatype {
    String,
    Integer,
    Datetime,
    Date,
    Real,
    Boolean,
}

impl Datatype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::String => "string",
            Datatype::Integer => "integer",
            Datatype::Datetime => "datetime",
            Datatype::Date => "date",
            Datatype::Real => "real",
            Datatype::Boolean => "boolean",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Datatype::Integer | Datatype::Real)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Datatype::Date | Datatype::Datetime)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Datatype {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(Datatype::String),
            "integer" => Ok(Datatype::Integer),
            "datetime" => Ok(Datatype::Datetime),
            "date" => Ok(Datatype::Date),
            "real" => Ok(Datatype::Real),
            "boolean" => Ok(Datatype::Boolean),
            _ => Err(BuildError::InvalidArgument(format!("'{}' is not a valid datatype", s))),
        }
    }
}

impl TryFrom<String> for Datatype {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    Nominal,
    Ordinal,
    Quantitative,
}

impl LogicalType {
    /// Continuous fields are quantitative; discrete strings are nominal and
    /// every other discrete type is ordinal.
    pub fn derive(continuity: Continuity, datatype: Datatype) -> Self {
        match (continuity, datatype) {
            (Continuity::Continuous, _) => LogicalType::Quantitative,
            (Continuity::Discrete, Datatype::String) => LogicalType::Nominal,
            (Continuity::Discrete, _) => LogicalType::Ordinal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Nominal => "nominal",
            LogicalType::Ordinal => "ordinal",
            LogicalType::Quantitative => "quantitative",
        }
    }
}

/// Field alias definition, optionally a calculated field
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAlias {
    pub field_name: String,
    pub caption: Option<String>,
    pub role: ColumnRole,
    pub logical_type: LogicalType,
    pub datatype: Datatype,
    pub calculation: Option<String>,
}

impl ColumnAlias {
    pub fn new(
        field_name: impl Into<String>,
        role: ColumnRole,
        continuity: Continuity,
        datatype: Datatype,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            caption: None,
            role,
            logical_type: LogicalType::derive(continuity, datatype),
            datatype,
            calculation: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_calculation(mut self, formula: impl Into<String>) -> Self {
        self.calculation = Some(formula.into());
        self
    }

    pub fn is_calculation(&self) -> bool {
        self.calculation.is_some()
    }
}

/// Derived column binding a raw column to a quantitative-key alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInstance {
    /// Raw column name, without brackets
    pub source_column: String,
    /// Derived name, without brackets (`none:<col>:qk`)
    pub derived_name: String,
    pub semantic_type: LogicalType,
}

impl ColumnInstance {
    pub fn quantitative_key(column: &str) -> Self {
        Self {
            source_column: column.to_string(),
            derived_name: quantitative_key_name(column),
            semantic_type: LogicalType::Quantitative,
        }
    }
}

/// `none:<col>:qk`
pub fn quantitative_key_name(column: &str) -> String {
    format!("none:{}:qk", column)
}
