//! Relation types: tables, custom SQL and joins

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::builder::BuildError;

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Outer,
}

impl JoinKind {
    /// Value of the `join` attribute on a join relation
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Outer => "full",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JoinKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inner" => Ok(JoinKind::Inner),
            "left" => Ok(JoinKind::Left),
            "right" => Ok(JoinKind::Right),
            "outer" | "full" => Ok(JoinKind::Outer),
            _ => Err(BuildError::InvalidArgument(format!(
                "'{}' is not a join type, expected inner, left, right or outer",
                s
            ))),
        }
    }
}

impl TryFrom<String> for JoinKind {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One ON condition of a join: `[left_alias].[left_field] op [right_alias].[right_field]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OnClause {
    pub left_alias: String,
    pub left_field: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    pub right_alias: String,
    pub right_field: String,
}

fn default_operator() -> String {
    "=".to_string()
}

impl OnClause {
    pub fn new(
        left_alias: impl Into<String>,
        left_field: impl Into<String>,
        operator: impl Into<String>,
        right_alias: impl Into<String>,
        right_field: impl Into<String>,
    ) -> Self {
        Self {
            left_alias: left_alias.into(),
            left_field: left_field.into(),
            operator: operator.into(),
            right_alias: right_alias.into(),
            right_field: right_field.into(),
        }
    }

    /// `[alias].[field]` reference for the left side
    pub fn left_reference(&self) -> String {
        format!("[{}].[{}]", self.left_alias, self.left_field)
    }

    /// `[alias].[field]` reference for the right side
    pub fn right_reference(&self) -> String {
        format!("[{}].[{}]", self.right_alias, self.right_field)
    }
}

/// Where a relation's rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A database table, by name
    Table(String),
    /// A custom SQL query text
    CustomSql(String),
}

/// A node in the datasource relation tree
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Table { name: String, alias: String },
    CustomSql { sql: String, alias: String },
    Join(Join),
}

/// A join of the accumulated relation (left) with a newly added one (right)
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub on_clauses: Vec<OnClause>,
    pub left: Box<Relation>,
    pub right: Box<Relation>,
}

impl Relation {
    pub fn table(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Relation::Table {
            name: name.into(),
            alias: alias.into(),
        }
    }

    pub fn custom_sql(sql: impl Into<String>, alias: impl Into<String>) -> Self {
        Relation::CustomSql {
            sql: sql.into(),
            alias: alias.into(),
        }
    }

    pub fn from_source(source: &TableSource, alias: &str) -> Self {
        match source {
            TableSource::Table(name) => Relation::table(name.as_str(), alias),
            TableSource::CustomSql(sql) => Relation::custom_sql(sql.as_str(), alias),
        }
    }

    /// Alias of a leaf relation (None for joins)
    pub fn alias(&self) -> Option<&str> {
        match self {
            Relation::Table { alias, .. } | Relation::CustomSql { alias, .. } => Some(alias),
            Relation::Join(_) => None,
        }
    }

    /// Number of nested joins along the left spine
    pub fn join_depth(&self) -> usize {
        match self {
            Relation::Join(join) => 1 + join.left.join_depth(),
            _ => 0,
        }
    }

    pub fn is_join(&self) -> bool {
        matches!(self, Relation::Join(_))
    }
}

/// A declared join, waiting to be folded onto the relation tree
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStep {
    pub kind: JoinKind,
    pub source: TableSource,
    pub alias: String,
    pub on_clauses: Vec<OnClause>,
}
