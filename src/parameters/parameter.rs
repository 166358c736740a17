//! Parameter definitions

use serde::Deserialize;

use crate::datasource::{Datatype, FilterValue};

/// Values a parameter accepts (`param-domain-type`)
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterDomain {
    All,
    List(Vec<ListMember>),
    Range(ParameterRange),
}

impl ParameterDomain {
    pub fn domain_type(&self) -> &'static str {
        match self {
            ParameterDomain::All => "all",
            ParameterDomain::List(_) => "list",
            ParameterDomain::Range(_) => "range",
        }
    }
}

/// One allowed value of a list parameter, with an optional display alias
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListMember {
    pub value: FilterValue,
    #[serde(default)]
    pub alias: Option<String>,
}

impl ListMember {
    pub fn new(value: impl Into<FilterValue>) -> Self {
        Self {
            value: value.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterRange {
    #[serde(default)]
    pub min: Option<FilterValue>,
    #[serde(default)]
    pub max: Option<FilterValue>,
    #[serde(default)]
    pub step_size: Option<FilterValue>,
    #[serde(default)]
    pub period_type: Option<String>,
}

/// A validated parameter ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub caption: String,
    pub datatype: Datatype,
    pub domain: ParameterDomain,
    /// Value selected in the UI; the alias text when list members carry aliases
    pub current_value: FilterValue,
}

impl Parameter {
    /// Display aliases are in use when any list member carries one
    pub fn has_aliases(&self) -> bool {
        match &self.domain {
            ParameterDomain::List(members) => members.iter().any(|m| m.alias.is_some()),
            _ => false,
        }
    }

    /// The real value behind `current_value`
    pub fn actual_value(&self) -> Option<&FilterValue> {
        if !self.has_aliases() {
            return Some(&self.current_value);
        }
        let ParameterDomain::List(members) = &self.domain else {
            return None;
        };
        let current = self.current_value.to_string();
        members
            .iter()
            .find(|m| m.alias.as_deref() == Some(current.as_str()))
            .map(|m| &m.value)
    }
}
