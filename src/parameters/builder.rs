//! Builder for the workbook-internal "Parameters" datasource

use log::debug;

use super::parameter::{ListMember, Parameter, ParameterDomain, ParameterRange};
use crate::builder::BuildError;
use crate::datasource::{Datatype, FilterValue};
use crate::xml::{write_fragment, XmlElement};

#[derive(Debug, Default)]
pub struct ParametersBuilder {
    parameters: Vec<Parameter>,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; it is named `[Parameter N]` by position
    pub fn add_parameter(
        &mut self,
        caption: &str,
        datatype: Datatype,
        domain: ParameterDomain,
        current_value: impl Into<FilterValue>,
    ) -> Result<(), BuildError> {
        if caption.trim().is_empty() {
            return Err(BuildError::InvalidArgument("parameter caption must not be empty".to_string()));
        }
        if let ParameterDomain::List(members) = &domain {
            if members.is_empty() {
                return Err(BuildError::InvalidArgument(format!(
                    "list parameter '{}' needs at least one member",
                    caption
                )));
            }
        }
        let parameter = Parameter {
            caption: caption.to_string(),
            datatype,
            domain,
            current_value: current_value.into(),
        };
        if parameter.actual_value().is_none() {
            return Err(BuildError::InvalidArgument(format!(
                "current value '{}' of parameter '{}' is not a member alias",
                parameter.current_value, caption
            )));
        }
        debug!("Parameter {} '{}' ({})", self.parameters.len() + 1, caption, parameter.domain.domain_type());
        self.parameters.push(parameter);
        Ok(())
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn to_document(&self) -> XmlElement {
        let root = XmlElement::new("datasource")
            .with_attr("name", "Parameters")
            .with_attr("hasconnection", "false")
            .with_attr("inline", "true")
            .with_child(XmlElement::new("aliases").with_attr("enabled", "yes"));
        self.parameters
            .iter()
            .enumerate()
            .fold(root, |root, (i, parameter)| root.with_child(parameter_column(i + 1, parameter)))
    }

    /// Rendered without an XML declaration; the fragment is embedded in a workbook
    pub fn to_xml_string(&self) -> Result<String, quick_xml::Error> {
        write_fragment(&self.to_document())
    }
}

fn parameter_column(number: usize, parameter: &Parameter) -> XmlElement {
    let logical_type = if parameter.datatype.is_numeric() {
        "quantitative"
    } else {
        "nominal"
    };
    let mut column = XmlElement::new("column")
        .with_attr("caption", parameter.caption.as_str())
        .with_attr("name", format!("[Parameter {}]", number))
        .with_attr("param-domain-type", parameter.domain.domain_type())
        .with_attr("type", logical_type)
        .with_attr("role", "measure")
        .with_attr("datatype", parameter.datatype.as_str());

    match &parameter.domain {
        ParameterDomain::All => {}
        ParameterDomain::Range(range) => column.push_child(range_element(range)),
        ParameterDomain::List(members) => {
            if parameter.has_aliases() {
                column.push_child(aliases_element(members));
            }
            column.push_child(members_element(members));
        }
    }

    if parameter.has_aliases() {
        column.set_attr("alias", parameter.current_value.to_string());
    }
    let literal = parameter
        .actual_value()
        .map(|value| value_literal(value, parameter.datatype))
        .unwrap_or_default();
    column.set_attr("value", literal.as_str());
    column.with_child(
        XmlElement::new("calculation")
            .with_attr("class", "tableau")
            .with_attr("formula", literal),
    )
}

/// String values are quoted except for date types
fn value_literal(value: &FilterValue, datatype: Datatype) -> String {
    if datatype.is_temporal() {
        value.to_string()
    } else {
        value.member_literal()
    }
}

fn range_element(range: &ParameterRange) -> XmlElement {
    let mut element = XmlElement::new("range");
    if let Some(max) = &range.max {
        element.set_attr("max", max.to_string());
    }
    if let Some(min) = &range.min {
        element.set_attr("min", min.to_string());
    }
    if let Some(step) = &range.step_size {
        element.set_attr("granularity", step.to_string());
    }
    if let Some(period_type) = &range.period_type {
        element.set_attr("period-type", period_type.as_str());
    }
    element
}

fn aliases_element(members: &[ListMember]) -> XmlElement {
    members
        .iter()
        .filter_map(|m| m.alias.as_ref().map(|alias| (m, alias)))
        .fold(XmlElement::new("aliases"), |aliases, (member, alias)| {
            aliases.with_child(
                XmlElement::new("alias")
                    .with_attr("key", member.value.to_string())
                    .with_attr("value", alias.as_str()),
            )
        })
}

fn members_element(members: &[ListMember]) -> XmlElement {
    members.iter().fold(XmlElement::new("members"), |list, member| {
        let mut element = XmlElement::new("member").with_attr("value", member.value.to_string());
        if let Some(alias) = &member.alias {
            element.set_attr("alias", alias.as_str());
        }
        list.with_child(element)
    })
}
