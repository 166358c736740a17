//! Filter compilation
//!
//! Each filter kind compiles to one `<filter>` fragment. Categorical filters
//! branch on value count and include/exclude:
//!
//! | values | mode    | groupfilter shape                                   |
//! |--------|---------|-----------------------------------------------------|
//! | one    | include | `member`                                            |
//! | one    | exclude | `except` over `level-members` and `member`          |
//! | many   | include | `union` over one `member` per value                 |
//! | many   | exclude | `except` over one `member` per value                |
//!
//! The extra `level-members` child only appears for the single-value exclude.

use crate::datasource::{CategoricalFilter, ContinuousFilter, FilterMode, FilterSpec, FilterValue, RelativeDateFilter};
use crate::xml::XmlElement;

/// Namespace for filter UI metadata attributes
pub const USER_NAMESPACE: &str = "http://www.tableausoftware.com/xml/user";

const FILTER_GROUP: &str = "2";

/// Compile a filter to its `<filter>` element
pub fn compile_filter(filter: &FilterSpec) -> XmlElement {
    let column = filter.column_reference();
    let element = XmlElement::new("filter")
        .with_attr("class", filter.class())
        .with_attr("column", column.as_str())
        .with_attr("filter-group", FILTER_GROUP);

    match filter {
        FilterSpec::Categorical(f) => element.with_child(compile_group_filter(f, &column)),
        FilterSpec::Continuous(f) => compile_range(element, f),
        FilterSpec::RelativeDate(f) => compile_relative_date(element, f),
    }
}

/// Compile a list of filters, preserving order
pub fn compile_filters(filters: &[FilterSpec]) -> Vec<XmlElement> {
    filters.iter().map(compile_filter).collect()
}

fn compile_range(mut element: XmlElement, filter: &ContinuousFilter) -> XmlElement {
    element.set_attr("include-values", "in-range");
    if let Some(min) = &filter.min {
        element.push_child(XmlElement::new("min").with_text(bound_literal(min, filter.is_date)));
    }
    if let Some(max) = &filter.max {
        element.push_child(XmlElement::new("max").with_text(bound_literal(max, filter.is_date)));
    }
    element
}

/// Date bounds are wrapped in `#...#`
fn bound_literal(value: &FilterValue, is_date: bool) -> String {
    if is_date {
        format!("#{}#", value)
    } else {
        value.to_string()
    }
}

fn compile_relative_date(element: XmlElement, filter: &RelativeDateFilter) -> XmlElement {
    let (first, last) = filter.period_bounds();
    element
        .with_attr("first-period", first.to_string())
        .with_attr("include-future", filter.include_future.to_string())
        .with_attr("last-period", last.to_string())
        .with_attr("include-null", "false")
        .with_attr("period-type", filter.period_type.as_str())
}

fn compile_group_filter(filter: &CategoricalFilter, level: &str) -> XmlElement {
    let mut group = XmlElement::new("groupfilter")
        .with_attr("user:ui-domain", "database")
        .with_attr("user:ui-enumeration", filter.mode.ui_enumeration())
        .with_attr("user:ui-marker", "enumerate");
    if filter.manual_selection {
        group.set_attr("user:ui-manual-selection", "true");
    }

    match (filter.values.as_slice(), filter.mode) {
        ([value], FilterMode::Include) => group
            .with_attr("function", "member")
            .with_attr("level", level)
            .with_attr("member", value.member_literal()),
        ([value], FilterMode::Exclude) => group
            .with_attr("function", "except")
            .with_child(
                XmlElement::new("groupfilter")
                    .with_attr("function", "level-members")
                    .with_attr("level", level),
            )
            .with_child(member_predicate(level, value)),
        (values, mode) => {
            let function = match mode {
                FilterMode::Include => "union",
                FilterMode::Exclude => "except",
            };
            values.iter().fold(group.with_attr("function", function), |group, value| {
                group.with_child(member_predicate(level, value))
            })
        }
    }
}

fn member_predicate(level: &str, value: &FilterValue) -> XmlElement {
    XmlElement::new("groupfilter")
        .with_attr("function", "member")
        .with_attr("level", level)
        .with_attr("member", value.member_literal())
}
