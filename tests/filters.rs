//! Integration tests for filter compilation through the builder

mod common;

use common::{datasource_filters, orders_builder};
use pretty_assertions::assert_eq;
use tdsgen::{
    BuildError, CategoricalFilter, ContinuousFilter, FilterMode, PeriodType, RelativeDateFilter, RelativeWindow,
};

#[test]
fn test_two_value_include_is_union() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(CategoricalFilter::include("region", vec!["East".into(), "West".into()]))
        .unwrap();

    let doc = builder.to_document().unwrap();
    let filters = datasource_filters(&doc);
    assert_eq!(filters.len(), 1);

    let filter = filters[0];
    assert_eq!(filter.attr("class"), Some("categorical"));
    assert_eq!(filter.attr("column"), Some("[region]"));

    let group = filter.child("groupfilter").unwrap();
    assert_eq!(group.attr("function"), Some("union"));
    assert_eq!(group.attr("user:ui-enumeration"), Some("inclusive"));
    let members: Vec<Option<&str>> = group.children.iter().map(|m| m.attr("member")).collect();
    assert_eq!(members, vec![Some("\"East\""), Some("\"West\"")]);
}

#[test]
fn test_single_exclude_wraps_two_predicates() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(CategoricalFilter::exclude("city", vec!["SF".into()]))
        .unwrap();
    builder
        .add_datasource_filter(CategoricalFilter::include("city", vec!["SF".into()]))
        .unwrap();

    let doc = builder.to_document().unwrap();
    let filters = datasource_filters(&doc);

    let exclude = filters[0].child("groupfilter").unwrap();
    assert_eq!(exclude.attr("function"), Some("except"));
    assert_eq!(exclude.attr("user:ui-enumeration"), Some("exclusive"));
    assert_eq!(exclude.child_names(), vec!["groupfilter", "groupfilter"]);
    assert_eq!(exclude.children[0].attr("function"), Some("level-members"));
    assert_eq!(exclude.children[0].attr("level"), Some("[city]"));
    assert_eq!(exclude.children[1].attr("function"), Some("member"));
    assert_eq!(exclude.children[1].attr("member"), Some("\"SF\""));

    // Same value included is a single predicate with no children
    let include = filters[1].child("groupfilter").unwrap();
    assert_eq!(include.attr("function"), Some("member"));
    assert!(include.children.is_empty());
    assert_ne!(exclude.children.len(), include.children.len());
}

#[test]
fn test_multi_exclude_has_no_level_members() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(CategoricalFilter::new("store_id", vec![3.into(), 4.into()], FilterMode::Exclude))
        .unwrap();

    let doc = builder.to_document().unwrap();
    let group = datasource_filters(&doc)[0].child("groupfilter").unwrap();
    assert_eq!(group.attr("function"), Some("except"));
    let functions: Vec<Option<&str>> = group.children.iter().map(|m| m.attr("function")).collect();
    assert_eq!(functions, vec![Some("member"), Some("member")]);
    // Numbers are bare literals
    assert_eq!(group.children[0].attr("member"), Some("3"));
}

#[test]
fn test_min_only_quantitative_filter() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(ContinuousFilter::new("profit").with_min(20))
        .unwrap();

    let doc = builder.to_document().unwrap();
    let filter = datasource_filters(&doc)[0];
    assert_eq!(filter.attr("class"), Some("quantitative"));
    assert_eq!(filter.attr("column"), Some("[profit]"));
    assert_eq!(filter.attr("include-values"), Some("in-range"));
    assert_eq!(filter.child_names(), vec!["min"]);
    assert_eq!(filter.child("min").unwrap().text.as_deref(), Some("20"));
    assert!(doc.child("column-instance").is_none());
}

#[test]
fn test_date_range_uses_column_instance() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(
            ContinuousFilter::new("order_date")
                .with_min("2016-01-01")
                .with_max("2016-12-31")
                .dates(),
        )
        .unwrap();

    let doc = builder.to_document().unwrap();
    let filter = datasource_filters(&doc)[0];
    assert_eq!(filter.attr("column"), Some("[none:order_date:qk]"));
    assert_eq!(filter.child("min").unwrap().text.as_deref(), Some("#2016-01-01#"));
    assert_eq!(filter.child("max").unwrap().text.as_deref(), Some("#2016-12-31#"));

    let instance = doc.child("column-instance").unwrap();
    assert_eq!(instance.attr("column"), Some("[order_date]"));
    assert_eq!(instance.attr("name"), Some("[none:order_date:qk]"));
    assert_eq!(instance.attr("derivation"), Some("None"));
    assert_eq!(instance.attr("pivot"), Some("key"));
    assert_eq!(instance.attr("type"), Some("quantitative"));
}

#[test]
fn test_previous_four_years() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(RelativeDateFilter::new(
            "order_date",
            PeriodType::Year,
            RelativeWindow::Previous,
            4,
        ))
        .unwrap();

    assert_eq!(builder.column_instances().len(), 1);
    assert_eq!(builder.column_instances()[0].source_column, "order_date");

    let doc = builder.to_document().unwrap();
    let filter = datasource_filters(&doc)[0];
    assert_eq!(filter.attr("class"), Some("relative-date"));
    assert_eq!(filter.attr("first-period"), Some("-4"));
    assert_eq!(filter.attr("last-period"), Some("0"));
    assert_eq!(filter.attr("include-future"), Some("true"));
    assert_eq!(filter.attr("include-null"), Some("false"));
    assert_eq!(filter.attr("period-type"), Some("year"));
}

#[test]
fn test_relative_windows() {
    let cases = [
        (RelativeWindow::Next, 3, "1", "3"),
        (RelativeWindow::Current, 7, "0", "0"),
    ];
    for (window, periods, first, last) in cases {
        let mut builder = orders_builder();
        builder
            .add_datasource_filter(RelativeDateFilter::new("shipped", PeriodType::Month, window, periods).to_date())
            .unwrap();
        let doc = builder.to_document().unwrap();
        let filter = datasource_filters(&doc)[0];
        assert_eq!(filter.attr("first-period"), Some(first));
        assert_eq!(filter.attr("last-period"), Some(last));
        assert_eq!(filter.attr("include-future"), Some("false"));
    }
}

#[test]
fn test_invalid_period_type_and_mode() {
    assert!(matches!("fortnight".parse::<PeriodType>(), Err(BuildError::InvalidArgument(_))));
    assert!(matches!("maybe".parse::<FilterMode>(), Err(BuildError::InvalidArgument(_))));
}

#[test]
fn test_manual_selection_marker() {
    let mut builder = orders_builder();
    builder
        .add_datasource_filter(CategoricalFilter::include("region", vec!["East".into()]).with_manual_selection())
        .unwrap();
    let doc = builder.to_document().unwrap();
    let group = datasource_filters(&doc)[0].child("groupfilter").unwrap();
    assert_eq!(group.attr("user:ui-manual-selection"), Some("true"));
}

#[test]
fn test_extract_filters_are_separate() {
    let mut builder = orders_builder();
    builder.add_extract("Orders.tde", None).unwrap();
    builder
        .add_extract_filter(CategoricalFilter::include("region", vec!["East".into()]))
        .unwrap();

    let doc = builder.to_document().unwrap();
    assert!(datasource_filters(&doc).is_empty());
    let extract = doc.child("extract").unwrap();
    assert_eq!(extract.children_named("filter").count(), 1);
}
