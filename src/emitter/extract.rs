//! Extract column-type inference
//!
//! The extract file must contain every column an extract filter references.
//! Types are guessed from the filter values.

use crate::datasource::{ColumnInstance, ColumnTypeTable, ExtractColumnType, FilterSpec, FilterValue, PLACEHOLDER_COLUMN};

/// Build the column-type table for the extract writer
///
/// A later filter on the same column overrides the type of an earlier one.
pub fn infer_extract_columns(filters: &[FilterSpec], instances: &[ColumnInstance]) -> ColumnTypeTable {
    let mut columns = ColumnTypeTable::new();
    if filters.is_empty() {
        columns.insert(PLACEHOLDER_COLUMN.to_string(), ExtractColumnType::Str);
        return columns;
    }
    for filter in filters {
        let name = source_column(filter.column(), instances);
        columns.insert(name.to_string(), column_type(filter));
    }
    columns
}

/// Filters addressing a column instance by its derived name target the source column
fn source_column<'a>(column: &'a str, instances: &'a [ColumnInstance]) -> &'a str {
    instances
        .iter()
        .find(|instance| instance.derived_name == column)
        .map_or(column, |instance| instance.source_column.as_str())
}

fn column_type(filter: &FilterSpec) -> ExtractColumnType {
    match filter {
        FilterSpec::Categorical(f) => match f.values.first() {
            Some(value) if !value.is_string() => ExtractColumnType::Int,
            _ => ExtractColumnType::Str,
        },
        FilterSpec::RelativeDate(_) => ExtractColumnType::Datetime,
        FilterSpec::Continuous(f) => {
            let string_bound = [&f.min, &f.max].into_iter().flatten().any(FilterValue::is_string);
            if f.is_date || string_bound {
                ExtractColumnType::Datetime
            } else {
                ExtractColumnType::Int
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{CategoricalFilter, ContinuousFilter, PeriodType, RelativeDateFilter, RelativeWindow};

    #[test]
    fn test_no_filters_yields_placeholder() {
        let columns = infer_extract_columns(&[], &[]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns.get("Generic Field"), Some(&ExtractColumnType::Str));
    }

    #[test]
    fn test_types_follow_filter_values() {
        let filters: Vec<FilterSpec> = vec![
            CategoricalFilter::include("region", vec!["East".into()]).into(),
            CategoricalFilter::exclude("store_id", vec![3.into(), 4.into()]).into(),
            ContinuousFilter::new("profit").with_min(10).into(),
            ContinuousFilter::new("shipped").with_max("2016-01-01").into(),
            RelativeDateFilter::new("order_date", PeriodType::Month, RelativeWindow::Previous, 2).into(),
        ];
        let columns = infer_extract_columns(&filters, &[]);
        assert_eq!(columns["region"], ExtractColumnType::Str);
        assert_eq!(columns["store_id"], ExtractColumnType::Int);
        assert_eq!(columns["profit"], ExtractColumnType::Int);
        assert_eq!(columns["shipped"], ExtractColumnType::Datetime);
        assert_eq!(columns["order_date"], ExtractColumnType::Datetime);
        assert!(!columns.contains_key("Generic Field"));
    }

    #[test]
    fn test_instance_name_resolves_to_source_column() {
        let instances = vec![ColumnInstance::quantitative_key("order_date")];
        let filters: Vec<FilterSpec> = vec![ContinuousFilter::new("none:order_date:qk").with_min(1).into()];
        let columns = infer_extract_columns(&filters, &instances);
        assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["order_date"]);
    }
}
