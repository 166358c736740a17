//! Declarative datasource definitions (noun module)
//!
//! A `DatasourceDefinition` describes a whole document in YAML. It is replayed
//! through `DatasourceBuilder`, so every validation rule of the imperative
//! API applies unchanged.

use log::debug;
use serde::Deserialize;

use crate::builder::{BuildError, DatasourceBuilder};
use crate::datasource::{
    CategoricalFilter, ColumnAlias, ColumnRole, ConnectionSettings, Continuity, ContinuousFilter, Datatype,
    FilterMode, FilterSpec, FilterValue, JoinKind, OnClause, PeriodType, RelativeDateFilter, RelativeWindow,
};

/// A complete datasource document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasourceDefinition {
    pub connection: ConnectionSettings,
    pub root: SourceDefinition,
    #[serde(default)]
    pub joins: Vec<JoinDefinition>,
    /// Raw table fields mapped to field aliases
    #[serde(default)]
    pub columns: Vec<ColumnMappingDefinition>,
    #[serde(default)]
    pub aliases: Vec<AliasDefinition>,
    #[serde(default)]
    pub calculations: Vec<CalculationDefinition>,
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,
    #[serde(default)]
    pub extract: Option<ExtractDefinition>,
}

/// A table or a custom SQL query, under an alias
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceDefinition {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub custom_sql: Option<String>,
    pub alias: String,
}

impl SourceDefinition {
    fn source(&self) -> Result<Source<'_>, BuildError> {
        match (&self.table, &self.custom_sql) {
            (Some(table), None) => Ok(Source::Table(table)),
            (None, Some(sql)) => Ok(Source::CustomSql(sql)),
            _ => Err(BuildError::InvalidArgument(format!(
                "source '{}' needs exactly one of table or custom_sql",
                self.alias
            ))),
        }
    }
}

enum Source<'a> {
    Table(&'a str),
    CustomSql(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinDefinition {
    pub kind: JoinKind,
    #[serde(flatten)]
    pub source: SourceDefinition,
    pub on: Vec<OnClause>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnMappingDefinition {
    pub table_alias: String,
    pub field: String,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AliasDefinition {
    pub field: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub role: ColumnRole,
    pub continuity: Continuity,
    pub datatype: Datatype,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalculationDefinition {
    pub formula: String,
    pub caption: String,
    pub role: ColumnRole,
    pub continuity: Continuity,
    pub datatype: Datatype,
}

/// One filter, tagged by kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterDefinition {
    Categorical {
        column: String,
        values: Vec<FilterValue>,
        #[serde(default)]
        mode: FilterMode,
        #[serde(default)]
        manual_selection: bool,
    },
    Continuous {
        column: String,
        #[serde(default)]
        min: Option<FilterValue>,
        #[serde(default)]
        max: Option<FilterValue>,
        #[serde(default)]
        date: bool,
    },
    RelativeDate {
        column: String,
        period_type: PeriodType,
        #[serde(default)]
        window: RelativeWindow,
        #[serde(default)]
        periods: u32,
        #[serde(default)]
        to_date: bool,
    },
}

impl FilterDefinition {
    pub fn to_filter(&self) -> FilterSpec {
        match self {
            FilterDefinition::Categorical {
                column,
                values,
                mode,
                manual_selection,
            } => FilterSpec::Categorical(CategoricalFilter {
                column: column.clone(),
                values: values.clone(),
                mode: *mode,
                manual_selection: *manual_selection,
            }),
            FilterDefinition::Continuous { column, min, max, date } => FilterSpec::Continuous(ContinuousFilter {
                column: column.clone(),
                min: min.clone(),
                max: max.clone(),
                is_date: *date,
            }),
            FilterDefinition::RelativeDate {
                column,
                period_type,
                window,
                periods,
                to_date,
            } => {
                let filter = RelativeDateFilter::new(column.as_str(), *period_type, *window, *periods);
                FilterSpec::RelativeDate(if *to_date { filter.to_date() } else { filter })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractDefinition {
    pub file: String,
    #[serde(default)]
    pub incremental_key: Option<String>,
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,
}

impl DatasourceDefinition {
    /// Replay the definition into a fresh builder
    pub fn into_builder(self) -> Result<DatasourceBuilder, BuildError> {
        let mut builder = DatasourceBuilder::new(self.connection.clone())?;
        self.apply(&mut builder)?;
        Ok(builder)
    }

    /// Replay the definition onto an existing builder
    ///
    /// Useful when the builder carries an injected id generator or clock.
    pub fn apply(&self, builder: &mut DatasourceBuilder) -> Result<(), BuildError> {
        match self.root.source()? {
            Source::Table(table) => builder.set_root_table(table, &self.root.alias)?,
            Source::CustomSql(sql) => builder.set_root_custom_sql(sql, &self.root.alias)?,
        }
        for join in &self.joins {
            match join.source.source()? {
                Source::Table(table) => builder.join_table(join.kind, table, &join.source.alias, join.on.clone())?,
                Source::CustomSql(sql) => {
                    builder.join_custom_sql(join.kind, sql, &join.source.alias, join.on.clone())?
                }
            }
        }
        for mapping in &self.columns {
            builder.add_table_column(&mapping.table_alias, &mapping.field, &mapping.alias)?;
        }
        for alias in &self.aliases {
            let mut column = ColumnAlias::new(alias.field.as_str(), alias.role, alias.continuity, alias.datatype);
            if let Some(caption) = &alias.caption {
                column = column.with_caption(caption.as_str());
            }
            builder.add_column_alias(column)?;
        }
        for calc in &self.calculations {
            builder.add_calculation(&calc.formula, &calc.caption, calc.role, calc.continuity, calc.datatype)?;
        }
        for filter in &self.filters {
            builder.add_datasource_filter(filter.to_filter())?;
        }
        if let Some(extract) = &self.extract {
            builder.add_extract(&extract.file, extract.incremental_key.as_deref())?;
            for filter in &extract.filters {
                builder.add_extract_filter(filter.to_filter())?;
            }
        }
        debug!(
            "Replayed definition '{}': {} joins, {} filters",
            self.connection.name,
            self.joins.len(),
            self.filters.len()
        );
        Ok(())
    }
}
