//! Imperative datasource builder
//!
//! Callers describe a document step by step; every collection is append-only
//! and validated when the value is appended. Nothing is rendered until the
//! assembler walks the accumulated model.

use log::{debug, trace};

use super::error::BuildError;
use super::ids::{IdGenerator, RandomCalculationIds};
use crate::compiler::materialize_relation;
use crate::datasource::{
    resolve_connection_class, ColumnAlias, ColumnInstance, ColumnRole, ColumnTypeTable, ConnectionSettings,
    Continuity, Datatype, ExtractBinding, FilterScope, FilterSpec, JoinKind, JoinStep, OnClause, Relation,
    TableSource,
};
use crate::emitter::{self, Clock, EmitError, SystemClock};
use crate::xml::XmlElement;

/// Builds one datasource document
pub struct DatasourceBuilder {
    settings: ConnectionSettings,
    connection_class: &'static str,
    root: Option<Relation>,
    joins: Vec<JoinStep>,
    column_mappings: Vec<(String, String)>,
    column_aliases: Vec<ColumnAlias>,
    column_instances: Vec<ColumnInstance>,
    datasource_filters: Vec<FilterSpec>,
    extract_filters: Vec<FilterSpec>,
    extract: Option<ExtractBinding>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl DatasourceBuilder {
    /// Create a builder; fails if the connection type is not in the catalog
    pub fn new(settings: ConnectionSettings) -> Result<Self, BuildError> {
        let connection_class = resolve_connection_class(&settings.connection_type)?;
        debug!("Datasource '{}' uses connection class {}", settings.name, connection_class);
        Ok(Self {
            settings,
            connection_class,
            root: None,
            joins: Vec::new(),
            column_mappings: Vec::new(),
            column_aliases: Vec::new(),
            column_instances: Vec::new(),
            datasource_filters: Vec::new(),
            extract_filters: Vec::new(),
            extract: None,
            ids: Box::new(RandomCalculationIds),
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the generator used for calculation identifiers
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replace the clock used for the extract update time
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ------------------------------------------------------------------
    // Relations
    // ------------------------------------------------------------------

    pub fn set_root_table(&mut self, table: &str, alias: &str) -> Result<(), BuildError> {
        require_non_empty("table name", table)?;
        require_non_empty("table alias", alias)?;
        self.set_root(Relation::table(table, alias))
    }

    pub fn set_root_custom_sql(&mut self, sql: &str, alias: &str) -> Result<(), BuildError> {
        require_non_empty("custom SQL", sql)?;
        require_non_empty("table alias", alias)?;
        self.set_root(Relation::custom_sql(sql, alias))
    }

    fn set_root(&mut self, relation: Relation) -> Result<(), BuildError> {
        if self.root.is_some() {
            return Err(BuildError::State("root relation is already set".to_string()));
        }
        trace!("Root relation: {:?}", relation);
        self.root = Some(relation);
        Ok(())
    }

    /// Describe one ON condition; has no effect on the document
    pub fn define_join_clause(
        left_alias: &str,
        left_field: &str,
        operator: &str,
        right_alias: &str,
        right_field: &str,
    ) -> OnClause {
        OnClause::new(left_alias, left_field, operator, right_alias, right_field)
    }

    /// Join a database table onto everything declared so far
    pub fn join_table(
        &mut self,
        kind: JoinKind,
        table: &str,
        alias: &str,
        on_clauses: Vec<OnClause>,
    ) -> Result<(), BuildError> {
        require_non_empty("table name", table)?;
        self.push_join(kind, TableSource::Table(table.to_string()), alias, on_clauses)
    }

    /// Join a custom SQL query onto everything declared so far
    pub fn join_custom_sql(
        &mut self,
        kind: JoinKind,
        sql: &str,
        alias: &str,
        on_clauses: Vec<OnClause>,
    ) -> Result<(), BuildError> {
        require_non_empty("custom SQL", sql)?;
        self.push_join(kind, TableSource::CustomSql(sql.to_string()), alias, on_clauses)
    }

    fn push_join(
        &mut self,
        kind: JoinKind,
        source: TableSource,
        alias: &str,
        on_clauses: Vec<OnClause>,
    ) -> Result<(), BuildError> {
        require_non_empty("table alias", alias)?;
        if on_clauses.is_empty() {
            return Err(BuildError::InvalidArgument(
                "join must have at least one ON clause describing the relation".to_string(),
            ));
        }
        if self.root.is_none() {
            return Err(BuildError::State(
                "a root table or custom SQL must be set before joining".to_string(),
            ));
        }
        debug!("Joining '{}' ({} join, {} ON clauses)", alias, kind, on_clauses.len());
        self.joins.push(JoinStep {
            kind,
            source,
            alias: alias.to_string(),
            on_clauses,
        });
        Ok(())
    }

    /// The full relation tree: joins folded onto the root
    pub fn relation(&self) -> Result<Relation, BuildError> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| BuildError::State("no root table or custom SQL has been set".to_string()))?;
        Ok(materialize_relation(root, &self.joins))
    }

    // ------------------------------------------------------------------
    // Columns
    // ------------------------------------------------------------------

    /// Map a raw table field to a field alias
    pub fn add_table_column(
        &mut self,
        table_alias: &str,
        field: &str,
        field_alias: &str,
    ) -> Result<(), BuildError> {
        require_non_empty("table alias", table_alias)?;
        require_non_empty("field", field)?;
        require_non_empty("field alias", field_alias)?;
        let value = format!("[{}].[{}]", table_alias, field);
        match self.column_mappings.iter_mut().find(|(key, _)| key == field_alias) {
            Some(slot) => slot.1 = value,
            None => self.column_mappings.push((field_alias.to_string(), value)),
        }
        Ok(())
    }

    /// Add a field alias; an alias with the same field name is replaced in place
    pub fn add_column_alias(&mut self, alias: ColumnAlias) -> Result<(), BuildError> {
        require_non_empty("field name", &alias.field_name)?;
        trace!("Column alias [{}] ({})", alias.field_name, alias.datatype);
        match self
            .column_aliases
            .iter_mut()
            .find(|existing| existing.field_name == alias.field_name)
        {
            Some(slot) => *slot = alias,
            None => self.column_aliases.push(alias),
        }
        Ok(())
    }

    /// Add a calculated field and return its synthetic field name
    ///
    /// The returned name is what filters use to target the calculation.
    pub fn add_calculation(
        &mut self,
        formula: &str,
        caption: &str,
        role: ColumnRole,
        continuity: Continuity,
        datatype: Datatype,
    ) -> Result<String, BuildError> {
        require_non_empty("calculation formula", formula)?;
        let field_name = self.ids.next();
        if self.column_aliases.iter().any(|a| a.field_name == field_name) {
            return Err(BuildError::State(format!(
                "identifier generator produced duplicate name '{}'",
                field_name
            )));
        }
        let alias = ColumnAlias::new(field_name.as_str(), role, continuity, datatype)
            .with_caption(caption)
            .with_calculation(formula);
        self.add_column_alias(alias)?;
        debug!("Calculation '{}' registered as [{}]", caption, field_name);
        Ok(field_name)
    }

    /// Register a quantitative-key column instance; duplicates are ignored
    pub fn add_column_instance(&mut self, column: &str) -> Result<(), BuildError> {
        require_non_empty("column", column)?;
        self.register_instance(ColumnInstance::quantitative_key(column));
        Ok(())
    }

    fn register_instance(&mut self, instance: ColumnInstance) {
        if !self.column_instances.contains(&instance) {
            trace!("Column instance [{}]", instance.derived_name);
            self.column_instances.push(instance);
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn add_datasource_filter(&mut self, filter: impl Into<FilterSpec>) -> Result<(), BuildError> {
        self.add_filter(FilterScope::Datasource, filter.into())
    }

    pub fn add_extract_filter(&mut self, filter: impl Into<FilterSpec>) -> Result<(), BuildError> {
        self.add_filter(FilterScope::Extract, filter.into())
    }

    /// Validate a filter, register the column instance it needs, then append it
    pub fn add_filter(&mut self, scope: FilterScope, filter: FilterSpec) -> Result<(), BuildError> {
        validate_filter(&filter)?;
        if let Some(instance) = filter.column_instance() {
            self.register_instance(instance);
        }
        debug!("Adding {} filter on [{}] ({:?})", filter.class(), filter.column(), scope);
        match scope {
            FilterScope::Datasource => self.datasource_filters.push(filter),
            FilterScope::Extract => self.extract_filters.push(filter),
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Extract
    // ------------------------------------------------------------------

    /// Bind an extract file; at most one per document
    pub fn add_extract(&mut self, filename: &str, incremental_key: Option<&str>) -> Result<(), BuildError> {
        if self.extract.is_some() {
            return Err(BuildError::State("an extract is already bound to this datasource".to_string()));
        }
        validate_file_name(filename)?;
        if let Some(key) = incremental_key {
            require_non_empty("incremental refresh key", key)?;
        }
        debug!("Extract bound to {}", filename);
        self.extract = Some(ExtractBinding {
            filename: filename.to_string(),
            incremental_key: incremental_key.map(str::to_string),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Assemble the document tree
    pub fn to_document(&self) -> Result<XmlElement, BuildError> {
        emitter::assemble(self)
    }

    /// Assemble and render the document
    pub fn to_xml_string(&self) -> Result<String, EmitError> {
        emitter::render(self)
    }

    /// Column types the extract writer needs, inferred from extract filters
    pub fn extract_column_types(&self) -> ColumnTypeTable {
        emitter::infer_extract_columns(&self.extract_filters, &self.column_instances)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub fn connection_class(&self) -> &'static str {
        self.connection_class
    }

    pub fn joins(&self) -> &[JoinStep] {
        &self.joins
    }

    pub fn column_mappings(&self) -> &[(String, String)] {
        &self.column_mappings
    }

    pub fn column_aliases(&self) -> &[ColumnAlias] {
        &self.column_aliases
    }

    pub fn column_instances(&self) -> &[ColumnInstance] {
        &self.column_instances
    }

    pub fn datasource_filters(&self) -> &[FilterSpec] {
        &self.datasource_filters
    }

    pub fn extract_filters(&self) -> &[FilterSpec] {
        &self.extract_filters
    }

    pub fn extract(&self) -> Option<&ExtractBinding> {
        self.extract.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

fn require_non_empty(what: &str, value: &str) -> Result<(), BuildError> {
    if value.trim().is_empty() {
        return Err(BuildError::InvalidArgument(format!("{} must not be empty", what)));
    }
    Ok(())
}

fn validate_filter(filter: &FilterSpec) -> Result<(), BuildError> {
    require_non_empty("filter column", filter.column())?;
    if let FilterSpec::Categorical(f) = filter {
        if f.values.is_empty() {
            return Err(BuildError::InvalidArgument(format!(
                "categorical filter on [{}] needs at least one value",
                f.column
            )));
        }
    }
    Ok(())
}

/// Extract file names end up at a fixed path inside the package, so they must
/// be a bare file name.
fn validate_file_name(name: &str) -> Result<(), BuildError> {
    require_non_empty("extract file name", name)?;
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(BuildError::InvalidArgument(format!(
            "extract file name '{}' must not contain path segments",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SequenceIds;
    use crate::datasource::{CategoricalFilter, ContinuousFilter, PeriodType, RelativeDateFilter, RelativeWindow};

    fn builder() -> DatasourceBuilder {
        let settings = ConnectionSettings::new("postgres", "My DS", "demo").with_server("localhost");
        DatasourceBuilder::new(settings)
            .unwrap()
            .with_id_generator(SequenceIds::new())
    }

    fn on(left: &str, right: &str) -> OnClause {
        DatasourceBuilder::define_join_clause(left, "id", "=", right, "id")
    }

    #[test]
    fn test_unknown_connection_type() {
        let settings = ConnectionSettings::new("carrier-pigeon", "x", "y");
        assert!(matches!(DatasourceBuilder::new(settings), Err(BuildError::InvalidArgument(_))));
    }

    #[test]
    fn test_root_can_only_be_set_once() {
        let mut b = builder();
        b.set_root_table("orders", "Orders").unwrap();
        assert!(matches!(b.set_root_table("orders", "Again"), Err(BuildError::State(_))));
        assert!(matches!(b.set_root_custom_sql("SELECT 1", "Sql"), Err(BuildError::State(_))));
    }

    #[test]
    fn test_join_before_root_is_state_error() {
        let mut b = builder();
        let result = b.join_table(JoinKind::Inner, "people", "People", vec![on("Orders", "People")]);
        assert!(matches!(result, Err(BuildError::State(_))));
        assert!(b.joins().is_empty());
    }

    #[test]
    fn test_join_without_on_clauses_does_not_mutate() {
        let mut b = builder();
        b.set_root_table("orders", "Orders").unwrap();
        let result = b.join_table(JoinKind::Inner, "people", "People", vec![]);
        assert!(matches!(result, Err(BuildError::InvalidArgument(_))));
        assert!(b.joins().is_empty());
        assert_eq!(b.relation().unwrap(), Relation::table("orders", "Orders"));
    }

    #[test]
    fn test_relation_without_root_is_state_error() {
        assert!(matches!(builder().relation(), Err(BuildError::State(_))));
    }

    #[test]
    fn test_date_filters_register_one_instance_per_column() {
        let mut b = builder();
        b.add_datasource_filter(RelativeDateFilter::new(
            "order_date",
            PeriodType::Year,
            RelativeWindow::Previous,
            4,
        ))
        .unwrap();
        b.add_extract_filter(ContinuousFilter::new("order_date").with_min("2013-04-01").dates())
            .unwrap();
        b.add_datasource_filter(ContinuousFilter::new("profit").with_min(20)).unwrap();

        assert_eq!(b.column_instances().len(), 1);
        assert_eq!(b.column_instances()[0].derived_name, "none:order_date:qk");
        assert_eq!(b.datasource_filters().len(), 2);
        assert_eq!(b.extract_filters().len(), 1);
    }

    #[test]
    fn test_empty_categorical_filter_rejected() {
        let mut b = builder();
        let result = b.add_datasource_filter(CategoricalFilter::include("region", vec![]));
        assert!(matches!(result, Err(BuildError::InvalidArgument(_))));
        assert!(b.datasource_filters().is_empty());
    }

    #[test]
    fn test_add_calculation_uses_generated_name() {
        let mut b = builder();
        let id = b
            .add_calculation(
                "IIF([salesperson_user_id]=USERNAME(),1,0)",
                "Row Level Security",
                ColumnRole::Dimension,
                Continuity::Discrete,
                Datatype::Integer,
            )
            .unwrap();
        assert_eq!(id, "Calculation_1");

        let alias = &b.column_aliases()[0];
        assert_eq!(alias.field_name, "Calculation_1");
        assert_eq!(alias.caption.as_deref(), Some("Row Level Security"));
        assert!(alias.is_calculation());
    }

    #[test]
    fn test_column_alias_replaced_in_place() {
        let mut b = builder();
        b.add_column_alias(ColumnAlias::new("a", ColumnRole::Dimension, Continuity::Discrete, Datatype::String))
            .unwrap();
        b.add_column_alias(ColumnAlias::new("b", ColumnRole::Measure, Continuity::Continuous, Datatype::Real))
            .unwrap();
        b.add_column_alias(
            ColumnAlias::new("a", ColumnRole::Dimension, Continuity::Discrete, Datatype::String).with_caption("A"),
        )
        .unwrap();

        let names: Vec<&str> = b.column_aliases().iter().map(|a| a.field_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(b.column_aliases()[0].caption.as_deref(), Some("A"));
    }

    #[test]
    fn test_second_extract_is_state_error() {
        let mut b = builder();
        b.add_extract("Datasource.tde", None).unwrap();
        assert!(matches!(b.add_extract("Other.tde", None), Err(BuildError::State(_))));
    }

    #[test]
    fn test_extract_file_name_must_be_bare() {
        let mut b = builder();
        assert!(matches!(b.add_extract("../escape.tde", None), Err(BuildError::InvalidArgument(_))));
        assert!(matches!(b.add_extract("", None), Err(BuildError::InvalidArgument(_))));
        assert!(b.extract().is_none());
    }

    #[test]
    fn test_table_column_mapping() {
        let mut b = builder();
        b.add_table_column("Super Store", "region", "Region").unwrap();
        assert_eq!(
            b.column_mappings(),
            &[("Region".to_string(), "[Super Store].[region]".to_string())]
        );
    }
}
