//! Filter definitions
//!
//! One variant per filter kind, each carrying only the fields valid for it.

use serde::Deserialize;
use std::str::FromStr;

use super::column::{quantitative_key_name, ColumnInstance};
use super::value::FilterValue;
use crate::builder::BuildError;

/// Which filter collection a filter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    Datasource,
    Extract,
}

/// Include or exclude the listed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum FilterMode {
    #[default]
    Include,
    Exclude,
}

impl FilterMode {
    /// Value of the `user:ui-enumeration` attribute
    pub fn ui_enumeration(&self) -> &'static str {
        match self {
            FilterMode::Include => "inclusive",
            FilterMode::Exclude => "exclusive",
        }
    }
}

impl FromStr for FilterMode {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "include" => Ok(FilterMode::Include),
            "exclude" => Ok(FilterMode::Exclude),
            _ => Err(BuildError::InvalidArgument(format!(
                "'{}' is not valid, must be include or exclude",
                s
            ))),
        }
    }
}

impl TryFrom<String> for FilterMode {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Period unit for relative date filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PeriodType {
    Quarter,
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Quarter => "quarter",
            PeriodType::Year => "year",
            PeriodType::Month => "month",
            PeriodType::Day => "day",
            PeriodType::Hour => "hour",
            PeriodType::Minute => "minute",
        }
    }
}

impl FromStr for PeriodType {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quarter" => Ok(PeriodType::Quarter),
            "year" => Ok(PeriodType::Year),
            "month" => Ok(PeriodType::Month),
            "day" => Ok(PeriodType::Day),
            "hour" => Ok(PeriodType::Hour),
            "minute" => Ok(PeriodType::Minute),
            _ => Err(BuildError::InvalidArgument(format!(
                "period type '{}' must be one of: quarter, year, month, day, hour, minute",
                s
            ))),
        }
    }
}

impl TryFrom<String> for PeriodType {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Direction of a relative date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum RelativeWindow {
    #[default]
    Previous,
    Next,
    Current,
}

impl FromStr for RelativeWindow {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "previous" => Ok(RelativeWindow::Previous),
            "next" => Ok(RelativeWindow::Next),
            "current" => Ok(RelativeWindow::Current),
            _ => Err(BuildError::InvalidArgument(format!(
                "'{}' is not a window, use previous, next or current",
                s
            ))),
        }
    }
}

impl TryFrom<String> for RelativeWindow {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Dimension filter over an explicit list of values
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalFilter {
    pub column: String,
    pub values: Vec<FilterValue>,
    pub mode: FilterMode,
    pub manual_selection: bool,
}

impl CategoricalFilter {
    pub fn new(column: impl Into<String>, values: Vec<FilterValue>, mode: FilterMode) -> Self {
        Self {
            column: column.into(),
            values,
            mode,
            manual_selection: false,
        }
    }

    pub fn include(column: impl Into<String>, values: Vec<FilterValue>) -> Self {
        Self::new(column, values, FilterMode::Include)
    }

    pub fn exclude(column: impl Into<String>, values: Vec<FilterValue>) -> Self {
        Self::new(column, values, FilterMode::Exclude)
    }

    /// Mark the value list as typed in by hand rather than picked from the domain
    pub fn with_manual_selection(mut self) -> Self {
        self.manual_selection = true;
        self
    }
}

/// Range filter over a continuous column
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousFilter {
    pub column: String,
    pub min: Option<FilterValue>,
    pub max: Option<FilterValue>,
    pub is_date: bool,
}

impl ContinuousFilter {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            min: None,
            max: None,
            is_date: false,
        }
    }

    pub fn with_min(mut self, min: impl Into<FilterValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<FilterValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Treat the bounds as date literals
    pub fn dates(mut self) -> Self {
        self.is_date = true;
        self
    }
}

/// Filter on a window of periods relative to today
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeDateFilter {
    pub column: String,
    pub period_type: PeriodType,
    pub window: RelativeWindow,
    /// Number of periods; ignored for the current window
    pub periods: u32,
    pub include_future: bool,
}

impl RelativeDateFilter {
    pub fn new(
        column: impl Into<String>,
        period_type: PeriodType,
        window: RelativeWindow,
        periods: u32,
    ) -> Self {
        Self {
            column: column.into(),
            period_type,
            window,
            periods,
            include_future: true,
        }
    }

    /// Stop the window at today (excludes future dates)
    pub fn to_date(mut self) -> Self {
        self.include_future = false;
        self
    }

    /// `(first_period, last_period)` for the window
    pub fn period_bounds(&self) -> (i64, i64) {
        let n = i64::from(self.periods);
        match self.window {
            RelativeWindow::Previous => (-n, 0),
            RelativeWindow::Next => (1, n),
            RelativeWindow::Current => (0, 0),
        }
    }
}

/// A filter of one of the three supported kinds
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Categorical(CategoricalFilter),
    Continuous(ContinuousFilter),
    RelativeDate(RelativeDateFilter),
}

impl FilterSpec {
    /// Value of the filter's `class` attribute
    pub fn class(&self) -> &'static str {
        match self {
            FilterSpec::Categorical(_) => "categorical",
            FilterSpec::Continuous(_) => "quantitative",
            FilterSpec::RelativeDate(_) => "relative-date",
        }
    }

    /// Raw column the filter targets
    pub fn column(&self) -> &str {
        match self {
            FilterSpec::Categorical(f) => &f.column,
            FilterSpec::Continuous(f) => &f.column,
            FilterSpec::RelativeDate(f) => &f.column,
        }
    }

    /// Bracketed column reference used in the document
    ///
    /// Date filters reference the quantitative-key instance, not the raw column.
    pub fn column_reference(&self) -> String {
        if self.column_instance().is_some() {
            format!("[{}]", quantitative_key_name(self.column()))
        } else {
            format!("[{}]", self.column())
        }
    }

    /// Column instance this filter depends on, if any
    pub fn column_instance(&self) -> Option<ColumnInstance> {
        match self {
            FilterSpec::Continuous(f) if f.is_date => Some(ColumnInstance::quantitative_key(&f.column)),
            FilterSpec::RelativeDate(f) => Some(ColumnInstance::quantitative_key(&f.column)),
            _ => None,
        }
    }
}

impl From<CategoricalFilter> for FilterSpec {
    fn from(f: CategoricalFilter) -> Self {
        FilterSpec::Categorical(f)
    }
}

impl From<ContinuousFilter> for FilterSpec {
    fn from(f: ContinuousFilter) -> Self {
        FilterSpec::Continuous(f)
    }
}

impl From<RelativeDateFilter> for FilterSpec {
    fn from(f: RelativeDateFilter) -> Self {
        FilterSpec::RelativeDate(f)
    }
}
