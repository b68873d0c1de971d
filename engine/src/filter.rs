//! FILENAME: engine/src/filter.rs
//! PURPOSE: Composable record filtering for list views.
//! CONTEXT: A `FilterCriteria` is built fresh for each filter pass from the
//! user's inputs. Every criterion is opt-in: an unset input (empty string,
//! empty selection) is always satisfied, and a record must satisfy all set
//! criteria to pass. No criterion panics on a record with missing fields.

use crate::normalize::{matches, starts_with};

/// Reads an optional text field off a record.
pub type TextField<T> = fn(&T) -> Option<&str>;

/// Reads an optional numeric field off a record.
pub type NumberField<T> = fn(&T) -> Option<f64>;

// ============================================================================
// CRITERION
// ============================================================================

/// One filter dimension.
pub enum Criterion<T> {
    /// Normalized substring match against any of the listed fields.
    Text { query: String, fields: Vec<TextField<T>> },
    /// Normalized prefix match against one field.
    Prefix { query: String, field: TextField<T> },
    /// Exact equality, used for dropdown-backed values.
    Exact { value: String, field: TextField<T> },
    /// Membership in a set of allowed values.
    OneOf { values: Vec<String>, field: TextField<T> },
    /// Numeric lower bound (inclusive). Missing numbers read as 0.
    AtLeast { threshold: f64, field: NumberField<T> },
    /// Caller-supplied predicate over pre-populated record data.
    Derived(Box<dyn Fn(&T) -> bool>),
}

impl<T> Criterion<T> {
    /// Whether this criterion actually narrows the result set.
    pub fn is_set(&self) -> bool {
        match self {
            Criterion::Text { query, .. } | Criterion::Prefix { query, .. } => !query.is_empty(),
            Criterion::Exact { value, .. } => !value.is_empty(),
            Criterion::OneOf { values, .. } => !values.is_empty(),
            Criterion::AtLeast { .. } | Criterion::Derived(_) => true,
        }
    }

    pub fn accepts(&self, record: &T) -> bool {
        if !self.is_set() {
            return true;
        }
        match self {
            Criterion::Text { query, fields } => fields.iter().any(|f| matches(f(record), query)),
            Criterion::Prefix { query, field } => starts_with(field(record), query),
            Criterion::Exact { value, field } => field(record).unwrap_or("") == value,
            Criterion::OneOf { values, field } => {
                let actual = field(record).unwrap_or("");
                values.iter().any(|v| v == actual)
            }
            Criterion::AtLeast { threshold, field } => field(record).unwrap_or(0.0) >= *threshold,
            Criterion::Derived(predicate) => predicate(record),
        }
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// The active filter inputs for one list view, combined with logical AND.
pub struct FilterCriteria<T> {
    criteria: Vec<Criterion<T>>,
}

impl<T> FilterCriteria<T> {
    pub fn new() -> Self {
        FilterCriteria { criteria: Vec::new() }
    }

    /// Free-text search across several fields.
    pub fn text(mut self, query: impl Into<String>, fields: Vec<TextField<T>>) -> Self {
        self.criteria.push(Criterion::Text { query: query.into(), fields });
        self
    }

    pub fn prefix(mut self, query: impl Into<String>, field: TextField<T>) -> Self {
        self.criteria.push(Criterion::Prefix { query: query.into(), field });
        self
    }

    pub fn exact(mut self, value: impl Into<String>, field: TextField<T>) -> Self {
        self.criteria.push(Criterion::Exact { value: value.into(), field });
        self
    }

    pub fn one_of(mut self, values: Vec<String>, field: TextField<T>) -> Self {
        self.criteria.push(Criterion::OneOf { values, field });
        self
    }

    pub fn at_least(mut self, threshold: f64, field: NumberField<T>) -> Self {
        self.criteria.push(Criterion::AtLeast { threshold, field });
        self
    }

    pub fn derived(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.criteria.push(Criterion::Derived(Box::new(predicate)));
        self
    }

    /// Appends an already-built criterion.
    pub fn with(mut self, criterion: Criterion<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// True when at least one criterion would narrow the results.
    pub fn is_active(&self) -> bool {
        self.criteria.iter().any(Criterion::is_set)
    }

    pub fn matches(&self, record: &T) -> bool {
        self.criteria.iter().all(|c| c.accepts(record))
    }

    /// Returns the matching records in their original order.
    pub fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Count matches without collecting them.
    pub fn count(&self, records: &[T]) -> usize {
        records.iter().filter(|r| self.matches(r)).count()
    }
}

impl<T> Default for FilterCriteria<T> {
    fn default() -> Self {
        Self::new()
    }
}
