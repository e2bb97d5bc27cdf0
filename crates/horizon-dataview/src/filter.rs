//! Filtering stage.
//!
//! Reduces the input collection to the rows matching either a single
//! free-text query or a set of structured property tokens. Filtering is
//! total and stateless: it is re-evaluated from the full input collection on
//! every call, which keeps correctness under rapidly changing queries
//! trivial to reason about.
//!
//! The stage produces an *index mapping* (`Vec<usize>` of surviving source
//! positions, in source order) rather than cloning items; the sort stage
//! reorders the mapping and the pagination stage slices it.

use std::cmp::Ordering;

use crate::record::Record;
use crate::value::{CellValue, compare_values};

/// A per-token comparison operator for property filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Case-insensitive substring match.
    Contains,
    /// Negated substring match.
    NotContains,
    /// Value equality.
    Equals,
    /// Negated value equality.
    NotEquals,
    /// Strictly greater than the token value.
    GreaterThan,
    /// Greater than or equal to the token value.
    GreaterOrEqual,
    /// Strictly less than the token value.
    LessThan,
    /// Less than or equal to the token value.
    LessOrEqual,
}

/// How multiple property tokens combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOperation {
    /// Every token must pass.
    #[default]
    And,
    /// At least one token must pass.
    Or,
}

/// One structured filter criterion: field, operator, value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterToken {
    /// The record field the token tests.
    pub field: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The value compared against.
    pub value: CellValue,
}

impl FilterToken {
    /// Creates a token.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<CellValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluates the token against one item.
    ///
    /// A null field value fails every operator except `NotEquals` and
    /// `NotContains` against a non-null token value.
    fn matches<T: Record>(&self, item: &T) -> bool {
        let actual = item.field(&self.field);
        if actual.is_none() {
            return matches!(
                self.operator,
                FilterOperator::NotEquals | FilterOperator::NotContains
            ) && self.value.is_some();
        }

        match self.operator {
            FilterOperator::Contains => contains(&actual, &self.value),
            FilterOperator::NotContains => !contains(&actual, &self.value),
            FilterOperator::Equals => compare_values(&actual, &self.value) == Ordering::Equal,
            FilterOperator::NotEquals => compare_values(&actual, &self.value) != Ordering::Equal,
            FilterOperator::GreaterThan => {
                compare_values(&actual, &self.value) == Ordering::Greater
            }
            FilterOperator::GreaterOrEqual => {
                compare_values(&actual, &self.value) != Ordering::Less
            }
            FilterOperator::LessThan => compare_values(&actual, &self.value) == Ordering::Less,
            FilterOperator::LessOrEqual => {
                compare_values(&actual, &self.value) != Ordering::Greater
            }
        }
    }
}

fn contains(actual: &CellValue, value: &CellValue) -> bool {
    actual
        .coerce_string()
        .to_lowercase()
        .contains(&value.coerce_string().to_lowercase())
}

/// The active filter criterion.
///
/// Only one filtering mode is active at a time, chosen by whichever variant
/// the caller passes to the view controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterQuery {
    /// A single query string matched case-insensitively ("contains"
    /// semantics) against the view's declared filterable fields.
    FreeText(String),
    /// A set of structured tokens combined with a single boolean operation.
    Property {
        /// The filter tokens.
        tokens: Vec<FilterToken>,
        /// How the tokens combine.
        operation: FilterOperation,
    },
}

impl Default for FilterQuery {
    fn default() -> Self {
        FilterQuery::FreeText(String::new())
    }
}

impl FilterQuery {
    /// Creates a property query.
    pub fn property(tokens: Vec<FilterToken>, operation: FilterOperation) -> Self {
        FilterQuery::Property { tokens, operation }
    }

    /// Returns `true` if the query retains every row.
    ///
    /// An empty or whitespace-only free-text query and an empty token set
    /// are both no-ops; the pipeline short-circuits on them because it
    /// re-runs on every keystroke.
    pub fn is_noop(&self) -> bool {
        match self {
            FilterQuery::FreeText(text) => text.trim().is_empty(),
            FilterQuery::Property { tokens, .. } => tokens.is_empty(),
        }
    }
}

/// Applies the filter, returning the surviving source indices in order.
pub fn apply<T: Record>(items: &[T], query: &FilterQuery, fields: &[String]) -> Vec<usize> {
    if query.is_noop() {
        return (0..items.len()).collect();
    }

    match query {
        FilterQuery::FreeText(text) => {
            let needle = text.trim().to_lowercase();
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| {
                    fields.iter().any(|field| {
                        item.field(field)
                            .coerce_string()
                            .to_lowercase()
                            .contains(&needle)
                    })
                })
                .map(|(index, _)| index)
                .collect()
        }
        FilterQuery::Property { tokens, operation } => items
            .iter()
            .enumerate()
            .filter(|(_, item)| match operation {
                FilterOperation::And => tokens.iter().all(|token| token.matches(*item)),
                FilterOperation::Or => tokens.iter().any(|token| token.matches(*item)),
            })
            .map(|(index, _)| index)
            .collect(),
    }
}
