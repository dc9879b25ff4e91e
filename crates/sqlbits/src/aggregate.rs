//! Aggregate rewrites of a built query.
//!
//! A pager usually needs the total row count of the very query it is paging
//! through. [`Builder::clone_as_aggregate`] copies the query and swaps its
//! field list for aggregate expressions, leaving the original untouched.

use crate::builder::Builder;
use indexmap::IndexMap;

/// Alias of the default row count aggregate.
pub const ROW_COUNT_ALIAS: &str = "rowcount";

/// Result alias mapped to the SQL expression computing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregate(IndexMap<String, String>);

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count(*) AS rowcount`
    pub fn row_count() -> Self {
        Self::new().with(ROW_COUNT_ALIAS, "count(*)")
    }

    /// Add an aggregate: `expression AS alias`.
    pub fn with(mut self, alias: impl Into<String>, expression: impl Into<String>) -> Self {
        self.0.insert(alias.into(), expression.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Select list entries, in insertion order.
    pub fn select_fields(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|(alias, expr)| format!("{expr} AS {alias}"))
            .collect()
    }
}

/// Anything that can describe the aggregates it wants computed.
pub trait AggregateDefinition {
    fn aggregate_definition(&self) -> Aggregate;
}

impl AggregateDefinition for Aggregate {
    fn aggregate_definition(&self) -> Aggregate {
        self.clone()
    }
}

impl Builder {
    /// Clone this query with its field list replaced by aggregates (row count
    /// when `definition` is `None`).
    ///
    /// Call this before ORDER BY / LIMIT are added. Queries whose field list
    /// contains a sub-query need the field list hints.
    pub fn clone_as_aggregate(&self, definition: Option<&dyn AggregateDefinition>) -> Builder {
        let aggregate = definition.map_or_else(Aggregate::row_count, |d| d.aggregate_definition());
        let mut totals = self.clone();
        totals.replace_select_fields_with(&aggregate.select_fields());
        totals
    }
}
