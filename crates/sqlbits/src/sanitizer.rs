//! Field and sort sanitization contracts.
//!
//! UI supplied sort orders and requested field lists are an injection vector:
//! they end up written into the SQL text, not bound as parameters. A
//! [`Sanitizer`] decides which names are legal; the builder only consumes it.

use crate::consts::{ORDER_BY_ASCENDING, ORDER_BY_DESCENDING};
use indexmap::IndexMap;
use std::fmt;

/// Ordered mapping of field name to requested sort direction token.
///
/// Directions are kept as raw tokens because they usually come straight from
/// user input; see [`SortDirection::from_token`].
pub type OrderByList = IndexMap<String, String>;

/// Sort direction of one ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a direction token. Anything other than a case-insensitive
    /// `DESC` (including typos) is ascending.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case(ORDER_BY_DESCENDING) {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => ORDER_BY_ASCENDING,
            SortDirection::Descending => ORDER_BY_DESCENDING,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Decides which field names may be written into a statement.
///
/// Implementors only need [`defined_fields`](Sanitizer::defined_fields),
/// [`is_field_sortable`](Sanitizer::is_field_sortable) and
/// [`default_sort`](Sanitizer::default_sort); the pruning methods have
/// default implementations in terms of those.
pub trait Sanitizer {
    /// All fields that may appear in a select list, in display order.
    fn defined_fields(&self) -> Vec<String>;

    /// Whether the named field may be used in ORDER BY.
    fn is_field_sortable(&self, name: &str) -> bool;

    /// Sort order to use when the caller asked for nothing usable.
    fn default_sort(&self) -> OrderByList;

    /// Drop every entry whose field is not sortable.
    fn sanitize_order_by(&self, list: &OrderByList) -> OrderByList {
        list.iter()
            .filter(|(field, _)| self.is_field_sortable(field))
            .map(|(field, dir)| (field.clone(), dir.clone()))
            .collect()
    }

    /// Drop every field that is not defined.
    fn sanitize_field_list(&self, fields: &[String]) -> Vec<String> {
        let defined = self.defined_fields();
        fields
            .iter()
            .filter(|f| defined.iter().any(|d| d == *f))
            .cloned()
            .collect()
    }
}
