//! Field lists, ordering and pagination.

use super::Builder;
use crate::consts::{FIELD_LIST_HINT_END, FIELD_LIST_HINT_START};
use crate::pager::PagedResults;
use crate::sanitizer::{OrderByList, SortDirection};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn hinted_field_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?is)\bSELECT\s+(?:(?:DISTINCT|ALL)\s+)?({}.*?{})\s*FROM\b",
            regex::escape(FIELD_LIST_HINT_START),
            regex::escape(FIELD_LIST_HINT_END)
        );
        Regex::new(&pattern).expect("invalid built-in hinted field list regex")
    })
}

fn field_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)\bSELECT\s+(.+?)\s+FROM\b").expect("invalid built-in field list regex")
    })
}

/// Locate the byte range of the SELECT field list in `sql`.
///
/// When both field list hints are present, the range covers exactly the
/// hinted span (hints included) so a nested `SELECT ... FROM` inside the list
/// is skipped. A `DISTINCT` or `ALL` before the start hint stays outside it. Otherwise it is the shortest span between the first `SELECT`
/// and the next `FROM`.
pub(crate) fn locate_select_fields(sql: &str) -> Option<Range<usize>> {
    let re = if sql.contains(FIELD_LIST_HINT_START) && sql.contains(FIELD_LIST_HINT_END) {
        hinted_field_list_re()
    } else {
        field_list_re()
    };
    re.captures(sql)?.get(1).map(|m| m.range())
}

impl Builder {
    /// Append a list of fields, or `*` when the list is empty.
    ///
    /// The current prefix (whitespace trimmed) qualifies every field, so a
    /// prefix of `"u."` yields `u.id, u.name`. Fields are **not** sanitized
    /// here; see [`add_sanitized_field_list`](Builder::add_sanitized_field_list).
    pub fn add_field_list<S: AsRef<str>>(&mut self, fields: &[S]) -> &mut Self {
        let qualifier = self.ctx.prefix().trim().to_string();
        let list = if fields.is_empty() {
            format!("{qualifier}*")
        } else {
            fields
                .iter()
                .map(|f| format!("{qualifier}{}", f.as_ref()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        self.add(&list)
    }

    /// Append the requested fields that the sanitizer allows.
    ///
    /// Without a sanitizer nothing can be verified, so `*` is written.
    pub fn add_sanitized_field_list(&mut self, requested: &[String]) -> &mut Self {
        let fields = match &self.sanitizer {
            Some(sanitizer) => sanitizer.sanitize_field_list(requested),
            None => Vec::new(),
        };
        self.add_field_list(&fields)
    }

    /// Append `ORDER BY field ASC|DESC, ...`.
    ///
    /// Unrecognized direction tokens sort ascending. `None` or an empty list
    /// writes nothing.
    pub fn apply_order_by_list(&mut self, list: Option<&OrderByList>) -> &mut Self {
        let Some(list) = list.filter(|l| !l.is_empty()) else {
            return self;
        };
        let entries = list
            .iter()
            .map(|(field, token)| {
                let dir = SortDirection::from_token(token);
                if dir == SortDirection::Ascending && !token.trim().eq_ignore_ascii_case("ASC") {
                    tracing::debug!(
                        target: "sqlbits.sql",
                        field = field.as_str(),
                        token = token.as_str(),
                        "unrecognized sort direction, using ASC"
                    );
                }
                format!("{field} {dir}")
            })
            .collect::<Vec<_>>()
            .join(",");
        self.add("ORDER BY").add(&entries)
    }

    /// Alias of [`apply_order_by_list`](Builder::apply_order_by_list).
    pub fn apply_sort_list(&mut self, list: Option<&OrderByList>) -> &mut Self {
        self.apply_order_by_list(list)
    }

    /// Apply the caller's requested order after sanitizing it, falling back
    /// to the sanitizer's default sort when nothing usable remains. No-op
    /// without a sanitizer.
    pub fn apply_order_by_from_sanitizer(&mut self, requested: Option<&OrderByList>) -> &mut Self {
        let Some(sanitizer) = self.sanitizer.clone() else {
            return self;
        };
        let order = requested
            .map(|r| sanitizer.sanitize_order_by(r))
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| sanitizer.default_sort());
        self.apply_order_by_list(Some(&order))
    }

    /// Append the pagination clause for this dialect. `limit <= 0` writes
    /// nothing; `offset <= 0` drops the offset term.
    pub fn add_query_limit(&mut self, limit: i64, offset: i64) -> &mut Self {
        match self.dialect.pagination.clause(limit, offset) {
            Some(clause) => self.add(&clause),
            None => self,
        }
    }

    /// Append the pagination clause described by a pager.
    pub fn apply_query_limit_from_pager(&mut self, pager: &dyn PagedResults) -> &mut Self {
        self.add_query_limit(pager.pager_page_size(), pager.pager_query_offset())
    }

    /// Replace the SELECT field list with `fields`.
    ///
    /// If the field list contains a nested query, bracket it with
    /// `SELECT /* FIELDLIST */ a, (SELECT ...) AS b /* /FIELDLIST */ FROM`.
    /// An empty `fields` is a no-op.
    pub fn replace_select_fields_with<S: AsRef<str>>(&mut self, fields: &[S]) -> &mut Self {
        if fields.is_empty() {
            return self;
        }
        if let Some(span) = locate_select_fields(&self.sql) {
            let list = fields
                .iter()
                .map(|f| f.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            self.sql.replace_range(span, &list);
        }
        self
    }
}
