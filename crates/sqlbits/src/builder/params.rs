//! Parameter binding: the parameter tables and how a bound key is written.

use super::Builder;
use std::fmt::Write as _;

impl Builder {
    /// Set a parameter value without touching the SQL text.
    pub fn set_param(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.bind_scalar(key, Some(value.into()));
        self
    }

    /// Set a possibly-NULL parameter value without touching the SQL text.
    pub fn set_nullable_param(&mut self, key: &str, value: Option<String>) -> &mut Self {
        self.bind_scalar(key, value);
        self
    }

    /// Set a list of values for a key without touching the SQL text; the key
    /// will render as an `IN (...)` membership test.
    pub fn set_param_set<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bind_set(key, values.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the data for `key` is a set of values.
    ///
    /// Keys bound locally answer from the local tables; unknown keys are
    /// looked up on the data source, if any.
    pub fn is_param_a_set(&self, key: &str) -> bool {
        if self.params.contains_key(key) {
            self.param_sets.contains_key(key)
        } else {
            self.data_source
                .as_ref()
                .is_some_and(|src| src.is_key_list(key))
        }
    }

    /// Current scalar value of a parameter; `None` when unset, NULL or a set.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.as_deref()
    }

    /// Current value list of a set parameter.
    pub fn param_set(&self, key: &str) -> Option<&[String]> {
        self.param_sets.get(key).map(Vec::as_slice)
    }

    /// Return `key` if unused, otherwise the first of `key2`, `key3`, ...
    /// that is not bound yet.
    ///
    /// Some drivers reject duplicate parameter names, which matters when
    /// one data key is needed several times (e.g. MERGE/upsert statements).
    pub fn unique_param_key(&self, key: &str) -> String {
        if !self.params.contains_key(key) {
            return key.to_string();
        }
        let mut i = 2usize;
        loop {
            let candidate = format!("{key}{i}");
            if !self.params.contains_key(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }

    /// Use `value` when the (data source or local) value of `key` is NULL,
    /// or an empty set.
    pub fn set_param_value_if_null(&mut self, key: &str, value: &str) -> &mut Self {
        self.pull_from_source(key);
        let needs_default = if self.is_param_a_set(key) {
            self.param_set(key).is_none_or(<[String]>::is_empty)
        } else {
            self.param(key).is_none()
        };
        if needs_default {
            self.set_param(key, value);
        }
        self
    }

    /// Use `value` when the (data source or local) value of `key` is empty:
    /// NULL, `""`, `"0"` or an empty set.
    pub fn set_param_value_if_empty(&mut self, key: &str, value: &str) -> &mut Self {
        self.pull_from_source(key);
        let needs_default = if self.is_param_a_set(key) {
            self.param_set(key).is_none_or(<[String]>::is_empty)
        } else {
            matches!(self.param(key), None | Some("") | Some("0"))
        };
        if needs_default {
            self.set_param(key, value);
        }
        self
    }

    /// Bind `value` under `key` and write it, using `key` as the column.
    /// Bypasses the data source.
    pub fn append_param(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.set_param(key, value);
        self.apply_binding(key, key);
        self
    }

    /// Write `key` (as its own column) regardless of whether data defines it.
    pub fn must_add_param(&mut self, key: &str) -> &mut Self {
        self.must_add_param_for_column(key, key)
    }

    /// Write `key` against `column` regardless of whether data defines it.
    /// The value is pulled from the data source unless already bound.
    pub fn must_add_param_for_column(&mut self, key: &str, column: &str) -> &mut Self {
        self.pull_from_source(key);
        self.apply_binding(column, key);
        self
    }

    /// Write `key` (as its own column) only if the data source defines it.
    pub fn add_param_if_defined(&mut self, key: &str) -> &mut Self {
        self.add_param_for_column_if_defined(key, key)
    }

    /// Write `key` against `column` only if the data source defines it;
    /// otherwise the column is left out of the statement entirely.
    pub fn add_param_for_column_if_defined(&mut self, key: &str, column: &str) -> &mut Self {
        let defined = self
            .data_source
            .as_ref()
            .is_some_and(|src| src.is_key_defined(key));
        if defined {
            self.pull_from_source(key);
            self.apply_binding(column, key);
        }
        self
    }

    pub(crate) fn bind_scalar(&mut self, key: &str, value: Option<String>) {
        self.param_sets.shift_remove(key);
        self.params.insert(key.to_string(), value);
    }

    pub(crate) fn bind_set(&mut self, key: &str, values: Vec<String>) {
        self.params.insert(key.to_string(), None);
        self.param_sets.insert(key.to_string(), values);
    }

    /// Copy the data source's value for `key` unless it is already bound.
    fn pull_from_source(&mut self, key: &str) {
        if self.params.contains_key(key) {
            return;
        }
        let Some(src) = self.data_source.as_ref() else {
            return;
        };
        if src.is_key_list(key) {
            let values = src.values_for(key).unwrap_or_default();
            tracing::debug!(target: "sqlbits.sql", key, count = values.len(), "pulled value list from data source");
            self.bind_set(key, values);
        } else {
            let value = src.value_for(key);
            tracing::debug!(target: "sqlbits.sql", key, is_null = value.is_none(), "pulled value from data source");
            self.bind_scalar(key, value);
        }
    }

    /// Write the predicate or assignment for `key` against `column`.
    ///
    /// - non-empty set: `<prefix><column> IN (:key_1,:key_2,...)` (`<>`
    ///   becomes `NOT IN`), binding one fresh key per element;
    /// - empty set: nothing;
    /// - value present, or not in a predicate: `<prefix><column><op>:key`;
    /// - absent value in a predicate: `IS NULL` for `=`, `IS NOT NULL` for
    ///   `<>`, nothing for any other operator.
    pub(crate) fn apply_binding(&mut self, column: &str, key: &str) {
        let column = self.dialect.quote_identifier(column);

        if let Some(values) = self.param_sets.get(key) {
            if values.is_empty() {
                tracing::debug!(target: "sqlbits.sql", key, "empty value set, nothing written");
                return;
            }
            let values = values.clone();
            self.write_value_list(&column, key, values);
            return;
        }

        let has_value = self.params.get(key).is_some_and(Option::is_some);
        if has_value || !self.ctx.mode().uses_is_null() {
            let _ = write!(
                self.sql,
                "{}{}{}:{}",
                self.ctx.prefix(),
                column,
                self.ctx.operator(),
                key
            );
        } else if let Some(check) = self.ctx.null_check() {
            self.sql.push_str(self.ctx.prefix());
            self.sql.push_str(&column);
            self.sql.push_str(check);
        }
    }

    fn write_value_list(&mut self, column: &str, key: &str, values: Vec<String>) {
        let mut clause = String::new();
        clause.push_str(self.ctx.prefix());
        clause.push_str(column);
        clause.push_str(self.ctx.list_operator());
        clause.push('(');
        for (i, value) in values.into_iter().enumerate() {
            let element_key = format!("{key}_{}", i + 1);
            if i > 0 {
                clause.push(',');
            }
            clause.push(':');
            clause.push_str(&element_key);
            self.bind_scalar(&element_key, Some(value));
        }
        clause.push(')');
        self.sql.push_str(&clause);
    }
}
