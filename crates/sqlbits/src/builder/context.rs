use crate::consts::{OPERATOR_EQUAL, OPERATOR_NOT_EQUAL};

/// Which kind of clause the next bound parameter is written into.
///
/// `=` against NULL is ambiguous unless it is known whether the parameter is
/// part of a SET clause or a predicate. In [`Where`](ClauseMode::Where) and
/// [`Filter`](ClauseMode::Filter) mode a missing value renders as
/// `IS [NOT] NULL`; in [`Plain`](ClauseMode::Plain) mode a placeholder is
/// always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClauseMode {
    #[default]
    Plain,
    /// Entered by `start_where_clause`.
    Where,
    /// Entered by `start_filter`.
    Filter,
}

impl ClauseMode {
    /// Whether absent values are rendered as NULL checks.
    pub fn uses_is_null(self) -> bool {
        !matches!(self, ClauseMode::Plain)
    }
}

/// The modal state consulted by every parameter-writing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamContext {
    prefix: String,
    operator: String,
    mode: ClauseMode,
}

impl Default for ParamContext {
    fn default() -> Self {
        Self {
            prefix: " ".to_string(),
            operator: OPERATOR_EQUAL.to_string(),
            mode: ClauseMode::Plain,
        }
    }
}

impl ParamContext {
    /// Glue written before the next parameter, e.g. `" WHERE "` or `" AND "`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Operator used by the next parameter, e.g. `"="`, `"<>"`, `" LIKE "`.
    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn mode(&self) -> ClauseMode {
        self.mode
    }

    pub(crate) fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    /// `!=` is not standard SQL but a common mistake; store it as `<>`.
    pub(crate) fn set_operator(&mut self, operator: &str) {
        self.operator = operator.replace("!=", OPERATOR_NOT_EQUAL);
    }

    pub(crate) fn set_mode(&mut self, mode: ClauseMode) {
        self.mode = mode;
    }

    /// Operator to use in front of a parenthesized value list.
    pub(crate) fn list_operator(&self) -> &str {
        match self.operator.trim() {
            OPERATOR_EQUAL => " IN ",
            OPERATOR_NOT_EQUAL => " NOT IN ",
            _ => self.operator.as_str(),
        }
    }

    /// NULL check replacing the comparison when the value is absent; no
    /// sensible rewrite exists for other operators.
    pub(crate) fn null_check(&self) -> Option<&'static str> {
        match self.operator.trim() {
            OPERATOR_EQUAL => Some(" IS NULL"),
            OPERATOR_NOT_EQUAL => Some(" IS NOT NULL"),
            _ => None,
        }
    }
}
