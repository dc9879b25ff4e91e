//! Per-database dialect profiles.
//!
//! A [`DialectInfo`] is chosen by the caller when a builder is created and never
//! changes afterwards. It decides identifier quoting, whether named parameters
//! (`:key`) survive rendering, which positional placeholder style is used when
//! they do not, and how pagination is spelled.
//!
//! ```ignore
//! use sqlbits::{Dialect, DialectInfo};
//!
//! let pg = DialectInfo::postgres();
//! assert_eq!(pg.identifier_quote, '"');
//!
//! let mysql: Dialect = "mariadb".parse()?;
//! assert_eq!(mysql, Dialect::MySql);
//! # Ok::<(), sqlbits::BuildError>(())
//! ```

use crate::error::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known SQL dialects, plus an extension point for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    MySql,
    PostgreSql,
    Sqlite,
    /// A dialect without a built-in profile; configure it with
    /// [`DialectInfo::custom`].
    Other(String),
}

impl Dialect {
    /// Canonical display name.
    pub fn name(&self) -> &str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::Sqlite => "SQLite3",
            Dialect::Other(name) => name,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = BuildError;

    /// Resolve a driver or dialect name. Only the three built-in profiles are
    /// recognized here; use [`DialectInfo::custom`] for anything else.
    fn from_str(s: &str) -> BuildResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pgx" | "pq" => Ok(Dialect::PostgreSql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(BuildError::unknown_dialect(s)),
        }
    }
}

/// Positional placeholder style used when named parameters are unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `$1, $2, ...`
    DollarNumbered,
    /// `?`
    QuestionMark,
}

impl PlaceholderStyle {
    pub(crate) fn write_placeholder(self, index_1_based: usize, out: &mut String) {
        match self {
            Self::DollarNumbered => {
                out.push('$');
                out.push_str(&index_1_based.to_string());
            }
            Self::QuestionMark => out.push('?'),
        }
    }
}

/// How a row limit and offset are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStyle {
    /// `LIMIT n [OFFSET m]`
    LimitOffset,
    /// `[OFFSET m ROWS] FETCH FIRST n ROWS ONLY`
    OffsetFetch,
}

impl PaginationStyle {
    /// Render the clause fragments, or `None` when `limit <= 0`.
    pub(crate) fn clause(self, limit: i64, offset: i64) -> Option<String> {
        if limit <= 0 {
            return None;
        }
        let clause = match self {
            Self::LimitOffset if offset > 0 => format!("LIMIT {limit} OFFSET {offset}"),
            Self::LimitOffset => format!("LIMIT {limit}"),
            Self::OffsetFetch if offset > 0 => {
                format!("OFFSET {offset} ROWS FETCH FIRST {limit} ROWS ONLY")
            }
            Self::OffsetFetch => format!("FETCH FIRST {limit} ROWS ONLY"),
        };
        Some(clause)
    }
}

/// Immutable metadata describing how to speak to one database product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectInfo {
    pub dialect: Dialect,
    /// Character wrapped around table/column names that clash with keywords
    /// or contain spaces.
    pub identifier_quote: char,
    /// When `false`, rendering converts `:key` placeholders to positional ones.
    pub supports_named_params: bool,
    pub placeholder: PlaceholderStyle,
    pub pagination: PaginationStyle,
}

impl DialectInfo {
    /// MySQL: backtick quoting, positional `?` parameters.
    pub fn mysql() -> Self {
        Self {
            dialect: Dialect::MySql,
            identifier_quote: '`',
            supports_named_params: false,
            placeholder: PlaceholderStyle::QuestionMark,
            pagination: PaginationStyle::LimitOffset,
        }
    }

    /// PostgreSQL: double-quote quoting, positional `$n` parameters.
    pub fn postgres() -> Self {
        Self {
            dialect: Dialect::PostgreSql,
            identifier_quote: '"',
            supports_named_params: false,
            placeholder: PlaceholderStyle::DollarNumbered,
            pagination: PaginationStyle::LimitOffset,
        }
    }

    /// SQLite: double-quote quoting, named parameters kept as-is.
    pub fn sqlite() -> Self {
        Self {
            dialect: Dialect::Sqlite,
            identifier_quote: '"',
            supports_named_params: true,
            placeholder: PlaceholderStyle::QuestionMark,
            pagination: PaginationStyle::LimitOffset,
        }
    }

    /// A profile for a dialect without built-in support.
    pub fn custom(
        name: impl Into<String>,
        identifier_quote: char,
        supports_named_params: bool,
    ) -> Self {
        Self {
            dialect: Dialect::Other(name.into()),
            identifier_quote,
            supports_named_params,
            placeholder: PlaceholderStyle::DollarNumbered,
            pagination: PaginationStyle::LimitOffset,
        }
    }

    /// Built-in profile for a dialect. `Other` dialects get the ANSI defaults
    /// of [`DialectInfo::custom`].
    pub fn for_dialect(dialect: &Dialect) -> Self {
        match dialect {
            Dialect::MySql => Self::mysql(),
            Dialect::PostgreSql => Self::postgres(),
            Dialect::Sqlite => Self::sqlite(),
            Dialect::Other(name) => Self::custom(name.clone(), '"', false),
        }
    }

    /// Resolve a driver name (`"postgres"`, `"sqlite3"`, ...) to its profile.
    pub fn from_driver_name(name: &str) -> BuildResult<Self> {
        Ok(Self::for_dialect(&name.parse()?))
    }

    /// Override the pagination style.
    pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = pagination;
        self
    }

    /// Override the positional placeholder style.
    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// The literal that is always true in a WHERE clause for this dialect.
    ///
    /// PostgreSQL rejects integers in boolean position, everyone else
    /// accepts `1`.
    pub fn always_true(&self) -> &'static str {
        match self.dialect {
            Dialect::PostgreSql => "true",
            _ => "1",
        }
    }

    /// Quote an identifier, doubling any embedded quote characters.
    pub fn quote_identifier(&self, ident: &str) -> String {
        let q = self.identifier_quote;
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(q);
        for ch in ident.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
        out
    }
}
