//! Final rendering of the statement for the driver.

use super::Builder;
use crate::dialect::PlaceholderStyle;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// A rendered statement, ready to hand to an execution layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// SQL with named (`:key`) or positional placeholders, per dialect.
    pub sql: String,
    /// Positional arguments in placeholder order; empty in named mode.
    pub args: Vec<String>,
    /// Non-NULL scalar parameters by key.
    pub named: IndexMap<String, String>,
}

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Longest bound key that `rest` starts with and that is not immediately
/// followed by a word character.
fn match_key<'a>(
    rest: &str,
    params: &'a IndexMap<String, Option<String>>,
) -> Option<(&'a str, Option<&'a String>)> {
    params
        .iter()
        .filter(|(key, _)| {
            !key.is_empty()
                && rest.starts_with(key.as_str())
                && !rest[key.len()..].chars().next().is_some_and(is_word_char)
        })
        .max_by_key(|(key, _)| key.len())
        .map(|(key, value)| (key.as_str(), value.as_ref()))
}

/// Rewrite named placeholders to positional ones.
///
/// Placeholders are numbered in the order they first occur in the text. A
/// placeholder is `:` followed by any bound key, so keys like `first-name`
/// work; the longest key wins and must end at a word boundary. Only the
/// first occurrence of each key is rewritten, and only keys with a non-NULL
/// value take part. `::type` casts are left alone.
pub(crate) fn to_positional(
    sql: &str,
    params: &IndexMap<String, Option<String>>,
    style: PlaceholderStyle,
) -> (String, Vec<String>) {
    let bytes = sql.as_bytes();
    let mut out = String::with_capacity(sql.len());
    let mut args = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let is_marker = bytes[i] == b':'
            && (i == 0 || bytes[i - 1] != b':')
            && bytes.get(i + 1) != Some(&b':');
        if !is_marker {
            i += 1;
            continue;
        }

        let start = i + 1;
        let Some((key, value)) = match_key(&sql[start..], params) else {
            i = start;
            continue;
        };
        let end = start + key.len();
        if let Some(value) = value {
            if seen.insert(key) {
                out.push_str(&sql[copied..i]);
                style.write_placeholder(args.len() + 1, &mut out);
                args.push(value.clone());
                copied = end;
            }
        }
        i = end;
    }
    out.push_str(&sql[copied..]);
    (out, args)
}

impl Builder {
    /// The statement as the driver should receive it.
    ///
    /// Dialects with named parameter support get the text verbatim. For the
    /// others the text is converted to positional placeholders and
    /// [`positional_args`](Builder::positional_args) is refilled to match.
    /// The conversion is recomputed on every call.
    pub fn render(&mut self) -> &str {
        self.positional_args.clear();
        self.positional_sql.clear();

        if self.dialect.supports_named_params {
            tracing::debug!(
                target: "sqlbits.sql",
                dialect = %self.dialect.dialect,
                param_count = self.params.len(),
                sql = %self.sql,
                "rendered statement"
            );
            return &self.sql;
        }

        let (sql, args) = to_positional(&self.sql, &self.params, self.dialect.placeholder);
        self.positional_sql = sql;
        self.positional_args = args;
        tracing::debug!(
            target: "sqlbits.sql",
            dialect = %self.dialect.dialect,
            param_count = self.params.len(),
            arg_count = self.positional_args.len(),
            sql = %self.positional_sql,
            "rendered statement"
        );
        &self.positional_sql
    }

    /// The SQL text with named placeholders, regardless of dialect.
    pub fn raw_sql(&self) -> &str {
        &self.sql
    }

    /// All parameters; set-valued keys map to `None`.
    pub fn params(&self) -> &IndexMap<String, Option<String>> {
        &self.params
    }

    pub fn param_sets(&self) -> &IndexMap<String, Vec<String>> {
        &self.param_sets
    }

    /// Arguments matching the positional placeholders of the last
    /// [`render`](Builder::render).
    pub fn positional_args(&self) -> &[String] {
        &self.positional_args
    }

    /// Non-NULL scalar parameters, unwrapped.
    pub fn named_args(&self) -> IndexMap<String, String> {
        self.params
            .iter()
            .filter_map(|(k, v)| Some((k.clone(), v.clone()?)))
            .collect()
    }

    /// Render and snapshot the statement.
    pub fn statement(&mut self) -> Statement {
        let sql = self.render().to_string();
        Statement {
            sql,
            args: self.positional_args.clone(),
            named: self.named_args(),
        }
    }
}
