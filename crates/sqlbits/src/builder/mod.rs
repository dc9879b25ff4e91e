//! Stateful, dialect-aware SQL statement builder.
//!
//! A [`Builder`] accumulates SQL text plus a table of named parameters. The
//! text refers to parameters as `:key`; for dialects without named parameter
//! support, [`Builder::render`] rewrites them to positional placeholders.
//!
//! # Example
//!
//! ```ignore
//! use sqlbits::{Builder, DialectInfo};
//!
//! let mut sql = Builder::new(DialectInfo::postgres());
//! sql.start_with("SELECT")
//!     .add_field_list(&["id", "name"])
//!     .add("FROM users")
//!     .start_where_clause()
//!     .set_param_set("status", ["active", "invited"])
//!     .must_add_param("status")
//!     .set_param_prefix(" AND ")
//!     .append_param("org_id", "42")
//!     .end_where_clause();
//!
//! assert_eq!(
//!     sql.render(),
//!     r#"SELECT id, name FROM users WHERE "status" IN ($1,$2) AND "org_id"=$3"#
//! );
//! ```

mod compose;
mod context;
mod fields;
mod params;
mod render;

#[cfg(test)]
mod tests;

pub use context::{ClauseMode, ParamContext};
pub use render::Statement;

use crate::config::BuilderConfig;
use crate::dialect::DialectInfo;
use crate::error::BuildResult;
use crate::sanitizer::Sanitizer;
use crate::source::DataSource;
use crate::transaction::{TransactionController, TransactionDepth};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a [`DataSource`].
pub type SharedDataSource = Arc<dyn DataSource + Send + Sync>;

/// Shared handle to a [`Sanitizer`].
pub type SharedSanitizer = Arc<dyn Sanitizer + Send + Sync>;

/// Shared handle to a [`TransactionController`].
pub type SharedTransactionController = Arc<dyn TransactionController + Send + Sync>;

/// A mutable SQL statement under construction.
///
/// Not synchronized: confine a builder to one request, and [`Clone`] it to
/// get an independent copy (text and parameter tables are copied by value;
/// collaborators are shared).
#[derive(Clone)]
pub struct Builder {
    dialect: DialectInfo,
    data_source: Option<SharedDataSource>,
    sanitizer: Option<SharedSanitizer>,
    transactions: Option<SharedTransactionController>,
    depth: TransactionDepth,
    sql: String,
    /// Every key, including set-valued ones (mapped to `None`).
    params: IndexMap<String, Option<String>>,
    param_sets: IndexMap<String, Vec<String>>,
    ctx: ParamContext,
    positional_sql: String,
    positional_args: Vec<String>,
}

impl Builder {
    /// Create a builder bound to one dialect for its whole lifetime.
    pub fn new(dialect: DialectInfo) -> Self {
        Self {
            dialect,
            data_source: None,
            sanitizer: None,
            transactions: None,
            depth: TransactionDepth::default(),
            sql: String::new(),
            params: IndexMap::new(),
            param_sets: IndexMap::new(),
            ctx: ParamContext::default(),
            positional_sql: String::new(),
            positional_args: Vec::new(),
        }
    }

    /// Create a builder from configuration, failing if no usable dialect is
    /// configured.
    pub fn from_config(config: &BuilderConfig) -> BuildResult<Self> {
        Ok(Self::new(config.resolve()?))
    }

    /// Reset text, parameters and context so the builder can be reused. The
    /// dialect, collaborators and transaction depth are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.sql.clear();
        self.params.clear();
        self.param_sets.clear();
        self.ctx = ParamContext::default();
        self.positional_sql.clear();
        self.positional_args.clear();
        self
    }

    pub fn dialect(&self) -> &DialectInfo {
        &self.dialect
    }

    pub fn context(&self) -> &ParamContext {
        &self.ctx
    }

    /// Set the source parameter values are pulled from.
    pub fn set_data_source(&mut self, source: SharedDataSource) -> &mut Self {
        self.data_source = Some(source);
        self
    }

    /// Set the object used to prune field and order-by lists.
    pub fn set_sanitizer(&mut self, sanitizer: SharedSanitizer) -> &mut Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Set the collaborator that owns real transaction control.
    pub fn set_transaction_controller(
        &mut self,
        controller: SharedTransactionController,
    ) -> &mut Self {
        self.transactions = Some(controller);
        self
    }

    /// Quote an identifier for this builder's dialect.
    pub fn quoted(&self, ident: &str) -> String {
        self.dialect.quote_identifier(ident)
    }

    /// Append `" " + fragment` to the SQL.
    ///
    /// **Never** pass unsanitized input here: values belong in parameters
    /// (`append_param`, `must_add_param`, ...).
    pub fn add(&mut self, fragment: &str) -> &mut Self {
        self.sql.push(' ');
        self.sql.push_str(fragment);
        self
    }

    /// Replace the SQL text; parameters are kept.
    pub fn start_with(&mut self, sql: impl Into<String>) -> &mut Self {
        self.sql = sql.into();
        self
    }

    /// Begin a filter fragment meant for [`apply_filter`](Builder::apply_filter).
    ///
    /// The text is seeded with the dialect's "always true" literal and the
    /// prefix becomes `" AND "`, so each added parameter extends the filter.
    pub fn start_filter(&mut self) -> &mut Self {
        self.ctx.set_mode(ClauseMode::Filter);
        self.sql = self.dialect.always_true().to_string();
        self.set_param_prefix(" AND ")
    }

    /// Enter WHERE mode; the next parameter is prefixed with `" WHERE "`.
    pub fn start_where_clause(&mut self) -> &mut Self {
        self.ctx.set_mode(ClauseMode::Where);
        self.set_param_prefix(" WHERE ")
    }

    /// Leave WHERE mode and restore the default prefix.
    pub fn end_where_clause(&mut self) -> &mut Self {
        self.ctx.set_mode(ClauseMode::Plain);
        self.set_param_prefix(" ")
    }

    /// Set the glue written before every subsequent parameter. Spacing is
    /// significant, include what is needed.
    pub fn set_param_prefix(&mut self, prefix: &str) -> &mut Self {
        self.ctx.set_prefix(prefix);
        self
    }

    /// Set the operator for every subsequent parameter. `"="` is the default,
    /// `" LIKE "` is another common choice.
    pub fn set_param_operator(&mut self, operator: &str) -> &mut Self {
        self.ctx.set_operator(operator);
        self
    }

    /// Enter one transaction nesting level.
    pub fn begin_transaction(&mut self) -> BuildResult<&mut Self> {
        let controller = self
            .transactions
            .as_deref()
            .map(|c| c as &dyn TransactionController);
        self.depth.begin(controller)?;
        Ok(self)
    }

    /// Leave one nesting level, committing when the outermost level ends.
    pub fn commit_transaction(&mut self) -> BuildResult<&mut Self> {
        let controller = self
            .transactions
            .as_deref()
            .map(|c| c as &dyn TransactionController);
        self.depth.commit(controller)?;
        Ok(self)
    }

    /// Leave one nesting level, rolling back when the outermost level ends.
    pub fn rollback_transaction(&mut self) -> BuildResult<&mut Self> {
        let controller = self
            .transactions
            .as_deref()
            .map(|c| c as &dyn TransactionController);
        self.depth.rollback(controller)?;
        Ok(self)
    }

    pub fn transaction_depth(&self) -> u32 {
        self.depth.get()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("dialect", &self.dialect.dialect)
            .field("sql", &self.sql)
            .field("params", &self.params)
            .field("param_sets", &self.param_sets)
            .field("ctx", &self.ctx)
            .field("depth", &self.depth.get())
            .finish_non_exhaustive()
    }
}
