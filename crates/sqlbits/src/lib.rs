//! # sqlbits
//!
//! A mutable, dialect-aware SQL statement assembler.
//!
//! ## Features
//!
//! - **Named parameters everywhere**: build with `:key` placeholders, render
//!   positional `$n` / `?` for drivers that need them
//! - **NULL-aware predicates**: an absent value renders `IS [NOT] NULL` in a
//!   WHERE clause and a plain placeholder in a SET clause
//! - **Value sets**: list-valued keys render as `IN (...)` / `NOT IN (...)`
//! - **Injection guards**: ORDER BY and field lists go through a [`Sanitizer`]
//! - **Composition**: sub-queries, filters and aggregate rewrites of a query
//! - **Transaction nesting**: only the outermost begin/commit reaches the database
//!
//! ## Example
//!
//! ```ignore
//! use sqlbits::{Builder, DialectInfo};
//!
//! let mut filter = Builder::new(DialectInfo::postgres());
//! filter.start_filter().append_param("status", "active");
//!
//! let mut sql = Builder::new(DialectInfo::postgres());
//! sql.start_with("SELECT * FROM users")
//!     .start_where_clause()
//!     .apply_filter(&filter)
//!     .add_query_limit(10, 20);
//!
//! assert_eq!(
//!     sql.render(),
//!     r#"SELECT * FROM users WHERE true AND "status"=$1 LIMIT 10 OFFSET 20"#
//! );
//! assert_eq!(sql.positional_args(), ["active"]);
//! ```

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod consts;
pub mod dialect;
pub mod error;
pub mod pager;
pub mod sanitizer;
pub mod source;
pub mod transaction;

pub use aggregate::{Aggregate, AggregateDefinition, ROW_COUNT_ALIAS};
pub use builder::{
    Builder, ClauseMode, ParamContext, SharedDataSource, SharedSanitizer,
    SharedTransactionController, Statement,
};
pub use config::BuilderConfig;
pub use consts::*;
pub use dialect::{Dialect, DialectInfo, PaginationStyle, PlaceholderStyle};
pub use error::{BoxError, BuildError, BuildResult};
pub use pager::{PagedResults, RowCountReceiver};
pub use sanitizer::{OrderByList, Sanitizer, SortDirection};
pub use source::{DataSource, SourceValue};
pub use transaction::{TransactionController, TransactionDepth};
