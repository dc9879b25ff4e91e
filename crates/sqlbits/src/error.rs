//! Error types for sqlbits

use thiserror::Error;

/// Boxed error raised by an external collaborator (transaction control).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for sqlbits operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types for statement building.
///
/// Unknown sort directions and empty value sets are silent policies, not
/// errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Driver name does not resolve to a known dialect
    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    /// A builder was configured without any dialect
    #[error("No SQL dialect configured for the statement builder")]
    MissingDialect,

    /// Failure reported by the transaction collaborator
    #[error(transparent)]
    Transaction(BoxError),
}

impl BuildError {
    /// Create an unknown dialect error
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect(name.into())
    }

    /// Check if this error came from the transaction collaborator
    pub fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}
