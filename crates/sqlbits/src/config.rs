//! Builder configuration: dialect selection and profile overrides.

use crate::dialect::{DialectInfo, PaginationStyle, PlaceholderStyle};
use crate::error::{BuildError, BuildResult};
use serde::Deserialize;

/// Configuration used to construct a [`Builder`](crate::Builder).
///
/// Deserializable so it can live in an application config file; every field
/// other than `driver` is an override of the named dialect's profile.
///
/// ```ignore
/// let config = BuilderConfig::new()
///     .with_driver("postgres")
///     .with_pagination(PaginationStyle::OffsetFetch);
/// let sql = Builder::from_config(&config)?;
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Driver or dialect name, e.g. `"postgres"`, `"mysql"`, `"sqlite3"`.
    pub driver: Option<String>,
    pub identifier_quote: Option<char>,
    pub supports_named_params: Option<bool>,
    pub placeholder: Option<PlaceholderStyle>,
    pub pagination: Option<PaginationStyle>,
}

impl BuilderConfig {
    /// Create an empty configuration (no dialect yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver name.
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    /// Override the identifier quote character.
    pub fn with_identifier_quote(mut self, quote: char) -> Self {
        self.identifier_quote = Some(quote);
        self
    }

    /// Override named-parameter support.
    pub fn with_named_params(mut self, supported: bool) -> Self {
        self.supports_named_params = Some(supported);
        self
    }

    /// Override the positional placeholder style.
    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Override the pagination style.
    pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Resolve the configured dialect profile with overrides applied.
    ///
    /// Fails with [`BuildError::MissingDialect`] when no driver is set and
    /// [`BuildError::UnknownDialect`] when the name is not recognized.
    pub fn resolve(&self) -> BuildResult<DialectInfo> {
        let driver = self
            .driver
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(BuildError::MissingDialect)?;

        let mut info = DialectInfo::from_driver_name(driver)?;
        if let Some(quote) = self.identifier_quote {
            info.identifier_quote = quote;
        }
        if let Some(named) = self.supports_named_params {
            info.supports_named_params = named;
        }
        if let Some(placeholder) = self.placeholder {
            info.placeholder = placeholder;
        }
        if let Some(pagination) = self.pagination {
            info.pagination = pagination;
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn missing_driver_is_fatal() {
        let err = BuilderConfig::new().resolve().unwrap_err();
        assert!(matches!(err, BuildError::MissingDialect));

        let err = BuilderConfig::new().with_driver("  ").resolve().unwrap_err();
        assert!(matches!(err, BuildError::MissingDialect));
    }

    #[test]
    fn unknown_driver_is_reported() {
        let err = BuilderConfig::new().with_driver("db2").resolve().unwrap_err();
        assert_eq!(err.to_string(), "Unknown SQL dialect: db2");
    }

    #[test]
    fn overrides_apply_on_top_of_profile() {
        let info = BuilderConfig::new()
            .with_driver("postgres")
            .with_named_params(true)
            .with_pagination(PaginationStyle::OffsetFetch)
            .resolve()
            .unwrap();
        assert_eq!(info.dialect, Dialect::PostgreSql);
        assert_eq!(info.identifier_quote, '"');
        assert!(info.supports_named_params);
        assert_eq!(info.pagination, PaginationStyle::OffsetFetch);
    }

    #[test]
    fn deserializes_from_json() {
        let config: BuilderConfig = serde_json::from_str(
            r#"{ "driver": "mysql", "placeholder": "dollar_numbered" }"#,
        )
        .unwrap();
        let info = config.resolve().unwrap();
        assert_eq!(info.dialect, Dialect::MySql);
        assert_eq!(info.identifier_quote, '`');
        assert_eq!(info.placeholder, PlaceholderStyle::DollarNumbered);
    }
}
