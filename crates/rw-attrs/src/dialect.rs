//! Dialect configuration.
//!
//! A dialect names the attribute prefix that marks directive attributes
//! (`th:classappend`) and the attribute name case policy of the markup.
//!
//! Dialects are loaded from TOML:
//!
//! ```toml
//! [dialect]
//! prefix = "th"
//! case = "insensitive"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tag::{AttributeCase, Element};

/// Default directive attribute prefix.
const DEFAULT_PREFIX: &str = "th";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Configuration file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    dialect: Dialect,
}

/// Directive prefix and attribute name policy.
///
/// # Example
///
/// ```
/// use rw_attrs::{AttributeCase, Dialect};
///
/// let dialect = Dialect::from_toml("[dialect]\nprefix = \"data-rw\"\ncase = \"sensitive\"").unwrap();
/// assert_eq!(dialect.directive_name("classappend"), "data-rw:classappend");
/// assert_eq!(dialect.unprefixed("data-rw:href"), Some("href"));
/// assert_eq!(dialect.case(), AttributeCase::Sensitive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Dialect {
    prefix: String,
    case: AttributeCase,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            case: AttributeCase::default(),
        }
    }
}

impl Dialect {
    /// Create a dialect.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the prefix is empty or contains
    /// `:` or whitespace.
    pub fn new(prefix: impl Into<String>, case: AttributeCase) -> Result<Self, ConfigError> {
        let dialect = Self {
            prefix: prefix.into(),
            case,
        };
        dialect.validate()?;
        Ok(dialect)
    }

    /// Parse a dialect from TOML content.
    ///
    /// A missing `[dialect]` section yields the default dialect.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.dialect.validate()?;
        Ok(file.dialect)
    }

    /// Load a dialect from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, can't be read, or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let dialect = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), prefix = %dialect.prefix, "Loaded dialect");
        Ok(dialect)
    }

    /// Validate the prefix.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the prefix is empty or contains
    /// `:` or whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "dialect.prefix cannot be empty".into(),
            ));
        }
        if self.prefix.contains(|c: char| c == ':' || c.is_whitespace()) {
            return Err(ConfigError::Validation(format!(
                "dialect.prefix must not contain ':' or whitespace, got: {}",
                self.prefix
            )));
        }
        Ok(())
    }

    /// Directive attribute prefix (without the trailing `:`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Attribute name case policy.
    #[must_use]
    pub fn case(&self) -> AttributeCase {
        self.case
    }

    /// Full directive attribute name for a local name: `prefix:local`.
    #[must_use]
    pub fn directive_name(&self, local: &str) -> String {
        format!("{}:{local}", self.prefix)
    }

    /// Local part of a directive attribute name, `None` if it lacks the prefix.
    #[must_use]
    pub fn unprefixed<'a>(&self, attribute: &'a str) -> Option<&'a str> {
        let (prefix, local) = attribute.split_once(':')?;
        let matches = match self.case {
            AttributeCase::Sensitive => prefix == self.prefix,
            AttributeCase::Insensitive => prefix.eq_ignore_ascii_case(&self.prefix),
        };
        (matches && !local.is_empty()).then_some(local)
    }

    /// Create an element that follows this dialect's case policy.
    #[must_use]
    pub fn element(&self, name: impl Into<String>) -> Element {
        Element::new(name, self.case)
    }
}
