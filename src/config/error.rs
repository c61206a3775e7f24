//! Configuration error types for the config module.

use crate::flag::FlagError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or writing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened.
    ///
    /// A missing file only lands here when it was requested explicitly.
    /// `setting` names where the path came from, as `-config` or `$VAR`.
    #[error("Failed to open configuration file {setting}={}: {source}", .path.display())]
    Open {
        setting: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the configuration file failed part way through.
    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line names a flag that is not registered.
    #[error("Configuration file '{}' line {line} contains unknown flag name '{name}'", .path.display())]
    UnknownFlag {
        path: PathBuf,
        line: usize,
        name: String,
    },

    /// A registered flag rejected the value from the file.
    #[error("Error setting flag '{name}' = '{value}' from configuration file '{}': {source}", .path.display())]
    InvalidValue {
        name: String,
        value: String,
        path: PathBuf,
        #[source]
        source: FlagError,
    },

    /// Recoverable errors collected during one load.
    #[error(transparent)]
    Collected(ConfigErrors),

    /// The registry refused a control flag or failed to parse the command line.
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// Writing the configuration dump to its output failed.
    #[error("Failed to write configuration: {0}")]
    Output(#[source] std::io::Error),

    /// Saving the configuration to a file failed.
    #[error("Failed to write configuration to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an unknown flag error
    pub fn unknown_flag<P: Into<PathBuf>, N: Into<String>>(path: P, line: usize, name: N) -> Self {
        Self::UnknownFlag {
            path: path.into(),
            line,
            name: name.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<N: Into<String>, V: Into<String>, P: Into<PathBuf>>(
        name: N,
        value: V,
        path: P,
        source: FlagError,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            path: path.into(),
            source,
        }
    }

    /// Whether loading could have continued past this error.
    ///
    /// Unknown keys and rejected values are recoverable; I/O failures and
    /// command-line parse failures are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownFlag { .. } | Self::InvalidValue { .. } | Self::Collected(_)
        )
    }

    /// The individual errors behind this one.
    ///
    /// A collected error yields its members; anything else yields itself.
    pub fn errors(&self) -> &[ConfigError] {
        match self {
            Self::Collected(errors) => errors.as_slice(),
            other => std::slice::from_ref(other),
        }
    }
}

/// Ordered list of recoverable errors reported as one failure.
#[derive(Debug, Default)]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ConfigError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ConfigError] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.0
    }

    /// `Ok(())` when empty, otherwise a single [`ConfigError::Collected`].
    pub fn into_result(self) -> ConfigResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Collected(self))
        }
    }
}

impl From<Vec<ConfigError>> for ConfigErrors {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self(errors)
    }
}

impl Extend<ConfigError> for ConfigErrors {
    fn extend<I: IntoIterator<Item = ConfigError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ConfigErrors {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigErrors {
    type Item = &'a ConfigError;
    type IntoIter = std::slice::Iter<'a, ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [only] => fmt::Display::fmt(only, f),
            all => {
                write!(f, "{} errors:", all.len())?;
                for (i, err) in all.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigErrors {}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
