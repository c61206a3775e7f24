//! Flag-specific error types.
//!
//! Kept separate from configuration-file errors so a registry implementation
//! only has to speak in terms of flags and argument lists.

use thiserror::Error;

/// Boxed error produced by a flag value's own parsing rule.
pub type ValueError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a flag registry while defining, setting or parsing flags.
#[derive(Debug, Error)]
pub enum FlagError {
    /// A flag with this name is already registered.
    #[error("Flag redefined: {0}")]
    Redefined(String),

    /// The flag is not registered.
    #[error("Flag provided but not defined: -{0}")]
    Unknown(String),

    /// A non-boolean flag appeared last on the command line without a value.
    #[error("Flag needs an argument: -{0}")]
    MissingArgument(String),

    /// The flag rejected the supplied text.
    #[error("Invalid value {value:?} for flag -{name}: {source}")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: ValueError,
    },

    /// Malformed flag token such as `---name` or `-=value`.
    #[error("Bad flag syntax: {0}")]
    BadSyntax(String),

    /// `-h` or `-help` was given and no such flag is defined.
    #[error("Help requested")]
    HelpRequested,
}

impl FlagError {
    /// Create an Unknown error from a flag name.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown(name.into())
    }

    /// Create an InvalidValue error from the flag name, the rejected text and the cause.
    pub fn invalid_value(
        name: impl Into<String>,
        value: impl Into<String>,
        source: impl Into<ValueError>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            source: source.into(),
        }
    }
}
