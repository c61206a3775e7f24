//! Core traits for flag registry abstraction.
//!
//! Defines the `FlagRegistry` trait that lets both the bundled [`FlagSet`]
//! and fakes be driven by the configuration loader interchangeably.
//!
//! [`FlagSet`]: super::FlagSet

use super::error::FlagError;

/// Snapshot of one registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Flag name without the leading dash.
    pub name: String,

    /// Help text, possibly spanning several lines.
    pub usage: String,

    /// Textual form of the value the flag was defined with.
    pub default_value: String,

    /// Textual form of the current value.
    pub value: String,

    /// Whether the flag stands alone on the command line, without a value.
    pub is_bool: bool,
}

impl FlagInfo {
    /// Whether the current value differs from the default.
    pub fn is_modified(&self) -> bool {
        self.value != self.default_value
    }
}

/// Trait for the collection of flags a program defines.
///
/// The registry is owned by the caller. The configuration loader only adds its
/// two control flags, reads flags by name and sets values from text.
pub trait FlagRegistry {
    /// Define a string flag.
    fn register_string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), FlagError>;

    /// Define a boolean flag.
    fn register_bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), FlagError>;

    /// Look up a flag by name.
    fn lookup(&self, name: &str) -> Option<FlagInfo>;

    /// Visit every flag in a stable order.
    fn visit_all(&self, visit: &mut dyn FnMut(&FlagInfo));

    /// Set a flag from its textual representation.
    fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError>;

    /// Parse command-line arguments (without the program name).
    ///
    /// Values given here must override whatever was set before.
    fn parse(&mut self, args: &[String]) -> Result<(), FlagError>;

    /// Names of all flags in visitation order.
    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.visit_all(&mut |flag| names.push(flag.name.clone()));
        names
    }
}
