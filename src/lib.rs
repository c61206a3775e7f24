//! flagfile
//!
//! Populates a command-line flag set from a simple key-value configuration
//! file before the command line itself is parsed, and can write the merged
//! configuration back out in the same syntax.
//!
//! # Modules
//!
//! - `flag`: the flag registry trait, a Go-style `FlagSet` and a test fake
//! - `config`: file scanning, merging into a registry, and writing back

pub mod config;
pub mod flag;

// Re-export commonly used types for convenience
pub use config::{
    save_config, write_config, ConfigError, ConfigErrors, ConfigLoader, ConfigResult, Options,
    Outcome,
};
pub use flag::{FlagError, FlagInfo, FlagRegistry, FlagSet, FlagType, FlagValue, MockRegistry};
