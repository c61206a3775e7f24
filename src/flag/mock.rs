//! In-memory fake registry for testing.
//!
//! Provides a `MockRegistry` whose flags are plain strings. Setters can be told
//! to reject values and argument parsing can be told to fail, so every branch of
//! the configuration loader can be reached without a real flag set.

use super::error::FlagError;
use super::traits::{FlagInfo, FlagRegistry};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
struct MockFlag {
    usage: String,
    default_value: String,
    value: String,
    is_bool: bool,
}

/// Fake flag registry that records how it was driven.
///
/// # Example
/// ```
/// use flagfile::flag::{FlagRegistry, MockRegistry};
///
/// let mut registry = MockRegistry::new()
///     .with_flag("level", "info", "log level")
///     .reject_values_for("level");
///
/// assert!(registry.set("level", "loud").is_err());
/// assert_eq!(registry.value("level"), Some("info"));
/// assert_eq!(registry.set_log().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    flags: BTreeMap<String, MockFlag>,
    rejected: BTreeSet<String>,
    parse_failure: Option<String>,
    set_log: Vec<(String, String)>,
    parsed_args: Option<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string-valued flag.
    pub fn with_flag(mut self, name: &str, default: &str, usage: &str) -> Self {
        self.insert(name, default, usage, false);
        self
    }

    /// Make every `set` on this flag fail.
    pub fn reject_values_for(mut self, name: &str) -> Self {
        self.rejected.insert(name.to_string());
        self
    }

    /// Make `parse` fail as if `arg` were an undefined flag.
    pub fn fail_parse_with_unknown(mut self, arg: &str) -> Self {
        self.parse_failure = Some(arg.to_string());
        self
    }

    /// Current value of a flag.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(|flag| flag.value.as_str())
    }

    /// Every `(name, value)` passed to `set`, including rejected ones.
    pub fn set_log(&self) -> &[(String, String)] {
        &self.set_log
    }

    /// Arguments given to `parse`, or `None` if it was never called.
    pub fn parsed_args(&self) -> Option<&[String]> {
        self.parsed_args.as_deref()
    }

    fn insert(&mut self, name: &str, default: &str, usage: &str, is_bool: bool) {
        self.flags.insert(
            name.to_string(),
            MockFlag {
                usage: usage.to_string(),
                default_value: default.to_string(),
                value: default.to_string(),
                is_bool,
            },
        );
    }

    fn register(&mut self, name: &str, default: &str, usage: &str, is_bool: bool) -> Result<(), FlagError> {
        if self.flags.contains_key(name) {
            return Err(FlagError::Redefined(name.to_string()));
        }
        self.insert(name, default, usage, is_bool);
        Ok(())
    }
}

impl FlagRegistry for MockRegistry {
    fn register_string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), FlagError> {
        self.register(name, default, usage, false)
    }

    fn register_bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), FlagError> {
        self.register(name, &default.to_string(), usage, true)
    }

    fn lookup(&self, name: &str) -> Option<FlagInfo> {
        self.flags.get(name).map(|flag| FlagInfo {
            name: name.to_string(),
            usage: flag.usage.clone(),
            default_value: flag.default_value.clone(),
            value: flag.value.clone(),
            is_bool: flag.is_bool,
        })
    }

    fn visit_all(&self, visit: &mut dyn FnMut(&FlagInfo)) {
        for name in self.flags.keys() {
            if let Some(info) = self.lookup(name) {
                visit(&info);
            }
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError> {
        self.set_log.push((name.to_string(), value.to_string()));
        if self.rejected.contains(name) {
            return Err(FlagError::invalid_value(name, value, "rejected by mock"));
        }
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| FlagError::unknown(name))?;
        flag.value = value.to_string();
        Ok(())
    }

    /// Understands `-name=value`, `-name value` and bare boolean `-name`.
    /// Stops at the first argument without a leading dash.
    fn parse(&mut self, args: &[String]) -> Result<(), FlagError> {
        self.parsed_args = Some(args.to_vec());
        if let Some(arg) = &self.parse_failure {
            return Err(FlagError::unknown(arg.clone()));
        }

        let mut rest = args.iter();
        while let Some(arg) = rest.next() {
            if !arg.starts_with('-') {
                break;
            }
            let token = arg.trim_start_matches('-');
            let (name, value) = match token.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None if self.flags.get(token).is_some_and(|f| f.is_bool) => {
                    (token.to_string(), "true".to_string())
                }
                None => {
                    let value = rest
                        .next()
                        .ok_or_else(|| FlagError::MissingArgument(token.to_string()))?;
                    (token.to_string(), value.clone())
                }
            };
            self.set(&name, &value)?;
        }
        Ok(())
    }
}
