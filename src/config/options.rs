//! Options controlling where the configuration file comes from.

use std::path::{Path, PathBuf};

/// Default configuration file path.
pub const DEFAULT_PATH: &str = "config.txt";

/// Default name of the flag that points at a configuration file.
pub const DEFAULT_CONFIG_FLAG: &str = "config";

/// Default name of the flag that dumps the configuration and stops.
pub const DEFAULT_WRITE_CONFIG_FLAG: &str = "write-config";

/// Options used when loading a configuration file into a flag registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Default configuration file path.
    ///
    /// A missing file at this path is not an error.
    pub path: PathBuf,

    /// Name of the flag that overrides [`Options::path`].
    ///
    /// A file named through this flag must exist.
    pub config_flag_name: String,

    /// Name of the flag that writes the current configuration to stdout.
    ///
    /// `None` leaves the flag out entirely.
    pub write_config_flag_name: Option<String>,

    /// Environment variable that overrides [`Options::path`] when the flag is absent.
    ///
    /// Like the flag, a file named here must exist.
    pub env_var: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            config_flag_name: DEFAULT_CONFIG_FLAG.to_string(),
            write_config_flag_name: Some(DEFAULT_WRITE_CONFIG_FLAG.to_string()),
            env_var: None,
        }
    }
}

impl Options {
    /// Default options with a different default file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Rename the config path flag.
    pub fn config_flag(mut self, name: impl Into<String>) -> Self {
        self.config_flag_name = name.into();
        self
    }

    /// Rename the write-config flag.
    pub fn write_config_flag(mut self, name: impl Into<String>) -> Self {
        self.write_config_flag_name = Some(name.into());
        self
    }

    /// Do not register a write-config flag.
    pub fn without_write_config_flag(mut self) -> Self {
        self.write_config_flag_name = None;
        self
    }

    /// Read an explicit file path from this environment variable.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the flags the loader registers itself.
    pub fn control_flags(&self) -> Vec<&str> {
        let mut names = vec![self.config_flag_name.as_str()];
        if let Some(name) = &self.write_config_flag_name {
            names.push(name.as_str());
        }
        names
    }
}
