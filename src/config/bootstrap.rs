//! Reading the control flags before the registry parses anything.
//!
//! The config path flag has to be known before the file can be read, yet the
//! file has to be applied before the command line is parsed. The way out is a
//! throwaway [`FlagSet`] mirroring the registry's flags, run leniently over
//! the raw arguments. Because it knows which flags take values, it splits the
//! arguments exactly as the registry will.

use super::options::Options;
use crate::flag::{FlagRegistry, FlagSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the effective configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    /// Given with the config path flag.
    Flag,
    /// Taken from [`Options::env_var`].
    Env,
    /// [`Options::path`].
    Default,
}

/// The configuration file a load will read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub origin: SourceOrigin,
    /// How the path was given, as `-config` or `$VAR`. Used in error messages.
    pub setting: String,
}

impl ConfigSource {
    /// Explicitly requested files must exist; the default one may be absent.
    pub fn must_exist(&self) -> bool {
        self.origin != SourceOrigin::Default
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Control flag values found in the raw arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlArgs {
    /// Value of the config path flag, if given and non-empty.
    pub config_path: Option<PathBuf>,
    /// Whether the write-config flag was set on the command line.
    pub write_config: bool,
}

/// Read the control flags from `args` ahead of the real parse.
///
/// Only the command line counts: a `write-config` line in a configuration
/// file never triggers a dump. Scanning stops where the registry's own parse
/// stops, at the first positional argument, a bare `--` or an undefined flag.
pub fn control_args<R>(registry: &R, options: &Options, args: &[String]) -> ControlArgs
where
    R: FlagRegistry + ?Sized,
{
    let mut probe = FlagSet::new("bootstrap");
    registry.visit_all(&mut |flag| {
        let defined = if flag.is_bool {
            probe.bool(&flag.name, false, "")
        } else {
            probe.string(&flag.name, "", "")
        };
        if let Err(e) = defined {
            debug!("Not mirroring flag '{}': {}", flag.name, e);
        }
    });
    probe.parse_lenient(args);

    let config_path = probe
        .get::<String>(&options.config_flag_name)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    let write_config = options
        .write_config_flag_name
        .as_deref()
        .and_then(|name| probe.get::<bool>(name))
        .unwrap_or(false);

    ControlArgs {
        config_path,
        write_config,
    }
}

/// Resolve the file to load: flag, then environment variable, then default.
pub fn resolve_source(options: &Options, config_path: Option<PathBuf>) -> ConfigSource {
    let flag_setting = format!("-{}", options.config_flag_name);

    if let Some(path) = config_path {
        debug!("Config path from {}: {}", flag_setting, path.display());
        return ConfigSource {
            path,
            origin: SourceOrigin::Flag,
            setting: flag_setting,
        };
    }

    if let Some(var) = &options.env_var {
        match std::env::var(var) {
            Ok(path) if !path.is_empty() => {
                debug!("Config path from ${}: {}", var, path);
                return ConfigSource {
                    path: PathBuf::from(path),
                    origin: SourceOrigin::Env,
                    setting: format!("${var}"),
                };
            }
            _ => {}
        }
    }

    ConfigSource {
        path: options.path.clone(),
        origin: SourceOrigin::Default,
        setting: flag_setting,
    }
}
