//! Configuration loader: file values first, command line second.

use super::bootstrap::{control_args, resolve_source, ConfigSource};
use super::error::{ConfigError, ConfigErrors, ConfigResult};
use super::options::Options;
use super::scanner::{scan, ScannedConfig};
use super::writer::write_config;
use crate::flag::FlagRegistry;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_FLAG_USAGE: &str = "path to config file";
const WRITE_CONFIG_FLAG_USAGE: &str = "write configuration to stdout and exit";

/// How a successful load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Flags are populated and the program should carry on.
    ///
    /// `loaded` is the file that was read, or `None` if the default file did
    /// not exist.
    Parsed { loaded: Option<PathBuf> },

    /// The configuration was written out as requested. The program should
    /// stop without doing anything else.
    ConfigWritten,
}

impl Outcome {
    pub fn is_config_written(&self) -> bool {
        matches!(self, Self::ConfigWritten)
    }
}

/// Loads a configuration file into a flag registry, then parses the command line.
///
/// Precedence, highest first: command-line arguments, the configuration file,
/// flag defaults.
///
/// # Example
///
/// ```rust,no_run
/// use flagfile::config::{ConfigLoader, Options, Outcome};
/// use flagfile::flag::FlagSet;
///
/// let mut flags = FlagSet::new("server");
/// flags.uint("port", 8080, "listen port")?;
///
/// let loader = ConfigLoader::new(Options::with_path("server.conf"));
/// match loader.parse(&mut flags)? {
///     Outcome::ConfigWritten => return Ok(()),
///     Outcome::Parsed { .. } => {}
/// }
/// println!("port = {:?}", flags.get::<u64>("port"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: Options,
}

impl ConfigLoader {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Loader using [`Options::default`].
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Load using the process arguments, writing any dump to stdout.
    pub fn parse<R>(&self, registry: &mut R) -> ConfigResult<Outcome>
    where
        R: FlagRegistry + ?Sized,
    {
        let args: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.parse_args(registry, &args)
    }

    /// Load using the given arguments, writing any dump to stdout.
    pub fn parse_args<R>(&self, registry: &mut R, args: &[String]) -> ConfigResult<Outcome>
    where
        R: FlagRegistry + ?Sized,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.parse_args_to(registry, args, &mut out)
    }

    /// Load using the given arguments, writing any dump to `out`.
    ///
    /// Steps, stopping at the first failure:
    /// 1. register the config path flag and, if named, the write-config flag;
    /// 2. read the control flags from `args`;
    /// 3. find the file (flag, environment variable, default) and read it;
    /// 4. set every registered flag named in the file, collecting failures;
    /// 5. let the registry parse `args`;
    /// 6. if write-config was given on the command line, dump the
    ///    configuration and report [`Outcome::ConfigWritten`].
    pub fn parse_args_to<R, W>(
        &self,
        registry: &mut R,
        args: &[String],
        out: &mut W,
    ) -> ConfigResult<Outcome>
    where
        R: FlagRegistry + ?Sized,
        W: Write + ?Sized,
    {
        self.register_control_flags(registry)?;

        let control = control_args(&*registry, &self.options, args);
        let source = resolve_source(&self.options, control.config_path);
        let loaded = self.load_file(registry, &source)?;

        registry.parse(args)?;

        if control.write_config {
            debug!("-{} set, writing configuration", self.write_flag_name());
            write_config(out, &*registry, &self.options.control_flags())
                .map_err(ConfigError::Output)?;
            return Ok(Outcome::ConfigWritten);
        }
        Ok(Outcome::Parsed { loaded })
    }

    /// Read the file at `source` and apply it to `registry`.
    ///
    /// Returns the path read, or `None` when a default file is absent. Unknown
    /// keys and rejected values are all gathered into one
    /// [`ConfigError::Collected`].
    pub fn load_file<R>(&self, registry: &mut R, source: &ConfigSource) -> ConfigResult<Option<PathBuf>>
    where
        R: FlagRegistry + ?Sized,
    {
        let Some(reader) = self.open(source)? else {
            return Ok(None);
        };
        let scanned = scan(reader, source.path(), |name| registry.lookup(name).is_some())?;

        let rejected = apply_values(registry, &scanned, source.path());
        let mut errors = ConfigErrors::from(scanned.errors);
        errors.extend(rejected);
        errors.into_result()?;

        info!("Loaded configuration from {}", source.path.display());
        Ok(Some(source.path.clone()))
    }

    fn open(&self, source: &ConfigSource) -> ConfigResult<Option<BufReader<File>>> {
        match File::open(source.path()) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !source.must_exist() => {
                debug!(
                    "No configuration file at {}, keeping defaults",
                    source.path.display()
                );
                Ok(None)
            }
            Err(e) => Err(ConfigError::Open {
                setting: source.setting.clone(),
                path: source.path.clone(),
                source: e,
            }),
        }
    }

    fn register_control_flags<R>(&self, registry: &mut R) -> ConfigResult<()>
    where
        R: FlagRegistry + ?Sized,
    {
        registry.register_string(
            &self.options.config_flag_name,
            &self.options.path.to_string_lossy(),
            CONFIG_FLAG_USAGE,
        )?;
        if let Some(name) = &self.options.write_config_flag_name {
            registry.register_bool(name, false, WRITE_CONFIG_FLAG_USAGE)?;
        }
        Ok(())
    }

    fn write_flag_name(&self) -> &str {
        self.options.write_config_flag_name.as_deref().unwrap_or_default()
    }
}

/// Set each registered flag that has a value in the file.
fn apply_values<R>(registry: &mut R, scanned: &ScannedConfig, path: &Path) -> Vec<ConfigError>
where
    R: FlagRegistry + ?Sized,
{
    let mut errors = Vec::new();
    for name in registry.names() {
        let Some(value) = scanned.get(&name) else {
            continue;
        };
        match registry.set(&name, value) {
            Ok(()) => debug!("Set -{}={:?} from {}", name, value, path.display()),
            Err(source) => errors.push(ConfigError::invalid_value(name.as_str(), value, path, source)),
        }
    }
    errors
}
