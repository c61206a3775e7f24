//! Configuration file support for flag registries.
//!
//! A configuration file supplies flag values ahead of the command line:
//!
//! ```text
//! # comments start with # ; ' or //
//! listen-addr 0.0.0.0:8080
//! banner      hello there
//! ```
//!
//! # Resolution
//!
//! The file is chosen in this order:
//!
//! 1. The config path flag (`-config` by default). The file must exist.
//! 2. The environment variable named by [`Options::env_var`], if any. The file
//!    must exist.
//! 3. [`Options::path`] (`config.txt` by default). A missing file just means
//!    no configuration.
//!
//! # Precedence
//!
//! Command-line values beat file values, which beat flag defaults.
//!
//! # Example
//!
//! ```rust,ignore
//! use flagfile::config::{ConfigLoader, Options, Outcome};
//!
//! let loader = ConfigLoader::new(Options::with_path("app.conf"));
//! if let Outcome::ConfigWritten = loader.parse(&mut flags)? {
//!     return Ok(());
//! }
//! ```

mod bootstrap;
mod error;
mod loader;
mod options;
mod scanner;
mod writer;

pub use bootstrap::{control_args, resolve_source, ConfigSource, ControlArgs, SourceOrigin};
pub use error::{ConfigError, ConfigErrors, ConfigResult};
pub use loader::{ConfigLoader, Outcome};
pub use options::{Options, DEFAULT_CONFIG_FLAG, DEFAULT_PATH, DEFAULT_WRITE_CONFIG_FLAG};
pub use scanner::{is_comment, parse_line, scan, ScannedConfig};
pub use writer::{save_config, write_config};
