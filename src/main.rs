//! Demo program for flagfile.
//!
//! Defines a few flags, fills them from `flagfile.conf` (or `-config <path>`,
//! or `$FLAGFILE_CONFIG`), then from the command line, and prints the result.
//!
//! ```bash
//! # Dump the effective configuration as a starting file
//! flagfile -workers 8 -write-config > flagfile.conf
//! ```

use flagfile::config::{ConfigError, ConfigLoader, Options, Outcome};
use flagfile::flag::{FlagError, FlagRegistry, FlagSet};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "flagfile.conf";
const CONFIG_ENV_VAR: &str = "FLAGFILE_CONFIG";

fn define_flags(flags: &mut FlagSet) -> Result<(), FlagError> {
    flags.string("addr", "127.0.0.1:8080", "address to listen on")?;
    flags.uint("workers", 4, "number of worker threads")?;
    flags.float("ratio", 0.5, "share of requests to sample\nbetween 0 and 1")?;
    flags.bool("verbose", false, "log every request")?;
    flags.string("greeting", "hello", "text sent to new clients")?;
    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so a configuration dump on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut flags = FlagSet::new("flagfile");
    if let Err(e) = define_flags(&mut flags) {
        error!("Failed to define flags: {}", e);
        return ExitCode::FAILURE;
    }

    let loader = ConfigLoader::new(Options::with_path(DEFAULT_CONFIG_PATH).env_var(CONFIG_ENV_VAR));
    match loader.parse(&mut flags) {
        Ok(Outcome::ConfigWritten) => ExitCode::SUCCESS,
        Ok(Outcome::Parsed { loaded }) => {
            debug!("Configuration source: {:?}", loaded);
            print_flags(&flags);
            ExitCode::SUCCESS
        }
        Err(ConfigError::Flag(FlagError::HelpRequested)) => {
            let _ = flags.write_usage(&mut std::io::stderr());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("flagfile: {e}");
            ExitCode::from(2)
        }
    }
}

fn print_flags(flags: &FlagSet) {
    let control = [
        flagfile::config::DEFAULT_CONFIG_FLAG,
        flagfile::config::DEFAULT_WRITE_CONFIG_FLAG,
    ];
    flags.visit_all(&mut |flag| {
        if !control.contains(&flag.name.as_str()) {
            println!("{} = {}", flag.name, flag.value);
        }
    });
    for arg in flags.args() {
        println!("arg: {arg}");
    }
}
