//! Writing a registry's state back out in configuration file syntax.

use super::error::{ConfigError, ConfigResult};
use crate::flag::FlagRegistry;
use std::io::{self, Write};
use std::path::Path;

const SYNTAX_HELP: &str = "flagfile syntax:

  flag-name flag-value

where flag-name is an argument name without the \"-\" prefix.

Comments begin with any of these: # ' ; //

Leading and trailing whitespace is ignored on each line, key and value.";

/// Prefix every line of `text` with `#` and `indent` spaces.
fn comment_block(text: &str, indent: usize) -> String {
    let prefix = format!("#{}", " ".repeat(indent));
    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(&prefix);
    out.push_str(&text.replace('\n', &format!("\n{prefix}")));
    out
}

/// Write every flag not listed in `exclude` as a documented configuration entry.
///
/// Each flag gets its usage and default as comments. Only flags whose value
/// differs from the default get an active `name value` line, so reading the
/// output back reproduces the current state.
///
/// The file syntax has no multi-line values. A modified value containing a
/// newline is written commented out, so the output still reads back cleanly
/// but that flag keeps its default.
pub fn write_config<W, R>(w: &mut W, registry: &R, exclude: &[&str]) -> io::Result<()>
where
    W: Write + ?Sized,
    R: FlagRegistry + ?Sized,
{
    write!(w, "{}\n\n", comment_block(SYNTAX_HELP, 1))?;

    let mut flags = Vec::new();
    registry.visit_all(&mut |flag| {
        if !exclude.contains(&flag.name.as_str()) {
            flags.push(flag.clone());
        }
    });

    for flag in &flags {
        write!(
            w,
            "# {name}\n{usage}\n#\n# default:\n# {name} {default}\n",
            name = flag.name,
            usage = comment_block(&flag.usage, 3),
            default = flag.default_value,
        )?;
        if flag.is_modified() {
            if flag.value.contains('\n') {
                writeln!(w, "# value spans several lines and cannot be set here:")?;
                writeln!(w, "{}", comment_block(&format!("{} {}", flag.name, flag.value), 1))?;
            } else {
                writeln!(w, "{} {}", flag.name, flag.value)?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write the configuration to a file, creating parent directories as needed.
pub fn save_config<R>(path: &Path, registry: &R, exclude: &[&str]) -> ConfigResult<()>
where
    R: FlagRegistry + ?Sized,
{
    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut content = Vec::new();
    write_config(&mut content, registry, exclude).map_err(write_error)?;
    std::fs::write(path, content).map_err(write_error)
}
