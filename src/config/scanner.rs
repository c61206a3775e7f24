//! Line scanner for the configuration file syntax.
//!
//! ```text
//! # comment
//! flag-name flag value
//! ```
//!
//! Each line is trimmed. Empty lines and lines starting with `#`, `;`, `'` or
//! `//` are comments. Otherwise the key runs up to the first space and the
//! rest of the line, trimmed, is the value.

use super::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;

const COMMENT_PREFIXES: [&str; 4] = ["#", ";", "'", "//"];

/// Key/value pairs read from one file, plus the lines that named unknown flags.
#[derive(Debug, Default)]
pub struct ScannedConfig {
    /// Raw values by flag name. A repeated key keeps its last value.
    pub values: HashMap<String, String>,

    /// One [`ConfigError::UnknownFlag`] per offending line, in file order.
    pub errors: Vec<ConfigError>,
}

impl ScannedConfig {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Whether a trimmed line carries no setting.
pub fn is_comment(line: &str) -> bool {
    line.is_empty() || COMMENT_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Split one line into key and value.
///
/// Returns `None` for comments and blank lines.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if is_comment(line) {
        return None;
    }
    Some(match line.split_once(' ') {
        Some((key, value)) => (key, value.trim()),
        None => (line, ""),
    })
}

/// Scan a configuration stream.
///
/// `is_known` decides whether a key names a registered flag; unknown keys are
/// reported against `path` and their values dropped. Scanning never stops on a
/// bad line, only on a read failure.
pub fn scan<R, F>(reader: R, path: &Path, is_known: F) -> ConfigResult<ScannedConfig>
where
    R: BufRead,
    F: Fn(&str) -> bool,
{
    let mut scanned = ScannedConfig::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line_no = index + 1;
        let Some((key, value)) = parse_line(&line) else {
            continue;
        };
        if !is_known(key) {
            debug!("Unknown flag '{}' at {}:{}", key, path.display(), line_no);
            scanned
                .errors
                .push(ConfigError::unknown_flag(PathBuf::from(path), line_no, key));
            continue;
        }
        scanned.values.insert(key.to_string(), value.to_string());
    }
    Ok(scanned)
}
