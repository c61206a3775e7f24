//! Concrete flag registry with Go `flag` package semantics.
//!
//! Flags are kept sorted by name, which gives the stable visitation order the
//! configuration writer relies on.

use super::error::FlagError;
use super::traits::{FlagInfo, FlagRegistry};
use super::value::{FlagType, FlagValue, Typed};
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug)]
struct Flag {
    usage: String,
    default_value: String,
    value: Box<dyn FlagValue>,
}

impl Flag {
    fn info(&self, name: &str) -> FlagInfo {
        FlagInfo {
            name: name.to_string(),
            usage: self.usage.clone(),
            default_value: self.default_value.clone(),
            value: self.value.to_string(),
            is_bool: self.value.is_bool(),
        }
    }
}

/// A set of named, typed flags.
///
/// # Example
/// ```
/// use flagfile::flag::{FlagRegistry, FlagSet};
///
/// let mut fs = FlagSet::new("server");
/// fs.uint("port", 8080, "listen port").unwrap();
/// fs.bool("verbose", false, "log more").unwrap();
///
/// let args: Vec<String> = ["-port=9000", "-verbose", "serve"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// fs.parse(&args).unwrap();
///
/// assert_eq!(fs.get::<u64>("port"), Some(9000));
/// assert_eq!(fs.get::<bool>("verbose"), Some(true));
/// assert_eq!(fs.args(), ["serve"]);
/// ```
#[derive(Debug, Default)]
pub struct FlagSet {
    name: String,
    flags: BTreeMap<String, Flag>,
    args: Vec<String>,
    parsed: bool,
}

enum Token<'a> {
    Positional,
    Terminator,
    Flag { name: &'a str, value: Option<&'a str> },
}

/// Classify one command-line argument.
///
/// One or two leading dashes are accepted; a bare `--` ends flag parsing.
fn classify(arg: &str) -> Result<Token<'_>, FlagError> {
    if arg.len() < 2 || !arg.starts_with('-') {
        return Ok(Token::Positional);
    }
    let mut body = &arg[1..];
    if let Some(stripped) = body.strip_prefix('-') {
        if stripped.is_empty() {
            return Ok(Token::Terminator);
        }
        body = stripped;
    }
    if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
        return Err(FlagError::BadSyntax(arg.to_string()));
    }
    Ok(match body.split_once('=') {
        Some((name, value)) => Token::Flag {
            name,
            value: Some(value),
        },
        None => Token::Flag {
            name: body,
            value: None,
        },
    })
}

impl FlagSet {
    /// Create an empty flag set. The name is only used in usage output.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Define a flag holding any [`FlagType`].
    pub fn define<T: FlagType>(&mut self, name: &str, default: T, usage: &str) -> Result<(), FlagError> {
        self.var(name, Box::new(Typed::new(default)), usage)
    }

    /// Define a flag backed by a caller-supplied value.
    ///
    /// The value's current rendering becomes the flag's default.
    pub fn var(&mut self, name: &str, value: Box<dyn FlagValue>, usage: &str) -> Result<(), FlagError> {
        if name.is_empty() || name.starts_with('-') || name.contains('=') {
            return Err(FlagError::BadSyntax(name.to_string()));
        }
        if self.flags.contains_key(name) {
            return Err(FlagError::Redefined(name.to_string()));
        }
        let default_value = value.to_string();
        self.flags.insert(
            name.to_string(),
            Flag {
                usage: usage.to_string(),
                default_value,
                value,
            },
        );
        Ok(())
    }

    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), FlagError> {
        self.define(name, default.to_string(), usage)
    }

    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), FlagError> {
        self.define(name, default, usage)
    }

    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> Result<(), FlagError> {
        self.define(name, default, usage)
    }

    pub fn uint(&mut self, name: &str, default: u64, usage: &str) -> Result<(), FlagError> {
        self.define(name, default, usage)
    }

    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> Result<(), FlagError> {
        self.define(name, default, usage)
    }

    /// Current value of a typed flag.
    ///
    /// Returns `None` when the flag is missing or was defined with another type.
    pub fn get<T: FlagType>(&self, name: &str) -> Option<T> {
        self.flags
            .get(name)?
            .value
            .as_any()
            .downcast_ref::<Typed<T>>()
            .map(|typed| typed.get().clone())
    }

    /// The value object behind a flag, for values registered with [`FlagSet::var`].
    pub fn value(&self, name: &str) -> Option<&dyn FlagValue> {
        self.flags.get(name).map(|flag| flag.value.as_ref())
    }

    /// Arguments left over after the flags.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether [`FlagRegistry::parse`] has been called.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Apply flags the way [`FlagRegistry::parse`] would, without failing.
    ///
    /// Stops wherever `parse` stops: at the first positional argument, a bare
    /// `--`, an undefined or malformed flag, or a flag missing its value.
    /// Rejected values are dropped. Used to peek at a few flags before the
    /// real registry parses the same arguments.
    pub fn parse_lenient(&mut self, args: &[String]) {
        let mut i = 0;
        while i < args.len() {
            let Ok(Token::Flag { name, value: inline }) = classify(&args[i]) else {
                break;
            };
            i += 1;
            let Some(flag) = self.flags.get_mut(name) else {
                break;
            };
            let value = match inline {
                Some(value) => value,
                None if flag.value.is_bool() => "true",
                None => match args.get(i) {
                    Some(next) => {
                        i += 1;
                        next.as_str()
                    }
                    None => break,
                },
            };
            let _ = flag.value.set(value);
        }
    }

    /// Print every flag with its type, usage and default.
    pub fn write_usage<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.name.is_empty() {
            writeln!(w, "Usage:")?;
        } else {
            writeln!(w, "Usage of {}:", self.name)?;
        }
        for (name, flag) in &self.flags {
            write!(w, "  -{name}")?;
            if !flag.value.is_bool() {
                write!(w, " {}", flag.value.type_name())?;
            }
            write!(w, "\n    \t{}", flag.usage.replace('\n', "\n    \t"))?;
            if !is_zero_value(&flag.default_value) {
                if flag.value.type_name() == "string" {
                    write!(w, " (default {:?})", flag.default_value)?;
                } else {
                    write!(w, " (default {})", flag.default_value)?;
                }
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

fn is_zero_value(text: &str) -> bool {
    matches!(text, "" | "0" | "false")
}

impl FlagRegistry for FlagSet {
    fn register_string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), FlagError> {
        self.string(name, default, usage)
    }

    fn register_bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), FlagError> {
        self.bool(name, default, usage)
    }

    fn lookup(&self, name: &str) -> Option<FlagInfo> {
        self.flags.get(name).map(|flag| flag.info(name))
    }

    fn visit_all(&self, visit: &mut dyn FnMut(&FlagInfo)) {
        for (name, flag) in &self.flags {
            visit(&flag.info(name));
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), FlagError> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| FlagError::unknown(name))?;
        flag.value
            .set(value)
            .map_err(|e| FlagError::invalid_value(name, value, e))
    }

    fn parse(&mut self, args: &[String]) -> Result<(), FlagError> {
        self.parsed = true;
        let mut i = 0;
        while i < args.len() {
            let (name, inline) = match classify(&args[i])? {
                Token::Positional => break,
                Token::Terminator => {
                    i += 1;
                    break;
                }
                Token::Flag { name, value } => (name, value),
            };
            i += 1;

            let Some(flag) = self.flags.get_mut(name) else {
                if name == "help" || name == "h" {
                    return Err(FlagError::HelpRequested);
                }
                return Err(FlagError::unknown(name));
            };
            let value = match inline {
                Some(value) => value,
                None if flag.value.is_bool() => "true",
                None => {
                    let next = args
                        .get(i)
                        .ok_or_else(|| FlagError::MissingArgument(name.to_string()))?;
                    i += 1;
                    next.as_str()
                }
            };
            flag.value
                .set(value)
                .map_err(|e| FlagError::invalid_value(name, value, e))?;
        }
        self.args = args[i..].to_vec();
        Ok(())
    }
}
