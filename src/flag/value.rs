//! Flag values and their textual representation.
//!
//! A flag stores its value behind the [`FlagValue`] trait so the registry can
//! set it from text and render it back without knowing the concrete type.
//! [`FlagType`] covers the common scalar types; anything else can implement
//! [`FlagValue`] directly and be registered with `FlagSet::var`.

use super::error::ValueError;
use std::any::Any;
use std::fmt;

/// A value that can be set from and rendered to text.
pub trait FlagValue: fmt::Display + fmt::Debug {
    /// Replace the current value by parsing `raw`.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Boolean flags may appear on the command line without a value.
    fn is_bool(&self) -> bool {
        false
    }

    /// Short type name used in usage output.
    fn type_name(&self) -> &'static str {
        "value"
    }

    /// Access to the concrete type for typed getters.
    fn as_any(&self) -> &dyn Any;
}

/// Scalar types that can back a flag.
pub trait FlagType: Clone + fmt::Display + fmt::Debug + 'static {
    /// Whether the flag may be given as a bare `-name`.
    const IS_BOOL: bool = false;

    /// Name shown in usage output.
    const TYPE_NAME: &'static str;

    /// Parse the textual form of a value.
    fn parse_flag(raw: &str) -> Result<Self, ValueError>;
}

impl FlagType for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

impl FlagType for bool {
    const IS_BOOL: bool = true;
    const TYPE_NAME: &'static str = "bool";

    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        parse_bool(raw).ok_or_else(|| format!("parse error: {raw:?} is not a boolean").into())
    }
}

macro_rules! impl_flag_type_from_str {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FlagType for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_flag(raw: &str) -> Result<Self, ValueError> {
                    raw.parse::<$ty>().map_err(Into::into)
                }
            }
        )*
    };
}

impl_flag_type_from_str! {
    i32 => "int",
    i64 => "int",
    u16 => "uint",
    u32 => "uint",
    u64 => "uint",
    f64 => "float",
}

/// Parse a boolean the way Go's `strconv.ParseBool` does.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Storage for a [`FlagType`] value.
#[derive(Debug, Clone, PartialEq)]
pub struct Typed<T> {
    value: T,
}

impl<T: FlagType> Typed<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: FlagType> fmt::Display for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T: FlagType> FlagValue for Typed<T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.value = T::parse_flag(raw)?;
        Ok(())
    }

    fn is_bool(&self) -> bool {
        T::IS_BOOL
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
