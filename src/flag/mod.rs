//! Flag registry abstraction.
//!
//! The configuration loader talks to flags only through the [`FlagRegistry`]
//! trait. [`FlagSet`] is a ready-made registry following Go's `flag` package
//! conventions, and [`MockRegistry`] is an in-memory fake for tests.

pub mod error;
pub mod mock;
pub mod set;
pub mod traits;
pub mod value;

pub use error::{FlagError, ValueError};
pub use mock::MockRegistry;
pub use set::FlagSet;
pub use traits::{FlagInfo, FlagRegistry};
pub use value::{parse_bool, FlagType, FlagValue, Typed};
