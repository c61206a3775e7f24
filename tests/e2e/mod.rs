//! End-to-end tests for configuration loading.
//!
//! Each module covers one part of the load: precedence between sources,
//! error reporting, and writing the configuration back out.

pub mod precedence_tests;
pub mod write_config_tests;
