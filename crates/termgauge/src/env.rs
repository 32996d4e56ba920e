#![forbid(unsafe_code)]

//! Environment access for detection strategies.
//!
//! Strategies never read the process environment directly; lookups go
//! through [`EnvSource`] so callers and tests can substitute a fixed
//! snapshot without mutating process state (which is `unsafe` in edition
//! 2024 and forbidden in this crate).

use std::collections::HashMap;
use std::env;

/// A "get variable by name" lookup.
///
/// Returns `None` for unset variables and for values that are not valid
/// Unicode; the probe chain treats both the same as malformed input.
pub trait EnvSource {
    /// Look up a variable by name.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl EnvSource for OsEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// A snapshot environment, handy for captured state and test fixtures.
impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
