#![forbid(unsafe_code)]

//! Terminal screen size detection through a prioritized chain of fallback
//! probes.
//!
//! No single method of querying terminal geometry works everywhere: a
//! headless process has no device to ask, and helper utilities or the
//! `COLUMNS` variable may be missing or stale. This crate runs a fixed
//! chain of independent strategies and takes the first usable answer, so
//! resolution never fails. Worst case it falls back to a sane default.
//!
//! # Resolution order
//!
//! 1. Native winsize query on the probe target (terminal-attached only).
//! 2. Line-editor hook, when one is installed on the resolver.
//! 3. `tput lines` / `tput cols` (terminal-attached only).
//! 4. `stty size` (terminal-attached only).
//! 5. `COLUMNS` / `LINES` / `ROWS` environment variables.
//! 6. `ANSICON` geometry string.
//! 7. Defaults: 27 rows by 80 columns, overridable via `LINES`/`COLUMNS`.
//!
//! Probing targets stderr by default: it is the stream most likely to
//! still be attached to the terminal when stdout is redirected.
//!
//! # Usage
//!
//! ```no_run
//! let size = termgauge::size();
//! println!("{} columns by {} rows", size.columns, size.rows);
//! ```
//!
//! The free functions build a fresh [`SizeResolver`] per call, so repeated
//! calls may re-run the whole chain. Hold one resolver to get the memoized
//! behavior:
//!
//! ```no_run
//! use termgauge::SizeResolver;
//!
//! let resolver = SizeResolver::new();
//! let first = resolver.size();   // runs the chain
//! let second = resolver.size();  // cached
//! assert_eq!(first, second);
//! ```
//!
//! # Feature flags
//!
//! - `tracing`: strategy-level debug events through the `tracing` crate.

pub mod env;
pub mod probe;
pub mod resolver;
pub mod size;
pub mod target;

pub use env::{EnvSource, OsEnv};
pub use probe::{DEFAULT_COLUMNS, DEFAULT_ROWS, LineEditorQuery, Strategy};
pub use resolver::SizeResolver;
pub use size::ScreenSize;
pub use target::{NATIVE_QUERY_SUPPORTED, ProbeTarget, StdStream};

/// Resolve the terminal size with a fresh [`SizeResolver`].
///
/// Each call builds a new resolver and may run the probe chain again;
/// there is no cache shared between these free functions.
pub fn size() -> ScreenSize {
    SizeResolver::new().size()
}

/// Width in columns, from a fresh resolution.
pub fn width() -> u16 {
    size().columns
}

/// Height in rows, from a fresh resolution.
pub fn height() -> u16 {
    size().rows
}

/// Alias for [`width`].
pub fn columns() -> u16 {
    width()
}

/// Alias for [`height`].
pub fn rows() -> u16 {
    height()
}

/// The chain-exhausted fallback size, read from the process environment.
pub fn default_size() -> ScreenSize {
    SizeResolver::new().default_size()
}
