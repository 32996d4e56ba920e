#![forbid(unsafe_code)]

//! Detection strategies for the screen size probe chain.
//!
//! Each strategy is an independent way of asking how big the terminal is.
//! All of them are fail-open: unavailable facilities, detached streams,
//! missing binaries, and malformed output collapse into `None`, and the
//! chain moves on to the next candidate.
//!
//! # Priority order
//!
//! | # | Strategy | Source | Gated on |
//! |---|----------|--------|----------|
//! | 1 | [`Strategy::NativeQuery`] | winsize query on the probe target | terminal attachment |
//! | 2 | [`Strategy::LineEditor`] | installed line-editor hook | a hook being present |
//! | 3 | [`Strategy::Tput`] | `tput lines` / `tput cols` | terminal attachment |
//! | 4 | [`Strategy::Stty`] | `stty size` | terminal attachment |
//! | 5 | [`Strategy::EnvVars`] | `COLUMNS` / `LINES` / `ROWS` | - |
//! | 6 | [`Strategy::Ansicon`] | `ANSICON` geometry string | - |
//!
//! A candidate is accepted only when it reports at least one column. When
//! the whole chain comes up empty the default size applies:
//! [`DEFAULT_ROWS`] and [`DEFAULT_COLUMNS`], each overridable through
//! `LINES` / `COLUMNS`.

use std::env;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::env::EnvSource;
use crate::size::ScreenSize;
use crate::target::ProbeTarget;

/// Fallback row count when no probe and no `LINES` variable reports one.
pub const DEFAULT_ROWS: u16 = 27;

/// Fallback column count when no probe and no `COLUMNS` variable reports
/// one.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Size query wired to an in-process line-editing library.
///
/// Installed via
/// [`SizeResolver::with_line_editor_query`](crate::SizeResolver::with_line_editor_query);
/// absent by default, in which case the strategy reports nothing.
pub type LineEditorQuery = fn() -> Option<ScreenSize>;

/// One independent method of querying terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Direct winsize query against the probe target.
    NativeQuery,
    /// Ask an in-process line-editing library, when a hook is installed.
    LineEditor,
    /// Spawn `tput lines` and `tput cols`.
    Tput,
    /// Spawn `stty size`.
    Stty,
    /// Read `COLUMNS` plus `LINES`/`ROWS`.
    EnvVars,
    /// Parse the `ANSICON` geometry variable.
    Ansicon,
}

impl Strategy {
    /// Every strategy, in chain priority order.
    pub const ALL: &'static [Self] = &[
        Self::NativeQuery,
        Self::LineEditor,
        Self::Tput,
        Self::Stty,
        Self::EnvVars,
        Self::Ansicon,
    ];

    /// Short identifier for diagnostics and log events.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NativeQuery => "native-query",
            Self::LineEditor => "line-editor",
            Self::Tput => "tput",
            Self::Stty => "stty",
            Self::EnvVars => "env-vars",
            Self::Ansicon => "ansicon",
        }
    }

    /// Run this strategy against `ctx`.
    ///
    /// Returns a size only when the probe answered and the answer is
    /// usable (at least one column).
    pub(crate) fn probe(&self, ctx: &ProbeContext<'_>) -> Option<ScreenSize> {
        let candidate = match self {
            Self::NativeQuery => from_native(ctx),
            Self::LineEditor => from_line_editor(ctx),
            Self::Tput => from_tput(ctx),
            Self::Stty => from_stty(ctx),
            Self::EnvVars => from_env_vars(ctx.env),
            Self::Ansicon => from_ansicon(ctx.env),
        };
        let size = candidate.filter(|size| size.is_valid());
        log_probe(*self, size);
        size
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a strategy may consult, borrowed from the resolver.
pub(crate) struct ProbeContext<'a> {
    pub(crate) target: &'a dyn ProbeTarget,
    pub(crate) env: &'a dyn EnvSource,
    pub(crate) line_editor: Option<LineEditorQuery>,
    pub(crate) command_timeout: Option<Duration>,
}

/// The chain-exhausted fallback: 27x80 unless `LINES`/`COLUMNS` hold
/// positive integers.
pub(crate) fn default_size(env: &dyn EnvSource) -> ScreenSize {
    let rows = positive_dimension(env, "LINES").unwrap_or(DEFAULT_ROWS);
    let columns = positive_dimension(env, "COLUMNS").unwrap_or(DEFAULT_COLUMNS);
    ScreenSize::new(rows, columns)
}

fn positive_dimension(env: &dyn EnvSource, name: &str) -> Option<u16> {
    env.var(name)
        .as_deref()
        .and_then(parse_dimension)
        .filter(|value| *value > 0)
}

// ── Strategy probes ──────────────────────────────────────────────────────

fn from_native(ctx: &ProbeContext<'_>) -> Option<ScreenSize> {
    if !ctx.target.is_terminal() {
        return None;
    }
    let size = ctx.target.winsize();
    if size.is_none() {
        log_native_unavailable();
    }
    size
}

fn from_line_editor(ctx: &ProbeContext<'_>) -> Option<ScreenSize> {
    let query = ctx.line_editor?;
    query()
}

fn from_tput(ctx: &ProbeContext<'_>) -> Option<ScreenSize> {
    if !ctx.target.is_terminal() {
        return None;
    }
    let rows = run_command("tput", &["lines"], ctx.command_timeout)
        .and_then(|out| parse_dimension(out.trim()))?;
    let columns = run_command("tput", &["cols"], ctx.command_timeout)
        .and_then(|out| parse_dimension(out.trim()))?;
    Some(ScreenSize::new(rows, columns))
}

fn from_stty(ctx: &ProbeContext<'_>) -> Option<ScreenSize> {
    if !ctx.target.is_terminal() {
        return None;
    }
    let output = run_command("stty", &["size"], ctx.command_timeout)?;
    parse_stty_size(&output)
}

fn from_env_vars(env: &dyn EnvSource) -> Option<ScreenSize> {
    let columns = parse_dimension(&env.var("COLUMNS")?)?;
    // ROWS only stands in when LINES is absent entirely; a set but
    // malformed LINES leaves rows at zero.
    let rows = env
        .var("LINES")
        .or_else(|| env.var("ROWS"))
        .as_deref()
        .and_then(parse_dimension)
        .unwrap_or(0);
    Some(ScreenSize::new(rows, columns))
}

fn from_ansicon(env: &dyn EnvSource) -> Option<ScreenSize> {
    parse_ansicon_geometry(&env.var("ANSICON")?)
}

// ── Parsers ──────────────────────────────────────────────────────────────

/// Parse a decimal cell count. Strict: ASCII digits only, no sign, no
/// surrounding whitespace. Counts that overflow `u16` are malformed.
fn parse_dimension(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse `stty size` output: whitespace-separated "rows cols". Trailing
/// fields are ignored.
fn parse_stty_size(output: &str) -> Option<ScreenSize> {
    let mut fields = output.split_whitespace();
    let rows = parse_dimension(fields.next()?)?;
    let columns = parse_dimension(fields.next()?)?;
    Some(ScreenSize::new(rows, columns))
}

/// Parse an ANSICON-style geometry value such as `(80x24)` or
/// `173x78 (173x50)`.
///
/// The parenthesized pair is width before height; the last `x` inside the
/// parentheses splits them. The returned size is back in (rows, columns)
/// order.
fn parse_ansicon_geometry(value: &str) -> Option<ScreenSize> {
    let (_, tail) = value.split_once('(')?;
    let (inner, _) = tail.split_once(')')?;
    let (width, height) = inner.rsplit_once('x')?;
    let columns = parse_dimension(width.trim())?;
    let rows = parse_dimension(height.trim())?;
    Some(ScreenSize::new(rows, columns))
}

// ── Command plumbing ─────────────────────────────────────────────────────

fn command_exists(command: &str) -> bool {
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(command).is_file();
    }

    let path_var = match env::var_os("PATH") {
        Some(path) => path,
        None => return false,
    };

    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(command);
        if candidate.is_file() {
            return true;
        }
        // Windows installs console utilities as `<command>.exe`.
        if cfg!(target_os = "windows") {
            let candidate = dir.join(format!("{command}.exe"));
            if candidate.is_file() {
                return true;
            }
        }
    }
    false
}

/// Run an external utility and capture its stdout.
///
/// Stderr is discarded so probe failures never pollute the caller's error
/// stream; stdin is inherited so `stty` can reach the controlling
/// terminal. Returns `None` when the command is missing, fails to spawn,
/// or overruns `timeout`.
fn run_command(command: &str, args: &[&str], timeout: Option<Duration>) -> Option<String> {
    if !command_exists(command) {
        return None;
    }

    match timeout {
        None => {
            let output = Command::new(command)
                .args(args)
                .stdin(Stdio::inherit())
                .stderr(Stdio::null())
                .output()
                .ok()?;
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Some(limit) => run_command_bounded(command, args, limit),
    }
}

/// Bounded variant: stdout is drained on a helper thread and the child is
/// killed and reaped if it overruns the limit.
fn run_command_bounded(command: &str, args: &[&str], limit: Duration) -> Option<String> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    let mut stdout = child.stdout.take()?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });

    match rx.recv_timeout(limit) {
        Ok(buf) => {
            let _ = child.wait();
            Some(String::from_utf8_lossy(&buf).into_owned())
        }
        Err(_) => {
            let _ = child.kill();
            let _ = child.wait();
            None
        }
    }
}

// ── Logging ──────────────────────────────────────────────────────────────

#[cfg(feature = "tracing")]
fn log_probe(strategy: Strategy, result: Option<ScreenSize>) {
    match result {
        Some(size) => {
            tracing::trace!(strategy = strategy.name(), size = %size, "probe produced a candidate");
        }
        None => tracing::trace!(strategy = strategy.name(), "probe produced nothing"),
    }
}

#[cfg(not(feature = "tracing"))]
fn log_probe(_strategy: Strategy, _result: Option<ScreenSize>) {}

#[cfg(feature = "tracing")]
fn log_native_unavailable() {
    tracing::debug!(
        supported = crate::target::NATIVE_QUERY_SUPPORTED,
        "native winsize query yielded nothing"
    );
}

#[cfg(not(feature = "tracing"))]
fn log_native_unavailable() {}
