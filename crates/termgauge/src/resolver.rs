#![forbid(unsafe_code)]

//! The screen size resolver: runs the probe chain and caches the answer.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use crate::env::{EnvSource, OsEnv};
use crate::probe::{self, LineEditorQuery, ProbeContext, Strategy};
use crate::size::ScreenSize;
use crate::target::{ProbeTarget, StdStream};

/// Resolves terminal dimensions through the strategy chain.
///
/// A resolver owns its probe target (stderr by default), its environment
/// source, and one memoized result: the chain runs at most once per
/// instance, and later [`size`](Self::size) calls return the cached value
/// even if the environment has changed since. Hold on to one resolver when
/// you query repeatedly; the free functions in the crate root build a
/// fresh instance per call.
///
/// Resolvers are built for single-threaded use. The cache itself is a
/// [`OnceLock`], so the chain runs at most once per instance and the first
/// computed value is the one every later call sees.
///
/// # Examples
///
/// ```no_run
/// use termgauge::SizeResolver;
///
/// let resolver = SizeResolver::new();
/// let size = resolver.size();
/// println!("{} columns by {} rows", size.columns, size.rows);
/// ```
pub struct SizeResolver {
    target: Box<dyn ProbeTarget>,
    env: Box<dyn EnvSource>,
    line_editor: Option<LineEditorQuery>,
    command_timeout: Option<Duration>,
    cached: OnceLock<ScreenSize>,
}

impl SizeResolver {
    /// A resolver probing stderr against the process environment.
    pub fn new() -> Self {
        Self {
            target: Box::new(StdStream::Stderr),
            env: Box::new(OsEnv),
            line_editor: None,
            command_timeout: None,
            cached: OnceLock::new(),
        }
    }

    /// Probe a different standard stream instead of stderr.
    #[must_use]
    pub fn with_output(self, stream: StdStream) -> Self {
        self.with_target(stream)
    }

    /// Probe a caller-supplied target.
    #[must_use]
    pub fn with_target(mut self, target: impl ProbeTarget + 'static) -> Self {
        self.target = Box::new(target);
        self
    }

    /// Read variables from `env` instead of the process environment.
    #[must_use]
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Install a line-editor size query (chain priority 2).
    #[must_use]
    pub fn with_line_editor_query(mut self, query: LineEditorQuery) -> Self {
        self.line_editor = Some(query);
        self
    }

    /// Bound each subprocess probe (`tput`, `stty`) to `timeout`.
    ///
    /// Without one, a hung utility blocks the chain indefinitely; that
    /// matches the historical behavior and is the default. On overrun the
    /// child is killed and the strategy yields nothing.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    /// Resolve the terminal size.
    ///
    /// Never fails: when every strategy comes up empty the default size
    /// applies. The first call runs the chain; later calls return the
    /// memoized result without re-probing.
    pub fn size(&self) -> ScreenSize {
        *self.cached.get_or_init(|| self.resolve())
    }

    /// Width in columns. Shorthand for `self.size().columns`.
    pub fn width(&self) -> u16 {
        self.size().columns
    }

    /// Height in rows. Shorthand for `self.size().rows`.
    pub fn height(&self) -> u16 {
        self.size().rows
    }

    /// Alias for [`width`](Self::width).
    pub fn columns(&self) -> u16 {
        self.width()
    }

    /// Alias for [`height`](Self::height).
    pub fn rows(&self) -> u16 {
        self.height()
    }

    /// The chain-exhausted fallback: 27x80 unless `LINES`/`COLUMNS` hold
    /// positive integers.
    ///
    /// Reads the resolver's environment source directly; not memoized.
    pub fn default_size(&self) -> ScreenSize {
        probe::default_size(self.env.as_ref())
    }

    /// Run a single strategy in isolation, bypassing the cache.
    ///
    /// Diagnostic aid: shows what each link of the chain would contribute
    /// right now. `None` means the strategy is gated off, unavailable, or
    /// produced an unusable answer.
    pub fn probe(&self, strategy: Strategy) -> Option<ScreenSize> {
        strategy.probe(&self.context())
    }

    fn resolve(&self) -> ScreenSize {
        let ctx = self.context();
        Strategy::ALL
            .iter()
            .find_map(|strategy| strategy.probe(&ctx))
            .unwrap_or_else(|| probe::default_size(self.env.as_ref()))
    }

    fn context(&self) -> ProbeContext<'_> {
        ProbeContext {
            target: self.target.as_ref(),
            env: self.env.as_ref(),
            line_editor: self.line_editor,
            command_timeout: self.command_timeout,
        }
    }
}

impl Default for SizeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SizeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeResolver")
            .field("line_editor", &self.line_editor.is_some())
            .field("command_timeout", &self.command_timeout)
            .field("cached", &self.cached.get())
            .finish_non_exhaustive()
    }
}
