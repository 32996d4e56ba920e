#![forbid(unsafe_code)]

//! Probe targets: the streams checked for terminal attachment and native
//! size queries.

use std::io::IsTerminal;

use crate::size::ScreenSize;

/// Whether this platform can answer a native winsize query at all.
///
/// The resolver consults the device only where a safe query exists:
/// termios on unix, the console API on windows. Elsewhere the native
/// strategy reports nothing and the chain moves on.
pub const NATIVE_QUERY_SUPPORTED: bool = cfg!(any(unix, windows));

/// A stream-like object a resolver probes.
pub trait ProbeTarget {
    /// Whether the target is connected to an interactive terminal device.
    fn is_terminal(&self) -> bool;

    /// The device-reported size, or `None` when the query is unsupported
    /// or fails.
    ///
    /// The value is raw: callers decide whether a zero-column answer is
    /// usable.
    fn winsize(&self) -> Option<ScreenSize>;
}

/// A standard stream of the current process.
///
/// Stderr is the default probe target: it is the stream most likely to
/// still be attached to the terminal when stdout is redirected into a
/// pipe or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdStream {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

impl ProbeTarget for StdStream {
    fn is_terminal(&self) -> bool {
        match self {
            Self::Stderr => std::io::stderr().is_terminal(),
            Self::Stdout => std::io::stdout().is_terminal(),
        }
    }

    fn winsize(&self) -> Option<ScreenSize> {
        native_winsize(*self)
    }
}

#[cfg(unix)]
fn native_winsize(stream: StdStream) -> Option<ScreenSize> {
    use rustix::termios::tcgetwinsize;

    let winsize = match stream {
        StdStream::Stderr => tcgetwinsize(std::io::stderr()).ok()?,
        StdStream::Stdout => tcgetwinsize(std::io::stdout()).ok()?,
    };
    Some(ScreenSize::new(winsize.ws_row, winsize.ws_col))
}

#[cfg(windows)]
fn native_winsize(_stream: StdStream) -> Option<ScreenSize> {
    // The console API reports one size for the whole console; the stream
    // choice does not matter here.
    crossterm::terminal::size()
        .ok()
        .map(|(columns, rows)| ScreenSize::new(rows, columns))
}

#[cfg(not(any(unix, windows)))]
fn native_winsize(_stream: StdStream) -> Option<ScreenSize> {
    None
}
