#![forbid(unsafe_code)]

//! Screen dimension primitives.

use std::fmt;

/// Terminal dimensions as a (rows, columns) pair.
///
/// Both counts are in character cells. A size is *usable* only when it
/// reports at least one column; see [`ScreenSize::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSize {
    /// Number of rows (height in cells).
    pub rows: u16,
    /// Number of columns (width in cells).
    pub columns: u16,
}

impl ScreenSize {
    /// Create a new size from row and column counts.
    #[inline]
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    /// Width in cells. Alias for `self.columns`.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.columns
    }

    /// Height in cells. Alias for `self.rows`.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.rows
    }

    /// Check whether the size is usable.
    ///
    /// A probe result counts only when it reports at least one column.
    /// Rows may legitimately be zero on exotic devices, so they are not
    /// part of the predicate.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.columns > 0
    }
}

impl From<(u16, u16)> for ScreenSize {
    /// Build from a `(rows, columns)` tuple.
    #[inline]
    fn from((rows, columns): (u16, u16)) -> Self {
        Self::new(rows, columns)
    }
}

impl From<ScreenSize> for (u16, u16) {
    /// Convert into a `(rows, columns)` tuple.
    #[inline]
    fn from(size: ScreenSize) -> Self {
        (size.rows, size.columns)
    }
}

impl fmt::Display for ScreenSize {
    /// Formats as `<columns>x<rows>`, the conventional geometry notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}
