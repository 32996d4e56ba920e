//! Property-based invariant tests for the resolution chain.
//!
//! These verify invariants that must hold for any input the environment
//! could throw at the resolver:
//!
//! 1. Resolution always yields a usable size (columns ≥ 1), never panics.
//! 2. Pure-digit `COLUMNS`/`LINES` values round through the env strategy
//!    exactly.
//! 3. Digit-free `COLUMNS` values never satisfy the env strategy.
//! 4. ANSICON geometry round-trips with the width/height fields swapped.
//! 5. Default size honors positive overrides and falls back otherwise.
//! 6. Memoization: consecutive resolutions are identical.
//! 7. A valid native answer always wins the chain.

use std::collections::HashMap;

use proptest::prelude::*;
use termgauge::{ProbeTarget, ScreenSize, SizeResolver, Strategy};

// ── Helpers ─────────────────────────────────────────────────────────────

struct FakeTarget {
    tty: bool,
    size: Option<ScreenSize>,
}

impl ProbeTarget for FakeTarget {
    fn is_terminal(&self) -> bool {
        self.tty
    }

    fn winsize(&self) -> Option<ScreenSize> {
        self.size
    }
}

fn detached() -> FakeTarget {
    FakeTarget {
        tty: false,
        size: None,
    }
}

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn headless(pairs: &[(&str, &str)]) -> SizeResolver {
    SizeResolver::new()
        .with_target(detached())
        .with_env(env_of(pairs))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Resolution always yields a usable size
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolution_is_total_and_usable(
        columns in ".{0,12}",
        lines in ".{0,12}",
        rows in ".{0,12}",
        ansicon in ".{0,16}",
    ) {
        let resolver = headless(&[
            ("COLUMNS", &columns),
            ("LINES", &lines),
            ("ROWS", &rows),
            ("ANSICON", &ansicon),
        ]);
        let size = resolver.size();
        prop_assert!(size.is_valid());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Pure-digit variables round through the env strategy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn digit_variables_round_through(columns in "[0-9]{1,4}", lines in "[0-9]{1,4}") {
        let resolver = headless(&[("COLUMNS", &columns), ("LINES", &lines)]);
        let parsed_columns: u16 = columns.parse().unwrap();
        let parsed_lines: u16 = lines.parse().unwrap();

        let expected = if parsed_columns > 0 {
            Some(ScreenSize::new(parsed_lines, parsed_columns))
        } else {
            None
        };
        prop_assert_eq!(resolver.probe(Strategy::EnvVars), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Digit-free COLUMNS never satisfies the env strategy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn digit_free_columns_is_rejected(columns in "[a-zA-Z ]{1,8}") {
        let resolver = headless(&[("COLUMNS", &columns), ("LINES", "40")]);
        prop_assert_eq!(resolver.probe(Strategy::EnvVars), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. ANSICON geometry round-trips swapped
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ansicon_round_trips_swapped(width in 0u16..=9999, height in 0u16..=9999) {
        let value = format!("({width}x{height})");
        let resolver = headless(&[("ANSICON", &value)]);

        let expected = if width > 0 {
            Some(ScreenSize::new(height, width))
        } else {
            None
        };
        prop_assert_eq!(resolver.probe(Strategy::Ansicon), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Default size honors positive overrides
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn default_size_honors_digit_overrides(lines in "[0-9]{1,4}", columns in "[0-9]{1,4}") {
        let resolver = headless(&[("LINES", &lines), ("COLUMNS", &columns)]);
        let parsed_lines: u16 = lines.parse().unwrap();
        let parsed_columns: u16 = columns.parse().unwrap();

        let defaults = resolver.default_size();
        prop_assert_eq!(defaults.rows, if parsed_lines > 0 { parsed_lines } else { 27 });
        prop_assert_eq!(
            defaults.columns,
            if parsed_columns > 0 { parsed_columns } else { 80 }
        );
    }

    #[test]
    fn default_size_ignores_digit_free_overrides(lines in "[a-z]{1,8}", columns in "[a-z]{1,8}") {
        let resolver = headless(&[("LINES", &lines), ("COLUMNS", &columns)]);
        prop_assert_eq!(resolver.default_size(), ScreenSize::new(27, 80));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Memoization: consecutive resolutions are identical
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn consecutive_resolutions_are_identical(
        columns in ".{0,12}",
        lines in ".{0,12}",
    ) {
        let resolver = headless(&[("COLUMNS", &columns), ("LINES", &lines)]);
        prop_assert_eq!(resolver.size(), resolver.size());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. A valid native answer always wins the chain
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn native_answers_win(rows in 0u16..=9999, columns in 1u16..=9999) {
        let resolver = SizeResolver::new()
            .with_target(FakeTarget {
                tty: true,
                size: Some(ScreenSize::new(rows, columns)),
            })
            .with_env(env_of(&[("COLUMNS", "120"), ("LINES", "40")]));
        prop_assert_eq!(resolver.size(), ScreenSize::new(rows, columns));
    }
}
