//! Terminal styling and color utilities.
//!
//! ANSI escape codes for the distance-bucket legend plus color detection.

use starmap_lib::DistanceBucket;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for system names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for ids and secondary text.
    pub const GRAY: &str = "\x1b[90m";

    // Distance buckets, nearest to farthest.
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
    pub magenta: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            cyan: colors::CYAN,
            yellow: colors::YELLOW,
            red: colors::RED,
            magenta: colors::MAGENTA,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            cyan: "",
            yellow: "",
            red: "",
            magenta: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Terminal color standing in for a bucket's display color.
    #[must_use]
    pub fn bucket(&self, bucket: DistanceBucket) -> &'static str {
        match bucket {
            DistanceBucket::Under10 => self.green,
            DistanceBucket::Under15 => self.cyan,
            DistanceBucket::Under20 => self.yellow,
            DistanceBucket::Under25 => self.red,
            DistanceBucket::Over25 => self.magenta,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_palette_colored() {
        let p = ColorPalette::colored();
        assert!(!p.reset.is_empty());
        assert_eq!(p.bucket(DistanceBucket::Under10), colors::GREEN);
        assert_eq!(p.bucket(DistanceBucket::Over25), colors::MAGENTA);
    }

    #[test]
    fn test_color_palette_plain() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(DistanceBucket::ALL.iter().all(|b| p.bucket(*b).is_empty()));
    }

    #[test]
    fn test_bucket_colors_are_distinct() {
        let p = ColorPalette::colored();
        let mut seen: Vec<_> = DistanceBucket::ALL.iter().map(|b| p.bucket(*b)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), DistanceBucket::ALL.len());
    }

    mod supports_color_tests {
        use super::*;
        use std::env;
        use std::sync::Mutex;

        /// Environment variables are process-global; serialize tests that touch them.
        static ENV_MUTEX: Mutex<()> = Mutex::new(());

        fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
        where
            F: FnOnce() -> R,
        {
            let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();

            for (key, value) in vars {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            let result = f();

            for (key, value) in saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            result
        }

        #[test]
        fn test_supports_color_no_color_set() {
            with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
                assert!(!supports_color(), "NO_COLOR=1 should disable colors");
            });
        }

        #[test]
        fn test_supports_color_term_dumb() {
            with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
                assert!(!supports_color(), "TERM=dumb should disable colors");
            });
        }

        #[test]
        fn test_supports_color_default() {
            with_env_vars(
                &[("NO_COLOR", None), ("TERM", Some("xterm-256color"))],
                || {
                    assert!(supports_color(), "Normal terminal should support colors");
                },
            );
        }
    }
}
