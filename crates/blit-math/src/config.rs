//! Dispatcher configuration from the environment.
//!
//! # Environment Variables
//!
//! - `BLIT_SIMD` - Set to `0`, `off`, `false` or `scalar` to disable the
//!   vector kernel
//! - `BLIT_SIMD_MIN_RUN` - Shortest run (in pixels) handed to the vector
//!   kernel, 2..=4096
//!
//! Both are read once, together with the CPU probe, and never re-read.

use std::env;

/// Default shortest run handed to the vector kernel.
pub const DEFAULT_MIN_RUN: usize = 8;

/// Smallest accepted `BLIT_SIMD_MIN_RUN`.
pub const MIN_RUN_LOWER: usize = 2;

/// Largest accepted `BLIT_SIMD_MIN_RUN`.
pub const MIN_RUN_UPPER: usize = 4096;

/// Returns `true` unless `BLIT_SIMD` asks for the scalar path.
pub fn simd_enabled() -> bool {
    env::var("BLIT_SIMD")
        .map(|v| parse_enabled(&v))
        .unwrap_or(true)
}

/// Minimum vector run length, honouring `BLIT_SIMD_MIN_RUN`.
pub fn min_run() -> usize {
    env::var("BLIT_SIMD_MIN_RUN")
        .ok()
        .and_then(|v| parse_min_run(&v))
        .unwrap_or(DEFAULT_MIN_RUN)
}

fn parse_enabled(value: &str) -> bool {
    let v = value.trim();
    !(v == "0"
        || v.eq_ignore_ascii_case("off")
        || v.eq_ignore_ascii_case("false")
        || v.eq_ignore_ascii_case("scalar"))
}

fn parse_min_run(value: &str) -> Option<usize> {
    value
        .trim()
        .parse()
        .ok()
        .filter(|&n| (MIN_RUN_LOWER..=MIN_RUN_UPPER).contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enabled() {
        assert!(parse_enabled("1"));
        assert!(parse_enabled("on"));
        assert!(parse_enabled(""));
        assert!(!parse_enabled("0"));
        assert!(!parse_enabled("OFF"));
        assert!(!parse_enabled(" scalar "));
        assert!(!parse_enabled("False"));
    }

    #[test]
    fn test_parse_min_run() {
        assert_eq!(parse_min_run("16"), Some(16));
        assert_eq!(parse_min_run(" 2 "), Some(2));
        assert_eq!(parse_min_run("1"), None);
        assert_eq!(parse_min_run("100000"), None);
        assert_eq!(parse_min_run("fast"), None);
    }
}
