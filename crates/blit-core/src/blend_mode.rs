//! Blend mode selection.

use std::fmt;
use std::str::FromStr;

/// Compositing function applied when a source pixel is written onto
/// existing content.
///
/// The arithmetic for each mode lives in `blit-math`; this enum only names
/// the mode so that images can carry it as state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Overwrite the destination, alpha included.
    Set,
    /// Standard "over" alpha compositing.
    #[default]
    Mix,
    /// Saturating additive blend weighted by source alpha.
    Add,
    /// Saturating subtractive blend weighted by source alpha.
    Subtract,
    /// Channel multiply, faded in by source alpha.
    Multiply,
}

impl BlendMode {
    /// All modes, in declaration order.
    pub const ALL: [BlendMode; 5] = [
        BlendMode::Set,
        BlendMode::Mix,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Multiply,
    ];

    /// Lower-case mode name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Mix => "mix",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "set" | "copy" => Ok(Self::Set),
            "mix" | "over" | "normal" => Ok(Self::Mix),
            "add" => Ok(Self::Add),
            "sub" | "subtract" => Ok(Self::Subtract),
            "mul" | "multiply" => Ok(Self::Multiply),
            other => Err(format!("unknown blend mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mix() {
        assert_eq!(BlendMode::default(), BlendMode::Mix);
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for mode in BlendMode::ALL {
            assert_eq!(mode.as_str().parse::<BlendMode>(), Ok(mode));
        }
        assert_eq!("Over".parse::<BlendMode>(), Ok(BlendMode::Mix));
        assert!("screen".parse::<BlendMode>().is_err());
    }
}
