//! Named parameter presets.
//!
//! A fixed, process-wide table of parameter bundles. Presets are the
//! configuration surface of the batch driver: each one produces its own
//! output subtree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Params;

/// A named bundle of pipeline parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Balanced stylization: `(2.0, 8, 60.0, 0.4)`.
    Default,
    /// Subtler colors and more levels: `(1.5, 12, 80.0, 0.3)`.
    Realistic,
    /// Vivid colors and heavy banding: `(2.5, 6, 50.0, 0.5)`.
    AnimeStyle,
    /// Muted palette with strong smoothing: `(1.2, 4, 100.0, 0.2)`.
    Monochrome,
}

impl Preset {
    /// Every preset, in table order.
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::Realistic,
        Self::AnimeStyle,
        Self::Monochrome,
    ];

    /// The preset name as used on the CLI and in output directory names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Realistic => "realistic",
            Self::AnimeStyle => "anime_style",
            Self::Monochrome => "monochrome",
        }
    }

    /// The parameter bundle this preset stands for.
    #[must_use]
    pub const fn params(self) -> Params {
        match self {
            Self::Default => Params {
                saturation: 2.0,
                levels: 8,
                smoothing: 60.0,
                edge_sensitivity: 0.4,
            },
            Self::Realistic => Params {
                saturation: 1.5,
                levels: 12,
                smoothing: 80.0,
                edge_sensitivity: 0.3,
            },
            Self::AnimeStyle => Params {
                saturation: 2.5,
                levels: 6,
                smoothing: 50.0,
                edge_sensitivity: 0.5,
            },
            Self::Monochrome => Params {
                saturation: 1.2,
                levels: 4,
                smoothing: 100.0,
                edge_sensitivity: 0.2,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a preset name not present in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}' (expected one of: default, realistic, anime_style, monochrome)")]
pub struct UnknownPreset(String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
