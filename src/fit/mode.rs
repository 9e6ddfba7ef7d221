use std::{fmt, str::FromStr};

use crate::foundation::error::FramefitError;

/// Policy for scaling content of one aspect ratio into a box of another.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Uniform scale so the content fits entirely inside the box.
    #[default]
    Contain,
    /// Uniform scale so the content covers the whole box (cover).
    Fill,
    /// Independent per-axis scale; aspect ratio is not preserved.
    Stretch,
    /// Like `Contain`, but never upscales past natural size.
    Center,
}

impl FitMode {
    /// Every mode, in declaration order.
    pub const ALL: [FitMode; 4] = [
        FitMode::Contain,
        FitMode::Fill,
        FitMode::Stretch,
        FitMode::Center,
    ];

    /// Lowercase name used in records and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            FitMode::Contain => "contain",
            FitMode::Fill => "fill",
            FitMode::Stretch => "stretch",
            FitMode::Center => "center",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = FramefitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contain" => Ok(FitMode::Contain),
            "fill" | "cover" => Ok(FitMode::Fill),
            "stretch" => Ok(FitMode::Stretch),
            "center" => Ok(FitMode::Center),
            other => Err(FramefitError::validation(format!(
                "unknown scaling mode '{other}' (expected contain, fill, stretch or center)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fit/mode.rs"]
mod tests;
