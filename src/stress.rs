//! Severity bands for colouring pieces by stress level.

use serde::Serialize;

/// Four-step classification of a stress level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StressBand {
    /// Below 0.3.
    Safe,
    /// From 0.3 up to 0.5.
    Caution,
    /// From 0.5 up to 0.75.
    Warning,
    /// 0.75 and above.
    Critical,
}

impl StressBand {
    /// Colour token the renderer uses for this band.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            StressBand::Safe => "#4caf50",
            StressBand::Caution => "#ffeb3b",
            StressBand::Warning => "#ff9800",
            StressBand::Critical => "#f44336",
        }
    }
}

/// Classify a stress level for display.
///
/// # Examples
/// ```
/// use cattree::{stress_color, StressBand};
///
/// assert_eq!(stress_color(0.1), StressBand::Safe);
/// assert_eq!(stress_color(0.5), StressBand::Warning);
/// assert_eq!(stress_color(1.0).color(), "#f44336");
/// ```
#[must_use]
pub fn stress_color(stress_level: f64) -> StressBand {
    if stress_level < 0.3 {
        StressBand::Safe
    } else if stress_level < 0.5 {
        StressBand::Caution
    } else if stress_level < 0.75 {
        StressBand::Warning
    } else {
        StressBand::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_open_the_next_band() {
        assert_eq!(stress_color(0.0), StressBand::Safe);
        assert_eq!(stress_color(0.299), StressBand::Safe);
        assert_eq!(stress_color(0.3), StressBand::Caution);
        assert_eq!(stress_color(0.749), StressBand::Warning);
        assert_eq!(stress_color(0.75), StressBand::Critical);
    }

    #[test]
    fn bands_are_ordered_by_severity() {
        assert!(StressBand::Safe < StressBand::Caution);
        assert!(StressBand::Warning < StressBand::Critical);
    }
}
