//! # Expert Adjustments
//!
//! Operator overrides on top of the derived chip-load parameters: a global
//! aggressiveness slider and optional per-parameter replacements. Both act
//! on the quality-adjusted values, before the stability derate, so a slender
//! tool still gets its protection regardless of how hot the operator dials
//! the cut.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Lowest accepted slider position (halves the chip load)
pub const EXPERT_LEVEL_MIN: i32 = -50;

/// Highest accepted slider position (+50% chip load)
pub const EXPERT_LEVEL_MAX: i32 = 50;

/// Direct replacements for individual chip-load parameters [mm].
///
/// An override wins over the slider: the multiplied value is discarded and
/// the override used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    /// Feed per tooth replacement
    pub fz_mm: Option<f64>,

    /// Radial engagement replacement
    pub ae_mm: Option<f64>,

    /// Axial depth replacement
    pub ap_mm: Option<f64>,
}

impl ParameterOverrides {
    pub fn is_empty(&self) -> bool {
        self.fz_mm.is_none() && self.ae_mm.is_none() && self.ap_mm.is_none()
    }
}

/// Expert-mode settings for one calculation.
///
/// ```json
/// {
///   "level": -20,
///   "overrides": { "ap_mm": 1.5 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertSettings {
    /// Global aggressiveness in percent, -50 to +50
    pub level: i32,

    /// Per-parameter replacements
    pub overrides: ParameterOverrides,
}

impl ExpertSettings {
    /// Slider-only settings with no overrides
    pub fn with_level(level: i32) -> Self {
        ExpertSettings {
            level,
            overrides: ParameterOverrides::default(),
        }
    }

    /// Neutral settings leave the derived parameters untouched.
    pub fn is_neutral(&self) -> bool {
        self.level == 0 && self.overrides.is_empty()
    }

    /// Slider position clamped to the accepted range. Out-of-range input is
    /// pulled to the nearest boundary, never stored or applied as given.
    pub fn effective_level(&self) -> i32 {
        self.level.clamp(EXPERT_LEVEL_MIN, EXPERT_LEVEL_MAX)
    }

    /// Chip-load multiplier for the (clamped) slider position
    pub fn multiplier(&self) -> f64 {
        1.0 + f64::from(self.effective_level()) / 100.0
    }

    /// Reject non-physical overrides.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("expert.overrides.fz_mm", self.overrides.fz_mm),
            ("expert.overrides.ae_mm", self.overrides.ae_mm),
            ("expert.overrides.ap_mm", self.overrides.ap_mm),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(CalcError::invalid_input(
                        field,
                        v.to_string(),
                        "must be positive",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Apply the slider and overrides to the quality-adjusted chip load.
    ///
    /// Returns `(fz, ae, ap)` in mm. The caller applies the stability derate
    /// afterwards.
    pub fn apply(&self, fz_mm: f64, ae_mm: f64, ap_mm: f64) -> (f64, f64, f64) {
        let m = self.multiplier();
        (
            self.overrides.fz_mm.unwrap_or(fz_mm * m),
            self.overrides.ae_mm.unwrap_or(ae_mm * m),
            self.overrides.ap_mm.unwrap_or(ap_mm * m),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_apply_is_identity() {
        let expert = ExpertSettings::default();
        assert!(expert.is_neutral());
        assert_eq!(expert.apply(0.08, 3.0, 1.5), (0.08, 3.0, 1.5));
    }

    #[test]
    fn test_slider_scales_all_parameters() {
        let expert = ExpertSettings::with_level(-50);
        let (fz, ae, ap) = expert.apply(0.08, 3.0, 1.5);
        assert!((fz - 0.04).abs() < 1e-12);
        assert!((ae - 1.5).abs() < 1e-12);
        assert!((ap - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_override_wins_over_slider() {
        let expert = ExpertSettings {
            level: 50,
            overrides: ParameterOverrides {
                ap_mm: Some(1.0),
                ..Default::default()
            },
        };
        let (fz, _, ap) = expert.apply(0.08, 3.0, 1.5);
        assert!((fz - 0.12).abs() < 1e-12);
        assert_eq!(ap, 1.0);
    }

    #[test]
    fn test_out_of_range_level_clamped_at_boundary() {
        assert_eq!(ExpertSettings::with_level(80).effective_level(), 50);
        assert_eq!(ExpertSettings::with_level(-200).effective_level(), -50);
        assert_eq!(ExpertSettings::with_level(80).multiplier(), 1.5);
        assert_eq!(ExpertSettings::with_level(-200).multiplier(), 0.5);
        assert_eq!(ExpertSettings::with_level(25).multiplier(), 1.25);
    }

    #[test]
    fn test_nonpositive_override_rejected() {
        let expert = ExpertSettings {
            level: 0,
            overrides: ParameterOverrides {
                fz_mm: Some(0.0),
                ..Default::default()
            },
        };
        assert!(expert.validate().is_err());
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let expert: ExpertSettings = serde_json::from_str("{\"level\": 10}").unwrap();
        assert_eq!(expert.level, 10);
        assert!(expert.overrides.is_empty());
    }
}
