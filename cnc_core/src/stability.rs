//! # Overhang Stability
//!
//! Classifies tool slenderness from the length-to-diameter ratio of the
//! cutting portion and derates the chip-load parameters accordingly. A long
//! thin tool deflects and chatters; the fix is lighter cuts, not slower
//! spindle speed, so the reduction applies to fz, ae and ap.

use serde::{Deserialize, Serialize};

use crate::catalog::ToolGeometry;

/// Slenderness class by L/D ratio.
///
/// The partition is total: every finite non-negative ratio maps to exactly
/// one class, with boundaries belonging to the shorter class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LdClass {
    /// L/D <= 3: rigid, full parameters
    Short,

    /// 3 < L/D <= 5: normal end-mill territory, mild derate
    Standard,

    /// 5 < L/D <= 8: noticeably compliant, firm derate
    Reduced,

    /// L/D > 8: deep-reach tooling, halved chip load
    Slender,
}

impl LdClass {
    /// All classes, shortest first
    pub const ALL: [LdClass; 4] = [
        LdClass::Short,
        LdClass::Standard,
        LdClass::Reduced,
        LdClass::Slender,
    ];

    /// Classify a length-to-diameter ratio
    pub fn from_ratio(ld_ratio: f64) -> LdClass {
        if ld_ratio <= 3.0 {
            LdClass::Short
        } else if ld_ratio <= 5.0 {
            LdClass::Standard
        } else if ld_ratio <= 8.0 {
            LdClass::Reduced
        } else {
            LdClass::Slender
        }
    }

    /// Multiplier applied to fz, ae and ap for this class
    pub fn reduction_factor(&self) -> f64 {
        match self {
            LdClass::Short => 1.0,
            LdClass::Standard => 0.9,
            LdClass::Reduced => 0.7,
            LdClass::Slender => 0.5,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LdClass::Short => "Short",
            LdClass::Standard => "Standard",
            LdClass::Reduced => "Reduced",
            LdClass::Slender => "Slender",
        }
    }
}

impl std::fmt::Display for LdClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of a stability classification.
///
/// ```json
/// {
///   "ld_ratio": 6.25,
///   "class": "reduced",
///   "reduction_factor": 0.7,
///   "advisory": "L/D 6.25: compliant setup, chip load reduced by 30%"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityInfo {
    /// Length-to-diameter ratio LCF / DC
    pub ld_ratio: f64,

    /// Slenderness class the ratio falls in
    pub class: LdClass,

    /// Chip-load multiplier for the class
    pub reduction_factor: f64,

    /// Operator-facing note for derated classes, absent when the tool is rigid
    pub advisory: Option<String>,
}

/// Classify a tool geometry's overhang stability.
pub fn classify(geometry: &ToolGeometry) -> StabilityInfo {
    let ld_ratio = geometry.ld_ratio();
    let class = LdClass::from_ratio(ld_ratio);
    let reduction_factor = class.reduction_factor();

    let advisory = match class {
        LdClass::Short => None,
        LdClass::Standard => Some(format!(
            "L/D {ld_ratio:.2}: standard overhang, chip load reduced by 10%"
        )),
        LdClass::Reduced => Some(format!(
            "L/D {ld_ratio:.2}: compliant setup, chip load reduced by 30%"
        )),
        LdClass::Slender => Some(format!(
            "L/D {ld_ratio:.2}: deep-reach tooling, chip load halved; \
             consider a shorter tool or reduced stickout"
        )),
    };

    StabilityInfo {
        ld_ratio,
        class,
        reduction_factor,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(dc: f64, lcf: f64) -> ToolGeometry {
        ToolGeometry {
            dc_mm: dc,
            lcf_mm: lcf,
            dcon_mm: dc,
            oal_mm: lcf + 20.0,
            nof: 2,
        }
    }

    #[test]
    fn test_boundaries_belong_to_shorter_class() {
        assert_eq!(LdClass::from_ratio(3.0), LdClass::Short);
        assert_eq!(LdClass::from_ratio(3.0 + 1e-9), LdClass::Standard);
        assert_eq!(LdClass::from_ratio(5.0), LdClass::Standard);
        assert_eq!(LdClass::from_ratio(8.0), LdClass::Reduced);
        assert_eq!(LdClass::from_ratio(8.0 + 1e-9), LdClass::Slender);
        assert_eq!(LdClass::from_ratio(25.0), LdClass::Slender);
    }

    #[test]
    fn test_reduction_monotone_in_slenderness() {
        let factors: Vec<f64> = LdClass::ALL.iter().map(|c| c.reduction_factor()).collect();
        for pair in factors.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert_eq!(factors[0], 1.0);
    }

    #[test]
    fn test_rigid_tool_has_no_advisory() {
        let info = classify(&geometry(6.0, 12.0));
        assert_eq!(info.class, LdClass::Short);
        assert_eq!(info.reduction_factor, 1.0);
        assert!(info.advisory.is_none());
    }

    #[test]
    fn test_slender_tool_classified_and_advised() {
        let info = classify(&geometry(4.0, 40.0));
        assert_eq!(info.ld_ratio, 10.0);
        assert_eq!(info.class, LdClass::Slender);
        assert_eq!(info.reduction_factor, 0.5);
        assert!(info.advisory.as_deref().unwrap().contains("L/D 10.00"));
    }
}
