//! # Reference Tables
//!
//! Baseline cutting data keyed by workpiece material and tool type, plus the
//! machine envelope. Every lookup returns `CalcResult`: a pairing the tables
//! do not cover is a [`CalcError::Lookup`] carrying the table name and the
//! offending key, never a silently substituted default.

use serde::{Deserialize, Serialize};

use crate::catalog::{MaterialId, Operation, ToolType};
use crate::errors::{CalcError, CalcResult};

/// Lower clamp for feed per tooth [mm]
pub const FZ_MIN_MM: f64 = 0.01;

/// Upper clamp for feed per tooth [mm]
pub const FZ_MAX_MM: f64 = 0.5;

/// Spindle and drive envelope the results are validated against.
///
/// The defaults describe a 700 W trim-router class spindle, the smallest
/// machine the reference data was gathered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineLimits {
    /// Maximum spindle speed [1/min]
    pub max_rpm: f64,

    /// Rated continuous spindle power [kW]
    pub max_power_kw: f64,

    /// Rated spindle torque [Nm], if the machine documents one
    pub max_torque_nm: Option<f64>,

    /// Feed-rate band the drives can hold accurately [mm/min]
    pub min_feed_mm_min: f64,
    pub max_feed_mm_min: f64,
}

impl Default for MachineLimits {
    fn default() -> Self {
        MachineLimits {
            max_rpm: 30_000.0,
            max_power_kw: 0.7,
            max_torque_nm: None,
            min_feed_mm_min: 10.0,
            max_feed_mm_min: 5_000.0,
        }
    }
}

/// Baseline cutting speed [m/min] for a material under a flat end mill.
///
/// These are HSS-referenced values for hobby-class rigidity; coating and
/// tool-type scaling are applied on top by the lookup functions.
fn base_cutting_speed(material: MaterialId) -> f64 {
    match material {
        MaterialId::Softwood => 1000.0,
        MaterialId::Hardwood => 800.0,
        MaterialId::Acrylic => 600.0,
        MaterialId::Aluminium => 377.0,
        MaterialId::Brass => 200.0,
        MaterialId::Copper => 150.0,
        MaterialId::MildSteel => 150.0,
        MaterialId::StainlessSteel => 80.0,
    }
}

/// Base cutting speed [m/min] for a material/tool-type pairing.
///
/// Ball end mills run slower because the effective diameter near the tip is
/// smaller than DC; face mills run faster on their rigid short gauge length.
/// Drilling data exists for free-machining materials only; steels under a
/// drill are an uncovered pairing and surface as a lookup error.
pub fn cutting_speed(material: MaterialId, tool_type: ToolType) -> CalcResult<f64> {
    let scale = match tool_type {
        ToolType::FlatEndMill | ToolType::BullNoseEndMill => Some(1.0),
        ToolType::BallEndMill => Some(0.8),
        ToolType::FaceMill => Some(1.2),
        ToolType::ChamferMill => Some(0.9),
        ToolType::Drill => match material {
            MaterialId::MildSteel | MaterialId::StainlessSteel => None,
            _ => Some(0.6),
        },
    };

    scale
        .map(|s| base_cutting_speed(material) * s)
        .ok_or_else(|| {
            CalcError::lookup(
                "cutting_speed",
                format!("{}/{}", material.as_str(), tool_type.as_str()),
            )
        })
}

/// Feed coefficient k in fz = k * sqrt(DC), per material [mm/sqrt(mm)].
fn feed_coefficient(material: MaterialId) -> f64 {
    match material {
        MaterialId::Softwood => 0.15,
        MaterialId::Hardwood => 0.12,
        MaterialId::Acrylic => 0.10,
        MaterialId::Aluminium => 0.08,
        MaterialId::Brass => 0.07,
        MaterialId::Copper => 0.07,
        MaterialId::MildSteel => 0.05,
        MaterialId::StainlessSteel => 0.04,
    }
}

/// Tool-type scaling on the feed coefficient. Ball and chamfer geometries
/// take thinner chips; drilling feed is tabulated for the same pairings as
/// drilling speed.
fn feed_scale(material: MaterialId, tool_type: ToolType) -> Option<f64> {
    match tool_type {
        ToolType::FlatEndMill | ToolType::BullNoseEndMill | ToolType::FaceMill => Some(1.0),
        ToolType::BallEndMill => Some(0.7),
        ToolType::ChamferMill => Some(0.8),
        ToolType::Drill => match material {
            MaterialId::MildSteel | MaterialId::StainlessSteel => None,
            _ => Some(0.5),
        },
    }
}

/// Baseline feed per tooth [mm] for a material, tool and operation.
///
/// fz grows with the square root of the diameter (larger cores take bigger
/// chips), is shaped by the operation's feed aggressiveness, and is clamped
/// to the [`FZ_MIN_MM`], [`FZ_MAX_MM`] band the tables are valid in.
pub fn feed_per_tooth(
    material: MaterialId,
    tool_type: ToolType,
    operation: &Operation,
    dc_mm: f64,
) -> CalcResult<f64> {
    let scale = feed_scale(material, tool_type).ok_or_else(|| {
        CalcError::lookup(
            "feed_per_tooth",
            format!("{}/{}", material.as_str(), tool_type.as_str()),
        )
    })?;

    let fz = feed_coefficient(material) * scale * dc_mm.sqrt() * operation.fz_factor;
    Ok(fz.clamp(FZ_MIN_MM, FZ_MAX_MM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OperationId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cutting_speed_known_pairs() {
        assert_eq!(
            cutting_speed(MaterialId::Aluminium, ToolType::FlatEndMill).unwrap(),
            377.0
        );
        assert_eq!(
            cutting_speed(MaterialId::StainlessSteel, ToolType::FlatEndMill).unwrap(),
            80.0
        );
    }

    #[test]
    fn test_cutting_speed_uncovered_pair_is_lookup_error() {
        let err = cutting_speed(MaterialId::StainlessSteel, ToolType::Drill).unwrap_err();
        match err {
            CalcError::Lookup { table, key } => {
                assert_eq!(table, "cutting_speed");
                assert_eq!(key, "stainless_steel/drill");
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn test_cutting_speed_ordering_follows_machinability() {
        let order = [
            MaterialId::Softwood,
            MaterialId::Hardwood,
            MaterialId::Acrylic,
            MaterialId::Aluminium,
            MaterialId::Brass,
            MaterialId::StainlessSteel,
        ];
        let speeds: Vec<f64> = order
            .iter()
            .map(|m| cutting_speed(*m, ToolType::FlatEndMill).unwrap())
            .collect();
        for pair in speeds.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_feed_per_tooth_scales_with_diameter() {
        let op = OperationId::SlotRough.record();
        let fz6 =
            feed_per_tooth(MaterialId::Aluminium, ToolType::FlatEndMill, &op, 6.0).unwrap();
        let fz12 =
            feed_per_tooth(MaterialId::Aluminium, ToolType::FlatEndMill, &op, 12.0).unwrap();
        assert!(fz12 > fz6);
        // 0.08 * sqrt(6) * 1.0
        assert!((fz6 - 0.08 * 6.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_feed_per_tooth_clamped() {
        let op = OperationId::SlotRough.record();
        // Tiny engraving cutter in stainless lands below the table floor.
        let fz = feed_per_tooth(
            MaterialId::StainlessSteel,
            ToolType::BallEndMill,
            &op,
            0.05,
        )
        .unwrap();
        assert_eq!(fz, FZ_MIN_MM);

        // Oversized softwood hog clamps at the ceiling.
        let fz = feed_per_tooth(MaterialId::Softwood, ToolType::FaceMill, &op, 50.0).unwrap();
        assert_eq!(fz, FZ_MAX_MM);
    }

    #[test]
    fn test_machine_limits_default_envelope() {
        let limits = MachineLimits::default();
        assert_eq!(limits.max_rpm, 30_000.0);
        assert_eq!(limits.max_power_kw, 0.7);
        assert!(limits.min_feed_mm_min < limits.max_feed_mm_min);
    }
}
