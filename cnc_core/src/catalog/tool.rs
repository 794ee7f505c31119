//! # Cutting Tools
//!
//! Tool identity, type classification and geometry. Tools are owned by the
//! catalog and referenced by id from calculation requests; once registered
//! they are never mutated.
//!
//! Geometry field names follow the usual tool-library abbreviations:
//! DC cutting diameter, LCF flute (cutting) length, DCON connection diameter,
//! OAL overall length, NOF number of flutes.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Tool type classification, matching common tool-library type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    FlatEndMill,
    BallEndMill,
    BullNoseEndMill,
    FaceMill,
    ChamferMill,
    Drill,
}

impl ToolType {
    /// Stable string id used in serialized payloads and table keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::FlatEndMill => "flat_end_mill",
            ToolType::BallEndMill => "ball_end_mill",
            ToolType::BullNoseEndMill => "bull_nose_end_mill",
            ToolType::FaceMill => "face_mill",
            ToolType::ChamferMill => "chamfer_mill",
            ToolType::Drill => "drill",
        }
    }
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tool geometry parameters, millimeters throughout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolGeometry {
    /// Cutting diameter DC [mm]
    pub dc_mm: f64,

    /// Flute (cutting) length LCF [mm]
    pub lcf_mm: f64,

    /// Connection diameter DCON [mm]
    pub dcon_mm: f64,

    /// Overall length OAL [mm]
    pub oal_mm: f64,

    /// Number of flutes NOF
    pub nof: u8,
}

impl ToolGeometry {
    /// Length-to-diameter ratio LCF / DC, the deflection/chatter proxy
    pub fn ld_ratio(&self) -> f64 {
        self.lcf_mm / self.dc_mm
    }

    /// Reject physically impossible geometry before any derivation starts
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("dc_mm", self.dc_mm),
            ("lcf_mm", self.lcf_mm),
            ("dcon_mm", self.dcon_mm),
            ("oal_mm", self.oal_mm),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_geometry(
                    field,
                    value,
                    "dimension must be a finite number",
                ));
            }
        }
        if self.dc_mm <= 0.0 {
            return Err(CalcError::invalid_geometry(
                "dc_mm",
                self.dc_mm,
                "cutting diameter must be positive",
            ));
        }
        if self.lcf_mm <= 0.0 {
            return Err(CalcError::invalid_geometry(
                "lcf_mm",
                self.lcf_mm,
                "flute length must be positive",
            ));
        }
        if self.nof == 0 {
            return Err(CalcError::invalid_geometry(
                "nof",
                f64::from(self.nof),
                "tool must have at least one flute",
            ));
        }
        if self.oal_mm < self.lcf_mm {
            return Err(CalcError::invalid_geometry(
                "oal_mm",
                self.oal_mm,
                "overall length cannot be shorter than flute length",
            ));
        }
        Ok(())
    }
}

/// Manufacturer or user-supplied parameter hint, scoped to one
/// material/operation pairing. Consulted by the feed-per-tooth validation
/// check when present; never required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPreset {
    /// Preset display name, e.g. "Alu - Finishing"
    pub name: String,

    /// Material id this preset applies to
    pub material: String,

    /// Operation id this preset applies to
    pub operation: String,

    /// Recommended feed-per-tooth lower bound [mm]
    pub fz_min_mm: Option<f64>,

    /// Recommended feed-per-tooth upper bound [mm]
    pub fz_max_mm: Option<f64>,
}

/// A cutting tool as registered in the catalog.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "T1",
///   "name": "6mm 2F Carbide End Mill",
///   "tool_type": "flat_end_mill",
///   "geometry": { "dc_mm": 6.0, "lcf_mm": 18.0, "dcon_mm": 6.0, "oal_mm": 50.0, "nof": 2 },
///   "presets": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool id, e.g. "T1"
    pub id: String,

    /// Display name
    pub name: String,

    /// Type classification
    pub tool_type: ToolType,

    /// Physical geometry
    pub geometry: ToolGeometry,

    /// Optional material/operation-scoped parameter hints
    #[serde(default)]
    pub presets: Vec<ToolPreset>,
}

impl Tool {
    /// Find a preset matching the given material and operation ids
    pub fn preset_for(&self, material: &str, operation: &str) -> Option<&ToolPreset> {
        self.presets
            .iter()
            .find(|p| p.material == material && p.operation == operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tool() -> Tool {
        Tool {
            id: "T1".to_string(),
            name: "10mm 3F End Mill".to_string(),
            tool_type: ToolType::FlatEndMill,
            geometry: ToolGeometry {
                dc_mm: 10.0,
                lcf_mm: 30.0,
                dcon_mm: 10.0,
                oal_mm: 72.0,
                nof: 3,
            },
            presets: vec![],
        }
    }

    #[test]
    fn test_ld_ratio_exact() {
        let tool = test_tool();
        assert_eq!(tool.geometry.ld_ratio(), 3.0);
    }

    #[test]
    fn test_geometry_validation() {
        let mut tool = test_tool();
        assert!(tool.geometry.validate().is_ok());

        tool.geometry.dc_mm = 0.0;
        assert!(matches!(
            tool.geometry.validate(),
            Err(CalcError::InvalidGeometry { .. })
        ));

        let mut tool = test_tool();
        tool.geometry.nof = 0;
        assert!(tool.geometry.validate().is_err());

        let mut tool = test_tool();
        tool.geometry.oal_mm = 10.0;
        assert!(tool.geometry.validate().is_err());
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        // NaN and infinity alike must never reach the derivation.
        for (field, value) in [("lcf_mm", f64::NAN), ("lcf_mm", f64::INFINITY)] {
            let mut tool = test_tool();
            tool.geometry.lcf_mm = value;
            match tool.geometry.validate() {
                Err(CalcError::InvalidGeometry { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected invalid geometry for {field} = {value}, got {other:?}"),
            }
        }

        let mut tool = test_tool();
        tool.geometry.dc_mm = f64::NAN;
        assert!(tool.geometry.validate().is_err());

        let mut tool = test_tool();
        tool.geometry.oal_mm = f64::NEG_INFINITY;
        assert!(tool.geometry.validate().is_err());
    }

    #[test]
    fn test_preset_lookup() {
        let mut tool = test_tool();
        tool.presets.push(ToolPreset {
            name: "Alu - Finishing".to_string(),
            material: "aluminium".to_string(),
            operation: "slot_finish".to_string(),
            fz_min_mm: Some(0.02),
            fz_max_mm: Some(0.12),
        });

        assert!(tool.preset_for("aluminium", "slot_finish").is_some());
        assert!(tool.preset_for("aluminium", "slot_rough").is_none());
        assert!(tool.preset_for("brass", "slot_finish").is_none());
    }

    #[test]
    fn test_serialization() {
        let tool = test_tool();
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("\"tool_type\":\"flat_end_mill\""));
        let roundtrip: Tool = serde_json::from_str(&json).unwrap();
        assert_eq!(tool, roundtrip);
    }
}
