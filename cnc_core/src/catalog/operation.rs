//! # Milling Operations
//!
//! The 12 supported milling operations, grouped into FACE, SLOT, GEOMETRY and
//! SPECIAL families. Each record carries the typical-engagement guidance the
//! pipeline uses as its base values: radial engagement as a fraction of tool
//! diameter, axial depth as a fraction of a reference length (tool diameter,
//! flute length, or picked dynamically from the L/D ratio).
//!
//! Engagement factors are guidance the pipeline starts from; hard safety
//! limits live with the validator, not here.

use serde::{Deserialize, Serialize};

/// Closed identifier for the supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationId {
    // FACE
    FaceRough,
    FaceFinish,
    // SLOT
    SlotRough,
    SlotFinish,
    SlotFull,
    SlotTrochoidal,
    // GEOMETRY
    Chamfer,
    RadiusMill,
    Pocket,
    // SPECIAL
    Contour2d,
    Contour3d,
    AdaptiveClearing,
}

/// Operation family grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationFamily {
    Face,
    Slot,
    Geometry,
    Special,
}

/// Which tool dimension the axial depth factor is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApReference {
    /// Fraction of cutting diameter DC
    Dc,
    /// Fraction of flute length LCF
    Lcf,
    /// DC below L/D 1.0, LCF at or above, at a fixed fraction of the basis
    Dynamic,
}

impl OperationId {
    /// All supported operations
    pub const ALL: [OperationId; 12] = [
        OperationId::FaceRough,
        OperationId::FaceFinish,
        OperationId::SlotRough,
        OperationId::SlotFinish,
        OperationId::SlotFull,
        OperationId::SlotTrochoidal,
        OperationId::Chamfer,
        OperationId::RadiusMill,
        OperationId::Pocket,
        OperationId::Contour2d,
        OperationId::Contour3d,
        OperationId::AdaptiveClearing,
    ];

    /// Stable string id used in requests and serialized payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationId::FaceRough => "face_rough",
            OperationId::FaceFinish => "face_finish",
            OperationId::SlotRough => "slot_rough",
            OperationId::SlotFinish => "slot_finish",
            OperationId::SlotFull => "slot_full",
            OperationId::SlotTrochoidal => "slot_trochoidal",
            OperationId::Chamfer => "chamfer",
            OperationId::RadiusMill => "radius_mill",
            OperationId::Pocket => "pocket",
            OperationId::Contour2d => "contour_2d",
            OperationId::Contour3d => "contour_3d",
            OperationId::AdaptiveClearing => "adaptive_clearing",
        }
    }

    /// Build the full reference record for this operation
    pub fn record(&self) -> Operation {
        match self {
            OperationId::FaceRough => Operation::new(
                *self,
                "Face Milling (Roughing)",
                "Rough facing of large flat surfaces",
                OperationFamily::Face,
                0.25,
                0.25,
                ApReference::Dc,
                1.0,
                true,
            ),
            OperationId::FaceFinish => Operation::new(
                *self,
                "Face Milling (Finishing)",
                "Finish facing for surface quality",
                OperationFamily::Face,
                0.25,
                0.15,
                ApReference::Dc,
                0.85,
                false,
            ),
            OperationId::SlotRough => Operation::new(
                *self,
                "Slot Milling (Roughing)",
                "Roughing of slots at full width",
                OperationFamily::Slot,
                1.0,
                0.30,
                ApReference::Dynamic,
                1.0,
                true,
            ),
            OperationId::SlotFinish => Operation::new(
                *self,
                "Slot Milling (Finishing)",
                "Finishing pass along slot walls and floor",
                OperationFamily::Slot,
                1.0,
                0.15,
                ApReference::Dynamic,
                0.85,
                false,
            ),
            OperationId::SlotFull => Operation::new(
                *self,
                "Full Slotting",
                "Full slot width at maximum depth",
                OperationFamily::Slot,
                1.0,
                0.50,
                ApReference::Dc,
                1.0,
                true,
            ),
            OperationId::SlotTrochoidal => Operation::new(
                *self,
                "Trochoidal Slotting",
                "Circular-interpolated slotting with light radial load",
                OperationFamily::Slot,
                0.10,
                0.50,
                ApReference::Lcf,
                1.1,
                true,
            ),
            OperationId::Chamfer => Operation::new(
                *self,
                "Chamfering",
                "Edge breaking and chamfer cuts",
                OperationFamily::Geometry,
                0.05,
                0.10,
                ApReference::Dc,
                0.9,
                false,
            ),
            OperationId::RadiusMill => Operation::new(
                *self,
                "Radius Milling",
                "Inside/outside radius profiling",
                OperationFamily::Geometry,
                0.05,
                0.15,
                ApReference::Dc,
                0.9,
                false,
            ),
            OperationId::Pocket => Operation::new(
                *self,
                "Pocket Milling",
                "Closed pocket clearing",
                OperationFamily::Geometry,
                0.40,
                0.20,
                ApReference::Dynamic,
                1.0,
                true,
            ),
            OperationId::Contour2d => Operation::new(
                *self,
                "2D Contouring",
                "Profile cuts along 2D contours",
                OperationFamily::Special,
                0.10,
                0.15,
                ApReference::Dynamic,
                0.9,
                false,
            ),
            OperationId::Contour3d => Operation::new(
                *self,
                "3D Contouring",
                "3D finishing along freeform surfaces",
                OperationFamily::Special,
                0.10,
                0.10,
                ApReference::Dynamic,
                0.9,
                false,
            ),
            OperationId::AdaptiveClearing => Operation::new(
                *self,
                "Adaptive Clearing",
                "Adaptive roughing with controlled engagement",
                OperationFamily::Special,
                0.40,
                0.30,
                ApReference::Lcf,
                1.1,
                true,
            ),
        }
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full operation reference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Closed identifier
    pub id: OperationId,

    /// Display name
    pub name: String,

    /// Short description for catalog listings
    pub description: String,

    /// Family grouping
    pub family: OperationFamily,

    /// Typical radial engagement as a fraction of DC
    pub ae_factor: f64,

    /// Typical axial depth as a fraction of the ap reference length
    pub ap_factor: f64,

    /// Which tool dimension ap_factor applies to
    pub ap_reference: ApReference,

    /// Feed-per-tooth modifier for this operation
    pub fz_factor: f64,

    /// Roughing operations get the slender-tool validation check
    pub is_roughing: bool,
}

impl Operation {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: OperationId,
        name: &str,
        description: &str,
        family: OperationFamily,
        ae_factor: f64,
        ap_factor: f64,
        ap_reference: ApReference,
        fz_factor: f64,
        is_roughing: bool,
    ) -> Self {
        Operation {
            id,
            name: name.to_string(),
            description: description.to_string(),
            family,
            ae_factor,
            ap_factor,
            ap_reference,
            fz_factor,
            is_roughing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_operations_have_records() {
        for id in OperationId::ALL {
            let op = id.record();
            assert_eq!(op.id, id);
            assert!(op.ae_factor > 0.0 && op.ae_factor <= 1.0);
            assert!(op.ap_factor > 0.0 && op.ap_factor <= 1.0);
            assert!(op.fz_factor > 0.0);
        }
    }

    #[test]
    fn test_finishing_is_lighter_than_roughing() {
        let rough = OperationId::FaceRough.record();
        let finish = OperationId::FaceFinish.record();
        assert!(finish.ap_factor < rough.ap_factor);
        assert!(finish.fz_factor < rough.fz_factor);
        assert!(!finish.is_roughing);
        assert!(rough.is_roughing);
    }

    #[test]
    fn test_trochoidal_light_radial_deep_axial() {
        let op = OperationId::SlotTrochoidal.record();
        assert!(op.ae_factor <= 0.10);
        assert_eq!(op.ap_reference, ApReference::Lcf);
    }

    #[test]
    fn test_serialization() {
        let op = OperationId::Pocket.record();
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("\"id\":\"pocket\""));
        assert!(json.contains("\"ap_reference\":\"dynamic\""));
        let roundtrip: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, roundtrip);
    }
}
