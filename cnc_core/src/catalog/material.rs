//! # Workpiece Materials
//!
//! Reference data for the machinable materials the engine knows about,
//! hardness-sorted from softwood (1) to the steels (7). Each record carries
//! the physical properties the formula pipeline consumes: specific cutting
//! force `kc` for the power stage, the dry-machining feed correction, and the
//! maximum chip temperature before thermal damage.
//!
//! Records are immutable reference data; the catalog hands out shared
//! references and nothing mutates them after startup.

use serde::{Deserialize, Serialize};

/// Closed identifier for the supported workpiece materials.
///
/// Mild and stainless steel share hardness ordinal 7; the ordinal is a
/// display sort key, not a unique id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialId {
    Softwood,
    Hardwood,
    Acrylic,
    Aluminium,
    Brass,
    Copper,
    MildSteel,
    StainlessSteel,
}

/// Material grouping used by the chip-formation and thermal stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Wood,
    Plastic,
    Metal,
}

impl MaterialId {
    /// All supported materials, hardness-sorted
    pub const ALL: [MaterialId; 8] = [
        MaterialId::Softwood,
        MaterialId::Hardwood,
        MaterialId::Acrylic,
        MaterialId::Aluminium,
        MaterialId::Brass,
        MaterialId::Copper,
        MaterialId::MildSteel,
        MaterialId::StainlessSteel,
    ];

    /// Stable string id used in requests and serialized payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialId::Softwood => "softwood",
            MaterialId::Hardwood => "hardwood",
            MaterialId::Acrylic => "acrylic",
            MaterialId::Aluminium => "aluminium",
            MaterialId::Brass => "brass",
            MaterialId::Copper => "copper",
            MaterialId::MildSteel => "mild_steel",
            MaterialId::StainlessSteel => "stainless_steel",
        }
    }

    /// Ferrous materials exclude diamond coatings (carbon dissolves into iron
    /// at cutting temperature)
    pub fn is_ferrous(&self) -> bool {
        matches!(self, MaterialId::MildSteel | MaterialId::StainlessSteel)
    }

    /// Build the full reference record for this material
    pub fn record(&self) -> Material {
        match self {
            MaterialId::Softwood => Material {
                id: *self,
                name: "Softwood".to_string(),
                category: MaterialCategory::Wood,
                hardness: 1,
                color: "#f4e4c1".to_string(),
                kc_n_mm2: 40.0,
                dry_feed_factor: 1.0,
                max_temp_c: 200.0,
            },
            MaterialId::Hardwood => Material {
                id: *self,
                name: "Hardwood".to_string(),
                category: MaterialCategory::Wood,
                hardness: 2,
                color: "#8b6f47".to_string(),
                kc_n_mm2: 80.0,
                dry_feed_factor: 1.0,
                max_temp_c: 250.0,
            },
            MaterialId::Acrylic => Material {
                id: *self,
                name: "Acrylic (PMMA)".to_string(),
                category: MaterialCategory::Plastic,
                hardness: 3,
                color: "#60a5fa".to_string(),
                kc_n_mm2: 90.0,
                dry_feed_factor: 0.9,
                max_temp_c: 150.0,
            },
            MaterialId::Aluminium => Material {
                id: *self,
                name: "Aluminium 6061/7075".to_string(),
                category: MaterialCategory::Metal,
                hardness: 4,
                color: "#94a3b8".to_string(),
                kc_n_mm2: 600.0,
                dry_feed_factor: 0.85,
                max_temp_c: 400.0,
            },
            MaterialId::Brass => Material {
                id: *self,
                name: "Brass".to_string(),
                category: MaterialCategory::Metal,
                hardness: 5,
                color: "#fbbf24".to_string(),
                kc_n_mm2: 800.0,
                dry_feed_factor: 0.9,
                max_temp_c: 450.0,
            },
            MaterialId::Copper => Material {
                id: *self,
                name: "Copper".to_string(),
                category: MaterialCategory::Metal,
                hardness: 6,
                color: "#f97316".to_string(),
                kc_n_mm2: 1000.0,
                dry_feed_factor: 0.85,
                max_temp_c: 450.0,
            },
            MaterialId::MildSteel => Material {
                id: *self,
                name: "Steel (mild)".to_string(),
                category: MaterialCategory::Metal,
                hardness: 7,
                color: "#475569".to_string(),
                kc_n_mm2: 1800.0,
                dry_feed_factor: 0.7,
                max_temp_c: 600.0,
            },
            MaterialId::StainlessSteel => Material {
                id: *self,
                name: "Steel (stainless)".to_string(),
                category: MaterialCategory::Metal,
                hardness: 7,
                color: "#1e293b".to_string(),
                kc_n_mm2: 2200.0,
                dry_feed_factor: 0.65,
                max_temp_c: 700.0,
            },
        }
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full material reference record.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "aluminium",
///   "name": "Aluminium 6061/7075",
///   "category": "metal",
///   "hardness": 4,
///   "color": "#94a3b8",
///   "kc_n_mm2": 600.0,
///   "dry_feed_factor": 0.85,
///   "max_temp_c": 400.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Closed identifier
    pub id: MaterialId,

    /// Display name
    pub name: String,

    /// Grouping for chip-formation and thermal buckets
    pub category: MaterialCategory,

    /// Hardness sort ordinal, 1 (softest) to 7 (hardest)
    pub hardness: u8,

    /// Display color hex code
    pub color: String,

    /// Specific cutting force kc [N/mm2]
    pub kc_n_mm2: f64,

    /// Feed correction applied when machining dry
    pub dry_feed_factor: f64,

    /// Maximum chip temperature before thermal damage [degC]
    pub max_temp_c: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardness_ordinal_range() {
        for id in MaterialId::ALL {
            let mat = id.record();
            assert!(
                (1..=7).contains(&mat.hardness),
                "{} hardness {} out of [1,7]",
                id,
                mat.hardness
            );
        }
    }

    #[test]
    fn test_hardness_sorted() {
        let ordinals: Vec<u8> = MaterialId::ALL.iter().map(|id| id.record().hardness).collect();
        for pair in ordinals.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_ferrous_classification() {
        assert!(MaterialId::MildSteel.is_ferrous());
        assert!(MaterialId::StainlessSteel.is_ferrous());
        assert!(!MaterialId::Aluminium.is_ferrous());
        assert!(!MaterialId::Hardwood.is_ferrous());
    }

    #[test]
    fn test_kc_increases_with_hardness() {
        // Specific cutting force tracks hardness for the metals
        let alu = MaterialId::Aluminium.record();
        let steel = MaterialId::MildSteel.record();
        let stainless = MaterialId::StainlessSteel.record();
        assert!(alu.kc_n_mm2 < steel.kc_n_mm2);
        assert!(steel.kc_n_mm2 < stainless.kc_n_mm2);
    }

    #[test]
    fn test_serialization() {
        let mat = MaterialId::Brass.record();
        let json = serde_json::to_string(&mat).unwrap();
        assert!(json.contains("\"id\":\"brass\""));
        let roundtrip: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(mat, roundtrip);
    }
}
