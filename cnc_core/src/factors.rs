//! # Process Multipliers
//!
//! The named multiplicative stages applied to the three base quantities of a
//! cut (cutting speed, feed per tooth, engagement). Keeping every stage here
//! as a closed enum with a `factor()` accessor makes the order of application
//! a single source of truth in the pipeline and each stage independently
//! testable.
//!
//! ## Stage Summary
//!
//! | Stage             | Applies to | Typical values |
//! |-------------------|------------|----------------|
//! | Coating           | vc         | 1.0 - 2.2      |
//! | Coolant (feed)    | fz         | 0.65 - 1.0     |
//! | Surface quality   | ae, ap     | 0.55 - 1.0     |
//! | Expert adjustment | fz, ae, ap | 0.5 - 1.5      |
//! | Stability (L/D)   | fz, ae, ap | 0.5 - 1.0      |
//!
//! Order of application is fixed: coating on speed; then coolant on feed;
//! surface quality on engagement; the expert multiplier and overrides; and
//! stability reduction last, before any MRR/power/torque/thermal derivation.

use serde::{Deserialize, Serialize};

use crate::catalog::Material;

/// Reduced-feed fraction for the entry move (share of steady-state vf)
pub const ENTRY_FEED_FRACTION: f64 = 0.5;

/// Reduced-feed fraction for ramping moves
pub const RAMP_FEED_FRACTION: f64 = 0.5;

/// Reduced-feed fraction for straight plunging, the most conservative move
pub const PLUNGE_FEED_FRACTION: f64 = 0.25;

/// Tool coating selection. Coatings raise the sustainable cutting speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Coating {
    /// Uncoated tool: 1.0
    #[default]
    None,

    /// Titanium nitride: +40%
    Tin,

    /// Titanium aluminium nitride: +60%
    Tialn,

    /// Aluminium titanium nitride: +80%
    Altin,

    /// Diamond (PCD/DLC): +120%, non-ferrous materials only
    Diamond,

    /// Solid/coated carbide upgrade over HSS baseline: +50%
    Carbide,
}

impl Coating {
    /// All coating variants for UI selection
    pub const ALL: [Coating; 6] = [
        Coating::None,
        Coating::Tin,
        Coating::Tialn,
        Coating::Altin,
        Coating::Diamond,
        Coating::Carbide,
    ];

    /// Cutting-speed multiplier for this coating
    pub fn factor(&self) -> f64 {
        match self {
            Coating::None => 1.0,
            Coating::Tin => 1.4,
            Coating::Tialn => 1.6,
            Coating::Altin => 1.8,
            Coating::Diamond => 2.2,
            Coating::Carbide => 1.5,
        }
    }

    /// Diamond dissolves into iron at cutting temperature, so it is limited
    /// to non-ferrous workpieces.
    pub fn allowed_for(&self, material: &Material) -> bool {
        match self {
            Coating::Diamond => !material.id.is_ferrous(),
            _ => true,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Coating::None => "Uncoated (1.00)",
            Coating::Tin => "TiN (1.40)",
            Coating::Tialn => "TiAlN (1.60)",
            Coating::Altin => "AlTiN (1.80)",
            Coating::Diamond => "Diamond (2.20)",
            Coating::Carbide => "Carbide (1.50)",
        }
    }
}

impl std::fmt::Display for Coating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Surface-quality target. Finer targets reduce engagement so the final
/// pass leaves less tool deflection witness on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceQuality {
    /// Maximum removal, surface finish secondary
    Roughing,

    /// Default balanced target
    #[default]
    Standard,

    /// Finishing pass: -25% engagement
    Finishing,

    /// High finish: -45% engagement
    HighFinish,
}

impl SurfaceQuality {
    /// All surface-quality variants for UI selection
    pub const ALL: [SurfaceQuality; 4] = [
        SurfaceQuality::Roughing,
        SurfaceQuality::Standard,
        SurfaceQuality::Finishing,
        SurfaceQuality::HighFinish,
    ];

    /// Engagement multiplier applied to both ae and ap
    pub fn engagement_factor(&self) -> f64 {
        match self {
            SurfaceQuality::Roughing => 1.0,
            SurfaceQuality::Standard => 1.0,
            SurfaceQuality::Finishing => 0.75,
            SurfaceQuality::HighFinish => 0.55,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceQuality::Roughing => "Roughing",
            SurfaceQuality::Standard => "Standard",
            SurfaceQuality::Finishing => "Finishing",
            SurfaceQuality::HighFinish => "High Finish",
        }
    }
}

impl std::fmt::Display for SurfaceQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Coolant delivery. Dry machining reduces the sustainable feed per tooth
/// (material-specific) and leaves chip heat uncarried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Coolant {
    /// Flood coolant
    #[default]
    Wet,

    /// No coolant
    Dry,

    /// Minimum-quantity lubrication
    Mql,
}

impl Coolant {
    /// All coolant variants for UI selection
    pub const ALL: [Coolant; 3] = [Coolant::Wet, Coolant::Dry, Coolant::Mql];

    /// Feed-per-tooth multiplier. Only dry machining derates feed, by the
    /// material's documented dry correction.
    pub fn feed_factor(&self, material: &Material) -> f64 {
        match self {
            Coolant::Dry => material.dry_feed_factor,
            Coolant::Wet | Coolant::Mql => 1.0,
        }
    }

    /// Chip-temperature multiplier
    pub fn temperature_factor(&self) -> f64 {
        match self {
            Coolant::Wet => 0.7,
            Coolant::Mql => 0.85,
            Coolant::Dry => 1.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Coolant::Wet => "Flood",
            Coolant::Dry => "Dry",
            Coolant::Mql => "MQL",
        }
    }
}

impl std::fmt::Display for Coolant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MaterialId;

    #[test]
    fn test_coating_factors_positive_and_ordered() {
        for coating in Coating::ALL {
            assert!(coating.factor() > 0.0);
        }
        assert!(Coating::Tin.factor() < Coating::Tialn.factor());
        assert!(Coating::Tialn.factor() < Coating::Altin.factor());
        assert!(Coating::Altin.factor() < Coating::Diamond.factor());
    }

    #[test]
    fn test_diamond_ferrous_restriction() {
        let steel = MaterialId::MildSteel.record();
        let alu = MaterialId::Aluminium.record();
        assert!(!Coating::Diamond.allowed_for(&steel));
        assert!(Coating::Diamond.allowed_for(&alu));
        assert!(Coating::Tialn.allowed_for(&steel));
    }

    #[test]
    fn test_surface_quality_monotone() {
        let factors: Vec<f64> = SurfaceQuality::ALL
            .iter()
            .map(|q| q.engagement_factor())
            .collect();
        for pair in factors.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert!(factors.iter().all(|f| *f > 0.0 && *f <= 1.0));
    }

    #[test]
    fn test_dry_machining_derates_feed() {
        let stainless = MaterialId::StainlessSteel.record();
        assert_eq!(Coolant::Dry.feed_factor(&stainless), 0.65);
        assert_eq!(Coolant::Wet.feed_factor(&stainless), 1.0);
        assert_eq!(Coolant::Mql.feed_factor(&stainless), 1.0);
    }

    #[test]
    fn test_coolant_cools() {
        assert!(Coolant::Wet.temperature_factor() < Coolant::Mql.temperature_factor());
        assert!(Coolant::Mql.temperature_factor() < Coolant::Dry.temperature_factor());
    }

    #[test]
    fn test_plunge_most_conservative() {
        assert!(PLUNGE_FEED_FRACTION < ENTRY_FEED_FRACTION);
        assert!(ENTRY_FEED_FRACTION <= 1.0);
        assert!(RAMP_FEED_FRACTION <= 1.0);
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(serde_json::to_string(&Coating::None).unwrap(), "\"none\"");
        assert_eq!(
            serde_json::to_string(&SurfaceQuality::HighFinish).unwrap(),
            "\"high_finish\""
        );
        assert_eq!(serde_json::to_string(&Coolant::Mql).unwrap(), "\"mql\"");
    }
}
