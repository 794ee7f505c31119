//! # Derivation Pipeline
//!
//! Turns a cut setup (tool, material, operation, process choices) into a
//! full parameter set: spindle speed, feeds, engagement, load, thermal and
//! chip-formation figures.
//!
//! The multiplier chain runs in a fixed order; when a trace is requested,
//! every stage is logged in it:
//!
//! 1. coating on cutting speed
//! 2. coolant correction on feed per tooth
//! 3. surface quality on engagement
//! 4. expert slider, then expert overrides
//! 5. stability derate on fz, ae and ap
//!
//! All load and thermal figures (MRR, power, torque, chip temperature) are
//! derived from the post-derate values, never from intermediate ones.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::catalog::{ApReference, Material, MaterialCategory, Operation, Tool};
use crate::errors::{CalcError, CalcResult};
use crate::expert::ExpertSettings;
use crate::factors::{
    Coating, Coolant, SurfaceQuality, ENTRY_FEED_FRACTION, PLUNGE_FEED_FRACTION,
    RAMP_FEED_FRACTION,
};
use crate::stability::{self, StabilityInfo};
use crate::tables;

/// Torque constant: P [kW] * 9549 / n [1/min] = M [Nm]
const TORQUE_CONSTANT: f64 = 9549.0;

/// Fraction of the dynamic axial-depth reference used as base ap
const DYNAMIC_AP_FRACTION: f64 = 0.1875;

/// One cut to derive parameters for.
#[derive(Debug, Clone, Copy)]
pub struct CutSetup<'a> {
    pub tool: &'a Tool,
    pub material: &'a Material,
    pub operation: &'a Operation,
    pub coating: Coating,
    pub surface_quality: SurfaceQuality,
    pub coolant: Coolant,
}

/// Predicted chip morphology for the material/chip-load combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipFormation {
    /// Fine particles, wood at low chip load; a respiratory hazard
    Dust,

    /// Broken crumbs, metals below minimum chip thickness
    Discontinuous,

    /// Shear-localized segments, the desirable regime for most milling
    Segmented,

    /// Unbroken ribbon chips; plastics always, metals at high chip load
    Continuous,
}

impl ChipFormation {
    /// Predict the chip type from workpiece category and final chip load.
    pub fn predict(category: MaterialCategory, fz_mm: f64) -> ChipFormation {
        match category {
            MaterialCategory::Wood => {
                if fz_mm < 0.05 {
                    ChipFormation::Dust
                } else {
                    ChipFormation::Segmented
                }
            }
            MaterialCategory::Plastic => ChipFormation::Continuous,
            MaterialCategory::Metal => {
                if fz_mm < 0.05 {
                    ChipFormation::Discontinuous
                } else if fz_mm < 0.15 {
                    ChipFormation::Segmented
                } else {
                    ChipFormation::Continuous
                }
            }
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ChipFormation::Dust => "Dust",
            ChipFormation::Discontinuous => "Discontinuous",
            ChipFormation::Segmented => "Segmented",
            ChipFormation::Continuous => "Continuous",
        }
    }
}

/// Programmed feed rates for the different move types [mm/min].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedRates {
    /// Steady-state cutting feed
    pub vf_mm_min: f64,

    /// First engagement into material
    pub entry_mm_min: f64,

    /// Helical or linear ramping
    pub ramp_mm_min: f64,

    /// Straight axial plunge
    pub plunge_mm_min: f64,
}

/// One applied multiplier stage of the derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Quantity the stage acted on, e.g. "fz"
    pub quantity: String,

    /// Stage name, e.g. "surface_quality"
    pub stage: String,

    /// Effective multiplier (after / before)
    pub factor: f64,

    /// Value after the stage
    pub value: f64,
}

/// Complete derived parameter set for one cut.
///
/// ```json
/// {
///   "vc_base_m_min": 377.0,
///   "coating_factor": 1.6,
///   "vc_m_min": 603.2,
///   "n_rpm": 32010.0,
///   "fz_base_mm": 0.196,
///   "coolant_factor": 1.0,
///   "fz_mm": 0.196,
///   "ae_mm": 6.0,
///   "ap_mm": 1.8,
///   "ap_reference": "lcf",
///   "surface_quality_factor": 1.0,
///   "feeds": { "vf_mm_min": 12547.9, "...": 0 },
///   "mrr_cm3_min": 135.5,
///   "power_kw": 1.58,
///   "torque_nm": 0.47,
///   "chip_temperature_c": 132.4,
///   "chip_formation": "continuous",
///   "stability": { "ld_ratio": 3.17, "class": "standard", "...": 0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Tabulated cutting speed before coating [m/min]
    pub vc_base_m_min: f64,

    /// Coating multiplier applied to the base speed
    pub coating_factor: f64,

    /// Final cutting speed [m/min]
    pub vc_m_min: f64,

    /// Spindle speed, rounded to whole revolutions [1/min]
    pub n_rpm: f64,

    /// Tabulated feed per tooth before corrections [mm]
    pub fz_base_mm: f64,

    /// Coolant multiplier applied to the base feed
    pub coolant_factor: f64,

    /// Final feed per tooth [mm]
    pub fz_mm: f64,

    /// Final radial engagement [mm]
    pub ae_mm: f64,

    /// Final axial depth of cut [mm]
    pub ap_mm: f64,

    /// Dimension the axial depth was referenced to
    pub ap_reference: ApReference,

    /// Engagement multiplier for the surface-quality target
    pub surface_quality_factor: f64,

    /// Programmed feed rates
    pub feeds: FeedRates,

    /// Material removal rate [cm3/min]
    pub mrr_cm3_min: f64,

    /// Cutting power at the spindle [kW]
    pub power_kw: f64,

    /// Spindle torque [Nm]
    pub torque_nm: f64,

    /// Estimated chip temperature [C]
    pub chip_temperature_c: f64,

    /// Predicted chip morphology
    pub chip_formation: ChipFormation,

    /// Overhang classification and the derate that was applied
    pub stability: StabilityInfo,

    /// Ordered log of every multiplier stage, present when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceStep>>,
}

fn push_stage(trace: &mut Vec<TraceStep>, quantity: &str, stage: &str, before: f64, after: f64) {
    trace.push(TraceStep {
        quantity: quantity.to_owned(),
        stage: stage.to_owned(),
        factor: if before != 0.0 { after / before } else { 0.0 },
        value: after,
    });
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Derive the full parameter set for a cut. The per-stage trace is carried
/// in the result only when `include_trace` is set.
///
/// Fails on uncovered table pairings, a coating the workpiece cannot take,
/// invalid expert settings, and geometry that produces no usable spindle
/// speed.
pub fn derive(
    cut: &CutSetup<'_>,
    expert: &ExpertSettings,
    include_trace: bool,
) -> CalcResult<ParameterSet> {
    let geometry = &cut.tool.geometry;
    geometry.validate()?;
    expert.validate()?;

    if !cut.coating.allowed_for(cut.material) {
        return Err(CalcError::invalid_input(
            "coating",
            cut.coating.display_name(),
            format!(
                "{} cannot be used on {}; non-ferrous workpieces only",
                cut.coating.display_name(),
                cut.material.name
            ),
        ));
    }

    let mut trace = Vec::new();

    // Cutting speed and spindle speed
    let vc_base = tables::cutting_speed(cut.material.id, cut.tool.tool_type)?;
    let coating_factor = cut.coating.factor();
    let vc = vc_base * coating_factor;
    push_stage(&mut trace, "vc", "coating", vc_base, vc);

    let n_rpm = (vc * 1000.0 / (PI * geometry.dc_mm)).round();
    if !n_rpm.is_finite() || n_rpm < 1.0 {
        return Err(CalcError::degenerate(
            "spindle_speed",
            format!(
                "vc {vc:.1} m/min over DC {:.1} mm rounds to zero RPM",
                geometry.dc_mm
            ),
        ));
    }

    // Feed per tooth with coolant correction
    let fz_base = tables::feed_per_tooth(
        cut.material.id,
        cut.tool.tool_type,
        cut.operation,
        geometry.dc_mm,
    )?;
    let coolant_factor = cut.coolant.feed_factor(cut.material);
    let mut fz = fz_base * coolant_factor;
    push_stage(&mut trace, "fz", "coolant", fz_base, fz);

    // Engagement with surface-quality adjustment
    let ae_base = geometry.dc_mm * cut.operation.ae_factor;
    let (ap_base, ap_reference) = match cut.operation.ap_reference {
        ApReference::Dc => (geometry.dc_mm * cut.operation.ap_factor, ApReference::Dc),
        ApReference::Lcf => (geometry.lcf_mm * cut.operation.ap_factor, ApReference::Lcf),
        ApReference::Dynamic => {
            if geometry.ld_ratio() < 1.0 {
                (geometry.dc_mm * DYNAMIC_AP_FRACTION, ApReference::Dc)
            } else {
                (geometry.lcf_mm * DYNAMIC_AP_FRACTION, ApReference::Lcf)
            }
        }
    };

    let quality = cut.surface_quality.engagement_factor();
    let mut ae = ae_base * quality;
    let mut ap = ap_base * quality;
    push_stage(&mut trace, "ae", "surface_quality", ae_base, ae);
    push_stage(&mut trace, "ap", "surface_quality", ap_base, ap);

    // Expert slider and overrides
    let (fz_x, ae_x, ap_x) = expert.apply(fz, ae, ap);
    push_stage(&mut trace, "fz", "expert", fz, fz_x);
    push_stage(&mut trace, "ae", "expert", ae, ae_x);
    push_stage(&mut trace, "ap", "expert", ap, ap_x);
    (fz, ae, ap) = (fz_x, ae_x, ap_x);

    // Stability derate, always last
    let stability_info = stability::classify(geometry);
    let derate = stability_info.reduction_factor;
    push_stage(&mut trace, "fz", "stability", fz, fz * derate);
    push_stage(&mut trace, "ae", "stability", ae, ae * derate);
    push_stage(&mut trace, "ap", "stability", ap, ap * derate);
    fz *= derate;
    ae = round_to(ae * derate, 3);
    ap = round_to(ap * derate, 3);

    // Feed rates
    let vf = fz * n_rpm * f64::from(geometry.nof);
    let feeds = FeedRates {
        vf_mm_min: vf,
        entry_mm_min: vf * ENTRY_FEED_FRACTION,
        ramp_mm_min: vf * RAMP_FEED_FRACTION,
        plunge_mm_min: vf * PLUNGE_FEED_FRACTION,
    };

    // Load figures from the final parameters
    let mrr = ae * ap * vf / 1000.0;
    let power_kw = cut.material.kc_n_mm2 * ae * ap * vf / 60_000_000.0;
    let torque_nm = power_kw * TORQUE_CONSTANT / n_rpm;

    // Thermal estimate
    let vc_ratio = vc / vc_base;
    let chip_temperature_c = round_to(
        cut.material.max_temp_c * 0.4
            * (1.0 + 0.5 * vc_ratio)
            * (1.0 + 0.1 * fz / 0.1)
            * cut.coolant.temperature_factor(),
        1,
    );

    let chip_formation = ChipFormation::predict(cut.material.category, fz);

    Ok(ParameterSet {
        vc_base_m_min: vc_base,
        coating_factor,
        vc_m_min: vc,
        n_rpm,
        fz_base_mm: fz_base,
        coolant_factor,
        fz_mm: fz,
        ae_mm: ae,
        ap_mm: ap,
        ap_reference,
        surface_quality_factor: quality,
        feeds,
        mrr_cm3_min: mrr,
        power_kw,
        torque_nm,
        chip_temperature_c,
        chip_formation,
        stability: stability_info,
        trace: include_trace.then_some(trace),
    })
}
