//! # Result Validation
//!
//! Runs the derived parameter set against the machine envelope and a battery
//! of sanity checks. A failed check is data, not an error: the report lists
//! every check with its outcome and severity, and `all_passed` reflects only
//! the error-grade failures. Warnings inform the operator without vetoing
//! the cut.

use serde::{Deserialize, Serialize};

use crate::expert::ExpertSettings;
use crate::pipeline::{CutSetup, ParameterSet};
use crate::stability::LdClass;
use crate::tables::MachineLimits;

/// Chip temperature above material max by this margin is an error, not a
/// warning
const TEMP_HARD_MARGIN: f64 = 1.25;

/// Axial depth beyond this fraction of the cutting diameter risks breakage
const AP_DIAMETER_FACTOR: f64 = 0.75;

/// How seriously a failed check should be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational, the check passed
    Info,

    /// The cut will run but deserves operator attention
    Warning,

    /// The machine cannot or should not run this cut
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Outcome of a single check.
///
/// ```json
/// {
///   "name": "rpm_within_limit",
///   "passed": false,
///   "severity": "error",
///   "message": "Required spindle speed 32010 RPM exceeds the 30000 RPM limit",
///   "value": 32010.0,
///   "limit": 30000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Stable machine-readable check name
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Error and warning grades apply to failed checks; passed checks are info
    pub severity: Severity,

    /// Operator-facing explanation
    pub message: String,

    /// Measured value the check looked at
    pub value: Option<f64>,

    /// Limit it was compared against
    pub limit: Option<f64>,
}

impl ValidationCheck {
    fn passing(name: &str, message: String, value: f64, limit: f64) -> Self {
        ValidationCheck {
            name: name.to_owned(),
            passed: true,
            severity: Severity::Info,
            message,
            value: Some(value),
            limit: Some(limit),
        }
    }

    fn failing(name: &str, severity: Severity, message: String, value: f64, limit: f64) -> Self {
        ValidationCheck {
            name: name.to_owned(),
            passed: false,
            severity,
            message,
            value: Some(value),
            limit: Some(limit),
        }
    }
}

/// Full validation report for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// False exactly when a check failed at error severity
    pub all_passed: bool,

    /// Every check in the order it ran
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    /// Messages of all failed checks, warnings included
    pub fn warnings(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.message.clone())
            .collect()
    }

    /// Failed error-grade checks
    pub fn errors(&self) -> Vec<&ValidationCheck> {
        self.checks
            .iter()
            .filter(|c| !c.passed && c.severity == Severity::Error)
            .collect()
    }
}

/// Run the full check battery in its fixed order. The expert settings are
/// consulted only to report slider clamping; they never change a threshold.
pub fn validate(
    cut: &CutSetup<'_>,
    params: &ParameterSet,
    limits: &MachineLimits,
    expert: &ExpertSettings,
) -> ValidationReport {
    let mut checks = vec![
        check_rpm_within_limit(params, limits),
        check_power_available(params, limits),
        check_torque_within_rating(params, limits),
        check_feed_rate_reasonable(params, limits),
        check_fz_within_recommended(cut, params),
        check_coating_compatible(cut),
        check_ld_ratio_stability(params),
        check_roughing_overhang(cut, params),
        check_surface_quality_achievable(params),
        check_axial_depth_vs_diameter(cut, params),
        check_tool_engagement_safe(cut, params),
        check_temperature_safe(cut, params),
    ];

    if expert.level != expert.effective_level() {
        checks.push(ValidationCheck::failing(
            "expert_level_clamped",
            Severity::Warning,
            format!(
                "Expert level {} was clamped to {}",
                expert.level,
                expert.effective_level()
            ),
            f64::from(expert.level),
            f64::from(expert.effective_level()),
        ));
    }

    let all_passed = !checks
        .iter()
        .any(|c| !c.passed && c.severity == Severity::Error);

    ValidationReport { all_passed, checks }
}

fn check_rpm_within_limit(params: &ParameterSet, limits: &MachineLimits) -> ValidationCheck {
    let name = "rpm_within_limit";
    if params.n_rpm <= limits.max_rpm {
        ValidationCheck::passing(
            name,
            format!(
                "Spindle speed {:.0} RPM is within the {:.0} RPM limit",
                params.n_rpm, limits.max_rpm
            ),
            params.n_rpm,
            limits.max_rpm,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Error,
            format!(
                "Required spindle speed {:.0} RPM exceeds the {:.0} RPM limit",
                params.n_rpm, limits.max_rpm
            ),
            params.n_rpm,
            limits.max_rpm,
        )
    }
}

fn check_power_available(params: &ParameterSet, limits: &MachineLimits) -> ValidationCheck {
    let name = "power_available";
    if params.power_kw <= limits.max_power_kw {
        ValidationCheck::passing(
            name,
            format!(
                "Cutting power {:.3} kW fits the {:.2} kW spindle",
                params.power_kw, limits.max_power_kw
            ),
            params.power_kw,
            limits.max_power_kw,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Error,
            format!(
                "Cutting power {:.3} kW exceeds the {:.2} kW spindle rating; \
                 the spindle will stall",
                params.power_kw, limits.max_power_kw
            ),
            params.power_kw,
            limits.max_power_kw,
        )
    }
}

fn check_torque_within_rating(params: &ParameterSet, limits: &MachineLimits) -> ValidationCheck {
    let name = "torque_within_rating";
    let Some(max_torque) = limits.max_torque_nm else {
        return ValidationCheck {
            name: name.to_owned(),
            passed: true,
            severity: Severity::Info,
            message: "No torque rating configured for this machine".to_owned(),
            value: Some(params.torque_nm),
            limit: None,
        };
    };

    if params.torque_nm <= max_torque {
        ValidationCheck::passing(
            name,
            format!(
                "Spindle torque {:.3} Nm is within the {max_torque:.2} Nm rating",
                params.torque_nm
            ),
            params.torque_nm,
            max_torque,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Error,
            format!(
                "Spindle torque {:.3} Nm exceeds the {max_torque:.2} Nm rating",
                params.torque_nm
            ),
            params.torque_nm,
            max_torque,
        )
    }
}

fn check_feed_rate_reasonable(params: &ParameterSet, limits: &MachineLimits) -> ValidationCheck {
    let name = "feed_rate_reasonable";
    let vf = params.feeds.vf_mm_min;
    if vf >= limits.min_feed_mm_min && vf <= limits.max_feed_mm_min {
        ValidationCheck::passing(
            name,
            format!("Feed rate {vf:.0} mm/min is in the drivable band"),
            vf,
            limits.max_feed_mm_min,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!(
                "Feed rate {vf:.0} mm/min is outside the {:.0}-{:.0} mm/min band",
                limits.min_feed_mm_min, limits.max_feed_mm_min
            ),
            vf,
            limits.max_feed_mm_min,
        )
    }
}

fn check_fz_within_recommended(cut: &CutSetup<'_>, params: &ParameterSet) -> ValidationCheck {
    let name = "fz_within_recommended";
    let preset = cut
        .tool
        .preset_for(cut.material.id.as_str(), cut.operation.id.as_str());

    let Some(preset) = preset else {
        return ValidationCheck {
            name: name.to_owned(),
            passed: true,
            severity: Severity::Info,
            message: format!(
                "No manufacturer preset for {} / {}; table value used",
                cut.material.id.as_str(),
                cut.operation.id.as_str()
            ),
            value: Some(params.fz_mm),
            limit: None,
        };
    };

    let lo = preset.fz_min_mm.unwrap_or(0.0);
    let hi = preset.fz_max_mm.unwrap_or(f64::INFINITY);
    if params.fz_mm >= lo && params.fz_mm <= hi {
        ValidationCheck::passing(
            name,
            format!(
                "Feed per tooth {:.4} mm is within the recommended {lo:.4}-{hi:.4} mm band",
                params.fz_mm
            ),
            params.fz_mm,
            hi,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!(
                "Feed per tooth {:.4} mm is outside the manufacturer band {lo:.4}-{hi:.4} mm",
                params.fz_mm
            ),
            params.fz_mm,
            hi,
        )
    }
}

fn check_coating_compatible(cut: &CutSetup<'_>) -> ValidationCheck {
    let name = "coating_compatible";
    if cut.coating.allowed_for(cut.material) {
        ValidationCheck {
            name: name.to_owned(),
            passed: true,
            severity: Severity::Info,
            message: format!(
                "{} is compatible with {}",
                cut.coating.display_name(),
                cut.material.name
            ),
            value: None,
            limit: None,
        }
    } else {
        ValidationCheck {
            name: name.to_owned(),
            passed: false,
            severity: Severity::Error,
            message: format!(
                "{} cannot cut {}; non-ferrous workpieces only",
                cut.coating.display_name(),
                cut.material.name
            ),
            value: None,
            limit: None,
        }
    }
}

fn check_ld_ratio_stability(params: &ParameterSet) -> ValidationCheck {
    let name = "ld_ratio_stability";
    let ld = params.stability.ld_ratio;
    if ld > 6.0 {
        ValidationCheck::failing(
            name,
            Severity::Error,
            format!("L/D ratio {ld:.2} above 6.0: very high risk of chatter and deflection"),
            ld,
            6.0,
        )
    } else if ld > 4.0 {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!("L/D ratio {ld:.2} above 4.0: increased risk of vibration"),
            ld,
            4.0,
        )
    } else {
        ValidationCheck::passing(name, format!("L/D ratio {ld:.2} is stable"), ld, 4.0)
    }
}

fn check_roughing_overhang(cut: &CutSetup<'_>, params: &ParameterSet) -> ValidationCheck {
    let name = "roughing_overhang";
    let ld = params.stability.ld_ratio;
    if cut.operation.is_roughing && params.stability.class == LdClass::Slender {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!(
                "Roughing with a slender tool (L/D {ld:.2}); \
                 heavy cuts will chatter even at the derated chip load"
            ),
            ld,
            8.0,
        )
    } else {
        ValidationCheck::passing(
            name,
            format!("Tool overhang suits the {} operation", cut.operation.name),
            ld,
            8.0,
        )
    }
}

fn check_surface_quality_achievable(params: &ParameterSet) -> ValidationCheck {
    let name = "surface_quality_achievable";
    let ae = params.ae_mm;
    if ae >= 0.5 {
        ValidationCheck::passing(
            name,
            format!("Radial engagement {ae:.3} mm supports the finish target"),
            ae,
            0.5,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!(
                "Radial engagement {ae:.3} mm is below 0.5 mm; \
                 the tool will rub instead of cut"
            ),
            ae,
            0.5,
        )
    }
}

fn check_axial_depth_vs_diameter(cut: &CutSetup<'_>, params: &ParameterSet) -> ValidationCheck {
    let name = "axial_depth_vs_diameter";
    let dc = cut.tool.geometry.dc_mm;
    let bound = dc * AP_DIAMETER_FACTOR;
    if params.ap_mm <= bound {
        ValidationCheck::passing(
            name,
            format!(
                "Axial depth {:.3} mm suits the {dc:.1} mm cutting diameter",
                params.ap_mm
            ),
            params.ap_mm,
            bound,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!(
                "Axial depth {:.3} mm exceeds 75% of the {dc:.1} mm cutting diameter; \
                 high breakage risk, prefer multiple passes",
                params.ap_mm
            ),
            params.ap_mm,
            bound,
        )
    }
}

fn check_tool_engagement_safe(cut: &CutSetup<'_>, params: &ParameterSet) -> ValidationCheck {
    let name = "tool_engagement_safe";
    let lcf = cut.tool.geometry.lcf_mm;
    if params.ap_mm <= lcf {
        ValidationCheck::passing(
            name,
            format!(
                "Axial depth {:.3} mm stays within the {lcf:.1} mm flute length",
                params.ap_mm
            ),
            params.ap_mm,
            lcf,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Error,
            format!(
                "Axial depth {:.3} mm exceeds the {lcf:.1} mm flute length; \
                 the shank would rub the wall",
                params.ap_mm
            ),
            params.ap_mm,
            lcf,
        )
    }
}

fn check_temperature_safe(cut: &CutSetup<'_>, params: &ParameterSet) -> ValidationCheck {
    let name = "temperature_safe";
    let max_temp = cut.material.max_temp_c;
    let temp = params.chip_temperature_c;
    if temp <= max_temp {
        ValidationCheck::passing(
            name,
            format!("Chip temperature {temp:.1} C is below the {max_temp:.0} C material limit"),
            temp,
            max_temp,
        )
    } else if temp <= max_temp * TEMP_HARD_MARGIN {
        ValidationCheck::failing(
            name,
            Severity::Warning,
            format!(
                "Chip temperature {temp:.1} C exceeds the {max_temp:.0} C material limit; \
                 expect burning or edge buildup"
            ),
            temp,
            max_temp,
        )
    } else {
        ValidationCheck::failing(
            name,
            Severity::Error,
            format!(
                "Chip temperature {temp:.1} C is far above the {max_temp:.0} C material limit; \
                 the workpiece will be damaged"
            ),
            temp,
            max_temp,
        )
    }
}
