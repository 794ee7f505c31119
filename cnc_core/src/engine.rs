//! # Calculation Engine
//!
//! The orchestrating facade: resolves catalog references, runs the
//! derivation pipeline, validates against the machine envelope, and wraps
//! everything in an immutable, timestamped result record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, MaterialId, OperationId, Tool};
use crate::errors::CalcResult;
use crate::expert::ExpertSettings;
use crate::factors::{Coating, Coolant, SurfaceQuality};
use crate::pipeline::{self, CutSetup, ParameterSet};
use crate::stability::StabilityInfo;
use crate::tables::MachineLimits;
use crate::validation::{self, ValidationReport};

/// One calculation request.
///
/// ```json
/// {
///   "tool_id": "em-6mm-2fl",
///   "material": "aluminium",
///   "operation": "slot_rough",
///   "coating": "tialn",
///   "surface_quality": "standard",
///   "coolant": "wet",
///   "expert": { "level": 0 },
///   "include_trace": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Catalog id of the tool to cut with
    pub tool_id: String,

    /// Workpiece material
    pub material: MaterialId,

    /// Milling operation
    pub operation: OperationId,

    #[serde(default)]
    pub coating: Coating,

    #[serde(default)]
    pub surface_quality: SurfaceQuality,

    #[serde(default)]
    pub coolant: Coolant,

    #[serde(default)]
    pub expert: ExpertSettings,

    /// Carry the per-stage derivation trace in the result
    #[serde(default)]
    pub include_trace: bool,
}

impl CalculationRequest {
    /// Plain request with default process choices
    pub fn new(tool_id: impl Into<String>, material: MaterialId, operation: OperationId) -> Self {
        CalculationRequest {
            tool_id: tool_id.into(),
            material,
            operation,
            coating: Coating::default(),
            surface_quality: SurfaceQuality::default(),
            coolant: Coolant::default(),
            expert: ExpertSettings::default(),
            include_trace: false,
        }
    }
}

/// Immutable outcome of one calculation.
///
/// The record carries its own identity and creation time; two runs of the
/// same request produce identical parameters under fresh ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique id of this record
    pub id: Uuid,

    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,

    /// The request the record answers
    pub request: CalculationRequest,

    /// Derived cutting parameters
    pub parameters: ParameterSet,

    /// Check battery outcome
    pub validation: ValidationReport,

    /// Operator-facing notes: failed checks plus the stability advisory
    pub warnings: Vec<String>,
}

/// Calculation engine over a tool catalog and a machine envelope.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    limits: MachineLimits,
}

impl Engine {
    /// Engine over the built-in catalog and the default machine envelope
    pub fn new() -> Self {
        Engine {
            catalog: Catalog::builtin(),
            limits: MachineLimits::default(),
        }
    }

    /// Engine validating against a specific machine envelope
    pub fn with_limits(limits: MachineLimits) -> Self {
        Engine {
            catalog: Catalog::builtin(),
            limits,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn limits(&self) -> &MachineLimits {
        &self.limits
    }

    /// Register a tool for subsequent calculations.
    pub fn add_tool(&mut self, tool: Tool) -> CalcResult<()> {
        self.catalog.add_tool(tool)
    }

    /// Classify the overhang stability of a registered tool.
    pub fn classify(&self, tool_id: &str) -> CalcResult<StabilityInfo> {
        let tool = self.catalog.resolve_tool(tool_id)?;
        Ok(crate::stability::classify(&tool.geometry))
    }

    /// Re-run the check battery for an existing parameter set, e.g. after
    /// swapping machine limits.
    pub fn validate(
        &self,
        request: &CalculationRequest,
        parameters: &ParameterSet,
    ) -> CalcResult<ValidationReport> {
        let tool = self.catalog.resolve_tool(&request.tool_id)?;
        let material = self.catalog.resolve_material(request.material.as_str())?;
        let operation = self.catalog.resolve_operation(request.operation.as_str())?;

        let cut = CutSetup {
            tool,
            material,
            operation,
            coating: request.coating,
            surface_quality: request.surface_quality,
            coolant: request.coolant,
        };
        Ok(validation::validate(
            &cut,
            parameters,
            &self.limits,
            &request.expert,
        ))
    }

    /// Run the full derivation and validation for a request.
    pub fn calculate(&self, request: &CalculationRequest) -> CalcResult<CalculationResult> {
        let tool = self.catalog.resolve_tool(&request.tool_id)?;
        let material = self.catalog.resolve_material(request.material.as_str())?;
        let operation = self.catalog.resolve_operation(request.operation.as_str())?;

        tracing::debug!(
            tool = %tool.id,
            material = material.id.as_str(),
            operation = operation.id.as_str(),
            "deriving cutting parameters"
        );

        let cut = CutSetup {
            tool,
            material,
            operation,
            coating: request.coating,
            surface_quality: request.surface_quality,
            coolant: request.coolant,
        };

        let parameters = pipeline::derive(&cut, &request.expert, request.include_trace)?;
        let validation = validation::validate(&cut, &parameters, &self.limits, &request.expert);

        let mut warnings = validation.warnings();
        if let Some(advisory) = &parameters.stability.advisory {
            warnings.push(advisory.clone());
        }

        tracing::info!(
            n_rpm = parameters.n_rpm,
            vf_mm_min = parameters.feeds.vf_mm_min,
            power_kw = parameters.power_kw,
            all_passed = validation.all_passed,
            "calculation complete"
        );

        Ok(CalculationResult {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            request: request.clone(),
            parameters,
            validation,
            warnings,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ToolGeometry, ToolType};
    use crate::errors::CalcError;
    use crate::expert::ParameterOverrides;
    use crate::stability::LdClass;
    use crate::validation::Severity;

    fn engine_with(id: &str, dc: f64, lcf: f64, nof: u8) -> Engine {
        let mut engine = Engine::new();
        engine
            .add_tool(Tool {
                id: id.to_owned(),
                name: format!("{dc} mm test end mill"),
                tool_type: ToolType::FlatEndMill,
                geometry: ToolGeometry {
                    dc_mm: dc,
                    lcf_mm: lcf,
                    dcon_mm: dc,
                    oal_mm: lcf + 25.0,
                    nof,
                },
                presets: Vec::new(),
            })
            .unwrap();
        engine
    }

    #[test]
    fn test_nominal_cut_in_mild_steel() {
        let engine = engine_with("em-6", 6.0, 18.0, 2);
        let request =
            CalculationRequest::new("em-6", MaterialId::MildSteel, OperationId::FaceFinish);

        let result = engine.calculate(&request).unwrap();

        // n = 150 * 1000 / (pi * 6)
        assert_eq!(result.parameters.n_rpm, 7958.0);
        assert!(result.validation.all_passed);
        assert_eq!(result.parameters.stability.class, LdClass::Short);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_slender_tool_is_derated_and_advised() {
        let engine = engine_with("em-long", 4.0, 40.0, 2);
        let request =
            CalculationRequest::new("em-long", MaterialId::MildSteel, OperationId::Pocket);

        let result = engine.calculate(&request).unwrap();
        let short = engine_with("em-short", 4.0, 8.0, 2)
            .calculate(&CalculationRequest::new(
                "em-short",
                MaterialId::MildSteel,
                OperationId::Pocket,
            ))
            .unwrap();

        assert_eq!(result.parameters.stability.class, LdClass::Slender);
        assert!(result.parameters.fz_mm < short.parameters.fz_mm);
        assert!(!result.validation.all_passed); // L/D 10 > 6 is an error
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("deep-reach tooling")));
    }

    #[test]
    fn test_zero_expert_level_matches_default() {
        let engine = engine_with("em-8", 8.0, 24.0, 3);
        let plain = CalculationRequest::new("em-8", MaterialId::Aluminium, OperationId::Contour2d);
        let mut explicit = plain.clone();
        explicit.expert = ExpertSettings::with_level(0);

        let a = engine.calculate(&plain).unwrap();
        let b = engine.calculate(&explicit).unwrap();

        assert_eq!(a.parameters, b.parameters);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_trace_only_on_request() {
        let engine = engine_with("em-6", 6.0, 18.0, 2);
        let mut request =
            CalculationRequest::new("em-6", MaterialId::Aluminium, OperationId::SlotRough);

        let silent = engine.calculate(&request).unwrap();
        assert!(silent.parameters.trace.is_none());
        let json = serde_json::to_string(&silent).unwrap();
        assert!(!json.contains("\"trace\""));

        request.include_trace = true;
        let traced = engine.calculate(&request).unwrap();
        assert!(traced
            .parameters
            .trace
            .as_ref()
            .is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn test_non_finite_geometry_rejected_at_registration() {
        let mut engine = Engine::new();
        let err = engine
            .add_tool(Tool {
                id: "em-nan".to_owned(),
                name: "corrupt geometry".to_owned(),
                tool_type: ToolType::FlatEndMill,
                geometry: ToolGeometry {
                    dc_mm: 6.0,
                    lcf_mm: f64::NAN,
                    dcon_mm: 6.0,
                    oal_mm: 50.0,
                    nof: 2,
                },
                presets: Vec::new(),
            })
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidGeometry { .. }));

        // The tool never entered the catalog, so no cut can reach it.
        let request = CalculationRequest::new(
            "em-nan",
            MaterialId::Aluminium,
            OperationId::AdaptiveClearing,
        );
        assert!(engine.calculate(&request).unwrap_err().is_not_found());
    }

    #[test]
    fn test_expert_slider_and_override_shape_the_cut() {
        let engine = engine_with("em-6", 6.0, 18.0, 2);
        let mut request =
            CalculationRequest::new("em-6", MaterialId::Aluminium, OperationId::SlotRough);
        let baseline = engine.calculate(&request).unwrap();

        request.expert = ExpertSettings {
            level: -50,
            overrides: ParameterOverrides {
                ap_mm: Some(1.2),
                ..Default::default()
            },
        };
        let tuned = engine.calculate(&request).unwrap();

        assert!((tuned.parameters.fz_mm - baseline.parameters.fz_mm * 0.5).abs() < 1e-9);
        assert_eq!(tuned.parameters.ap_mm, 1.2);
    }

    #[test]
    fn test_uncovered_pairing_is_a_lookup_error() {
        let mut engine = Engine::new();
        engine
            .add_tool(Tool {
                id: "drill-5".to_owned(),
                name: "5 mm drill".to_owned(),
                tool_type: ToolType::Drill,
                geometry: ToolGeometry {
                    dc_mm: 5.0,
                    lcf_mm: 26.0,
                    dcon_mm: 5.0,
                    oal_mm: 62.0,
                    nof: 2,
                },
                presets: Vec::new(),
            })
            .unwrap();

        let request =
            CalculationRequest::new("drill-5", MaterialId::StainlessSteel, OperationId::SlotFull);
        let err = engine.calculate(&request).unwrap_err();

        match err {
            CalcError::Lookup { table, key } => {
                assert_eq!(table, "cutting_speed");
                assert!(key.contains("stainless_steel"));
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn test_power_hungry_cut_fails_validation_but_not_calculation() {
        let engine = engine_with("em-10", 10.0, 30.0, 3);
        let request =
            CalculationRequest::new("em-10", MaterialId::StainlessSteel, OperationId::SlotRough);

        let result = engine.calculate(&request).unwrap();

        assert!(!result.validation.all_passed);
        let power = result
            .validation
            .checks
            .iter()
            .find(|c| c.name == "power_available")
            .unwrap();
        assert!(!power.passed);
        assert_eq!(power.severity, Severity::Error);
        assert!(result.warnings.iter().any(|w| w.contains("stall")));
    }

    #[test]
    fn test_unknown_tool_id() {
        let engine = Engine::new();
        let request =
            CalculationRequest::new("no-such-tool", MaterialId::Aluminium, OperationId::Pocket);
        let err = engine.calculate(&request).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_classify_registered_tool() {
        let engine = engine_with("em-long", 4.0, 40.0, 2);
        let info = engine.classify("em-long").unwrap();
        assert_eq!(info.class, LdClass::Slender);
        assert!(engine.classify("missing").is_err());
    }

    #[test]
    fn test_revalidation_against_other_limits() {
        let engine = engine_with("em-6", 6.0, 18.0, 2);
        let request =
            CalculationRequest::new("em-6", MaterialId::MildSteel, OperationId::FaceFinish);
        let result = engine.calculate(&request).unwrap();
        assert!(result.validation.all_passed);

        // The same parameters fail on a slower spindle.
        let mut slow_engine = Engine::with_limits(crate::tables::MachineLimits {
            max_rpm: 5_000.0,
            ..Default::default()
        });
        slow_engine
            .add_tool(engine.catalog().resolve_tool("em-6").unwrap().clone())
            .unwrap();
        let report = slow_engine
            .validate(&request, &result.parameters)
            .unwrap();
        assert!(!report.all_passed);
    }

    #[test]
    fn test_result_serializes_round_trip() {
        let engine = engine_with("em-6", 6.0, 18.0, 2);
        let request =
            CalculationRequest::new("em-6", MaterialId::Aluminium, OperationId::SlotRough);
        let result = engine.calculate(&request).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, result.id);
        assert_eq!(back.parameters, result.parameters);
    }
}
