//! # cnc_core - Milling Parameter Calculation Engine
//!
//! `cnc_core` derives and validates cutting parameters for CNC milling:
//! spindle speed, feeds, engagement, power, torque, thermal load and chip
//! formation, from a tool, a workpiece material and an operation. All inputs
//! and outputs are JSON-serializable, making the engine easy to drive from a
//! UI, a service, or scripting.
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: the same request always derives the same parameters
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **No Silent Defaults**: uncovered table pairings fail loudly
//!
//! ## Quick Start
//!
//! ```rust
//! use cnc_core::catalog::{Tool, ToolGeometry, ToolType, MaterialId, OperationId};
//! use cnc_core::engine::{CalculationRequest, Engine};
//!
//! let mut engine = Engine::new();
//! engine.add_tool(Tool {
//!     id: "em-6mm-2fl".to_owned(),
//!     name: "6 mm 2-flute end mill".to_owned(),
//!     tool_type: ToolType::FlatEndMill,
//!     geometry: ToolGeometry {
//!         dc_mm: 6.0,
//!         lcf_mm: 18.0,
//!         dcon_mm: 6.0,
//!         oal_mm: 50.0,
//!         nof: 2,
//!     },
//!     presets: Vec::new(),
//! }).unwrap();
//!
//! let request = CalculationRequest::new(
//!     "em-6mm-2fl",
//!     MaterialId::Aluminium,
//!     OperationId::SlotRough,
//! );
//! let result = engine.calculate(&request).unwrap();
//! assert!(result.parameters.n_rpm > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Tools, workpiece materials and operations
//! - [`tables`] - Baseline cutting data and machine limits
//! - [`factors`] - Coating, surface-quality and coolant multipliers
//! - [`stability`] - Overhang (L/D) classification and derating
//! - [`pipeline`] - The parameter derivation pipeline
//! - [`expert`] - Operator slider and per-parameter overrides
//! - [`validation`] - The result check battery
//! - [`engine`] - Orchestrating facade producing result records
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod expert;
pub mod factors;
pub mod pipeline;
pub mod stability;
pub mod tables;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use engine::{CalculationRequest, CalculationResult, Engine};
pub use errors::{CalcError, CalcResult};
pub use pipeline::ParameterSet;
pub use validation::{Severity, ValidationReport};
