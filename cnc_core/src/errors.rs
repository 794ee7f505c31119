//! # Error Types
//!
//! Structured error types for cnc_core. Every failure the engine can produce
//! carries enough context to diagnose it programmatically: which id was not
//! found, which reference table had a gap, which geometry field was out of
//! physical range.
//!
//! Validation findings are *not* errors: an unsafe-but-computable result is
//! still returned, with the findings carried as data in the
//! [`crate::validation::ValidationReport`]. Errors here mean the calculation
//! could not be completed at all, and a failed calculation never yields a
//! partially-populated parameter set.
//!
//! ## Example
//!
//! ```rust
//! use cnc_core::errors::{CalcError, CalcResult};
//!
//! fn check_diameter(dc_mm: f64) -> CalcResult<()> {
//!     if dc_mm <= 0.0 {
//!         return Err(CalcError::invalid_geometry(
//!             "dc_mm",
//!             dc_mm,
//!             "cutting diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cnc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for the calculation engine.
///
/// The first three variants are caller errors (unknown ids), surfaced before
/// any derivation work begins. The remainder abort a single calculation.
/// Nothing here is retried internally; retry policy belongs to the transport
/// boundary outside this crate.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Tool id not present in the catalog
    #[error("Tool not found: {tool_id}")]
    ToolNotFound { tool_id: String },

    /// Material id not present in the catalog
    #[error("Material not found: {material_id}")]
    MaterialNotFound { material_id: String },

    /// Operation id not present in the catalog
    #[error("Operation not found: {operation_id}")]
    OperationNotFound { operation_id: String },

    /// A reference table has no entry for a valid key combination.
    /// Treated as a data/configuration defect, never silently defaulted.
    #[error("Reference data gap in table '{table}' for key '{key}'")]
    Lookup { table: String, key: String },

    /// Tool geometry violates a basic physical constraint (rejected at entry)
    #[error("Invalid tool geometry '{field}' = {value}: {reason}")]
    InvalidGeometry {
        field: String,
        value: f64,
        reason: String,
    },

    /// A derived intermediate would be invalid, e.g. spindle speed rounding
    /// to zero. Aborts the calculation before any downstream division.
    #[error("Degenerate derived quantity '{quantity}': {reason}")]
    DegenerateGeometry { quantity: String, reason: String },

    /// A request field is out of range or otherwise unusable
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create a ToolNotFound error
    pub fn tool_not_found(tool_id: impl Into<String>) -> Self {
        CalcError::ToolNotFound {
            tool_id: tool_id.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_id: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_id: material_id.into(),
        }
    }

    /// Create an OperationNotFound error
    pub fn operation_not_found(operation_id: impl Into<String>) -> Self {
        CalcError::OperationNotFound {
            operation_id: operation_id.into(),
        }
    }

    /// Create a Lookup error for a reference-data gap
    pub fn lookup(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::Lookup {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateGeometry {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by an unknown id in the request
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CalcError::ToolNotFound { .. }
                | CalcError::MaterialNotFound { .. }
                | CalcError::OperationNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::ToolNotFound { .. } => "TOOL_NOT_FOUND",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::OperationNotFound { .. } => "OPERATION_NOT_FOUND",
            CalcError::Lookup { .. } => "LOOKUP_ERROR",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}
