//! # Reference Catalog
//!
//! Tool, material and operation resolution. The engine consumes the catalog
//! through three lookups (`resolve_tool`, `resolve_material`,
//! `resolve_operation`), each returning the entity or a not-found error.
//!
//! Material and operation records are built-in reference data; tools are
//! registered by the caller. Once built, the catalog is only ever read
//! during a calculation.

pub mod material;
pub mod operation;
pub mod tool;

pub use material::{Material, MaterialCategory, MaterialId};
pub use operation::{ApReference, Operation, OperationFamily, OperationId};
pub use tool::{Tool, ToolGeometry, ToolPreset, ToolType};

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::errors::{CalcError, CalcResult};

// Built-in reference data, constructed once and never mutated. New catalogs
// clone the snapshot.
static MATERIALS: Lazy<HashMap<&'static str, Material>> = Lazy::new(|| {
    MaterialId::ALL
        .iter()
        .map(|id| (id.as_str(), id.record()))
        .collect()
});

static OPERATIONS: Lazy<HashMap<&'static str, Operation>> = Lazy::new(|| {
    OperationId::ALL
        .iter()
        .map(|id| (id.as_str(), id.record()))
        .collect()
});

/// Catalog of tools, materials and operations, keyed by their string ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: HashMap<String, Tool>,
    materials: HashMap<&'static str, Material>,
    operations: HashMap<&'static str, Operation>,
}

impl Catalog {
    /// Build a catalog with the built-in material and operation reference
    /// data and no tools.
    pub fn builtin() -> Self {
        Catalog {
            tools: HashMap::new(),
            materials: MATERIALS.clone(),
            operations: OPERATIONS.clone(),
        }
    }

    /// Register a tool. Geometry is validated on entry so a calculation can
    /// rely on registered tools being physically plausible.
    pub fn add_tool(&mut self, tool: Tool) -> CalcResult<()> {
        tool.geometry.validate()?;
        self.tools.insert(tool.id.clone(), tool);
        Ok(())
    }

    /// Resolve a tool by id
    pub fn resolve_tool(&self, id: &str) -> CalcResult<&Tool> {
        self.tools.get(id).ok_or_else(|| CalcError::tool_not_found(id))
    }

    /// Resolve a material by string id
    pub fn resolve_material(&self, id: &str) -> CalcResult<&Material> {
        self.materials
            .get(id)
            .ok_or_else(|| CalcError::material_not_found(id))
    }

    /// Resolve an operation by string id
    pub fn resolve_operation(&self, id: &str) -> CalcResult<&Operation> {
        self.operations
            .get(id)
            .ok_or_else(|| CalcError::operation_not_found(id))
    }

    /// All materials, hardness-sorted
    pub fn materials(&self) -> Vec<&Material> {
        let mut mats: Vec<&Material> = self.materials.values().collect();
        mats.sort_by_key(|m| (m.hardness, m.id.as_str()));
        mats
    }

    /// All operations in declaration order
    pub fn operations(&self) -> Vec<&Operation> {
        OperationId::ALL
            .iter()
            .filter_map(|id| self.operations.get(id.as_str()))
            .collect()
    }

    /// Number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_tool() -> Tool {
        Tool {
            id: "T1".to_string(),
            name: "6mm 2F End Mill".to_string(),
            tool_type: ToolType::FlatEndMill,
            geometry: ToolGeometry {
                dc_mm: 6.0,
                lcf_mm: 18.0,
                dcon_mm: 6.0,
                oal_mm: 50.0,
                nof: 2,
            },
            presets: vec![],
        }
    }

    #[test]
    fn test_builtin_reference_data() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.materials().len(), 8);
        assert_eq!(catalog.operations().len(), 12);
        assert_eq!(catalog.tool_count(), 0);
    }

    #[test]
    fn test_resolution() {
        let mut catalog = Catalog::builtin();
        catalog.add_tool(demo_tool()).unwrap();

        assert!(catalog.resolve_tool("T1").is_ok());
        assert!(catalog.resolve_material("aluminium").is_ok());
        assert!(catalog.resolve_operation("slot_rough").is_ok());
    }

    #[test]
    fn test_not_found_errors() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.resolve_tool("T99"),
            Err(CalcError::tool_not_found("T99"))
        );
        assert_eq!(
            catalog.resolve_material("unobtainium"),
            Err(CalcError::material_not_found("unobtainium"))
        );
        assert_eq!(
            catalog.resolve_operation("warp_drive"),
            Err(CalcError::operation_not_found("warp_drive"))
        );
    }

    #[test]
    fn test_invalid_tool_rejected_at_registration() {
        let mut catalog = Catalog::builtin();
        let mut tool = demo_tool();
        tool.geometry.dc_mm = -1.0;
        assert!(catalog.add_tool(tool).is_err());
        assert_eq!(catalog.tool_count(), 0);
    }

    #[test]
    fn test_materials_hardness_sorted() {
        let catalog = Catalog::builtin();
        let mats = catalog.materials();
        for pair in mats.windows(2) {
            assert!(pair[0].hardness <= pair[1].hardness);
        }
    }
}
