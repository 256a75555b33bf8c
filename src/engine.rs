//! End-to-end calculation pipeline.
//!
//! `config -> geometry -> loads -> sections -> bill of materials -> drawing`.
//! Every stage is a pure function of its inputs and the read-only reference
//! tables, so an engine can be shared freely between threads.

use serde::Serialize;

use crate::bom::{build_bill_of_materials, BillOfMaterials};
use crate::catalog::{ProfileCatalog, StandardCatalog};
use crate::config::{CarportConfig, EngineTables};
use crate::drawing::export_dxf;
use crate::errors::{EngineError, Warning};
use crate::loads::{analyse_loads, LoadAnalysis};
use crate::sections::{ElementSections, SectionSelector};
use crate::truss::{generate_truss, TrussGeometry};

/// Everything the rendering and report collaborators need from one calculation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    /// `false` only when the input could not be evaluated at all.
    pub success: bool,
    /// Sanitised configuration the design was computed for.
    pub config: CarportConfig,
    /// Truss lattice.
    pub geometry: TrussGeometry,
    /// Chosen profile per role.
    pub sections: ElementSections,
    /// Loads, forces and utilization.
    pub loads: LoadAnalysis,
    /// Priced materials list.
    pub bom: BillOfMaterials,
    /// DXF drawing of the truss.
    pub drawing: String,
    /// Human readable warnings in the order they were raised.
    pub warnings: Vec<String>,
    /// Structured form of `warnings`; empty for a failure result.
    pub diagnostics: Vec<Warning>,
}

impl CalculationResult {
    /// Renderable placeholder returned when the pipeline fails.
    ///
    /// Geometry and the bill of materials are empty, every role uses the
    /// lightest catalog profile and the drawing contains only its header.
    #[must_use]
    pub fn failure(
        error: &EngineError,
        config: &CarportConfig,
        catalog: &dyn ProfileCatalog,
    ) -> Self {
        let sections = catalog
            .lightest()
            .map(ElementSections::uniform)
            .unwrap_or_default();
        let geometry = TrussGeometry::default();
        Self {
            success: false,
            config: config.clone(),
            drawing: export_dxf(&geometry),
            geometry,
            sections,
            loads: LoadAnalysis::default(),
            bom: BillOfMaterials::default(),
            warnings: vec![error.to_string()],
            diagnostics: Vec::new(),
        }
    }

    /// Serialise the result for the rendering collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Settings`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reference tables and a profile catalog, constructed once and reused.
#[derive(Clone, Debug)]
pub struct TrussEngine<C = StandardCatalog> {
    /// Regional loads, design factors and pricing.
    tables: EngineTables,
    /// Profiles available for selection.
    catalog: C,
}

impl Default for TrussEngine<StandardCatalog> {
    fn default() -> Self {
        Self::new(EngineTables::default(), StandardCatalog::default())
    }
}

impl<C: ProfileCatalog> TrussEngine<C> {
    /// Create an engine over the given tables and catalog.
    pub fn new(tables: EngineTables, catalog: C) -> Self {
        Self { tables, catalog }
    }

    /// Reference tables in use.
    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    /// Profile catalog in use.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Size a carport. Never panics and never returns a partial result.
    ///
    /// # Examples
    /// ```
    /// use carport_truss::{CarportConfig, TrussEngine};
    ///
    /// let engine = TrussEngine::default();
    /// let result = engine.calculate(&CarportConfig::default());
    /// assert!(result.success);
    /// assert_eq!(result.geometry.panel_count, 8);
    /// ```
    #[must_use]
    pub fn calculate(&self, config: &CarportConfig) -> CalculationResult {
        calculate(config, &self.tables, &self.catalog)
    }
}

/// Run the pipeline against explicit tables and catalog.
#[must_use]
pub fn calculate(
    config: &CarportConfig,
    tables: &EngineTables,
    catalog: &dyn ProfileCatalog,
) -> CalculationResult {
    match run_pipeline(config, tables, catalog) {
        Ok(result) => result,
        Err(error) => {
            log::error!("carport calculation failed: {error}");
            CalculationResult::failure(&error, config, catalog)
        }
    }
}

/// Pipeline body; any hard error aborts the whole calculation.
fn run_pipeline(
    config: &CarportConfig,
    tables: &EngineTables,
    catalog: &dyn ProfileCatalog,
) -> Result<CalculationResult, EngineError> {
    let mut diagnostics = Vec::new();

    tables.design.validate()?;
    let config = config.sanitized(&mut diagnostics)?;
    let geometry = generate_truss(config.span, config.roof, config.slope_deg, &mut diagnostics)?;
    let mut loads = analyse_loads(&config, &geometry, tables, &mut diagnostics);

    let selector = SectionSelector::new(catalog, &tables.design)?;
    let selection = selector.select_all(&config, &loads, &mut diagnostics);
    loads.utilization = selection.utilization;

    let bom = build_bill_of_materials(&config, &geometry, &selection.sections, tables);
    let drawing = export_dxf(&geometry);

    Ok(CalculationResult {
        success: true,
        config,
        geometry,
        sections: selection.sections,
        loads,
        bom,
        drawing,
        warnings: diagnostics.iter().map(ToString::to_string).collect(),
        diagnostics,
    })
}
