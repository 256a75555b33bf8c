#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod bom;
mod catalog;
mod config;
mod drawing;
mod engine;
mod errors;
mod geometry;
mod loads;
mod report;
mod sections;
mod truss;

pub use bom::{build_bill_of_materials, pillar_count, BillOfMaterials, BomItem};
pub use catalog::{Profile, ProfileCatalog, StandardCatalog, STANDARD_PROFILES};
pub use config::{
    CarportConfig, DesignConstants, EngineTables, PillarSize, Pricing, Region, RoofMaterial,
    MAX_LENGTH, MAX_SLOPE_DEG, MAX_SPAN, MIN_EAVE_HEIGHT, MIN_LENGTH, MIN_SPAN,
};
pub use drawing::{count_lines, element_endpoints, export_dxf, DXF_VERSION};
pub use engine::{calculate, CalculationResult, TrussEngine};
pub use errors::{EngineError, Warning};
pub use geometry::{
    node, Node, RoofArchetype, Roofline, ARCH_RISE_RATIO, EAVE_OFFSET, EAVE_RISE,
    MIN_TRUSS_HEIGHT,
};
pub use loads::{
    analyse_loads, exposure_coefficient, snow_shape_coefficient, LoadAnalysis, Utilization,
};
pub use report::{
    render_calculation_report, render_specification_csv, render_specification_sheet,
};
pub use sections::{
    utilization_percent, ElementSections, Requirement, SectionRole, SectionSelection,
    SectionSelector,
};
pub use truss::{
    generate_truss, panel_count_for, Element, ElementRole, TrussGeometry, MIN_PANEL_COUNT,
    TARGET_PANEL_LENGTH,
};
