//! Error and warning types produced while sizing a carport truss.

use serde::Serialize;
use thiserror::Error;

use crate::sections::SectionRole;

/// Error returned when a calculation cannot produce a meaningful design.
///
/// These never reach callers of [`TrussEngine::calculate`](crate::TrussEngine::calculate)
/// directly; the pipeline boundary folds them into a failure
/// [`CalculationResult`](crate::CalculationResult).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Returned when a numeric input is NaN or infinite.
    #[error("{field} must be a finite number (received {value})")]
    NonFiniteInput {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a profile catalog holds no entries.
    #[error("profile catalog is empty")]
    EmptyCatalog,
    /// Returned when an element references a node that does not exist.
    #[error("element {element} references missing node {node}")]
    DanglingElement {
        /// Index of the offending element.
        element: usize,
        /// Node index that could not be resolved.
        node: usize,
    },
    /// Returned when a truss is requested for a span it cannot be built over.
    #[error("span of {span} m is outside 0..={max} m")]
    SpanOutOfRange {
        /// Requested span in metres.
        span: f64,
        /// Largest supported span in metres.
        max: f64,
    },
    /// Returned when a design constant is zero, negative or not finite.
    #[error("design constant {field} must be a positive finite number (received {value})")]
    InvalidDesignConstant {
        /// Name of the offending constant.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when reference tables cannot be parsed.
    #[error("invalid engine tables: {0}")]
    Settings(#[from] serde_json::Error),
    /// Returned when the CSV specification sheet cannot be written.
    #[error("failed to write specification sheet: {0}")]
    Csv(#[from] csv::Error),
    /// Returned when rendered output is not valid UTF-8.
    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Boundary condition detected during a calculation.
///
/// Warnings never stop the pipeline. They are attached to an otherwise
/// successful result in the order they were raised so the caller can show a
/// design with caveats.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A non-positive dimension was replaced with the product minimum.
    #[error("{field} of {value} m is not positive; using {replacement} m")]
    DimensionClamped {
        /// Name of the corrected field.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
        /// Value used instead.
        replacement: f64,
    },
    /// A dimension above the product range was reduced to the maximum.
    #[error("{field} of {value} m exceeds the {replacement} m maximum; using {replacement} m")]
    DimensionCapped {
        /// Name of the corrected field.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
        /// Value used instead.
        replacement: f64,
    },
    /// The roof slope was outside the supported range.
    #[error("roof slope of {value} deg is outside 0..={max} deg; using {replacement} deg")]
    SlopeClamped {
        /// Slope supplied by the caller in degrees.
        value: f64,
        /// Largest supported slope in degrees.
        max: f64,
        /// Slope used instead in degrees.
        replacement: f64,
    },
    /// The archetype formula produced a truss shallower than the minimum.
    #[error("truss height {raw:.3} m is below the {floor} m minimum; height set to {floor} m")]
    HeightFloor {
        /// Height produced by the archetype formula in metres.
        raw: f64,
        /// Minimum truss height in metres.
        floor: f64,
    },
    /// The effective lever arm was floored to avoid an unbounded chord force.
    #[error("effective lever arm {raw:.3} m is below {floor} m; chord force uses {floor} m")]
    LeverArmFloored {
        /// Lever arm derived from the truss height in metres.
        raw: f64,
        /// Lever arm used instead in metres.
        floor: f64,
    },
    /// The snow region id is not in the table.
    #[error("unknown snow region {region}; using {fallback} kPa")]
    UnknownSnowRegion {
        /// Requested region id.
        region: u8,
        /// Ground snow load used instead in kPa.
        fallback: f64,
    },
    /// The wind region id is not in the table.
    #[error("unknown wind region {region}; using {fallback} kPa")]
    UnknownWindRegion {
        /// Requested region id.
        region: u8,
        /// Reference wind pressure used instead in kPa.
        fallback: f64,
    },
    /// No catalog profile satisfies the required capacity.
    #[error(
        "section undersized: {role} needs {required_area:.2} cm2 but {profile} provides {provided_area:.2} cm2"
    )]
    UndersizedSection {
        /// Member role that could not be satisfied.
        role: SectionRole,
        /// Name of the profile that was used anyway.
        profile: String,
        /// Required cross-sectional area in square centimetres.
        required_area: f64,
        /// Area of the chosen profile in square centimetres.
        provided_area: f64,
    },
    /// The pillar slenderness exceeds the safe limit.
    #[error("column slenderness {slenderness:.0} exceeds {limit:.0}; increase the pillar section")]
    SlenderColumn {
        /// Computed slenderness ratio.
        slenderness: f64,
        /// Largest acceptable slenderness ratio.
        limit: f64,
    },
    /// The generated lattice splits into more than one piece.
    #[error("truss lattice is split into {components} disconnected parts")]
    DisconnectedLattice {
        /// Number of connected components found.
        components: usize,
    },
}

/// Record a warning and mirror it to the log.
pub(crate) fn raise(warnings: &mut Vec<Warning>, warning: Warning) {
    log::warn!("{warning}");
    warnings.push(warning);
}
