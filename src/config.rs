//! Calculation input and the reference tables the engine reads.

use serde::{Deserialize, Serialize};

use crate::errors::{raise, EngineError, Warning};
use crate::geometry::RoofArchetype;

/// Smallest carport width offered by the configurator, in metres.
pub const MIN_SPAN: f64 = 3.0;
/// Smallest carport length offered by the configurator, in metres.
pub const MIN_LENGTH: f64 = 3.0;
/// Widest span the engine will discretise, in metres.
pub const MAX_SPAN: f64 = 50.0;
/// Longest carport the engine will price, in metres.
pub const MAX_LENGTH: f64 = 200.0;
/// Lowest eave height offered by the configurator, in metres.
pub const MIN_EAVE_HEIGHT: f64 = 2.0;
/// Steepest roof slope the engine accepts, in degrees.
pub const MAX_SLOPE_DEG: f64 = 60.0;

/// Roof covering, which fixes the dead load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofMaterial {
    /// Cellular polycarbonate sheets.
    #[default]
    Polycarbonate,
    /// Profiled metal tile.
    #[serde(rename = "metaltile")]
    MetalTile,
    /// Trapezoidal steel decking.
    Decking,
}

impl RoofMaterial {
    /// Dead load of the covering in kN/m2.
    #[must_use]
    pub fn dead_load(self) -> f64 {
        match self {
            RoofMaterial::MetalTile => 0.05,
            RoofMaterial::Polycarbonate | RoofMaterial::Decking => 0.02,
        }
    }
}

/// Nominal pillar class picked by the customer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PillarSize {
    /// 60 x 60 mm square tube.
    #[serde(rename = "60x60")]
    Size60,
    /// 80 x 80 mm square tube.
    #[default]
    #[serde(rename = "80x80")]
    Size80,
    /// 100 x 100 mm square tube.
    #[serde(rename = "100x100")]
    Size100,
}

impl PillarSize {
    /// Minimum nominal depth and wall thickness in millimetres.
    #[must_use]
    pub fn minimum_size(self) -> (f64, f64) {
        match self {
            PillarSize::Size60 => (60.0, 3.0),
            PillarSize::Size80 => (80.0, 3.0),
            PillarSize::Size100 => (100.0, 4.0),
        }
    }
}

/// Customer configuration fed to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarportConfig {
    /// Truss span (carport width) in metres.
    pub span: f64,
    /// Carport length perpendicular to the trusses in metres.
    pub length: f64,
    /// Height of the pillars up to the bottom chord in metres.
    pub eave_height: f64,
    /// Roof archetype.
    pub roof: RoofArchetype,
    /// Roof slope in degrees.
    pub slope_deg: f64,
    /// Snow region id.
    pub snow_region: u8,
    /// Wind region id.
    pub wind_region: u8,
    /// Roof covering.
    pub roofing: RoofMaterial,
    /// Pillar class.
    pub pillar_size: PillarSize,
}

impl Default for CarportConfig {
    fn default() -> Self {
        Self {
            span: 6.0,
            length: 6.0,
            eave_height: 2.5,
            roof: RoofArchetype::Gable,
            slope_deg: 20.0,
            snow_region: 3,
            wind_region: 1,
            roofing: RoofMaterial::Polycarbonate,
            pillar_size: PillarSize::Size80,
        }
    }
}

impl CarportConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Settings`] when the text is not valid JSON for this type.
    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject non-finite input and clamp degenerate values.
    ///
    /// Non-positive dimensions are replaced with the product minimums, spans and
    /// lengths above [`MAX_SPAN`] and [`MAX_LENGTH`] are capped, and the
    /// slope is clamped into `0..=60` degrees, each correction producing a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NonFiniteInput`] when any dimension or the slope is
    /// NaN or infinite.
    pub fn sanitized(&self, warnings: &mut Vec<Warning>) -> Result<Self, EngineError> {
        let mut config = self.clone();
        for (field, value) in [
            ("span", self.span),
            ("length", self.length),
            ("eave_height", self.eave_height),
            ("slope_deg", self.slope_deg),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteInput { field, value });
            }
        }

        config.span = positive_or(warnings, "span", self.span, MIN_SPAN);
        config.span = at_most(warnings, "span", config.span, MAX_SPAN);
        config.length = positive_or(warnings, "length", self.length, MIN_LENGTH);
        config.length = at_most(warnings, "length", config.length, MAX_LENGTH);
        config.eave_height =
            positive_or(warnings, "eave_height", self.eave_height, MIN_EAVE_HEIGHT);

        let slope = self.slope_deg.clamp(0.0, MAX_SLOPE_DEG);
        if slope != self.slope_deg {
            raise(
                warnings,
                Warning::SlopeClamped {
                    value: self.slope_deg,
                    max: MAX_SLOPE_DEG,
                    replacement: slope,
                },
            );
            config.slope_deg = slope;
        }
        Ok(config)
    }
}

/// Return `value` when positive, otherwise `replacement` with a warning.
fn positive_or(warnings: &mut Vec<Warning>, field: &'static str, value: f64, replacement: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        raise(
            warnings,
            Warning::DimensionClamped {
                field,
                value,
                replacement,
            },
        );
        replacement
    }
}

/// Return `value` when it does not exceed `max`, otherwise `max` with a warning.
fn at_most(warnings: &mut Vec<Warning>, field: &'static str, value: f64, max: f64) -> f64 {
    if value <= max {
        value
    } else {
        raise(
            warnings,
            Warning::DimensionCapped {
                field,
                value,
                replacement: max,
            },
        );
        max
    }
}

/// Climate region with its characteristic load in kPa.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region id as used by the configurator.
    pub id: u8,
    /// Characteristic load in kPa.
    pub value: f64,
    /// Display name.
    pub name: String,
}

impl Region {
    /// Table row helper.
    fn new(id: u8, value: f64, name: &str) -> Self {
        Self {
            id,
            value,
            name: name.to_string(),
        }
    }
}

/// Fixed design factors used by the load model and section selector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConstants {
    /// Distance between adjacent trusses in metres.
    pub truss_spacing: f64,
    /// Largest distance between pillars along the carport length in metres.
    pub post_spacing: f64,
    /// Partial safety factor on snow and wind loads.
    pub load_factor: f64,
    /// Design steel strength in kN/cm2.
    pub steel_strength: f64,
    /// Operating condition factor.
    pub gamma_c: f64,
    /// Buckling reduction factor assumed for compression members.
    pub compression_phi: f64,
    /// Ratio of the effective lever arm to the truss height.
    pub lever_arm_ratio: f64,
    /// Smallest effective lever arm in metres.
    pub min_lever_arm: f64,
    /// Effective length factor of a pillar fixed only at its base.
    pub column_end_factor: f64,
    /// Largest acceptable pillar slenderness.
    pub slenderness_limit: f64,
    /// Smallest nominal depth and wall thickness for chords in millimetres.
    pub chord_min_size: (f64, f64),
    /// Smallest constructible web and purlin tube in millimetres.
    pub web_min_size: (f64, f64),
}

impl DesignConstants {
    /// Check the constants that divide or scale a calculation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDesignConstant`] for the first of the
    /// spacings, strengths, factors and the lever-arm floor that is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [
            ("truss_spacing", self.truss_spacing),
            ("post_spacing", self.post_spacing),
            ("load_factor", self.load_factor),
            ("steel_strength", self.steel_strength),
            ("gamma_c", self.gamma_c),
            ("compression_phi", self.compression_phi),
            ("lever_arm_ratio", self.lever_arm_ratio),
            ("min_lever_arm", self.min_lever_arm),
            ("column_end_factor", self.column_end_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidDesignConstant { field, value });
            }
        }
        Ok(())
    }
}

impl Default for DesignConstants {
    fn default() -> Self {
        Self {
            truss_spacing: 2.5,
            post_spacing: 2.5,
            load_factor: 1.4,
            steel_strength: 24.0,
            gamma_c: 1.0,
            compression_phi: 0.5,
            lever_arm_ratio: 0.9,
            min_lever_arm: 0.1,
            column_end_factor: 2.0,
            slenderness_limit: 150.0,
            chord_min_size: (60.0, 2.0),
            web_min_size: (40.0, 2.0),
        }
    }
}

/// Material pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    /// Price of steel per kilogram.
    pub steel_rate_per_kg: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            steel_rate_per_kg: 120.0,
        }
    }
}

/// Read-only reference data passed explicitly into every calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTables {
    /// Ground snow load by region.
    pub snow_regions: Vec<Region>,
    /// Snow load used when the region id is unknown, in kPa.
    pub snow_fallback: f64,
    /// Reference wind pressure by region.
    pub wind_regions: Vec<Region>,
    /// Wind pressure used when the region id is unknown, in kPa.
    pub wind_fallback: f64,
    /// Design factors.
    pub design: DesignConstants,
    /// Material pricing.
    pub pricing: Pricing,
}

impl Default for EngineTables {
    fn default() -> Self {
        Self {
            snow_regions: vec![
                Region::new(1, 0.5, "I (0.5 kPa)"),
                Region::new(2, 1.0, "II (1.0 kPa)"),
                Region::new(3, 1.5, "III (1.5 kPa)"),
                Region::new(4, 2.0, "IV (2.0 kPa)"),
                Region::new(5, 2.5, "V (2.5 kPa)"),
            ],
            snow_fallback: 1.5,
            wind_regions: vec![
                Region::new(1, 0.23, "I (0.23 kPa)"),
                Region::new(2, 0.30, "II (0.30 kPa)"),
                Region::new(3, 0.38, "III (0.38 kPa)"),
                Region::new(4, 0.48, "IV (0.48 kPa)"),
            ],
            wind_fallback: 0.23,
            design: DesignConstants::default(),
            pricing: Pricing::default(),
        }
    }
}

impl EngineTables {
    /// Parse tables from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Settings`] when the text is not valid JSON for this
    /// type and [`EngineError::InvalidDesignConstant`] when a design constant is
    /// not positive.
    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        let tables: Self = serde_json::from_str(text)?;
        tables.design.validate()?;
        Ok(tables)
    }

    /// Ground snow load for a region, or `None` when the id is unknown.
    #[must_use]
    pub fn snow_load(&self, region: u8) -> Option<f64> {
        lookup(&self.snow_regions, region)
    }

    /// Reference wind pressure for a region, or `None` when the id is unknown.
    #[must_use]
    pub fn wind_pressure(&self, region: u8) -> Option<f64> {
        lookup(&self.wind_regions, region)
    }
}

/// Value of the region with the given id.
fn lookup(regions: &[Region], id: u8) -> Option<f64> {
    regions
        .iter()
        .find(|region| region.id == id)
        .map(|region| region.value)
}
