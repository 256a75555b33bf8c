//! Regional loads and equivalent-beam internal forces.
//!
//! The truss is treated as a simply supported beam under a uniform line load.
//! Chord forces follow from the midspan moment over an effective lever arm and
//! the web force from the support shear on a 45 degree diagonal. Wind is
//! reported but deliberately left out of the governing load.

use serde::{Deserialize, Serialize};

use crate::config::{CarportConfig, EngineTables};
use crate::errors::{raise, Warning};
use crate::truss::TrussGeometry;

/// Utilization of each member role as a percentage in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    /// Top chord.
    pub top: f64,
    /// Bottom chord.
    pub bottom: f64,
    /// Web members.
    pub web: f64,
    /// Pillars.
    pub pillar: f64,
}

/// Loads on one truss and the forces they produce.
///
/// Area loads are in kN/m2, line loads in kN/m, moments in kN m and forces in kN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAnalysis {
    /// Design snow load.
    pub snow_load: f64,
    /// Design wind load, reported only.
    pub wind_load: f64,
    /// Dead load of the roof covering.
    pub dead_load: f64,
    /// Governing area load, snow plus dead.
    pub area_load: f64,
    /// Governing line load on one truss.
    pub line_load: f64,
    /// Midspan moment of the equivalent beam.
    pub max_moment: f64,
    /// Support shear of the equivalent beam.
    pub max_shear: f64,
    /// Lever arm used to turn the moment into a chord force, in metres.
    pub lever_arm: f64,
    /// Axial force shared by the top (compression) and bottom (tension) chords.
    pub chord_force: f64,
    /// Axial force in the end diagonal.
    pub web_force: f64,
    /// Axial force delivered to a pillar.
    pub pillar_force: f64,
    /// Per-role utilization, filled in once sections are chosen.
    pub utilization: Utilization,
}

/// Snow shape coefficient for a roof slope in degrees.
///
/// # Examples
/// ```
/// use carport_truss::snow_shape_coefficient;
///
/// assert_eq!(snow_shape_coefficient(20.0), 1.0);
/// assert_eq!(snow_shape_coefficient(45.0), 0.5);
/// assert_eq!(snow_shape_coefficient(70.0), 0.0);
/// ```
#[must_use]
pub fn snow_shape_coefficient(slope_deg: f64) -> f64 {
    if slope_deg <= 30.0 {
        1.0
    } else if slope_deg <= 60.0 {
        (60.0 - slope_deg) / 30.0
    } else {
        0.0
    }
}

/// Wind exposure coefficient for open terrain by height above ground in metres.
#[must_use]
pub fn exposure_coefficient(height: f64) -> f64 {
    match height {
        h if h <= 5.0 => 0.5,
        h if h <= 10.0 => 0.65,
        h if h <= 20.0 => 0.85,
        _ => 1.1,
    }
}

/// Derive loads and internal forces for a sanitised configuration.
pub fn analyse_loads(
    config: &CarportConfig,
    geometry: &TrussGeometry,
    tables: &EngineTables,
    warnings: &mut Vec<Warning>,
) -> LoadAnalysis {
    let design = &tables.design;

    let ground_snow = tables.snow_load(config.snow_region).unwrap_or_else(|| {
        raise(
            warnings,
            Warning::UnknownSnowRegion {
                region: config.snow_region,
                fallback: tables.snow_fallback,
            },
        );
        tables.snow_fallback
    });
    let reference_wind = tables.wind_pressure(config.wind_region).unwrap_or_else(|| {
        raise(
            warnings,
            Warning::UnknownWindRegion {
                region: config.wind_region,
                fallback: tables.wind_fallback,
            },
        );
        tables.wind_fallback
    });

    let snow_load = ground_snow * snow_shape_coefficient(config.slope_deg) * design.load_factor;
    let wind_load =
        reference_wind * exposure_coefficient(config.eave_height) * design.load_factor;
    let dead_load = config.roofing.dead_load();

    let area_load = snow_load + dead_load;
    let line_load = area_load * design.truss_spacing;

    let span = geometry.span;
    let max_moment = line_load * span * span / 8.0;
    let max_shear = line_load * span / 2.0;

    let raw_lever_arm = design.lever_arm_ratio * geometry.height;
    let lever_arm = if raw_lever_arm < design.min_lever_arm {
        raise(
            warnings,
            Warning::LeverArmFloored {
                raw: raw_lever_arm,
                floor: design.min_lever_arm,
            },
        );
        design.min_lever_arm
    } else {
        raw_lever_arm
    };

    let chord_force = max_moment / lever_arm;
    let web_force = max_shear / std::f64::consts::FRAC_PI_4.sin();

    log::debug!(
        "loads: snow {snow_load:.3}, wind {wind_load:.3}, dead {dead_load:.3} kN/m2; \
         q = {line_load:.3} kN/m, M = {max_moment:.3} kN m, N_chord = {chord_force:.3} kN"
    );

    LoadAnalysis {
        snow_load,
        wind_load,
        dead_load,
        area_load,
        line_load,
        max_moment,
        max_shear,
        lever_arm,
        chord_force,
        web_force,
        pillar_force: max_shear,
        utilization: Utilization::default(),
    }
}
