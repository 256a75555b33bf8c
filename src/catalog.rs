//! Hollow steel profile catalog.
//!
//! Profiles are reference data, not computed. Selection code only sees the
//! [`ProfileCatalog`] trait so it can be exercised against synthetic catalogs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Square or rectangular hollow section with tabulated properties.
///
/// Dimensions are in millimetres, sectional properties in centimetre units and
/// the linear weight in kg/m.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Designation, e.g. `60x40x2`.
    pub name: Cow<'static, str>,
    /// Nominal depth in mm.
    pub nominal_h: f64,
    /// Nominal width in mm.
    pub nominal_b: f64,
    /// Wall thickness in mm.
    pub wall_t: f64,
    /// Cross-sectional area in cm2.
    pub area: f64,
    /// Second moment of area about the strong axis in cm4.
    pub ix: f64,
    /// Second moment of area about the weak axis in cm4.
    pub iy: f64,
    /// Elastic section modulus about the strong axis in cm3.
    pub wx: f64,
    /// Elastic section modulus about the weak axis in cm3.
    pub wy: f64,
    /// Radius of gyration about the strong axis in cm.
    pub i_x: f64,
    /// Radius of gyration about the weak axis in cm.
    pub i_y: f64,
    /// Mass per metre in kg/m.
    pub linear_weight: f64,
}

impl Profile {
    /// Whether the nominal depth, width and wall thickness reach the given minimums in mm.
    #[must_use]
    pub fn meets_size(&self, min_h: f64, min_b: f64, min_t: f64) -> bool {
        self.nominal_h >= min_h && self.nominal_b >= min_b && self.wall_t >= min_t
    }
}

/// Table row helper so the static catalog stays readable.
#[allow(clippy::too_many_arguments)]
const fn tube(
    name: &'static str,
    h: f64,
    b: f64,
    t: f64,
    area: f64,
    ix: f64,
    iy: f64,
    wx: f64,
    wy: f64,
    i_x: f64,
    i_y: f64,
    linear_weight: f64,
) -> Profile {
    Profile {
        name: Cow::Borrowed(name),
        nominal_h: h,
        nominal_b: b,
        wall_t: t,
        area,
        ix,
        iy,
        wx,
        wy,
        i_x,
        i_y,
        linear_weight,
    }
}

/// Square and rectangular tubes after GOST 30245-2003 / GOST 8639-82.
pub static STANDARD_PROFILES: [Profile; 17] = [
    tube("40x40x2", 40.0, 40.0, 2.0, 2.92, 6.74, 6.74, 3.37, 3.37, 1.52, 1.52, 2.29),
    tube("40x40x3", 40.0, 40.0, 3.0, 4.21, 9.17, 9.17, 4.59, 4.59, 1.48, 1.48, 3.30),
    tube("50x50x2", 50.0, 50.0, 2.0, 3.72, 14.07, 14.07, 5.63, 5.63, 1.95, 1.95, 2.92),
    tube("50x50x3", 50.0, 50.0, 3.0, 5.41, 19.53, 19.53, 7.81, 7.81, 1.90, 1.90, 4.25),
    tube("60x60x2", 60.0, 60.0, 2.0, 4.52, 25.15, 25.15, 8.38, 8.38, 2.36, 2.36, 3.55),
    tube("60x60x3", 60.0, 60.0, 3.0, 6.61, 35.61, 35.61, 11.87, 11.87, 2.32, 2.32, 5.19),
    tube("80x80x3", 80.0, 80.0, 3.0, 9.01, 88.34, 88.34, 22.09, 22.09, 3.13, 3.13, 7.07),
    tube("80x80x4", 80.0, 80.0, 4.0, 11.75, 112.5, 112.5, 28.1, 28.1, 3.09, 3.09, 9.22),
    tube("100x100x3", 100.0, 100.0, 3.0, 11.41, 177.3, 177.3, 35.4, 35.4, 3.94, 3.94, 8.96),
    tube("100x100x4", 100.0, 100.0, 4.0, 14.95, 228.6, 228.6, 45.7, 45.7, 3.91, 3.91, 11.73),
    tube("100x100x5", 100.0, 100.0, 5.0, 18.36, 275.9, 275.9, 55.2, 55.2, 3.88, 3.88, 14.41),
    tube("40x20x2", 40.0, 20.0, 2.0, 2.12, 4.31, 1.25, 2.15, 1.25, 1.42, 0.77, 1.66),
    tube("60x40x2", 60.0, 40.0, 2.0, 3.72, 18.27, 9.38, 6.09, 4.69, 2.22, 1.59, 2.92),
    tube("60x40x3", 60.0, 40.0, 3.0, 5.41, 25.59, 13.06, 8.53, 6.53, 2.17, 1.55, 4.25),
    tube("80x40x3", 80.0, 40.0, 3.0, 6.61, 53.68, 16.59, 13.42, 8.30, 2.85, 1.58, 5.19),
    tube("80x60x3", 80.0, 60.0, 3.0, 7.81, 72.07, 43.87, 18.02, 14.62, 3.04, 2.37, 6.13),
    tube("80x60x4", 80.0, 60.0, 4.0, 10.15, 91.2, 55.4, 22.8, 18.5, 3.00, 2.34, 7.97),
];

/// Read-only source of profiles ordered by non-decreasing linear weight.
pub trait ProfileCatalog: Send + Sync {
    /// Profiles from lightest to heaviest.
    fn profiles(&self) -> &[Profile];

    /// First profile, in weight order, that satisfies `accept`.
    fn lightest_where(&self, accept: &dyn Fn(&Profile) -> bool) -> Option<&Profile> {
        self.profiles().iter().find(|profile| accept(profile))
    }

    /// Lightest profile overall.
    fn lightest(&self) -> Option<&Profile> {
        self.profiles().first()
    }

    /// Heaviest profile overall.
    fn heaviest(&self) -> Option<&Profile> {
        self.profiles().last()
    }
}

/// In-memory catalog sorted by linear weight on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardCatalog {
    /// Profiles in non-decreasing weight order.
    profiles: Vec<Profile>,
}

impl StandardCatalog {
    /// Build a catalog from arbitrary profiles.
    ///
    /// The sort is stable, so profiles of equal weight keep their input order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCatalog`] when `profiles` yields nothing.
    ///
    /// # Examples
    /// ```
    /// use carport_truss::{ProfileCatalog, StandardCatalog, STANDARD_PROFILES};
    ///
    /// let catalog = StandardCatalog::new(STANDARD_PROFILES.iter().cloned())
    ///     .expect("non-empty catalog");
    /// assert_eq!(catalog.lightest().map(|p| p.name.as_ref()), Some("40x20x2"));
    /// ```
    pub fn new(profiles: impl IntoIterator<Item = Profile>) -> Result<Self, EngineError> {
        let mut profiles: Vec<Profile> = profiles.into_iter().collect();
        if profiles.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        profiles.sort_by(|a, b| a.linear_weight.total_cmp(&b.linear_weight));
        Ok(Self { profiles })
    }

    /// Parse a catalog from a JSON array of profiles.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Settings`] for malformed JSON and
    /// [`EngineError::EmptyCatalog`] for an empty array.
    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        let profiles: Vec<Profile> = serde_json::from_str(text)?;
        Self::new(profiles)
    }
}

impl Default for StandardCatalog {
    fn default() -> Self {
        let mut profiles = STANDARD_PROFILES.to_vec();
        profiles.sort_by(|a, b| a.linear_weight.total_cmp(&b.linear_weight));
        Self { profiles }
    }
}

impl ProfileCatalog for StandardCatalog {
    fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}
