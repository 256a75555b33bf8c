//! Cross-section selection with simplified strength and stability checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Profile, ProfileCatalog};
use crate::config::{CarportConfig, DesignConstants};
use crate::errors::{raise, EngineError, Warning};
use crate::loads::{LoadAnalysis, Utilization};

/// Member role that receives its own cross-section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    /// Top chord, in compression.
    TopChord,
    /// Bottom chord, in tension.
    BottomChord,
    /// Web members.
    Web,
    /// Pillars.
    Pillar,
    /// Roof purlins.
    Purlin,
}

impl fmt::Display for SectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SectionRole::TopChord => "top chord",
            SectionRole::BottomChord => "bottom chord",
            SectionRole::Web => "web",
            SectionRole::Pillar => "pillar",
            SectionRole::Purlin => "purlin",
        };
        f.write_str(label)
    }
}

/// One chosen profile per member role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSections {
    /// Top chord profile.
    pub top_chord: Profile,
    /// Bottom chord profile.
    pub bottom_chord: Profile,
    /// Web profile.
    pub web: Profile,
    /// Pillar profile.
    pub pillar: Profile,
    /// Purlin profile.
    pub purlin: Profile,
}

impl ElementSections {
    /// Use the same profile for every role.
    #[must_use]
    pub fn uniform(profile: &Profile) -> Self {
        Self {
            top_chord: profile.clone(),
            bottom_chord: profile.clone(),
            web: profile.clone(),
            pillar: profile.clone(),
            purlin: profile.clone(),
        }
    }

    /// Profile assigned to a role.
    #[must_use]
    pub fn for_role(&self, role: SectionRole) -> &Profile {
        match role {
            SectionRole::TopChord => &self.top_chord,
            SectionRole::BottomChord => &self.bottom_chord,
            SectionRole::Web => &self.web,
            SectionRole::Pillar => &self.pillar,
            SectionRole::Purlin => &self.purlin,
        }
    }
}

/// Requirement a role places on the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Requirement {
    /// Role being sized.
    pub role: SectionRole,
    /// Required cross-sectional area in cm2.
    pub area: f64,
    /// Minimum nominal depth in mm.
    pub min_h: f64,
    /// Minimum nominal width in mm.
    pub min_b: f64,
    /// Minimum wall thickness in mm.
    pub min_t: f64,
}

/// Sections together with their utilization.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSelection {
    /// Chosen profiles.
    pub sections: ElementSections,
    /// Required over provided capacity per role, capped at 100 %.
    pub utilization: Utilization,
    /// Pillar slenderness ratio.
    pub slenderness: f64,
}

/// Utilization as a percentage, capped at 100.
#[must_use]
pub fn utilization_percent(required_area: f64, provided_area: f64) -> f64 {
    if provided_area <= 0.0 {
        return 100.0;
    }
    (required_area / provided_area * 100.0).clamp(0.0, 100.0)
}

/// Picks profiles from a catalog for the forces of one truss.
pub struct SectionSelector<'a> {
    /// Profiles ordered by weight.
    catalog: &'a dyn ProfileCatalog,
    /// Heaviest catalog entry, used when nothing qualifies.
    heaviest: &'a Profile,
    /// Design factors.
    design: &'a DesignConstants,
}

impl<'a> SectionSelector<'a> {
    /// Create a selector over a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCatalog`] when the catalog has no profiles.
    pub fn new(
        catalog: &'a dyn ProfileCatalog,
        design: &'a DesignConstants,
    ) -> Result<Self, EngineError> {
        let heaviest = catalog.heaviest().ok_or(EngineError::EmptyCatalog)?;
        Ok(Self {
            catalog,
            heaviest,
            design,
        })
    }

    /// Area in cm2 needed to carry a tensile force in kN.
    #[must_use]
    pub fn tension_area(&self, force: f64) -> f64 {
        force.abs() / (self.design.steel_strength * self.design.gamma_c)
    }

    /// Area in cm2 needed to carry a compressive force in kN with the fixed
    /// buckling reduction.
    #[must_use]
    pub fn compression_area(&self, force: f64) -> f64 {
        force.abs()
            / (self.design.compression_phi * self.design.steel_strength * self.design.gamma_c)
    }

    /// Lightest profile meeting the requirement, or the heaviest with a warning.
    pub fn select(&self, requirement: Requirement, warnings: &mut Vec<Warning>) -> &'a Profile {
        let qualifies = |profile: &Profile| {
            profile.area >= requirement.area
                && profile.meets_size(requirement.min_h, requirement.min_b, requirement.min_t)
        };
        match self.catalog.lightest_where(&qualifies) {
            Some(profile) => profile,
            None => {
                raise(
                    warnings,
                    Warning::UndersizedSection {
                        role: requirement.role,
                        profile: self.heaviest.name.to_string(),
                        required_area: requirement.area,
                        provided_area: self.heaviest.area,
                    },
                );
                self.heaviest
            }
        }
    }

    /// Pillar slenderness `mu * L / i_x` with the height in metres and `i_x` in cm.
    #[must_use]
    pub fn slenderness(&self, pillar: &Profile, height: f64) -> f64 {
        if pillar.i_x <= 0.0 {
            return f64::INFINITY;
        }
        height * 100.0 * self.design.column_end_factor / pillar.i_x
    }

    /// Size every role for the given loads.
    pub fn select_all(
        &self,
        config: &CarportConfig,
        loads: &LoadAnalysis,
        warnings: &mut Vec<Warning>,
    ) -> SectionSelection {
        let (chord_h, chord_t) = self.design.chord_min_size;
        let (web_h, web_t) = self.design.web_min_size;

        let top_area = self.compression_area(loads.chord_force);
        let bottom_area = self.tension_area(loads.chord_force);
        let web_area = self.compression_area(loads.web_force);
        let pillar_area = self.compression_area(loads.pillar_force);

        let top_chord = self.select(
            Requirement {
                role: SectionRole::TopChord,
                area: top_area,
                min_h: chord_h,
                min_b: 0.0,
                min_t: chord_t,
            },
            warnings,
        );
        let bottom_chord = self.select(
            Requirement {
                role: SectionRole::BottomChord,
                area: bottom_area,
                min_h: chord_h,
                min_b: 0.0,
                min_t: chord_t,
            },
            warnings,
        );
        let web = self.select(
            Requirement {
                role: SectionRole::Web,
                area: web_area,
                min_h: web_h,
                min_b: 0.0,
                min_t: web_t,
            },
            warnings,
        );
        let purlin = self.select(
            Requirement {
                role: SectionRole::Purlin,
                area: 0.0,
                min_h: web_h,
                min_b: 0.0,
                min_t: web_t,
            },
            warnings,
        );

        // Pillars come from the customer's square size class and are only checked.
        let (pillar_h, pillar_t) = config.pillar_size.minimum_size();
        let pillar = self.select(
            Requirement {
                role: SectionRole::Pillar,
                area: 0.0,
                min_h: pillar_h,
                min_b: pillar_h,
                min_t: pillar_t,
            },
            warnings,
        );
        if pillar_area > pillar.area {
            raise(
                warnings,
                Warning::UndersizedSection {
                    role: SectionRole::Pillar,
                    profile: pillar.name.to_string(),
                    required_area: pillar_area,
                    provided_area: pillar.area,
                },
            );
        }

        let slenderness = self.slenderness(pillar, config.eave_height);
        if slenderness > self.design.slenderness_limit {
            raise(
                warnings,
                Warning::SlenderColumn {
                    slenderness,
                    limit: self.design.slenderness_limit,
                },
            );
        }

        log::debug!(
            "sections: top {}, bottom {}, web {}, pillar {} (lambda {:.0})",
            top_chord.name,
            bottom_chord.name,
            web.name,
            pillar.name,
            slenderness
        );

        SectionSelection {
            utilization: Utilization {
                top: utilization_percent(top_area, top_chord.area),
                bottom: utilization_percent(bottom_area, bottom_chord.area),
                web: utilization_percent(web_area, web.area),
                pillar: utilization_percent(pillar_area, pillar.area),
            },
            sections: ElementSections {
                top_chord: top_chord.clone(),
                bottom_chord: bottom_chord.clone(),
                web: web.clone(),
                pillar: pillar.clone(),
                purlin: purlin.clone(),
            },
            slenderness,
        }
    }
}
