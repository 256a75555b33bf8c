//! Planar geometry primitives and the roof archetype table.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Smallest truss height the generator will produce, in metres.
pub const MIN_TRUSS_HEIGHT: f64 = 0.4;

/// Rise-to-span ratio of the arched archetype.
pub const ARCH_RISE_RATIO: f64 = 0.15;

/// Height of the top chord above the bottom chord at the eaves of the gable
/// and arched archetypes, in metres.
pub const EAVE_RISE: f64 = 0.3;

/// Height of the low end of the single-slope, triangular and semi-arched
/// archetypes, in metres.
pub const EAVE_OFFSET: f64 = 0.4;

/// Position in the truss plane measured in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Distance along the span from the left support.
    pub x: f64,
    /// Height above the bottom chord.
    pub y: f64,
}

impl Node {
    /// Create a [`Node`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the node into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance to another node.
    #[must_use]
    pub fn distance_to(self, other: Node) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector2<f64>> for Node {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Node> for Vector2<f64> {
    fn from(value: Node) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Node`] instances.
///
/// # Examples
/// ```
/// use carport_truss::node;
///
/// let eave = node(0.0, 0.3);
/// assert_eq!(eave.y, 0.3);
/// ```
#[must_use]
pub const fn node(x: f64, y: f64) -> Node {
    Node::new(x, y)
}

/// Roof shape offered by the configurator.
///
/// Every archetype-specific formula lives in the two `match` tables on this
/// type: [`RoofArchetype::truss_height_for`] and [`Roofline::height_at`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofArchetype {
    /// Mono-pitch roof rising from one eave to the other.
    #[serde(rename = "single")]
    SingleSlope,
    /// Mono-pitch roof drawn as a closed triangle.
    Triangular,
    /// Symmetric two-pitch roof with the ridge at midspan.
    Gable,
    /// Symmetric circular arch.
    Arched,
    /// Quarter arch rising towards the far eave.
    #[serde(rename = "semiarched")]
    SemiArched,
    /// Parallel-chord truss.
    #[default]
    Flat,
}

impl RoofArchetype {
    /// Truss height produced by the archetype formula, before the floor is applied.
    ///
    /// # Examples
    /// ```
    /// use carport_truss::RoofArchetype;
    ///
    /// let height = RoofArchetype::Gable.truss_height_for(6.0, 20.0);
    /// assert!((height - 3.0 * 20f64.to_radians().tan()).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn truss_height_for(self, span: f64, slope_deg: f64) -> f64 {
        let tan = slope_deg.to_radians().tan();
        match self {
            RoofArchetype::Gable => span / 2.0 * tan,
            RoofArchetype::SingleSlope | RoofArchetype::Triangular | RoofArchetype::SemiArched => {
                span * tan
            }
            RoofArchetype::Arched => span * ARCH_RISE_RATIO,
            RoofArchetype::Flat => span / 8.0,
        }
    }

    /// Build the top-chord curve for a truss of the given span and height.
    #[must_use]
    pub fn roofline(self, span: f64, height: f64, slope_deg: f64) -> Roofline {
        Roofline {
            archetype: self,
            span,
            height,
            tan_slope: slope_deg.to_radians().tan(),
        }
    }

    /// Human readable name used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RoofArchetype::SingleSlope => "single slope",
            RoofArchetype::Triangular => "triangular",
            RoofArchetype::Gable => "gable",
            RoofArchetype::Arched => "arched",
            RoofArchetype::SemiArched => "semi-arched",
            RoofArchetype::Flat => "flat",
        }
    }
}

/// Top-chord curve of one truss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Roofline {
    /// Archetype that selects the curve.
    archetype: RoofArchetype,
    /// Horizontal span in metres.
    span: f64,
    /// Truss height after the floor has been applied.
    height: f64,
    /// Tangent of the roof slope.
    tan_slope: f64,
}

impl Roofline {
    /// Height of the top chord above the bottom chord at distance `x` from the
    /// left support.
    #[must_use]
    pub fn height_at(&self, x: f64) -> f64 {
        let span = self.span;
        match self.archetype {
            RoofArchetype::Gable => {
                let half = span / 2.0;
                let profile = self.height * (1.0 - (x - half).abs() / half);
                profile.max(EAVE_RISE)
            }
            RoofArchetype::SingleSlope | RoofArchetype::Triangular => {
                EAVE_OFFSET + x * self.tan_slope
            }
            RoofArchetype::Arched => {
                let rise = (self.height - EAVE_RISE).max(f64::EPSILON);
                let radius = (span * span + 4.0 * rise * rise) / (8.0 * rise);
                let dx = x - span / 2.0;
                let centre_y = EAVE_RISE + rise - radius;
                centre_y + (radius * radius - dx * dx).max(0.0).sqrt()
            }
            RoofArchetype::SemiArched => {
                let t = ((span - x) / span).clamp(0.0, 1.0);
                EAVE_OFFSET + self.height * (1.0 - t * t).sqrt()
            }
            RoofArchetype::Flat => self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn node_distance_uses_both_axes() {
        assert_relative_eq!(node(0.0, 0.0).distance_to(node(3.0, 4.0)), 5.0);
    }

    #[test]
    fn node_to_vector_roundtrip() {
        let vector: Vector2<f64> = node(1.5, 0.4).into();
        assert_eq!(Node::from(vector), node(1.5, 0.4));
    }

    #[test]
    fn height_formulas_follow_the_archetype() {
        let tan20 = 20f64.to_radians().tan();
        assert_relative_eq!(RoofArchetype::Gable.truss_height_for(6.0, 20.0), 3.0 * tan20);
        assert_relative_eq!(
            RoofArchetype::SingleSlope.truss_height_for(6.0, 20.0),
            6.0 * tan20
        );
        assert_relative_eq!(RoofArchetype::Arched.truss_height_for(6.0, 20.0), 0.9);
        assert_relative_eq!(RoofArchetype::Flat.truss_height_for(6.0, 20.0), 0.75);
    }

    #[test]
    fn gable_roofline_peaks_at_midspan_and_keeps_an_eave_rise() {
        let roofline = RoofArchetype::Gable.roofline(6.0, 1.2, 20.0);
        assert_relative_eq!(roofline.height_at(3.0), 1.2);
        assert_relative_eq!(roofline.height_at(0.0), EAVE_RISE);
        assert_relative_eq!(roofline.height_at(6.0), EAVE_RISE);
        assert_relative_eq!(roofline.height_at(1.5), roofline.height_at(4.5));
    }

    #[test]
    fn arched_roofline_passes_through_eave_and_ridge() {
        let roofline = RoofArchetype::Arched.roofline(8.0, 1.2, 0.0);
        assert_relative_eq!(roofline.height_at(0.0), EAVE_RISE, epsilon = 1e-9);
        assert_relative_eq!(roofline.height_at(8.0), EAVE_RISE, epsilon = 1e-9);
        assert_relative_eq!(roofline.height_at(4.0), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn semi_arched_roofline_rises_to_the_far_eave() {
        let roofline = RoofArchetype::SemiArched.roofline(5.0, 1.0, 11.3);
        assert_relative_eq!(roofline.height_at(0.0), EAVE_OFFSET, epsilon = 1e-9);
        assert_relative_eq!(roofline.height_at(5.0), EAVE_OFFSET + 1.0, epsilon = 1e-9);
        assert!(roofline.height_at(2.5) > roofline.height_at(1.0));
    }

    #[test]
    fn archetype_tags_match_the_configurator() {
        let tag = serde_json::to_string(&RoofArchetype::SemiArched).expect("serializes");
        assert_eq!(tag, "\"semiarched\"");
        let parsed: RoofArchetype = serde_json::from_str("\"single\"").expect("parses");
        assert_eq!(parsed, RoofArchetype::SingleSlope);
    }
}
