//! Truss lattice generation for every roof archetype.

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};

use crate::config::MAX_SPAN;
use crate::errors::{raise, EngineError, Warning};
use crate::geometry::{Node, RoofArchetype, MIN_TRUSS_HEIGHT};

/// Target panel length in metres used to discretise the span.
pub const TARGET_PANEL_LENGTH: f64 = 1.5;

/// Fewest panels a truss may have.
pub const MIN_PANEL_COUNT: usize = 4;

/// Top and bottom nodes closer than this are treated as already joined.
const JOINT_TOLERANCE: f64 = 1.0e-9;

/// Structural function of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    /// Upper boundary member carrying the roof.
    TopChord,
    /// Lower boundary member, horizontal at `y = 0`.
    BottomChord,
    /// Vertical or diagonal member between the chords.
    Web,
    /// Post supporting the truss.
    Pillar,
}

/// Straight member between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Index of the start node.
    pub from: usize,
    /// Index of the end node.
    pub to: usize,
    /// Structural function of the member.
    pub role: ElementRole,
    /// True length in metres, computed once when the element is created.
    pub length: f64,
}

impl Element {
    /// Create an element between two existing nodes, measuring its true length.
    fn between(nodes: &[Node], from: usize, to: usize, role: ElementRole) -> Self {
        Self {
            from,
            to,
            role,
            length: nodes[from].distance_to(nodes[to]),
        }
    }
}

/// Node and element graph for one truss.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussGeometry {
    /// Horizontal span in metres.
    pub span: f64,
    /// Truss height in metres, never below [`MIN_TRUSS_HEIGHT`] for generated trusses.
    pub height: f64,
    /// Number of panels along the span.
    pub panel_count: usize,
    /// Horizontal length of one panel in metres.
    pub panel_length: f64,
    /// Bottom chord nodes followed by top chord nodes.
    pub nodes: Vec<Node>,
    /// Chord and web members.
    pub elements: Vec<Element>,
}

impl TrussGeometry {
    /// Iterate over the elements with the given role.
    pub fn elements_with(&self, role: ElementRole) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |element| element.role == role)
    }

    /// Sum of the true lengths of every element with the given role.
    #[must_use]
    pub fn role_length(&self, role: ElementRole) -> f64 {
        self.elements_with(role).map(|element| element.length).sum()
    }

    /// Check that every element references an existing node.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DanglingElement`] for the first element whose
    /// `from` or `to` index is out of range.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (element_idx, element) in self.elements.iter().enumerate() {
            for node in [element.from, element.to] {
                if node >= self.nodes.len() {
                    return Err(EngineError::DanglingElement {
                        element: element_idx,
                        node,
                    });
                }
            }
        }
        Ok(())
    }

    /// Build an undirected graph view of the lattice.
    #[must_use]
    pub fn lattice_graph(&self) -> UnGraph<Node, ElementRole> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.elements.len());
        let indices: Vec<_> = self.nodes.iter().map(|node| graph.add_node(*node)).collect();
        for element in &self.elements {
            graph.add_edge(indices[element.from], indices[element.to], element.role);
        }
        graph
    }

    /// Number of disconnected pieces in the lattice.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.lattice_graph())
    }
}

/// Number of panels for a given span: `max(4, ceil(span / 1.5) * 2)`.
///
/// # Examples
/// ```
/// use carport_truss::panel_count_for;
///
/// assert_eq!(panel_count_for(6.0), 8);
/// assert_eq!(panel_count_for(1.0), 4);
/// ```
#[must_use]
pub fn panel_count_for(span: f64) -> usize {
    let raw = ((span / TARGET_PANEL_LENGTH).ceil().max(0.0) as usize).saturating_mul(2);
    raw.max(MIN_PANEL_COUNT)
}

/// Generate the truss lattice for the given span, archetype and slope.
///
/// The span must already be positive and finite; the engine sanitises
/// configuration values before calling this. Heights below
/// [`MIN_TRUSS_HEIGHT`] are raised to the floor and reported as
/// [`Warning::HeightFloor`].
///
/// # Errors
///
/// Returns [`EngineError::SpanOutOfRange`] unless `0 < span <= MAX_SPAN`, and
/// [`EngineError::DanglingElement`] if the generated lattice is inconsistent.
pub fn generate_truss(
    span: f64,
    archetype: RoofArchetype,
    slope_deg: f64,
    warnings: &mut Vec<Warning>,
) -> Result<TrussGeometry, EngineError> {
    if !(span > 0.0 && span <= MAX_SPAN) {
        return Err(EngineError::SpanOutOfRange {
            span,
            max: MAX_SPAN,
        });
    }
    let raw_height = archetype.truss_height_for(span, slope_deg);
    let height = if raw_height < MIN_TRUSS_HEIGHT {
        raise(
            warnings,
            Warning::HeightFloor {
                raw: raw_height,
                floor: MIN_TRUSS_HEIGHT,
            },
        );
        MIN_TRUSS_HEIGHT
    } else {
        raw_height
    };

    let panel_count = panel_count_for(span);
    let panel_length = span / panel_count as f64;
    let roofline = archetype.roofline(span, height, slope_deg);

    let mut nodes = Vec::with_capacity(2 * (panel_count + 1));
    for i in 0..=panel_count {
        nodes.push(Node::new(i as f64 * panel_length, 0.0));
    }
    for i in 0..=panel_count {
        let x = i as f64 * panel_length;
        nodes.push(Node::new(x, roofline.height_at(x)));
    }
    let top = |i: usize| panel_count + 1 + i;

    let mut elements = Vec::with_capacity(4 * panel_count + 1);
    for i in 0..panel_count {
        elements.push(Element::between(&nodes, i, i + 1, ElementRole::BottomChord));
    }
    for i in 0..panel_count {
        elements.push(Element::between(&nodes, top(i), top(i + 1), ElementRole::TopChord));
    }

    for i in 0..=panel_count {
        // End boundaries only need a vertical when the chords do not already meet there.
        // With an eave rise they never meet, and the end vertical closes the eave panel.
        let interior = i != 0 && i != panel_count;
        if interior || nodes[top(i)].y - nodes[i].y > JOINT_TOLERANCE {
            elements.push(Element::between(&nodes, i, top(i), ElementRole::Web));
        }
        if i < panel_count {
            let diagonal = if i % 2 == 0 {
                Element::between(&nodes, i, top(i + 1), ElementRole::Web)
            } else {
                Element::between(&nodes, top(i), i + 1, ElementRole::Web)
            };
            elements.push(diagonal);
        }
    }

    let geometry = TrussGeometry {
        span,
        height,
        panel_count,
        panel_length,
        nodes,
        elements,
    };
    geometry.validate()?;

    let components = geometry.component_count();
    if components > 1 {
        raise(warnings, Warning::DisconnectedLattice { components });
    }

    log::debug!(
        "generated {} truss: height {:.3} m, {} panels of {:.3} m, {} elements",
        archetype.label(),
        geometry.height,
        geometry.panel_count,
        geometry.panel_length,
        geometry.elements.len()
    );
    Ok(geometry)
}
