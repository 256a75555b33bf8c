//! Minimal DXF (AutoCAD R12) export of a truss drawing.
//!
//! The output holds a header declaring the format version and an entity
//! section with one `LINE` per element on layer `0`, terminated by `EOF`.
//! Curved archetypes are already split into straight segments, so no other
//! entity type is ever written.

use std::fmt::Write;

use crate::geometry::Node;
use crate::truss::{Element, TrussGeometry};

/// AutoCAD version code written to `$ACADVER`.
pub const DXF_VERSION: &str = "AC1009";

/// Serialise the truss elements as DXF line entities.
///
/// # Examples
/// ```
/// use carport_truss::{export_dxf, TrussGeometry};
///
/// let drawing = export_dxf(&TrussGeometry::default());
/// assert!(drawing.starts_with("0\nSECTION\n2\nHEADER"));
/// assert!(drawing.ends_with("0\nEOF"));
/// ```
#[must_use]
pub fn export_dxf(geometry: &TrussGeometry) -> String {
    let mut output = String::new();
    write_header(&mut output);
    output.push_str("0\nSECTION\n2\nENTITIES\n");
    for element in &geometry.elements {
        if let Some((start, end)) = element_endpoints(geometry, element) {
            write_line(&mut output, start, end);
        } else {
            log::warn!("skipping element {element:?} with a missing node");
        }
    }
    output.push_str("0\nENDSEC\n0\nEOF");
    output
}

/// Count the `LINE` entities in a drawing produced by [`export_dxf`].
#[must_use]
pub fn count_lines(drawing: &str) -> usize {
    let lines: Vec<&str> = drawing.lines().collect();
    lines
        .windows(2)
        .filter(|pair| pair[0] == "0" && pair[1] == "LINE")
        .count()
}

/// Header section declaring the format version.
fn write_header(output: &mut String) {
    output.push_str("0\nSECTION\n2\nHEADER\n");
    writeln!(output, "9\n$ACADVER\n1\n{DXF_VERSION}").expect("writing to string cannot fail");
    output.push_str("0\nENDSEC\n");
}

/// One `LINE` entity on layer `0` with both endpoints at `z = 0`.
fn write_line(output: &mut String, start: Node, end: Node) {
    writeln!(
        output,
        "0\nLINE\n8\n0\n10\n{}\n20\n{}\n30\n0.0\n11\n{}\n21\n{}\n31\n0.0",
        start.x, start.y, end.x, end.y
    )
    .expect("writing to string cannot fail");
}

/// Endpoints of an element, if both nodes exist.
#[must_use]
pub fn element_endpoints(geometry: &TrussGeometry, element: &Element) -> Option<(Node, Node)> {
    Some((
        *geometry.nodes.get(element.from)?,
        *geometry.nodes.get(element.to)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{node, RoofArchetype};
    use crate::truss::{generate_truss, ElementRole};

    #[test]
    fn one_line_per_element_for_every_archetype() {
        for archetype in [
            RoofArchetype::Gable,
            RoofArchetype::Arched,
            RoofArchetype::SemiArched,
            RoofArchetype::Flat,
        ] {
            let geometry =
                generate_truss(6.0, archetype, 25.0, &mut Vec::new()).expect("truss generates");
            let drawing = export_dxf(&geometry);
            assert_eq!(count_lines(&drawing), geometry.elements.len());
            assert!(!drawing.contains("ARC"));
        }
    }

    #[test]
    fn line_record_carries_both_endpoints() {
        let geometry = TrussGeometry {
            nodes: vec![node(0.0, 0.0), node(1.5, 0.25)],
            elements: vec![Element {
                from: 0,
                to: 1,
                role: ElementRole::Web,
                length: 1.5_f64.hypot(0.25),
            }],
            ..TrussGeometry::default()
        };
        let drawing = export_dxf(&geometry);
        assert!(drawing.contains("0\nLINE\n8\n0\n10\n0\n20\n0\n30\n0.0\n11\n1.5\n21\n0.25\n31\n0.0\n"));
        assert!(drawing.contains("$ACADVER\n1\nAC1009"));
        assert!(drawing.ends_with("0\nENDSEC\n0\nEOF"));
    }

    #[test]
    fn empty_geometry_still_produces_a_valid_file() {
        let drawing = export_dxf(&TrussGeometry::default());
        assert_eq!(count_lines(&drawing), 0);
        assert!(drawing.contains("ENTITIES"));
    }

    #[test]
    fn endpoints_resolve_through_the_node_list() {
        let geometry =
            generate_truss(4.0, RoofArchetype::Flat, 0.0, &mut Vec::new()).expect("generates");
        let (start, end) =
            element_endpoints(&geometry, &geometry.elements[0]).expect("endpoints exist");
        assert_eq!(start, node(0.0, 0.0));
        assert_eq!(end.y, 0.0);
    }
}
