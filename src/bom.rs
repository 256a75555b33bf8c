//! Bill of materials for one carport frame.

use serde::{Deserialize, Serialize};

use crate::config::{CarportConfig, EngineTables};
use crate::sections::ElementSections;
use crate::truss::{ElementRole, TrussGeometry};

/// One line of the bill of materials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    /// Part description.
    pub name: String,
    /// Profile designation.
    pub profile_name: String,
    /// Length of one piece, or the combined length for chords and webs, in metres.
    pub representative_length: f64,
    /// Number of pieces.
    pub quantity: usize,
    /// Total weight of the line in kilograms.
    pub weight: f64,
}

/// Ordered materials list with totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    /// Line items: top chord, bottom chord, web, pillars.
    pub items: Vec<BomItem>,
    /// Sum of the line weights in kilograms.
    pub total_weight: f64,
    /// Material cost, rounded up to a whole currency unit.
    pub total_cost: f64,
}

/// Number of pillars: one per post spacing along the length plus one, in two rows.
///
/// # Examples
/// ```
/// use carport_truss::pillar_count;
///
/// assert_eq!(pillar_count(6.0, 2.5), 8);
/// assert_eq!(pillar_count(5.0, 2.5), 6);
/// ```
#[must_use]
pub fn pillar_count(length: f64, post_spacing: f64) -> usize {
    let bays = (length / post_spacing).ceil().max(0.0) as usize;
    bays.saturating_add(1).saturating_mul(2)
}

/// Aggregate element lengths and pillars into a priced materials list.
#[must_use]
pub fn build_bill_of_materials(
    config: &CarportConfig,
    geometry: &TrussGeometry,
    sections: &ElementSections,
    tables: &EngineTables,
) -> BillOfMaterials {
    let mut items = Vec::with_capacity(4);
    for (name, role, profile) in [
        ("Top chord", ElementRole::TopChord, &sections.top_chord),
        ("Bottom chord", ElementRole::BottomChord, &sections.bottom_chord),
        ("Web", ElementRole::Web, &sections.web),
    ] {
        let length = geometry.role_length(role);
        items.push(BomItem {
            name: name.to_string(),
            profile_name: profile.name.to_string(),
            representative_length: length,
            quantity: 1,
            weight: length * profile.linear_weight,
        });
    }

    let pillars = pillar_count(config.length, tables.design.post_spacing);
    items.push(BomItem {
        name: "Pillars".to_string(),
        profile_name: sections.pillar.name.to_string(),
        representative_length: config.eave_height,
        quantity: pillars,
        weight: config.eave_height * pillars as f64 * sections.pillar.linear_weight,
    });

    let total_weight: f64 = items.iter().map(|item| item.weight).sum();
    let total_cost = (total_weight * tables.pricing.steel_rate_per_kg).ceil();

    log::debug!("bill of materials: {total_weight:.1} kg, cost {total_cost:.0}");

    BillOfMaterials {
        items,
        total_weight,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{ProfileCatalog, StandardCatalog};
    use crate::geometry::RoofArchetype;
    use crate::truss::generate_truss;

    fn fixture() -> (CarportConfig, TrussGeometry, ElementSections, EngineTables) {
        let config = CarportConfig::default();
        let geometry = generate_truss(6.0, RoofArchetype::Gable, 20.0, &mut Vec::new())
            .expect("truss generates");
        let catalog = StandardCatalog::default();
        let mut sections =
            ElementSections::uniform(catalog.lightest().expect("catalog has profiles"));
        sections.pillar = catalog.heaviest().expect("catalog has profiles").clone();
        (config, geometry, sections, EngineTables::default())
    }

    #[test]
    fn pillar_count_rounds_bays_up_and_doubles_rows() {
        assert_eq!(pillar_count(3.0, 2.5), 6);
        assert_eq!(pillar_count(7.5, 2.5), 8);
        assert_eq!(pillar_count(12.0, 2.5), 12);
    }

    #[test]
    fn pillar_count_saturates_instead_of_overflowing() {
        assert_eq!(pillar_count(6.0, 0.0), usize::MAX);
    }

    #[test]
    fn total_weight_is_the_sum_of_role_weights_and_pillars() {
        let (config, geometry, sections, tables) = fixture();
        let bom = build_bill_of_materials(&config, &geometry, &sections, &tables);

        let expected = geometry.role_length(ElementRole::TopChord)
            * sections.top_chord.linear_weight
            + geometry.role_length(ElementRole::BottomChord) * sections.bottom_chord.linear_weight
            + geometry.role_length(ElementRole::Web) * sections.web.linear_weight
            + config.eave_height * 8.0 * sections.pillar.linear_weight;
        assert_relative_eq!(bom.total_weight, expected, epsilon = 1e-9);
        assert_relative_eq!(bom.total_cost, (expected * 120.0).ceil());
    }

    #[test]
    fn line_items_are_ordered_and_named() {
        let (config, geometry, sections, tables) = fixture();
        let bom = build_bill_of_materials(&config, &geometry, &sections, &tables);
        let names: Vec<_> = bom.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Top chord", "Bottom chord", "Web", "Pillars"]);
        assert_eq!(bom.items[3].quantity, 8);
        assert_eq!(bom.items[3].profile_name, "100x100x5");
    }

    #[test]
    fn recomputation_is_bit_for_bit_identical() {
        let (config, geometry, sections, tables) = fixture();
        let first = build_bill_of_materials(&config, &geometry, &sections, &tables);
        let second = build_bill_of_materials(&config, &geometry, &sections, &tables);
        assert_eq!(first.total_weight.to_bits(), second.total_weight.to_bits());
        assert_eq!(first, second);
    }
}
