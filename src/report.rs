//! Plain-text and CSV artifacts built from a calculation result.

use std::fmt::Write;

use crate::bom::BillOfMaterials;
use crate::config::CarportConfig;
use crate::engine::CalculationResult;
use crate::errors::EngineError;

/// Render the numbered specification sheet.
///
/// Each line item reads `N. name (profile) - L.LLm x Q pcs = W.W kg`, followed
/// by the total weight and the material cost.
#[must_use]
pub fn render_specification_sheet(bom: &BillOfMaterials) -> String {
    let mut output = String::from("Specification\n");
    for (idx, item) in bom.items.iter().enumerate() {
        writeln!(
            &mut output,
            "{}. {} ({}) - {:.2}m x {} pcs = {:.1} kg",
            idx + 1,
            item.name,
            item.profile_name,
            item.representative_length,
            item.quantity,
            item.weight
        )
        .expect("writing to string cannot fail");
    }
    writeln!(&mut output, "Total weight: {:.1} kg", bom.total_weight)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Material cost: {:.0}", bom.total_cost)
        .expect("writing to string cannot fail");
    output
}

/// Render the specification sheet as CSV with a header row.
///
/// # Errors
///
/// Returns [`EngineError::Csv`] if a record cannot be written and
/// [`EngineError::Utf8`] if the buffer is not valid UTF-8.
///
/// # Examples
/// ```
/// use carport_truss::{render_specification_csv, BillOfMaterials};
///
/// let csv = render_specification_csv(&BillOfMaterials::default()).expect("csv renders");
/// assert_eq!(csv, "name,profile,length_m,quantity,weight_kg\n");
/// ```
pub fn render_specification_csv(bom: &BillOfMaterials) -> Result<String, EngineError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "profile", "length_m", "quantity", "weight_kg"])?;
    for item in &bom.items {
        writer.write_record([
            item.name.clone(),
            item.profile_name.clone(),
            format!("{:.2}", item.representative_length),
            item.quantity.to_string(),
            format!("{:.1}", item.weight),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| EngineError::Csv(error.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render a calculation report covering geometry, loads, sections and warnings.
#[must_use]
pub fn render_calculation_report(config: &CarportConfig, result: &CalculationResult) -> String {
    let mut output = String::new();

    if !result.success {
        output.push_str("Calculation failed\n");
        for warning in &result.warnings {
            writeln!(&mut output, "  ! {warning}").expect("writing to string cannot fail");
        }
        return output;
    }

    let geometry = &result.geometry;
    writeln!(
        &mut output,
        "Carport {:.2} m x {:.2} m, eave {:.2} m, {} roof at {:.1} deg",
        config.span,
        config.length,
        config.eave_height,
        config.roof.label(),
        config.slope_deg
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Truss: height {:.3} m, {} panels of {:.3} m, {} nodes, {} elements",
        geometry.height,
        geometry.panel_count,
        geometry.panel_length,
        geometry.nodes.len(),
        geometry.elements.len()
    )
    .expect("writing to string cannot fail");

    let loads = &result.loads;
    writeln!(
        &mut output,
        "Loads: snow {:.3} kN/m2, wind {:.3} kN/m2 (not combined), dead {:.3} kN/m2",
        loads.snow_load, loads.wind_load, loads.dead_load
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Beam: q = {:.3} kN/m, M = {:.3} kN m, Q = {:.3} kN, lever arm {:.3} m",
        loads.line_load, loads.max_moment, loads.max_shear, loads.lever_arm
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Forces: chord {:.2} kN, web {:.2} kN, pillar {:.2} kN",
        loads.chord_force, loads.web_force, loads.pillar_force
    )
    .expect("writing to string cannot fail");

    let sections = &result.sections;
    let utilization = &loads.utilization;
    for (label, name, percent) in [
        ("Top chord", &sections.top_chord.name, Some(utilization.top)),
        ("Bottom chord", &sections.bottom_chord.name, Some(utilization.bottom)),
        ("Web", &sections.web.name, Some(utilization.web)),
        ("Pillar", &sections.pillar.name, Some(utilization.pillar)),
        ("Purlin", &sections.purlin.name, None),
    ] {
        match percent {
            Some(percent) => writeln!(&mut output, "{label}: {name} ({percent:.0} %)"),
            None => writeln!(&mut output, "{label}: {name}"),
        }
        .expect("writing to string cannot fail");
    }

    if !result.warnings.is_empty() {
        output.push_str("Warnings:\n");
        for warning in &result.warnings {
            writeln!(&mut output, "  ! {warning}").expect("writing to string cannot fail");
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::BomItem;
    use crate::catalog::StandardCatalog;
    use crate::config::EngineTables;
    use crate::engine::calculate;

    fn sample_bom() -> BillOfMaterials {
        BillOfMaterials {
            items: vec![
                BomItem {
                    name: "Top chord".to_string(),
                    profile_name: "60x40x2".to_string(),
                    representative_length: 6.384,
                    quantity: 1,
                    weight: 18.64,
                },
                BomItem {
                    name: "Pillars".to_string(),
                    profile_name: "80x80x3".to_string(),
                    representative_length: 2.5,
                    quantity: 8,
                    weight: 141.4,
                },
            ],
            total_weight: 160.04,
            total_cost: 19205.0,
        }
    }

    #[test]
    fn specification_sheet_numbers_line_items() {
        let sheet = render_specification_sheet(&sample_bom());
        assert!(sheet.contains("1. Top chord (60x40x2) - 6.38m x 1 pcs = 18.6 kg"));
        assert!(sheet.contains("2. Pillars (80x80x3) - 2.50m x 8 pcs = 141.4 kg"));
        assert!(sheet.contains("Total weight: 160.0 kg"));
        assert!(sheet.contains("Material cost: 19205"));
    }

    #[test]
    fn csv_sheet_has_header_and_one_row_per_item() {
        let csv = render_specification_csv(&sample_bom()).expect("csv renders");
        let rows: Vec<_> = csv.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "name,profile,length_m,quantity,weight_kg");
        assert_eq!(rows[2], "Pillars,80x80x3,2.50,8,141.4");
    }

    #[test]
    fn calculation_report_lists_sections_and_loads() {
        let config = CarportConfig::default();
        let result = calculate(&config, &EngineTables::default(), &StandardCatalog::default());
        let report = render_calculation_report(&config, &result);
        assert!(report.contains("gable roof at 20.0 deg"));
        assert!(report.contains("8 panels of 0.750 m"));
        assert!(report.contains("Top chord: "));
        assert!(report.contains("Purlin: 40x20x2"));
        assert!(!report.contains("Calculation failed"));
    }

    #[test]
    fn failed_calculation_report_shows_the_error() {
        let config = CarportConfig {
            span: f64::NAN,
            ..CarportConfig::default()
        };
        let result = calculate(&config, &EngineTables::default(), &StandardCatalog::default());
        let report = render_calculation_report(&config, &result);
        assert!(report.starts_with("Calculation failed"));
        assert!(report.contains("span must be a finite number"));
    }
}
