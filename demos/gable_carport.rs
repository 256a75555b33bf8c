use carport_truss::{render_specification_sheet, CarportConfig, RoofArchetype, TrussEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A 6 m wide, 7.5 m long gable carport under a metal tile roof
    let config = CarportConfig::from_json_str(
        r#"{"span": 6.0, "length": 7.5, "roof": "gable", "slope_deg": 25.0, "roofing": "metaltile"}"#,
    )?;
    assert_eq!(config.roof, RoofArchetype::Gable);

    // Size it with the standard tables and catalog
    let result = TrussEngine::default().calculate(&config);

    println!(
        "Truss height {:.2} m over {} panels",
        result.geometry.height, result.geometry.panel_count
    );
    println!(
        "Top chord {}, bottom chord {}, web {}, pillars {}",
        result.sections.top_chord.name,
        result.sections.bottom_chord.name,
        result.sections.web.name,
        result.sections.pillar.name
    );
    print!("{}", render_specification_sheet(&result.bom));
    for warning in &result.warnings {
        println!("warning: {warning}");
    }

    Ok(())
}
