use approx::assert_relative_eq;
use carport_truss::{
    calculate, count_lines, export_dxf, generate_truss, CarportConfig, ElementRole, EngineTables,
    Profile, Requirement, RoofArchetype, SectionRole, SectionSelector, StandardCatalog,
    TrussEngine, Warning,
};

#[test]
fn six_metre_gable_at_twenty_degrees() {
    let mut warnings = Vec::new();
    let geometry =
        generate_truss(6.0, RoofArchetype::Gable, 20.0, &mut warnings).expect("truss generates");

    assert_relative_eq!(geometry.height, 3.0 * 20.0_f64.to_radians().tan(), epsilon = 1e-12);
    assert_relative_eq!(geometry.height, 1.09, epsilon = 5e-3);
    assert_eq!(geometry.panel_count, 8);
    assert_relative_eq!(geometry.panel_length, 0.75);
    assert_eq!(geometry.nodes.len(), 18);
    assert!(warnings.is_empty());
}

#[test]
fn structural_invariants_hold_across_spans_and_slopes() {
    for archetype in [
        RoofArchetype::Gable,
        RoofArchetype::SingleSlope,
        RoofArchetype::Triangular,
        RoofArchetype::Arched,
        RoofArchetype::SemiArched,
        RoofArchetype::Flat,
    ] {
        for span in [3.0, 4.5, 6.0, 7.7, 12.0] {
            for slope in [5.0, 15.0, 30.0, 45.0] {
                let geometry = generate_truss(span, archetype, slope, &mut Vec::new())
                    .expect("truss generates");
                assert_eq!(geometry.nodes.len(), 2 * (geometry.panel_count + 1));
                assert!(geometry.validate().is_ok());
                assert!(geometry.height >= 0.4);
                assert!(geometry.role_length(ElementRole::TopChord) >= span - 1e-9);
                assert!(geometry.role_length(ElementRole::BottomChord) >= span - 1e-9);
                assert_eq!(geometry.component_count(), 1);
            }
        }
    }
}

#[test]
fn minimum_span_floors_the_height_with_a_warning() {
    let mut warnings = Vec::new();
    let geometry =
        generate_truss(3.0, RoofArchetype::Gable, 10.0, &mut warnings).expect("truss generates");
    assert_relative_eq!(geometry.height, 0.4);
    assert!(matches!(warnings.as_slice(), [Warning::HeightFloor { .. }]));
    assert!(warnings[0].to_string().contains("minimum"));
}

#[test]
fn flat_roof_chords_equal_the_span() {
    let geometry =
        generate_truss(9.0, RoofArchetype::Flat, 0.0, &mut Vec::new()).expect("truss generates");
    assert_relative_eq!(geometry.role_length(ElementRole::TopChord), 9.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.role_length(ElementRole::BottomChord), 9.0, epsilon = 1e-9);
}

#[test]
fn oversized_chord_force_degrades_to_the_heaviest_profile() {
    let catalog = StandardCatalog::new([
        Profile {
            name: "small".into(),
            nominal_h: 60.0,
            nominal_b: 60.0,
            wall_t: 2.0,
            area: 4.0,
            i_x: 2.3,
            linear_weight: 3.5,
            ..Profile::default()
        },
        Profile {
            name: "large".into(),
            nominal_h: 80.0,
            nominal_b: 80.0,
            wall_t: 3.0,
            area: 9.0,
            i_x: 3.1,
            linear_weight: 7.0,
            ..Profile::default()
        },
    ])
    .expect("non-empty catalog");
    let tables = EngineTables::default();
    let selector = SectionSelector::new(&catalog, &tables.design).expect("catalog has profiles");

    let mut warnings = Vec::new();
    let area = selector.compression_area(5_000.0);
    let profile = selector.select(
        Requirement {
            role: SectionRole::TopChord,
            area,
            min_h: 60.0,
            min_b: 0.0,
            min_t: 2.0,
        },
        &mut warnings,
    );
    assert_eq!(profile.name, "large");
    assert!(warnings[0].to_string().starts_with("section undersized"));
}

#[test]
fn very_long_span_flags_the_top_chord_but_succeeds() {
    let result = TrussEngine::default().calculate(&CarportConfig {
        span: 40.0,
        snow_region: 5,
        ..CarportConfig::default()
    });
    assert!(result.success);
    assert_eq!(result.sections.top_chord.name, "100x100x5");
    assert!(result.diagnostics.iter().any(|warning| matches!(
        warning,
        Warning::UndersizedSection {
            role: SectionRole::TopChord,
            ..
        }
    )));
}

#[test]
fn drawing_has_one_line_per_element() {
    let result = TrussEngine::default().calculate(&CarportConfig {
        roof: RoofArchetype::Arched,
        span: 8.0,
        ..CarportConfig::default()
    });
    assert_eq!(count_lines(&result.drawing), result.geometry.elements.len());
    assert_eq!(result.drawing, export_dxf(&result.geometry));
}

#[test]
fn pipeline_is_deterministic() {
    let config = CarportConfig::from_json_str(
        r#"{"span": 5.4, "length": 7.5, "roof": "semiarched", "slope_deg": 12.0,
            "snow_region": 4, "roofing": "metaltile", "pillar_size": "100x100"}"#,
    )
    .expect("configuration parses");
    let tables = EngineTables::default();
    let catalog = StandardCatalog::default();
    let first = calculate(&config, &tables, &catalog);
    let second = calculate(&config, &tables, &catalog);
    assert_eq!(first, second);
    assert_eq!(
        first.bom.total_weight.to_bits(),
        second.bom.total_weight.to_bits()
    );
    assert_eq!(first.bom.items[3].quantity, 8);
}

#[test]
fn absurd_dimensions_and_tables_still_return_results() {
    let result = TrussEngine::default().calculate(&CarportConfig {
        span: 1.0e20,
        length: 1.0e12,
        ..CarportConfig::default()
    });
    assert!(result.success);
    assert_eq!(result.config.span, carport_truss::MAX_SPAN);
    assert_eq!(result.config.length, carport_truss::MAX_LENGTH);

    let mut tables = EngineTables::default();
    tables.design.post_spacing = -2.5;
    let result = calculate(&CarportConfig::default(), &tables, &StandardCatalog::default());
    assert!(!result.success);
    assert!(result.geometry.nodes.is_empty());
}

#[test]
fn nan_input_returns_a_failure_result() {
    let result = TrussEngine::default().calculate(&CarportConfig {
        slope_deg: f64::NAN,
        ..CarportConfig::default()
    });
    assert!(!result.success);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.geometry.elements.is_empty());
    assert!(result.bom.items.is_empty());
    assert!(result.drawing.contains("HEADER"));
}
