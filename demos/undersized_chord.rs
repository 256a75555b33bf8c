use carport_truss::{
    CarportConfig, EngineTables, Profile, StandardCatalog, TrussEngine, STANDARD_PROFILES,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keep only thin-walled tubes so the chords cannot be satisfied
    let light: Vec<Profile> = STANDARD_PROFILES
        .iter()
        .filter(|profile| profile.nominal_h <= 60.0 && profile.wall_t <= 2.0)
        .cloned()
        .collect();
    let engine = TrussEngine::new(EngineTables::default(), StandardCatalog::new(light)?);

    let result = engine.calculate(&CarportConfig {
        span: 9.0,
        snow_region: 5,
        ..CarportConfig::default()
    });

    // The design still comes back, flagged rather than rejected
    println!("success: {}", result.success);
    println!("top chord: {}", result.sections.top_chord.name);
    for warning in &result.warnings {
        println!("warning: {warning}");
    }

    Ok(())
}
