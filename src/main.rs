use std::error::Error;
use std::fs;

use carport_truss::{
    render_calculation_report, render_specification_csv, render_specification_sheet,
    CarportConfig, TrussEngine,
};

/// Command line options.
struct Options {
    /// Optional path to a JSON configuration.
    config_path: Option<String>,
    /// Print the DXF drawing after the report.
    dxf: bool,
    /// Print the specification sheet as CSV instead of text.
    csv: bool,
}

/// Parse `carport-truss [--dxf] [--csv] [config.json]`.
fn parse_options() -> Options {
    let mut options = Options {
        config_path: None,
        dxf: false,
        csv: false,
    };
    for argument in std::env::args().skip(1) {
        match argument.as_str() {
            "--dxf" => options.dxf = true,
            "--csv" => options.csv = true,
            _ => options.config_path = Some(argument),
        }
    }
    options
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let options = parse_options();

    // Without a file the default 6 m x 6 m gable carport is sized.
    let config = match &options.config_path {
        Some(path) => CarportConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => CarportConfig::default(),
    };
    log::info!("sizing carport: {config:?}");

    let result = TrussEngine::default().calculate(&config);
    println!("{}", render_calculation_report(&result.config, &result));
    if !result.success {
        return Err("calculation failed".into());
    }

    if options.csv {
        print!("{}", render_specification_csv(&result.bom)?);
    } else {
        print!("{}", render_specification_sheet(&result.bom));
    }
    if options.dxf {
        println!("{}", result.drawing);
    }
    Ok(())
}
