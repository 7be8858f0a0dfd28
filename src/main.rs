use std::path::Path;

use spacecraft_simulation::*;
use tracing_subscriber::EnvFilter;

fn load_design(argument: Option<&str>) -> Result<Design, SimulationError> {
    match argument {
        Some(path) if path.ends_with(".toml") => Design::load(path),
        Some(name) => DesignFactory::create(name),
        None => DesignFactory::create(DesignFactory::DEFAULT_DESIGN),
    }
}

/// Vertical climb, a short pitch-over with the gimbal, then full burn until dry.
fn flight_program(elapsed_time: f64) -> ControlInput {
    if elapsed_time < 10.0 {
        ControlInput::burn()
    } else if elapsed_time < 16.0 {
        ControlInput::burn().with_gimbal(false, true)
    } else {
        ControlInput::burn()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) if Path::new(path).exists() => SimulationConfig::load(path)?,
        _ => SimulationConfig::default(),
    };
    let design = load_design(args.get(1).map(String::as_str))?;

    let preview = StagingPreview::from_configs(&design.parts);
    println!(
        "{}: wet {:.0} kg, dry {:.0} kg, thrust {:.0} N, delta-v {:.0} m/s",
        design.name, preview.wet_mass, preview.dry_mass, preview.total_thrust, preview.delta_v
    );

    let mut context = SimulationContext::new(config);
    let mut spacecraft = assemble_design(&context, &design)?;
    spacecraft.launch();

    let mut telemetry = Telemetry::new(10.0);

    while context.elapsed_time < MAX_SIMULATION_TIME {
        let input = flight_program(context.elapsed_time);
        match step(&mut spacecraft, &mut context, TIME_STEP, &input) {
            Ok(result) => {
                telemetry.record(context.elapsed_time, &spacecraft, &context.config.planet, &result);

                if result.crashed {
                    println!("Spacecraft has crashed. Ending simulation.");
                    break;
                }
                if result.is_escape() {
                    println!("Spacecraft is on an escape trajectory. Ending simulation.");
                    break;
                }
                if result.landed && spacecraft.total_fuel() <= 0.0 {
                    println!("Spacecraft is back on the ground without fuel. Ending simulation.");
                    break;
                }
            }
            Err(e) => {
                println!("Error during simulation step: {}", e);
                break;
            }
        }
    }

    telemetry.display_data();

    Ok(())
}
