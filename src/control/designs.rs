use std::path::Path;

use serde::Deserialize;

use super::part::PartConfig;
use crate::errors::SimulationError;

/// A named vehicle design. Parts are listed bottom-to-top.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Design {
    pub name: String,
    pub parts: Vec<PartConfig>,
}

impl Design {
    pub fn from_toml_str(contents: &str) -> Result<Self, SimulationError> {
        let design: Design = toml::from_str(contents)?;
        if design.parts.is_empty() {
            return Err(SimulationError::InvalidPart(format!(
                "design '{}' has no parts",
                design.name
            )));
        }
        Ok(design)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

fn named(config: PartConfig, name: &str) -> PartConfig {
    config.with_name(name)
}

fn engine(name: &str, dry_mass: f64, width: f64, height: f64, thrust: f64, rate: f64, isp: f64) -> PartConfig {
    named(PartConfig::engine(dry_mass, width, height, thrust, isp), name).with_fuel_consumption_rate(rate)
}

pub struct DesignFactory;

impl DesignFactory {
    pub const DEFAULT_DESIGN: &'static str = "DefaultOrbiter";

    pub fn names() -> [&'static str; 3] {
        ["DefaultOrbiter", "SmallProbe", "HeavyLifter_Lower"]
    }

    pub fn create(name: &str) -> Result<Design, SimulationError> {
        let parts = match name {
            "DefaultOrbiter" => vec![
                engine("Main Engine LKO", 1_000.0, 2.5, 2.0, 250_000.0, 80.0, 310.0),
                named(PartConfig::tank(1_500.0, 2.5, 8.0, 10_000.0), "Medium Tank"),
                named(PartConfig::pod(800.0, 2.5, 2.0), "Orbiter Pod"),
            ],
            "SmallProbe" => vec![
                engine("Small Engine", 200.0, 1.0, 1.0, 50_000.0, 20.0, 280.0),
                named(PartConfig::tank(100.0, 1.0, 2.0, 1_000.0), "Small Tank"),
                named(PartConfig::fairing(50.0, 1.2, 1.5), "1.2m Fairing"),
                PartConfig {
                    color: Some("gold".to_string()),
                    ..named(PartConfig::pod(150.0, 0.8, 0.8), "Probe Core")
                },
            ],
            "HeavyLifter_Lower" => vec![
                engine("Heavy Engine", 5_000.0, 4.0, 3.0, 1_000_000.0, 300.0, 300.0),
                named(PartConfig::tank(5_000.0, 4.0, 15.0, 50_000.0), "Large Tank"),
            ],
            other => return Err(SimulationError::UnknownDesign(other.to_string())),
        };
        Ok(Design {
            name: name.to_string(),
            parts,
        })
    }
}
