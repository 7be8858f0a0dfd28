use serde::Deserialize;

use super::attachment::{default_nodes, AttachmentNode};
use crate::constants::{ISP_VACUUM_DEFAULT, STANDARD_GRAVITY};
use crate::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Pod,
    Tank,
    Engine,
    Fairing,
}

impl PartType {
    pub fn name(&self) -> &'static str {
        match self {
            PartType::Pod => "Pod",
            PartType::Tank => "Tank",
            PartType::Engine => "Engine",
            PartType::Fairing => "Fairing",
        }
    }
}

/// Part descriptor as it arrives from a design template, the builder or a
/// TOML file. Missing fields fall back to the defaults of the part type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartConfig {
    #[serde(rename = "type")]
    pub part_type: PartType,
    pub name: Option<String>,
    pub color: Option<String>,
    pub dry_mass_kg: Option<f64>,
    pub width_m: Option<f64>,
    pub height_m: Option<f64>,
    pub fuel_capacity_kg: Option<f64>,
    pub current_fuel_kg: Option<f64>,
    pub thrust_n: Option<f64>,
    pub fuel_consumption_rate_kg_s: Option<f64>,
    pub isp: Option<f64>,
    pub thrust_limiter: Option<f64>,
}

impl PartConfig {
    pub fn new(part_type: PartType) -> Self {
        PartConfig {
            part_type,
            name: None,
            color: None,
            dry_mass_kg: None,
            width_m: None,
            height_m: None,
            fuel_capacity_kg: None,
            current_fuel_kg: None,
            thrust_n: None,
            fuel_consumption_rate_kg_s: None,
            isp: None,
            thrust_limiter: None,
        }
    }

    pub fn pod(dry_mass_kg: f64, width_m: f64, height_m: f64) -> Self {
        PartConfig::new(PartType::Pod).with_body(dry_mass_kg, width_m, height_m)
    }

    pub fn fairing(dry_mass_kg: f64, width_m: f64, height_m: f64) -> Self {
        PartConfig::new(PartType::Fairing).with_body(dry_mass_kg, width_m, height_m)
    }

    pub fn tank(dry_mass_kg: f64, width_m: f64, height_m: f64, fuel_capacity_kg: f64) -> Self {
        PartConfig {
            fuel_capacity_kg: Some(fuel_capacity_kg),
            ..PartConfig::new(PartType::Tank).with_body(dry_mass_kg, width_m, height_m)
        }
    }

    pub fn engine(dry_mass_kg: f64, width_m: f64, height_m: f64, thrust_n: f64, isp: f64) -> Self {
        PartConfig {
            thrust_n: Some(thrust_n),
            isp: Some(isp),
            ..PartConfig::new(PartType::Engine).with_body(dry_mass_kg, width_m, height_m)
        }
    }

    pub fn with_body(mut self, dry_mass_kg: f64, width_m: f64, height_m: f64) -> Self {
        self.dry_mass_kg = Some(dry_mass_kg);
        self.width_m = Some(width_m);
        self.height_m = Some(height_m);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_current_fuel(mut self, fuel_kg: f64) -> Self {
        self.current_fuel_kg = Some(fuel_kg);
        self
    }

    pub fn with_fuel_consumption_rate(mut self, rate_kg_s: f64) -> Self {
        self.fuel_consumption_rate_kg_s = Some(rate_kg_s);
        self
    }

    pub fn with_thrust_limiter(mut self, limiter: f64) -> Self {
        self.thrust_limiter = Some(limiter);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuelTank {
    pub capacity: f64,
    pub fuel: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub thrust: f64,
    pub isp: f64,
    pub fuel_consumption_rate: f64,
    pub thrust_limiter: f64,
    /// Persistent per-engine toggle set by the player.
    pub enabled: bool,
    /// Whether the engine fired during the last step. Not persisted.
    pub is_active: bool,
}

impl Engine {
    pub fn effective_thrust(&self) -> f64 {
        self.thrust * self.thrust_limiter
    }

    /// Propellant mass flow at the current limiter setting, kg/s.
    pub fn mass_flow_rate(&self) -> f64 {
        if self.isp > 0.0 {
            self.effective_thrust() / (self.isp * STANDARD_GRAVITY)
        } else {
            self.fuel_consumption_rate * self.thrust_limiter
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartKind {
    Pod,
    Tank(FuelTank),
    Engine(Engine),
    Fairing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub color: String,
    pub dry_mass: f64,
    pub width: f64,
    pub height: f64,
    /// Height of this part's bottom above the bottom of the stack. Set by
    /// reassembly.
    pub relative_bottom: f64,
    pub nodes: Vec<AttachmentNode>,
    pub kind: PartKind,
}

struct PartDefaults {
    dry_mass: f64,
    width: f64,
    height: f64,
    color: &'static str,
}

fn defaults_for(part_type: PartType) -> PartDefaults {
    match part_type {
        PartType::Pod => PartDefaults {
            dry_mass: 500.0,
            width: 2.0,
            height: 1.5,
            color: "#c0c0c0",
        },
        PartType::Tank => PartDefaults {
            dry_mass: 150.0,
            width: 1.8,
            height: 4.0,
            color: "#aabbcc",
        },
        PartType::Engine => PartDefaults {
            dry_mass: 200.0,
            width: 2.2,
            height: 2.0,
            color: "#505050",
        },
        PartType::Fairing => PartDefaults {
            dry_mass: 100.0,
            width: 2.5,
            height: 3.0,
            color: "#e0e0e0",
        },
    }
}

const DEFAULT_FUEL_CAPACITY: f64 = 1_000.0;
const DEFAULT_ENGINE_THRUST: f64 = 30_000.0;
const DEFAULT_FUEL_CONSUMPTION_RATE: f64 = 10.0;

fn non_negative(name: &str, field: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidPart(format!(
            "{name}: {field} must be finite and non-negative, got {value}"
        )))
    }
}

impl Part {
    pub fn from_config(config: &PartConfig) -> Result<Self, SimulationError> {
        let defaults = defaults_for(config.part_type);
        let name = config
            .name
            .clone()
            .unwrap_or_else(|| config.part_type.name().to_string());

        let dry_mass = non_negative(&name, "dry mass", config.dry_mass_kg.unwrap_or(defaults.dry_mass))?;
        let width = non_negative(&name, "width", config.width_m.unwrap_or(defaults.width))?;
        let height = non_negative(&name, "height", config.height_m.unwrap_or(defaults.height))?;

        let kind = match config.part_type {
            PartType::Pod => PartKind::Pod,
            PartType::Fairing => PartKind::Fairing,
            PartType::Tank => {
                let capacity = non_negative(
                    &name,
                    "fuel capacity",
                    config.fuel_capacity_kg.unwrap_or(DEFAULT_FUEL_CAPACITY),
                )?;
                let fuel = non_negative(&name, "current fuel", config.current_fuel_kg.unwrap_or(capacity))?;
                if fuel > capacity {
                    return Err(SimulationError::InvalidPart(format!(
                        "{name}: current fuel {fuel} kg exceeds capacity {capacity} kg"
                    )));
                }
                PartKind::Tank(FuelTank { capacity, fuel })
            }
            PartType::Engine => {
                let thrust = non_negative(&name, "thrust", config.thrust_n.unwrap_or(DEFAULT_ENGINE_THRUST))?;
                let isp = non_negative(&name, "isp", config.isp.unwrap_or(ISP_VACUUM_DEFAULT))?;
                let fuel_consumption_rate = non_negative(
                    &name,
                    "fuel consumption rate",
                    config
                        .fuel_consumption_rate_kg_s
                        .unwrap_or(DEFAULT_FUEL_CONSUMPTION_RATE),
                )?;
                let thrust_limiter = config.thrust_limiter.unwrap_or(1.0);
                if !(0.0..=1.0).contains(&thrust_limiter) {
                    return Err(SimulationError::InvalidPart(format!(
                        "{name}: thrust limiter must be within [0, 1], got {thrust_limiter}"
                    )));
                }
                PartKind::Engine(Engine {
                    thrust,
                    isp,
                    fuel_consumption_rate,
                    thrust_limiter,
                    enabled: true,
                    is_active: false,
                })
            }
        };

        Ok(Part {
            name,
            color: config
                .color
                .clone()
                .unwrap_or_else(|| defaults.color.to_string()),
            dry_mass,
            width,
            height,
            relative_bottom: 0.0,
            nodes: default_nodes(config.part_type),
            kind,
        })
    }

    pub fn part_type(&self) -> PartType {
        match self.kind {
            PartKind::Pod => PartType::Pod,
            PartKind::Tank(_) => PartType::Tank,
            PartKind::Engine(_) => PartType::Engine,
            PartKind::Fairing => PartType::Fairing,
        }
    }

    /// Dry mass plus any propellant carried.
    pub fn mass(&self) -> f64 {
        self.dry_mass + self.fuel()
    }

    pub fn fuel(&self) -> f64 {
        match &self.kind {
            PartKind::Tank(tank) => tank.fuel,
            _ => 0.0,
        }
    }

    /// Vertical centre of the part measured from the stack bottom.
    pub fn center_height(&self) -> f64 {
        self.relative_bottom + self.height / 2.0
    }

    pub fn tank(&self) -> Option<&FuelTank> {
        match &self.kind {
            PartKind::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    pub fn tank_mut(&mut self) -> Option<&mut FuelTank> {
        match &mut self.kind {
            PartKind::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    pub fn engine(&self) -> Option<&Engine> {
        match &self.kind {
            PartKind::Engine(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn engine_mut(&mut self) -> Option<&mut Engine> {
        match &mut self.kind {
            PartKind::Engine(engine) => Some(engine),
            _ => None,
        }
    }
}
