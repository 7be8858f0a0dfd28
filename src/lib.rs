pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::{FlightConfig, SimulationConfig};
pub use constants::*;
pub use control::attitude::{AttitudeController, AttitudeState, GimbalTarget};
pub use control::designs::{Design, DesignFactory};
pub use control::environment::Planet;
pub use control::part::{Part, PartConfig, PartKind, PartType};
pub use control::spacecraft::{FlightState, Spacecraft};
pub use control::structure::{AggregateProperties, StagingPreview};
pub use errors::SimulationError;
pub use simulation::{
    assemble, assemble_design, center_of_mass_offset, cross_sectional_area, step, ControlInput,
    SimulationContext,
};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::orbit::OrbitalElements;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{StepResult, Telemetry};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
