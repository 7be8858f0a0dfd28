//! Caller-facing entry points. The caller owns the `SimulationContext` and
//! passes it into every step; nothing here is global.

use tracing::warn;

use crate::config::SimulationConfig;
use crate::control::attitude::AttitudeController;
use crate::control::designs::Design;
use crate::control::part::PartConfig;
use crate::control::spacecraft::Spacecraft;
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::StepResult;
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::trajectory_system::contact::ContactResolver;

/// Player input for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlInput {
    /// Master engine command.
    pub engine_command: bool,
    pub gimbal_left: bool,
    pub gimbal_right: bool,
    /// Overrides the exponential atmosphere inside the envelope when set.
    pub air_density_hint: Option<f64>,
}

impl ControlInput {
    pub fn coast() -> Self {
        ControlInput::default()
    }

    pub fn burn() -> Self {
        ControlInput {
            engine_command: true,
            ..ControlInput::default()
        }
    }

    pub fn with_gimbal(mut self, left: bool, right: bool) -> Self {
        self.gimbal_left = left;
        self.gimbal_right = right;
        self
    }

    pub fn with_air_density(mut self, density: f64) -> Self {
        self.air_density_hint = Some(density);
        self
    }
}

/// Environment, tunables and the simulation clock.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub config: SimulationConfig,
    pub attitude: AttitudeController,
    pub contact: ContactResolver,
    pub aerodynamics: Aerodynamics,
    pub elapsed_time: f64,
    pub steps: u64,
    pub skipped_steps: u64,
}

impl Default for SimulationContext {
    fn default() -> Self {
        SimulationContext::new(SimulationConfig::default())
    }
}

impl SimulationContext {
    pub fn new(config: SimulationConfig) -> Self {
        SimulationContext {
            attitude: AttitudeController::from_config(&config),
            contact: ContactResolver::from_config(&config),
            aerodynamics: Aerodynamics::new(config.flight.drag_coefficient),
            config,
            elapsed_time: 0.0,
            steps: 0,
            skipped_steps: 0,
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SimulationError> {
        Ok(SimulationContext::new(SimulationConfig::from_toml_str(contents)?))
    }
}

/// Builds a vehicle from bottom-to-top part descriptors.
pub fn assemble(context: &SimulationContext, configs: &[PartConfig]) -> Result<Spacecraft, SimulationError> {
    Spacecraft::assemble("Custom", configs, &context.config)
}

pub fn assemble_design(context: &SimulationContext, design: &Design) -> Result<Spacecraft, SimulationError> {
    Spacecraft::assemble(&design.name, &design.parts, &context.config)
}

/// Advances `spacecraft` by `delta_time` seconds, clamped to the configured
/// maximum. A non-positive or NaN delta time skips the step and leaves every
/// state untouched.
///
/// Landing, crashing and running dry are reported in the `StepResult`. Only
/// numerical corruption is an error, and it stays one for every later call,
/// skipped ones included, until the vehicle is reset.
pub fn step(
    spacecraft: &mut Spacecraft,
    context: &mut SimulationContext,
    delta_time: f64,
    input: &ControlInput,
) -> Result<StepResult, SimulationError> {
    if let Some(field) = spacecraft.corruption() {
        return Err(SimulationError::CorruptedState { field });
    }
    if delta_time.is_nan() || delta_time <= 0.0 {
        warn!(delta_time, "skipping step with invalid delta time");
        context.skipped_steps += 1;
        let mut result = spacecraft.passive_result(context);
        result.skipped = true;
        return Ok(result);
    }

    let delta_time = delta_time.min(context.config.flight.max_delta_time_s);
    let result = spacecraft.update(context, delta_time, input)?;
    context.elapsed_time += delta_time;
    context.steps += 1;
    Ok(result)
}

pub fn center_of_mass_offset(spacecraft: &Spacecraft) -> f64 {
    spacecraft.center_of_mass_offset()
}

pub fn cross_sectional_area(spacecraft: &Spacecraft, velocity_angle: f64) -> f64 {
    spacecraft.cross_sectional_area(velocity_angle)
}
