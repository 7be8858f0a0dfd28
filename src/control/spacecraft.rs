use tracing::{debug, error, info, warn};

use super::attitude::{AttitudeState, GimbalTarget};
use super::environment::Planet;
use super::part::{Part, PartConfig};
use super::propulsion;
use super::structure::{self, AggregateProperties};
use crate::config::SimulationConfig;
use crate::errors::SimulationError;
use crate::simulation::{ControlInput, SimulationContext};
use crate::telemetry_system::telemetry::StepResult;
use crate::trajectory_system::aerodynamics::cross_sectional_area;
use crate::trajectory_system::contact::{ContactBody, ContactOutcome};
use crate::trajectory_system::kinematics::Kinematics;
use crate::trajectory_system::orbit::OrbitalElements;
use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    /// On the pad, waiting for `launch`.
    Idle,
    Flying,
    Landed,
    /// Terminal until the vehicle is reset.
    Crashed,
    /// A state value went non-finite. Terminal until the vehicle is reset.
    Corrupted,
}

/// An assembled vehicle: the part stack, its cached aggregates and the state
/// advanced by the integrator.
#[derive(Debug, Clone)]
pub struct Spacecraft {
    pub name: String,
    /// Bottom-to-top.
    pub parts: Vec<Part>,
    pub properties: AggregateProperties,
    pub kinematics: Kinematics,
    pub attitude: AttitudeState,
    pub state: FlightState,
    pub current_thrust: f64,
    descriptors: Vec<PartConfig>,
    planet_radius: f64,
    min_moment_of_inertia: f64,
    corrupted_field: Option<&'static str>,
}

impl Spacecraft {
    /// Builds the vehicle and parks it upright on the surface below the
    /// planet centre.
    pub fn assemble(
        name: &str,
        configs: &[PartConfig],
        config: &SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let mut parts = build_parts(configs)?;
        structure::check_stacking(&parts);
        let properties = structure::reassemble(&mut parts, config.flight.min_moment_of_inertia);
        if properties.dry_mass <= 0.0 {
            return Err(SimulationError::InvalidPart(format!(
                "{name}: vehicle dry mass must be positive"
            )));
        }

        let mut spacecraft = Spacecraft {
            name: name.to_string(),
            parts,
            properties,
            kinematics: Kinematics::default(),
            attitude: AttitudeState::default(),
            state: FlightState::Idle,
            current_thrust: 0.0,
            descriptors: configs.to_vec(),
            planet_radius: config.planet.radius_m,
            min_moment_of_inertia: config.flight.min_moment_of_inertia,
            corrupted_field: None,
        };
        spacecraft.place_on_surface(0.0);
        info!(
            name,
            parts = spacecraft.parts.len(),
            mass = properties.total_mass,
            delta_v = properties.delta_v,
            "assembled spacecraft"
        );
        Ok(spacecraft)
    }

    /// Leaves the pad. Returns whether the vehicle was idle.
    pub fn launch(&mut self) -> bool {
        if self.state != FlightState::Idle {
            warn!(name = %self.name, state = ?self.state, "launch ignored");
            return false;
        }
        self.state = FlightState::Flying;
        info!(name = %self.name, "launched");
        true
    }

    /// Rebuilds the vehicle from its part descriptors, refuelled, and
    /// stands it upright on the surface at `surface_angle`.
    pub fn reset_on_surface(&mut self, surface_angle: f64) -> Result<(), SimulationError> {
        self.parts = build_parts(&self.descriptors)?;
        self.refresh_mass_properties();
        self.current_thrust = 0.0;
        self.corrupted_field = None;
        self.place_on_surface(surface_angle);
        info!(name = %self.name, surface_angle, "reset on surface");
        Ok(())
    }

    fn place_on_surface(&mut self, surface_angle: f64) {
        self.kinematics = Kinematics::new(
            Vector2D::from_heading(surface_angle) * self.planet_radius,
            Vector2D::ZERO,
        );
        self.attitude = AttitudeState::upright(surface_angle);
        self.state = FlightState::Idle;
    }

    fn refresh_mass_properties(&mut self) {
        self.properties = structure::reassemble(&mut self.parts, self.min_moment_of_inertia);
    }

    /// Advances the vehicle by one already validated time step.
    pub(crate) fn update(
        &mut self,
        context: &SimulationContext,
        delta_time: f64,
        input: &ControlInput,
    ) -> Result<StepResult, SimulationError> {
        if let Some(field) = self.corrupted_field {
            return Err(SimulationError::CorruptedState { field });
        }
        if matches!(self.state, FlightState::Idle | FlightState::Crashed) {
            return Ok(self.passive_result(context));
        }

        let planet = &context.config.planet;
        let controller = &context.attitude;
        let target = GimbalTarget::from_input(input.gimbal_left, input.gimbal_right);

        controller.update_gimbal(&mut self.attitude, target, delta_time);
        let burn = propulsion::fire_engines(&mut self.parts, input.engine_command, delta_time);
        self.current_thrust = burn.thrust;

        let torque = controller.net_torque(
            &self.attitude,
            target,
            input.engine_command,
            burn.thrust,
            structure::center_of_mass_offset(&self.parts),
            self.properties.moment_of_inertia,
        );
        let rotated = controller.integrate(
            &mut self.attitude,
            torque,
            self.properties.moment_of_inertia,
            delta_time,
        );
        self.check(rotated)?;

        let mass: f64 = self.parts.iter().map(Part::mass).sum();
        let position = self.kinematics.position;
        let velocity = self.kinematics.velocity;

        let thrust = propulsion::thrust_vector(burn.thrust, self.attitude.orientation, self.attitude.gimbal_angle);
        let gravity = planet.gravity_force(&position, mass);
        let air_density = self.air_density(planet, &position, input.air_density_hint);
        let area = self.cross_sectional_area(velocity.heading());
        let drag = context.aerodynamics.calculate_drag(velocity, air_density, area);

        let mut net_force = thrust + gravity + drag.force;
        let outcome = context.contact.resolve(
            ContactBody {
                position: &mut self.kinematics.position,
                velocity: &mut self.kinematics.velocity,
                attitude: &mut self.attitude,
                net_force: &mut net_force,
                mass,
                weight: gravity.magnitude(),
            },
            delta_time,
        );

        match outcome {
            ContactOutcome::Crashed => self.crash(),
            ContactOutcome::Landed => {
                self.kinematics.integrate_euler(net_force, mass, delta_time);
                if self.state == FlightState::Flying {
                    self.state = FlightState::Landed;
                    info!(name = %self.name, "touched down");
                }
            }
            ContactOutcome::Airborne => {
                self.kinematics
                    .integrate_rk4(planet, thrust + drag.force, mass, delta_time);
                if self.state == FlightState::Landed {
                    self.state = FlightState::Flying;
                    info!(name = %self.name, "lifted off");
                }
            }
        }

        self.refresh_mass_properties();
        let orbit = OrbitalElements::from_state(planet, &self.kinematics.position, &self.kinematics.velocity);
        let validated = self.validate();
        self.check(validated)?;

        Ok(StepResult {
            air_density,
            drag_magnitude: drag.magnitude,
            apoapsis: orbit.apoapsis,
            periapsis: orbit.periapsis,
            landed: outcome == ContactOutcome::Landed,
            crashed: self.state == FlightState::Crashed,
            skipped: false,
            thrust: self.current_thrust,
            fuel_consumed: burn.fuel_consumed,
            state: self.state,
        })
    }

    /// Result for a vehicle that is not being integrated this step.
    pub(crate) fn passive_result(&self, context: &SimulationContext) -> StepResult {
        let planet = &context.config.planet;
        let position = self.kinematics.position;
        let orbit = OrbitalElements::from_state(planet, &position, &self.kinematics.velocity);
        let conditions = planet.conditions_at(&position);
        StepResult {
            air_density: conditions.air_density,
            drag_magnitude: 0.0,
            apoapsis: orbit.apoapsis,
            periapsis: orbit.periapsis,
            landed: self.state != FlightState::Crashed && context.contact.in_contact(&position),
            crashed: self.state == FlightState::Crashed,
            skipped: false,
            thrust: 0.0,
            fuel_consumed: 0.0,
            state: self.state,
        }
    }

    fn crash(&mut self) {
        self.state = FlightState::Crashed;
        self.current_thrust = 0.0;
        for engine in self.parts.iter_mut().filter_map(Part::engine_mut) {
            engine.is_active = false;
        }
        warn!(name = %self.name, "crashed");
    }

    fn check(&mut self, outcome: Result<(), SimulationError>) -> Result<(), SimulationError> {
        if let Err(SimulationError::CorruptedState { field }) = outcome {
            self.state = FlightState::Corrupted;
            self.corrupted_field = Some(field);
            error!(name = %self.name, field, "state corrupted, integration stopped");
        }
        outcome
    }

    /// Single end-of-step pass over every integrated quantity.
    fn validate(&self) -> Result<(), SimulationError> {
        self.kinematics.validate()?;
        self.attitude.validate()?;
        let fields = [
            ("total_mass", self.properties.total_mass),
            ("total_fuel", self.properties.total_fuel),
            ("moment_of_inertia", self.properties.moment_of_inertia),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::CorruptedState { field });
            }
        }
        Ok(())
    }

    fn air_density(&self, planet: &Planet, position: &Vector2D, hint: Option<f64>) -> f64 {
        let altitude = planet.altitude(position);
        if !planet.is_in_atmosphere(altitude) {
            return 0.0;
        }
        match hint {
            Some(density) if density.is_finite() && density >= 0.0 => density,
            Some(density) => {
                debug!(density, "ignoring invalid air density hint");
                planet.air_density(altitude)
            }
            None => planet.air_density(altitude),
        }
    }

    pub fn center_of_mass_offset(&self) -> f64 {
        structure::center_of_mass_offset(&self.parts)
    }

    pub fn cross_sectional_area(&self, velocity_angle: f64) -> f64 {
        cross_sectional_area(
            self.attitude.orientation,
            velocity_angle,
            self.properties.max_width,
            self.properties.stack_height,
        )
    }

    pub fn total_mass(&self) -> f64 {
        self.properties.total_mass
    }

    pub fn dry_mass(&self) -> f64 {
        self.properties.dry_mass
    }

    pub fn total_fuel(&self) -> f64 {
        self.properties.total_fuel
    }

    pub fn fuel_capacity(&self) -> f64 {
        self.properties.fuel_capacity
    }

    /// 0 when the vehicle carries no tanks.
    pub fn fuel_fraction(&self) -> f64 {
        if self.properties.fuel_capacity > 0.0 {
            self.properties.total_fuel / self.properties.fuel_capacity
        } else {
            0.0
        }
    }

    pub fn thrust_fraction(&self) -> f64 {
        if self.properties.max_thrust > 0.0 {
            self.current_thrust / self.properties.max_thrust
        } else {
            0.0
        }
    }

    pub fn fuel_consumption_rate(&self) -> f64 {
        propulsion::fuel_consumption_rate(&self.parts)
    }

    pub fn altitude(&self, planet: &Planet) -> f64 {
        planet.altitude(&self.kinematics.position)
    }

    pub fn speed(&self) -> f64 {
        self.kinematics.speed()
    }

    /// The field that went non-finite, while the vehicle is corrupted.
    pub fn corruption(&self) -> Option<&'static str> {
        self.corrupted_field
    }

    pub fn is_landed(&self) -> bool {
        matches!(self.state, FlightState::Idle | FlightState::Landed)
    }

    pub fn has_crashed(&self) -> bool {
        self.state == FlightState::Crashed
    }
}

fn build_parts(configs: &[PartConfig]) -> Result<Vec<Part>, SimulationError> {
    configs.iter().map(Part::from_config).collect()
}
