//! Environment and flight tunables, loaded once at startup.

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::control::environment::Planet;
use crate::errors::SimulationError;

/// Vehicle handling and integrator tunables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    pub max_gimbal_angle_deg: f64,
    pub gimbal_rate_deg_s: f64,
    pub reaction_wheel_torque_nm: f64,
    pub max_angular_velocity_rad_s: f64,
    pub angular_damping: f64,
    pub drag_coefficient: f64,
    pub max_safe_landing_speed_m_s: f64,
    pub friction_coefficient: f64,
    pub contact_epsilon_m: f64,
    pub max_delta_time_s: f64,
    pub min_moment_of_inertia: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        FlightConfig {
            max_gimbal_angle_deg: MAX_GIMBAL_ANGLE_DEG,
            gimbal_rate_deg_s: GIMBAL_RATE_DEG_S,
            reaction_wheel_torque_nm: BASE_REACTION_WHEEL_TORQUE,
            max_angular_velocity_rad_s: MAX_ANGULAR_VELOCITY,
            angular_damping: ANGULAR_DAMPING,
            drag_coefficient: DRAG_COEFFICIENT,
            max_safe_landing_speed_m_s: MAX_SAFE_LANDING_SPEED,
            friction_coefficient: FRICTION_COEFFICIENT,
            contact_epsilon_m: CONTACT_EPSILON,
            max_delta_time_s: MAX_DELTA_TIME,
            min_moment_of_inertia: MIN_MOMENT_OF_INERTIA,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub planet: Planet,
    pub flight: FlightConfig,
}

impl SimulationConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let planet = &self.planet;
        let flight = &self.flight;
        let non_negative = [
            ("planet.mass_kg", planet.mass_kg),
            ("planet.gravitational_constant", planet.gravitational_constant),
            ("planet.sea_level_density_kg_m3", planet.sea_level_density_kg_m3),
            ("planet.max_atmosphere_altitude_m", planet.max_atmosphere_altitude_m),
            ("flight.max_gimbal_angle_deg", flight.max_gimbal_angle_deg),
            ("flight.gimbal_rate_deg_s", flight.gimbal_rate_deg_s),
            ("flight.reaction_wheel_torque_nm", flight.reaction_wheel_torque_nm),
            ("flight.angular_damping", flight.angular_damping),
            ("flight.drag_coefficient", flight.drag_coefficient),
            ("flight.max_safe_landing_speed_m_s", flight.max_safe_landing_speed_m_s),
            ("flight.friction_coefficient", flight.friction_coefficient),
            ("flight.contact_epsilon_m", flight.contact_epsilon_m),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::Config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        let positive = [
            ("planet.radius_m", planet.radius_m),
            ("planet.scale_height_m", planet.scale_height_m),
            ("flight.max_angular_velocity_rad_s", flight.max_angular_velocity_rad_s),
            ("flight.max_delta_time_s", flight.max_delta_time_s),
            ("flight.min_moment_of_inertia", flight.min_moment_of_inertia),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::Config(format!(
                    "{name} must be a finite, positive number (got {value})"
                )));
            }
        }
        Ok(())
    }

    pub fn max_gimbal_angle_rad(&self) -> f64 {
        self.flight.max_gimbal_angle_deg.to_radians()
    }

    pub fn gimbal_rate_rad_s(&self) -> f64 {
        self.flight.gimbal_rate_deg_s.to_radians()
    }
}
