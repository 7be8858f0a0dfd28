use serde::Deserialize;

use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, ATMOSPHERE_SCALE_HEIGHT, EARTH_MASS, EARTH_RADIUS,
    GRAVITATIONAL_CONSTANT, GRAVITY_MAX_RADIUS, GRAVITY_MIN_RADIUS, MAX_ATMOSPHERE_ALTITUDE,
};
use crate::utils::vector2d::Vector2D;

/// Point-mass planet with an exponential atmosphere, centred on the origin.
/// Supplied once at startup and never mutated by the integrator.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Planet {
    pub name: String,
    pub mass_kg: f64,
    pub radius_m: f64,
    pub gravitational_constant: f64,
    pub sea_level_density_kg_m3: f64,
    pub scale_height_m: f64,
    pub max_atmosphere_altitude_m: f64,
}

/// Local conditions at a point, for telemetry consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub altitude: f64,
    pub air_density: f64,
    pub gravity: f64,
}

impl Default for Planet {
    fn default() -> Self {
        Planet::earth()
    }
}

impl Planet {
    pub fn earth() -> Self {
        Planet {
            name: "Earth".to_string(),
            mass_kg: EARTH_MASS,
            radius_m: EARTH_RADIUS,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            sea_level_density_kg_m3: AIR_DENSITY_SEA_LEVEL,
            scale_height_m: ATMOSPHERE_SCALE_HEIGHT,
            max_atmosphere_altitude_m: MAX_ATMOSPHERE_ALTITUDE,
        }
    }

    /// Standard gravitational parameter μ = G·M.
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.mass_kg
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravity_at_altitude(0.0)
    }

    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        let distance = self.radius_m + altitude;
        if !gravity_applies(distance) || self.gravitational_constant <= 0.0 {
            return 0.0;
        }
        self.mu() / distance.powi(2)
    }

    pub fn escape_velocity(&self, altitude: f64) -> f64 {
        let distance = self.radius_m + altitude;
        (2.0 * self.mu() / distance).sqrt()
    }

    pub fn circular_velocity(&self, altitude: f64) -> f64 {
        let distance = self.radius_m + altitude;
        (self.mu() / distance).sqrt()
    }

    /// Altitude above the mean surface (AGL).
    pub fn altitude(&self, position: &Vector2D) -> f64 {
        position.magnitude() - self.radius_m
    }

    pub fn is_in_atmosphere(&self, altitude: f64) -> bool {
        altitude >= 0.0 && altitude < self.max_atmosphere_altitude_m
    }

    /// ρ = ρ0·exp(-h/H) inside the atmosphere envelope, zero outside it.
    pub fn air_density(&self, altitude: f64) -> f64 {
        if !self.is_in_atmosphere(altitude) {
            return 0.0;
        }
        self.sea_level_density_kg_m3 * (-altitude / self.scale_height_m).exp()
    }

    /// Gravitational acceleration toward the planet centre. Zero when the
    /// distance is outside the range where the inverse-square law is safe to
    /// evaluate.
    pub fn gravity_acceleration(&self, position: &Vector2D) -> Vector2D {
        let distance = position.magnitude();
        if !gravity_applies(distance) || self.gravitational_constant <= 0.0 {
            return Vector2D::ZERO;
        }
        -(*position / distance) * (self.mu() / distance.powi(2))
    }

    /// F = G·M·m / r², directed at the planet centre.
    pub fn gravity_force(&self, position: &Vector2D, mass: f64) -> Vector2D {
        self.gravity_acceleration(position) * mass
    }

    pub fn conditions_at(&self, position: &Vector2D) -> Conditions {
        let altitude = self.altitude(position);
        Conditions {
            altitude,
            air_density: self.air_density(altitude),
            gravity: self.gravity_acceleration(position).magnitude(),
        }
    }
}

fn gravity_applies(distance: f64) -> bool {
    distance.is_finite() && distance > GRAVITY_MIN_RADIUS && distance < GRAVITY_MAX_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn create_mars() -> Planet {
        Planet {
            name: "Mars".to_string(),
            mass_kg: 6.39e23,
            radius_m: 3_389_500.0,
            sea_level_density_kg_m3: 0.020,
            scale_height_m: 11_100.0,
            ..Planet::earth()
        }
    }

    #[test]
    fn test_air_density_sea_level() {
        let earth = Planet::earth();
        assert_abs_diff_eq!(earth.air_density(0.0), 1.225, epsilon = 1e-12);
    }

    #[test]
    fn test_air_density_follows_scale_height() {
        let earth = Planet::earth();
        let one_scale_height = earth.air_density(ATMOSPHERE_SCALE_HEIGHT);
        assert_relative_eq!(one_scale_height, 1.225 / std::f64::consts::E, epsilon = 1e-9);
        assert!(earth.air_density(30_000.0) < one_scale_height);
    }

    #[test]
    fn test_space_conditions() {
        let earth = Planet::earth();
        assert_eq!(earth.air_density(MAX_ATMOSPHERE_ALTITUDE), 0.0);
        assert_eq!(earth.air_density(500_000.0), 0.0);
        // below ground counts as outside the envelope
        assert_eq!(earth.air_density(-10.0), 0.0);

        let conditions = earth.conditions_at(&Vector2D::new(0.0, -(EARTH_RADIUS + 500_000.0)));
        assert_abs_diff_eq!(conditions.altitude, 500_000.0, epsilon = 1e-6);
        assert_eq!(conditions.air_density, 0.0);
    }

    #[test]
    fn test_gravity_variation_with_altitude() {
        let earth = Planet::earth();
        let sea_level = earth.surface_gravity();
        let at_100km = earth.gravity_at_altitude(100_000.0);

        assert_abs_diff_eq!(sea_level, 9.82, epsilon = 1e-2);
        assert!(at_100km < sea_level);

        let expected_ratio = (EARTH_RADIUS / (EARTH_RADIUS + 100_000.0)).powi(2);
        assert_abs_diff_eq!(at_100km / sea_level, expected_ratio, epsilon = 1e-9);
    }

    #[test]
    fn test_gravity_points_at_centre() {
        let earth = Planet::earth();
        let position = Vector2D::new(EARTH_RADIUS, 0.0);
        let accel = earth.gravity_acceleration(&position);
        assert!(accel.x < 0.0);
        assert_abs_diff_eq!(accel.y, 0.0, epsilon = 1e-12);

        let force = earth.gravity_force(&position, 1_000.0);
        assert_relative_eq!(force.magnitude(), 1_000.0 * earth.surface_gravity(), epsilon = 1e-9);
    }

    #[test]
    fn test_gravity_guards() {
        let earth = Planet::earth();
        assert_eq!(earth.gravity_acceleration(&Vector2D::ZERO), Vector2D::ZERO);
        assert_eq!(earth.gravity_acceleration(&Vector2D::new(0.5, 0.0)), Vector2D::ZERO);
        assert_eq!(earth.gravity_acceleration(&Vector2D::new(1e13, 0.0)), Vector2D::ZERO);

        let weightless = Planet {
            gravitational_constant: 0.0,
            ..Planet::earth()
        };
        assert_eq!(
            weightless.gravity_acceleration(&Vector2D::new(EARTH_RADIUS, 0.0)),
            Vector2D::ZERO
        );
    }

    #[test]
    fn test_mars_values() {
        let mars = create_mars();
        assert_abs_diff_eq!(mars.surface_gravity(), 3.71, epsilon = 1e-2);
        assert_abs_diff_eq!(mars.escape_velocity(300_000.0), 4_800.0, epsilon = 300.0);
        assert!(mars.air_density(0.0) < Planet::earth().air_density(0.0));
    }

    #[test]
    fn test_circular_and_escape_velocity() {
        let earth = Planet::earth();
        let circular = earth.circular_velocity(200_000.0);
        let escape = earth.escape_velocity(200_000.0);
        assert_abs_diff_eq!(circular, 7_790.0, epsilon = 20.0);
        assert_relative_eq!(escape, circular * 2f64.sqrt(), epsilon = 1e-9);
    }
}
