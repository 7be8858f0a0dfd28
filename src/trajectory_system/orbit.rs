use crate::constants::{GRAVITY_MIN_RADIUS, OPEN_ORBIT_ENERGY_TOLERANCE};
use crate::control::environment::Planet;
use crate::utils::vector2d::Vector2D;

/// Apsis altitudes above the planet's mean radius. An apoapsis of
/// `f64::INFINITY` marks an open (escape) trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub apoapsis: f64,
    pub periapsis: f64,
}

impl OrbitalElements {
    pub fn is_escape(&self) -> bool {
        self.apoapsis == f64::INFINITY
    }

    /// Both apsides at `altitude`, or at the surface when that is not finite.
    fn at_altitude(altitude: f64) -> Self {
        let altitude = if altitude.is_finite() { altitude } else { 0.0 };
        OrbitalElements {
            apoapsis: altitude,
            periapsis: altitude,
        }
    }

    /// Derives the apsides from the planet-centred state vector.
    pub fn from_state(planet: &Planet, position: &Vector2D, velocity: &Vector2D) -> Self {
        let altitude = planet.altitude(position);
        let r = position.magnitude();
        let mu = planet.mu();
        if !r.is_finite() || r < GRAVITY_MIN_RADIUS || !velocity.is_finite() {
            return Self::at_altitude(altitude);
        }

        let energy = velocity.magnitude_squared() / 2.0 - mu / r;
        let h = position.cross(velocity);

        let elements = if energy >= OPEN_ORBIT_ENERGY_TOLERANCE {
            let discriminant = 1.0 + 2.0 * energy * h.powi(2) / mu.powi(2);
            let periapsis = if mu > 0.0 && discriminant >= 0.0 {
                // semi-latus rectum over (1 + e)
                (h.powi(2) / mu) / (1.0 + discriminant.sqrt()) - planet.radius_m
            } else {
                altitude
            };
            OrbitalElements {
                apoapsis: f64::INFINITY,
                periapsis,
            }
        } else {
            let semi_major_axis = -mu / (2.0 * energy);
            let eccentricity = (1.0 + 2.0 * energy * h.powi(2) / mu.powi(2)).max(0.0).sqrt();
            OrbitalElements {
                apoapsis: semi_major_axis * (1.0 + eccentricity) - planet.radius_m,
                periapsis: semi_major_axis * (1.0 - eccentricity) - planet.radius_m,
            }
        };
        elements.sanitized(altitude)
    }

    fn sanitized(mut self, altitude: f64) -> Self {
        let altitude = if altitude.is_finite() { altitude } else { 0.0 };
        if !self.periapsis.is_finite() {
            self.periapsis = altitude;
        }
        if self.apoapsis.is_nan() || (!self.is_escape() && self.apoapsis < self.periapsis) {
            self.apoapsis = altitude.max(self.periapsis);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALTITUDE: f64 = 400_000.0;

    fn state(planet: &Planet, speed: f64) -> (Vector2D, Vector2D) {
        let r = planet.radius_m + ALTITUDE;
        (Vector2D::new(0.0, -r), Vector2D::new(speed, 0.0))
    }

    #[test]
    fn test_circular_orbit() {
        let earth = Planet::earth();
        let (position, velocity) = state(&earth, earth.circular_velocity(ALTITUDE));
        let elements = OrbitalElements::from_state(&earth, &position, &velocity);

        assert!(!elements.is_escape());
        assert_relative_eq!(elements.apoapsis, ALTITUDE, max_relative = 1e-6);
        assert_relative_eq!(elements.periapsis, ALTITUDE, max_relative = 1e-6);
    }

    #[test]
    fn test_elliptical_orbit() {
        let earth = Planet::earth();
        let (position, velocity) = state(&earth, earth.circular_velocity(ALTITUDE) * 1.05);
        let elements = OrbitalElements::from_state(&earth, &position, &velocity);

        // burning prograde at the current point makes it the periapsis
        assert_relative_eq!(elements.periapsis, ALTITUDE, max_relative = 1e-6);
        assert!(elements.apoapsis > ALTITUDE + 100_000.0);
    }

    #[test]
    fn test_escape_velocity_is_open() {
        let earth = Planet::earth();
        let (position, velocity) = state(&earth, earth.escape_velocity(ALTITUDE));
        let elements = OrbitalElements::from_state(&earth, &position, &velocity);

        assert!(elements.is_escape());
        assert_eq!(elements.apoapsis, f64::INFINITY);
        assert_relative_eq!(elements.periapsis, ALTITUDE, max_relative = 1e-6);
    }

    #[test]
    fn test_radial_escape_periapsis_is_finite() {
        let earth = Planet::earth();
        let r = earth.radius_m + ALTITUDE;
        let elements = OrbitalElements::from_state(
            &earth,
            &Vector2D::new(0.0, -r),
            &Vector2D::new(0.0, -20_000.0),
        );
        assert!(elements.is_escape());
        assert!(elements.periapsis.is_finite());
    }

    #[test]
    fn test_degenerate_position_falls_back_to_altitude() {
        let earth = Planet::earth();
        let elements = OrbitalElements::from_state(&earth, &Vector2D::ZERO, &Vector2D::new(1.0, 0.0));
        assert_eq!(elements.apoapsis, -earth.radius_m);
        assert_eq!(elements.periapsis, -earth.radius_m);
    }

    #[test]
    fn test_non_finite_position_reports_surface() {
        let earth = Planet::earth();
        let elements = OrbitalElements::from_state(
            &earth,
            &Vector2D::new(f64::NAN, 0.0),
            &Vector2D::new(1.0, 0.0),
        );
        assert_eq!(elements.apoapsis, 0.0);
        assert_eq!(elements.periapsis, 0.0);

        let elements = OrbitalElements::from_state(
            &earth,
            &Vector2D::new(0.0, f64::INFINITY),
            &Vector2D::new(f64::NAN, 0.0),
        );
        assert!(elements.apoapsis.is_finite() && elements.periapsis.is_finite());
    }

    #[test]
    fn test_resting_on_surface_is_bound() {
        let earth = Planet::earth();
        let position = Vector2D::new(0.0, -earth.radius_m);
        let elements = OrbitalElements::from_state(&earth, &position, &Vector2D::ZERO);
        assert!(!elements.is_escape());
        assert!(!elements.apoapsis.is_nan() && !elements.periapsis.is_nan());
        assert!(elements.apoapsis >= elements.periapsis);
    }

    #[test]
    fn test_without_gravity_everything_escapes() {
        let planet = Planet {
            gravitational_constant: 0.0,
            ..Planet::earth()
        };
        let (position, velocity) = state(&planet, 10.0);
        let elements = OrbitalElements::from_state(&planet, &position, &velocity);
        assert!(elements.is_escape());
        assert_eq!(elements.periapsis, ALTITUDE);
    }
}
