use crate::control::environment::Planet;
use crate::errors::SimulationError;
use crate::utils::vector2d::Vector2D;

/// Translational state in planet-centred coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Kinematics {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Kinematics {
            position,
            velocity,
            acceleration: Vector2D::ZERO,
        }
    }

    /// Classic RK4 over position and velocity. Gravity is re-evaluated at each
    /// stage; `applied_force` (thrust plus drag) is held for the whole step.
    pub fn integrate_rk4(&mut self, planet: &Planet, applied_force: Vector2D, mass: f64, delta_time: f64) {
        let applied = applied_force / mass;
        let derivatives = |position: Vector2D, velocity: Vector2D| {
            (velocity, planet.gravity_acceleration(&position) + applied)
        };

        let initial_state = (self.position, self.velocity);
        let half = delta_time / 2.0;
        let k1 = derivatives(initial_state.0, initial_state.1);
        let k2 = derivatives(initial_state.0 + k1.0 * half, initial_state.1 + k1.1 * half);
        let k3 = derivatives(initial_state.0 + k2.0 * half, initial_state.1 + k2.1 * half);
        let k4 = derivatives(
            initial_state.0 + k3.0 * delta_time,
            initial_state.1 + k3.1 * delta_time,
        );

        self.position =
            initial_state.0 + (delta_time / 6.0) * (k1.0 + 2.0 * k2.0 + 2.0 * k3.0 + k4.0);
        self.velocity =
            initial_state.1 + (delta_time / 6.0) * (k1.1 + 2.0 * k2.1 + 2.0 * k3.1 + k4.1);
        self.acceleration = planet.gravity_acceleration(&self.position) + applied;
    }

    /// Semi-implicit Euler with a fixed net force, used while the contact
    /// resolver owns the velocity.
    pub fn integrate_euler(&mut self, net_force: Vector2D, mass: f64, delta_time: f64) {
        self.acceleration = net_force / mass;
        self.velocity += self.acceleration * delta_time;
        self.position += self.velocity * delta_time;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.position.is_finite() {
            return Err(SimulationError::CorruptedState { field: "position" });
        }
        if !self.velocity.is_finite() {
            return Err(SimulationError::CorruptedState { field: "velocity" });
        }
        Ok(())
    }
}
