use std::f64::consts::FRAC_PI_4;

use crate::config::SimulationConfig;
use crate::constants::{REST_ANGULAR_VELOCITY, REST_SPEED, STATIC_FRICTION_SPEED};
use crate::control::attitude::AttitudeState;
use crate::utils::{angles::wrap_angle, vector2d::Vector2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Not touching the ground this step.
    Airborne,
    Landed,
    Crashed,
}

/// Mutable slice of the vehicle state the resolver may override.
#[derive(Debug)]
pub struct ContactBody<'a> {
    pub position: &'a mut Vector2D,
    pub velocity: &'a mut Vector2D,
    pub attitude: &'a mut AttitudeState,
    /// Net translational force for the coming integration.
    pub net_force: &'a mut Vector2D,
    pub mass: f64,
    /// Magnitude of the gravity force on the vehicle, used as the normal load.
    pub weight: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactResolver {
    pub planet_radius: f64,
    pub contact_epsilon: f64,
    pub max_safe_landing_speed: f64,
    pub friction_coefficient: f64,
}

impl ContactResolver {
    pub fn from_config(config: &SimulationConfig) -> Self {
        ContactResolver {
            planet_radius: config.planet.radius_m,
            contact_epsilon: config.flight.contact_epsilon_m,
            max_safe_landing_speed: config.flight.max_safe_landing_speed_m_s,
            friction_coefficient: config.flight.friction_coefficient,
        }
    }

    pub fn in_contact(&self, position: &Vector2D) -> bool {
        position.magnitude() <= self.planet_radius + self.contact_epsilon
    }

    pub fn resolve(&self, body: ContactBody<'_>, delta_time: f64) -> ContactOutcome {
        let distance = body.position.magnitude();
        if distance > self.planet_radius + self.contact_epsilon {
            return ContactOutcome::Airborne;
        }

        let normal = if distance > 0.0 {
            *body.position / distance
        } else {
            Vector2D::from_heading(body.attitude.orientation)
        };
        let (radial_speed, tangential) = body.velocity.decompose(&normal);

        // either direction counts: a fast liftoff inside the contact band crashes too
        if radial_speed.abs() > self.max_safe_landing_speed {
            *body.velocity = Vector2D::ZERO;
            *body.net_force = Vector2D::ZERO;
            body.attitude.angular_velocity = 0.0;
            if distance < self.planet_radius {
                *body.position = normal * self.planet_radius;
            }
            return ContactOutcome::Crashed;
        }

        if distance < self.planet_radius {
            *body.position = normal * self.planet_radius;
        }
        // keep only outward radial motion
        *body.velocity = tangential + normal * radial_speed.max(0.0);

        let (radial_force, tangential_force) = body.net_force.decompose(&normal);
        if radial_force < 0.0 {
            *body.net_force = tangential_force;
        }

        self.apply_friction(body.velocity, body.net_force, &normal, body.mass, body.weight, delta_time);
        self.settle_rotation(body.attitude, &normal);
        ContactOutcome::Landed
    }

    fn apply_friction(
        &self,
        velocity: &mut Vector2D,
        net_force: &mut Vector2D,
        normal: &Vector2D,
        mass: f64,
        weight: f64,
        delta_time: f64,
    ) {
        let (radial_speed, tangential) = velocity.decompose(normal);
        let (radial_force, tangential_force) = net_force.decompose(normal);
        let friction = self.friction_coefficient * weight.abs();
        let speed = tangential.magnitude();
        let holds = friction >= tangential_force.magnitude();

        if speed <= REST_SPEED || (holds && speed < STATIC_FRICTION_SPEED) {
            *velocity = *normal * radial_speed;
            if holds {
                *net_force = *normal * radial_force;
            }
            return;
        }

        // kinetic friction, capped so it cannot reverse the sliding direction
        let stopping_force = if delta_time > 0.0 {
            mass * speed / delta_time
        } else {
            friction
        };
        *net_force -= tangential / speed * friction.min(stopping_force);
    }

    /// Halves the spin when the vehicle stands roughly upright on the surface.
    fn settle_rotation(&self, attitude: &mut AttitudeState, normal: &Vector2D) {
        let misalignment = wrap_angle(attitude.orientation - normal.heading());
        if misalignment.abs() < FRAC_PI_4 {
            attitude.angular_velocity *= 0.5;
            if attitude.angular_velocity.abs() < REST_ANGULAR_VELOCITY {
                attitude.angular_velocity = 0.0;
            }
        }
    }
}
