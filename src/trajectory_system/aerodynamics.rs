use std::f64::consts::PI;

use crate::constants::MIN_DRAG_SPEED;
use crate::utils::{angles::wrap_angle, vector2d::Vector2D};

/// Area presented to the flow. Blends the circular frontal area and the
/// rectangular side profile by the angle of attack.
pub fn cross_sectional_area(orientation: f64, velocity_angle: f64, width: f64, height: f64) -> f64 {
    let angle_of_attack = wrap_angle(orientation - velocity_angle);
    let frontal_area = PI * (width / 2.0).powi(2);
    let profile_area = width * height;
    frontal_area * angle_of_attack.cos().abs() + profile_area * angle_of_attack.sin().abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Drag {
    pub force: Vector2D,
    pub magnitude: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64) -> Self {
        Aerodynamics { drag_coefficient }
    }

    /// Drag opposing `velocity`. `area` is the cross-section for the current
    /// angle of attack.
    pub fn calculate_drag(&self, velocity: Vector2D, air_density: f64, area: f64) -> Drag {
        let speed = velocity.magnitude();
        if speed <= MIN_DRAG_SPEED || air_density <= 0.0 {
            return Drag::default();
        }
        let magnitude = self.calculate_dynamic_pressure(speed, air_density) * self.drag_coefficient * area;
        Drag {
            force: -(velocity / speed) * magnitude,
            magnitude,
        }
    }

    fn calculate_dynamic_pressure(&self, speed: f64, air_density: f64) -> f64 {
        0.5 * air_density * speed.powi(2)
    }
}
