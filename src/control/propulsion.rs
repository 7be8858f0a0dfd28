use super::part::Part;
use crate::utils::vector2d::Vector2D;

/// Outcome of one engine pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Burn {
    /// Thrust actually produced, after any starvation scaling.
    pub thrust: f64,
    pub fuel_consumed: f64,
    /// Fuel the active engines asked for this step.
    pub fuel_demand: f64,
    pub engines_active: bool,
}

pub fn available_fuel(parts: &[Part]) -> f64 {
    parts.iter().map(Part::fuel).sum()
}

/// Fires every enabled engine when the master command is on and there is fuel
/// in the stack, then drains the tanks topmost first.
///
/// When demand exceeds what is left, thrust is scaled by the available/demand
/// ratio and every tank is emptied exactly.
pub fn fire_engines(parts: &mut [Part], command_active: bool, delta_time: f64) -> Burn {
    let available = available_fuel(parts);
    let mut burn = Burn::default();

    for part in parts.iter_mut() {
        let Some(engine) = part.engine_mut() else {
            continue;
        };
        engine.is_active = command_active && engine.enabled && available > 0.0;
        if engine.is_active {
            burn.thrust += engine.effective_thrust();
            burn.fuel_demand += engine.mass_flow_rate() * delta_time;
            burn.engines_active = true;
        }
    }

    if !burn.engines_active {
        return burn;
    }

    if burn.fuel_demand > available {
        burn.thrust *= available / burn.fuel_demand;
        for tank in parts.iter_mut().filter_map(Part::tank_mut) {
            burn.fuel_consumed += tank.fuel;
            tank.fuel = 0.0;
        }
    } else {
        burn.fuel_consumed = draw_fuel(parts, burn.fuel_demand);
    }
    burn
}

/// Takes `amount` from the tanks in reverse stack order. Returns what was
/// actually drawn.
pub fn draw_fuel(parts: &mut [Part], amount: f64) -> f64 {
    let mut remaining = amount;
    for tank in parts.iter_mut().rev().filter_map(Part::tank_mut) {
        if remaining <= 0.0 {
            break;
        }
        let take = tank.fuel.min(remaining);
        tank.fuel -= take;
        remaining -= take;
    }
    amount - remaining.max(0.0)
}

/// Thrust along the vehicle axis deflected by the gimbal.
pub fn thrust_vector(thrust: f64, orientation: f64, gimbal_angle: f64) -> Vector2D {
    Vector2D::from_heading(orientation + gimbal_angle) * thrust
}

/// Nominal propellant flow of the engines that fired last step, kg/s.
pub fn fuel_consumption_rate(parts: &[Part]) -> f64 {
    parts
        .iter()
        .filter_map(Part::engine)
        .filter(|engine| engine.is_active)
        .map(|engine| engine.mass_flow_rate())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STANDARD_GRAVITY;
    use crate::control::part::PartConfig;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn stack(lower_fuel: f64, upper_fuel: f64) -> Vec<Part> {
        [
            PartConfig::engine(200.0, 2.0, 2.0, 9_806.65, 100.0),
            PartConfig::tank(100.0, 2.0, 2.0, 1_000.0).with_current_fuel(lower_fuel),
            PartConfig::tank(100.0, 2.0, 2.0, 1_000.0).with_current_fuel(upper_fuel),
            PartConfig::pod(500.0, 2.0, 1.5),
        ]
        .iter()
        .map(|c| Part::from_config(c).unwrap())
        .collect()
    }

    #[test]
    fn test_engines_idle_without_command() {
        let mut parts = stack(500.0, 500.0);
        let burn = fire_engines(&mut parts, false, 1.0);
        assert_eq!(burn, Burn::default());
        assert!(!parts[0].engine().unwrap().is_active);
        assert_eq!(available_fuel(&parts), 1_000.0);
    }

    #[test]
    fn test_burn_draws_from_top_tank_first() {
        let mut parts = stack(500.0, 500.0);
        // 9806.65 N at 100 s ISP is 10 kg/s
        let burn = fire_engines(&mut parts, true, 2.0);

        assert_eq!(burn.thrust, 9_806.65);
        assert_relative_eq!(burn.fuel_consumed, 20.0, epsilon = 1e-9);
        assert!(parts[0].engine().unwrap().is_active);
        assert_eq!(parts[1].fuel(), 500.0);
        assert_relative_eq!(parts[2].fuel(), 480.0, epsilon = 1e-9);
    }

    #[test]
    fn test_draw_spills_into_lower_tank() {
        let mut parts = stack(500.0, 5.0);
        let drawn = draw_fuel(&mut parts, 20.0);
        assert_eq!(drawn, 20.0);
        assert_eq!(parts[2].fuel(), 0.0);
        assert_eq!(parts[1].fuel(), 485.0);
    }

    #[test]
    fn test_partial_burn_on_starvation() {
        let mut parts = stack(0.0, 1e-3);
        let burn = fire_engines(&mut parts, true, 1.0);

        assert_eq!(burn.fuel_consumed, 1e-3);
        assert_relative_eq!(burn.fuel_demand, 10.0, epsilon = 1e-9);
        assert_relative_eq!(burn.thrust, 9_806.65 * 1e-4, epsilon = 1e-9);
        assert_eq!(available_fuel(&parts), 0.0);

        let next = fire_engines(&mut parts, true, 1.0);
        assert_eq!(next.thrust, 0.0);
        assert!(!next.engines_active);
        assert!(!parts[0].engine().unwrap().is_active);
    }

    #[test]
    fn test_disabled_engine_does_not_fire() {
        let mut parts = stack(500.0, 500.0);
        parts[0].engine_mut().unwrap().enabled = false;
        let burn = fire_engines(&mut parts, true, 1.0);
        assert!(!burn.engines_active);
        assert_eq!(available_fuel(&parts), 1_000.0);
    }

    #[test]
    fn test_thrust_vector_direction() {
        let up = thrust_vector(100.0, 0.0, 0.0);
        assert_abs_diff_eq!(up.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(up.y, -100.0, epsilon = 1e-12);

        let right = thrust_vector(100.0, PI / 2.0, 0.0);
        assert_abs_diff_eq!(right.x, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-12);

        let deflected = thrust_vector(100.0, 0.1, 0.05);
        assert_abs_diff_eq!(deflected.x, 100.0 * 0.15f64.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_fuel_consumption_rate_of_active_engines() {
        let mut parts = stack(500.0, 500.0);
        assert_eq!(fuel_consumption_rate(&parts), 0.0);
        fire_engines(&mut parts, true, 0.1);
        assert_relative_eq!(
            fuel_consumption_rate(&parts),
            9_806.65 / (100.0 * STANDARD_GRAVITY),
            epsilon = 1e-12
        );
    }
}
