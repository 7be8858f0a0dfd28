use crate::config::SimulationConfig;
use crate::errors::SimulationError;

/// Where the gimbal is being driven. Left and right pressed together cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GimbalTarget {
    Left,
    Neutral,
    Right,
}

impl GimbalTarget {
    pub fn from_input(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => GimbalTarget::Left,
            (false, true) => GimbalTarget::Right,
            _ => GimbalTarget::Neutral,
        }
    }

    /// -1, 0 or +1.
    pub fn sign(&self) -> f64 {
        match self {
            GimbalTarget::Left => -1.0,
            GimbalTarget::Neutral => 0.0,
            GimbalTarget::Right => 1.0,
        }
    }
}

/// Rotational state of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttitudeState {
    pub orientation: f64,
    pub angular_velocity: f64,
    pub gimbal_angle: f64,
}

impl AttitudeState {
    pub fn upright(orientation: f64) -> Self {
        AttitudeState {
            orientation,
            ..AttitudeState::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("orientation", self.orientation),
            ("angular_velocity", self.angular_velocity),
            ("gimbal_angle", self.gimbal_angle),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SimulationError::CorruptedState { field });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeController {
    pub max_gimbal_angle: f64,
    pub gimbal_rate: f64,
    pub reaction_wheel_torque: f64,
    pub angular_damping: f64,
    pub max_angular_velocity: f64,
}

impl AttitudeController {
    pub fn from_config(config: &SimulationConfig) -> Self {
        AttitudeController {
            max_gimbal_angle: config.max_gimbal_angle_rad(),
            gimbal_rate: config.gimbal_rate_rad_s(),
            reaction_wheel_torque: config.flight.reaction_wheel_torque_nm,
            angular_damping: config.flight.angular_damping,
            max_angular_velocity: config.flight.max_angular_velocity_rad_s,
        }
    }

    /// Moves the gimbal toward its target at the configured rate without
    /// overshooting it.
    pub fn update_gimbal(&self, state: &mut AttitudeState, target: GimbalTarget, delta_time: f64) {
        let target_angle = target.sign() * self.max_gimbal_angle;
        let max_step = self.gimbal_rate * delta_time;
        let error = target_angle - state.gimbal_angle;
        state.gimbal_angle += error.clamp(-max_step, max_step);
    }

    /// Reaction wheels only act when the engines are not commanded; otherwise
    /// steering goes through the gimbal.
    pub fn reaction_wheel_torque(&self, target: GimbalTarget, engine_commanded: bool) -> f64 {
        if engine_commanded {
            return 0.0;
        }
        target.sign() * self.reaction_wheel_torque
    }

    pub fn net_torque(
        &self,
        state: &AttitudeState,
        target: GimbalTarget,
        engine_commanded: bool,
        thrust: f64,
        lever_arm: f64,
        moment_of_inertia: f64,
    ) -> f64 {
        let wheels = self.reaction_wheel_torque(target, engine_commanded);
        let gimbal = thrust * state.gimbal_angle.sin() * lever_arm;
        let damping = state.angular_velocity * moment_of_inertia * self.angular_damping;
        wheels - gimbal - damping
    }

    /// ω += τ/I·dt, clamped, then θ += ω·dt.
    pub fn integrate(
        &self,
        state: &mut AttitudeState,
        net_torque: f64,
        moment_of_inertia: f64,
        delta_time: f64,
    ) -> Result<(), SimulationError> {
        let angular_acceleration = net_torque / moment_of_inertia;
        state.angular_velocity = (state.angular_velocity + angular_acceleration * delta_time)
            .clamp(-self.max_angular_velocity, self.max_angular_velocity);
        state.orientation += state.angular_velocity * delta_time;
        state.validate()
    }
}
