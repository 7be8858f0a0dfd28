// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11; // N⋅m²/kg²
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s², used for ISP <-> exhaust velocity
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters

// Atmosphere
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 8_500.0; // m
pub const MAX_ATMOSPHERE_ALTITUDE: f64 = 100_000.0; // m
pub const DRAG_COEFFICIENT: f64 = 0.5;
pub const MIN_DRAG_SPEED: f64 = 0.01; // m/s

// Attitude
pub const MAX_ANGULAR_VELOCITY: f64 = std::f64::consts::FRAC_PI_2; // rad/s
pub const BASE_REACTION_WHEEL_TORQUE: f64 = 5_000.0; // N⋅m
pub const MAX_GIMBAL_ANGLE_DEG: f64 = 7.0;
pub const GIMBAL_RATE_DEG_S: f64 = 15.0;
pub const ANGULAR_DAMPING: f64 = 0.8; // 1/s
pub const MIN_MOMENT_OF_INERTIA: f64 = 100.0; // kg⋅m²

// Ground contact
pub const MAX_SAFE_LANDING_SPEED: f64 = 5.0; // m/s
pub const FRICTION_COEFFICIENT: f64 = 0.8;
pub const CONTACT_EPSILON: f64 = 0.2; // m
pub const STATIC_FRICTION_SPEED: f64 = 0.5; // m/s
pub const REST_SPEED: f64 = 0.01; // m/s
pub const REST_ANGULAR_VELOCITY: f64 = 0.01; // rad/s

// Gravity guards
pub const GRAVITY_MIN_RADIUS: f64 = 1.0; // m
pub const GRAVITY_MAX_RADIUS: f64 = 1e12; // m

// Orbit
pub const OPEN_ORBIT_ENERGY_TOLERANCE: f64 = -1e-3; // J/kg

// Propulsion defaults
pub const ISP_VACUUM_DEFAULT: f64 = 300.0; // seconds

// Simulation Parameters
pub const MAX_DELTA_TIME: f64 = 0.1; // s
pub const TIME_STEP: f64 = 1.0 / 60.0; // s
pub const MAX_SIMULATION_TIME: f64 = 1_800.0; // s
