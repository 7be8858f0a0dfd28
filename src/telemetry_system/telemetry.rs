use crate::control::environment::Planet;
use crate::control::spacecraft::{FlightState, Spacecraft};

/// What one call to `step` produced, for rendering and UI consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub air_density: f64,
    pub drag_magnitude: f64,
    pub apoapsis: f64,
    pub periapsis: f64,
    pub landed: bool,
    pub crashed: bool,
    /// The step was rejected (non-positive or NaN delta time) and nothing moved.
    pub skipped: bool,
    pub thrust: f64,
    pub fuel_consumed: f64,
    pub state: FlightState,
}

impl StepResult {
    pub fn is_escape(&self) -> bool {
        self.apoapsis == f64::INFINITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub time: f64,
    pub altitude: f64,
    pub speed: f64,
    pub thrust: f64,
    pub fuel: f64,
    pub mass: f64,
    pub apoapsis: f64,
    pub periapsis: f64,
    pub state: FlightState,
}

pub struct Telemetry {
    pub samples: Vec<TelemetrySample>,
    sample_interval: f64,
    last_sample_time: Option<f64>,
    max_speed: f64,
    max_altitude: f64,
    min_fuel: f64,
    state_times: Vec<(FlightState, f64)>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new(0.0)
    }
}

impl Telemetry {
    /// Keeps at most one sample per `sample_interval` seconds. Extremes and
    /// state changes are tracked on every call.
    pub fn new(sample_interval: f64) -> Self {
        Telemetry {
            samples: Vec::new(),
            sample_interval,
            last_sample_time: None,
            max_speed: 0.0,
            max_altitude: 0.0,
            min_fuel: f64::MAX,
            state_times: Vec::new(),
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude == f64::INFINITY {
            "Escape".to_string()
        } else if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn record(&mut self, time: f64, spacecraft: &Spacecraft, planet: &Planet, result: &StepResult) {
        let altitude = spacecraft.altitude(planet);
        let speed = spacecraft.speed();
        let fuel = spacecraft.total_fuel();

        self.max_speed = self.max_speed.max(speed);
        self.max_altitude = self.max_altitude.max(altitude);
        self.min_fuel = self.min_fuel.min(fuel);

        match self.state_times.last() {
            Some((last_state, _)) if *last_state == result.state => {}
            _ => self.state_times.push((result.state, time)),
        }

        let due = self
            .last_sample_time
            .map_or(true, |last| time - last >= self.sample_interval);
        if due {
            self.last_sample_time = Some(time);
            self.samples.push(TelemetrySample {
                time,
                altitude,
                speed,
                thrust: result.thrust,
                fuel,
                mass: spacecraft.total_mass(),
                apoapsis: result.apoapsis,
                periapsis: result.periapsis,
                state: result.state,
            });
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    /// Lowest fuel seen, or 0 before anything was recorded.
    pub fn min_fuel(&self) -> f64 {
        if self.state_times.is_empty() {
            0.0
        } else {
            self.min_fuel
        }
    }

    pub fn state_transitions(&self) -> &[(FlightState, f64)] {
        &self.state_times
    }

    pub fn format_sample(sample: &TelemetrySample) -> String {
        format!(
            "Time: {}\n\
             State: {:?}\n\
             Altitude: {}\n\
             Speed: {:.2} m/s\n\
             Thrust: {:.2} N\n\
             Fuel: {:.2} kg\n\
             Total Mass: {:.2} kg\n\
             Apoapsis: {}\n\
             Periapsis: {}\n",
            Self::format_time(sample.time),
            sample.state,
            Self::format_altitude(sample.altitude),
            sample.speed,
            sample.thrust,
            sample.fuel,
            sample.mass,
            Self::format_altitude(sample.apoapsis),
            Self::format_altitude(sample.periapsis),
        )
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Max Speed: {:.2} m/s\nMax Altitude: {}\nMin Fuel: {:.2} kg\n",
            self.max_speed,
            Self::format_altitude(self.max_altitude),
            self.min_fuel(),
        );
        for (state, time) in &self.state_times {
            summary.push_str(&format!(
                "State {:?} reached at: {}\n",
                state,
                Self::format_time(*time)
            ));
        }
        summary
    }

    pub fn display_data(&self) {
        println!("--- Telemetry Data ---");
        for sample in &self.samples {
            println!("{}", Self::format_sample(sample));
        }
        println!("--- End of Telemetry ---");

        println!("\n--- Simulation Summary ---");
        print!("{}", self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(Telemetry::format_time(42.5), "42.50s");
        assert_eq!(Telemetry::format_time(125.0), "2m 5.00s");
        assert_eq!(Telemetry::format_time(3_725.0), "1h 2m 5.00s");
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(Telemetry::format_altitude(f64::INFINITY), "Escape");
        assert_eq!(Telemetry::format_altitude(999.0), "999.00 m");
        assert_eq!(Telemetry::format_altitude(250_000.0), "250.00 km");
        assert_eq!(Telemetry::format_altitude(-6_371_000.0), "-6371.00 km");
    }

    #[test]
    fn test_empty_telemetry() {
        let telemetry = Telemetry::default();
        assert!(telemetry.samples.is_empty());
        assert_eq!(telemetry.min_fuel(), 0.0);
        assert!(telemetry.summary().starts_with("Max Speed: 0.00 m/s"));
    }
}
