use tracing::{debug, warn};

use super::attachment::can_stack;
use super::part::{Part, PartConfig, PartType};
use crate::constants::{ISP_VACUUM_DEFAULT, STANDARD_GRAVITY};

/// Aggregates derived from the part stack. Recomputed from scratch on every
/// reassembly, so nothing here drifts between calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateProperties {
    pub total_mass: f64,
    pub dry_mass: f64,
    pub total_fuel: f64,
    pub fuel_capacity: f64,
    /// Sum of rated thrust times limiter over all engines.
    pub max_thrust: f64,
    pub stack_height: f64,
    pub max_width: f64,
    /// Mean ISP over engines, 0 with no engines.
    pub specific_impulse: f64,
    pub delta_v: f64,
    pub moment_of_inertia: f64,
    /// Height of the centre of mass above the stack bottom.
    pub center_of_mass_offset: f64,
}

/// Tsiolkovsky Δv. Zero when either mass or the ISP cannot produce a finite,
/// meaningful result.
pub fn delta_v(isp: f64, wet_mass: f64, dry_mass: f64) -> f64 {
    if dry_mass <= 0.0 || isp <= 0.0 || wet_mass < dry_mass {
        return 0.0;
    }
    isp * STANDARD_GRAVITY * (wet_mass / dry_mass).ln()
}

/// Uniform rod with a width correction, floored at `min_moment_of_inertia`.
pub fn moment_of_inertia(mass: f64, height: f64, width: f64, min_moment_of_inertia: f64) -> f64 {
    let inertia = mass * (height.powi(2) + width.powi(2)) / 12.0;
    inertia.max(min_moment_of_inertia)
}

/// Mass-weighted mean of the part centres. Half the stack height when the
/// stack is massless.
pub fn center_of_mass_offset(parts: &[Part]) -> f64 {
    let total_mass: f64 = parts.iter().map(Part::mass).sum();
    if total_mass <= 0.0 {
        let height: f64 = parts.iter().map(|p| p.height).sum();
        return height / 2.0;
    }
    let weighted: f64 = parts.iter().map(|p| p.mass() * p.center_height()).sum();
    weighted / total_mass
}

/// Lays the parts out bottom-to-top and recomputes every aggregate.
pub fn reassemble(parts: &mut [Part], min_moment_of_inertia: f64) -> AggregateProperties {
    let mut props = AggregateProperties::default();
    let mut engine_count = 0usize;
    let mut isp_sum = 0.0;

    for part in parts.iter_mut() {
        part.relative_bottom = props.stack_height;
        props.stack_height += part.height;
        props.total_mass += part.mass();
        props.dry_mass += part.dry_mass;
        props.max_width = props.max_width.max(part.width);

        if let Some(tank) = part.tank() {
            props.total_fuel += tank.fuel;
            props.fuel_capacity += tank.capacity;
        }
        if let Some(engine) = part.engine() {
            props.max_thrust += engine.effective_thrust();
            isp_sum += engine.isp;
            engine_count += 1;
        }
    }

    if engine_count > 0 {
        props.specific_impulse = isp_sum / engine_count as f64;
    }
    props.delta_v = delta_v(props.specific_impulse, props.total_mass, props.dry_mass);
    props.moment_of_inertia = moment_of_inertia(
        props.total_mass,
        props.stack_height,
        props.max_width,
        min_moment_of_inertia,
    );
    props.center_of_mass_offset = center_of_mass_offset(parts);

    debug!(
        parts = parts.len(),
        mass = props.total_mass,
        fuel = props.total_fuel,
        delta_v = props.delta_v,
        "reassembled vehicle"
    );
    props
}

/// Warns about adjacent parts whose attachment nodes do not fit. Returns the
/// number of mismatched joints; the stack is accepted either way.
pub fn check_stacking(parts: &[Part]) -> usize {
    let mut mismatches = 0;
    for pair in parts.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if !can_stack(&lower.nodes, &upper.nodes) {
            warn!(
                lower = %lower.name,
                lower_type = lower.part_type().name(),
                upper = %upper.name,
                upper_type = upper.part_type().name(),
                "incompatible attachment nodes in stack"
            );
            mismatches += 1;
        }
    }
    mismatches
}

/// Builder read-out computed straight from descriptors, before a vehicle
/// exists. Δv assumes full tanks and the least efficient engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StagingPreview {
    pub wet_mass: f64,
    pub dry_mass: f64,
    pub total_thrust: f64,
    pub delta_v: f64,
}

impl StagingPreview {
    pub fn from_configs(configs: &[PartConfig]) -> Self {
        let mut preview = StagingPreview::default();
        let mut min_isp: Option<f64> = None;

        for config in configs {
            let Ok(part) = Part::from_config(config) else {
                continue;
            };
            preview.dry_mass += part.dry_mass;
            preview.wet_mass += part.dry_mass;
            match config.part_type {
                PartType::Tank => {
                    preview.wet_mass += part.tank().map_or(0.0, |t| t.capacity);
                }
                PartType::Engine => {
                    if let Some(engine) = part.engine() {
                        preview.total_thrust += engine.thrust;
                        min_isp = Some(min_isp.map_or(engine.isp, |isp| isp.min(engine.isp)));
                    }
                }
                PartType::Pod | PartType::Fairing => {}
            }
        }

        let isp = min_isp.unwrap_or(ISP_VACUUM_DEFAULT);
        preview.delta_v = delta_v(isp, preview.wet_mass, preview.dry_mass);
        preview
    }
}
