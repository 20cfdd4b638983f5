use bevy::prelude::*;
use rand::prelude::*;
use std::f32::consts::PI;

use crate::{GalaxyError, GalaxyParams, ParticleSet};

/// Trailing slots the generation loop never writes. They keep their zeroed
/// position and color.
pub const UNWRITTEN_TAIL: usize = 2;

/// Generates a fresh particle set using the thread-local rng
pub fn generate(params: &GalaxyParams) -> Result<ParticleSet, GalaxyError> {
    generate_with_rng(params, &mut rand::rng())
}

pub fn generate_with_rng<R: Rng + ?Sized>(
    params: &GalaxyParams,
    rng: &mut R,
) -> Result<ParticleSet, GalaxyError> {
    params.validate()?;

    let count = params.particle_count();
    let ramp = ColorRamp::new(params);
    let mut set = ParticleSet::zeroed(count);

    for i in 0..count.saturating_sub(UNWRITTEN_TAIL) {
        let radius = params.radius * rng.random::<f32>();

        let position = spiral_base(params, i, radius) + scatter_offset(params, radius, rng);
        let color = ramp.sample(radius / params.radius);

        set.write(i, position.to_array(), color);
    }

    Ok(set)
}

/// Base angle of the arm particle `index` belongs to. Arms are assigned
/// round-robin by index, never by position.
pub fn branch_angle(index: usize, branch_count: i32) -> f32 {
    let branches = branch_count.max(1) as usize;
    (index % branches) as f32 / branches as f32 * PI * 2.0
}

/// Point on the spiral arm for a particle at `radius` before any scatter
pub fn spiral_base(params: &GalaxyParams, index: usize, radius: f32) -> Vec3 {
    let spin_angle = radius * params.spin;
    let angle = branch_angle(index, params.branch_count) + spin_angle;

    vec3(angle.cos() * radius, 0.0, angle.sin() * radius)
}

/// Signed per-axis scatter. Magnitude grows with `radius`, and a higher
/// `randomness_power` pulls most samples toward zero.
pub fn scatter_offset<R: Rng + ?Sized>(params: &GalaxyParams, radius: f32, rng: &mut R) -> Vec3 {
    let mut axis = || {
        let magnitude = rng.random::<f32>().powf(params.randomness_power);
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        magnitude * sign * params.randomness * radius
    };
    let x = axis();
    let y = axis();
    let z = axis();
    vec3(x, y, z)
}

/// Color of a particle sitting at `radius` from the center
pub fn particle_color(params: &GalaxyParams, radius: f32) -> [f32; 3] {
    ColorRamp::new(params).sample(radius / params.radius)
}

/// Linear-space gradient between the inside and outside colors
struct ColorRamp {
    inside: LinearRgba,
    outside: LinearRgba,
}

impl ColorRamp {
    fn new(params: &GalaxyParams) -> Self {
        Self {
            inside: params.inside_color.to_linear(),
            outside: params.outside_color.to_linear(),
        }
    }

    // weighted form so both endpoints come out exact
    fn sample(&self, t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        [
            self.inside.red * s + self.outside.red * t,
            self.inside.green * s + self.outside.green * t,
            self.inside.blue * s + self.outside.blue * t,
        ]
    }
}
