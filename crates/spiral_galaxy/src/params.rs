use bevy::prelude::*;

use crate::GalaxyError;

/// User-facing generation parameters. Owned and mutated by the UI layer,
/// passed by value/reference into the generator which only reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParams {
    pub particle_size: f32,
    pub radius: f32,
    pub particle_count: i32,
    pub branch_count: i32,
    /// radians of twist per unit of radius
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            particle_size: 0.01,
            radius: 5.0,
            particle_count: 100_000,
            branch_count: 3,
            spin: 1.017,
            randomness: 1.287,
            randomness_power: 3.0,
            inside_color: Color::srgb_u8(0xff, 0x60, 0x30),
            outside_color: Color::srgb_u8(0x3b, 0x38, 0xff),
        }
    }
}

impl GalaxyParams {
    // Slider bounds for the controller panel, validation is looser than this
    pub const MIN: Self = Self {
        particle_size: 0.001,
        radius: 0.01,
        particle_count: 100,
        branch_count: 2,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Color::BLACK,
        outside_color: Color::BLACK,
    };
    pub const MAX: Self = Self {
        particle_size: 0.1,
        radius: 20.0,
        particle_count: 100_000,
        branch_count: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Color::WHITE,
        outside_color: Color::WHITE,
    };

    /// Checks the parameter domain. Must pass before anything is generated
    /// or any displayed set is touched.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.particle_count < 0 {
            return Err(GalaxyError::InvalidParticleCount(self.particle_count));
        }
        if self.branch_count < 1 {
            return Err(GalaxyError::InvalidBranchCount(self.branch_count));
        }
        // NaN fails the comparison too
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(GalaxyError::InvalidRadius(self.radius));
        }
        if !(self.particle_size > 0.0) || !self.particle_size.is_finite() {
            return Err(GalaxyError::InvalidParticleSize(self.particle_size));
        }

        let finite = [
            ("spin", self.spin),
            ("randomness", self.randomness),
            ("randomness_power", self.randomness_power),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(GalaxyError::NonFinite(name));
            }
        }
        // u^p with p < 0 is unbounded as u -> 0, and 0^p is inf
        if self.randomness_power < 0.0 {
            return Err(GalaxyError::InvalidRandomnessPower(self.randomness_power));
        }
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count.max(0) as usize
    }
}
