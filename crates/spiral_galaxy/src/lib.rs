//! Procedural spiral galaxy point clouds.
//!
//! [`generate`] turns a [`GalaxyParams`] snapshot into a [`ParticleSet`];
//! [`GalaxyInstance`] swaps that set in through a [`ParticleDisplay`].
mod display;
mod error;
mod generator;
mod params;
mod particle_set;
pub mod prelude;

pub use display::{GalaxyInstance, ParticleDisplay, PointStyle};
pub use error::GalaxyError;
pub use generator::{
    UNWRITTEN_TAIL, branch_angle, generate, generate_with_rng, particle_color, scatter_offset,
    spiral_base,
};
pub use params::GalaxyParams;
pub use particle_set::ParticleSet;
