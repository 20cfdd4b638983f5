pub use crate::{
    GalaxyError, GalaxyInstance, GalaxyParams, ParticleDisplay, ParticleSet, PointStyle,
};
