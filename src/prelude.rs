pub use crate::galaxy::{GalaxyCommitted, GalaxyConfig, GalaxyConfigUi};
pub use spiral_galaxy::prelude::*;
