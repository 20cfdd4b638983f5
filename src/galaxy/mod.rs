mod galaxy_config;
mod spawn_galaxy;

pub use galaxy_config::{GalaxyCommitted, GalaxyConfig, GalaxyConfigPlugin, GalaxyConfigUi};
pub use spawn_galaxy::SpawnGalaxyPlugin;
