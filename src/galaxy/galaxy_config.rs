use bevy::prelude::*;
use spiral_galaxy::GalaxyParams;

/// The committed parameters the displayed galaxy was generated from
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub generation: i32,
    pub params: GalaxyParams,
    /// radians per second around the galactic axis
    pub rotation_speed: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 0,
            params: GalaxyParams::default(),
            rotation_speed: 0.01,
        }
    }
}

/// Draft values bound to the controller widgets. Only reaches the generator
/// through a [`GalaxyCommitted`] event.
#[derive(Resource, Clone, Default)]
pub struct GalaxyConfigUi {
    pub params: GalaxyParams,
}

/// Sent once a control settles, carrying the full parameter snapshot
#[derive(Event, Clone, Debug)]
pub struct GalaxyCommitted(pub GalaxyParams);

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyConfig::default())
            .init_resource::<GalaxyConfigUi>()
            .add_event::<GalaxyCommitted>()
            .add_systems(Update, apply_commits);
    }
}

/// Accepts the latest commit of the frame and bumps the generation, even when
/// the values are unchanged, so every settle resamples the galaxy.
/// Rejected snapshots leave the current galaxy untouched.
pub fn apply_commits(
    mut commits: EventReader<GalaxyCommitted>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    let Some(GalaxyCommitted(params)) = commits.read().last() else {
        return;
    };
    if let Err(err) = params.validate() {
        warn!("Ignoring galaxy parameters: {err}");
        return;
    }

    galaxy_config.params = params.clone();
    galaxy_config.generation += 1;
}
