use bevy::prelude::*;

mod camera;
mod config_egui;
mod snapshot;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            camera::CameraPlugin,
            config_egui::ConfigEguiPlugin,
            snapshot::SnapshotPlugin,
        ));
    }
}
