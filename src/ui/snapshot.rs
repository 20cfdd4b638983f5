use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

pub struct SnapshotPlugin;

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TakeSnapshot>()
            .init_resource::<SnapshotCounter>()
            .add_systems(Update, take_snapshot);
    }
}

/// Request to save the next frame of the primary window as a png
#[derive(Event)]
pub struct TakeSnapshot;

#[derive(Resource, Default)]
struct SnapshotCounter(u32);

impl SnapshotCounter {
    fn next_path(&mut self) -> String {
        let path = format!("galaxy-snapshot-{}.png", self.0);
        self.0 += 1;
        path
    }
}

fn take_snapshot(
    mut commands: Commands,
    mut requests: EventReader<TakeSnapshot>,
    mut counter: ResMut<SnapshotCounter>,
) {
    // several clicks in one frame would capture the same image
    if requests.read().count() == 0 {
        return;
    }
    let path = counter.next_path();
    info!("Saving snapshot to {path}");
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_paths_are_numbered() {
        let mut counter = SnapshotCounter::default();
        assert_eq!(counter.next_path(), "galaxy-snapshot-0.png");
        assert_eq!(counter.next_path(), "galaxy-snapshot-1.png");
    }
}
