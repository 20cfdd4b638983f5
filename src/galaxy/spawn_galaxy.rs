use super::galaxy_config::apply_commits;
use crate::graphics::{point_cloud_mesh, GalaxyPointsMaterial};
use crate::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

pub struct SpawnGalaxyPlugin;

impl Plugin for SpawnGalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisplayedGalaxy>()
            .add_systems(Startup, spawn_galaxy_root)
            .add_systems(
                Update,
                (regenerate_galaxy.after(apply_commits), rotate_galaxy),
            );
    }
}

/// Parent of the point cloud, carries the slow galactic rotation
#[derive(Component)]
pub struct GalaxyRoot;

#[derive(Component)]
pub struct GalaxyPoints;

/// Scene resources owned by one displayed particle set
pub struct GalaxyDrawable {
    entity: Entity,
    mesh: Option<Handle<Mesh>>,
    material: Handle<GalaxyPointsMaterial>,
}

#[derive(Resource)]
pub struct DisplayedGalaxy {
    generation: i32,
    instance: GalaxyInstance<GalaxyDrawable>,
}

impl Default for DisplayedGalaxy {
    fn default() -> Self {
        Self {
            generation: -1,
            instance: GalaxyInstance::default(),
        }
    }
}

/// The Bevy scene as seen by the generator: attaching spawns a point cloud
/// entity, releasing despawns it and frees its assets.
#[derive(SystemParam)]
pub struct SceneDisplay<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<GalaxyPointsMaterial>>,
    roots: Query<'w, 's, Entity, With<GalaxyRoot>>,
}

impl ParticleDisplay for SceneDisplay<'_, '_> {
    type Drawable = GalaxyDrawable;

    fn attach(&mut self, set: ParticleSet, style: PointStyle) -> GalaxyDrawable {
        let material = self.materials.add(GalaxyPointsMaterial::new(style));
        // an empty vertex buffer can't be uploaded
        let mesh = (!set.is_empty()).then(|| self.meshes.add(point_cloud_mesh(set)));

        let mut entity = self.commands.spawn((
            GalaxyPoints,
            Transform::IDENTITY,
            Visibility::Inherited,
            MeshMaterial3d(material.clone()),
            NotShadowCaster,
            NotShadowReceiver,
            NoFrustumCulling,
        ));
        if let Some(mesh) = &mesh {
            entity.insert(Mesh3d(mesh.clone()));
        }
        if let Ok(root) = self.roots.single() {
            entity.insert(ChildOf(root));
        }

        GalaxyDrawable {
            entity: entity.id(),
            mesh,
            material,
        }
    }

    fn release(&mut self, drawable: GalaxyDrawable) -> Result<(), GalaxyError> {
        self.commands.entity(drawable.entity).despawn();

        // render-world-only meshes may already be gone from the main world
        if let Some(mesh) = &drawable.mesh {
            self.meshes.remove(mesh);
        }
        self.materials
            .remove(&drawable.material)
            .map(|_| ())
            .ok_or_else(|| {
                GalaxyError::Disposal(format!(
                    "material {:?} missing for entity {}",
                    drawable.material.id(),
                    drawable.entity
                ))
            })
    }
}

fn spawn_galaxy_root(mut commands: Commands) {
    commands.spawn((
        Name::new("Galaxy"),
        GalaxyRoot,
        Transform::IDENTITY,
        Visibility::Visible,
    ));
}

/// Rebuilds the point cloud whenever a new config generation was committed
fn regenerate_galaxy(
    galaxy_config: Res<GalaxyConfig>,
    mut displayed: ResMut<DisplayedGalaxy>,
    mut display: SceneDisplay,
    mut exit: EventWriter<AppExit>,
) {
    if displayed.generation == galaxy_config.generation {
        return;
    }
    displayed.generation = galaxy_config.generation;

    let params = &galaxy_config.params;
    match displayed
        .instance
        .regenerate(&mut display, params, &mut rand::rng())
    {
        Ok(_) => info!(
            "Generated galaxy {} with {} particles",
            galaxy_config.generation, params.particle_count
        ),
        Err(err @ GalaxyError::Disposal(_)) => {
            error!("{err}");
            exit.write(AppExit::error());
        }
        Err(err) => warn!("Galaxy not regenerated: {err}"),
    }
}

fn rotate_galaxy(
    time: Res<Time>,
    galaxy_config: Res<GalaxyConfig>,
    mut roots: Query<&mut Transform, With<GalaxyRoot>>,
) {
    let angle = time.elapsed_secs() * galaxy_config.rotation_speed;
    for mut transform in &mut roots {
        transform.rotation = Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::GalaxyConfigPlugin;

    fn test_app(particle_count: i32) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<GalaxyPointsMaterial>>()
            .add_event::<AppExit>()
            .add_plugins(GalaxyConfigPlugin)
            .insert_resource(GalaxyConfig {
                params: GalaxyParams {
                    particle_count,
                    ..default()
                },
                ..default()
            })
            .init_resource::<DisplayedGalaxy>()
            .add_systems(Startup, spawn_galaxy_root)
            .add_systems(Update, regenerate_galaxy.after(apply_commits));
        app
    }

    fn galaxy_points(app: &mut App) -> Vec<Entity> {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<GalaxyPoints>>();
        query.iter(app.world()).collect()
    }

    fn commit(app: &mut App, params: GalaxyParams) {
        app.world_mut().send_event(GalaxyCommitted(params));
        app.update();
    }

    #[test]
    fn first_frame_displays_galaxy() {
        let mut app = test_app(1000);
        app.update();

        let points = galaxy_points(&mut app);
        assert_eq!(points.len(), 1);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
        assert_eq!(
            app.world().resource::<Assets<GalaxyPointsMaterial>>().len(),
            1
        );

        let parent = app.world().get::<ChildOf>(points[0]).map(|c| c.parent());
        let mut roots = app.world_mut().query_filtered::<Entity, With<GalaxyRoot>>();
        assert_eq!(parent, roots.iter(app.world()).next());
    }

    #[test]
    fn commit_replaces_previous_set() {
        let mut app = test_app(1000);
        app.update();
        let first = galaxy_points(&mut app);

        commit(
            &mut app,
            GalaxyParams {
                particle_count: 500,
                ..default()
            },
        );

        let second = galaxy_points(&mut app);
        assert_eq!(second.len(), 1);
        assert_ne!(first, second);

        let meshes = app.world().resource::<Assets<Mesh>>();
        assert_eq!(meshes.len(), 1);
        let (_, mesh) = meshes.iter().next().unwrap();
        assert_eq!(mesh.count_vertices(), 500 * 4);
        assert_eq!(
            app.world().resource::<Assets<GalaxyPointsMaterial>>().len(),
            1
        );
    }

    #[test]
    fn invalid_commit_keeps_current_set() {
        let mut app = test_app(1000);
        app.update();
        let before = galaxy_points(&mut app);

        commit(
            &mut app,
            GalaxyParams {
                branch_count: 0,
                particle_count: 1000,
                ..default()
            },
        );

        assert_eq!(galaxy_points(&mut app), before);
        assert_eq!(app.world().resource::<GalaxyConfig>().generation, 0);
    }

    #[test]
    fn empty_galaxy_has_no_mesh() {
        let mut app = test_app(0);
        app.update();

        assert_eq!(galaxy_points(&mut app).len(), 1);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 0);
    }
}
