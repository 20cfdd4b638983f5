use bevy::{
    input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(PostUpdate, camera_control_system);
    }
}

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    let camera_main = CameraMain::default();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(camera_main.translation())
            .looking_at(camera_main.target_pos, Vec3::Y),
        camera_main,
    ));
}

/// Orbit camera around `target_pos`, with damped rotation and smoothed zoom
#[derive(Component, Clone)]
pub struct CameraMain {
    target_pos: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    // radians per frame, decays every frame
    angular_velocity: Vec2,
    smooth_zoom_buffer: f32,
}

impl Default for CameraMain {
    fn default() -> Self {
        Self::looking_from(Vec3::splat(3.0), Vec3::ZERO)
    }
}

impl CameraMain {
    const MIN_DISTANCE: f32 = 0.5;
    const MAX_DISTANCE: f32 = 50.0;
    const PITCH_LIMIT: f32 = 1.5;
    const DAMPING: f32 = 0.05;
    const ROTATE_SPEED: f32 = 0.005;

    fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        Self {
            target_pos: target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            angular_velocity: Vec2::ZERO,
            smooth_zoom_buffer: 0.0,
        }
    }

    fn translation(&self) -> Vec3 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        self.target_pos + rotation * Vec3::Z * self.distance
    }

    fn rotate(&mut self, drag: Vec2) {
        self.angular_velocity -= drag * Self::ROTATE_SPEED * Self::DAMPING;
    }

    fn zoom(&mut self, scroll: f32) {
        self.smooth_zoom_buffer += scroll * 0.05;
    }

    /// Advances one frame of inertia
    fn step(&mut self) {
        self.yaw += self.angular_velocity.x;
        self.pitch = (self.pitch - self.angular_velocity.y)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.angular_velocity *= 1.0 - Self::DAMPING;

        // scroll delta is cached to a buffer
        // buffer is converted to actual zoom over time for a smooth zooming effect
        let smooth_zoom_min = 0.001f32;
        let smooth_zoom_factor = 0.2f32;

        let smooth_zoom_amount = if self.smooth_zoom_buffer < 0.0 {
            f32::min(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                (-smooth_zoom_min).max(self.smooth_zoom_buffer),
            )
        } else {
            f32::max(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                smooth_zoom_min.min(self.smooth_zoom_buffer),
            )
        };
        self.smooth_zoom_buffer -= smooth_zoom_amount;
        self.distance = (self.distance * (1.0 - smooth_zoom_amount))
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut CameraMain)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let Ok((mut transform, mut camera_main)) = query.single_mut() else {
        return;
    };
    // the controller panel keeps the pointer while it's being used
    let egui_wants_pointer = contexts.ctx_mut().wants_pointer_input();

    for ev in scroll_evr.read() {
        if egui_wants_pointer {
            continue;
        }
        match ev.unit {
            MouseScrollUnit::Line => camera_main.zoom(ev.y),
            MouseScrollUnit::Pixel => camera_main.zoom(ev.y * 0.01),
        }
    }

    if mouse_buttons.pressed(MouseButton::Left) && !egui_wants_pointer {
        camera_main.rotate(mouse_motion.delta);
    }

    camera_main.step();

    transform.translation = camera_main.translation();
    transform.look_at(camera_main.target_pos, Vec3::Y);
}
