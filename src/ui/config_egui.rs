use super::snapshot::TakeSnapshot;
use crate::prelude::*;
use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

/// What a widget reported this frame
#[derive(Clone, Copy, Default, Debug)]
struct WidgetState {
    changed: bool,
    dragged: bool,
    drag_stopped: bool,
}

impl WidgetState {
    fn read(response: &egui::Response) -> Self {
        Self {
            changed: response.changed(),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
        }
    }

    /// Drag released, or a discrete edit (typing, click)
    fn settled(self) -> bool {
        self.drag_stopped || (self.changed && !self.dragged)
    }
}

/// Color pickers report a change on every frame of a drag inside their
/// popup. Edits are held back until the pointer is let go.
#[derive(Default, Debug)]
struct ColorEdit {
    pending: bool,
}

impl ColorEdit {
    fn settled(&mut self, changed: bool, pointer_down: bool) -> bool {
        self.pending |= changed;
        if self.pending && !pointer_down {
            self.pending = false;
            return true;
        }
        false
    }
}

#[derive(Default)]
struct ControllerState {
    inside_color: ColorEdit,
    outside_color: ColorEdit,
}

/// Returns whether the color changed this frame
fn color_ui(label: &str, color: &mut Color, ui: &mut egui::Ui) -> bool {
    let mut rgb = color.to_srgba().to_u8_array_no_alpha();
    let changed = ui
        .horizontal(|ui| {
            let changed = ui.color_edit_button_srgb(&mut rgb).changed();
            ui.label(label);
            changed
        })
        .inner;
    if changed {
        *color = Color::srgb_u8(rgb[0], rgb[1], rgb[2]);
    }
    changed
}

fn params_ui(params: &mut GalaxyParams, state: &mut ControllerState, ui: &mut egui::Ui) -> bool {
    let minval = GalaxyParams::MIN;
    let maxval = GalaxyParams::MAX;

    let responses = [
        ui.add(
            egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                .step_by(0.01)
                .text("Galaxy Radius"),
        ),
        ui.add(
            egui::Slider::new(
                &mut params.particle_size,
                minval.particle_size..=maxval.particle_size,
            )
            .step_by(0.001)
            .text("Star Size"),
        ),
        ui.add(
            egui::Slider::new(
                &mut params.particle_count,
                minval.particle_count..=maxval.particle_count,
            )
            .step_by(100.0)
            .text("Stars Count"),
        ),
        ui.add(
            egui::Slider::new(
                &mut params.branch_count,
                minval.branch_count..=maxval.branch_count,
            )
            .text("Galaxy Branches"),
        ),
        ui.add(
            egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                .step_by(0.001)
                .text("Galaxy Spin"),
        ),
        ui.add(
            egui::Slider::new(
                &mut params.randomness,
                minval.randomness..=maxval.randomness,
            )
            .step_by(0.001)
            .text("Scattering"),
        ),
        ui.add(
            egui::Slider::new(
                &mut params.randomness_power,
                minval.randomness_power..=maxval.randomness_power,
            )
            .step_by(0.001)
            .text("Curve Trail"),
        ),
    ];
    let mut committed = responses
        .iter()
        .any(|response| WidgetState::read(response).settled());

    ui.separator();
    let inside_changed = color_ui("Inside Color", &mut params.inside_color, ui);
    let outside_changed = color_ui("Outside Color", &mut params.outside_color, ui);
    let pointer_down = ui.input(|i| i.pointer.any_down());
    committed |= state.inside_color.settled(inside_changed, pointer_down);
    committed |= state.outside_color.settled(outside_changed, pointer_down);
    committed
}

fn ui_system(
    mut contexts: EguiContexts,
    mut galaxy_ui_config: ResMut<GalaxyConfigUi>,
    mut commits: EventWriter<GalaxyCommitted>,
    mut snapshots: EventWriter<TakeSnapshot>,
    mut state: Local<ControllerState>,
) {
    let ctx = contexts.ctx_mut();
    let params = &mut galaxy_ui_config.params;
    let mut committed = false;

    egui::Window::new("Galaxy Controller")
        .default_open(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            committed = params_ui(params, &mut state, ui);

            ui.separator();
            if ui.button("Download Image").clicked() {
                snapshots.write(TakeSnapshot);
            }
        });

    if committed {
        commits.write(GalaxyCommitted(params.clone()));
    }
}
