// ./src/debug/ui.rs
use crate::globe::resources::{GlobeSettings, TargetLocation};
use crate::globe::rotation::RotationState;
use crate::globe::state::GlobePhase;
use crate::math::utils::angles;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{Slider, Window},
};

pub fn globe_control_ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<GlobeSettings>,
    rotation: Res<RotationState>,
    target: Res<TargetLocation>,
    current_phase: Res<State<GlobePhase>>,
    mut next_phase: ResMut<NextState<GlobePhase>>,
) {
    Window::new("Globussteuerung")
        .default_width(350.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Globus");

            ui.collapsing("Rotation & Status", |ui| {
                ui.label(format!("Policy: {:?}", rotation.last_policy()));
                ui.label(format!(
                    "Gieren: {:.3} rad ({:.1}°)",
                    rotation.orientation.yaw,
                    angles::rad_to_deg(angles::normalize_angle_signed(rotation.orientation.yaw))
                ));
                ui.label(format!(
                    "Nicken: {:.3} rad ({:.1}°)",
                    rotation.orientation.pitch,
                    angles::rad_to_deg(rotation.orientation.pitch)
                ));
                ui.label(format!(
                    "Geschwindigkeit: dYaw {:.5}, dPitch {:.5} (Norm {:.5})",
                    rotation.velocity.d_yaw,
                    rotation.velocity.d_pitch,
                    rotation.velocity.speed()
                ));
                ui.label(format!(
                    "Drag aktiv: {}",
                    if rotation.is_dragging() { "ja" } else { "nein" }
                ));
            });

            ui.collapsing("Dynamik-Parameter", |ui| {
                ui.add(
                    Slider::new(&mut settings.auto_rotate_speed, 0.0..=0.02)
                        .text("Leerlauf-Drehung (rad/Frame)"),
                );
                ui.add(
                    Slider::new(&mut settings.auto_rotate_blend, 0.001..=0.2)
                        .logarithmic(true)
                        .text("Leerlauf-Blend"),
                );
                ui.add(Slider::new(&mut settings.friction, 0.80..=0.999).text("Reibung"));
                ui.add(
                    Slider::new(&mut settings.drag_sensitivity, 0.001..=0.05)
                        .logarithmic(true)
                        .text("Drag-Empfindlichkeit"),
                );
                ui.add(
                    Slider::new(&mut settings.velocity_scale, 0.001..=0.05)
                        .logarithmic(true)
                        .text("Schwung-Übernahme"),
                );
                ui.add(Slider::new(&mut settings.pitch_limit, 0.2..=1.5).text("Nick-Limit (rad)"));
                ui.add(Slider::new(&mut settings.pitch_decay, 0.5..=0.99).text("Nick-Dämpfung"));
            });

            ui.collapsing("Atmosphäre", |ui| {
                ui.add(
                    Slider::new(&mut settings.pulse_step, 0.0..=0.1).text("Puls-Schritt (rad/Frame)"),
                );
                ui.add(
                    Slider::new(&mut settings.pulse_base_opacity, 0.0..=0.3)
                        .text("Grund-Deckkraft"),
                );
                ui.add(
                    Slider::new(&mut settings.pulse_amplitude, 0.0..=0.1).text("Puls-Amplitude"),
                );
            });

            ui.collapsing("Ziel & Szene", |ui| {
                match target.0 {
                    Some(coord) => {
                        ui.label(format!(
                            "Ziel-Koordinate: lat {:.3}°, lon {:.3}°",
                            coord.latitude, coord.longitude
                        ));
                    }
                    None => {
                        ui.label("Kein Ziel gesetzt (ohne Marker).");
                    }
                }
                ui.label(format!("Phase: {:?}", current_phase.get()));
                ui.separator();
                if ui.button("↺ Szene neu aufbauen").clicked() {
                    // Nur den State setzen; Abbau und Wiederaufbau passieren in
                    // den OnExit/OnEnter-Systemen der Phase.
                    next_phase.set(GlobePhase::Loading);
                    info!("Scene rebuild requested, returning to Loading phase.");
                }
            });
        });
}
