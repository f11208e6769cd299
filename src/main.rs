// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod globe;
pub mod math;
pub mod setup;

// Importiere spezifische Elemente aus unseren Modulen
use debug::ui::globe_control_ui_system;
use globe::input::*;
use globe::resources::*;
use globe::rotation::RotationState;
use globe::scene::*;
use globe::state::GlobePhase;
use globe::systems::*;
use setup::{load_settings_system, resolve_target_location_system};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<GlobeSettings>()
        .init_resource::<TargetLocation>()
        .init_resource::<RotationState>()
        .init_resource::<GlowPulse>()
        .register_type::<GlobeSettings>()
        .init_state::<GlobePhase>()
        // Bootstrap: erst Einstellungen, dann Ziel-Koordinate auflösen.
        .add_systems(
            PreStartup,
            (load_settings_system, resolve_target_location_system).chain(),
        )
        .add_systems(Startup, request_globe_texture_system)
        // --- Ladephase ---
        // Hält die Szene zurück, bis die Erd-Textur gebunden ist.
        .add_systems(
            Update,
            texture_ready_gate_system.run_if(in_state(GlobePhase::Loading)),
        )
        // Auf- und Abbau der kompletten Szene am Phasenwechsel.
        .add_systems(OnEnter(GlobePhase::Active), spawn_globe_scene)
        .add_systems(OnExit(GlobePhase::Active), despawn_globe_scene)
        .add_systems(
            Update,
            (
                // Block 1: Eingabe (beginnen, fortführen, beenden)
                begin_drag_system,
                apply_drag_system,
                end_drag_system,
                // Block 2: Frame-Schritt und Transform-Synchronisation
                advance_rotation_system,
                sync_globe_transform_system,
                // Block 3: Atmosphären-Puls, läuft unabhängig von der Rotation
                pulse_atmosphere_system,
            )
                .chain() // .chain() auf das gesamte Tupel der Update-Systeme
                .run_if(in_state(GlobePhase::Active)),
        )
        .add_systems(Update, globe_control_ui_system)
        .run();
}
