// src/globe/input.rs

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_window::{CursorLeft, PrimaryWindow, WindowFocused};

use crate::globe::resources::GlobeSettings;
use crate::globe::rotation::RotationState;

/// Startet eine Drag-Session bei Maus-Press oder erstem Touch-Kontakt.
///
/// Zeigt der Pointer gerade auf ein egui-Panel, beansprucht das Panel die
/// Geste und der Globus bekommt sie nicht. Eine bereits laufende Session
/// wird nie überschrieben.
pub fn begin_drag_system(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    mut rotation: ResMut<RotationState>,
) {
    if rotation.is_dragging() {
        return;
    }
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let pressed_at = if let Some(touch) = touches.iter_just_pressed().next() {
        Some(touch.position())
    } else if mouse.just_pressed(MouseButton::Left) {
        windows
            .get_single()
            .ok()
            .and_then(|window| window.cursor_position())
    } else {
        None
    };

    if let Some(position) = pressed_at {
        rotation.begin_drag(position);
        debug!("Drag session started at {:?}", position);
    }
}

/// Führt die laufende Drag-Session mit der aktuellen Pointer-Position fort.
/// Touch hat Vorrang vor der Maus; ohne verwertbare Position passiert nichts.
pub fn apply_drag_system(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<GlobeSettings>,
    mut rotation: ResMut<RotationState>,
) {
    if !rotation.is_dragging() {
        return;
    }

    let position = if let Some(touch) = touches.iter().next() {
        Some(touch.position())
    } else if mouse.pressed(MouseButton::Left) {
        windows
            .get_single()
            .ok()
            .and_then(|window| window.cursor_position())
    } else {
        None
    };

    if let Some(position) = position {
        rotation.drag_to(position, &settings);
    }
}

/// Beendet die Drag-Session bei Release, Touch-Abbruch, Fokusverlust oder
/// wenn der Cursor das Fenster verlässt. Abbruch und Release verhalten sich
/// identisch; die zuletzt gemessene Geschwindigkeit bleibt erhalten.
pub fn end_drag_system(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut cursor_left: EventReader<CursorLeft>,
    mut focus_changed: EventReader<WindowFocused>,
    mut rotation: ResMut<RotationState>,
) {
    // Beide Reader jeden Frame leeren, sonst zünden veraltete Ereignisse
    // beim nächsten Drag.
    let pointer_left = cursor_left.read().count() > 0;
    let focus_lost = focus_changed.read().any(|event| !event.focused);

    if !rotation.is_dragging() {
        return;
    }

    let released = mouse.just_released(MouseButton::Left)
        || touches.any_just_released()
        || touches.any_just_canceled();

    if released || pointer_left || focus_lost {
        rotation.end_drag();
        debug!(
            "Drag session ended (released: {}, pointer left: {}, focus lost: {})",
            released, pointer_left, focus_lost
        );
    }
}
