// src/globe/resources.rs

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::globe::coordinates::GeoCoordinate;

/// Alle Stellgrößen des Globus in einer Ressource.
///
/// Die Default-Werte sind auf das mitgelieferte Erd-Asset und auf Frames
/// als Zeiteinheit abgestimmt. Über `assets/globe.ron` lassen sich einzelne
/// Felder überschreiben; fehlende Felder behalten ihre Defaults.
#[derive(Resource, Reflect, Serialize, Deserialize, Debug, Clone)]
#[reflect(Resource)]
#[serde(default)]
pub struct GlobeSettings {
    // --- Drag-Eingabe ---
    pub drag_sensitivity: f32,
    pub velocity_scale: f32,

    // --- Rotations-Dynamik ---
    pub friction: f32,
    pub momentum_epsilon: f32,
    pub auto_rotate_speed: f32,
    pub auto_rotate_blend: f32,
    pub pitch_decay: f32,
    pub pitch_limit: f32,

    // --- Start-Orientierung ---
    pub initial_tilt_factor: f32,
    pub initial_tilt_limit: f32,

    // --- Geometrie ---
    pub globe_radius: f32,
    pub globe_segments: u32,
    pub atmosphere_radius: f32,
    pub marker_orbit_radius: f32,
    pub marker_radius: f32,
    pub marker_glow_radius: f32,
    pub detail_segments: u32,

    // --- Kamera ---
    pub camera_fov_deg: f32,
    pub camera_distance: f32,
    pub camera_near: f32,
    pub camera_far: f32,

    // --- Atmosphäre & Marker-Glühen ---
    pub atmosphere_spawn_opacity: f32,
    pub pulse_base_opacity: f32,
    pub pulse_amplitude: f32,
    pub pulse_step: f32,
    pub marker_glow_opacity: f32,
}

impl Default for GlobeSettings {
    fn default() -> Self {
        Self {
            // Eingabe
            drag_sensitivity: 0.008,
            velocity_scale: 0.015,

            // Dynamik
            friction: 0.95,
            momentum_epsilon: 0.001,
            auto_rotate_speed: 0.003,
            auto_rotate_blend: 0.02,
            pitch_decay: 0.9,
            pitch_limit: 1.2,

            // Start-Orientierung
            initial_tilt_factor: 0.35,
            initial_tilt_limit: 0.4,

            // Geometrie
            globe_radius: 2.0,
            globe_segments: 64,
            atmosphere_radius: 2.1,
            marker_orbit_radius: 2.05,
            marker_radius: 0.08,
            marker_glow_radius: 0.15,
            detail_segments: 16,

            // Kamera
            camera_fov_deg: 60.0,
            camera_distance: 4.5,
            camera_near: 0.1,
            camera_far: 1000.0,

            // Atmosphäre & Glühen
            atmosphere_spawn_opacity: 0.08,
            pulse_base_opacity: 0.06,
            pulse_amplitude: 0.02,
            pulse_step: 0.02,
            marker_glow_opacity: 0.4,
        }
    }
}

/// Ziel-Koordinate für den Marker. `None` heißt: kein Marker,
/// Default-Orientierung. Wird einmalig beim Start aufgelöst und danach
/// nicht mehr verändert.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TargetLocation(pub Option<GeoCoordinate>);

/// Handle auf die Erd-Textur samt Merker, ob ein Ladefehler schon im Log
/// gemeldet wurde.
#[derive(Resource, Debug, Clone)]
pub struct GlobeTexture {
    pub handle: Handle<Image>,
    pub failure_reported: bool,
}

/// Monoton wachsender Phasen-Akkumulator für das Pulsieren der Atmosphäre.
/// Läuft unabhängig vom Rotationszustand jeden Frame weiter.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GlowPulse {
    pub phase: f32,
}

impl GlowPulse {
    /// Rückt die Phase um einen Frame vor und liefert die Deckkraft
    /// `base + amplitude * sin(phase)` für diesen Frame.
    pub fn advance(&mut self, settings: &GlobeSettings) -> f32 {
        self.phase += settings.pulse_step;
        settings.pulse_base_opacity + settings.pulse_amplitude * self.phase.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::comparison;

    #[test]
    fn test_pulse_opacity_oscillates_around_base() {
        let settings = GlobeSettings::default();
        let mut pulse = GlowPulse::default();

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..1000 {
            let opacity = pulse.advance(&settings);
            min = min.min(opacity);
            max = max.max(opacity);
        }

        // 1000 Schritte à 0.02 decken mehrere volle Sinus-Perioden ab.
        assert!(comparison::nearly_equal_eps(
            min,
            settings.pulse_base_opacity - settings.pulse_amplitude,
            1e-3
        ));
        assert!(comparison::nearly_equal_eps(
            max,
            settings.pulse_base_opacity + settings.pulse_amplitude,
            1e-3
        ));
        assert!(pulse.phase > 0.0);
    }

    #[test]
    fn test_partial_ron_override_keeps_remaining_defaults() {
        let parsed: GlobeSettings =
            ron::from_str("(auto_rotate_speed: 0.01, pitch_limit: 0.9)").unwrap();

        assert!(comparison::nearly_equal(parsed.auto_rotate_speed, 0.01));
        assert!(comparison::nearly_equal(parsed.pitch_limit, 0.9));
        // Nicht überschriebene Felder bleiben auf den Defaults.
        assert!(comparison::nearly_equal(parsed.drag_sensitivity, 0.008));
        assert_eq!(parsed.globe_segments, 64);
    }
}
