// src/globe/rotation.rs

use bevy::prelude::*;

use crate::globe::resources::GlobeSettings;
use crate::math::utils::comparison;

/// Orientierung des Globus als Gier-/Nick-Winkelpaar.
///
/// Gieren (yaw) ist unbeschränkt und läuft über volle Umdrehungen hinaus
/// weiter; Nicken (pitch) wird bei jedem Schreibzugriff auf das konfigurierte
/// Limit geklemmt, damit der Globus nicht über die Pole kippt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Quaternion in XYZ-Reihenfolge: erst Nicken um X, dann Gieren um Y.
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Winkelgeschwindigkeit in Radiant pro gerendertem Frame, nicht pro Sekunde.
/// Reibungs- und Blend-Faktoren sind auf diese Einheit abgestimmt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngularVelocity {
    pub d_yaw: f32,
    pub d_pitch: f32,
}

impl AngularVelocity {
    /// Euklidische Norm beider Komponenten.
    pub fn speed(&self) -> f32 {
        (self.d_yaw * self.d_yaw + self.d_pitch * self.d_pitch).sqrt()
    }
}

/// Laufende Drag-Session zwischen Press und Release.
///
/// `origin` ist der Bildschirmpunkt des Gestenbeginns; die Orientierung folgt
/// der kumulierten Verschiebung seit diesem Ursprung. `base` wird erst beim
/// ersten Move-Ereignis eingefangen, nicht schon beim Press.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragSession {
    pub active: bool,
    pub base: Orientation,
    pub base_captured: bool,
    pub origin: Vec2,
    pub last: Vec2,
}

/// Welche Quelle die Rotation in einem Frame bestimmt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPolicy {
    /// Eingabe-Controller schreibt die Orientierung; der Frame-Schritt ruht.
    Dragging,
    /// Restgeschwindigkeit klingt mit exponentieller Reibung ab.
    Momentum,
    /// Gieren wird sanft auf die Leerlauf-Drehung eingeblendet.
    #[default]
    AutoRotate,
}

/// Gesamter Rotationszustand des Globus.
///
/// Alle Übergänge laufen über die Methoden hier und sind ohne Renderer
/// testbar; die Systeme synchronisieren lediglich Eingabe-Ereignisse und
/// die Transform-Komponente mit dieser Ressource.
#[derive(Resource, Debug, Clone, Default)]
pub struct RotationState {
    pub orientation: Orientation,
    pub velocity: AngularVelocity,
    pub drag: DragSession,
    last_policy: SpinPolicy,
}

impl RotationState {
    /// Setzt den Zustand auf eine frische Start-Orientierung zurück.
    pub fn reset_to(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.velocity = AngularVelocity::default();
        self.drag = DragSession::default();
        self.last_policy = SpinPolicy::default();
    }

    /// Startet eine Drag-Session am angegebenen Bildschirmpunkt.
    ///
    /// Die Restgeschwindigkeit bleibt erhalten; ein Antippen ohne Bewegung
    /// setzt die Drehung anschließend unverändert fort.
    pub fn begin_drag(&mut self, position: Vec2) {
        self.drag = DragSession {
            active: true,
            base: Orientation::default(),
            base_captured: false,
            origin: position,
            last: position,
        };
    }

    /// Verarbeitet ein Move-Ereignis der aktiven Drag-Session.
    ///
    /// Beim ersten Move wird die aktuelle Orientierung als Basis eingefangen.
    /// Danach gilt: Orientierung = Basis + kumulierte Verschiebung seit dem
    /// Ursprung mal Empfindlichkeit. Die Geschwindigkeit dagegen stammt aus
    /// dem Schritt seit dem letzten Move-Ereignis und wird erst nach dem
    /// Release wirksam.
    pub fn drag_to(&mut self, position: Vec2, settings: &GlobeSettings) {
        if !self.drag.active {
            return;
        }
        if !self.drag.base_captured {
            self.drag.base = self.orientation;
            self.drag.base_captured = true;
        }

        let offset = position - self.drag.origin;
        self.orientation.yaw = self.drag.base.yaw + offset.x * settings.drag_sensitivity;
        self.orientation.pitch = (self.drag.base.pitch + offset.y * settings.drag_sensitivity)
            .clamp(-settings.pitch_limit, settings.pitch_limit);

        let step = position - self.drag.last;
        self.velocity.d_yaw = step.x * settings.velocity_scale;
        self.velocity.d_pitch = step.y * settings.velocity_scale;
        self.drag.last = position;
    }

    /// Beendet die Drag-Session. Release und Abbruch verhalten sich gleich:
    /// Session löschen, zuletzt gemessene Geschwindigkeit behalten.
    pub fn end_drag(&mut self) {
        self.drag = DragSession::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Zuletzt von `advance_frame` angewandte Policy (für Anzeige/Diagnose).
    pub fn last_policy(&self) -> SpinPolicy {
        self.last_policy
    }

    /// Wählt die Rotationsquelle für den aktuellen Frame anhand der
    /// Geschwindigkeit vor dem Frame-Schritt.
    pub fn current_policy(&self, settings: &GlobeSettings) -> SpinPolicy {
        if self.drag.active {
            SpinPolicy::Dragging
        } else if self.velocity.speed() >= settings.momentum_epsilon {
            SpinPolicy::Momentum
        } else {
            SpinPolicy::AutoRotate
        }
    }

    /// Rückt die Orientierung um genau einen Frame vor und meldet die dabei
    /// angewandte Policy.
    ///
    /// Im Leerlauf pendelt sich `d_yaw` unterhalb der Momentum-Schwelle ein
    /// (Blend und Reibung wirken gegeneinander), der Zustand fällt also nie
    /// von selbst nach `Momentum` zurück.
    pub fn advance_frame(&mut self, settings: &GlobeSettings) -> SpinPolicy {
        let policy = self.current_policy(settings);
        match policy {
            SpinPolicy::Dragging => {}
            SpinPolicy::Momentum => {
                self.integrate_and_damp(settings);
            }
            SpinPolicy::AutoRotate => {
                self.velocity.d_yaw = comparison::lerp(
                    self.velocity.d_yaw,
                    settings.auto_rotate_speed,
                    settings.auto_rotate_blend,
                );
                self.velocity.d_pitch *= settings.pitch_decay;
                self.integrate_and_damp(settings);
            }
        }
        self.last_policy = policy;
        policy
    }

    /// Gemeinsamer Frame-Schritt: integrieren, Nicken klemmen, Reibung.
    fn integrate_and_damp(&mut self, settings: &GlobeSettings) {
        self.orientation.yaw += self.velocity.d_yaw;
        self.orientation.pitch = (self.orientation.pitch + self.velocity.d_pitch)
            .clamp(-settings.pitch_limit, settings.pitch_limit);
        self.velocity.d_yaw *= settings.friction;
        self.velocity.d_pitch *= settings.friction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::comparison;

    fn settings() -> GlobeSettings {
        GlobeSettings::default()
    }

    #[test]
    fn test_orientation_quat_matches_axis_composition() {
        let orientation = Orientation::new(1.3, -0.7);
        let expected = Quat::from_rotation_x(-0.7) * Quat::from_rotation_y(1.3);
        let dot = orientation.to_quat().dot(expected).abs();
        assert!(comparison::nearly_equal_eps(dot, 1.0, 1e-5));
    }

    #[test]
    fn test_drag_yaw_from_total_displacement() {
        let s = settings();
        let mut state = RotationState::default();
        state.begin_drag(Vec2::new(0.0, 0.0));
        state.drag_to(Vec2::new(100.0, 0.0), &s);

        assert!(comparison::nearly_equal(state.orientation.yaw, 0.8));
        assert!(comparison::nearly_zero(state.orientation.pitch));
    }

    #[test]
    fn test_drag_replay_matches_single_cumulative_step() {
        let s = settings();

        let mut stepped = RotationState::default();
        stepped.orientation = Orientation::new(0.3, 0.1);
        stepped.begin_drag(Vec2::new(10.0, 20.0));
        stepped.drag_to(Vec2::new(25.0, 12.0), &s);
        stepped.drag_to(Vec2::new(48.0, -5.0), &s);
        stepped.drag_to(Vec2::new(70.0, 31.0), &s);

        let mut direct = RotationState::default();
        direct.orientation = Orientation::new(0.3, 0.1);
        direct.begin_drag(Vec2::new(10.0, 20.0));
        direct.drag_to(Vec2::new(70.0, 31.0), &s);

        assert!(comparison::nearly_equal(
            stepped.orientation.yaw,
            direct.orientation.yaw
        ));
        assert!(comparison::nearly_equal(
            stepped.orientation.pitch,
            direct.orientation.pitch
        ));
    }

    #[test]
    fn test_base_captured_on_first_move_not_on_press() {
        let s = settings();
        let mut state = RotationState::default();
        state.orientation = Orientation::new(1.0, 0.2);

        state.begin_drag(Vec2::new(50.0, 50.0));
        assert!(!state.drag.base_captured);
        assert!(comparison::nearly_equal(state.orientation.yaw, 1.0));

        state.drag_to(Vec2::new(60.0, 50.0), &s);
        assert!(state.drag.base_captured);
        assert!(comparison::nearly_equal(state.drag.base.yaw, 1.0));
        assert!(comparison::nearly_equal(
            state.orientation.yaw,
            1.0 + 10.0 * s.drag_sensitivity
        ));
    }

    #[test]
    fn test_pitch_clamped_during_drag() {
        let s = settings();
        let mut state = RotationState::default();
        state.begin_drag(Vec2::new(0.0, 0.0));
        state.drag_to(Vec2::new(0.0, 10_000.0), &s);
        assert!(comparison::nearly_equal(
            state.orientation.pitch,
            s.pitch_limit
        ));

        state.drag_to(Vec2::new(0.0, -10_000.0), &s);
        assert!(comparison::nearly_equal(
            state.orientation.pitch,
            -s.pitch_limit
        ));
    }

    #[test]
    fn test_pitch_clamped_during_momentum() {
        let s = settings();
        let mut state = RotationState::default();
        state.orientation = Orientation::new(0.0, 1.1);
        state.velocity = AngularVelocity {
            d_yaw: 0.0,
            d_pitch: 0.5,
        };

        for _ in 0..20 {
            state.advance_frame(&s);
            assert!(state.orientation.pitch <= s.pitch_limit);
            assert!(state.orientation.pitch >= -s.pitch_limit);
        }
    }

    #[test]
    fn test_release_retains_last_step_velocity() {
        let s = settings();
        let mut state = RotationState::default();
        state.begin_drag(Vec2::new(0.0, 0.0));
        state.drag_to(Vec2::new(30.0, 0.0), &s);
        state.drag_to(Vec2::new(50.0, 8.0), &s);
        state.end_drag();

        assert!(!state.is_dragging());
        assert!(comparison::nearly_equal(
            state.velocity.d_yaw,
            20.0 * s.velocity_scale
        ));
        assert!(comparison::nearly_equal(
            state.velocity.d_pitch,
            8.0 * s.velocity_scale
        ));
        assert_eq!(state.advance_frame(&s), SpinPolicy::Momentum);
    }

    #[test]
    fn test_tap_without_move_keeps_velocity() {
        let s = settings();
        let mut state = RotationState::default();
        state.velocity = AngularVelocity {
            d_yaw: 0.04,
            d_pitch: -0.01,
        };

        state.begin_drag(Vec2::new(5.0, 5.0));
        assert_eq!(state.advance_frame(&s), SpinPolicy::Dragging);
        state.end_drag();

        assert!(comparison::nearly_equal(state.velocity.d_yaw, 0.04));
        assert!(comparison::nearly_equal(state.velocity.d_pitch, -0.01));
    }

    #[test]
    fn test_dragging_policy_freezes_frame_advance() {
        let s = settings();
        let mut state = RotationState::default();
        state.orientation = Orientation::new(0.5, 0.1);
        state.velocity = AngularVelocity {
            d_yaw: 0.2,
            d_pitch: 0.1,
        };
        state.begin_drag(Vec2::new(0.0, 0.0));

        assert_eq!(state.advance_frame(&s), SpinPolicy::Dragging);
        assert!(comparison::nearly_equal(state.orientation.yaw, 0.5));
        assert!(comparison::nearly_equal(state.orientation.pitch, 0.1));
        assert!(comparison::nearly_equal(state.velocity.d_yaw, 0.2));
    }

    #[test]
    fn test_momentum_decays_then_hands_off_to_auto_rotate() {
        let s = settings();
        let mut state = RotationState::default();
        state.velocity = AngularVelocity {
            d_yaw: 0.05,
            d_pitch: 0.02,
        };

        let mut previous_speed = state.velocity.speed();
        let mut frames_in_momentum = 0;
        loop {
            let policy = state.advance_frame(&s);
            if policy == SpinPolicy::AutoRotate {
                break;
            }
            assert_eq!(policy, SpinPolicy::Momentum);
            let speed = state.velocity.speed();
            assert!(speed < previous_speed);
            previous_speed = speed;
            frames_in_momentum += 1;
            assert!(frames_in_momentum < 200, "momentum never decayed");
        }
        assert!(frames_in_momentum > 0);
    }

    #[test]
    fn test_auto_rotate_settles_below_momentum_threshold() {
        let s = settings();
        let mut state = RotationState::default();

        let mut previous_yaw = state.orientation.yaw;
        for _ in 0..500 {
            assert_eq!(state.advance_frame(&s), SpinPolicy::AutoRotate);
            assert!(state.velocity.d_yaw <= s.auto_rotate_speed);
            assert!(state.velocity.speed() < s.momentum_epsilon);
            assert!(state.orientation.yaw >= previous_yaw);
            previous_yaw = state.orientation.yaw;
        }
        // Nach dem Einschwingen dreht der Globus spürbar weiter.
        assert!(state.velocity.d_yaw > 0.0);
        assert!(state.orientation.yaw > 0.1);
    }

    #[test]
    fn test_reset_clears_motion_and_session() {
        let s = settings();
        let mut state = RotationState::default();
        state.begin_drag(Vec2::new(0.0, 0.0));
        state.drag_to(Vec2::new(40.0, -10.0), &s);
        state.advance_frame(&s);

        state.reset_to(Orientation::new(0.7, -0.2));

        assert!(!state.is_dragging());
        assert!(comparison::nearly_equal(state.orientation.yaw, 0.7));
        assert!(comparison::nearly_equal(state.orientation.pitch, -0.2));
        assert!(comparison::nearly_zero(state.velocity.speed()));
        assert_eq!(state.last_policy(), SpinPolicy::AutoRotate);
    }
}
