// src/globe/systems.rs

use bevy::prelude::*;

use crate::globe::resources::{GlobeSettings, GlowPulse};
use crate::globe::rotation::RotationState;
use crate::globe::scene::{AtmosphereShell, GlobeSphere};

/// Rückt den Rotationszustand um genau einen Frame vor. Die Policy-Auswahl
/// (Drag, Momentum, Leerlauf) liegt komplett in `RotationState`.
pub fn advance_rotation_system(
    settings: Res<GlobeSettings>,
    mut rotation: ResMut<RotationState>,
) {
    let before = rotation.last_policy();
    let after = rotation.advance_frame(&settings);
    if before != after {
        debug!("Spin policy changed: {:?} -> {:?}", before, after);
    }
}

/// Überträgt die Orientierung auf die Kugel-Transform. Einziger Schreiber
/// der Globus-Rotation; die Marker-Kinder folgen über die Hierarchie.
pub fn sync_globe_transform_system(
    rotation: Res<RotationState>,
    mut globes: Query<&mut Transform, With<GlobeSphere>>,
) {
    for mut transform in globes.iter_mut() {
        transform.rotation = rotation.orientation.to_quat();
    }
}

/// Pulsiert die Deckkraft der Atmosphären-Hülle. Läuft jeden Frame der
/// aktiven Szene, unabhängig davon, welche Rotations-Policy gerade gilt.
pub fn pulse_atmosphere_system(
    settings: Res<GlobeSettings>,
    mut pulse: ResMut<GlowPulse>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    shells: Query<&Handle<StandardMaterial>, With<AtmosphereShell>>,
) {
    let opacity = pulse.advance(&settings);
    for handle in shells.iter() {
        if let Some(material) = materials.get_mut(handle) {
            material.base_color = material.base_color.with_a(opacity);
        }
    }
}
