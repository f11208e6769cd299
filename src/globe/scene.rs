// src/globe/scene.rs

use bevy::prelude::*;
use bevy_asset::LoadState;

use crate::globe::resources::{GlobeSettings, GlobeTexture, GlowPulse, TargetLocation};
use crate::globe::rotation::{Orientation, RotationState};
use crate::globe::state::GlobePhase;

// --- Szenen-Farben (auf das Erd-Asset abgestimmte Akzente) ---

/// Cyanfarbener Akzent für Atmosphäre und erstes Punktlicht.
const ACCENT_CYAN: Color = Color::rgb(0.133, 0.827, 0.933); // #22d3ee
/// Violetter Akzent für das zweite Punktlicht.
const ACCENT_PURPLE: Color = Color::rgb(0.659, 0.333, 0.969); // #a855f7
/// Markerfarbe, deckend für den Kern und halbtransparent für das Glühen.
const MARKER_PINK: Color = Color::rgb(1.0, 0.2, 0.4); // #ff3366
/// Neutrales Grundlicht.
const AMBIENT_GREY: Color = Color::rgb(0.251, 0.251, 0.251); // #404040

/// Markiert alle Entities, die beim Verlassen von `Active` abgeräumt werden.
#[derive(Component)]
pub struct GlobeSceneEntity;

/// Die texturierte Hauptkugel; einziges Transform-Ziel der Rotation.
/// Marker und Glühen hängen als Kinder daran und drehen automatisch mit.
#[derive(Component)]
pub struct GlobeSphere;

/// Die pulsierende Atmosphären-Hülle. Eigenständiges Entity neben der
/// Kugel, dreht nicht mit.
#[derive(Component)]
pub struct AtmosphereShell;

/// Fordert die Erd-Textur beim Asset-Server an. Läuft einmal beim Start;
/// das Gate-System unten pollt den Ladezustand.
pub fn request_globe_texture_system(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("textures/earth.jpg");
    info!("Earth texture requested: textures/earth.jpg");
    commands.insert_resource(GlobeTexture {
        handle,
        failure_reported: false,
    });
}

/// Hält die Szene in `Loading`, bis die Textur gebunden ist.
///
/// Ein Ladefehler wird genau einmal gemeldet; die Phase bleibt dann stehen,
/// es wird nie auf einer Szene ohne Textur gerendert.
pub fn texture_ready_gate_system(
    asset_server: Res<AssetServer>,
    mut texture: ResMut<GlobeTexture>,
    mut next_phase: ResMut<NextState<GlobePhase>>,
) {
    match asset_server.load_state(&texture.handle) {
        LoadState::Loaded => {
            info!("Earth texture ready, building globe scene");
            next_phase.set(GlobePhase::Active);
        }
        LoadState::Failed => {
            if !texture.failure_reported {
                error!("Earth texture failed to load, globe scene stays down");
                texture.failure_reported = true;
            }
        }
        LoadState::NotLoaded | LoadState::Loading => {}
    }
}

/// Baut die komplette Globus-Szene auf: Kamera, Lichter, Kugel samt
/// Marker-Kindern und Atmosphäre. Setzt außerdem Rotations- und
/// Puls-Zustand auf ihre Startwerte, damit ein Wiederaufbau deterministisch
/// dasselbe Bild liefert.
pub fn spawn_globe_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    texture: Res<GlobeTexture>,
    settings: Res<GlobeSettings>,
    target: Res<TargetLocation>,
    mut rotation: ResMut<RotationState>,
    mut pulse: ResMut<GlowPulse>,
) {
    // Grundlicht plus zwei farbige Punktlichter im Verhältnis 2:1.
    // Die Kugel selbst ist unbeleuchtet; die Akzente tragen nur den Raum.
    commands.insert_resource(AmbientLight {
        color: AMBIENT_GREY,
        brightness: 40.0,
    });
    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                color: ACCENT_CYAN,
                intensity: 2_000_000.0,
                range: 100.0,
                ..default()
            },
            transform: Transform::from_xyz(5.0, 5.0, 5.0),
            ..default()
        },
        GlobeSceneEntity,
    ));
    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                color: ACCENT_PURPLE,
                intensity: 1_000_000.0,
                range: 100.0,
                ..default()
            },
            transform: Transform::from_xyz(-5.0, -5.0, 5.0),
            ..default()
        },
        GlobeSceneEntity,
    ));

    commands.spawn((
        Camera3dBundle {
            projection: PerspectiveProjection {
                fov: settings.camera_fov_deg.to_radians(),
                near: settings.camera_near,
                far: settings.camera_far,
                ..default()
            }
            .into(),
            transform: Transform::from_xyz(0.0, 0.0, settings.camera_distance)
                .looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        GlobeSceneEntity,
    ));

    // Start-Orientierung aus der Ziel-Koordinate; ohne Ziel bleibt der
    // Globus in Null-Lage und es wird kein Marker angehängt.
    let initial = match target.0 {
        Some(coord) => coord.initial_orientation(
            settings.initial_tilt_factor,
            settings.initial_tilt_limit,
        ),
        None => Orientation::default(),
    };
    rotation.reset_to(initial);
    *pulse = GlowPulse::default();

    let globe_mesh = meshes.add(
        Sphere::new(settings.globe_radius)
            .mesh()
            .uv(settings.globe_segments as usize, settings.globe_segments as usize),
    );
    // Unbeleuchtet, damit die Textur ihre native Helligkeit behält.
    let globe_material = materials.add(StandardMaterial {
        base_color_texture: Some(texture.handle.clone()),
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            PbrBundle {
                mesh: globe_mesh,
                material: globe_material,
                transform: Transform::from_rotation(initial.to_quat()),
                ..default()
            },
            GlobeSphere,
            GlobeSceneEntity,
        ))
        .with_children(|parent| {
            let Some(coord) = target.0 else {
                return;
            };
            // Marker und Glühen sitzen knapp über der Oberfläche und hängen
            // als Kinder an der Kugel: ein einziger Rotations-Schreibzugriff
            // bewegt beide mit.
            let surface = coord.surface_point(settings.marker_orbit_radius);
            let detail = settings.detail_segments as usize;

            parent.spawn(PbrBundle {
                mesh: meshes.add(
                    Sphere::new(settings.marker_glow_radius)
                        .mesh()
                        .uv(detail, detail),
                ),
                material: materials.add(StandardMaterial {
                    base_color: MARKER_PINK.with_a(settings.marker_glow_opacity),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    ..default()
                }),
                transform: Transform::from_translation(surface),
                ..default()
            });
            parent.spawn(PbrBundle {
                mesh: meshes.add(
                    Sphere::new(settings.marker_radius)
                        .mesh()
                        .uv(detail, detail),
                ),
                material: materials.add(StandardMaterial {
                    base_color: MARKER_PINK,
                    unlit: true,
                    ..default()
                }),
                transform: Transform::from_translation(surface),
                ..default()
            });
        });

    // Atmosphären-Hülle als Geschwister-Entity: symmetrisch, dreht nicht mit.
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(
                Sphere::new(settings.atmosphere_radius)
                    .mesh()
                    .uv(settings.globe_segments as usize, settings.globe_segments as usize),
            ),
            material: materials.add(StandardMaterial {
                base_color: ACCENT_CYAN.with_a(settings.atmosphere_spawn_opacity),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
            ..default()
        },
        AtmosphereShell,
        GlobeSceneEntity,
    ));

    match target.0 {
        Some(coord) => info!(
            "Globe scene built, marker at lat {:.3} lon {:.3}",
            coord.latitude, coord.longitude
        ),
        None => info!("Globe scene built without marker"),
    }
}

/// Räumt die Szene vollständig ab. Eine noch laufende Drag-Session wird wie
/// ein Abbruch behandelt, damit kein `active`-Flag hängen bleibt.
pub fn despawn_globe_scene(
    mut commands: Commands,
    mut rotation: ResMut<RotationState>,
    scene_entities: Query<Entity, With<GlobeSceneEntity>>,
) {
    rotation.end_drag();
    let mut count = 0;
    for entity in scene_entities.iter() {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    info!("Globe scene torn down ({} entities)", count);
}
