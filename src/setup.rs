// ./src/setup.rs
use std::env;
use std::fs;
use std::path::Path;

use bevy::prelude::*;

use crate::globe::coordinates::GeoCoordinate;
use crate::globe::error::{GlobeError, GlobeResult};
use crate::globe::resources::{GlobeSettings, TargetLocation};

/// Pfad der optionalen Einstellungs-Datei, relativ zum Arbeitsverzeichnis.
const SETTINGS_PATH: &str = "assets/globe.ron";

/// Lädt `assets/globe.ron`, falls vorhanden, und überschreibt damit die
/// Defaults. Lese- oder Parse-Fehler werden gemeldet; die Anwendung läuft
/// dann mit den Default-Einstellungen weiter.
pub fn load_settings_system(mut settings: ResMut<GlobeSettings>) {
    match read_settings(Path::new(SETTINGS_PATH)) {
        Ok(Some(loaded)) => {
            *settings = loaded;
            info!("Settings loaded from {}", SETTINGS_PATH);
        }
        Ok(None) => {
            info!("No settings file at {}, using defaults", SETTINGS_PATH);
        }
        Err(err) => {
            warn!("{}, using defaults", err);
        }
    }
}

fn read_settings(path: &Path) -> GlobeResult<Option<GlobeSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(|err| GlobeError::SettingsParse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let parsed = ron::from_str(&raw).map_err(|err| GlobeError::SettingsParse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    Ok(Some(parsed))
}

/// Löst die Ziel-Koordinate aus den Kommandozeilen-Argumenten auf
/// (`--lat <Grad> --lon <Grad>`). Ohne Argumente startet der Globus ohne
/// Marker in Default-Orientierung.
pub fn resolve_target_location_system(mut target: ResMut<TargetLocation>) {
    let args: Vec<String> = env::args().collect();
    match parse_target_args(&args) {
        Ok(Some(coord)) => {
            info!(
                "Target location: lat {:.3}, lon {:.3}",
                coord.latitude, coord.longitude
            );
            target.0 = Some(coord);
        }
        Ok(None) => {
            info!("No target location given, globe starts without marker");
        }
        Err(err) => {
            warn!("{}, globe starts without marker", err);
        }
    }
}

fn parse_target_args(args: &[String]) -> GlobeResult<Option<GeoCoordinate>> {
    let lat = flag_value(args, "--lat")?;
    let lon = flag_value(args, "--lon")?;

    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(GeoCoordinate::new(lat, lon)?)),
        (None, None) => Ok(None),
        // Halbe Angabe ist ein Bedienfehler, kein stiller Default.
        (Some(_), None) => Err(GlobeError::ArgumentParse {
            name: "--lon".to_string(),
            value: "missing".to_string(),
        }),
        (None, Some(_)) => Err(GlobeError::ArgumentParse {
            name: "--lat".to_string(),
            value: "missing".to_string(),
        }),
    }
}

fn flag_value(args: &[String], name: &str) -> GlobeResult<Option<f32>> {
    let Some(index) = args.iter().position(|arg| arg == name) else {
        return Ok(None);
    };
    let Some(raw) = args.get(index + 1) else {
        return Err(GlobeError::ArgumentParse {
            name: name.to_string(),
            value: "missing".to_string(),
        });
    };
    raw.parse::<f32>()
        .map(Some)
        .map_err(|_| GlobeError::ArgumentParse {
            name: name.to_string(),
            value: raw.clone(),
        })
}
