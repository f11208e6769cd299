// src/globe/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlobeError {
    #[error("Latitude out of range: expected [-90, 90], got {value}")]
    InvalidLatitude { value: f32 },

    #[error("Longitude out of range: expected [-180, 180], got {value}")]
    InvalidLongitude { value: f32 },

    #[error("Could not parse argument '{name}': {value}")]
    ArgumentParse { name: String, value: String },

    #[error("Could not parse settings file '{path}': {message}")]
    SettingsParse { path: String, message: String },
}

pub type GlobeResult<T> = Result<T, GlobeError>;
