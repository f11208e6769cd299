// src/globe/coordinates.rs

use bevy::math::Vec3;

use crate::globe::error::{GlobeError, GlobeResult};
use crate::globe::rotation::Orientation;
use crate::math::utils::{angles, constants};

/// Vorzeichen-Kalibrierung für das mitgelieferte equirektanguläre
/// Erd-Texture-Asset.
///
/// Die Negation des Längengrads gleicht die Orientierung genau dieses Assets
/// aus und ist KEINE allgemeine geografische Konvention. Wird die Textur
/// ausgetauscht, muss dieses Vorzeichen neu bestimmt werden.
pub const TEXTURE_LON_SIGN: f32 = -1.0;

/// Geografische Koordinate in Grad, validiert bei der Konstruktion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    /// Breitengrad in Grad, [-90, 90]
    pub latitude: f32,
    /// Längengrad in Grad, [-180, 180]
    pub longitude: f32,
}

impl GeoCoordinate {
    /// Erstellt eine Koordinate aus Grad-Werten.
    ///
    /// Nicht-endliche Werte fallen durch die Bereichsprüfung und werden
    /// genauso abgelehnt wie Werte außerhalb des gültigen Bereichs.
    pub fn new(latitude: f32, longitude: f32) -> GlobeResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GlobeError::InvalidLatitude { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GlobeError::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Längengrad in Radiant, inklusive Textur-Kalibrierung.
    fn calibrated_lon_rad(&self) -> f32 {
        TEXTURE_LON_SIGN * angles::deg_to_rad(self.longitude)
    }

    /// Bildet die Koordinate auf einen Punkt der Kugeloberfläche ab.
    ///
    /// y zeigt zum Nordpol; der Punkt liegt exakt im Abstand `radius` vom
    /// Ursprung.
    pub fn surface_point(&self, radius: f32) -> Vec3 {
        let lat = angles::deg_to_rad(self.latitude);
        let lon = self.calibrated_lon_rad();
        let cos_lat = lat.cos();

        Vec3::new(
            radius * cos_lat * lon.cos(),
            radius * lat.sin(),
            radius * cos_lat * lon.sin(),
        )
    }

    /// Start-Orientierung, die den Oberflächenpunkt der Kamera zuwendet.
    ///
    /// Das Gieren stellt den Längengrad frontal (+Z); das Nicken kippt den
    /// Globus proportional zum Breitengrad, damit auch polnahe Marker nicht
    /// an der Silhouette kleben. `tilt_factor` ist die Neigung bei 90° Breite,
    /// `tilt_limit` die harte Grenze des Kippwinkels.
    pub fn initial_orientation(&self, tilt_factor: f32, tilt_limit: f32) -> Orientation {
        let yaw = constants::PI_OVER_2 - self.calibrated_lon_rad();
        let pitch = (-(self.latitude / 90.0) * tilt_factor).clamp(-tilt_limit, tilt_limit);
        Orientation::new(yaw, pitch)
    }
}
