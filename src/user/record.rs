use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

/// Errors raised while validating a record's fields.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("location must hold exactly two coordinates, got {0}")]
    CoordinateCount(usize),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeRange(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A record's geographic location: a `type` tag and a coordinate list.
///
/// The coordinate list is latitude first: `[latitude, longitude]`, degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserLocation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub coordinates: Vec<f64>,
}

impl UserLocation {
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        UserLocation {
            kind: Some("Point".to_string()),
            coordinates: vec![lat, lng],
        }
    }

    /// Validates the coordinate list and converts it to a `GeoPoint`.
    pub fn geo_point(&self) -> Result<GeoPoint, RecordError> {
        if self.coordinates.len() != 2 {
            return Err(RecordError::CoordinateCount(self.coordinates.len()));
        }

        let (lat, lng) = (self.coordinates[0], self.coordinates[1]);
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RecordError::LatitudeRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(RecordError::LongitudeRange(lng));
        }

        Ok(GeoPoint::from_degrees(lat, lng))
    }
}

/// A stored user.
///
/// `password` holds the credential hash; it deserializes from payloads but
/// never serializes back out. `id` is assigned by the store. Unknown payload
/// fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<UserLocation>,
}

impl UserRecord {
    pub fn new(username: &str, password_hash: &str) -> Self {
        UserRecord {
            id: None,
            username: username.to_string(),
            password: password_hash.to_string(),
            name: None,
            location: None,
        }
    }

    /// The record's coordinates, if it has any, validated.
    pub fn geo_point(&self) -> Option<Result<GeoPoint, RecordError>> {
        self.location.as_ref().map(UserLocation::geo_point)
    }
}
