use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::record::{UserLocation, UserName, UserRecord};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing file: {0}")]
    MissingFile(String),

    #[error("invalid dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One CSV dataset row. The password column carries the credential hash and
/// the coordinate columns are degrees, latitude first.
#[derive(Debug, Serialize, Deserialize)]
struct RawUser {
    username: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl From<RawUser> for UserRecord {
    fn from(raw: RawUser) -> Self {
        let name = if raw.first_name.is_some() || raw.last_name.is_some() {
            Some(UserName {
                first_name: raw.first_name,
                last_name: raw.last_name,
            })
        } else {
            None
        };
        let location = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lng)) => Some(UserLocation::from_degrees(lat, lng)),
            _ => None,
        };

        UserRecord {
            id: None,
            username: raw.username,
            password: raw.password,
            name,
            location,
        }
    }
}

impl From<&UserRecord> for RawUser {
    fn from(record: &UserRecord) -> Self {
        let name = record.name.clone().unwrap_or(UserName {
            first_name: None,
            last_name: None,
        });
        let point = record
            .location
            .as_ref()
            .and_then(|location| location.geo_point().ok());

        RawUser {
            username: record.username.clone(),
            password: record.password.clone(),
            first_name: name.first_name,
            last_name: name.last_name,
            latitude: point.map(|p| p.lat()),
            longitude: point.map(|p| p.lng()),
        }
    }
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<UserRecord>, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let raw: RawUser = row?;
        records.push(raw.into());
    }

    Ok(records)
}

pub fn write_records<W: Write>(writer: W, records: &[UserRecord]) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(RawUser::from(record))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Loads a user dataset from a CSV file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::MissingFile(path.display().to_string()));
    }

    let records = read_records(File::open(path)?)?;
    info!(count = records.len(), file = %path.display(), "loaded user dataset");

    Ok(records)
}

/// Writes a user dataset to a CSV file.
pub fn save_records<P: AsRef<Path>>(path: P, records: &[UserRecord]) -> Result<(), DatasetError> {
    write_records(File::create(path.as_ref())?, records)?;
    info!(count = records.len(), file = %path.as_ref().display(), "saved user dataset");

    Ok(())
}
