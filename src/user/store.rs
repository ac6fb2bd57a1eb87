use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use super::record::{RecordError, UserRecord};
use crate::geo::GeoPoint;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("user {0} already exists")]
    DuplicateUser(String),

    #[error("no user with id {0}")]
    MissingUser(u64),

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
}

/// In-memory user store keyed by store-assigned sequential ids.
///
/// Usernames are unique and locations are validated on the way in, so every
/// stored location converts cleanly to a `GeoPoint`.
#[derive(Debug, Default)]
pub struct UserStore {
    users: BTreeMap<u64, UserRecord>,
    next_id: u64,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under a fresh id and returns the id.
    pub fn insert(&mut self, mut record: UserRecord) -> Result<u64, StoreError> {
        if self.by_username(&record.username).is_some() {
            return Err(StoreError::DuplicateUser(record.username));
        }
        if let Some(location) = &record.location {
            location.geo_point()?;
        }

        let id = self.next_id;
        self.next_id += 1;
        record.id = Some(id);
        debug!(id, username = %record.username, "inserting user");
        self.users.insert(id, record);

        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&UserRecord> {
        self.users.get(&id)
    }

    pub fn by_username(&self, username: &str) -> Option<&UserRecord> {
        self.users.values().find(|user| user.username == username)
    }

    /// Replaces the record stored under `id`, keeping the id itself.
    pub fn update(&mut self, id: u64, mut record: UserRecord) -> Result<&UserRecord, StoreError> {
        if !self.users.contains_key(&id) {
            return Err(StoreError::MissingUser(id));
        }
        if let Some(existing) = self.by_username(&record.username) {
            if existing.id != Some(id) {
                return Err(StoreError::DuplicateUser(record.username));
            }
        }
        if let Some(location) = &record.location {
            location.geo_point()?;
        }

        record.id = Some(id);
        debug!(id, username = %record.username, "updating user");
        self.users.insert(id, record);

        Ok(&self.users[&id])
    }

    pub fn remove(&mut self, id: u64) -> Result<UserRecord, StoreError> {
        debug!(id, "removing user");
        self.users.remove(&id).ok_or(StoreError::MissingUser(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// An owned snapshot of the coordinates of every located record, in id
    /// order. Records without a location are skipped. Later store mutations
    /// are invisible to a computation holding the snapshot.
    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.users
            .values()
            .filter_map(|user| user.location.as_ref())
            .filter_map(|location| location.geo_point().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::record::UserLocation;

    fn located_user(username: &str, lat: f64, lng: f64) -> UserRecord {
        let mut record = UserRecord::new(username, "hash");
        record.location = Some(UserLocation::from_degrees(lat, lng));
        record
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut store = UserStore::new();

        let first = store.insert(UserRecord::new("a", "hash")).unwrap();
        let second = store.insert(UserRecord::new("b", "hash")).unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(store.get(first).unwrap().id, Some(first));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let mut store = UserStore::new();
        store.insert(UserRecord::new("a", "hash")).unwrap();

        let result = store.insert(UserRecord::new("a", "other"));

        assert_eq!(result, Err(StoreError::DuplicateUser("a".to_string())));
    }

    #[test]
    fn malformed_location_is_rejected() {
        let mut store = UserStore::new();

        let result = store.insert(located_user("a", 120.0, 0.0));

        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn update_replaces_record_and_keeps_id() {
        let mut store = UserStore::new();
        let id = store.insert(UserRecord::new("a", "hash")).unwrap();

        let updated = store.update(id, located_user("a", 55.75, 37.616667)).unwrap();

        assert_eq!(updated.id, Some(id));
        assert!(updated.location.is_some());
    }

    #[test]
    fn update_rejects_username_of_another_user() {
        let mut store = UserStore::new();
        store.insert(UserRecord::new("a", "hash")).unwrap();
        let id = store.insert(UserRecord::new("b", "hash")).unwrap();

        let result = store.update(id, UserRecord::new("a", "hash"));

        assert_eq!(result, Err(StoreError::DuplicateUser("a".to_string())));
    }

    #[test]
    fn update_missing_user_fails() {
        let mut store = UserStore::new();

        let result = store.update(9, UserRecord::new("a", "hash"));

        assert_eq!(result, Err(StoreError::MissingUser(9)));
    }

    #[test]
    fn remove_returns_the_record() {
        let mut store = UserStore::new();
        let id = store.insert(UserRecord::new("a", "hash")).unwrap();

        let removed = store.remove(id).unwrap();

        assert_eq!(removed.username, "a");
        assert_eq!(store.remove(id), Err(StoreError::MissingUser(id)));
    }

    #[test]
    fn coordinates_skip_unlocated_records() {
        let mut store = UserStore::new();
        store.insert(UserRecord::new("nowhere", "hash")).unwrap();
        store.insert(located_user("berlin", 52.516667, 13.388890)).unwrap();
        store.insert(located_user("moscow", 55.75, 37.616667)).unwrap();

        let points = store.coordinates();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].lat(), 52.516667);
        assert_eq!(points[1].lng(), 37.616667);
    }
}
