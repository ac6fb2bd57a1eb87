use std::collections::BTreeMap;

use tracing::{info, warn};

use super::response::{ApiResponse, LoginResponse, UpdateResponse};
use crate::stats::{distance_statistics, DistanceResult};
use crate::user::{hash_password, CredentialVerifier, UserRecord, UserStore};

const UNAUTHORIZED: (&str, &str) = ("unauthorized", "Unauthorized access");
const NOT_FOUND: (&str, &str) = ("not_found", "Not found");
const USER_EXISTS: (&str, &str) = ("user_exists", "This account already exists.");

/// Basic credentials presented by the caller of an authenticated operation.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

fn authorized(verifier: &dyn CredentialVerifier, creds: Credentials) -> bool {
    let ok = verifier.verify(creds.username, creds.password);
    if !ok {
        warn!(username = %creds.username, "rejected credentials");
    }
    ok
}

/// The distances resource: pairwise great-circle distance statistics over
/// the coordinates of every stored user. Takes no parameters beyond the
/// caller's credentials.
pub fn get_distances(
    verifier: &dyn CredentialVerifier,
    creds: Credentials,
    store: &UserStore,
) -> ApiResponse<DistanceResult> {
    if !authorized(verifier, creds) {
        return ApiResponse::failed(UNAUTHORIZED.0, UNAUTHORIZED.1);
    }

    let points = store.coordinates();
    info!(points = points.len(), "computing distance statistics");

    ApiResponse::ok(distance_statistics(&points))
}

/// Lists every stored user. Passwords never serialize.
pub fn list_users(
    verifier: &dyn CredentialVerifier,
    creds: Credentials,
    store: &UserStore,
) -> ApiResponse<Vec<UserRecord>> {
    if !authorized(verifier, creds) {
        return ApiResponse::failed(UNAUTHORIZED.0, UNAUTHORIZED.1);
    }

    ApiResponse::ok(store.iter().cloned().collect())
}

pub fn get_user(
    verifier: &dyn CredentialVerifier,
    creds: Credentials,
    store: &UserStore,
    id: u64,
) -> ApiResponse<UserRecord> {
    if !authorized(verifier, creds) {
        return ApiResponse::failed(UNAUTHORIZED.0, UNAUTHORIZED.1);
    }

    match store.get(id) {
        Some(record) => ApiResponse::ok(record.clone()),
        None => ApiResponse::failed(NOT_FOUND.0, NOT_FOUND.1),
    }
}

/// Registers a new account. The payload's password arrives in plaintext and
/// is hashed before the record is stored.
pub fn register(store: &mut UserStore, payload: UserRecord) -> ApiResponse<UserRecord> {
    new_user(store, payload)
}

/// Authenticated variant of [`register`].
pub fn create_user(
    verifier: &dyn CredentialVerifier,
    creds: Credentials,
    store: &mut UserStore,
    payload: UserRecord,
) -> ApiResponse<UserRecord> {
    if !authorized(verifier, creds) {
        return ApiResponse::failed(UNAUTHORIZED.0, UNAUTHORIZED.1);
    }

    new_user(store, payload)
}

fn new_user(store: &mut UserStore, mut payload: UserRecord) -> ApiResponse<UserRecord> {
    if store.by_username(&payload.username).is_some() {
        return ApiResponse::failed(USER_EXISTS.0, USER_EXISTS.1);
    }

    payload.password = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(err) => return ApiResponse::failed("credentials", &err.to_string()),
    };

    match store.insert(payload) {
        Ok(id) => {
            info!(id, "registered user");
            ApiResponse {
                errors: BTreeMap::new(),
                results: store.get(id).cloned(),
            }
        }
        Err(err) => ApiResponse::failed("store", &err.to_string()),
    }
}

/// Replaces the record stored under `id`. An empty payload password keeps
/// the stored hash, a non-empty one is hashed and replaces it.
pub fn update_user(
    verifier: &dyn CredentialVerifier,
    creds: Credentials,
    store: &mut UserStore,
    id: u64,
    mut payload: UserRecord,
) -> UpdateResponse {
    let mut response = UpdateResponse {
        errors: BTreeMap::new(),
        updated: false,
        results: None,
    };
    if !authorized(verifier, creds) {
        response
            .errors
            .insert(UNAUTHORIZED.0.to_string(), UNAUTHORIZED.1.to_string());
        return response;
    }

    payload.password = if payload.password.is_empty() {
        match store.get(id) {
            Some(existing) => existing.password.clone(),
            None => return response,
        }
    } else {
        match hash_password(&payload.password) {
            Ok(hash) => hash,
            Err(err) => {
                response
                    .errors
                    .insert("credentials".to_string(), err.to_string());
                return response;
            }
        }
    };

    match store.update(id, payload) {
        Ok(record) => {
            response.updated = true;
            response.results = Some(record.clone());
        }
        Err(err) => {
            response.errors.insert("store".to_string(), err.to_string());
        }
    }

    response
}

/// Deletes the record stored under `id`; `updated` reports whether a record
/// was actually removed.
pub fn delete_user(
    verifier: &dyn CredentialVerifier,
    creds: Credentials,
    store: &mut UserStore,
    id: u64,
) -> UpdateResponse {
    let mut response = UpdateResponse {
        errors: BTreeMap::new(),
        updated: false,
        results: None,
    };
    if !authorized(verifier, creds) {
        response
            .errors
            .insert(UNAUTHORIZED.0.to_string(), UNAUTHORIZED.1.to_string());
        return response;
    }

    response.updated = store.remove(id).is_ok();
    response
}

/// Checks the payload credentials; on success the matching record rides
/// along in `results`.
pub fn login(
    verifier: &dyn CredentialVerifier,
    store: &UserStore,
    username: &str,
    password: &str,
) -> LoginResponse {
    let logged_in = verifier.verify(username, password);
    let results = if logged_in {
        info!(username = %username, "login");
        store.by_username(username).cloned()
    } else {
        None
    };

    LoginResponse {
        errors: BTreeMap::new(),
        logged_in,
        results,
    }
}
