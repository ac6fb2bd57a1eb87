use serde::Serialize;
use std::collections::BTreeMap;

use crate::user::UserRecord;

/// The wrapper most operations answer with: an `errors` map, empty on
/// success, and the operation's `results`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub errors: BTreeMap<String, String>,
    pub results: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(results: T) -> Self {
        ApiResponse {
            errors: BTreeMap::new(),
            results: Some(results),
        }
    }

    pub fn failed(key: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(key.to_string(), message.to_string());
        ApiResponse {
            errors,
            results: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Answer of the login operation.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub errors: BTreeMap<String, String>,
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<UserRecord>,
}

/// Answer of the mutating record operations.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub errors: BTreeMap<String, String>,
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<UserRecord>,
}
