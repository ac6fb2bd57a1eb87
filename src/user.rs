mod credentials;
mod generate;
mod import;
mod record;
mod store;

pub use credentials::{
    check_password, hash_password, CredentialError, CredentialSnapshot, CredentialVerifier,
};
pub use generate::{os_random_seed, seeded_rng, RandomUsers};
pub use import::{load_records, save_records, DatasetError};
pub use record::{RecordError, UserLocation, UserName, UserRecord};
pub use store::{StoreError, UserStore};
