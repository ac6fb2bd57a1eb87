mod config;
mod endpoints;
mod response;

pub use config::{
    ConfigError, GeneratorConfig, SeededGeneratorConfig, ServiceConfig, UnseededGeneratorConfig,
};
pub use endpoints::{
    create_user, delete_user, get_distances, get_user, list_users, login, register, update_user,
    Credentials,
};
pub use response::{ApiResponse, LoginResponse, UpdateResponse};
