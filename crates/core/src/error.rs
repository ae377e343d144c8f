use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Session query failed: {0}")]
    SessionQuery(String),

    #[error("Invalid route pattern: {0}")]
    InvalidRoute(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
