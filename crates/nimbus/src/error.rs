//! Umbrella error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] nimbus_config::ConfigError),

    #[error("API error: {0}")]
    Api(#[from] nimbus_api::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
