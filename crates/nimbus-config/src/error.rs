//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing API key/secret")]
    MissingApiCredentials,

    #[error("profile {0:?} not found in config file")]
    ProfileNotFound(String),

    #[error("config file {} lists no profiles", path.display())]
    EmptyConfig { path: PathBuf },

    #[error("unable to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
