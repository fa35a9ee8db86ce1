//! Nimbus SDK configuration
//!
//! Resolves the active credential profile out of several competing
//! sources. Three provider kinds exist, composed in priority order by the
//! caller (typically the umbrella client bootstrap):
//!
//! 1. an explicitly supplied profile ([`from_profile`]),
//! 2. a TOML config file ([`from_file`], [`from_file_profile`]),
//! 3. the `NIMBUS_*` environment variables ([`from_env`]).
//!
//! [`resolve`] tries providers strictly in order and stops at the first
//! success; sources are never merged field by field. The winning profile
//! is guaranteed to carry API credentials.
//!
//! # Config file schema
//!
//! ```toml
//! default_profile = "prod"
//!
//! [[profiles]]
//! name = "prod"
//! api_key = "NIMKEY..."
//! api_secret = "..."
//!
//! [[profiles]]
//! name = "staging"
//! api_key = "NIMKEY..."
//! api_secret = "..."
//! compute_api_endpoint = "https://api.staging.nimbus.cloud/compute"
//! ```

pub mod error;
pub mod profile;
pub mod provider;

pub use error::{ConfigError, Result};
pub use profile::ConfigProfile;
pub use provider::{
    API_KEY_ENVVAR, API_SECRET_ENVVAR, COMPUTE_API_ENDPOINT_ENVVAR, CONFIG_FILE_ENVVAR,
    DNS_API_ENDPOINT_ENVVAR, ProfileProvider, RUNSTATUS_API_ENDPOINT_ENVVAR,
    STORAGE_API_ENDPOINT_ENVVAR, STORAGE_ZONE_ENVVAR, default_config_file, default_providers,
    from_env, from_file, from_file_profile, from_profile, resolve,
};
