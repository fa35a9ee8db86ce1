//! Profile providers and the first-match resolver
//!
//! A provider is a fallible factory producing one complete
//! [`ConfigProfile`] from a single source. Providers never merge fields
//! across sources: whichever provider succeeds supplies the whole profile.

use crate::error::{ConfigError, Result};
use crate::profile::{ConfigProfile, load_config};
use std::env;
use std::path::PathBuf;

/// Environment variable holding the API key.
pub const API_KEY_ENVVAR: &str = "NIMBUS_API_KEY";
/// Environment variable holding the API secret.
pub const API_SECRET_ENVVAR: &str = "NIMBUS_API_SECRET";
/// Environment variable overriding the compute API endpoint.
pub const COMPUTE_API_ENDPOINT_ENVVAR: &str = "NIMBUS_COMPUTE_API_ENDPOINT";
/// Environment variable overriding the DNS API endpoint.
pub const DNS_API_ENDPOINT_ENVVAR: &str = "NIMBUS_DNS_API_ENDPOINT";
/// Environment variable overriding the runstatus API endpoint.
pub const RUNSTATUS_API_ENDPOINT_ENVVAR: &str = "NIMBUS_RUNSTATUS_API_ENDPOINT";
/// Environment variable overriding the storage API endpoint.
pub const STORAGE_API_ENDPOINT_ENVVAR: &str = "NIMBUS_STORAGE_API_ENDPOINT";
/// Environment variable overriding the storage zone.
pub const STORAGE_ZONE_ENVVAR: &str = "NIMBUS_STORAGE_ZONE";
/// Environment variable overriding the config file location.
pub const CONFIG_FILE_ENVVAR: &str = "NIMBUS_CONFIG_FILE";

/// A strategy that attempts to produce one profile from one source.
pub struct ProfileProvider {
    inner: Box<dyn Fn() -> Result<ConfigProfile> + Send + Sync>,
}

impl ProfileProvider {
    fn new(inner: impl Fn() -> Result<ConfigProfile> + Send + Sync + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Attempt to produce a profile from this provider's source.
    pub fn profile(&self) -> Result<ConfigProfile> {
        (self.inner)()
    }
}

/// A provider wrapping an explicitly supplied profile. Always succeeds.
pub fn from_profile(profile: ConfigProfile) -> ProfileProvider {
    ProfileProvider::new(move || Ok(profile.clone()))
}

/// A provider reading the config file at `path`, selecting the
/// `default_profile` (or the first listed profile if none is set).
pub fn from_file(path: impl Into<PathBuf>) -> ProfileProvider {
    from_file_profile(path, "")
}

/// A provider reading the config file at `path` and selecting the profile
/// named `name`. An empty name behaves like [`from_file`].
pub fn from_file_profile(path: impl Into<PathBuf>, name: impl Into<String>) -> ProfileProvider {
    let path = path.into();
    let name = name.into();
    ProfileProvider::new(move || load_config(&path)?.profile(&name))
}

/// A provider reading the recognized `NIMBUS_*` environment variables.
///
/// Succeeds unconditionally; unset variables yield empty fields.
pub fn from_env() -> ProfileProvider {
    ProfileProvider::new(|| {
        let var = |name| env::var(name).unwrap_or_default();

        Ok(ConfigProfile {
            name: String::new(),
            api_key: var(API_KEY_ENVVAR),
            api_secret: var(API_SECRET_ENVVAR),
            compute_api_endpoint: var(COMPUTE_API_ENDPOINT_ENVVAR),
            dns_api_endpoint: var(DNS_API_ENDPOINT_ENVVAR),
            runstatus_api_endpoint: var(RUNSTATUS_API_ENDPOINT_ENVVAR),
            storage_api_endpoint: var(STORAGE_API_ENDPOINT_ENVVAR),
            storage_zone: var(STORAGE_ZONE_ENVVAR),
        })
    })
}

/// Resolve a profile out of an ordered provider list.
///
/// Providers are tried strictly in order and the first success wins; later
/// providers are never consulted. The winning profile must carry both API
/// key and secret. This is the sole enforcement point for that invariant,
/// so a profile returned here never needs re-checking by resolver callers.
pub fn resolve(providers: &[ProfileProvider]) -> Result<ConfigProfile> {
    for provider in providers {
        if let Ok(profile) = provider.profile() {
            if !profile.has_credentials() {
                return Err(ConfigError::MissingApiCredentials);
            }
            return Ok(profile);
        }
    }

    Err(ConfigError::MissingApiCredentials)
}

/// Locate the config file to use when none is given explicitly.
///
/// `NIMBUS_CONFIG_FILE` takes precedence; otherwise the platform config
/// directory is probed for `nimbus/config.toml`. Returns `None` when
/// neither resolves to an existing file.
pub fn default_config_file() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_FILE_ENVVAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let path = dirs::config_dir()?.join("nimbus").join("config.toml");
    if path.exists() { Some(path) } else { None }
}

/// The default provider chain: config file (when resolvable), then
/// environment.
pub fn default_providers() -> Vec<ProfileProvider> {
    let mut providers = Vec::new();
    if let Some(path) = default_config_file() {
        providers.push(from_file(path));
    }
    providers.push(from_env());
    providers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_fixture(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const ALL_ENVVARS: [&str; 7] = [
        API_KEY_ENVVAR,
        API_SECRET_ENVVAR,
        COMPUTE_API_ENDPOINT_ENVVAR,
        DNS_API_ENDPOINT_ENVVAR,
        RUNSTATUS_API_ENDPOINT_ENVVAR,
        STORAGE_API_ENDPOINT_ENVVAR,
        STORAGE_ZONE_ENVVAR,
    ];

    #[test]
    fn test_from_profile_passthrough() {
        let profile = ConfigProfile {
            name: "alice".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            ..Default::default()
        };

        let provider = from_profile(profile.clone());
        assert_eq!(provider.profile().unwrap(), profile);
        // Providers are reusable.
        assert_eq!(provider.profile().unwrap(), profile);
    }

    #[test]
    fn test_from_file_default_profile() {
        let file = config_fixture(
            r#"
default_profile = "bob"

[[profiles]]
name = "alice"
api_key = "alice-key"
api_secret = "alice-secret"

[[profiles]]
name = "bob"
api_key = "bob-key"
api_secret = "bob-secret"
"#,
        );

        let profile = from_file(file.path()).profile().unwrap();
        assert_eq!(profile.name, "bob");
        assert_eq!(profile.api_key, "bob-key");

        let profile = from_file_profile(file.path(), "alice").profile().unwrap();
        assert_eq!(profile.name, "alice");
        assert_eq!(profile.api_secret, "alice-secret");
    }

    #[test]
    #[serial]
    fn test_from_env_all_set() {
        let vars: Vec<_> = ALL_ENVVARS
            .iter()
            .map(|&name| (name, Some(format!("{name}-value"))))
            .collect();

        temp_env::with_vars(vars, || {
            let profile = from_env().profile().unwrap();
            assert_eq!(profile.api_key, "NIMBUS_API_KEY-value");
            assert_eq!(profile.api_secret, "NIMBUS_API_SECRET-value");
            assert_eq!(profile.compute_api_endpoint, "NIMBUS_COMPUTE_API_ENDPOINT-value");
            assert_eq!(profile.dns_api_endpoint, "NIMBUS_DNS_API_ENDPOINT-value");
            assert_eq!(profile.runstatus_api_endpoint, "NIMBUS_RUNSTATUS_API_ENDPOINT-value");
            assert_eq!(profile.storage_api_endpoint, "NIMBUS_STORAGE_API_ENDPOINT-value");
            assert_eq!(profile.storage_zone, "NIMBUS_STORAGE_ZONE-value");
        });
    }

    #[test]
    #[serial]
    fn test_from_env_none_set() {
        temp_env::with_vars_unset(ALL_ENVVARS, || {
            // Still succeeds, with every field empty.
            let profile = from_env().profile().unwrap();
            assert_eq!(profile, ConfigProfile::default());
        });
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let first = ConfigProfile {
            name: "first".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            ..Default::default()
        };
        let second = ConfigProfile {
            name: "second".to_string(),
            api_key: "other-key".to_string(),
            api_secret: "other-secret".to_string(),
            ..Default::default()
        };

        let resolved = resolve(&[
            from_file("/definitely/not/a/config.toml"),
            from_profile(first.clone()),
            from_profile(second),
        ])
        .unwrap();
        assert_eq!(resolved, first);
    }

    #[test]
    fn test_resolve_all_fail() {
        let err = resolve(&[
            from_file("/definitely/not/a/config.toml"),
            from_file("/also/not/a/config.toml"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiCredentials));
    }

    #[test]
    fn test_resolve_incomplete_winner() {
        // First success wins, then fails the credential check; later
        // providers are never consulted.
        let incomplete = ConfigProfile {
            api_key: "key".to_string(),
            ..Default::default()
        };
        let complete = ConfigProfile {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            ..Default::default()
        };

        let err = resolve(&[from_profile(incomplete), from_profile(complete)]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiCredentials));
    }

    #[test]
    #[serial]
    fn test_default_config_file_envvar() {
        let file = config_fixture("[[profiles]]\nname = \"alice\"\n");

        temp_env::with_var(CONFIG_FILE_ENVVAR, Some(file.path()), || {
            assert_eq!(default_config_file(), Some(file.path().to_path_buf()));
        });
    }
}
