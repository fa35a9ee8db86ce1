//! Credential profiles and the TOML config file schema

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// A named bundle of API credentials and per-service endpoint overrides.
///
/// Every field is a plain string; an empty value means "unset, use the
/// service default". Profiles are immutable once produced by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub compute_api_endpoint: String,
    #[serde(default)]
    pub dns_api_endpoint: String,
    #[serde(default)]
    pub runstatus_api_endpoint: String,
    #[serde(default)]
    pub storage_api_endpoint: String,
    #[serde(default)]
    pub storage_zone: String,
}

impl ConfigProfile {
    /// Whether both API key and secret are present.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    default_profile: String,
    #[serde(default)]
    profiles: Vec<ConfigProfile>,
}

/// A parsed config file.
#[derive(Debug)]
pub(crate) struct Config {
    path: PathBuf,
    default_profile: String,
    profiles: Vec<ConfigProfile>,
}

/// Load and parse a TOML config file.
pub(crate) fn load_config(path: impl Into<PathBuf>) -> Result<Config> {
    let path = path.into();

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let parsed: RawConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    Ok(Config {
        path,
        default_profile: parsed.default_profile,
        profiles: parsed.profiles,
    })
}

impl Config {
    /// Select a profile by name.
    ///
    /// An empty name falls back to `default_profile`, then to the first
    /// listed profile. A non-empty name that matches nothing is an error.
    pub(crate) fn profile(&self, name: &str) -> Result<ConfigProfile> {
        let name = if name.is_empty() {
            &self.default_profile
        } else {
            name
        };

        if name.is_empty() {
            return self
                .profiles
                .first()
                .cloned()
                .ok_or_else(|| ConfigError::EmptyConfig {
                    path: self.path.clone(),
                });
        }

        self.profiles
            .iter()
            .find(|p| p.name == *name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_fixture(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const TWO_PROFILES: &str = r#"
[[profiles]]
name = "alice"
api_key = "alice-key"
api_secret = "alice-secret"

[[profiles]]
name = "bob"
api_key = "bob-key"
api_secret = "bob-secret"
"#;

    #[test]
    fn test_load_config() {
        let file = config_fixture(TWO_PROFILES);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles[0].name, "alice");
        assert_eq!(config.profiles[0].api_key, "alice-key");
        assert_eq!(config.profiles[1].name, "bob");
        assert_eq!(config.profiles[1].api_secret, "bob-secret");
    }

    #[test]
    fn test_profile_by_name() {
        let file = config_fixture(TWO_PROFILES);
        let config = load_config(file.path()).unwrap();

        let profile = config.profile("bob").unwrap();
        assert_eq!(profile.name, "bob");
        assert_eq!(profile.api_key, "bob-key");
    }

    #[test]
    fn test_profile_first_listed_fallback() {
        let file = config_fixture(TWO_PROFILES);
        let config = load_config(file.path()).unwrap();

        // No default_profile set, so the first listed profile wins.
        let profile = config.profile("").unwrap();
        assert_eq!(profile.name, "alice");
    }

    #[test]
    fn test_profile_default_profile() {
        let file = config_fixture(&format!("default_profile = \"bob\"\n{TWO_PROFILES}"));
        let config = load_config(file.path()).unwrap();

        let profile = config.profile("").unwrap();
        assert_eq!(profile.name, "bob");
        assert_eq!(profile.api_secret, "bob-secret");
    }

    #[test]
    fn test_profile_not_found() {
        let file = config_fixture(TWO_PROFILES);
        let config = load_config(file.path()).unwrap();

        let err = config.profile("charlie").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound(name) if name == "charlie"));
    }

    #[test]
    fn test_empty_config() {
        let file = config_fixture("");
        let config = load_config(file.path()).unwrap();

        assert!(matches!(
            config.profile("").unwrap_err(),
            ConfigError::EmptyConfig { .. }
        ));
    }

    #[test]
    fn test_unreadable_file() {
        assert!(matches!(
            load_config("/definitely/not/a/config.toml").unwrap_err(),
            ConfigError::Read { .. }
        ));
    }

    #[test]
    fn test_malformed_file() {
        let file = config_fixture("profiles = 42");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
