//! Umbrella client

use crate::error::Result;
use nimbus_config::{ConfigProfile, ProfileProvider};

/// A client for every Nimbus sub-service, built from one resolved
/// credential profile.
///
/// Sub-clients are fully independent; each one can also be constructed
/// directly from its own crate when only one service is needed.
#[derive(Debug, Clone)]
pub struct Client {
    pub compute: nimbus_compute::Client,
    pub dns: nimbus_dns::Client,
    pub runstatus: nimbus_runstatus::Client,
    pub storage: nimbus_storage::Client,
}

impl Client {
    /// Build a client from an ordered list of profile providers.
    ///
    /// Providers are tried in order and the first success wins. An empty
    /// list falls back to the default chain: the config file (from
    /// `NIMBUS_CONFIG_FILE` or the platform config directory), then the
    /// `NIMBUS_*` environment variables. Fails with a missing-credentials
    /// error when no source yields both API key and secret.
    pub fn new(providers: &[ProfileProvider]) -> Result<Self> {
        Self::with_tracing(providers, false)
    }

    /// Like [`Client::new`], with API request/response tracing toggled.
    pub fn with_tracing(providers: &[ProfileProvider], tracing: bool) -> Result<Self> {
        let profile = if providers.is_empty() {
            nimbus_config::resolve(&nimbus_config::default_providers())?
        } else {
            nimbus_config::resolve(providers)?
        };

        Self::from_resolved_profile(&profile, tracing)
    }

    // The profile is guaranteed complete by the resolver; the per-service
    // factories still re-validate on their own.
    fn from_resolved_profile(profile: &ConfigProfile, tracing: bool) -> Result<Self> {
        Ok(Self {
            compute: nimbus_compute::Client::new(
                &profile.api_key,
                &profile.api_secret,
                &profile.compute_api_endpoint,
                tracing,
            )?,
            dns: nimbus_dns::Client::new(
                &profile.api_key,
                &profile.api_secret,
                &profile.dns_api_endpoint,
                tracing,
            )?,
            runstatus: nimbus_runstatus::Client::new(
                &profile.api_key,
                &profile.api_secret,
                &profile.runstatus_api_endpoint,
                tracing,
            )?,
            storage: nimbus_storage::Client::new(
                &profile.api_key,
                &profile.api_secret,
                &profile.storage_api_endpoint,
                &profile.storage_zone,
                tracing,
            )?,
        })
    }
}
