//! Storage API client

use nimbus_api::{Command, CommandBus, Error, HttpCommandBus, Result};
use std::fmt;
use std::sync::Arc;

/// Default storage zone.
pub const DEFAULT_ZONE: &str = "eu-zrh-1";

/// Nimbus object storage API client.
#[derive(Clone)]
pub struct Client {
    pub(crate) bus: Arc<dyn CommandBus>,
    pub(crate) zone: String,
    endpoint: String,
}

impl Client {
    /// Build a storage client from API credentials.
    ///
    /// An empty `zone` selects [`DEFAULT_ZONE`]; an empty `api_endpoint`
    /// is derived from the zone (`https://sos-{zone}.nimbus.cloud`). No
    /// network I/O happens here; credentials are only validated for
    /// presence, not correctness.
    pub fn new(
        api_key: &str,
        api_secret: &str,
        api_endpoint: &str,
        zone: &str,
        tracing: bool,
    ) -> Result<Self> {
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(Error::MissingApiCredentials);
        }

        let zone = if zone.is_empty() { DEFAULT_ZONE } else { zone };

        let endpoint = if api_endpoint.is_empty() {
            format!("https://sos-{zone}.nimbus.cloud")
        } else {
            api_endpoint.to_string()
        };

        Ok(Self {
            bus: Arc::new(HttpCommandBus::new(
                endpoint.clone(),
                api_key,
                api_secret,
                tracing,
            )),
            zone: zone.to_string(),
            endpoint,
        })
    }

    /// Build a client over a custom command-bus transport.
    pub fn with_bus(bus: Arc<dyn CommandBus>, zone: &str) -> Self {
        Self {
            bus,
            zone: zone.to_string(),
            endpoint: String::new(),
        }
    }

    /// The storage zone this client addresses.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// The API endpoint this client dispatches to. Empty for clients
    /// built over a custom transport.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue a boolean-result command, normalizing structured API errors.
    pub(crate) async fn boolean<C: Command>(&self, cmd: &C) -> Result<()> {
        match nimbus_api::execute_boolean(&*self.bus, cmd).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::Api(format!("{} was not successful", C::NAME))),
            Err(err) => Err(nimbus_api::normalize(err)),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("storage::Client")
            .field("zone", &self.zone)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
