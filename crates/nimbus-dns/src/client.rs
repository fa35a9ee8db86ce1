//! DNS API client

use nimbus_api::{Command, CommandBus, Error, HttpCommandBus, Result};
use std::fmt;
use std::sync::Arc;

/// Default DNS API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.nimbus.cloud/dns";

/// Nimbus DNS API client.
#[derive(Clone)]
pub struct Client {
    pub(crate) bus: Arc<dyn CommandBus>,
    endpoint: String,
}

impl Client {
    /// Build a DNS client from API credentials.
    ///
    /// An empty `api_endpoint` selects [`DEFAULT_API_ENDPOINT`]. No
    /// network I/O happens here; credentials are only validated for
    /// presence, not correctness.
    pub fn new(api_key: &str, api_secret: &str, api_endpoint: &str, tracing: bool) -> Result<Self> {
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(Error::MissingApiCredentials);
        }

        let endpoint = if api_endpoint.is_empty() {
            DEFAULT_API_ENDPOINT
        } else {
            api_endpoint
        };

        Ok(Self {
            bus: Arc::new(HttpCommandBus::new(endpoint, api_key, api_secret, tracing)),
            endpoint: endpoint.to_string(),
        })
    }

    /// Build a client over a custom command-bus transport.
    pub fn with_bus(bus: Arc<dyn CommandBus>) -> Self {
        Self {
            bus,
            endpoint: String::new(),
        }
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
        f.debug_struct("dns::Client")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_requires_credentials() {
        assert!(matches!(
            Client::new("", "", "", false).unwrap_err(),
            Error::MissingApiCredentials
        ));
        assert!(Client::new("key", "secret", "", false).is_ok());
    }

    #[test]
    fn test_new_client_default_endpoint() {
        let client = Client::new("key", "secret", "", false).unwrap();
        assert_eq!(client.endpoint(), DEFAULT_API_ENDPOINT);

        let client = Client::new("key", "secret", "https://api.example.com/dns", false).unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/dns");
    }
}
