//! Command bus transport
//!
//! The command bus is the request/response seam between sub-clients and the
//! remote management API. Sub-clients only depend on the [`CommandBus`]
//! trait; [`HttpCommandBus`] is the stock HTTPS implementation.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote command transport used by every sub-client.
///
/// Implementations must be safe to share across tasks; the SDK clients
/// clone a single handle per service. Cancellation is structural: dropping
/// the returned future abandons the in-flight request.
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// Execute a command and return its raw payload.
    async fn execute(&self, command: &str, params: Value) -> Result<Value>;

    /// Execute a list command and return the raw payloads of every match.
    ///
    /// An empty result set is an empty vector, never an error.
    async fn list(&self, command: &str, filter: Value) -> Result<Vec<Value>>;

    /// Execute a command whose only meaningful result is an acknowledgement.
    async fn execute_boolean(&self, command: &str, params: Value) -> Result<bool>;
}

/// HTTPS implementation of the command bus.
///
/// Requests are posted as a JSON envelope to a single endpoint, with the
/// API key and secret carried as basic-auth credentials. The signing
/// scheme beyond that is the server's concern. No network I/O happens at
/// construction time.
pub struct HttpCommandBus {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_secret: String,
    tracing: bool,
}

impl HttpCommandBus {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        tracing: bool,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            tracing,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, command: &str, params: Value) -> Result<ApiEnvelope> {
        if self.tracing {
            tracing::debug!(command, %params, "API request");
        } else {
            tracing::debug!(command, "API request");
        }

        let request = CommandRequest {
            command: command.to_string(),
            params,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&request)
            .send()
            .await?;

        let envelope: ApiEnvelope = response.json().await?;

        if self.tracing {
            tracing::debug!(command, success = envelope.success, result = %envelope.result, "API response");
        }

        Ok(envelope)
    }
}

#[async_trait]
impl CommandBus for HttpCommandBus {
    async fn execute(&self, command: &str, params: Value) -> Result<Value> {
        let envelope = self.call(command, params).await?;
        if !envelope.success {
            return Err(envelope.into_error());
        }
        Ok(envelope.result)
    }

    async fn list(&self, command: &str, filter: Value) -> Result<Vec<Value>> {
        let envelope = self.call(command, filter).await?;
        if !envelope.success {
            return Err(envelope.into_error());
        }
        match envelope.result {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::InvalidResponse(format!(
                "expected a list from {command}, got {other}"
            ))),
        }
    }

    async fn execute_boolean(&self, command: &str, params: Value) -> Result<bool> {
        let envelope = self.call(command, params).await?;
        if !envelope.success && !envelope.errors.is_empty() {
            return Err(envelope.into_error());
        }
        Ok(envelope.success)
    }
}

// ============ Wire types ============

#[derive(Debug, Serialize)]
struct CommandRequest {
    command: String,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    errors: Vec<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i32,
    message: String,
}

impl ApiEnvelope {
    fn into_error(self) -> Error {
        match self.errors.into_iter().next() {
            Some(e) => Error::ErrorResponse {
                code: e.code,
                message: e.message,
            },
            None => Error::Api("unknown API error".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_error_extraction() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({
            "success": false,
            "errors": [{"code": 431, "message": "invalid parameter"}],
        }))
        .unwrap();

        let err = envelope.into_error();
        assert!(
            matches!(err, Error::ErrorResponse { code: 431, ref message } if message == "invalid parameter")
        );
    }

    #[test]
    fn test_envelope_error_without_body() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(matches!(envelope.into_error(), Error::Api(_)));
    }

    #[test]
    fn test_bus_construction_is_offline() {
        let bus = HttpCommandBus::new("https://api.invalid/compute", "key", "secret", false);
        assert_eq!(bus.endpoint(), "https://api.invalid/compute");
    }
}
