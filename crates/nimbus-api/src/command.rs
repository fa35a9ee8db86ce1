//! Typed commands for the remote command bus

use crate::bus::CommandBus;
use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// A typed request understood by the remote command bus.
///
/// The serialized form of the implementing struct becomes the command
/// parameters; [`Command::NAME`] selects the remote operation.
pub trait Command: Serialize + Send + Sync {
    /// Remote command name, e.g. `"createSecurityGroup"`.
    const NAME: &'static str;
}

/// Dispatch a command expecting a single payload in return.
pub async fn execute<C: Command>(bus: &dyn CommandBus, cmd: &C) -> Result<Value> {
    bus.execute(C::NAME, serde_json::to_value(cmd)?).await
}

/// Dispatch a filter template expecting a list of payloads in return.
pub async fn list<C: Command>(bus: &dyn CommandBus, filter: &C) -> Result<Vec<Value>> {
    bus.list(C::NAME, serde_json::to_value(filter)?).await
}

/// Dispatch a command expecting a boolean acknowledgement in return.
pub async fn execute_boolean<C: Command>(bus: &dyn CommandBus, cmd: &C) -> Result<bool> {
    bus.execute_boolean(C::NAME, serde_json::to_value(cmd)?).await
}
