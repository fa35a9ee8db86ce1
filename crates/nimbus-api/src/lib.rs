//! Nimbus API transport layer
//!
//! This crate provides the command-bus seam shared by every Nimbus SDK
//! sub-client: the [`CommandBus`] trait, the typed [`Command`] request
//! trait, the stock HTTPS transport and the shared error taxonomy.
//!
//! Sub-clients dispatch typed commands through the bus and bind the raw
//! JSON payloads they get back into domain entities; this crate stays
//! agnostic of any particular resource kind.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_api::{Command, HttpCommandBus, execute_boolean};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct DeleteSshKey { name: String }
//!
//! impl Command for DeleteSshKey {
//!     const NAME: &'static str = "deleteSshKey";
//! }
//!
//! let bus = HttpCommandBus::new(endpoint, api_key, api_secret, false);
//! execute_boolean(&bus, &DeleteSshKey { name: "deploy".into() }).await?;
//! ```

pub mod bus;
pub mod command;
pub mod error;
pub mod mock;

pub use bus::{CommandBus, HttpCommandBus};
pub use command::{Command, execute, execute_boolean, list};
pub use error::{Error, Result, normalize};
