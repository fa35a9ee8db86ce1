//! Nimbus cloud platform client library.
//!
//! This crate bundles the per-service clients behind a single [`Client`]
//! bootstrapped from a credential profile. Credentials are resolved
//! through an ordered provider chain (literal profile, TOML config file,
//! environment variables) where the first successful source wins.
//!
//! ```no_run
//! use nimbus::{Client, config};
//!
//! # async fn example() -> nimbus::Result<()> {
//! let client = Client::new(&[config::from_env()])?;
//! let zones = client.compute.list_zones().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Each service crate can also be used on its own when only one API is
//! needed; see [`compute`], [`dns`], [`runstatus`] and [`storage`].

mod client;
mod error;

pub use client::Client;
pub use error::{Error, Result};

pub use nimbus_api as api;
pub use nimbus_compute as compute;
pub use nimbus_config as config;
pub use nimbus_dns as dns;
pub use nimbus_runstatus as runstatus;
pub use nimbus_storage as storage;
