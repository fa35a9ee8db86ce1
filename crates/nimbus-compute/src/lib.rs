//! Nimbus compute API client
//!
//! Typed access to the compute management API: Security Groups and their
//! rules, SSH keys, and zones. Entities returned by this client keep a
//! handle to it and dispatch their own follow-up operations; after a
//! successful `delete` they become inert tombstones with every field
//! zeroed.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_compute::Client;
//!
//! let client = Client::new(&api_key, &api_secret, "", false)?;
//!
//! let mut group = client.create_security_group("web", "frontend hosts").await?;
//! for rule in group.ingress_rules().await? {
//!     println!("{} {} {}", rule.id, rule.protocol, rule.port);
//! }
//! group.delete().await?;
//! ```

pub mod client;
pub mod security_group;
pub mod ssh_key;
pub mod zone;

pub use client::{Client, DEFAULT_API_ENDPOINT};
pub use security_group::{RuleDirection, SecurityGroup, SecurityGroupRule};
pub use ssh_key::SshKey;
pub use zone::Zone;
