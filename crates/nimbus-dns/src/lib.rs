//! Nimbus DNS API client
//!
//! Typed access to the DNS management API: domains and domain records.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_dns::Client;
//!
//! let client = Client::new(&api_key, &api_secret, "", false)?;
//!
//! let domain = client.create_domain("example.net").await?;
//! let mut record = domain.add_record("www", "A", "203.0.113.1", 0, 3600).await?;
//!
//! // None keeps the current value, Some replaces it.
//! record.update(None, Some("203.0.113.2"), None, None).await?;
//! record.delete().await?;
//! ```

pub mod client;
pub mod domain;
pub mod domain_record;

pub use client::{Client, DEFAULT_API_ENDPOINT};
pub use domain::Domain;
pub use domain_record::DomainRecord;
