//! Nimbus runstatus API client
//!
//! Typed access to the runstatus API, which manages public status pages.

pub mod client;
pub mod page;

pub use client::{Client, DEFAULT_API_ENDPOINT};
pub use page::Page;
