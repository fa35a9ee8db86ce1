//! Nimbus object storage API client
//!
//! Typed access to the object storage API. Storage is zone-scoped: the
//! client targets one zone and derives its endpoint from it unless an
//! explicit endpoint override is given.

pub mod bucket;
pub mod client;

pub use bucket::Bucket;
pub use client::{Client, DEFAULT_ZONE};
