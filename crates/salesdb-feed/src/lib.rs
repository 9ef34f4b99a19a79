//! Ingestion of the product transaction feed.
//!
//! [`FeedClient`] downloads and normalizes the feed; [`seed_products`] swaps
//! the stored collection for the freshly fetched one.

pub mod client;
pub mod error;
pub mod normalize;
pub mod seed;
pub mod types;

pub use client::FeedClient;
pub use error::FeedError;
pub use normalize::normalize_transaction;
pub use seed::{seed_products, SeedError, SeedReport};
pub use types::FeedTransaction;
