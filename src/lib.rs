//! Resilient Canvas API fetch client.

pub mod canvas;
pub mod client;
pub mod config;
pub mod observability;
pub mod resilience;

pub use client::{FetchClient, FetchError};
pub use config::schema::FetchConfig;
