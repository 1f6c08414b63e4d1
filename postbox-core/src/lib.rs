pub mod app_config;
pub mod client;

// Re-export the fetch entry points
pub use client::{fetch_message, FetchOutcome};
