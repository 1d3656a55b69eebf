//! Configuration types.
//!
//! Responsibilities:
//! - Re-export the configuration structures used by the loader and the client.

pub mod connection;
pub mod download;

pub use connection::{Config, ConnectionConfig};
pub use download::DownloadConfig;
