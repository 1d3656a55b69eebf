//! Data models for parse requests and their results.

mod download;
mod filter;

pub use download::DownloadHandle;
pub use filter::FilterConfig;
