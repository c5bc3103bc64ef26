mod client;
mod config;
mod error;

pub use client::JServiceSource;
pub use config::JServiceConfig;
pub use error::{JServiceError, JServiceResult};
