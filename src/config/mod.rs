//! Configuration module for PageWatch.

mod app_config;
mod email;
mod helpers;
mod http_base;
mod server;
mod sweep;

pub use app_config::AppConfig;
pub use email::EmailConfig;
pub use helpers::{deserialize_duration_from_seconds, serialize_duration_to_seconds};
pub use http_base::BaseHttpClientConfig;
pub use server::ServerConfig;
pub use sweep::SweepConfig;
