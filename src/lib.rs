#![warn(missing_docs)]
//! PageWatch monitors registered web pages for visible content changes and
//! emails their owners when a change is detected.

pub mod config;
pub mod content;
pub mod fetcher;
pub mod http_client;
pub mod http_server;
pub mod models;
pub mod monitor;
pub mod notification;
pub mod persistence;
pub mod sweep;
pub mod test_helpers;
