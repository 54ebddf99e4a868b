//! HTTP API: product routes, image uploads, and server configuration.

pub mod app;
pub mod config;
