//! Core of the gravel Telegram Bot API client.
//!
//! This crate is intentionally HTTP-library-agnostic. The network round-trip
//! lives behind the [`transport::HttpBackend`] port, implemented in
//! `gravel-http` (reqwest) and by fakes in tests.

pub mod client;
pub mod config;
pub mod cursor;
pub mod domain;
pub mod envelope;
pub mod errors;
pub mod logging;
pub mod payload;
pub mod transport;
pub mod types;

pub use client::{Client, ClientOptions};
pub use errors::{Error, ErrorKind, Result};
