//! Name authority HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Sends one GET per
//! name and hands status and body back to the reconciliation engine, which
//! does all payload interpretation.

mod client;

pub use client::{ClientError, ClientOptions, ItisClient, USER_AGENT};
