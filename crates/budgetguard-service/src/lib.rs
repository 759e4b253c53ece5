//! budgetguard service library entry.
//!
//! This crate wires config, credentials, the billing client, and the guard
//! decision procedure behind a pub/sub push endpoint. It is consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod auth;
pub mod billing;
pub mod config;
pub mod error;
pub mod guard;
pub mod router;
pub mod transport;
