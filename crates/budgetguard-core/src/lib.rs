//! budgetguard core: transport-agnostic notification decoding, billing value
//! types, outcomes, and the shared error surface.
//!
//! This crate defines the contracts shared by the service runtime and its
//! tests. It carries no transport or runtime dependencies so the decision
//! inputs and outputs can be exercised without a network.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GuardError`/`Result` so a malformed
//! notification never takes the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod billing;
pub mod error;
pub mod notification;
pub mod outcome;

/// Shared result type.
pub use error::{GuardError, Result};
pub use billing::{BillingInfo, ProjectName};
pub use notification::{decode_notification, BudgetNotification};
pub use outcome::Outcome;
