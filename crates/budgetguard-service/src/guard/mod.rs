//! Billing guard decision procedure.

pub mod billing_guard;

pub use billing_guard::BillingGuard;
