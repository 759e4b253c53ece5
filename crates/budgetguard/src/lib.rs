//! Top-level facade crate for budgetguard.
//!
//! Re-exports core types and the service library so users can depend on a single crate.

pub mod core {
    pub use budgetguard_core::*;
}

pub mod service {
    pub use budgetguard_service::*;
}
