//! Transport layer (pub/sub push over HTTP).
//!
//! Exposes the push handler and the envelope it decodes before handing the
//! message data to the guard.

pub mod push;
