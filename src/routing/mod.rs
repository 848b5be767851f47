//! Action routing
//!
//! The gatekeeper classifies incoming actions, rejects underspecified
//! requests, and forwards the rest to the correct responder.

pub mod gatekeeper;

pub use gatekeeper::Gatekeeper;
