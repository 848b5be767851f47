//! Data model for the clinical interview simulation
//!
//! Defines the action taxonomy, case files, and responder results shared by
//! the gatekeeper and the responder agents.

pub mod messages;

pub use messages::*;
