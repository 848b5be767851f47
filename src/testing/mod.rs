//! Testing utilities
//!
//! Mock responders and a mock LLM provider for exercising the gatekeeper and
//! responder agents without network access.

pub mod mocks;

pub use mocks::*;
