//! clinsim - Simulated Clinical Interview Agents
//!
//! Agents for a sequential-diagnosis exercise: an interviewer gathers
//! information about a simulated patient case by asking history questions and
//! ordering diagnostic tests. The **gatekeeper** validates each request and
//! routes it to the responder that can answer it:
//!
//! - the **patient responder** answers history questions in character,
//! - the **examination responder** returns diagnostic test results.
//!
//! # Quick Start
//!
//! ```no_run
//! use clinsim::config::AgentConfig;
//! use clinsim::protocol::{AgentAction, CaseFile};
//! use clinsim::routing::Gatekeeper;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::load_from_file(Path::new("config.toml"))?;
//! let gatekeeper = Gatekeeper::new(&config)?;
//!
//! let case = CaseFile::new(
//!     "29F with two days of abdominal pain",
//!     "Full case history available to the responders...",
//! );
//!
//! let action = AgentAction::ask_question("Does the patient have a fever?");
//!
//! let (ok, guidance) = gatekeeper.validate_request(&action);
//! if !ok {
//!     println!("rejected: {guidance}");
//!     return Ok(());
//! }
//!
//! let response = gatekeeper.process_action(&action, &case).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod config;
pub mod error;
pub mod llm;
pub mod observability;
pub mod protocol;
pub mod routing;
pub mod testing;

pub use agents::{ExaminationAgent, ExaminationResponder, PatientAgent, PatientResponder};
pub use config::AgentConfig;
pub use error::{AgentError, AgentResult};
pub use protocol::{ActionType, AgentAction, CaseFile, GatekeeperResponse, ResponseType};
pub use routing::Gatekeeper;
