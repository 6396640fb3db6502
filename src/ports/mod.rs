//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application services and the outside world. Adapters implement them.
//!
//! ## Remote Ports
//!
//! - `InterviewGateway` - List, create and fetch interview records
//! - `SetupAssistantGateway` - Drive the guided setup conversation
//!
//! ## Local Ports
//!
//! - `CurrentUserProvider` - Who is signed in right now
//! - `InterviewLauncher` - Receives finalized interviews

mod auth_provider;
mod gateway_error;
mod interview_gateway;
mod launcher;
mod setup_gateway;

pub use auth_provider::CurrentUserProvider;
pub use gateway_error::GatewayError;
pub use interview_gateway::InterviewGateway;
pub use launcher::{Handoff, InterviewLauncher};
pub use setup_gateway::{
    AssistantTurn, FinalizeBody, FinalizeRequest, FinalizeResponse, SessionSummary,
    SetupAssistantGateway, StartedSession,
};
