//! In-memory gateways for tests and offline demos.

mod interviews;
mod setup;

pub use interviews::{InMemoryInterviewGateway, InterviewCall};
pub use setup::{ScriptedSetupGateway, SetupCall};
