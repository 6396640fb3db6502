//! Adapters - Implementations of port interfaces.
//!
//! - `http` - reqwest client for the interview backend
//! - `memory` - scriptable in-memory gateways for tests and demos
//! - `auth` - current-user providers
//! - `launcher` - handoff targets for finalized interviews

pub mod auth;
pub mod http;
pub mod launcher;
pub mod memory;

pub use auth::StaticUserProvider;
pub use http::HttpBackendClient;
pub use launcher::ChannelLauncher;
pub use memory::{InMemoryInterviewGateway, ScriptedSetupGateway};
