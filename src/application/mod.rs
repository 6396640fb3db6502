//! Application layer - services that orchestrate ports around domain state.
//!
//! - `CollectionStore` - the caller's interviews, with offline fallback
//! - `SetupSession` - guided setup conversation, finalize and handoff
//! - `ResiliencePolicy` - failure classification for loads

mod collection_store;
mod remote;
mod resilience;
mod setup_session;

pub use collection_store::{CollectionState, CollectionStore, CollectionStoreConfig, LoadPhase};
pub use resilience::{LoadFailureAction, ResiliencePolicy, PLACEHOLDER_ID};
pub use setup_session::{SetupSession, SetupSessionConfig};
