//! Guided setup conversation: transcript, snapshot, readiness and lifecycle.

mod conversation;
mod message;
mod phase;
mod readiness;
mod snapshot;

pub use conversation::{SetupConversation, DEFAULT_GREETING};
pub use message::{Sender, SetupMessage};
pub use phase::SetupPhase;
pub use readiness::{is_ready, Readiness};
pub use snapshot::{SetupParameter, SetupSnapshot};
