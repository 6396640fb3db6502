//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `interview` - Interview records, status mapping and wire parsing
//! - `setup` - Guided setup conversation, snapshot and readiness gate

pub mod foundation;
pub mod interview;
pub mod setup;
