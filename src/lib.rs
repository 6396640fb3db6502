//! Interview Orchestrator - client-side interview lifecycle orchestration.
//!
//! Keeps a user's interview collection in sync with the backend (falling
//! back to a placeholder when offline) and drives the guided setup
//! conversation that collects role, type and level before handing a
//! finalized interview to a launcher.
//!
//! Layout follows a hexagonal architecture: `domain` holds pure types,
//! `ports` the traits at every external seam, `adapters` their
//! implementations and `application` the services that tie them together.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
