//! HTTP adapter - reqwest client for the interview backend.
//!
//! Routes:
//!
//! - `GET  /interviews`, `POST /interviews`, `GET /interviews/{id}`
//! - `POST /workflow/start`, `POST /workflow/{id}/message`,
//!   `GET /workflow/{id}/summary`, `POST /workflow/{id}/finalize`
//!
//! Every request carries `Authorization: Bearer <token>` when the user has one.

mod client;
mod interviews;
mod workflow;

pub use client::HttpBackendClient;
