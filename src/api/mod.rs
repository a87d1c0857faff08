//! HTTP API.
//!
//! `triage_router()` returns a composable `Router`; `start_server()` binds
//! it and runs it on a background task until shut down.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::triage_router;
pub use server::{start_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
