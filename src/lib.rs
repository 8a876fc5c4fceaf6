//! Typed client for the catalog REST backend.
//!
//! ARCHITECTURE
//! ============
//! The crate is layered leaf-first:
//! - [`token`] — durable single-slot storage for the bearer token.
//! - [`models`] — serde wire types exchanged with the backend.
//! - [`validate`] — synchronous input validation, field-keyed messages.
//! - [`client`] — the API client; attaches the stored token to every
//!   outbound request and reacts to unauthorized responses by clearing the
//!   token and broadcasting a session-invalidated event.
//! - [`session`] — the session controller, sole writer of the
//!   loading/authenticated/unauthenticated state machine.
//!
//! The `catalog` binary (`src/main.rs`) is a thin CLI over these layers.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod token;
pub mod validate;

pub use client::{ApiClient, SessionEvent};
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::{SessionController, SessionState};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
