//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, metrics)
//!     → handlers.rs
//!         /api/routes*  → routing engine (table, resolve, href)
//!         /api/titles/* → title truncator
//!         anything else → history fallback (resolve + redirect / index)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
