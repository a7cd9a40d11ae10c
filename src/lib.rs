//! Note Studio: route table and title utilities for the studio web client.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser (history-mode URL)
//!         │
//!         ▼
//!     ┌─────────┐    ┌──────────┐    ┌──────────────┐
//!     │  http   │───▶│ handlers │───▶│   routing    │  static ROUTES → Router
//!     │ server  │    │          │    └──────────────┘
//!     └─────────┘    │          │    ┌──────────────┐
//!                    │          │───▶│    title     │  truncate / truncate_many
//!                    └──────────┘    └──────────────┘
//!
//!     Cross-cutting: config (TOML + hot reload), observability, lifecycle
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod title;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Router, ROUTES};
pub use title::{truncate, truncate_many, truncate_title, truncate_titles};
