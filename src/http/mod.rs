//! HTTP delivery subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, accept loops)
//!     → pipeline.rs (resolve path → rules → produce → deliver)
//!     → response.rs (response shapes, error bodies)
//!     → Send to client
//! ```

pub mod pipeline;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
