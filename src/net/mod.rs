//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → tls.rs (load certificate/key into a rustls config)
//!     → http/server.rs (plain accept loop, encrypted accept loop)
//!
//! Both loops run until one fails; a fatal bind or accept error on either
//! side takes the process down.
//! ```

pub mod tls;
