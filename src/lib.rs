//! Content tree server.
//!
//! Serves a directory of content files over HTTP. Per-directory rule files
//! cascade down the tree and decide, path by path, whether an entry is
//! hidden, whether it is rendered through a page template, and which
//! external interpreter (if any) turns it into response content.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 CONTENT SERVER                  │
//!                    │                                                 │
//!   Request          │  ┌──────┐   ┌──────────┐   ┌───────────────┐   │
//!   ─────────────────┼─▶│ http │──▶│ pipeline │──▶│ rules cascade │   │
//!                    │  └──────┘   └────┬─────┘   └───────────────┘   │
//!                    │                  │                              │
//!                    │                  ▼                              │
//!                    │        ┌─────────────────┐   ┌──────────────┐  │
//!                    │        │ interp dispatch │   │  template    │  │
//!                    │        │ (external prog) │   │  render      │  │
//!                    │        └─────────────────┘   └──────────────┘  │
//!                    │                                                 │
//!                    │  ┌───────────────────────────────────────────┐ │
//!                    │  │   config · net/tls · paths · locate       │ │
//!                    │  └───────────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;

// Content engine
pub mod interp;
pub mod locate;
pub mod paths;
pub mod rules;
pub mod template;

pub use config::SiteConfig;
pub use http::HttpServer;
