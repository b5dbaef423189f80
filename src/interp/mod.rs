//! Interpreter dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Cascade result (interpreter argv) + request query parameters
//!     → Interpreter::run (capability trait)
//!     → command.rs (spawn the external program, capture stdout)
//!     → Return: content bytes, or ExecError
//! ```
//!
//! # Design Decisions
//! - The pipeline talks to a trait, not to process spawning, so tests can
//!   substitute a canned interpreter
//! - The child runs with its working directory set to the file's containing
//!   directory and receives the file's base name as its last fixed argument
//! - Query parameters are passed as trailing `key=value` argv pairs, one per
//!   pair, in query-string order; this is the external contract
//! - Stderr is captured for the server log and never reaches the client

pub mod command;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use command::CommandInterpreter;

/// Query parameters in query-string order. Repeated keys stay repeated.
pub type QueryParams = Vec<(String, String)>;

/// Errors from invoking an external interpreter.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The rule configured an empty argv.
    #[error("no interpreter program configured")]
    EmptyArgv,

    /// The program could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure.
    #[error("{program} exited with {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Capability to turn a source file into content bytes.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Run `argv` against `file`, exposing `params` to the child.
    ///
    /// Returns the child's captured standard output.
    async fn run(
        &self,
        argv: &[String],
        file: &Path,
        params: &QueryParams,
    ) -> Result<Vec<u8>, ExecError>;
}
