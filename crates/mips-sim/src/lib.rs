//! Command-line front end for the `mips-core` simulator.
//!
//! Loads a program image, steps it to completion and prints a trace of
//! every retired instruction.

/// Front-end error type and exit codes.
pub mod errors;
/// Per-cycle trace formatting.
pub mod report;
/// Image loading and the step loop.
pub mod session;

pub use errors::{CliError, EXIT_FAULT, EXIT_LOAD_ERROR, EXIT_OK};
pub use report::ReportOptions;
pub use session::{exit_code, load_state, run_session, SessionOptions};

use clap as _;
#[cfg(test)]
use tempfile as _;
use tracing_subscriber as _;
