//! Front-end error type.

use std::io;
use std::path::PathBuf;

use mips_core::FaultCode;
use thiserror::Error;

/// Process exit status for a completed simulation.
pub const EXIT_OK: i32 = 0;
/// Process exit status when the simulated program faulted.
pub const EXIT_FAULT: i32 = 1;
/// Process exit status when the program could not be loaded.
pub const EXIT_LOAD_ERROR: i32 = 2;

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// The program image could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// Image path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The image was read but the core rejected it.
    #[error("cannot load {}: {source}", .path.display())]
    Load {
        /// Image path.
        path: PathBuf,
        /// Load fault.
        source: FaultCode,
    },
    /// Writing the trace or reading interactive input failed.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Exit status reported for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Read { .. } | Self::Load { .. } => EXIT_LOAD_ERROR,
            Self::Io(_) => EXIT_FAULT,
        }
    }
}
