//! Loading a program image and driving the step loop.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use mips_core::{ByteOrder, CoreConfig, CoreState, RunOutcome, RunState, StepOutcome};
use tracing::info;

use crate::errors::{CliError, EXIT_FAULT, EXIT_OK};
use crate::report::{write_cycle, write_halt, ReportOptions};

/// Controls for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Trace output selection.
    pub report: ReportOptions,
    /// Prompt before every cycle.
    pub interactive: bool,
    /// Stop after this many retired instructions.
    pub max_steps: Option<u64>,
}

/// Reads a program image from disk and installs it in a fresh core.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the file cannot be read and
/// [`CliError::Load`] if the image does not fit the instruction segment.
pub fn load_state(path: &Path, order: ByteOrder, config: &CoreConfig) -> Result<CoreState, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut state = CoreState::with_config(config);
    let words = state
        .load_program_bytes(&bytes, order)
        .map_err(|source| CliError::Load {
            path: path.to_path_buf(),
            source,
        })?;
    info!(words, path = %path.display(), "program loaded");
    Ok(state)
}

/// Runs `state` until it halts or the step limit is reached, tracing every
/// retired instruction to `out`.
///
/// In interactive mode a `> ` prompt is written before each cycle; a line
/// starting with `q`, or end of input, requests a halt.
///
/// # Errors
///
/// Returns [`CliError::Io`] when writing output or reading input fails.
pub fn run_session(
    state: &mut CoreState,
    options: SessionOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<RunOutcome, CliError> {
    let mut retired = 0u64;
    loop {
        if options.max_steps.is_some_and(|limit| retired >= limit) {
            break;
        }
        if options.interactive && !prompt(input, out)? {
            state.request_halt();
        }

        match state.step() {
            StepOutcome::Retired(report) => {
                retired += 1;
                write_cycle(
                    out,
                    &report,
                    &state.arch.registers,
                    &state.memory,
                    options.report,
                )?;
            }
            StepOutcome::Halted(_) => break,
        }
    }

    let halt = state.run_state.halt_reason();
    write_halt(out, halt)?;
    out.flush()?;
    info!(retired, "simulation finished");
    Ok(RunOutcome { retired, halt })
}

/// Returns `false` when the user asked to quit.
fn prompt(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool, CliError> {
    write!(out, "> ")?;
    out.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    Ok(read != 0 && !line.starts_with('q'))
}

/// Process exit status for the core's state after a run.
///
/// Only a latched fault is a failure; a requested halt or a core still
/// running at the step limit exits cleanly.
#[must_use]
pub const fn exit_code(run_state: RunState) -> i32 {
    match run_state.latched_fault() {
        Some(_) => EXIT_FAULT,
        None => EXIT_OK,
    }
}
