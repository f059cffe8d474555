//! Architectural CPU state model primitives.

/// Architectural register file types and storage model.
pub mod registers;
/// Step-driver run state.
pub mod run_state;

pub use registers::{
    ArchitecturalState, Register, RegisterFile, ZeroRegisterPolicy, GENERAL_REGISTER_COUNT,
};
pub use run_state::{HaltReason, RunState};
