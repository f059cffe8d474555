//! Core of a simulator for a 32-bit MIPS integer subset.
//!
//! The crate models the architectural state (32 general registers, a program
//! counter and a word-addressed memory split into instruction and data
//! segments) and advances it one instruction at a time. Each cycle is planned
//! against the current state and committed only when every stage succeeds;
//! any fault halts the core with nothing partially applied.
//!
//! ```
//! use mips_core::{CoreState, Register, StepOutcome};
//!
//! let mut state = CoreState::default();
//! // addiu $1, $0, 5
//! state.load_program(&[0x2401_0005]).unwrap();
//! let StepOutcome::Retired(report) = state.step() else {
//!     panic!("expected the instruction to retire");
//! };
//! assert_eq!(report.changed_register, Some((Register::from_u5(1), 5)));
//! ```

/// Bit-field extraction and immediate extension.
pub mod bits;
pub use bits::{extend_immediate, extract_bits, sign_extend_16};

/// Fault taxonomy.
pub mod fault;
pub use fault::{DecodeError, FaultCode};

/// Opcode and function-code classification tables.
pub mod encoding;
pub use encoding::{
    classify_format, classify_function, classify_opcode, InstructionFormat, Operation,
    FUNCTION_TABLE, OPCODE_TABLE, SPECIAL_OPCODE,
};

/// Instruction decoder.
pub mod decoder;
pub use decoder::{DecodedInstruction, Decoder, Operands};

/// Architectural state primitives.
pub mod state;
pub use state::{
    ArchitecturalState, HaltReason, Register, RegisterFile, RunState, ZeroRegisterPolicy,
    GENERAL_REGISTER_COUNT,
};

/// Memory array, layout and access legality.
pub mod memory;
pub use memory::{
    validate_data_access, validate_fetch_access, validate_word_alignment, Memory, MemoryLayout,
    MemorySegment, DEFAULT_MAX_DATA_WORDS, DEFAULT_MAX_INSTRUCTIONS, TEXT_BASE, WORD_BYTES,
};

/// Program image loading.
pub mod loader;
pub use loader::{words_from_bytes, ByteOrder};

/// Host-facing configuration, state and outcome types.
pub mod api;
pub use api::{CoreConfig, CoreState, CycleReport, RunOutcome, StepOutcome};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{
    apply_memory_access, commit_cycle, execute, next_pc, plan_cycle, plan_memory_access, run,
    step_one, writeback, CyclePlan, MemoryAccess,
};

/// Instruction disassembly.
pub mod disasm;
pub use disasm::{disassemble_range, disassemble_word, format_instruction, DisassemblyRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
