//! Host-facing types for driving the simulator core.

use crate::loader::{words_from_bytes, ByteOrder};
use crate::memory::{Memory, MemoryLayout};
use crate::state::{ArchitecturalState, HaltReason, Register, RunState, ZeroRegisterPolicy};
use crate::{DecodedInstruction, FaultCode};

/// Top-level configuration for a core instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Memory size and load base.
    pub layout: MemoryLayout,
    /// Whether writes to `$0` are discarded.
    pub zero_register: ZeroRegisterPolicy,
    /// Whether reset points `$29` just past the data segment.
    pub initialize_stack_pointer: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            layout: MemoryLayout::default(),
            zero_register: ZeroRegisterPolicy::Hardwired,
            initialize_stack_pointer: true,
        }
    }
}

/// Complete simulator state: registers, PC, memory and run state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreState {
    /// Register file and program counter.
    pub arch: ArchitecturalState,
    /// Instruction and data memory.
    pub memory: Memory,
    /// Step-driver state.
    pub run_state: RunState,
    initialize_stack_pointer: bool,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::with_config(&CoreConfig::default())
    }
}

impl CoreState {
    /// Creates a reset core with zeroed memory.
    #[must_use]
    pub fn with_config(config: &CoreConfig) -> Self {
        let mut state = Self {
            arch: ArchitecturalState::new(config.zero_register, config.layout.base),
            memory: Memory::new(config.layout),
            run_state: RunState::Running,
            initialize_stack_pointer: config.initialize_stack_pointer,
        };
        state.reset();
        state
    }

    /// Restores registers, PC and run state. Memory is preserved.
    ///
    /// All registers become zero except `$29`, which points just past the
    /// data segment when stack initialisation is enabled. PC returns to the
    /// load base.
    pub fn reset(&mut self) {
        let layout = *self.memory.layout();
        self.arch.registers.clear();
        if self.initialize_stack_pointer {
            #[allow(clippy::cast_possible_wrap)]
            let sp = layout.initial_stack_pointer() as i32;
            self.arch.set_gpr(Register::SP, sp);
        }
        self.arch.set_pc(layout.base);
        self.run_state = RunState::Running;
    }

    /// Installs a program at the load base and resets the core. Returns the
    /// number of words installed.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::ProgramTooLarge`] when the program exceeds the
    /// instruction segment; the state is left untouched then.
    pub fn load_program(&mut self, program: &[u32]) -> Result<usize, FaultCode> {
        let installed = self.memory.load_program(program)?;
        tracing::debug!(words = installed, "program loaded");
        self.reset();
        Ok(installed)
    }

    /// Decodes a raw image with [`words_from_bytes`] and loads it.
    ///
    /// # Errors
    ///
    /// Same as [`CoreState::load_program`].
    pub fn load_program_bytes(&mut self, bytes: &[u8], order: ByteOrder) -> Result<usize, FaultCode> {
        self.load_program(&words_from_bytes(bytes, order))
    }

    /// Requests a halt between cycles. Returns `false` if already halted.
    pub fn request_halt(&mut self) -> bool {
        if self.run_state.is_running() {
            self.run_state = RunState::Halted(HaltReason::UserRequested);
            true
        } else {
            false
        }
    }

    /// Executes one instruction. See [`crate::step_one`].
    pub fn step(&mut self) -> StepOutcome {
        crate::execute::step_one(self)
    }
}

/// Observable effects of one retired instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CycleReport {
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Decoded instruction.
    pub instruction: DecodedInstruction,
    /// PC after the cycle.
    pub next_pc: u32,
    /// Register written and its new value.
    pub changed_register: Option<(Register, i32)>,
    /// Data address written and its new value.
    pub changed_memory: Option<(u32, u32)>,
}

/// Result of one [`crate::step_one`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction retired.
    Retired(CycleReport),
    /// The core is halted; nothing was executed.
    Halted(HaltReason),
}

/// Result of a [`crate::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Instructions retired during this call.
    pub retired: u64,
    /// Halt reason, or `None` when the step limit was reached first.
    pub halt: Option<HaltReason>,
}
