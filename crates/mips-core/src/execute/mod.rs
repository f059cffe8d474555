//! Instruction execution pipeline.
//!
//! A cycle runs fetch, decode, execute, next-PC resolution and memory
//! planning against the current state without touching it. Only when every
//! stage succeeded does [`commit_cycle`] update memory, PC and the
//! destination register, so a faulting instruction leaves no partial side
//! effects.

mod mem;
mod pc;
mod writeback;

pub use mem::{apply_memory_access, plan_memory_access, MemoryAccess};
pub use pc::next_pc;
pub use writeback::{destination, writeback};

use tracing::{debug, trace, warn};

use crate::bits::extend_immediate;
use crate::decoder::{DecodedInstruction, Decoder, Operands};
use crate::encoding::Operation;
use crate::state::{HaltReason, RegisterFile, RunState};
use crate::{CoreState, CycleReport, FaultCode, RunOutcome, StepOutcome};

/// Computes the value an instruction produces.
///
/// This is the writeback value for arithmetic, logic and `jal` (the return
/// address `pc + 4`), the effective address for `lw`/`sw`, and `rs - rt`
/// for `beq`/`bne`. `j` and `jr` produce 0. All arithmetic wraps.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn execute(instr: &DecodedInstruction, registers: &RegisterFile, pc: u32) -> i32 {
    let rs = instr.rs().map_or(0, |reg| registers.read(reg));
    let rt = instr.rt().map_or(0, |reg| registers.read(reg));
    let immediate = instr.immediate().unwrap_or(0);
    let shamt = match instr.operands {
        Operands::RegisterRegister { shamt, .. } => u32::from(shamt),
        Operands::RegisterImmediate { .. } | Operands::Jump { .. } => 0,
    };

    match instr.operation {
        Operation::Addu => rs.wrapping_add(rt),
        Operation::Subu | Operation::Beq | Operation::Bne => rs.wrapping_sub(rt),
        Operation::Sll => (rt as u32).wrapping_shl(shamt) as i32,
        Operation::Srl => (rt as u32).wrapping_shr(shamt) as i32,
        Operation::And => rs & rt,
        Operation::Or => rs | rt,
        // Signed comparison: `i32::MIN < 1` is true although the wrapping
        // difference `i32::MIN - 1` is positive.
        Operation::Slt => i32::from(rs < rt),
        Operation::Addiu | Operation::Lw | Operation::Sw => rs.wrapping_add(immediate),
        // Logical immediates are zero-extended.
        Operation::Andi => rs & zero_extended(immediate),
        Operation::Ori => rs | zero_extended(immediate),
        Operation::Lui => immediate.wrapping_shl(16),
        Operation::Jal => pc.wrapping_add(4) as i32,
        Operation::Jr | Operation::J => 0,
    }
}

#[allow(clippy::cast_sign_loss)]
const fn zero_extended(immediate: i32) -> i32 {
    extend_immediate(immediate as u32 & 0xFFFF, false)
}

/// Effects of one instruction, computed but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePlan {
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Decoded form of `word`.
    pub instruction: DecodedInstruction,
    /// Result of [`execute`].
    pub value: i32,
    /// Resolved next PC.
    pub next_pc: u32,
    /// Planned data transfer.
    pub access: MemoryAccess,
}

/// Runs every stage of the cycle at the current PC without mutating state.
///
/// # Errors
///
/// Returns the fault raised by fetch, decode or the memory stage.
pub fn plan_cycle(state: &CoreState) -> Result<CyclePlan, FaultCode> {
    let pc = state.arch.pc();
    let word = state.memory.fetch(pc)?;
    trace!("fetch {pc:#010x}: {word:#010x}");

    let instruction = Decoder::decode(word)?;
    let registers = &state.arch.registers;
    let value = execute(&instruction, registers, pc);
    let next_pc = next_pc(pc, &instruction, value, registers);
    let access = plan_memory_access(&instruction, value, registers, &state.memory)?;

    Ok(CyclePlan {
        pc,
        word,
        instruction,
        value,
        next_pc,
        access,
    })
}

/// Applies a plan produced by [`plan_cycle`] in memory, PC, register order.
///
/// # Errors
///
/// Returns the access fault when the plan stores to an address the data
/// segment rejects. Nothing is committed in that case.
pub fn commit_cycle(state: &mut CoreState, plan: &CyclePlan) -> Result<CycleReport, FaultCode> {
    let changed_memory = apply_memory_access(plan.access, &mut state.memory)?
        .map(|addr| (addr, store_value(plan)));
    state.arch.set_pc(plan.next_pc);
    let value = plan.access.loaded_value().unwrap_or(plan.value);
    let changed_register = writeback(&plan.instruction, value, &mut state.arch.registers)
        .map(|reg| (reg, state.arch.registers.read(reg)));

    Ok(CycleReport {
        pc: plan.pc,
        word: plan.word,
        instruction: plan.instruction,
        next_pc: plan.next_pc,
        changed_register,
        changed_memory,
    })
}

const fn store_value(plan: &CyclePlan) -> u32 {
    match plan.access {
        MemoryAccess::Store { value, .. } => value,
        MemoryAccess::Idle | MemoryAccess::Load { .. } => 0,
    }
}

/// Executes exactly one instruction.
///
/// A halted core stays halted and reports its reason without touching
/// state. A fault latches [`RunState::Halted`] with nothing committed.
pub fn step_one(state: &mut CoreState) -> StepOutcome {
    if let RunState::Halted(reason) = state.run_state {
        return StepOutcome::Halted(reason);
    }

    match plan_cycle(state).and_then(|plan| commit_cycle(state, &plan)) {
        Ok(report) => {
            debug!(
                "retired {} at {:#010x}, next pc {:#010x}",
                report.instruction.operation.mnemonic(),
                report.pc,
                report.next_pc
            );
            StepOutcome::Retired(report)
        }
        Err(cause) => {
            warn!(pc = state.arch.pc(), %cause, "halting on fault");
            let reason = HaltReason::Fault(cause);
            state.run_state = RunState::Halted(reason);
            StepOutcome::Halted(reason)
        }
    }
}

/// Steps until the core halts or `max_steps` instructions have retired.
/// `None` runs without a limit.
pub fn run(state: &mut CoreState, max_steps: Option<u64>) -> RunOutcome {
    let mut retired = 0u64;
    loop {
        if max_steps.is_some_and(|limit| retired >= limit) {
            return RunOutcome {
                retired,
                halt: None,
            };
        }
        match step_one(state) {
            StepOutcome::Retired(_) => retired += 1,
            StepOutcome::Halted(reason) => {
                return RunOutcome {
                    retired,
                    halt: Some(reason),
                };
            }
        }
    }
}
