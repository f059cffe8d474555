//! Memory stage: plans and applies the single data transfer of a cycle.

use crate::decoder::DecodedInstruction;
use crate::encoding::Operation;
use crate::memory::{validate_data_access, Memory};
use crate::state::RegisterFile;
use crate::FaultCode;

/// Data transfer requested by one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MemoryAccess {
    /// The instruction does not touch data memory.
    #[default]
    Idle,
    /// `lw`: `value` was read from `addr`.
    Load {
        /// Effective address.
        addr: u32,
        /// Word read.
        value: u32,
    },
    /// `sw`: `value` is to be written to `addr`.
    Store {
        /// Effective address.
        addr: u32,
        /// Word to store.
        value: u32,
    },
}

impl MemoryAccess {
    /// Value delivered to writeback by a load.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn loaded_value(self) -> Option<i32> {
        match self {
            Self::Load { value, .. } => Some(value as i32),
            Self::Idle | Self::Store { .. } => None,
        }
    }
}

/// Validates and prepares the data transfer of `instr`.
///
/// `executed_value` is the effective address for `lw`/`sw`. Loads are read
/// eagerly; stores are deferred to [`apply_memory_access`].
///
/// # Errors
///
/// Returns the access fault for a misaligned address or one outside the
/// data segment.
#[allow(clippy::cast_sign_loss)]
pub fn plan_memory_access(
    instr: &DecodedInstruction,
    executed_value: i32,
    registers: &RegisterFile,
    memory: &Memory,
) -> Result<MemoryAccess, FaultCode> {
    let addr = executed_value as u32;
    match instr.operation {
        Operation::Lw => {
            let value = memory.read_data(addr)?;
            Ok(MemoryAccess::Load { addr, value })
        }
        Operation::Sw => {
            validate_data_access(memory.layout(), addr)?;
            let value = instr.rt().map_or(0, |rt| registers.read_u32(rt));
            Ok(MemoryAccess::Store { addr, value })
        }
        _ => Ok(MemoryAccess::Idle),
    }
}

/// Commits a planned access. Returns the address written, if any.
///
/// # Errors
///
/// Returns the access fault when a store targets an address the data
/// segment rejects; memory is left unchanged.
pub fn apply_memory_access(
    access: MemoryAccess,
    memory: &mut Memory,
) -> Result<Option<u32>, FaultCode> {
    match access {
        MemoryAccess::Store { addr, value } => {
            memory.write_data(addr, value)?;
            Ok(Some(addr))
        }
        MemoryAccess::Idle | MemoryAccess::Load { .. } => Ok(None),
    }
}
