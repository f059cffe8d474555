//! Register writeback.

use crate::decoder::{DecodedInstruction, Operands};
use crate::encoding::Operation;
use crate::state::{Register, RegisterFile};

/// Register an instruction writes, before the zero-register policy applies.
#[must_use]
pub const fn destination(instr: &DecodedInstruction) -> Option<Register> {
    match instr.operation {
        Operation::Beq | Operation::Bne | Operation::Sw | Operation::Jr | Operation::J => None,
        Operation::Jal => Some(Register::RA),
        _ => match instr.operands {
            Operands::RegisterRegister { rd, .. } => Some(rd),
            Operands::RegisterImmediate { rt, .. } => Some(rt),
            Operands::Jump { .. } => None,
        },
    }
}

/// Writes `value` to the destination of `instr`, overwriting the previous
/// contents. Returns the register actually changed.
pub fn writeback(
    instr: &DecodedInstruction,
    value: i32,
    registers: &mut RegisterFile,
) -> Option<Register> {
    let dest = destination(instr)?;
    registers.write(dest, value).then_some(dest)
}
