//! Next-PC resolution.

use crate::decoder::{DecodedInstruction, Operands};
use crate::encoding::Operation;
use crate::memory::WORD_BYTES;
use crate::state::RegisterFile;

/// Computes the address of the next instruction.
///
/// `executed_value` is the result of [`super::execute`] for the same
/// instruction; branches test it against zero. Arithmetic wraps modulo 2^32.
#[must_use]
pub fn next_pc(
    current_pc: u32,
    instr: &DecodedInstruction,
    executed_value: i32,
    registers: &RegisterFile,
) -> u32 {
    let sequential = current_pc.wrapping_add(WORD_BYTES);
    match (instr.operation, instr.operands) {
        (Operation::J | Operation::Jal, Operands::Jump { target }) => target,
        (Operation::Jr, _) => instr
            .rs()
            .map_or(sequential, |rs| registers.read_u32(rs)),
        (Operation::Beq, _) if executed_value == 0 => branch_target(sequential, instr),
        (Operation::Bne, _) if executed_value != 0 => branch_target(sequential, instr),
        _ => sequential,
    }
}

fn branch_target(sequential: u32, instr: &DecodedInstruction) -> u32 {
    let offset = instr.immediate().unwrap_or(0).wrapping_mul(4);
    sequential.wrapping_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::next_pc;
    use crate::decoder::Decoder;
    use crate::state::{Register, RegisterFile};

    const PC: u32 = 0x0040_0010;

    fn decode(word: u32) -> crate::decoder::DecodedInstruction {
        Decoder::decode(word).expect("should decode")
    }

    #[test]
    fn straight_line_advances_by_four() {
        let regs = RegisterFile::default();
        // addu $3, $1, $2
        assert_eq!(next_pc(PC, &decode(0x0022_1821), 7, &regs), PC + 4);
    }

    #[test]
    fn beq_taken_and_not_taken() {
        let regs = RegisterFile::default();
        // beq $8, $9, 2
        let beq = decode(0x1109_0002);
        assert_eq!(next_pc(PC, &beq, 0, &regs), PC + 4 + 8);
        assert_eq!(next_pc(PC, &beq, 5, &regs), PC + 4);
    }

    #[test]
    fn bne_backward_branch() {
        let regs = RegisterFile::default();
        // bne $8, $9, -3
        let bne = decode(0x1509_FFFD);
        assert_eq!(next_pc(PC, &bne, 1, &regs), PC + 4 - 12);
        assert_eq!(next_pc(PC, &bne, 0, &regs), PC + 4);
    }

    #[test]
    fn jumps_use_shifted_target_field() {
        let regs = RegisterFile::default();
        assert_eq!(next_pc(PC, &decode(0x0810_0400), 0, &regs), 0x0040_1000);
        assert_eq!(next_pc(PC, &decode(0x0C10_0003), 0, &regs), 0x0040_000C);
    }

    #[test]
    fn jr_reads_source_register() {
        let mut regs = RegisterFile::default();
        regs.write(Register::RA, 0x0040_0100);
        // jr $31
        assert_eq!(next_pc(PC, &decode(0x03E0_0008), 0, &regs), 0x0040_0100);
    }

    #[test]
    fn sequential_pc_wraps() {
        let regs = RegisterFile::default();
        assert_eq!(next_pc(u32::MAX - 3, &decode(0x0022_1821), 0, &regs), 0);
    }
}
