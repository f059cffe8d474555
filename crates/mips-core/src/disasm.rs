//! Instruction disassembly.
//!
//! Renders decoded instructions as `mnemonic\toperands` in conventional
//! MIPS assembler syntax. Branch and jump targets are shown as absolute
//! addresses, so formatting needs the address the instruction lives at.

use crate::decoder::{DecodedInstruction, Decoder, Operands};
use crate::encoding::Operation;
use crate::memory::{Memory, WORD_BYTES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single disassembled memory word.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Address of the word.
    pub addr: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Rendered text.
    pub text: String,
    /// Whether the word failed to decode.
    pub is_illegal: bool,
}

/// Formats a decoded instruction located at `pc`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn format_instruction(instr: &DecodedInstruction, pc: u32) -> String {
    let mnemonic = instr.operation.mnemonic();
    let operands = match instr.operands {
        Operands::RegisterRegister {
            rs, rt, rd, shamt, ..
        } => match instr.operation {
            Operation::Sll | Operation::Srl => format!("{rd}, {rt}, {shamt}"),
            Operation::Jr => rs.to_string(),
            _ => format!("{rd}, {rs}, {rt}"),
        },
        Operands::RegisterImmediate { rs, rt, immediate } => match instr.operation {
            Operation::Andi | Operation::Ori => {
                format!("{rt}, {rs}, {:#x}", immediate as u32 & 0xFFFF)
            }
            Operation::Lui => format!("{rt}, {:#x}", immediate as u32 & 0xFFFF),
            Operation::Beq | Operation::Bne => {
                let target = pc
                    .wrapping_add(WORD_BYTES)
                    .wrapping_add_signed(immediate.wrapping_mul(4));
                format!("{rs}, {rt}, {target:#010x}")
            }
            Operation::Lw | Operation::Sw => format!("{rt}, {immediate}({rs})"),
            _ => format!("{rt}, {rs}, {immediate}"),
        },
        Operands::Jump { target } => format!("{target:#010x}"),
    };
    format!("{mnemonic}\t{operands}")
}

/// Decodes and formats a raw word located at `pc`.
///
/// Words that fail to decode render as `.word 0xXXXXXXXX`.
#[must_use]
pub fn disassemble_word(word: u32, pc: u32) -> String {
    Decoder::decode(word).map_or_else(
        |_| format!(".word\t{word:#010x}"),
        |instr| format_instruction(&instr, pc),
    )
}

/// Disassembles up to `count` consecutive words starting at `start`.
///
/// Stops early at the first address that cannot be fetched.
#[must_use]
pub fn disassemble_range(memory: &Memory, start: u32, count: usize) -> Vec<DisassemblyRow> {
    let mut rows = Vec::with_capacity(count);
    let mut addr = start;
    for _ in 0..count {
        let Ok(word) = memory.fetch(addr) else {
            break;
        };
        rows.push(DisassemblyRow {
            addr,
            word,
            text: disassemble_word(word, addr),
            is_illegal: Decoder::decode(word).is_err(),
        });
        addr = addr.wrapping_add(WORD_BYTES);
    }
    rows
}
