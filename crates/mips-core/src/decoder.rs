//! Instruction decoder.
//!
//! Classifies a 32-bit word into one of the three instruction formats,
//! extracts its fields and resolves the operation against the supported set.

use crate::bits::{extract_bits, sign_extend_16};
use crate::encoding::{
    classify_format, classify_function, classify_opcode, InstructionFormat, Operation,
};
use crate::fault::DecodeError;
use crate::state::Register;

/// Format-specific operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Operands {
    /// Register-register fields.
    RegisterRegister {
        /// Source register (bits 25..21).
        rs: Register,
        /// Target register (bits 20..16).
        rt: Register,
        /// Destination register (bits 15..11).
        rd: Register,
        /// Shift amount (bits 10..6).
        shamt: u8,
        /// Function code (bits 5..0).
        function: u8,
    },
    /// Register-immediate fields.
    RegisterImmediate {
        /// Source register (bits 25..21).
        rs: Register,
        /// Target register (bits 20..16).
        rt: Register,
        /// Sign-extended 16-bit immediate (bits 15..0).
        immediate: i32,
    },
    /// Jump fields.
    Jump {
        /// Bits 25..0 shifted left by 2.
        target: u32,
    },
}

/// Fully validated instruction ready for execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DecodedInstruction {
    /// Primary opcode (bits 31..26).
    pub opcode: u8,
    /// Operation resolved from the opcode, or the function code for opcode 0.
    pub operation: Operation,
    /// Operand fields of the instruction's format.
    pub operands: Operands,
}

impl DecodedInstruction {
    /// Format of this instruction.
    #[must_use]
    pub const fn format(&self) -> InstructionFormat {
        match self.operands {
            Operands::RegisterRegister { .. } => InstructionFormat::RegisterRegister,
            Operands::RegisterImmediate { .. } => InstructionFormat::RegisterImmediate,
            Operands::Jump { .. } => InstructionFormat::Jump,
        }
    }

    /// Source register, for register-register and register-immediate formats.
    #[must_use]
    pub const fn rs(&self) -> Option<Register> {
        match self.operands {
            Operands::RegisterRegister { rs, .. } | Operands::RegisterImmediate { rs, .. } => {
                Some(rs)
            }
            Operands::Jump { .. } => None,
        }
    }

    /// Target register, for register-register and register-immediate formats.
    #[must_use]
    pub const fn rt(&self) -> Option<Register> {
        match self.operands {
            Operands::RegisterRegister { rt, .. } | Operands::RegisterImmediate { rt, .. } => {
                Some(rt)
            }
            Operands::Jump { .. } => None,
        }
    }

    /// Sign-extended immediate, for the register-immediate format.
    #[must_use]
    pub const fn immediate(&self) -> Option<i32> {
        match self.operands {
            Operands::RegisterImmediate { immediate, .. } => Some(immediate),
            Operands::RegisterRegister { .. } | Operands::Jump { .. } => None,
        }
    }

    /// Re-encodes this instruction into its 32-bit word.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn encode(&self) -> u32 {
        let opcode = (self.opcode as u32 & 0x3F) << 26;
        match self.operands {
            Operands::RegisterRegister {
                rs,
                rt,
                rd,
                shamt,
                function,
            } => {
                opcode
                    | rs.bits() << 21
                    | rt.bits() << 16
                    | rd.bits() << 11
                    | (shamt as u32 & 0x1F) << 6
                    | (function as u32 & 0x3F)
            }
            Operands::RegisterImmediate { rs, rt, immediate } => {
                opcode | rs.bits() << 21 | rt.bits() << 16 | (immediate as u32 & 0xFFFF)
            }
            Operands::Jump { target } => opcode | ((target >> 2) & 0x03FF_FFFF),
        }
    }
}

/// Instruction decoder for the supported instruction subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Decodes a 32-bit instruction word.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::IllegalInstruction`] when the opcode, or the
    /// function code of a register-register word, is unsupported.
    #[allow(clippy::cast_possible_truncation)]
    pub fn decode(word: u32) -> Result<DecodedInstruction, DecodeError> {
        let opcode = extract_bits(word, 31, 26) as u8;
        let illegal = DecodeError::IllegalInstruction { word };

        let (operation, operands) = match classify_format(opcode) {
            InstructionFormat::RegisterRegister => {
                let function = extract_bits(word, 5, 0) as u8;
                let operation = classify_function(function).ok_or(illegal)?;
                let operands = Operands::RegisterRegister {
                    rs: Register::from_u5(extract_bits(word, 25, 21)),
                    rt: Register::from_u5(extract_bits(word, 20, 16)),
                    rd: Register::from_u5(extract_bits(word, 15, 11)),
                    shamt: extract_bits(word, 10, 6) as u8,
                    function,
                };
                (operation, operands)
            }
            InstructionFormat::RegisterImmediate => {
                let operation = classify_opcode(opcode).ok_or(illegal)?;
                let operands = Operands::RegisterImmediate {
                    rs: Register::from_u5(extract_bits(word, 25, 21)),
                    rt: Register::from_u5(extract_bits(word, 20, 16)),
                    immediate: sign_extend_16(extract_bits(word, 15, 0)),
                };
                (operation, operands)
            }
            InstructionFormat::Jump => {
                let operation = classify_opcode(opcode).ok_or(illegal)?;
                let operands = Operands::Jump {
                    target: extract_bits(word, 25, 0) << 2,
                };
                (operation, operands)
            }
        };

        Ok(DecodedInstruction {
            opcode,
            operation,
            operands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{FUNCTION_TABLE, OPCODE_TABLE};

    #[test]
    fn decode_addu_register_fields() {
        // addu $3, $1, $2
        let instruction = Decoder::decode(0x0022_1821).expect("should decode");
        assert_eq!(instruction.operation, Operation::Addu);
        assert_eq!(instruction.format(), InstructionFormat::RegisterRegister);
        assert_eq!(
            instruction.operands,
            Operands::RegisterRegister {
                rs: Register::from_u5(1),
                rt: Register::from_u5(2),
                rd: Register::from_u5(3),
                shamt: 0,
                function: 0x21,
            }
        );
    }

    #[test]
    fn decode_sll_shift_amount() {
        // sll $2, $4, 5
        let instruction = Decoder::decode(0x0004_1140).expect("should decode");
        assert_eq!(instruction.operation, Operation::Sll);
        let Operands::RegisterRegister { rt, rd, shamt, .. } = instruction.operands else {
            panic!("expected register-register operands");
        };
        assert_eq!(rt, Register::from_u5(4));
        assert_eq!(rd, Register::from_u5(2));
        assert_eq!(shamt, 5);
    }

    #[test]
    fn decode_addiu_negative_immediate() {
        // addiu $8, $9, -1
        let instruction = Decoder::decode(0x2528_FFFF).expect("should decode");
        assert_eq!(instruction.operation, Operation::Addiu);
        assert_eq!(instruction.rs(), Some(Register::from_u5(9)));
        assert_eq!(instruction.rt(), Some(Register::from_u5(8)));
        assert_eq!(instruction.immediate(), Some(-1));
    }

    #[test]
    fn decode_jump_target_is_shifted_field() {
        // j 0x00401000
        let instruction = Decoder::decode(0x0810_0400).expect("should decode");
        assert_eq!(instruction.operation, Operation::J);
        assert_eq!(instruction.operands, Operands::Jump { target: 0x0040_1000 });
        assert_eq!(instruction.rs(), None);
        assert_eq!(instruction.immediate(), None);
    }

    #[test]
    fn decode_jal() {
        let instruction = Decoder::decode(0x0C10_0003).expect("should decode");
        assert_eq!(instruction.operation, Operation::Jal);
        assert_eq!(instruction.operands, Operands::Jump { target: 0x0040_000C });
    }

    #[test]
    fn all_ones_word_is_illegal() {
        assert_eq!(
            Decoder::decode(0xFFFF_FFFF),
            Err(DecodeError::IllegalInstruction { word: 0xFFFF_FFFF })
        );
    }

    #[test]
    fn illegal_function_code_faults() {
        // opcode 0, function 0x20 (add) is not supported
        assert!(Decoder::decode(0x0022_1820).is_err());
        assert!(Decoder::decode(0x0000_003F).is_err());
    }

    #[test]
    fn all_supported_encodings_decode() {
        for (function, expected) in FUNCTION_TABLE {
            let word = u32::from(*function) | 0x03E0_F800;
            let instruction = Decoder::decode(word)
                .unwrap_or_else(|_| panic!("function {function:#x} should decode"));
            assert_eq!(instruction.operation, *expected);
        }
        for (opcode, expected) in OPCODE_TABLE {
            let word = (u32::from(*opcode) << 26) | 0x0000_1234;
            let instruction = Decoder::decode(word)
                .unwrap_or_else(|_| panic!("opcode {opcode:#x} should decode"));
            assert_eq!(instruction.operation, *expected);
        }
    }

    #[test]
    fn exhaustive_opcode_and_function_classification() {
        for opcode in 0u32..64 {
            for function in 0u32..64 {
                let word = (opcode << 26) | (0x0123_4000 & 0x03FF_FFC0) | function;
                let opcode_u8 = u8::try_from(opcode).expect("6-bit opcode");
                let function_u8 = u8::try_from(function).expect("6-bit function");
                let legal = if opcode == 0 {
                    classify_function(function_u8).is_some()
                } else {
                    classify_opcode(opcode_u8).is_some()
                };
                assert_eq!(
                    Decoder::decode(word).is_ok(),
                    legal,
                    "opcode {opcode:#x} function {function:#x}"
                );
            }
        }
    }

    #[test]
    fn encode_restores_original_words() {
        for word in [
            0x0022_1821_u32,
            0x0004_1140,
            0x03E0_0008,
            0x2528_FFFF,
            0x1109_0002,
            0x3C01_1001,
            0x8FBF_0014,
            0xAFBF_FFFC,
            0x0810_0400,
            0x0FFF_FFFF,
        ] {
            let instruction = Decoder::decode(word).expect("should decode");
            assert_eq!(instruction.encode(), word, "{word:#010x}");
        }
    }
}
