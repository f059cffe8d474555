use thiserror::Error;

/// Stable fault taxonomy. Every fault is fatal for the cycle that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Opcode or function code outside the supported set.
    #[error("illegal instruction encoding")]
    IllegalInstruction = 0x01,
    /// Fetch or data access outside the allocated memory.
    #[error("memory access out of range")]
    MemoryOutOfRange = 0x02,
    /// Fetch or data access at an address that is not word aligned.
    #[error("unaligned word access")]
    UnalignedAccess = 0x03,
    /// Instruction stream exceeds the instruction segment capacity.
    #[error("program too large for instruction memory")]
    ProgramTooLarge = 0x04,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::IllegalInstruction),
            0x02 => Some(Self::MemoryOutOfRange),
            0x03 => Some(Self::UnalignedAccess),
            0x04 => Some(Self::ProgramTooLarge),
            _ => None,
        }
    }
}

/// Error returned by [`crate::Decoder::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DecodeError {
    /// The word's opcode, or its function code for register-register
    /// instructions, is not part of the supported instruction set.
    #[error("illegal instruction {word:#010x}")]
    IllegalInstruction {
        /// Raw word that failed to decode.
        word: u32,
    },
}

impl DecodeError {
    /// Maps a decode error onto the fault taxonomy.
    #[must_use]
    pub const fn code(self) -> FaultCode {
        match self {
            Self::IllegalInstruction { .. } => FaultCode::IllegalInstruction,
        }
    }
}

impl From<DecodeError> for FaultCode {
    fn from(value: DecodeError) -> Self {
        value.code()
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, FaultCode};

    #[test]
    fn stable_code_roundtrip_is_bijective_for_defined_values() {
        for code in 0x01u8..=0x04 {
            let fault = FaultCode::from_u8(code).expect("defined taxonomy code");
            assert_eq!(fault.as_u8(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(FaultCode::from_u8(0x00).is_none());
        assert!(FaultCode::from_u8(0x05).is_none());
        assert!(FaultCode::from_u8(0xFF).is_none());
    }

    #[test]
    fn fault_messages_are_stable() {
        assert_eq!(
            FaultCode::IllegalInstruction.to_string(),
            "illegal instruction encoding"
        );
        assert_eq!(
            FaultCode::MemoryOutOfRange.to_string(),
            "memory access out of range"
        );
        assert_eq!(FaultCode::UnalignedAccess.to_string(), "unaligned word access");
    }

    #[test]
    fn decode_error_converts_to_illegal_instruction() {
        let err = DecodeError::IllegalInstruction { word: 0xFFFF_FFFF };
        assert_eq!(FaultCode::from(err), FaultCode::IllegalInstruction);
        assert_eq!(err.to_string(), "illegal instruction 0xffffffff");
    }
}
