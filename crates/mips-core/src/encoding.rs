/// Instruction formats, selected by the primary opcode alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum InstructionFormat {
    /// Opcode 0: operands in registers, operation selected by the function code.
    RegisterRegister,
    /// Two registers and a 16-bit immediate.
    RegisterImmediate,
    /// Opcodes 2 and 3: 26-bit word target.
    Jump,
}

/// Supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Operation {
    /// Wrapping register add.
    Addu,
    /// Wrapping register subtract.
    Subu,
    /// Shift left logical by `shamt`.
    Sll,
    /// Shift right logical by `shamt`.
    Srl,
    /// Bitwise and of two registers.
    And,
    /// Bitwise or of two registers.
    Or,
    /// Set `rd` to 1 when `rs < rt` as signed values.
    Slt,
    /// Jump to the address held in `rs`.
    Jr,
    /// Wrapping add of a sign-extended immediate.
    Addiu,
    /// Bitwise and with a zero-extended immediate.
    Andi,
    /// Bitwise or with a zero-extended immediate.
    Ori,
    /// Branch when `rs == rt`.
    Beq,
    /// Branch when `rs != rt`.
    Bne,
    /// Load the immediate into the upper half of `rt`.
    Lui,
    /// Load a data word.
    Lw,
    /// Store a data word.
    Sw,
    /// Jump to the absolute word target.
    J,
    /// Jump to the absolute word target, linking through `$31`.
    Jal,
}

/// Primary opcode shared by every register-register instruction.
pub const SPECIAL_OPCODE: u8 = 0x00;

/// Function-code table for register-register instructions.
///
/// Any function code not present here is illegal.
pub const FUNCTION_TABLE: &[(u8, Operation)] = &[
    (0x21, Operation::Addu),
    (0x23, Operation::Subu),
    (0x00, Operation::Sll),
    (0x02, Operation::Srl),
    (0x24, Operation::And),
    (0x25, Operation::Or),
    (0x2A, Operation::Slt),
    (0x08, Operation::Jr),
];

/// Primary-opcode table for register-immediate and jump instructions.
///
/// Any non-zero opcode not present here is illegal.
pub const OPCODE_TABLE: &[(u8, Operation)] = &[
    (0x09, Operation::Addiu),
    (0x0C, Operation::Andi),
    (0x0D, Operation::Ori),
    (0x04, Operation::Beq),
    (0x05, Operation::Bne),
    (0x0F, Operation::Lui),
    (0x23, Operation::Lw),
    (0x2B, Operation::Sw),
    (0x02, Operation::J),
    (0x03, Operation::Jal),
];

impl Operation {
    /// Every supported operation, register-register first.
    pub const ALL: [Self; 18] = [
        Self::Addu,
        Self::Subu,
        Self::Sll,
        Self::Srl,
        Self::And,
        Self::Or,
        Self::Slt,
        Self::Jr,
        Self::Addiu,
        Self::Andi,
        Self::Ori,
        Self::Beq,
        Self::Bne,
        Self::Lui,
        Self::Lw,
        Self::Sw,
        Self::J,
        Self::Jal,
    ];

    /// Format this operation is encoded in.
    #[must_use]
    pub const fn format(self) -> InstructionFormat {
        match self {
            Self::Addu
            | Self::Subu
            | Self::Sll
            | Self::Srl
            | Self::And
            | Self::Or
            | Self::Slt
            | Self::Jr => InstructionFormat::RegisterRegister,
            Self::Addiu
            | Self::Andi
            | Self::Ori
            | Self::Beq
            | Self::Bne
            | Self::Lui
            | Self::Lw
            | Self::Sw => InstructionFormat::RegisterImmediate,
            Self::J | Self::Jal => InstructionFormat::Jump,
        }
    }

    /// Primary opcode used to encode this operation.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Addu
            | Self::Subu
            | Self::Sll
            | Self::Srl
            | Self::And
            | Self::Or
            | Self::Slt
            | Self::Jr => SPECIAL_OPCODE,
            Self::Addiu => 0x09,
            Self::Andi => 0x0C,
            Self::Ori => 0x0D,
            Self::Beq => 0x04,
            Self::Bne => 0x05,
            Self::Lui => 0x0F,
            Self::Lw => 0x23,
            Self::Sw => 0x2B,
            Self::J => 0x02,
            Self::Jal => 0x03,
        }
    }

    /// Function code for register-register operations.
    #[must_use]
    pub const fn function(self) -> Option<u8> {
        match self {
            Self::Addu => Some(0x21),
            Self::Subu => Some(0x23),
            Self::Sll => Some(0x00),
            Self::Srl => Some(0x02),
            Self::And => Some(0x24),
            Self::Or => Some(0x25),
            Self::Slt => Some(0x2A),
            Self::Jr => Some(0x08),
            _ => None,
        }
    }

    /// Assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Addu => "addu",
            Self::Subu => "subu",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::And => "and",
            Self::Or => "or",
            Self::Slt => "slt",
            Self::Jr => "jr",
            Self::Addiu => "addiu",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Lui => "lui",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::J => "j",
            Self::Jal => "jal",
        }
    }
}

/// Returns the instruction format selected by a primary opcode.
#[must_use]
pub const fn classify_format(opcode: u8) -> InstructionFormat {
    match opcode {
        SPECIAL_OPCODE => InstructionFormat::RegisterRegister,
        0x02 | 0x03 => InstructionFormat::Jump,
        _ => InstructionFormat::RegisterImmediate,
    }
}

/// Resolves a register-register function code.
///
/// `None` means the function code is illegal.
#[must_use]
pub fn classify_function(function: u8) -> Option<Operation> {
    FUNCTION_TABLE
        .iter()
        .find_map(|(code, operation)| (*code == function).then_some(*operation))
}

/// Resolves a non-zero primary opcode.
///
/// `None` means the opcode is illegal (opcode 0 is resolved through
/// [`classify_function`] instead).
#[must_use]
pub fn classify_opcode(opcode: u8) -> Option<Operation> {
    if opcode == SPECIAL_OPCODE {
        return None;
    }

    OPCODE_TABLE
        .iter()
        .find_map(|(code, operation)| (*code == opcode).then_some(*operation))
}
