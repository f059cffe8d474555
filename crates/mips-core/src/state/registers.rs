use std::fmt;

/// Number of architecturally visible general-purpose registers.
pub const GENERAL_REGISTER_COUNT: usize = 32;

/// General-purpose register index (`$0..$31`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Register(u8);

impl Register {
    /// Zero register.
    pub const ZERO: Self = Self(0);
    /// Stack pointer.
    pub const SP: Self = Self(29);
    /// Link register written by `jal`.
    pub const RA: Self = Self(31);

    /// Builds a register from a 5-bit field. Bits above bit 4 are ignored.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u5(bits: u32) -> Self {
        Self((bits & 0x1F) as u8)
    }

    /// Returns the array index for this register (`0..=31`).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw 5-bit encoding.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Iterates over all registers in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=31).map(Self)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Whether writes to `$0` are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ZeroRegisterPolicy {
    /// `$0` always reads zero; writes to it are dropped.
    #[default]
    Hardwired,
    /// `$0` is an ordinary register.
    Writable,
}

/// The 32-entry general-purpose register file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    values: [i32; GENERAL_REGISTER_COUNT],
    zero_policy: ZeroRegisterPolicy,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new(ZeroRegisterPolicy::default())
    }
}

impl RegisterFile {
    /// Creates a zeroed register file with the given `$0` policy.
    #[must_use]
    pub const fn new(zero_policy: ZeroRegisterPolicy) -> Self {
        Self {
            values: [0; GENERAL_REGISTER_COUNT],
            zero_policy,
        }
    }

    /// Reads a register.
    #[must_use]
    pub const fn read(&self, reg: Register) -> i32 {
        self.values[reg.index()]
    }

    /// Reads a register as an unsigned word.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn read_u32(&self, reg: Register) -> u32 {
        self.values[reg.index()] as u32
    }

    /// Overwrites a register. Returns `false` when the write was discarded
    /// by the `$0` policy.
    pub fn write(&mut self, reg: Register, value: i32) -> bool {
        if reg == Register::ZERO && self.zero_policy == ZeroRegisterPolicy::Hardwired {
            return false;
        }
        self.values[reg.index()] = value;
        true
    }

    /// Active `$0` policy.
    #[must_use]
    pub const fn zero_policy(&self) -> ZeroRegisterPolicy {
        self.zero_policy
    }

    /// All register values in index order.
    #[must_use]
    pub const fn values(&self) -> &[i32; GENERAL_REGISTER_COUNT] {
        &self.values
    }

    /// Zeroes every register, keeping the `$0` policy.
    pub fn clear(&mut self) {
        self.values = [0; GENERAL_REGISTER_COUNT];
    }
}

/// Architectural state: register file plus program counter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArchitecturalState {
    /// General-purpose registers.
    pub registers: RegisterFile,
    pc: u32,
}

impl ArchitecturalState {
    /// Creates a state with zeroed registers and the given entry point.
    #[must_use]
    pub const fn new(zero_policy: ZeroRegisterPolicy, pc: u32) -> Self {
        Self {
            registers: RegisterFile::new(zero_policy),
            pc,
        }
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Writes the program counter.
    pub fn set_pc(&mut self, value: u32) {
        self.pc = value;
    }

    /// Reads a general-purpose register.
    #[must_use]
    pub const fn gpr(&self, reg: Register) -> i32 {
        self.registers.read(reg)
    }

    /// Writes a general-purpose register, subject to the `$0` policy.
    pub fn set_gpr(&mut self, reg: Register, value: i32) -> bool {
        self.registers.write(reg, value)
    }
}
