//! Bit-field extraction and immediate extension.

/// Returns the unsigned value of the inclusive bit range `[high, low]` of `word`.
///
/// Bit 0 is the least significant bit. Callers pass `high >= low` and
/// `high <= 31`; any other range yields `0`.
#[must_use]
pub const fn extract_bits(word: u32, high: u32, low: u32) -> u32 {
    if high > 31 || low > high {
        return 0;
    }
    let width = high - low + 1;
    let shifted = word >> low;
    if width == 32 {
        shifted
    } else {
        shifted & ((1 << width) - 1)
    }
}

/// Widens a 16-bit immediate field to 32 bits.
///
/// With `signed` set, bit 15 is replicated (two's complement): a field with
/// bit 15 set yields `field - 65536`. Otherwise the field is zero extended.
/// Bits above 15 of `field` are ignored.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub const fn extend_immediate(field: u32, signed: bool) -> i32 {
    let field = field & 0xFFFF;
    if signed {
        field as u16 as i16 as i32
    } else {
        field as i32
    }
}

/// Sign-extends a 16-bit immediate field to 32 bits.
#[must_use]
pub const fn sign_extend_16(field: u32) -> i32 {
    extend_immediate(field, true)
}
