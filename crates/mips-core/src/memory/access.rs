//! Access legality policy for fetches and data transfers.

use crate::memory::map::{MemoryLayout, MemorySegment, WORD_BYTES};
use crate::FaultCode;

/// Validates word alignment of a byte address.
///
/// # Errors
///
/// Returns [`FaultCode::UnalignedAccess`] when `addr` is not a multiple of 4.
pub const fn validate_word_alignment(addr: u32) -> Result<(), FaultCode> {
    if addr % WORD_BYTES == 0 {
        Ok(())
    } else {
        Err(FaultCode::UnalignedAccess)
    }
}

/// Validates an instruction fetch and returns the word index.
///
/// Fetch may address any allocated word.
///
/// # Errors
///
/// Returns [`FaultCode::UnalignedAccess`] for a misaligned PC and
/// [`FaultCode::MemoryOutOfRange`] outside the allocated array.
pub const fn validate_fetch_access(layout: &MemoryLayout, addr: u32) -> Result<usize, FaultCode> {
    if let Err(fault) = validate_word_alignment(addr) {
        return Err(fault);
    }
    match layout.word_index(addr) {
        Some(index) => Ok(index),
        None => Err(FaultCode::MemoryOutOfRange),
    }
}

/// Validates a `lw`/`sw` effective address and returns the word index.
///
/// Data transfers are confined to the data segment.
///
/// # Errors
///
/// Returns [`FaultCode::UnalignedAccess`] for a misaligned address and
/// [`FaultCode::MemoryOutOfRange`] outside the data segment.
pub const fn validate_data_access(layout: &MemoryLayout, addr: u32) -> Result<usize, FaultCode> {
    if let Err(fault) = validate_word_alignment(addr) {
        return Err(fault);
    }
    match layout.segment_of(addr) {
        Some(MemorySegment::Data) => match layout.word_index(addr) {
            Some(index) => Ok(index),
            None => Err(FaultCode::MemoryOutOfRange),
        },
        Some(MemorySegment::Text) | None => Err(FaultCode::MemoryOutOfRange),
    }
}
