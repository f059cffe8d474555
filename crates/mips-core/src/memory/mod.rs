//! Word-addressed memory array and layout policies.

/// Fetch and data access legality helpers.
pub mod access;
/// Segment layout and address mapping.
pub mod map;

pub use access::{validate_data_access, validate_fetch_access, validate_word_alignment};
pub use map::{
    MemoryLayout, MemorySegment, DEFAULT_MAX_DATA_WORDS, DEFAULT_MAX_INSTRUCTIONS, TEXT_BASE,
    WORD_BYTES,
};

use crate::FaultCode;

/// Instruction segment followed by data segment, one `u32` per word.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    layout: MemoryLayout,
    words: Box<[u32]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(MemoryLayout::default())
    }
}

impl Memory {
    /// Allocates a zeroed array for `layout`.
    #[must_use]
    pub fn new(layout: MemoryLayout) -> Self {
        Self {
            layout,
            words: vec![0; layout.total_words()].into_boxed_slice(),
        }
    }

    /// Layout this array was allocated with.
    #[must_use]
    pub const fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    /// Raw backing words.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Fetches the instruction word at `addr`.
    ///
    /// # Errors
    ///
    /// Propagates [`validate_fetch_access`] faults.
    pub fn fetch(&self, addr: u32) -> Result<u32, FaultCode> {
        let index = validate_fetch_access(&self.layout, addr)?;
        Ok(self.words[index])
    }

    /// Reads a data word.
    ///
    /// # Errors
    ///
    /// Propagates [`validate_data_access`] faults.
    pub fn read_data(&self, addr: u32) -> Result<u32, FaultCode> {
        let index = validate_data_access(&self.layout, addr)?;
        Ok(self.words[index])
    }

    /// Writes a data word.
    ///
    /// # Errors
    ///
    /// Propagates [`validate_data_access`] faults; nothing is written then.
    pub fn write_data(&mut self, addr: u32, value: u32) -> Result<(), FaultCode> {
        let index = validate_data_access(&self.layout, addr)?;
        self.words[index] = value;
        Ok(())
    }

    /// Installs a program image at the start of the instruction segment and
    /// zeroes the remainder of the segment. Returns the number of words
    /// installed.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::ProgramTooLarge`] when `program` exceeds the
    /// instruction segment; memory is left untouched then.
    pub fn load_program(&mut self, program: &[u32]) -> Result<usize, FaultCode> {
        let capacity = self.layout.instruction_words;
        if program.len() > capacity {
            return Err(FaultCode::ProgramTooLarge);
        }

        let (text, _) = self.words.split_at_mut(capacity);
        text.fill(0);
        text[..program.len()].copy_from_slice(program);
        Ok(program.len())
    }

    /// Non-zero words of the data segment as `(address, value)` pairs.
    pub fn nonzero_data(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let first = self.layout.instruction_words;
        self.words[first..]
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(move |(offset, value)| (self.layout.address_of(first + offset), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::{Memory, MemoryLayout, TEXT_BASE};
    use crate::FaultCode;

    fn small_layout() -> MemoryLayout {
        MemoryLayout {
            base: TEXT_BASE,
            instruction_words: 4,
            data_words: 4,
        }
    }

    #[test]
    fn default_backing_store_is_zeroed() {
        let memory = Memory::default();
        assert_eq!(memory.words().len(), 4096);
        assert!(memory.words().iter().all(|word| *word == 0));
    }

    #[test]
    fn program_lands_at_text_base() {
        let mut memory = Memory::new(small_layout());
        assert_eq!(memory.load_program(&[0x1111, 0x2222]), Ok(2));
        assert_eq!(memory.fetch(TEXT_BASE), Ok(0x1111));
        assert_eq!(memory.fetch(TEXT_BASE + 4), Ok(0x2222));
        assert_eq!(memory.fetch(TEXT_BASE + 8), Ok(0));
    }

    #[test]
    fn program_filling_capacity_exactly_is_accepted() {
        let mut memory = Memory::new(small_layout());
        assert_eq!(memory.load_program(&[1, 2, 3, 4]), Ok(4));
    }

    #[test]
    fn oversized_program_is_rejected_without_mutation() {
        let mut memory = Memory::new(small_layout());
        memory.load_program(&[7]).expect("fits");

        assert_eq!(
            memory.load_program(&[1, 2, 3, 4, 5]),
            Err(FaultCode::ProgramTooLarge)
        );
        assert_eq!(memory.fetch(TEXT_BASE), Ok(7));
    }

    #[test]
    fn reloading_clears_previous_program_tail() {
        let mut memory = Memory::new(small_layout());
        memory.load_program(&[1, 2, 3]).expect("fits");
        memory.load_program(&[9]).expect("fits");
        assert_eq!(memory.fetch(TEXT_BASE + 4), Ok(0));
    }

    #[test]
    fn data_roundtrip_and_range_checks() {
        let mut memory = Memory::new(small_layout());
        let data = TEXT_BASE + 16;

        memory.write_data(data + 4, 0xCAFE_F00D).expect("in range");
        assert_eq!(memory.read_data(data + 4), Ok(0xCAFE_F00D));

        assert_eq!(
            memory.write_data(TEXT_BASE, 1),
            Err(FaultCode::MemoryOutOfRange)
        );
        assert_eq!(
            memory.read_data(TEXT_BASE + 32),
            Err(FaultCode::MemoryOutOfRange)
        );
        assert_eq!(memory.fetch(TEXT_BASE), Ok(0));
    }

    #[test]
    fn nonzero_data_reports_addresses() {
        let mut memory = Memory::new(small_layout());
        memory.load_program(&[0xFFFF_FFFF]).expect("fits");
        memory.write_data(TEXT_BASE + 20, 5).expect("in range");

        let dump: Vec<_> = memory.nonzero_data().collect();
        assert_eq!(dump, vec![(TEXT_BASE + 20, 5)]);
    }
}
