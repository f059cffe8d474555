//! Memory layout: an instruction segment followed by a data segment.

/// Byte address of the first instruction word.
pub const TEXT_BASE: u32 = 0x0040_0000;
/// Default instruction segment capacity in words.
pub const DEFAULT_MAX_INSTRUCTIONS: usize = 1024;
/// Default data segment capacity in words.
pub const DEFAULT_MAX_DATA_WORDS: usize = 3072;
/// Bytes per memory word.
pub const WORD_BYTES: u32 = 4;

/// Segment classification for addresses inside the allocated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MemorySegment {
    /// Program words installed by the loader.
    Text,
    /// Data words addressed by `lw`/`sw`.
    Data,
}

/// Size and placement of the simulated memory array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MemoryLayout {
    /// Byte address of word 0.
    pub base: u32,
    /// Instruction segment capacity in words.
    pub instruction_words: usize,
    /// Data segment capacity in words.
    pub data_words: usize,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            base: TEXT_BASE,
            instruction_words: DEFAULT_MAX_INSTRUCTIONS,
            data_words: DEFAULT_MAX_DATA_WORDS,
        }
    }
}

impl MemoryLayout {
    /// Total number of words backing the layout.
    #[must_use]
    pub const fn total_words(&self) -> usize {
        self.instruction_words + self.data_words
    }

    /// Byte address of the first data word.
    #[must_use]
    pub const fn data_start(&self) -> u64 {
        self.base as u64 + self.instruction_words as u64 * WORD_BYTES as u64
    }

    /// Byte address one past the last allocated word.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.base as u64 + self.total_words() as u64 * WORD_BYTES as u64
    }

    /// Initial stack pointer: the address just past the data segment.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn initial_stack_pointer(&self) -> u32 {
        self.end() as u32
    }

    /// Classifies `addr`, or returns `None` outside the allocated array.
    #[must_use]
    pub const fn segment_of(&self, addr: u32) -> Option<MemorySegment> {
        let addr = addr as u64;
        if addr < self.base as u64 || addr >= self.end() {
            None
        } else if addr < self.data_start() {
            Some(MemorySegment::Text)
        } else {
            Some(MemorySegment::Data)
        }
    }

    /// Word index for an in-range address: `(addr - base) / 4`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn word_index(&self, addr: u32) -> Option<usize> {
        match self.segment_of(addr) {
            Some(_) => Some(((addr - self.base) / WORD_BYTES) as usize),
            None => None,
        }
    }

    /// Byte address of a word index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn address_of(&self, index: usize) -> u32 {
        self.base
            .wrapping_add((index as u32).wrapping_mul(WORD_BYTES))
    }
}

const _: () = assert_default_layout();

const fn assert_default_layout() {
    let layout = MemoryLayout {
        base: TEXT_BASE,
        instruction_words: DEFAULT_MAX_INSTRUCTIONS,
        data_words: DEFAULT_MAX_DATA_WORDS,
    };
    assert!(
        layout.end() <= u32::MAX as u64,
        "default layout must fit the 32-bit address space"
    );
    assert!(
        layout.initial_stack_pointer() == 0x0040_4000,
        "default stack pointer must sit at the end of data memory"
    );
}
