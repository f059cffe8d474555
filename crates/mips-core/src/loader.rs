//! Program image loading.

use tracing::{debug, warn};

use crate::memory::WORD_BYTES;

/// Byte order of the words in a program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Groups a raw image into 32-bit words.
///
/// A trailing chunk shorter than four bytes is not a word and is dropped.
#[must_use]
pub fn words_from_bytes(bytes: &[u8], order: ByteOrder) -> Vec<u32> {
    let chunks = bytes.chunks_exact(WORD_BYTES as usize);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        warn!(trailing, "ignoring partial word at end of program image");
    }

    let words: Vec<u32> = chunks
        .map(|chunk| {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(chunk);
            match order {
                ByteOrder::Little => u32::from_le_bytes(raw),
                ByteOrder::Big => u32::from_be_bytes(raw),
            }
        })
        .collect();
    debug!(words = words.len(), ?order, "decoded program image");
    words
}
