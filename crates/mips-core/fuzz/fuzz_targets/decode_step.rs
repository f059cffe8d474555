#![no_main]

use libfuzzer_sys::fuzz_target;
use mips_core::{
    disassemble_word, run, validate_data_access, validate_fetch_access, ByteOrder, CoreState,
    Decoder,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let word = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    if let Ok(instruction) = Decoder::decode(word) {
        assert_eq!(instruction.encode(), word);
    }
    let _ = disassemble_word(word, word);

    let mut state = CoreState::default();
    if state.load_program_bytes(data, ByteOrder::Little).is_err() {
        return;
    }
    let layout = *state.memory.layout();
    let _ = validate_fetch_access(&layout, word);
    let _ = validate_data_access(&layout, word);
    let _ = run(&mut state, Some(256));
});
