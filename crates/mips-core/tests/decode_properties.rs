//! Property coverage for decode, immediate extension and single-step safety.

#![allow(clippy::pedantic, clippy::nursery, clippy::cast_possible_truncation)]

use mips_core::{
    classify_function, classify_opcode, extend_immediate, step_one, validate_data_access,
    CoreState, Decoder, FaultCode, MemoryLayout, Operands, RunState, StepOutcome, TEXT_BASE,
};
use proptest::prelude::*;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

fn is_legal(word: u32) -> bool {
    let opcode = (word >> 26) as u8;
    if opcode == 0 {
        classify_function((word & 0x3F) as u8).is_some()
    } else {
        classify_opcode(opcode).is_some()
    }
}

proptest! {
    #[test]
    fn decode_accepts_exactly_the_supported_subset(word in any::<u32>()) {
        prop_assert_eq!(Decoder::decode(word).is_ok(), is_legal(word));
    }

    #[test]
    fn decoded_fields_match_bit_ranges(word in any::<u32>()) {
        let Ok(instruction) = Decoder::decode(word) else {
            return Ok(());
        };
        prop_assert_eq!(u32::from(instruction.opcode), word >> 26);
        match instruction.operands {
            Operands::RegisterRegister { rs, rt, rd, shamt, function } => {
                prop_assert_eq!(rs.bits(), (word >> 21) & 0x1F);
                prop_assert_eq!(rt.bits(), (word >> 16) & 0x1F);
                prop_assert_eq!(rd.bits(), (word >> 11) & 0x1F);
                prop_assert_eq!(u32::from(shamt), (word >> 6) & 0x1F);
                prop_assert_eq!(u32::from(function), word & 0x3F);
            }
            Operands::RegisterImmediate { rs, rt, immediate } => {
                prop_assert_eq!(rs.bits(), (word >> 21) & 0x1F);
                prop_assert_eq!(rt.bits(), (word >> 16) & 0x1F);
                prop_assert_eq!(immediate, i32::from(word as u16 as i16));
            }
            Operands::Jump { target } => {
                prop_assert_eq!(target, (word & 0x03FF_FFFF) << 2);
            }
        }
        prop_assert_eq!(instruction.encode(), word);
    }

    #[test]
    fn sign_extension_matches_twos_complement(field in 0u32..=0xFFFF) {
        let expected = if field < 0x8000 {
            field as i32
        } else {
            field as i32 - 0x1_0000
        };
        prop_assert_eq!(extend_immediate(field, true), expected);
        prop_assert_eq!(extend_immediate(field, false), field as i32);
    }

    #[test]
    fn data_access_requires_aligned_data_segment_address(addr in any::<u32>()) {
        let layout = MemoryLayout::default();
        let result = validate_data_access(&layout, addr);
        if addr % 4 != 0 {
            prop_assert_eq!(result, Err(FaultCode::UnalignedAccess));
        } else if (0x0040_1000..0x0040_4000).contains(&addr) {
            prop_assert_eq!(result, Ok(((addr - TEXT_BASE) / 4) as usize));
        } else {
            prop_assert_eq!(result, Err(FaultCode::MemoryOutOfRange));
        }
    }

    #[test]
    fn single_step_is_precise(word in any::<u32>(), values in prop::array::uniform8(any::<i32>())) {
        let mut state = CoreState::default();
        state.load_program(&[word]).expect("fits");
        for (index, value) in values.iter().enumerate() {
            state.arch.set_gpr(mips_core::Register::from_u5(index as u32), *value);
        }
        let before = state.clone();

        match step_one(&mut state) {
            StepOutcome::Retired(report) => {
                prop_assert_eq!(report.word, word);
                prop_assert_eq!(state.arch.pc(), report.next_pc);
                prop_assert_eq!(state.run_state, RunState::Running);
            }
            StepOutcome::Halted(_) => {
                prop_assert_eq!(&state.arch, &before.arch);
                prop_assert_eq!(&state.memory, &before.memory);
                prop_assert!(!state.run_state.is_running());
            }
        }
    }
}
