use chip8_interpreter_rs::{
    create_seeded_state, decode, execute_opcode, stack_depth, tick_timers, Instruction,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_is_total(opcode in any::<u16>()) {
        let instruction = decode(opcode);
        if let Instruction::Unknown(raw) = instruction {
            prop_assert_eq!(raw, opcode);
        }
    }

    #[test]
    fn arbitrary_opcodes_keep_display_binary_and_stack_bounded(
        opcodes in proptest::collection::vec(any::<u16>(), 1..128),
        seed in any::<u64>(),
    ) {
        let mut state = create_seeded_state(seed);
        state.index = 0x300;

        for opcode in opcodes {
            // faults are reported, never panics
            let _ = execute_opcode(&mut state, opcode);
        }

        prop_assert!(state.screen_buffer.iter().all(|cell| *cell <= 1));
        prop_assert!(stack_depth(&state) <= 16);
    }

    #[test]
    fn timers_never_underflow(delay in any::<u8>(), sound in any::<u8>(), ticks in 0usize..300) {
        let mut state = create_seeded_state(1);
        state.delay_timer = delay;
        state.sound_timer = sound;

        for _ in 0..ticks {
            tick_timers(&mut state);
        }

        prop_assert_eq!(state.delay_timer as usize, (delay as usize).saturating_sub(ticks));
        prop_assert_eq!(state.sound_timer as usize, (sound as usize).saturating_sub(ticks));
    }
}
