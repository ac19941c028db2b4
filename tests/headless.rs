use chip8_interpreter_rs::{
    create_state, load_rom_file, restart_program, run_emulator_headless, step, Chip8Error,
};

fn write_rom(bytes: &[u8]) -> tempfile::NamedTempFile {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), bytes).unwrap();
    tmp
}

#[test]
fn glyph_rom_draws_digit_zero() {
    let rom = write_rom(&[
        0x60, 0x00, // LD V0, 0
        0xF0, 0x29, // LD F, V0
        0x61, 0x05, // LD V1, 5
        0x62, 0x05, // LD V2, 5
        0xD1, 0x25, // DRW V1, V2, 5
        0x12, 0x0A, // JP 0x20A
    ]);

    let state = run_emulator_headless(rom.path(), 20).unwrap();

    assert_eq!(state.pc, 0x20A);
    let row = 5 * 64;
    assert_eq!(state.screen_buffer[row + 5..row + 9], [1, 1, 1, 1]);
    assert_eq!(state.screen_buffer[row + 9], 0);
    assert_eq!(state.screen_buffer.iter().filter(|cell| **cell == 1).count(), 14);
}

#[test]
fn jump_outside_memory_halts_with_out_of_bounds() {
    let rom = write_rom(&[0xBF, 0xFF]);

    let result = run_emulator_headless(rom.path(), 10);

    assert!(matches!(result, Err(Chip8Error::OutOfBounds(_))));
}

#[test]
fn missing_rom_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = run_emulator_headless(&dir.path().join("missing.ch8"), 10);

    assert!(matches!(result, Err(Chip8Error::Io(_))));
}

#[test]
fn zero_step_budget_is_rejected() {
    let rom = write_rom(&[0x12, 0x00]);

    let result = run_emulator_headless(rom.path(), 0);

    assert!(matches!(result, Err(Chip8Error::InvalidArgument(_))));
}

#[test]
fn restart_reloads_program_image() {
    let rom = write_rom(&[
        0xA2, 0x00, // LD I, 0x200
        0x60, 0xFF, // LD V0, 0xFF
        0xF0, 0x55, // LD [I], V0
    ]);
    let mut state = create_state();
    load_rom_file(&mut state, rom.path()).unwrap();
    for _ in 0..3 {
        step(&mut state).unwrap();
    }
    assert_eq!(state.memory[0x200], 0xFF);

    restart_program(&mut state, rom.path()).unwrap();

    assert_eq!(state.memory[0x200..0x206], [0xA2, 0x00, 0x60, 0xFF, 0xF0, 0x55]);
    assert_eq!(state.pc, 0x200);
    assert_eq!(state.registers[0], 0);
}
