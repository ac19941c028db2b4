pub mod interpreter;

pub use interpreter::app::{
    restart_program, run_emulator_app, run_emulator_headless, AppSettings,
};
pub use interpreter::cpu::{execute_instruction, execute_opcode, step, tick_timers};
pub use interpreter::error::Chip8Error;
pub use interpreter::instruction::{decode, Instruction};
pub use interpreter::palette::{
    load_palette, load_palette_from_env, Palette, AMBER_PALETTE, CLASSIC_PALETTE, GREEN_PALETTE,
};
pub use interpreter::state::{
    clear_display, create_seeded_state, create_state, first_pressed_key, framebuffer,
    load_program, load_rom_file, reset_state, set_key_state, sound_timer, stack_depth,
    MachineState,
};
