use std::fs;
use std::path::Path;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::interpreter::config::{
    FONT_BYTES, KEY_COUNT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SCREEN_CELLS, STACK_DEPTH,
};
use crate::interpreter::error::Chip8Error;

/// Complete machine state. Owned by the caller and threaded by reference through
/// [`crate::step`]; nothing in the interpreter holds state of its own.
#[derive(Debug, Clone)]
pub struct MachineState {
    pub memory: [u8; MEMORY_SIZE],
    pub registers: [u8; REGISTER_COUNT],
    pub key_inputs: [bool; KEY_COUNT],
    pub screen_buffer: [u8; SCREEN_CELLS],
    pub pc: u16,
    pub index: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    /// Last instruction word fetched or executed.
    pub op: u16,
    stack: [u16; STACK_DEPTH],
    stack_pointer: usize,
    pub(crate) rng: StdRng,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            memory: [0; MEMORY_SIZE],
            registers: [0; REGISTER_COUNT],
            key_inputs: [false; KEY_COUNT],
            screen_buffer: [0; SCREEN_CELLS],
            pc: PROGRAM_START as u16,
            index: 0,
            delay_timer: 0,
            sound_timer: 0,
            op: 0,
            stack: [0; STACK_DEPTH],
            stack_pointer: 0,
            rng: StdRng::from_entropy(),
        }
    }
}

pub fn create_state() -> MachineState {
    let mut state = MachineState::default();
    reset_state(&mut state);
    state
}

/// Same as [`create_state`] but with a fixed seed for the random-and instruction.
pub fn create_seeded_state(seed: u64) -> MachineState {
    let mut state = MachineState {
        rng: StdRng::seed_from_u64(seed),
        ..MachineState::default()
    };
    reset_state(&mut state);
    state
}

/// Reinitializes registers, stack, timers, pointers and the glyph table, and blanks the
/// display. Program memory and the keypad latch are left as they are.
pub fn reset_state(state: &mut MachineState) {
    state.registers = [0; REGISTER_COUNT];
    state.stack = [0; STACK_DEPTH];
    state.stack_pointer = 0;
    state.pc = PROGRAM_START as u16;
    state.index = 0;
    state.delay_timer = 0;
    state.sound_timer = 0;
    state.op = 0;

    clear_display(state);
    load_font(state);
    debug!("machine reset, pc=0x{:03x}", state.pc);
}

pub fn clear_display(state: &mut MachineState) {
    state.screen_buffer = [0; SCREEN_CELLS];
}

pub fn load_font(state: &mut MachineState) {
    state.memory[..FONT_BYTES.len()].copy_from_slice(&FONT_BYTES);
}

pub fn load_program(state: &mut MachineState, program: &[u8]) -> Result<(), Chip8Error> {
    if program.len() > MAX_PROGRAM_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size: program.len(),
            max: MAX_PROGRAM_SIZE,
        });
    }

    let start = PROGRAM_START;
    let end = PROGRAM_START + program.len();
    state.memory[start..end].copy_from_slice(program);
    info!(
        "loaded {} bytes into memory 0x{start:03x}..0x{end:03x}",
        program.len()
    );

    Ok(())
}

pub fn load_rom_file(state: &mut MachineState, path: &Path) -> Result<(), Chip8Error> {
    let rom_bytes = fs::read(path)?;
    load_program(state, &rom_bytes)
}

pub fn first_pressed_key(state: &MachineState) -> Option<u8> {
    state
        .key_inputs
        .iter()
        .position(|pressed| *pressed)
        .map(|index| index as u8)
}

pub fn set_key_state(
    state: &mut MachineState,
    key_index: usize,
    is_pressed: bool,
) -> Result<(), Chip8Error> {
    let key = state
        .key_inputs
        .get_mut(key_index)
        .ok_or(Chip8Error::InvalidKey(key_index))?;
    *key = is_pressed;
    Ok(())
}

pub fn framebuffer(state: &MachineState) -> &[u8; SCREEN_CELLS] {
    &state.screen_buffer
}

pub fn sound_timer(state: &MachineState) -> u8 {
    state.sound_timer
}

/// Number of return addresses currently on the call stack.
pub fn stack_depth(state: &MachineState) -> usize {
    state.stack_pointer
}

pub(crate) fn push_return_address(
    state: &mut MachineState,
    address: u16,
) -> Result<(), Chip8Error> {
    let slot = state
        .stack
        .get_mut(state.stack_pointer)
        .ok_or(Chip8Error::StackOverflow(address))?;
    *slot = address;
    state.stack_pointer += 1;
    Ok(())
}

pub(crate) fn pop_return_address(state: &mut MachineState) -> Result<u16, Chip8Error> {
    if state.stack_pointer == 0 {
        return Err(Chip8Error::StackUnderflow);
    }
    state.stack_pointer -= 1;
    let slot = state.stack_pointer;
    Ok(std::mem::take(&mut state.stack[slot]))
}

pub(crate) fn read_memory(
    state: &MachineState,
    address: usize,
    len: usize,
) -> Result<&[u8], Chip8Error> {
    let end = address + len;
    if end > MEMORY_SIZE {
        return Err(Chip8Error::OutOfBounds(end - 1));
    }
    Ok(&state.memory[address..end])
}

pub(crate) fn write_memory(
    state: &mut MachineState,
    address: usize,
    bytes: &[u8],
) -> Result<(), Chip8Error> {
    let end = address + bytes.len();
    if end > MEMORY_SIZE {
        return Err(Chip8Error::OutOfBounds(end - 1));
    }
    state.memory[address..end].copy_from_slice(bytes);
    Ok(())
}
