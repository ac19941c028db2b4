use log::{debug, trace};
use rand::Rng;

use crate::interpreter::config::{FLAG_REGISTER, GLYPH_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::interpreter::error::Chip8Error;
use crate::interpreter::instruction::{decode, Instruction};
use crate::interpreter::state::{
    clear_display, first_pressed_key, pop_return_address, push_return_address, read_memory,
    write_memory, MachineState,
};

/// How the instruction pointer moves once an instruction has executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgramCounter {
    Next,
    Skip,
    Jump(u16),
    Stay,
}

impl ProgramCounter {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Self::Skip
        } else {
            Self::Next
        }
    }
}

/// One full cycle: fetch, decode, execute, advance, then tick both timers.
/// A failing instruction aborts the cycle before the timer tick.
pub fn step(state: &mut MachineState) -> Result<(), Chip8Error> {
    let opcode = fetch(state)?;
    execute_opcode(state, opcode)?;
    tick_timers(state);
    Ok(())
}

fn fetch(state: &MachineState) -> Result<u16, Chip8Error> {
    let bytes = read_memory(state, state.pc as usize, 2)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub fn tick_timers(state: &mut MachineState) {
    state.delay_timer = state.delay_timer.saturating_sub(1);
    state.sound_timer = state.sound_timer.saturating_sub(1);
}

/// Decodes and executes `opcode` as if it had been fetched at the current instruction
/// pointer, including the pointer advance. Does not tick the timers.
pub fn execute_opcode(state: &mut MachineState, opcode: u16) -> Result<(), Chip8Error> {
    state.op = opcode;
    let instruction = decode(opcode);
    trace!("0x{:03x}: {opcode:04x} {instruction:?}", state.pc);
    execute_instruction(state, instruction)
}

pub fn execute_instruction(
    state: &mut MachineState,
    instruction: Instruction,
) -> Result<(), Chip8Error> {
    match execute(state, instruction)? {
        ProgramCounter::Next => state.pc = state.pc.wrapping_add(2),
        ProgramCounter::Skip => state.pc = state.pc.wrapping_add(4),
        ProgramCounter::Jump(address) => state.pc = address,
        ProgramCounter::Stay => {}
    }
    Ok(())
}

fn execute(
    state: &mut MachineState,
    instruction: Instruction,
) -> Result<ProgramCounter, Chip8Error> {
    let registers = &mut state.registers;

    let advance = match instruction {
        Instruction::Sys { .. } | Instruction::Unknown(_) => ProgramCounter::Next,
        Instruction::ClearDisplay => {
            clear_display(state);
            ProgramCounter::Next
        }
        // the popped address is that of the call itself, so the normal advance applies
        Instruction::Return => {
            state.pc = pop_return_address(state)?;
            ProgramCounter::Next
        }
        Instruction::Jump { addr } => ProgramCounter::Jump(addr),
        Instruction::Call { addr } => {
            let return_address = state.pc;
            push_return_address(state, return_address)?;
            ProgramCounter::Jump(addr)
        }
        Instruction::SkipEqImmediate { x, kk } => ProgramCounter::skip_if(registers[x] == kk),
        Instruction::SkipNeImmediate { x, kk } => ProgramCounter::skip_if(registers[x] != kk),
        Instruction::SkipEqRegister { x, y } => {
            ProgramCounter::skip_if(registers[x] == registers[y])
        }
        Instruction::SkipNeRegister { x, y } => {
            ProgramCounter::skip_if(registers[x] != registers[y])
        }
        Instruction::LoadImmediate { x, kk } => {
            registers[x] = kk;
            ProgramCounter::Next
        }
        Instruction::AddImmediate { x, kk } => {
            registers[x] = registers[x].wrapping_add(kk);
            ProgramCounter::Next
        }
        Instruction::Move { x, y } => {
            registers[x] = registers[y];
            ProgramCounter::Next
        }
        Instruction::Or { x, y } => {
            registers[x] |= registers[y];
            ProgramCounter::Next
        }
        Instruction::And { x, y } => {
            registers[x] &= registers[y];
            ProgramCounter::Next
        }
        Instruction::Xor { x, y } => {
            registers[x] ^= registers[y];
            ProgramCounter::Next
        }
        Instruction::AddRegister { x, y } => {
            let (result, carry) = registers[x].overflowing_add(registers[y]);
            registers[FLAG_REGISTER] = u8::from(carry);
            registers[x] = result;
            ProgramCounter::Next
        }
        Instruction::Subtract { x, y } => {
            let (vx, vy) = (registers[x], registers[y]);
            registers[FLAG_REGISTER] = u8::from(vx > vy);
            registers[x] = vx.wrapping_sub(vy);
            ProgramCounter::Next
        }
        Instruction::SubtractReverse { x, y } => {
            let (vx, vy) = (registers[x], registers[y]);
            registers[FLAG_REGISTER] = u8::from(vy > vx);
            registers[x] = vy.wrapping_sub(vx);
            ProgramCounter::Next
        }
        Instruction::ShiftRight { x } => {
            let value = registers[x];
            registers[FLAG_REGISTER] = value & 0x1;
            registers[x] = value >> 1;
            ProgramCounter::Next
        }
        Instruction::ShiftLeft { x } => {
            let value = registers[x];
            registers[FLAG_REGISTER] = value >> 7;
            registers[x] = value << 1;
            ProgramCounter::Next
        }
        Instruction::LoadIndex { addr } => {
            state.index = addr;
            ProgramCounter::Next
        }
        Instruction::JumpWithOffset { addr } => {
            ProgramCounter::Jump(addr + u16::from(registers[0]))
        }
        Instruction::RandomAnd { x, kk } => {
            state.registers[x] = state.rng.gen::<u8>() & kk;
            ProgramCounter::Next
        }
        Instruction::Draw { x, y, n } => {
            draw_sprite(state, x, y, n)?;
            ProgramCounter::Next
        }
        Instruction::SkipKeyPressed { x } => ProgramCounter::skip_if(key_is_pressed(state, x)),
        Instruction::SkipKeyNotPressed { x } => {
            ProgramCounter::skip_if(!key_is_pressed(state, x))
        }
        Instruction::ReadDelayTimer { x } => {
            registers[x] = state.delay_timer;
            ProgramCounter::Next
        }
        Instruction::WaitForKey { x } => match first_pressed_key(state) {
            Some(key) => {
                debug!("key wait at 0x{:03x} released by key {key:x}", state.pc);
                state.registers[x] = key;
                ProgramCounter::Next
            }
            None => ProgramCounter::Stay,
        },
        Instruction::SetDelayTimer { x } => {
            state.delay_timer = registers[x];
            ProgramCounter::Next
        }
        Instruction::SetSoundTimer { x } => {
            state.sound_timer = registers[x];
            ProgramCounter::Next
        }
        Instruction::AddToIndex { x } => {
            state.index = state.index.wrapping_add(u16::from(registers[x]));
            ProgramCounter::Next
        }
        Instruction::LoadGlyphAddress { x } => {
            state.index = u16::from(registers[x]) * GLYPH_HEIGHT as u16;
            ProgramCounter::Next
        }
        Instruction::StoreBcd { x } => {
            let value = registers[x];
            let digits = [value / 100, (value % 100) / 10, value % 10];
            let address = state.index as usize;
            write_memory(state, address, &digits)?;
            ProgramCounter::Next
        }
        Instruction::DumpRegisters { x } => {
            let (values, address) = (state.registers, state.index as usize);
            write_memory(state, address, &values[..=x])?;
            ProgramCounter::Next
        }
        Instruction::LoadRegisters { x } => {
            let mut values = [0u8; 16];
            values[..=x].copy_from_slice(read_memory(state, state.index as usize, x + 1)?);
            state.registers[..=x].copy_from_slice(&values[..=x]);
            ProgramCounter::Next
        }
    };

    Ok(advance)
}

fn key_is_pressed(state: &MachineState, x: usize) -> bool {
    // values above 0xF name no key and read as released
    state
        .key_inputs
        .get(state.registers[x] as usize)
        .copied()
        .unwrap_or(false)
}

/// XOR-blits `n` sprite rows from memory at the index register. Each lit pixel wraps
/// on its own; the flag register reports whether any lit cell was turned off.
fn draw_sprite(
    state: &mut MachineState,
    x: usize,
    y: usize,
    n: u8,
) -> Result<(), Chip8Error> {
    let height = n as usize;
    let mut sprite = [0u8; 15];
    sprite[..height].copy_from_slice(read_memory(state, state.index as usize, height)?);

    let x_origin = state.registers[x] as usize;
    let y_origin = state.registers[y] as usize;
    let mut collision = false;

    for (row, &sprite_row) in sprite[..height].iter().enumerate() {
        let y_pos = (y_origin + row) % SCREEN_HEIGHT;
        for bit in 0..8 {
            if (sprite_row >> (7 - bit)) & 0x1 == 0 {
                continue;
            }

            let x_pos = (x_origin + bit) % SCREEN_WIDTH;
            let location = x_pos + (y_pos * SCREEN_WIDTH);
            if state.screen_buffer[location] == 1 {
                collision = true;
            }
            state.screen_buffer[location] ^= 1;
        }
    }

    state.registers[FLAG_REGISTER] = u8::from(collision);
    Ok(())
}
