use std::path::Path;
use std::time::Instant;

use log::{error, info};

use crate::interpreter::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::interpreter::cpu::step;
use crate::interpreter::error::Chip8Error;
use crate::interpreter::palette::{Palette, Rgba};
use crate::interpreter::state::{
    create_state, framebuffer, load_rom_file, reset_state, set_key_state, MachineState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub scale: usize,
    /// Interpreter steps per second. Each step also ticks the timers once.
    pub hz: usize,
    pub fps: usize,
    pub palette: Palette,
}

pub fn run_emulator_headless(
    rom_path: &Path,
    max_steps: usize,
) -> Result<MachineState, Chip8Error> {
    if max_steps == 0 {
        return Err(Chip8Error::InvalidArgument("max_steps must be > 0"));
    }

    let mut state = create_state();
    load_rom_file(&mut state, rom_path)?;

    for count in 0..max_steps {
        if let Err(err) = step(&mut state) {
            error!("step {count} failed at pc=0x{:03x}: {err}", state.pc);
            return Err(err);
        }
    }

    Ok(state)
}

/// Resets the machine and reloads the program image, discarding anything the program
/// wrote over its own bytes.
pub fn restart_program(state: &mut MachineState, rom_path: &Path) -> Result<(), Chip8Error> {
    info!("restarting {}", rom_path.display());
    reset_state(state);
    load_rom_file(state, rom_path)
}

pub fn run_emulator_app(
    rom_path: &Path,
    settings: AppSettings,
) -> Result<MachineState, Chip8Error> {
    use raylib::prelude::{Color, KeyboardKey, RaylibDraw};

    if settings.scale == 0 {
        return Err(Chip8Error::InvalidArgument("scale must be > 0"));
    }
    if settings.hz == 0 {
        return Err(Chip8Error::InvalidArgument("hz must be > 0"));
    }
    if settings.fps == 0 {
        return Err(Chip8Error::InvalidArgument("fps must be > 0"));
    }

    let mut state = create_state();
    load_rom_file(&mut state, rom_path)?;

    let scale = settings.scale as i32;
    let (mut rl, thread) = raylib::init()
        .size(SCREEN_WIDTH as i32 * scale, SCREEN_HEIGHT as i32 * scale)
        .title("chip8-interpreter-rs")
        .build();
    rl.set_target_fps(settings.fps as u32);

    let key_map = [
        (KeyboardKey::KEY_ONE, 0x1usize),
        (KeyboardKey::KEY_TWO, 0x2),
        (KeyboardKey::KEY_THREE, 0x3),
        (KeyboardKey::KEY_FOUR, 0xC),
        (KeyboardKey::KEY_Q, 0x4),
        (KeyboardKey::KEY_W, 0x5),
        (KeyboardKey::KEY_E, 0x6),
        (KeyboardKey::KEY_R, 0xD),
        (KeyboardKey::KEY_A, 0x7),
        (KeyboardKey::KEY_S, 0x8),
        (KeyboardKey::KEY_D, 0x9),
        (KeyboardKey::KEY_F, 0xE),
        (KeyboardKey::KEY_Z, 0xA),
        (KeyboardKey::KEY_X, 0x0),
        (KeyboardKey::KEY_C, 0xB),
        (KeyboardKey::KEY_V, 0xF),
    ];

    let palette = settings.palette;
    let to_color = |cell: u8| {
        let [r, g, b, a]: Rgba = palette.color_for(cell);
        Color::new(r, g, b, a)
    };

    let step_interval = 1.0f32 / settings.hz as f32;
    let max_steps_per_frame = usize::max(1, (settings.hz / settings.fps) * 3);
    let mut accumulated_time = 0.0f32;
    let mut previous_tick = Instant::now();

    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            break;
        }
        // R is also keypad D, so restart needs a modifier
        if rl.is_key_down(KeyboardKey::KEY_LEFT_CONTROL) && rl.is_key_pressed(KeyboardKey::KEY_R) {
            restart_program(&mut state, rom_path)?;
            accumulated_time = 0.0;
        }

        for (key, mapped) in key_map {
            set_key_state(&mut state, mapped, rl.is_key_down(key))?;
        }

        let now = Instant::now();
        accumulated_time += (now - previous_tick).as_secs_f32().min(0.1);
        previous_tick = now;

        let mut steps_run = 0;
        while accumulated_time >= step_interval && steps_run < max_steps_per_frame {
            if let Err(err) = step(&mut state) {
                error!("halting at pc=0x{:03x} op=0x{:04x}: {err}", state.pc, state.op);
                return Err(err);
            }
            accumulated_time -= step_interval;
            steps_run += 1;
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(to_color(0));
        for (index, value) in framebuffer(&state).iter().enumerate() {
            let x = (index % SCREEN_WIDTH) as i32;
            let y = (index / SCREEN_WIDTH) as i32;
            d.draw_rectangle(x * scale, y * scale, scale, scale, to_color(*value));
        }
    }

    Ok(state)
}
