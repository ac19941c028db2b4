use std::path::PathBuf;

use clap::Parser;

use chip8_interpreter_rs::{
    load_palette, load_palette_from_env, run_emulator_app, run_emulator_headless, AppSettings,
    Chip8Error,
};

#[derive(Debug, Parser)]
#[command(name = "chip8-interpreter-rs")]
#[command(about = "Run a CHIP-8 program")]
struct Args {
    rom: PathBuf,

    #[arg(long, default_value_t = 8)]
    scale: usize,

    #[arg(long, default_value_t = 60)]
    hz: usize,

    #[arg(long, default_value_t = 60)]
    fps: usize,

    /// classic, amber or green; defaults to $CHIP8_PALETTE, then classic
    #[arg(long)]
    palette: Option<String>,

    #[arg(long)]
    headless: bool,

    #[arg(long, default_value_t = 600)]
    max_steps: usize,
}

fn main() -> Result<(), Chip8Error> {
    env_logger::init();
    let args = Args::parse();

    if args.headless {
        let state = run_emulator_headless(&args.rom, args.max_steps)?;
        let lit = state.screen_buffer.iter().filter(|cell| **cell == 1).count();
        println!("headless finished: pc=0x{:03x} lit_pixels={lit}", state.pc);
        return Ok(());
    }

    let palette = match args.palette.as_deref() {
        Some(name) => load_palette(name)?,
        None => load_palette_from_env()?,
    };
    let settings = AppSettings {
        scale: args.scale,
        hz: args.hz,
        fps: args.fps,
        palette,
    };

    let _state = run_emulator_app(&args.rom, settings)?;
    Ok(())
}
