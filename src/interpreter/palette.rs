use std::env;

use crate::interpreter::error::Chip8Error;

pub type Rgba = [u8; 4];

/// The two colors a renderer maps framebuffer cells 0 and 1 to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    pub foreground: Rgba,
}

impl Palette {
    pub fn color_for(&self, cell: u8) -> Rgba {
        if cell == 0 {
            self.background
        } else {
            self.foreground
        }
    }
}

pub const CLASSIC_PALETTE: Palette = Palette {
    background: [0x00, 0x00, 0x00, 0xFF],
    foreground: [0xFF, 0xFF, 0xFF, 0xFF],
};

pub const AMBER_PALETTE: Palette = Palette {
    background: [0x1A, 0x0F, 0x00, 0xFF],
    foreground: [0xFF, 0xB0, 0x00, 0xFF],
};

pub const GREEN_PALETTE: Palette = Palette {
    background: [0x0F, 0x38, 0x0F, 0xFF],
    foreground: [0x9B, 0xBC, 0x0F, 0xFF],
};

pub fn load_palette(name: &str) -> Result<Palette, Chip8Error> {
    match name.trim().to_ascii_lowercase().as_str() {
        "classic" => Ok(CLASSIC_PALETTE),
        "amber" => Ok(AMBER_PALETTE),
        "green" => Ok(GREEN_PALETTE),
        other => Err(Chip8Error::UnknownPalette(other.to_owned())),
    }
}

/// Reads `CHIP8_PALETTE`, falling back to the classic palette when unset.
pub fn load_palette_from_env() -> Result<Palette, Chip8Error> {
    let name = env::var("CHIP8_PALETTE").unwrap_or_else(|_| "classic".to_owned());
    load_palette(&name)
}
