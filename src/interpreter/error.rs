use thiserror::Error;

#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ROM too large: {size} bytes (max {max})")]
    RomTooLarge { size: usize, max: usize },

    #[error("address out of bounds: 0x{0:04x}")]
    OutOfBounds(usize),

    #[error("call stack overflow: call from 0x{0:03x} exceeds 16 nested levels")]
    StackOverflow(u16),

    #[error("return instruction with empty stack")]
    StackUnderflow,

    #[error("invalid key index: {0} (expected 0..=15)")]
    InvalidKey(usize),

    #[error("unknown palette '{0}', expected one of: classic, amber, green")]
    UnknownPalette(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
