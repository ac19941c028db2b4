//! Decoding of 16-bit instruction words into [`Instruction`] values.
//!
//! Operand fields sit at fixed bit positions: `x` in bits 8-11, `y` in bits 4-7,
//! `n` in bits 0-3, `kk` in bits 0-7 and `addr` in bits 0-11.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `0nnn`, legacy machine-code call. Executes as a no-op.
    Sys { addr: u16 },
    ClearDisplay,
    Return,
    Jump { addr: u16 },
    Call { addr: u16 },
    SkipEqImmediate { x: usize, kk: u8 },
    SkipNeImmediate { x: usize, kk: u8 },
    SkipEqRegister { x: usize, y: usize },
    LoadImmediate { x: usize, kk: u8 },
    AddImmediate { x: usize, kk: u8 },
    Move { x: usize, y: usize },
    Or { x: usize, y: usize },
    And { x: usize, y: usize },
    Xor { x: usize, y: usize },
    AddRegister { x: usize, y: usize },
    Subtract { x: usize, y: usize },
    ShiftRight { x: usize },
    SubtractReverse { x: usize, y: usize },
    ShiftLeft { x: usize },
    SkipNeRegister { x: usize, y: usize },
    LoadIndex { addr: u16 },
    JumpWithOffset { addr: u16 },
    RandomAnd { x: usize, kk: u8 },
    Draw { x: usize, y: usize, n: u8 },
    SkipKeyPressed { x: usize },
    SkipKeyNotPressed { x: usize },
    ReadDelayTimer { x: usize },
    WaitForKey { x: usize },
    SetDelayTimer { x: usize },
    SetSoundTimer { x: usize },
    AddToIndex { x: usize },
    LoadGlyphAddress { x: usize },
    StoreBcd { x: usize },
    DumpRegisters { x: usize },
    LoadRegisters { x: usize },
    /// Unassigned encoding. Executes as a no-op.
    Unknown(u16),
}

fn x_register_index(opcode: u16) -> usize {
    ((opcode & 0x0F00) >> 8) as usize
}

fn y_register_index(opcode: u16) -> usize {
    ((opcode & 0x00F0) >> 4) as usize
}

fn address_nnn(opcode: u16) -> u16 {
    opcode & 0x0FFF
}

fn byte_kk(opcode: u16) -> u8 {
    (opcode & 0x00FF) as u8
}

fn nibble_n(opcode: u16) -> u8 {
    (opcode & 0x000F) as u8
}

pub fn decode(opcode: u16) -> Instruction {
    let x = x_register_index(opcode);
    let y = y_register_index(opcode);
    let kk = byte_kk(opcode);
    let addr = address_nnn(opcode);

    match opcode & 0xF000 {
        0x0000 => match opcode {
            0x00E0 => Instruction::ClearDisplay,
            0x00EE => Instruction::Return,
            _ => Instruction::Sys { addr },
        },
        0x1000 => Instruction::Jump { addr },
        0x2000 => Instruction::Call { addr },
        0x3000 => Instruction::SkipEqImmediate { x, kk },
        0x4000 => Instruction::SkipNeImmediate { x, kk },
        // the low nibble of 5xy_ and 9xy_ is not part of the encoding
        0x5000 => Instruction::SkipEqRegister { x, y },
        0x6000 => Instruction::LoadImmediate { x, kk },
        0x7000 => Instruction::AddImmediate { x, kk },
        0x8000 => decode_family_8(opcode, x, y),
        0x9000 => Instruction::SkipNeRegister { x, y },
        0xA000 => Instruction::LoadIndex { addr },
        0xB000 => Instruction::JumpWithOffset { addr },
        0xC000 => Instruction::RandomAnd { x, kk },
        0xD000 => Instruction::Draw {
            x,
            y,
            n: nibble_n(opcode),
        },
        0xE000 => match kk {
            0x9E => Instruction::SkipKeyPressed { x },
            0xA1 => Instruction::SkipKeyNotPressed { x },
            _ => Instruction::Unknown(opcode),
        },
        _ => decode_family_f(opcode, x, kk),
    }
}

fn decode_family_8(opcode: u16, x: usize, y: usize) -> Instruction {
    match nibble_n(opcode) {
        0x0 => Instruction::Move { x, y },
        0x1 => Instruction::Or { x, y },
        0x2 => Instruction::And { x, y },
        0x3 => Instruction::Xor { x, y },
        0x4 => Instruction::AddRegister { x, y },
        0x5 => Instruction::Subtract { x, y },
        0x6 => Instruction::ShiftRight { x },
        0x7 => Instruction::SubtractReverse { x, y },
        0xE => Instruction::ShiftLeft { x },
        _ => Instruction::Unknown(opcode),
    }
}

fn decode_family_f(opcode: u16, x: usize, kk: u8) -> Instruction {
    match kk {
        0x07 => Instruction::ReadDelayTimer { x },
        0x0A => Instruction::WaitForKey { x },
        0x15 => Instruction::SetDelayTimer { x },
        0x18 => Instruction::SetSoundTimer { x },
        0x1E => Instruction::AddToIndex { x },
        0x29 => Instruction::LoadGlyphAddress { x },
        0x33 => Instruction::StoreBcd { x },
        0x55 => Instruction::DumpRegisters { x },
        0x65 => Instruction::LoadRegisters { x },
        _ => Instruction::Unknown(opcode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_operand_fields_by_position() {
        assert_eq!(decode(0xD12F), Instruction::Draw { x: 1, y: 2, n: 0xF });
        assert_eq!(decode(0x3A42), Instruction::SkipEqImmediate { x: 0xA, kk: 0x42 });
        assert_eq!(decode(0xA123), Instruction::LoadIndex { addr: 0x123 });
        assert_eq!(decode(0x8AB4), Instruction::AddRegister { x: 0xA, y: 0xB });
    }

    #[test]
    fn family_zero_only_defines_clear_and_return() {
        assert_eq!(decode(0x00E0), Instruction::ClearDisplay);
        assert_eq!(decode(0x00EE), Instruction::Return);
        assert_eq!(decode(0x00FD), Instruction::Sys { addr: 0x0FD });
        assert_eq!(decode(0x0123), Instruction::Sys { addr: 0x123 });
    }

    #[test]
    fn unassigned_sub_selectors_decode_as_unknown() {
        assert_eq!(decode(0x8128), Instruction::Unknown(0x8128));
        assert_eq!(decode(0xE1FF), Instruction::Unknown(0xE1FF));
        assert_eq!(decode(0xF1FF), Instruction::Unknown(0xF1FF));
    }

    #[test]
    fn register_skips_ignore_low_nibble() {
        assert_eq!(decode(0x5121), Instruction::SkipEqRegister { x: 1, y: 2 });
        assert_eq!(decode(0x912F), Instruction::SkipNeRegister { x: 1, y: 2 });
    }

    #[test]
    fn shifts_carry_only_x() {
        assert_eq!(decode(0x8126), Instruction::ShiftRight { x: 1 });
        assert_eq!(decode(0x812E), Instruction::ShiftLeft { x: 1 });
    }
}
