use rand::Rng;

use crate::operations;
use crate::state::{Keypad, State};

/// One decoded machine instruction
///
/// Instruction words dispatch on their high nibble; several families further
/// dispatch on the low nibble or low byte. The remaining nibbles carry the
/// operands:
/// - `[_nnn]` a 12-bit address
/// - `[_x__]` the register Vx (or the bound of a register range)
/// - `[__y_]` the register Vy
/// - `[__kk]` an immediate byte
/// - `[___n]` a 4-bit immediate (sprite height)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Cls,
    Ret,
    Jp { nnn: u16 },
    Call { nnn: u16 },
    SeByte { x: u8, kk: u8 },
    SneByte { x: u8, kk: u8 },
    SeReg { x: u8, y: u8 },
    LdByte { x: u8, kk: u8 },
    AddByte { x: u8, kk: u8 },
    LdReg { x: u8, y: u8 },
    Or { x: u8, y: u8 },
    And { x: u8, y: u8 },
    Xor { x: u8, y: u8 },
    AddReg { x: u8, y: u8 },
    Sub { x: u8, y: u8 },
    Shr { x: u8, y: u8 },
    Subn { x: u8, y: u8 },
    Shl { x: u8, y: u8 },
    SneReg { x: u8, y: u8 },
    LdI { nnn: u16 },
    JpV0 { nnn: u16 },
    Rnd { x: u8, kk: u8 },
    Drw { x: u8, y: u8, n: u8 },
    SkipKey { x: u8 },
    SkipNoKey { x: u8 },
    ReadDelay { x: u8 },
    WaitKey { x: u8 },
    SetDelay { x: u8 },
    SetSound { x: u8 },
    AddI { x: u8 },
    FontAddr { x: u8 },
    Bcd { x: u8 },
    Store { x: u8 },
    Load { x: u8 },
}

fn nibbles(word: u16) -> (u8, u8, u8, u8) {
    (
        (word >> 12) as u8,
        (word >> 8 & 0xF) as u8,
        (word >> 4 & 0xF) as u8,
        (word & 0xF) as u8,
    )
}

fn kk(word: u16) -> u8 {
    (word & 0xFF) as u8
}

fn nnn(word: u16) -> u16 {
    word & 0xFFF
}

impl Instruction {
    /// Decode a raw instruction word, or None for the words no interpreter
    /// variant ever defined.
    pub fn decode(word: u16) -> Option<Instruction> {
        let instruction = match nibbles(word) {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x1, ..) => Instruction::Jp { nnn: nnn(word) },
            (0x2, ..) => Instruction::Call { nnn: nnn(word) },
            (0x3, x, ..) => Instruction::SeByte { x, kk: kk(word) },
            (0x4, x, ..) => Instruction::SneByte { x, kk: kk(word) },
            (0x5, x, y, 0x0) => Instruction::SeReg { x, y },
            (0x6, x, ..) => Instruction::LdByte { x, kk: kk(word) },
            (0x7, x, ..) => Instruction::AddByte { x, kk: kk(word) },
            (0x8, x, y, 0x0) => Instruction::LdReg { x, y },
            (0x8, x, y, 0x1) => Instruction::Or { x, y },
            (0x8, x, y, 0x2) => Instruction::And { x, y },
            (0x8, x, y, 0x3) => Instruction::Xor { x, y },
            (0x8, x, y, 0x4) => Instruction::AddReg { x, y },
            (0x8, x, y, 0x5) => Instruction::Sub { x, y },
            (0x8, x, y, 0x6) => Instruction::Shr { x, y },
            (0x8, x, y, 0x7) => Instruction::Subn { x, y },
            (0x8, x, y, 0xE) => Instruction::Shl { x, y },
            (0x9, x, y, 0x0) => Instruction::SneReg { x, y },
            (0xA, ..) => Instruction::LdI { nnn: nnn(word) },
            (0xB, ..) => Instruction::JpV0 { nnn: nnn(word) },
            (0xC, x, ..) => Instruction::Rnd { x, kk: kk(word) },
            (0xD, x, y, n) => Instruction::Drw { x, y, n },
            (0xE, x, 0x9, 0xE) => Instruction::SkipKey { x },
            (0xE, x, 0xA, 0x1) => Instruction::SkipNoKey { x },
            (0xF, x, 0x0, 0x7) => Instruction::ReadDelay { x },
            (0xF, x, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, x, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, x, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, x, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, x, 0x2, 0x9) => Instruction::FontAddr { x },
            (0xF, x, 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, x, 0x5, 0x5) => Instruction::Store { x },
            (0xF, x, 0x6, 0x5) => Instruction::Load { x },
            _ => return None,
        };
        Some(instruction)
    }

    /// Apply this instruction to a pre-state and return the post-state.
    pub fn execute(self, state: &State, keys: &Keypad, rng: &mut impl Rng) -> State {
        match self {
            Instruction::Cls => operations::cls(state),
            Instruction::Ret => operations::ret(state),
            Instruction::Jp { nnn } => operations::jp(nnn, state),
            Instruction::Call { nnn } => operations::call(nnn, state),
            Instruction::SeByte { x, kk } => operations::se_byte(x, kk, state),
            Instruction::SneByte { x, kk } => operations::sne_byte(x, kk, state),
            Instruction::SeReg { x, y } => operations::se_reg(x, y, state),
            Instruction::LdByte { x, kk } => operations::ld_byte(x, kk, state),
            Instruction::AddByte { x, kk } => operations::add_byte(x, kk, state),
            Instruction::LdReg { x, y } => operations::ld_reg(x, y, state),
            Instruction::Or { x, y } => operations::or(x, y, state),
            Instruction::And { x, y } => operations::and(x, y, state),
            Instruction::Xor { x, y } => operations::xor(x, y, state),
            Instruction::AddReg { x, y } => operations::add_reg(x, y, state),
            Instruction::Sub { x, y } => operations::sub(x, y, state),
            Instruction::Shr { x, y } => operations::shr(x, y, state),
            Instruction::Subn { x, y } => operations::subn(x, y, state),
            Instruction::Shl { x, y } => operations::shl(x, y, state),
            Instruction::SneReg { x, y } => operations::sne_reg(x, y, state),
            Instruction::LdI { nnn } => operations::ld_i(nnn, state),
            Instruction::JpV0 { nnn } => operations::jp_v0(nnn, state),
            Instruction::Rnd { x, kk } => operations::rnd(x, kk, state, rng),
            Instruction::Drw { x, y, n } => operations::drw(x, y, n, state),
            Instruction::SkipKey { x } => operations::skip_key(x, state, keys),
            Instruction::SkipNoKey { x } => operations::skip_no_key(x, state, keys),
            Instruction::ReadDelay { x } => operations::read_delay(x, state),
            Instruction::WaitKey { x } => operations::wait_key(x, state, keys),
            Instruction::SetDelay { x } => operations::set_delay(x, state),
            Instruction::SetSound { x } => operations::set_sound(x, state),
            Instruction::AddI { x } => operations::add_i(x, state),
            Instruction::FontAddr { x } => operations::font_addr(x, state),
            Instruction::Bcd { x } => operations::bcd(x, state),
            Instruction::Store { x } => operations::store(x, state),
            Instruction::Load { x } => operations::load(x, state),
        }
    }
}
