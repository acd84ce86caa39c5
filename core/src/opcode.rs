//! # Instruction words
//!
//! Instruction words are 16 bits each, stored most-significant byte first.
//! Their behavior is cased on the class nibble `[u___]` with a secondary
//! key for the polymorphic classes:
//! - `0x0`, `0xE`, and `0xF` disambiguate on the low byte `[__kk]`
//! - `0x8` disambiguates on the low nibble `[___n]`
//!
//! Nibbles not used to classify the word carry its operands:
//! - `[_nnn]` a 12-bit address
//! - `[__kk]` an 8-bit immediate assigned to and/or compared with Vx
//! - `[_x__]` the register Vx or a range of registers V0..Vx
//! - `[__y_]` the register Vy
//! - `[___n]` a 4-bit immediate (sprite height)

/// Field extraction for a raw 16-bit instruction word.
pub trait Word {
    /// The word's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The word's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The word's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The word's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The word's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The word without its most significant nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Word for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (((self & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// The classified behavior of an instruction word.
///
/// A closed set: every 16-bit word decodes to exactly one variant, with
/// `Unknown` absorbing the combinations no operation claims. Decoding can
/// therefore never fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// 00E0 - clear the display
    Clear,
    /// 00EE - return from a subroutine
    Ret,
    /// 1nnn - jump to nnn
    JmpNnn,
    /// 2nnn - call subroutine at nnn
    Call,
    /// 3xkk - skip next instruction if Vx == kk
    SkipXKk,
    /// 4xkk - skip next instruction if Vx != kk
    SkipnXKk,
    /// 5xy0 - skip next instruction if Vx == Vy
    SkipXY,
    /// 6xkk - Vx = kk
    MviXKk,
    /// 7xkk - Vx += kk
    AddXKk,
    /// 8xy0 - Vx = Vy
    MovXY,
    /// 8xy1 - Vx |= Vy
    Or,
    /// 8xy2 - Vx &= Vy
    And,
    /// 8xy3 - Vx ^= Vy
    Xor,
    /// 8xy4 - Vx += Vy; VF = carry
    AddXY,
    /// 8xy5 - Vx -= Vy; VF = not borrow
    Sub,
    /// 8xy6 - Vx >>= 1; VF = shifted-out bit
    Shr,
    /// 8xy7 - Vx = Vy - Vx; VF = not borrow
    Subn,
    /// 8xyE - Vx <<= 1; VF = shifted-out bit
    Shl,
    /// 9xy0 - skip next instruction if Vx != Vy
    SkipnXY,
    /// Annn - I = nnn
    MviINnn,
    /// Bnnn - jump to nnn + V0
    JmpV0Nnn,
    /// Cxkk - Vx = random byte & kk
    Rand,
    /// Dxyn - draw an n-byte sprite from memory[I] at (Vx, Vy); VF = collision
    Disp,
    /// Ex9E - skip next instruction if key Vx is down
    SkipKey,
    /// ExA1 - skip next instruction if key Vx is up
    SkipnKey,
    /// Fx07 - Vx = delay timer
    MovXDelay,
    /// Fx0A - wait for a key press, store the key in Vx
    MovKey,
    /// Fx15 - delay timer = Vx
    MovDelayX,
    /// Fx18 - sound timer = Vx
    MovSound,
    /// Fx1E - I += Vx
    AddIX,
    /// Fx29 - I = address of the font glyph for Vx
    SpritePos,
    /// Fx33 - memory[I..I+3] = BCD digits of Vx
    Movbcd,
    /// Fx55 - memory[I..I+x] = V0..Vx
    MovmIX,
    /// Fx65 - V0..Vx = memory[I..I+x]
    MovmXI,
    /// any word no operation claims; executes as a no-op
    Unknown,
}

impl Opcode {
    /// Classifies a raw instruction word. Total: unclaimed words map to
    /// `Unknown` rather than an error.
    pub fn decode(word: u16) -> Self {
        match word.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Opcode::Clear,
            (0x0, 0x0, 0xE, 0xE) => Opcode::Ret,
            (0x1, ..) => Opcode::JmpNnn,
            (0x2, ..) => Opcode::Call,
            (0x3, ..) => Opcode::SkipXKk,
            (0x4, ..) => Opcode::SkipnXKk,
            (0x5, ..) => Opcode::SkipXY,
            (0x6, ..) => Opcode::MviXKk,
            (0x7, ..) => Opcode::AddXKk,
            (0x8, .., 0x0) => Opcode::MovXY,
            (0x8, .., 0x1) => Opcode::Or,
            (0x8, .., 0x2) => Opcode::And,
            (0x8, .., 0x3) => Opcode::Xor,
            (0x8, .., 0x4) => Opcode::AddXY,
            (0x8, .., 0x5) => Opcode::Sub,
            (0x8, .., 0x6) => Opcode::Shr,
            (0x8, .., 0x7) => Opcode::Subn,
            (0x8, .., 0xE) => Opcode::Shl,
            (0x9, ..) => Opcode::SkipnXY,
            (0xA, ..) => Opcode::MviINnn,
            (0xB, ..) => Opcode::JmpV0Nnn,
            (0xC, ..) => Opcode::Rand,
            (0xD, ..) => Opcode::Disp,
            (0xE, .., 0x9, 0xE) => Opcode::SkipKey,
            (0xE, .., 0xA, 0x1) => Opcode::SkipnKey,
            (0xF, .., 0x0, 0x7) => Opcode::MovXDelay,
            (0xF, .., 0x0, 0xA) => Opcode::MovKey,
            (0xF, .., 0x1, 0x5) => Opcode::MovDelayX,
            (0xF, .., 0x1, 0x8) => Opcode::MovSound,
            (0xF, .., 0x1, 0xE) => Opcode::AddIX,
            (0xF, .., 0x2, 0x9) => Opcode::SpritePos,
            (0xF, .., 0x3, 0x3) => Opcode::Movbcd,
            (0xF, .., 0x5, 0x5) => Opcode::MovmIX,
            (0xF, .., 0x6, 0x5) => Opcode::MovmXI,
            _ => Opcode::Unknown,
        }
    }

    /// The assembler mnemonic, shared with the disassembler. Several
    /// operations share a mnemonic and differ only in their operands.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Clear => "CLEAR",
            Opcode::Ret => "RET",
            Opcode::JmpNnn | Opcode::JmpV0Nnn => "JMP",
            Opcode::Call => "CALL",
            Opcode::SkipXKk | Opcode::SkipXY => "SKIP",
            Opcode::SkipnXKk | Opcode::SkipnXY => "SKIPN",
            Opcode::MviXKk | Opcode::MviINnn => "MVI",
            Opcode::AddXKk | Opcode::AddXY | Opcode::AddIX => "ADD",
            Opcode::MovXY
            | Opcode::MovXDelay
            | Opcode::MovKey
            | Opcode::MovDelayX
            | Opcode::MovSound => "MOV",
            Opcode::Or => "OR",
            Opcode::And => "AND",
            Opcode::Xor => "XOR",
            Opcode::Sub => "SUB",
            Opcode::Shr => "SHR",
            Opcode::Subn => "SUBN",
            Opcode::Shl => "SHL",
            Opcode::Rand => "RAND",
            Opcode::Disp => "DISP",
            Opcode::SkipKey => "SKIP_KEY",
            Opcode::SkipnKey => "SKIPN_KEY",
            Opcode::SpritePos => "SPRITE_POS",
            Opcode::Movbcd => "MOVBCD",
            Opcode::MovmIX | Opcode::MovmXI => "MOVM",
            Opcode::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod test_word {
    use super::*;

    #[test]
    fn test_nibbles() {
        let word: u16 = 0xABCD;
        assert_eq!(word.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        let word: u16 = 0xABCD;
        assert_eq!(word.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let word: u16 = 0xABCD;
        assert_eq!(word.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let word: u16 = 0xABCD;
        assert_eq!(word.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let word: u16 = 0xABCD;
        assert_eq!(word.kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        let word: u16 = 0xABCD;
        assert_eq!(word.addr(), 0x0BCD);
    }
}

#[cfg(test)]
mod test_decode {
    use super::*;

    #[test]
    fn test_fixed_function_class_0() {
        assert_eq!(Opcode::decode(0x00E0), Opcode::Clear);
        assert_eq!(Opcode::decode(0x00EE), Opcode::Ret);
    }

    #[test]
    fn test_address_classes() {
        assert_eq!(Opcode::decode(0x1ABC), Opcode::JmpNnn);
        assert_eq!(Opcode::decode(0x2ABC), Opcode::Call);
        assert_eq!(Opcode::decode(0xAABC), Opcode::MviINnn);
        assert_eq!(Opcode::decode(0xBABC), Opcode::JmpV0Nnn);
    }

    #[test]
    fn test_immediate_classes() {
        assert_eq!(Opcode::decode(0x31FF), Opcode::SkipXKk);
        assert_eq!(Opcode::decode(0x41FF), Opcode::SkipnXKk);
        assert_eq!(Opcode::decode(0x51F0), Opcode::SkipXY);
        assert_eq!(Opcode::decode(0x61FF), Opcode::MviXKk);
        assert_eq!(Opcode::decode(0x71FF), Opcode::AddXKk);
        assert_eq!(Opcode::decode(0x91F0), Opcode::SkipnXY);
        assert_eq!(Opcode::decode(0xC1FF), Opcode::Rand);
        assert_eq!(Opcode::decode(0xD125), Opcode::Disp);
    }

    #[test]
    fn test_alu_class_8() {
        assert_eq!(Opcode::decode(0x8120), Opcode::MovXY);
        assert_eq!(Opcode::decode(0x8121), Opcode::Or);
        assert_eq!(Opcode::decode(0x8122), Opcode::And);
        assert_eq!(Opcode::decode(0x8123), Opcode::Xor);
        assert_eq!(Opcode::decode(0x8124), Opcode::AddXY);
        assert_eq!(Opcode::decode(0x8125), Opcode::Sub);
        assert_eq!(Opcode::decode(0x8126), Opcode::Shr);
        assert_eq!(Opcode::decode(0x8127), Opcode::Subn);
        assert_eq!(Opcode::decode(0x812E), Opcode::Shl);
    }

    #[test]
    fn test_key_class_e() {
        assert_eq!(Opcode::decode(0xE19E), Opcode::SkipKey);
        assert_eq!(Opcode::decode(0xE1A1), Opcode::SkipnKey);
    }

    #[test]
    fn test_misc_class_f() {
        assert_eq!(Opcode::decode(0xF107), Opcode::MovXDelay);
        assert_eq!(Opcode::decode(0xF10A), Opcode::MovKey);
        assert_eq!(Opcode::decode(0xF115), Opcode::MovDelayX);
        assert_eq!(Opcode::decode(0xF118), Opcode::MovSound);
        assert_eq!(Opcode::decode(0xF11E), Opcode::AddIX);
        assert_eq!(Opcode::decode(0xF129), Opcode::SpritePos);
        assert_eq!(Opcode::decode(0xF133), Opcode::Movbcd);
        assert_eq!(Opcode::decode(0xF155), Opcode::MovmIX);
        assert_eq!(Opcode::decode(0xF165), Opcode::MovmXI);
    }

    #[test]
    fn test_unclaimed_words_are_unknown() {
        assert_eq!(Opcode::decode(0x0000), Opcode::Unknown);
        assert_eq!(Opcode::decode(0x00FF), Opcode::Unknown);
        assert_eq!(Opcode::decode(0x8128), Opcode::Unknown);
        assert_eq!(Opcode::decode(0x812F), Opcode::Unknown);
        assert_eq!(Opcode::decode(0xE19F), Opcode::Unknown);
        assert_eq!(Opcode::decode(0xF108), Opcode::Unknown);
        assert_eq!(Opcode::decode(0xFFFF), Opcode::Unknown);
    }
}
