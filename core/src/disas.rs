//! Textual rendering of instruction words for the disassembler and for
//! execution tracing.

use crate::opcode::{Opcode, Word};

/// Renders the operand list of a word in assembly-listing form.
///
/// Registers print as `vX`, immediates as bare hex, and the special
/// machine resources by name (`I`, `DELAY`, `SOUND`, `KEY`).
fn format_operands(word: u16) -> String {
    match Opcode::decode(word) {
        Opcode::Clear | Opcode::Ret | Opcode::Unknown => String::new(),
        Opcode::JmpNnn | Opcode::Call => format!("{:03x}", word.addr()),
        Opcode::SkipXKk
        | Opcode::SkipnXKk
        | Opcode::MviXKk
        | Opcode::AddXKk
        | Opcode::Rand => format!("v{:01x}, {:02x}", word.x(), word.kk()),
        Opcode::SkipXY
        | Opcode::MovXY
        | Opcode::Or
        | Opcode::And
        | Opcode::Xor
        | Opcode::AddXY
        | Opcode::Sub
        | Opcode::Shr
        | Opcode::Subn
        | Opcode::Shl
        | Opcode::SkipnXY => format!("v{:01x}, v{:01x}", word.x(), word.y()),
        Opcode::Disp => format!("v{:01x}, v{:01x}, {:01x}", word.x(), word.y(), word.n()),
        Opcode::SkipKey | Opcode::SkipnKey => format!("v{:01x}", word.x()),
        Opcode::MviINnn => format!("I, {:03x}", word.addr()),
        Opcode::JmpV0Nnn => format!("v0, {:03x}", word.addr()),
        Opcode::MovXDelay => format!("v{:01x}, DELAY", word.x()),
        Opcode::MovKey => format!("v{:01x}, KEY", word.x()),
        Opcode::MovDelayX => format!("DELAY, v{:01x}", word.x()),
        Opcode::MovSound => format!("SOUND, v{:01x}", word.x()),
        Opcode::AddIX | Opcode::SpritePos | Opcode::Movbcd | Opcode::MovmIX => {
            format!("I, v{:01x}", word.x())
        }
        Opcode::MovmXI => format!("v{:01x}, I", word.x()),
    }
}

/// One line of disassembly listing: address, raw word, mnemonic, operands.
pub fn format_instruction(pc: u16, word: u16) -> String {
    format!(
        "{:04x} {:04x} {} {}",
        pc,
        word,
        Opcode::decode(word).mnemonic(),
        format_operands(word)
    )
}

/// Bit string of `v`, least significant bit first.
fn to_binary(v: u16, bits: u32) -> String {
    (0..bits).map(|i| if v >> i & 1 == 1 { '1' } else { '0' }).collect()
}

/// Field-by-field breakdown of a word, for the `--debug` listing.
pub fn format_fields(word: u16) -> String {
    let fields: [(&str, u16, u32); 7] = [
        ("word", word, 16),
        ("u", u16::from(word.nibbles().0), 8),
        ("nnn", word.addr(), 16),
        ("x", u16::from(word.x()), 8),
        ("y", u16::from(word.y()), 8),
        ("n", u16::from(word.n()), 8),
        ("kk", u16::from(word.kk()), 8),
    ];

    let mut out = String::new();
    for (name, value, bits) in fields.iter() {
        out.push_str(&format!(
            "{:<7} | hex = [{:04x}], bin = [{}]\n",
            name,
            value,
            to_binary(*value, *bits)
        ));
    }
    out
}

#[cfg(test)]
mod test_disas {
    use super::*;

    #[test]
    fn test_no_operand_forms() {
        assert_eq!(format_instruction(0x200, 0x00E0), "0200 00e0 CLEAR ");
        assert_eq!(format_instruction(0x202, 0x00EE), "0202 00ee RET ");
        assert_eq!(format_instruction(0x204, 0xFFFF), "0204 ffff UNKNOWN ");
    }

    #[test]
    fn test_address_forms() {
        assert_eq!(format_instruction(0x200, 0x1ABC), "0200 1abc JMP abc");
        assert_eq!(format_instruction(0x200, 0x2ABC), "0200 2abc CALL abc");
        assert_eq!(format_instruction(0x200, 0xAABC), "0200 aabc MVI I, abc");
        assert_eq!(format_instruction(0x200, 0xBABC), "0200 babc JMP v0, abc");
    }

    #[test]
    fn test_immediate_forms() {
        assert_eq!(format_instruction(0x200, 0x31FE), "0200 31fe SKIP v1, fe");
        assert_eq!(format_instruction(0x200, 0x41FE), "0200 41fe SKIPN v1, fe");
        assert_eq!(format_instruction(0x200, 0x61FE), "0200 61fe MVI v1, fe");
        assert_eq!(format_instruction(0x200, 0x71FE), "0200 71fe ADD v1, fe");
        assert_eq!(format_instruction(0x200, 0xC1FE), "0200 c1fe RAND v1, fe");
    }

    #[test]
    fn test_register_pair_forms() {
        assert_eq!(format_instruction(0x200, 0x5120), "0200 5120 SKIP v1, v2");
        assert_eq!(format_instruction(0x200, 0x8124), "0200 8124 ADD v1, v2");
        assert_eq!(format_instruction(0x200, 0x8126), "0200 8126 SHR v1, v2");
        assert_eq!(format_instruction(0x200, 0x9120), "0200 9120 SKIPN v1, v2");
    }

    #[test]
    fn test_special_resource_forms() {
        assert_eq!(format_instruction(0x200, 0xD125), "0200 d125 DISP v1, v2, 5");
        assert_eq!(format_instruction(0x200, 0xE19E), "0200 e19e SKIP_KEY v1");
        assert_eq!(format_instruction(0x200, 0xE1A1), "0200 e1a1 SKIPN_KEY v1");
        assert_eq!(format_instruction(0x200, 0xF107), "0200 f107 MOV v1, DELAY");
        assert_eq!(format_instruction(0x200, 0xF10A), "0200 f10a MOV v1, KEY");
        assert_eq!(format_instruction(0x200, 0xF115), "0200 f115 MOV DELAY, v1");
        assert_eq!(format_instruction(0x200, 0xF118), "0200 f118 MOV SOUND, v1");
        assert_eq!(format_instruction(0x200, 0xF11E), "0200 f11e ADD I, v1");
        assert_eq!(format_instruction(0x200, 0xF129), "0200 f129 SPRITE_POS I, v1");
        assert_eq!(format_instruction(0x200, 0xF133), "0200 f133 MOVBCD I, v1");
        assert_eq!(format_instruction(0x200, 0xF155), "0200 f155 MOVM I, v1");
        assert_eq!(format_instruction(0x200, 0xF165), "0200 f165 MOVM v1, I");
    }

    #[test]
    fn test_binary_is_least_significant_bit_first() {
        assert_eq!(to_binary(0x1, 8), "10000000");
        assert_eq!(to_binary(0x80, 8), "00000001");
        assert_eq!(to_binary(0x8001, 16), "1000000000000001");
    }

    #[test]
    fn test_field_breakdown() {
        let dump = format_fields(0xD125);
        assert!(dump.contains("word    | hex = [d125], bin = ["));
        assert!(dump.contains("u       | hex = [000d]"));
        assert!(dump.contains("nnn     | hex = [0125]"));
        assert!(dump.contains("x       | hex = [0001]"));
        assert!(dump.contains("y       | hex = [0002]"));
        assert!(dump.contains("n       | hex = [0005]"));
        assert!(dump.contains("kk      | hex = [0025]"));
    }
}
