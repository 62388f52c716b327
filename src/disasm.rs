use std::fmt;

use crate::alu::{expression, render_pieces, Piece, Source};
use crate::fields::Fields;

/// Address-load cycles match [`LOAD_ADDRESS`] once bits 2 and 6 are
/// masked off; they only latch the jump address and the ALU is idle.
pub const LOAD_ADDRESS_MASK: u32 = 0xffbb;
pub const LOAD_ADDRESS: u32 = 0x0090;
pub const LOAD_ADDRESS_MARKER: &str = "address-load, no ALU operation";

const JUMP_BLANK: &str = "         ";

/// 2901 destination control, bits 6..4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    QReg,
    Nop,
    RamA,
    RamF,
    RamQD,
    RamD,
    RamQU,
    RamU,
}

impl Destination {
    pub const ALL: [Destination; 8] = [
        Destination::QReg,
        Destination::Nop,
        Destination::RamA,
        Destination::RamF,
        Destination::RamQD,
        Destination::RamD,
        Destination::RamQU,
        Destination::RamU,
    ];

    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 7) as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Destination::QReg => "QREG",
            Destination::Nop => "NOP",
            Destination::RamA => "RAMA",
            Destination::RamF => "RAMF",
            Destination::RamQD => "RAMQD",
            Destination::RamD => "RAMD",
            Destination::RamQU => "RAMQU",
            Destination::RamU => "RAMU",
        }
    }

    /// Left-hand side of the transfer, up to and including the opening
    /// parenthesis of the ALU expression.
    pub fn prefix(self, show_y: bool, a: u8, b: u8) -> String {
        render_pieces(PREFIXES[show_y as usize][self as usize], a, b)
    }
}

use Piece::{A, B, T};

// [show_y][destination]. The shifting destinations (RAMQD..RAMU) halve or
// double the result on its way into the register file.
static PREFIXES: [[&[Piece]; 8]; 2] = [
    [
        &[T("q = (")],
        &[T("y = (")],
        &[B, T(" = (")],
        &[B, T(" = (")],
        &[T("q = 1/2 * q, "), B, T(" = 1/2 * (")],
        &[B, T(" = 1/2 * (")],
        &[T("q = 2 * q, "), B, T(" = 2 * (")],
        &[B, T(" = 2 * (")],
    ],
    [
        &[T("y = q = (")],
        &[T("y = (")],
        &[T("y = "), A, T(", "), B, T(" = (")],
        &[T("y = "), B, T(" = (")],
        &[T("q = 1/2 * q, "), B, T(" = 1/2 * (y = ")],
        &[B, T(" = 1/2 * (y = ")],
        &[T("q = 2 * q, "), B, T(" = 2 * (y = ")],
        &[B, T(" = 2 * (y = ")],
    ],
];

/// One disassembled microcode word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub flags: String,
    pub jump: String,
    pub function: String,
    pub eos: bool,
    /// Jump address this word loads into the latch.
    pub load: Option<u8>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.flags, self.jump, self.function)
    }
}

/// `H`, `S` and `L` in fixed columns, blank when clear.
pub fn flag_letters(fields: &Fields) -> String {
    [(fields.h, 'H'), (fields.s, 'S'), (fields.l, 'L')]
        .iter()
        .map(|&(set, letter)| if set { letter } else { ' ' })
        .collect()
}

/// Jump column. Conditional jumps (`S` set) are parenthesized. `target`
/// is `None` when no address has been latched yet.
pub fn jump_column(fields: &Fields, target: Option<u16>) -> String {
    if !fields.j {
        return JUMP_BLANK.to_string();
    }

    let target = match target {
        Some(addr) => format!("{addr:03x}"),
        None => "???".to_string(),
    };

    if fields.s {
        format!(" (->{target}) ")
    } else {
        format!("  ->{target}  ")
    }
}

/// Register-transfer description of the ALU cycle.
pub fn function(fields: &Fields, word: u32) -> String {
    if word & LOAD_ADDRESS_MASK == LOAD_ADDRESS {
        return LOAD_ADDRESS_MARKER.to_string();
    }

    let op = |s: Source| expression(fields.function(), s, fields.a, fields.b, fields.c);
    let (high, low) = (fields.high_source(), fields.low_source());

    let mut ret = fields.destination().prefix(fields.show_y(), fields.a, fields.b);

    ret.push_str(&op(high));
    if fields.split_select() {
        ret.push_str(", ");
        ret.push_str(&op(low));
    }

    if fields.m {
        ret.push_str(" ? ");
        ret.push_str(&op(high.alternate()));
        if fields.split_select() {
            ret.push_str(", ");
            ret.push_str(&op(low.alternate()));
        }
    }

    ret.push(')');
    ret
}

/// Disassemble one word. `latch` is the address loaded by the most recent
/// `L` cycle, used when the word jumps without loading an address itself.
pub fn disasm_word(word: u32, latch: Option<u8>) -> Instruction {
    let fields = Fields::decode(word);
    let target = fields.jump.or(latch).map(u16::from);

    Instruction {
        flags: flag_letters(&fields),
        jump: jump_column(&fields, target),
        function: function(&fields, word),
        eos: fields.eos(),
        load: fields.jump,
    }
}
