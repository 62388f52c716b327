//! Symbolic rendering of the 2901 ALU.
//!
//! The function code picks the operation and the select code picks the
//! operand pair (`R` and `S` in the data sheet). Each of the 64
//! combinations maps to one template in [`TABLE`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// R + S
    Add,
    /// S - R
    SubR,
    /// R - S
    SubS,
    Or,
    And,
    /// !R & S
    NotRS,
    Exor,
    Exnor,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::Add,
        Function::SubR,
        Function::SubS,
        Function::Or,
        Function::And,
        Function::NotRS,
        Function::Exor,
        Function::Exnor,
    ];

    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 7) as usize]
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Function::Add => "ADD",
            Function::SubR => "SUBR",
            Function::SubS => "SUBS",
            Function::Or => "OR",
            Function::And => "AND",
            Function::NotRS => "NOTRS",
            Function::Exor => "EXOR",
            Function::Exnor => "EXNOR",
        }
    }
}

/// Operand pair feeding the ALU, named `RS` after the data sheet.
/// `Z` is the zero source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    AQ,
    AB,
    ZQ,
    ZB,
    ZA,
    DA,
    DQ,
    DZ,
}

impl Source {
    pub const ALL: [Source; 8] = [
        Source::AQ,
        Source::AB,
        Source::ZQ,
        Source::ZB,
        Source::ZA,
        Source::DA,
        Source::DQ,
        Source::DZ,
    ];

    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 7) as usize]
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Source taken on the other leg of the `M` multiplexer, which drives
    /// select bit 1.
    pub fn alternate(self) -> Self {
        Self::from_bits(self.bits() ^ 2)
    }
}

/// Building block of a rendered template: literal text or one of the
/// two register operands.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Piece {
    T(&'static str),
    A,
    B,
}

#[derive(Debug, Clone, Copy)]
enum Carry {
    /// `+ 1` with carry in.
    Increment,
    /// `- 1` without carry in.
    Decrement,
    Ignored,
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pieces: &'static [Piece],
    carry: Carry,
}

macro_rules! template {
    ($carry:ident; $($piece:expr),+) => {
        Template {
            pieces: &[$($piece),+],
            carry: Carry::$carry,
        }
    };
}

use Piece::{A, B, T};

pub(crate) fn render_pieces(pieces: &[Piece], a: u8, b: u8) -> String {
    let mut ret = String::new();
    for piece in pieces {
        match piece {
            T(text) => ret.push_str(text),
            A => ret.push_str(&format!("R{a:x}")),
            B => ret.push_str(&format!("R{b:x}")),
        }
    }
    ret
}

/// Indexed by `[function][source]`.
///
/// In the EXNOR row the `DA` and `DQ` entries render with `&` instead of
/// `^`. That is how the reference tables read and it is kept as is: it
/// may be real hardware behavior or a transcription slip.
pub static TABLE: [[Template; 8]; 8] = [
    // ADD
    [
        template!(Increment; A, T(" + q")),
        template!(Increment; A, T(" + "), B),
        template!(Increment; T("q")),
        template!(Increment; B),
        template!(Increment; A),
        template!(Increment; T("d + "), A),
        template!(Increment; T("d + q")),
        template!(Increment; T("d")),
    ],
    // SUBR
    [
        template!(Decrement; T("q - "), A),
        template!(Decrement; B, T(" - "), A),
        template!(Decrement; T("q")),
        template!(Decrement; B),
        template!(Decrement; A),
        template!(Decrement; A, T(" - d")),
        template!(Decrement; T("q - d")),
        template!(Decrement; T("-d")),
    ],
    // SUBS
    [
        template!(Decrement; A, T(" - q")),
        template!(Decrement; A, T(" - "), B),
        template!(Decrement; T("-q")),
        template!(Decrement; T("-"), B),
        template!(Decrement; T("-"), A),
        template!(Decrement; T("d - "), A),
        template!(Decrement; T("d - q")),
        template!(Decrement; T("d")),
    ],
    // OR
    [
        template!(Ignored; A, T(" | q")),
        template!(Ignored; A, T(" | "), B),
        template!(Ignored; T("q")),
        template!(Ignored; B),
        template!(Ignored; A),
        template!(Ignored; T("d | "), A),
        template!(Ignored; T("d | q")),
        template!(Ignored; T("d")),
    ],
    // AND
    [
        template!(Ignored; A, T(" & q")),
        template!(Ignored; A, T(" & "), B),
        template!(Ignored; T("0")),
        template!(Ignored; T("0")),
        template!(Ignored; T("0")),
        template!(Ignored; T("d & "), A),
        template!(Ignored; T("d & q")),
        template!(Ignored; T("0")),
    ],
    // NOTRS
    [
        template!(Ignored; T("!"), A, T(" & q")),
        template!(Ignored; T("!"), A, T(" & "), B),
        template!(Ignored; T("q")),
        template!(Ignored; B),
        template!(Ignored; A),
        template!(Ignored; T("!d & "), A),
        template!(Ignored; T("!d & q")),
        template!(Ignored; T("0")),
    ],
    // EXOR
    [
        template!(Ignored; A, T(" ^ q")),
        template!(Ignored; A, T(" ^ "), B),
        template!(Ignored; T("q")),
        template!(Ignored; B),
        template!(Ignored; A),
        template!(Ignored; T("d ^ "), A),
        template!(Ignored; T("d ^ q")),
        template!(Ignored; T("d")),
    ],
    // EXNOR
    [
        template!(Ignored; T("!"), A, T(" ^ q")),
        template!(Ignored; T("!"), A, T(" ^ "), B),
        template!(Ignored; T("!q")),
        template!(Ignored; T("!"), B),
        template!(Ignored; T("!"), A),
        template!(Ignored; T("!d & "), A),
        template!(Ignored; T("!d & q")),
        template!(Ignored; T("!d")),
    ],
];

impl Template {
    pub fn lookup(f: Function, s: Source) -> &'static Template {
        &TABLE[f as usize][s as usize]
    }

    pub fn render(&self, a: u8, b: u8, carry: bool) -> String {
        let mut ret = render_pieces(self.pieces, a, b);
        match (self.carry, carry) {
            (Carry::Increment, true) => ret.push_str(" + 1"),
            (Carry::Decrement, false) => ret.push_str(" - 1"),
            _ => {}
        }
        ret
    }
}

/// Render one ALU operation, e.g. `R3 + q + 1`.
pub fn expression(f: Function, s: Source, a: u8, b: u8, carry: bool) -> String {
    Template::lookup(f, s).render(a, b, carry)
}
