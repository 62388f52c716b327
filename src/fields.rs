//! Control fields of a math box microcode word.
//!
//! Bit layout of the 24-bit word (bit 0 is the least significant):
//!
//! ```text
//!  23..20  19..16  15..12  11  10..8  7   6..4  3  2  1  0
//!  a       b       s       H   f      L   d     S  J  M  C
//! ```
//!
//! When `L` is set, bits 23..16 double as a jump address.

use crate::alu::{Function, Source};
use crate::disasm::Destination;

/// Only the low 24 bits of a word are driven by the ROMs.
pub const WORD_MASK: u32 = 0xff_ffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub a: u8,
    pub b: u8,
    pub f: u8,
    pub sh: u8,
    pub sl: u8,
    pub d: u8,
    pub h: bool,
    pub s: bool,
    pub l: bool,
    pub j: bool,
    pub m: bool,
    pub c: bool,
    pub jump: Option<u8>,
}

impl Fields {
    pub fn decode(word: u32) -> Self {
        let word = word & WORD_MASK;
        let l = word & 0x000080 != 0;

        Self {
            a: ((word >> 20) & 0x0f) as u8,
            b: ((word >> 16) & 0x0f) as u8,
            f: ((word >> 8) & 0x07) as u8,
            sh: high_select(word),
            sl: ((word >> 12) & 0x07) as u8,
            d: ((word >> 4) & 0x07) as u8,
            h: word & 0x000800 != 0,
            s: word & 0x000008 != 0,
            l,
            j: word & 0x000004 != 0,
            m: word & 0x000002 != 0,
            c: word & 0x000001 != 0,
            jump: l.then_some((word >> 16) as u8),
        }
    }

    /// Last cycle of a sequence: halt, or an unconditional jump.
    pub fn eos(&self) -> bool {
        self.h || (self.j && !self.s)
    }

    /// Whether the ALU output `y` is latched, which changes how the
    /// destination is written.
    pub fn show_y(&self) -> bool {
        self.h || (self.j && self.s)
    }

    pub fn function(&self) -> Function {
        Function::from_bits(self.f)
    }

    pub fn high_source(&self) -> Source {
        Source::from_bits(self.sh)
    }

    pub fn low_source(&self) -> Source {
        Source::from_bits(self.sl)
    }

    pub fn destination(&self) -> Destination {
        Destination::from_bits(self.d)
    }

    /// The two source selects differ when bit 15 and bit 14 disagree.
    pub fn split_select(&self) -> bool {
        self.sh != self.sl
    }
}

// Bit 14 is left out and bit 15 is folded down into its place, so the
// upper select sees bit 15 where the lower one sees bit 14. Whether the
// board really shares the line this way or this is an artifact of how
// the ROMs were traced is unknown; keep it exactly as is.
fn high_select(word: u32) -> u8 {
    let sh = ((word >> 12) & 0x0b) as u8;
    if sh > 7 {
        sh - 4
    } else {
        sh
    }
}
