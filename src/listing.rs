use std::io::{self, Write};

use crate::disasm::disasm_word;
use crate::rom::Image;

pub const HEADER: &str = concat!(
    "                          jump\n",
    "entry  addr   hex    hsl  addr   function\n",
    "-----  ----  ------  ---  -----  ---------------------------------\n",
);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub sequences: usize,
}

/// Write the full listing of `image`, one row per address with a blank
/// line after the last cycle of each sequence.
pub fn write_listing(out: &mut impl Write, image: &Image) -> io::Result<Summary> {
    out.write_all(HEADER.as_bytes())?;

    let mut summary = Summary::default();
    let mut latch = None;

    for (addr, &word) in image.words().iter().enumerate() {
        let addr = addr as u8;
        let instr = disasm_word(word, latch);
        if instr.load.is_some() {
            latch = instr.load;
        }

        match image.entry(addr) {
            Some(code) => write!(out, "{code:03x}->  ")?,
            None => write!(out, "       ")?,
        }
        writeln!(out, "{addr:03x}:  {word:06x}  {instr}")?;
        summary.rows += 1;

        if instr.eos {
            writeln!(out)?;
            summary.sequences += 1;
        }
    }

    log::info!(
        "Listed {} words in {} sequences",
        summary.rows,
        summary.sequences
    );
    Ok(summary)
}
