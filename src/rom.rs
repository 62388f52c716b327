//! Math box ROM set.
//!
//! The microcode is spread over six 256x4 PROMs, each holding one nibble
//! of the 24-bit word. A separate 32-byte PROM maps dispatch codes to
//! entry addresses.

use std::fs::File;
use std::io::{self, Read as _};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const WORDS: usize = 256;
pub const DISPATCH_CODES: usize = 32;
pub const NIBBLE_ROMS: usize = 6;

pub const DISPATCH_ROM: &str = "036174-01.b1";

/// Least significant nibble first.
pub const UCODE_ROMS: [&str; NIBBLE_ROMS] = [
    "036175-01.m1",
    "036176-01.l1",
    "036177-01.k1",
    "036178-01.j1",
    "036179-01.h1",
    "036180-01.f1",
];

#[derive(Debug, Error)]
pub enum RomError {
    #[error("error opening {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("error reading {name}: expected {expected} bytes")]
    Read {
        name: String,
        expected: usize,
        #[source]
        source: io::Error,
    },
}

impl RomError {
    pub fn name(&self) -> &str {
        match self {
            RomError::Open { name, .. } | RomError::Read { name, .. } => name,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RomError::Open { .. } => 2,
            RomError::Read { .. } => 3,
        }
    }
}

/// Microcode words plus the dispatch code targeting each address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    words: [u32; WORDS],
    entries: [Option<u8>; WORDS],
}

impl Image {
    /// Interleave the nibble ROMs and index the dispatch table. If two
    /// codes target the same address the later code wins.
    pub fn from_parts(dispatch: &[u8; DISPATCH_CODES], roms: &[[u8; WORDS]; NIBBLE_ROMS]) -> Self {
        let mut words = [0; WORDS];
        for (i, rom) in roms.iter().enumerate() {
            for (word, &byte) in words.iter_mut().zip(rom) {
                *word |= (byte as u32) << (i * 4);
            }
        }

        let mut entries = [None; WORDS];
        for (code, &addr) in dispatch.iter().enumerate() {
            entries[addr as usize] = Some(code as u8);
        }

        Self { words, entries }
    }

    pub fn words(&self) -> &[u32; WORDS] {
        &self.words
    }

    pub fn word(&self, addr: u8) -> u32 {
        self.words[addr as usize]
    }

    /// Dispatch code whose entry point is `addr`, if any.
    pub fn entry(&self, addr: u8) -> Option<u8> {
        self.entries[addr as usize]
    }

    pub fn entry_count(&self) -> usize {
        self.entries.iter().flatten().count()
    }
}

/// Where to find the ROM files.
#[derive(Debug, Clone)]
pub struct RomSet {
    pub dir: PathBuf,
    pub dispatch: String,
    pub ucode: [String; NIBBLE_ROMS],
}

impl Default for RomSet {
    fn default() -> Self {
        Self::new(".")
    }
}

impl RomSet {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            dispatch: DISPATCH_ROM.to_string(),
            ucode: UCODE_ROMS.map(String::from),
        }
    }

    pub fn load(&self) -> Result<Image, RomError> {
        let dispatch = self.read_rom::<DISPATCH_CODES>(&self.dispatch)?;

        let mut roms = [[0; WORDS]; NIBBLE_ROMS];
        for (rom, name) in roms.iter_mut().zip(&self.ucode) {
            *rom = self.read_rom::<WORDS>(name)?;
        }

        let image = Image::from_parts(&dispatch, &roms);
        log::info!(
            "Loaded ROM set from {}: {} words, {} entry points",
            self.dir.display(),
            WORDS,
            image.entry_count()
        );
        Ok(image)
    }

    /// Read the first `N` bytes of a ROM; anything past that is ignored.
    fn read_rom<const N: usize>(&self, name: &str) -> Result<[u8; N], RomError> {
        let path = self.dir.join(name);
        let mut file = File::open(&path).map_err(|source| RomError::Open {
            name: name.to_string(),
            source,
        })?;

        let mut buf = [0; N];
        file.read_exact(&mut buf).map_err(|source| RomError::Read {
            name: name.to_string(),
            expected: N,
            source,
        })?;

        log::debug!("Read {} bytes from {}", N, path.display());
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_roms() -> [[u8; WORDS]; NIBBLE_ROMS] {
        [[0; WORDS]; NIBBLE_ROMS]
    }

    #[test]
    fn test_nibble_interleave() {
        let mut roms = blank_roms();
        for (i, rom) in roms.iter_mut().enumerate() {
            rom[7] = i as u8 + 1;
        }
        let image = Image::from_parts(&[0; DISPATCH_CODES], &roms);
        assert_eq!(image.word(7), 0x654321);
        assert_eq!(image.word(6), 0);
    }

    #[test]
    fn test_wide_bytes_are_ored() {
        let mut roms = blank_roms();
        roms[0][0] = 0xff;
        roms[1][0] = 0x01;
        let image = Image::from_parts(&[0; DISPATCH_CODES], &roms);
        assert_eq!(image.word(0), 0xff | 0x10);
    }

    #[test]
    fn test_dispatch_last_code_wins() {
        let mut dispatch = [0u8; DISPATCH_CODES];
        for (code, addr) in dispatch.iter_mut().enumerate() {
            *addr = (code * 4) as u8;
        }
        dispatch[31] = 8;
        let image = Image::from_parts(&dispatch, &blank_roms());

        assert_eq!(image.entry(0), Some(0));
        assert_eq!(image.entry(4), Some(1));
        assert_eq!(image.entry(8), Some(31));
        assert_eq!(image.entry(124), None);
        assert_eq!(image.entry(1), None);
        assert_eq!(image.entry_count(), 31);
    }

    #[test]
    fn test_error_exit_codes() {
        let open = RomError::Open {
            name: DISPATCH_ROM.to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let read = RomError::Read {
            name: UCODE_ROMS[2].to_string(),
            expected: WORDS,
            source: io::Error::from(io::ErrorKind::UnexpectedEof),
        };
        assert_eq!(open.exit_code(), 2);
        assert_eq!(read.exit_code(), 3);
        assert_eq!(open.name(), "036174-01.b1");
        assert!(read.to_string().contains("036177-01.k1"));
    }

    #[test]
    fn test_default_names() {
        let set = RomSet::default();
        assert_eq!(set.dir, PathBuf::from("."));
        assert_eq!(set.dispatch, DISPATCH_ROM);
        assert_eq!(set.ucode[5], "036180-01.f1");
    }
}
