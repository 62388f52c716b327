use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mathbox_disasm::{
    disasm::disasm_word,
    fields::{Fields, WORD_MASK},
    listing::write_listing,
    rom::RomSet,
};

#[derive(Parser, Debug)]
#[command(name = "mathbox-disasm")]
#[command(about = "Atari math box microcode disassembler", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble the whole microcode ROM set
    Listing {
        /// Directory holding the ROM images
        #[arg(long, default_value = ".")]
        rom_dir: PathBuf,

        /// Write the listing here instead of stdout
        output: Option<PathBuf>,
    },
    /// Disassemble individual words given in hex
    Word {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn listing(rom_dir: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let image = match RomSet::new(&rom_dir).load() {
        Ok(image) => image,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_listing(&mut out, &image)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            write_listing(&mut out, &image)?;
        }
    }

    Ok(())
}

/// Hex word with an optional `0x` or `0X` prefix.
fn parse_word(text: &str) -> anyhow::Result<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let word =
        u32::from_str_radix(digits, 16).with_context(|| format!("invalid word: {text}"))?;
    if word > WORD_MASK {
        anyhow::bail!("word wider than 24 bits: {text}");
    }
    Ok(word)
}

fn word(words: &[String]) -> anyhow::Result<()> {
    for text in words {
        let word = parse_word(text)?;

        let fields = Fields::decode(word);
        let sources = if fields.split_select() {
            format!("{:?}/{:?}", fields.high_source(), fields.low_source())
        } else {
            format!("{:?}", fields.high_source())
        };

        println!(
            "{word:06x}  {}  ; {} {} {}",
            disasm_word(word, None),
            fields.function().mnemonic(),
            sources,
            fields.destination().mnemonic()
        );
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    // clap reports usage errors with status 2, which is taken by ROM open
    // failures here.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    match args.command {
        Command::Listing { rom_dir, output } => listing(rom_dir, output),
        Command::Word { words } => word(&words),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_prefixes() {
        assert_eq!(parse_word("350031").unwrap(), 0x350031);
        assert_eq!(parse_word("0x12").unwrap(), 0x12);
        assert_eq!(parse_word("0X12").unwrap(), 0x12);
        assert_eq!(parse_word("ffffff").unwrap(), WORD_MASK);
    }

    #[test]
    fn test_parse_word_rejects() {
        assert!(parse_word("0x0x12").is_err());
        assert!(parse_word("1000000").is_err());
        assert!(parse_word("xyz").is_err());
        assert!(parse_word("").is_err());
    }

    #[test]
    fn test_args_require_command() {
        assert!(Args::try_parse_from(["mathbox-disasm"]).is_err());
        assert!(Args::try_parse_from(["mathbox-disasm", "word"]).is_err());
        assert!(Args::try_parse_from(["mathbox-disasm", "--bogus"]).is_err());
        assert!(Args::try_parse_from(["mathbox-disasm", "listing", "--rom-dir", "roms"]).is_ok());
    }
}
