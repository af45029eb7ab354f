//! Provides workflows in the [cargo-xtask][cargo-xtask] pattern.
//!
//! [cargo-xtask]: https://github.com/matklad/cargo-xtask

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use stepcbor::{Config, Decoder, Feeder, IoDebugListener, NegativeIntMapping, Status};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use xshell::{cmd, Shell};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints the decoder events for a CBOR file, one per line.
    Dump {
        /// CBOR file to decode
        path: PathBuf,
        /// The file contains hex digits instead of binary data
        #[arg(long)]
        hex: bool,
        /// Feed the decoder this many bytes at a time
        #[arg(long, default_value_t = 4096)]
        chunk_size: usize,
        /// Map negative integers to `-argument`
        #[arg(long)]
        legacy_negative: bool,
        /// Maximum byte string or text string length
        #[arg(long, env = "STEPCBOR_MAX_PAYLOAD_LEN", default_value_t = stepcbor::DEFAULT_MAX_PAYLOAD_LEN)]
        max_payload_len: usize,
        /// Reject text strings which are not UTF-8
        #[arg(long)]
        validate_text: bool,
    },
    /// Runs the checks done in continuous integration.
    Ci,
}

#[derive(Debug, Clone, Copy, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
enum Check {
    Fmt,
    Clippy,
    Test,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Dump {
            path,
            hex,
            chunk_size,
            legacy_negative,
            max_payload_len,
            validate_text,
        } => {
            let negative_ints = if legacy_negative {
                NegativeIntMapping::Legacy
            } else {
                NegativeIntMapping::Standard
            };
            let config = Config::new()
                .with_max_payload_len(max_payload_len)
                .with_validate_text(validate_text)
                .with_negative_ints(negative_ints);
            dump(&path, hex, chunk_size, config)
        }
        Commands::Ci => {
            let sh = Shell::new()?;
            sh.change_dir(project_root()?);
            for check in Check::iter() {
                eprintln!("running {check}");
                run_check(&sh, check)?;
            }
            Ok(())
        }
    }
}

fn dump(path: &Path, hex: bool, chunk_size: usize, config: Config) -> anyhow::Result<()> {
    if chunk_size == 0 {
        bail!("chunk size must be at least 1");
    }

    let contents = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let input = if hex {
        decode_hex(&contents)?
    } else {
        contents
    };

    let listener = IoDebugListener::from_io(io::stdout().lock());
    let mut feeder = Feeder::new(Decoder::with_config(listener, config));

    let mut status = Status::Suspended(1);
    for chunk in input.chunks(chunk_size) {
        status = feeder.feed(chunk);
        if status == Status::Errored {
            break;
        }
    }

    let errored = status == Status::Errored;
    let truncated = !errored && !feeder.is_idle();
    let pending = feeder.pending_input().len();
    feeder
        .into_decoder()
        .into_listener()
        .finish_io()
        .context("writing events")?;

    if errored {
        bail!("decoding failed");
    }
    if truncated {
        bail!("input ends inside a data item ({pending} bytes unconsumed)");
    }
    Ok(())
}

/// Decodes hex digits, ignoring whitespace.
fn decode_hex(contents: &[u8]) -> anyhow::Result<Vec<u8>> {
    let digits = contents
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect::<Vec<u8>>();
    hex::decode(digits).context("invalid hex input")
}

fn run_check(sh: &Shell, check: Check) -> anyhow::Result<()> {
    match check {
        Check::Fmt => cmd!(sh, "cargo fmt --all -- --check").run()?,
        Check::Clippy => cmd!(sh, "cargo clippy --workspace --all-targets --all-features").run()?,
        Check::Test => {
            cmd!(sh, "cargo test --workspace --all-features").run()?;
            cmd!(sh, "cargo test -p stepcbor --no-default-features").run()?;
        }
    }
    Ok(())
}

/// Returns the project root directory.
fn project_root() -> anyhow::Result<PathBuf> {
    let dir =
        env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_owned());
    PathBuf::from(dir)
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() -> anyhow::Result<()> {
        assert_eq!(decode_hex(b"83 01\n0A ff")?, [0x83, 0x01, 0x0a, 0xff]);
        assert!(decode_hex(b"8").is_err());
        assert!(decode_hex(b"zz").is_err());
        assert!(decode_hex(b"").is_ok_and(|bytes| bytes.is_empty()));
        Ok(())
    }

    #[test]
    fn test_check_names() {
        let names = Check::iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["fmt", "clippy", "test"]);
    }
}
