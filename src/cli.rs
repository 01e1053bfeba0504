// Command-line interface for bbpack.
//
// Two subcommands mirroring the codec boundary: `pack` compresses a
// plain file into a standalone block, `unpack` extracts one compressed
// block from a container file (typically a ROM) at a given address.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::io::{self, IoError};

// ---------------------------------------------------------------------------
// Address parsing (accepts decimal and 0x-prefixed hex)
// ---------------------------------------------------------------------------

fn parse_address(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Raw/RLE/LZ codec for Battle B-Daman GBA data.
#[derive(Parser, Debug)]
#[command(
    name = "bbpack",
    version,
    about = "Compress and decompress Battle B-Daman GBA data blocks",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress a plain file.
    Pack(PackArgs),
    /// Decompress a packed block.
    Unpack(UnpackArgs),
}

#[derive(Args, Debug)]
struct PackArgs {
    /// Plain input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output packed file name.
    #[arg(short = 'o', long, default_value = "compressed.bin", value_hint = ValueHint::FilePath)]
    out_name: PathBuf,
}

#[derive(Args, Debug)]
struct UnpackArgs {
    /// Container file holding the compressed block.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Offset of the compressed block start (decimal or 0x hex).
    #[arg(short = 'a', long, default_value = "0", value_parser = parse_address)]
    address: u64,

    /// Output plain file name.
    #[arg(short = 'o', long, default_value = "decompressed.bin", value_hint = ValueHint::FilePath)]
    out_name: PathBuf,
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_pack(args: &PackArgs, quiet: bool) -> Result<(), IoError> {
    let stats = io::pack_file(&args.input, &args.out_name)?;
    if !quiet {
        eprintln!(
            "packed {} -> {} bytes ({} commands)",
            stats.plain_size, stats.packed_size, stats.commands
        );
    }
    Ok(())
}

fn cmd_unpack(args: &UnpackArgs, quiet: bool) -> Result<(), IoError> {
    let stats = io::unpack_file(&args.input, args.address, &args.out_name)?;
    if !quiet {
        eprintln!("Compressed block size was {:#X}", stats.packed_size);
        eprintln!(
            "unpacked {} -> {} bytes ({} commands)",
            stats.packed_size, stats.output_size, stats.commands
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();

    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match &cli.command {
        Cmd::Pack(args) => cmd_pack(args, cli.quiet),
        Cmd::Unpack(args) => cmd_unpack(args, cli.quiet),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("bbpack: {e}");
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parses_decimal_and_hex() {
        assert_eq!(parse_address("0"), Ok(0));
        assert_eq!(parse_address("4096"), Ok(4096));
        assert_eq!(parse_address("0x1000"), Ok(0x1000));
        assert_eq!(parse_address("0XFF"), Ok(0xFF));
        assert!(parse_address("banana").is_err());
        assert!(parse_address("0x").is_err());
    }

    #[test]
    fn cli_parses_pack_and_unpack() {
        let cli = Cli::try_parse_from(["bbpack", "pack", "in.bin", "-o", "out.bin"]).unwrap();
        match cli.command {
            Cmd::Pack(args) => assert_eq!(args.out_name, PathBuf::from("out.bin")),
            _ => panic!("expected pack"),
        }

        let cli =
            Cli::try_parse_from(["bbpack", "unpack", "rom.gba", "-a", "0x4F00", "-o", "x.bin"])
                .unwrap();
        match cli.command {
            Cmd::Unpack(args) => assert_eq!(args.address, 0x4F00),
            _ => panic!("expected unpack"),
        }
    }
}
