use anyhow::Result;
use clap::Parser;
use kb_tools::{convert, init_logging};
use libthai_core::ValidationMode;
use std::path::PathBuf;

/// Validate a JSON or TOML knowledge base and write its bincode form.
#[derive(Parser)]
#[command(name = "convert_kb", version)]
struct Args {
    /// knowledge base to convert (.json or .toml)
    #[arg(long)]
    input: PathBuf,

    /// bincode output path
    #[arg(long, default_value = "thai.bincode")]
    out: PathBuf,

    /// keep consonants without a class instead of rejecting the file
    #[arg(long)]
    lenient: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mode = if args.lenient {
        ValidationMode::Lenient
    } else {
        ValidationMode::Strict
    };
    let summary = convert(&args.input, &args.out, mode)?;

    println!("{summary}");
    println!("Wrote {}", args.out.display());
    Ok(())
}
