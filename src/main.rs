use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// File of newline-terminated `name;value` rows.
    input: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut out = BufWriter::new(io::stdout().lock());
    pipeline::run(&args.input, pipeline::default_workers(), &mut out)?;
    out.flush()?;

    Ok(())
}
