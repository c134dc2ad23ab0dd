//! Command line driver: `minic <input> [-o <output>]`.
//!
//! Reads the input file, compiles it and writes the IR next to it (with an `.ll`
//! extension) unless an output path is given. Logging is controlled with `RUST_LOG`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use console::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    input: PathBuf,
    output: PathBuf,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut input = None;
        let mut output = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => match args.next() {
                    Some(path) => output = Some(PathBuf::from(path)),
                    None => bail!("missing value for {}", arg),
                },
                _ if input.is_none() => input = Some(PathBuf::from(arg)),
                _ => bail!("unexpected argument `{}`", arg),
            }
        }

        let input = match input {
            Some(input) => input,
            None => bail!("usage: minic <input> [-o <output>]"),
        };
        let output = output.unwrap_or_else(|| input.with_extension("ll"));
        Ok(Self { input, output })
    }
}

fn run() -> Result<()> {
    let args = Args::parse(env::args().skip(1))?;

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let ir = minic::compile(&source).with_context(|| format!("failed to compile {}", args.input.display()))?;
    fs::write(&args.output, ir).with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(input = %args.input.display(), output = %args.output.display(), "compiled");
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(err) = run() {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        process::exit(1);
    }
}
