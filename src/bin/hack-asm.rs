use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hack_asm::assembler::{hack_path, translate};
use hack_asm::Tables;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble Hack assembly into .hack machine code"
)]
struct Opts {
    /// Input assembly file
    #[arg(value_name = "ASMFILE", required_unless_present = "dump_tables")]
    input: Option<PathBuf>,
    /// Output file (default: input with a .hack extension, overwritten if present)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Directory holding symbols.txt, dest.txt, comp.txt and jump.txt
    #[arg(long, value_name = "DIR")]
    tables: Option<PathBuf>,
    /// Print the loaded lookup tables as JSON and exit
    #[arg(long)]
    dump_tables: bool,
    /// Print the final symbol table after assembling
    #[arg(long)]
    symbols: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let tables = match &opts.tables {
        Some(dir) => Tables::load_dir(dir)
            .with_context(|| format!("loading tables from {}", dir.display()))?,
        None => Tables::builtin().context("loading built-in tables")?,
    };

    if opts.dump_tables {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    let input = opts.input.context("no input file given")?;
    let output = opts.output.unwrap_or_else(|| hack_path(&input));

    let source = fs::File::open(&input)
        .with_context(|| format!("opening {}", input.display()))?;
    // Encode into memory first so a failed run leaves no output file behind.
    let mut out = Vec::new();
    let program = translate(source, &mut out, &tables)
        .with_context(|| format!("assembling {}", input.display()))?;
    fs::write(&output, &out).with_context(|| format!("writing {}", output.display()))?;

    if opts.symbols {
        for (name, addr) in program.symbols.sorted() {
            println!("{addr:>5}  {name}");
        }
    }
    eprintln!("{} -> {} ({} words)", input.display(), output.display(), program.len());
    Ok(())
}
