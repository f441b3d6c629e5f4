use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use optablegen::layout::ColumnLayout;
use optablegen::render::{render, TableFormat, TableSelection};
use optablegen::table::OpcodeTable;

#[derive(Parser)]
#[command(
    about = "Generates instruction length and mnemonic tables from an opcode listing",
    long_about = None)]
struct Args {
    /// Opcode listing to read.
    #[arg(default_value = "65xx Opcode List.txt")]
    filename: String,

    /// Output format
    #[arg(short, long, default_value_t = TableFormat::C, value_enum)]
    format: TableFormat,

    /// Table(s) to emit
    #[arg(short, long, default_value_t = TableSelection::All, value_enum)]
    table: TableSelection,

    /// Write tables to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Report skipped lines on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Fail on malformed lines instead of skipping them
    #[arg(long)]
    strict: bool,
}

fn summary(table: &OpcodeTable) -> String {
    format!(
        "{} instructions, {} lines skipped",
        table.len(),
        table.skipped().len()
    )
}

fn main() -> Result<()> {
    let args = Args::parse();

    let f = fs::read(&args.filename).with_context(|| format!("Cannot read {}", args.filename))?;
    let table = OpcodeTable::parse_bytes(&f, &ColumnLayout::OPCODE_LIST_65XX, args.strict)
        .with_context(|| format!("Cannot build tables from {}", args.filename))?;

    if args.verbose {
        for skipped in table.skipped() {
            eprintln!("{} {}", "Skipped".yellow(), skipped);
        }
        eprintln!("{}: {}", args.filename.green(), summary(&table));
    }

    let out = render(&table, args.format, args.table)?;
    match args.output {
        Some(filename) => {
            fs::write(&filename, out).with_context(|| format!("Cannot write {}", filename))?
        }
        None => print!("{}", out),
    }
    Ok(())
}
