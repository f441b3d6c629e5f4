use anyhow::Result;
use itertools::Itertools;
use serde::Serialize;
use strum::Display;

use crate::mnemonic::NEWLINE_ESCAPE;
use crate::table::{InstructionDescription, OpcodeTable};

/// Output language of the generated tables
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum TableFormat {
    /// Sparse designated-initializer C arrays
    C,
    /// Dense Rust const arrays
    Rust,
    /// JSON array of instruction descriptions
    Json,
}

/// Which of the tables to emit
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum TableSelection {
    Size,
    Mnemonic,
    All,
}

impl TableSelection {
    fn size(&self) -> bool {
        matches!(self, Self::Size | Self::All)
    }

    fn mnemonic(&self) -> bool {
        matches!(self, Self::Mnemonic | Self::All)
    }
}

const C_SIZE_TABLE: &str = "static uint8_t opcode_to_insn_size[]";
const C_MNEMONIC_TABLE: &str = "static char *opcode_to_mnemonic[]";
const RUST_SIZE_TABLE: &str = "pub const OPCODE_TO_INSN_SIZE: [usize; 256]";
const RUST_MNEMONIC_TABLE: &str = "pub const OPCODE_TO_MNEMONIC: [Option<&str>; 256]";

/// Render the selected tables of 'table' as source text.
pub fn render(
    table: &OpcodeTable,
    format: TableFormat,
    selection: TableSelection,
) -> Result<String> {
    Ok(match format {
        TableFormat::C => render_c(table, selection),
        TableFormat::Rust => render_rust(table, selection),
        TableFormat::Json => render_json(table, selection)?,
    })
}

/// String literal for a mnemonic template. The template's own escapes
/// are kept as they are.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

/// Brace-enclosed table, one entry per line, no separator after the
/// last entry.
fn block(header: &str, open: char, close: &str, entries: Vec<String>) -> String {
    let mut s = format!("{} = {}\n", header, open);
    if !entries.is_empty() {
        s.push_str(&entries.join(",\n"));
        s.push('\n');
    }
    s.push_str(close);
    s.push('\n');
    s
}

fn render_c(table: &OpcodeTable, selection: TableSelection) -> String {
    let mut blocks = vec![];

    if selection.size() {
        blocks.push(block(
            C_SIZE_TABLE,
            '{',
            "};",
            table
                .iter()
                .map(|d| format!("\t[{:#x}] = {}", d.opcode, d.instruction_size))
                .collect(),
        ));
    }
    if selection.mnemonic() {
        blocks.push(block(
            C_MNEMONIC_TABLE,
            '{',
            "};",
            table
                .iter()
                .map(|d| format!("\t[{:#x}] = {}", d.opcode, quote(&d.mnemonic)))
                .collect(),
        ));
    }

    blocks.join("\n")
}

fn rust_entries(
    table: &OpcodeTable,
    value: impl Fn(Option<&InstructionDescription>) -> String,
) -> Vec<String> {
    (0..=u8::MAX)
        .map(|opcode| match table.get(opcode) {
            Some(d) => format!(
                "    // 0x{:02X} - {}\n    {}",
                opcode,
                d.mnemonic.trim_end_matches(NEWLINE_ESCAPE),
                value(Some(d))
            ),
            None => format!("    {}", value(None)),
        })
        .collect()
}

fn render_rust(table: &OpcodeTable, selection: TableSelection) -> String {
    let mut blocks = vec![];

    if selection.size() {
        blocks.push(block(
            RUST_SIZE_TABLE,
            '[',
            "];",
            rust_entries(table, |d| {
                d.map_or("0".to_string(), |d| d.instruction_size.to_string())
            }),
        ));
    }
    if selection.mnemonic() {
        blocks.push(block(
            RUST_MNEMONIC_TABLE,
            '[',
            "];",
            rust_entries(table, |d| {
                d.map_or("None".to_string(), |d| format!("Some({})", quote(&d.mnemonic)))
            }),
        ));
    }

    blocks.join("\n")
}

#[derive(Serialize)]
struct SizeEntry {
    opcode: u8,
    instruction_size: usize,
}

#[derive(Serialize)]
struct MnemonicEntry<'a> {
    opcode: u8,
    mnemonic: &'a str,
}

fn render_json(table: &OpcodeTable, selection: TableSelection) -> Result<String> {
    let mut s = match selection {
        TableSelection::All => serde_json::to_string_pretty(&table.iter().collect_vec())?,
        TableSelection::Size => serde_json::to_string_pretty(
            &table
                .iter()
                .map(|d| SizeEntry {
                    opcode: d.opcode,
                    instruction_size: d.instruction_size,
                })
                .collect_vec(),
        )?,
        TableSelection::Mnemonic => serde_json::to_string_pretty(
            &table
                .iter()
                .map(|d| MnemonicEntry {
                    opcode: d.opcode,
                    mnemonic: &d.mnemonic,
                })
                .collect_vec(),
        )?,
    };
    s.push('\n');
    Ok(s)
}
