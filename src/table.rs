use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::TableError;
use crate::layout::ColumnLayout;
use crate::mnemonic::Mnemonic;
use crate::operand::instruction_size;
use crate::record::{is_supported, InstructionRecord};

/// Everything the generated tables know about one opcode.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct InstructionDescription {
    pub opcode: u8,

    /// Length of the complete instruction, opcode byte included.
    pub instruction_size: usize,

    /// Template for printing the instruction, at most one placeholder.
    pub mnemonic: String,
}

impl InstructionDescription {
    pub fn from_record(record: &InstructionRecord) -> Result<Self, TableError> {
        Ok(Self {
            opcode: record.opcode,
            instruction_size: instruction_size(record)?,
            mnemonic: Mnemonic::from_field(record.mnemonic_field).into_string(),
        })
    }
}

struct Entry {
    line_no: usize,
    desc: InstructionDescription,
}

/// Supported instructions of an opcode listing, keyed by opcode.
#[derive(Default)]
pub struct OpcodeTable {
    entries: BTreeMap<u8, Entry>,
    skipped: Vec<TableError>,
}

impl OpcodeTable {
    /// Build the table from a complete listing.
    ///
    /// Lines with a malformed opcode or field are skipped and remembered,
    /// unless 'strict' is set. Operand tokens that cannot be sized and
    /// opcodes defined twice always fail the whole listing.
    pub fn parse(text: &str, layout: &ColumnLayout, strict: bool) -> Result<Self, TableError> {
        Self::parse_bytes(text.as_bytes(), layout, strict)
    }

    /// Build the table from a listing as read from disk.
    ///
    /// Columns count bytes. Unsupported lines are dropped before they are
    /// decoded; a supported line that is not UTF-8 is skipped like a
    /// malformed one.
    pub fn parse_bytes(
        data: &[u8],
        layout: &ColumnLayout,
        strict: bool,
    ) -> Result<Self, TableError> {
        let mut table = Self::default();
        if data.is_empty() {
            return Ok(table);
        }

        let data = data.strip_suffix(b"\n").unwrap_or(data);
        for (idx, raw) in data.split(|&b| b == b'\n').enumerate() {
            let line_no = idx + 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if !is_supported(raw, layout) {
                continue;
            }

            let record = std::str::from_utf8(raw)
                .map_err(|_| TableError::InvalidUtf8 { line_no })
                .and_then(|line| InstructionRecord::classify(line, line_no, layout));
            let record = match record {
                Ok(Some(r)) => r,
                Ok(None) => continue,
                Err(e) if e.is_line_local() && !strict => {
                    table.skipped.push(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            table.insert(line_no, InstructionDescription::from_record(&record)?)?;
        }

        Ok(table)
    }

    /// Add a description; the opcode must not be in the table yet.
    pub fn insert(
        &mut self,
        line_no: usize,
        desc: InstructionDescription,
    ) -> Result<(), TableError> {
        if let Some(existing) = self.entries.get(&desc.opcode) {
            return Err(TableError::DuplicateOpcode {
                opcode: desc.opcode,
                first_line: existing.line_no,
                line_no,
            });
        }
        self.entries.insert(desc.opcode, Entry { line_no, desc });
        Ok(())
    }

    pub fn get(&self, opcode: u8) -> Option<&InstructionDescription> {
        self.entries.get(&opcode).map(|e| &e.desc)
    }

    pub fn size(&self, opcode: u8) -> Option<usize> {
        self.get(opcode).map(|d| d.instruction_size)
    }

    pub fn mnemonic(&self, opcode: u8) -> Option<&str> {
        self.get(opcode).map(|d| d.mnemonic.as_str())
    }

    /// Descriptions in ascending opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionDescription> {
        self.entries.values().map(|e| &e.desc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines that were left out because they could not be read.
    pub fn skipped(&self) -> &[TableError] {
        &self.skipped
    }
}
