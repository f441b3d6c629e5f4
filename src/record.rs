use std::ops::Range;

use crate::error::TableError;
use crate::layout::ColumnLayout;

/// A supported instruction line of an opcode listing, split into its
/// fixed-width fields. Borrows the line it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord<'a> {
    /// 1-based line number within the listing
    pub line_no: usize,

    pub opcode: u8,

    /// Mnemonic name plus operand syntax, untrimmed
    pub mnemonic_field: &'a str,

    /// Operand syntax, untrimmed
    pub operand_field: &'a str,

    /// The complete line
    pub line: &'a str,
}

impl<'a> InstructionRecord<'a> {
    /// Classify a single line.
    ///
    /// Returns Ok(None) for lines that do not carry the support marker,
    /// including lines too short to reach the marker column.
    pub fn classify(
        line: &'a str,
        line_no: usize,
        layout: &ColumnLayout,
    ) -> Result<Option<Self>, TableError> {
        if !is_supported(line.as_bytes(), layout) {
            return Ok(None);
        }

        let opcode_text = line
            .get(layout.opcode.clone())
            .ok_or_else(|| TableError::MalformedOpcode {
                line_no,
                text: line
                    .as_bytes()
                    .get(layout.opcode.clone())
                    .map(|b| String::from_utf8_lossy(b).into_owned())
                    .unwrap_or_default(),
            })?;

        Ok(Some(Self {
            line_no,
            opcode: parse_opcode(opcode_text).ok_or_else(|| TableError::MalformedOpcode {
                line_no,
                text: opcode_text.to_string(),
            })?,
            mnemonic_field: field(line, line_no, &layout.mnemonic)?,
            operand_field: field(line, line_no, &layout.operand)?,
            line,
        }))
    }
}

/// Tests the support marker column. Columns count bytes.
pub fn is_supported(line: &[u8], layout: &ColumnLayout) -> bool {
    line.get(layout.marker) == Some(&layout.marker_char)
}

fn parse_opcode(text: &str) -> Option<u8> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(text, 16).ok()
}

fn field<'a>(line: &'a str, line_no: usize, range: &Range<usize>) -> Result<&'a str, TableError> {
    // Short lines yield whatever part of the window exists.
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).ok_or(TableError::MalformedField {
        line_no,
        start: range.start,
        end: range.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::listing_line;

    const LAYOUT: ColumnLayout = ColumnLayout::OPCODE_LIST_65XX;

    #[test]
    fn supported_line() {
        let line = listing_line("A9", "LDA", "#$ab", 'X') + "  2  2";
        let rec = InstructionRecord::classify(&line, 7, &LAYOUT)
            .unwrap()
            .unwrap();
        assert_eq!(rec.opcode, 0xA9);
        assert_eq!(rec.line_no, 7);
        assert_eq!(rec.mnemonic_field.trim(), "LDA  #$ab");
        assert_eq!(rec.operand_field.trim(), "#$ab");
    }

    #[test]
    fn unsupported_marker() {
        let line = listing_line("02", "HLT", "", '-');
        assert!(InstructionRecord::classify(&line, 1, &LAYOUT)
            .unwrap()
            .is_none());
    }

    #[test]
    fn short_line() {
        assert!(InstructionRecord::classify("  EA  NOP", 1, &LAYOUT)
            .unwrap()
            .is_none());
        assert!(InstructionRecord::classify("", 1, &LAYOUT)
            .unwrap()
            .is_none());
    }

    #[test]
    fn marker_is_last_column() {
        let line = listing_line("EA", "NOP", "", 'X');
        assert_eq!(line.len(), LAYOUT.marker + 1);
        let rec = InstructionRecord::classify(&line, 1, &LAYOUT)
            .unwrap()
            .unwrap();
        assert_eq!(rec.opcode, 0xEA);
        assert_eq!(rec.operand_field.trim(), "");
    }

    #[test]
    fn malformed_opcode() {
        let line = listing_line("G9", "LDA", "#$ab", 'X');
        assert_eq!(
            InstructionRecord::classify(&line, 3, &LAYOUT),
            Err(TableError::MalformedOpcode {
                line_no: 3,
                text: "G9".to_string()
            })
        );

        let line = listing_line("+9", "LDA", "#$ab", 'X');
        assert!(InstructionRecord::classify(&line, 3, &LAYOUT).is_err());
    }

    #[test]
    fn lowercase_opcode() {
        let line = listing_line("a9", "LDA", "#$ab", 'X');
        let rec = InstructionRecord::classify(&line, 1, &LAYOUT)
            .unwrap()
            .unwrap();
        assert_eq!(rec.opcode, 0xA9);
    }

    #[test]
    fn field_split_inside_character() {
        let mut line = listing_line("A9", "LDA", "#$ab", 'X');
        // Two-byte character straddling the start of the operand window
        line.replace_range(10..12, "\u{e9}");
        assert_eq!(
            InstructionRecord::classify(&line, 5, &LAYOUT),
            Err(TableError::MalformedField {
                line_no: 5,
                start: 11,
                end: 26
            })
        );
    }
}
