use thiserror::Error;

use crate::error::TableError;
use crate::record::InstructionRecord;

/// Addressing syntax that has no bearing on the encoded length.
const DECORATIONS: [char; 6] = ['(', ')', '$', '#', '[', ']'];

const NEAR_LABEL: &str = "nearlabel";
const FAR_LABEL: &str = "farlabel";

/// A single comma-separated part of an operand expression, with
/// its decorations stripped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OperandToken {
    /// Index register (X, Y or S), not present in the byte stream
    Register(char),

    /// Relative branch displacement
    /// 1 byte
    NearLabel,

    /// Absolute jump target
    /// 2 bytes, $LL $HH
    FarLabel,

    /// Hex placeholder such as 'ab' or 'abcd', by digit count.
    /// Two digits per byte; a lone digit (the accumulator 'A') is no byte at all.
    Hex(usize),
}

impl OperandToken {
    /// Amount of bytes this operand adds to the instruction.
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Register(_) => 0,
            Self::NearLabel => 1,
            Self::FarLabel => 2,
            Self::Hex(digits) => digits / 2,
        }
    }
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown operand token {0:?}")]
pub struct UnknownToken(pub String);

/// Split an operand field into tokens.
///
/// Scanning stops at the first empty expression, so anything after
/// it does not count.
pub fn parse_operands(field: &str) -> Result<Vec<OperandToken>, UnknownToken> {
    let compact: String = field.chars().filter(|c| !c.is_whitespace()).collect();

    let mut tokens = vec![];
    for expression in compact.split(',') {
        let stripped: String = expression
            .chars()
            .filter(|c| !DECORATIONS.contains(c))
            .collect();

        let token = match stripped.as_str() {
            "" => break,
            "X" => Some(OperandToken::Register('X')),
            "Y" => Some(OperandToken::Register('Y')),
            "S" => Some(OperandToken::Register('S')),
            NEAR_LABEL => Some(OperandToken::NearLabel),
            FAR_LABEL => Some(OperandToken::FarLabel),
            s if s.bytes().all(|b| b.is_ascii_hexdigit()) => Some(OperandToken::Hex(s.len())),
            _ => None,
        };
        tokens.push(token.ok_or(UnknownToken(stripped))?);
    }
    Ok(tokens)
}

/// Total length of the instruction in bytes, opcode included.
pub fn instruction_size(record: &InstructionRecord) -> Result<usize, TableError> {
    let tokens = parse_operands(record.operand_field).map_err(|UnknownToken(token)| {
        TableError::AmbiguousOperandToken {
            line_no: record.line_no,
            token,
            line: record.line.to_string(),
        }
    })?;

    Ok(1 + tokens.iter().map(OperandToken::byte_len).sum::<usize>())
}
