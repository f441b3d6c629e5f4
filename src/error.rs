use thiserror::Error;

/// Errors raised while turning an opcode listing into tables.
///
/// Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("line {line_no}: malformed opcode {text:?}")]
    MalformedOpcode { line_no: usize, text: String },

    #[error("line {line_no}: field at columns {start}..{end} is not plain text")]
    MalformedField {
        line_no: usize,
        start: usize,
        end: usize,
    },

    #[error("line {line_no}: not valid UTF-8")]
    InvalidUtf8 { line_no: usize },

    #[error("line {line_no}: cannot size operand {token:?} in {line:?}")]
    AmbiguousOperandToken {
        line_no: usize,
        token: String,
        line: String,
    },

    #[error("line {line_no}: opcode {opcode:02X} already defined on line {first_line}")]
    DuplicateOpcode {
        opcode: u8,
        first_line: usize,
        line_no: usize,
    },
}

impl TableError {
    /// Errors that only invalidate their own line.
    ///
    /// The table builder skips these and keeps going; anything
    /// else aborts the run.
    pub fn is_line_local(&self) -> bool {
        matches!(
            self,
            Self::MalformedOpcode { .. } | Self::MalformedField { .. } | Self::InvalidUtf8 { .. }
        )
    }
}
