use std::ops::Range;

/// Column positions of a fixed-width opcode listing.
///
/// All ranges are byte offsets into a single line, half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Two hex digits holding the opcode
    pub opcode: Range<usize>,

    /// Mnemonic name followed by its operand syntax
    pub mnemonic: Range<usize>,

    /// Operand syntax only (tail of the mnemonic window)
    pub operand: Range<usize>,

    /// Column holding the support marker
    pub marker: usize,

    /// Marker character flagging a supported instruction
    pub marker_char: u8,
}

impl ColumnLayout {
    /// Layout of the '65xx Opcode List' text asset.
    pub const OPCODE_LIST_65XX: ColumnLayout = ColumnLayout {
        opcode: 2..4,
        mnemonic: 6..26,
        operand: 11..26,
        marker: 26,
        marker_char: b'X',
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::OPCODE_LIST_65XX
    }
}
