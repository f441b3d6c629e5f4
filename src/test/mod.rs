
/// Build one fixed-width listing line: opcode, mnemonic, operand
/// syntax and support marker, each in its own column.
pub fn listing_line(opcode: &str, mnemonic: &str, operand: &str, marker: char) -> String {
    format!("  {:2}  {:<5}{:<15}{}", opcode, mnemonic, operand, marker)
}
