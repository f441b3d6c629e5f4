pub mod error;
pub mod layout;
pub mod mnemonic;
pub mod operand;
pub mod record;
pub mod render;
pub mod table;

#[cfg(test)]
pub mod test;
