use std::fmt;

/// Suffix of every mnemonic template: an escaped newline, as the
/// consuming table prints templates verbatim.
pub const NEWLINE_ESCAPE: &str = "\\n";

/// Annotation mark on undocumented opcodes
const ANNOTATION: char = '*';

/// Length of the operation name in front of the operand
const OPERATION_LEN: usize = 3;

/// Operand placeholder in a mnemonic field.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Placeholder {
    /// 'nearlabel', relative branch target
    NearLabel,
    /// 'abcd', 16-bit operand
    Word,
    /// 'ab', 8-bit operand
    Byte,
}

/// Placeholder spellings, longest first so 'abcd' never matches as 'ab'.
const PLACEHOLDERS: [(&str, Placeholder); 3] = [
    ("nearlabel", Placeholder::NearLabel),
    ("abcd", Placeholder::Word),
    ("ab", Placeholder::Byte),
];

/// Operand words that are not placeholders but contain 'ab'. They are
/// copied through whole.
const LITERAL_WORDS: [&str; 1] = ["farlabel"];

impl Placeholder {
    /// printf-style replacement for the placeholder.
    pub fn format_spec(&self) -> &'static str {
        match self {
            Self::NearLabel => "$%X",
            Self::Word | Self::Byte => "%X",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MnemonicToken {
    Literal(char),
    Placeholder(Placeholder),
}

/// Split a mnemonic field into literal characters and placeholders.
/// Whitespace and annotation marks are dropped.
pub fn tokenize(field: &str) -> Vec<MnemonicToken> {
    let compact: String = field
        .chars()
        .filter(|&c| !c.is_whitespace() && c != ANNOTATION)
        .collect();

    let mut tokens = vec![];
    let mut rest = compact.as_str();
    while let Some(c) = rest.chars().next() {
        if let Some(word) = LITERAL_WORDS.iter().find(|w| rest.starts_with(*w)) {
            tokens.extend(word.chars().map(MnemonicToken::Literal));
            rest = &rest[word.len()..];
            continue;
        }
        match PLACEHOLDERS.iter().find(|(s, _)| rest.starts_with(s)) {
            Some((s, p)) => {
                tokens.push(MnemonicToken::Placeholder(*p));
                rest = &rest[s.len()..];
            }
            None => {
                tokens.push(MnemonicToken::Literal(c));
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    tokens
}

/// A display-ready mnemonic template such as "LDA #$%X\n".
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Mnemonic {
    text: String,
}

impl Mnemonic {
    pub fn from_field(field: &str) -> Self {
        let mut text = String::new();
        let mut substituted = false;
        for token in tokenize(field) {
            match token {
                MnemonicToken::Literal(c) => text.push(c),
                MnemonicToken::Placeholder(p) => {
                    substituted = true;
                    text.push_str(p.format_spec());
                }
            }
        }

        if substituted {
            let split = text
                .char_indices()
                .nth(OPERATION_LEN)
                .map_or(text.len(), |(i, _)| i);
            text.insert(split, ' ');
        }
        text.push_str(NEWLINE_ESCAPE);

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(field: &str) -> String {
        Mnemonic::from_field(field).into_string()
    }

    fn first_placeholder(field: &str) -> Option<Placeholder> {
        tokenize(field).into_iter().find_map(|t| match t {
            MnemonicToken::Placeholder(p) => Some(p),
            MnemonicToken::Literal(_) => None,
        })
    }

    #[test]
    fn implied() {
        assert_eq!(template("NOP"), "NOP\\n");
        assert_eq!(first_placeholder("NOP"), None);
    }

    #[test]
    fn accumulator() {
        assert_eq!(template("ASL  A"), "ASLA\\n");
    }

    #[test]
    fn immediate() {
        assert_eq!(template("LDA  #$ab       "), "LDA #$%X\\n");
        assert_eq!(
            first_placeholder("LDA #$ab"),
            Some(Placeholder::Byte)
        );
    }

    #[test]
    fn absolute_indexed() {
        assert_eq!(template("LDA  $abcd,X"), "LDA $%X,X\\n");
        assert_eq!(template("STA  ($ab),Y"), "STA ($%X),Y\\n");
        assert_eq!(template("JMP  ($abcd)"), "JMP ($%X)\\n");
    }

    #[test]
    fn longest_match_first() {
        assert_eq!(
            tokenize("abcd"),
            vec![MnemonicToken::Placeholder(Placeholder::Word)]
        );
        assert_eq!(
            tokenize("abab"),
            vec![
                MnemonicToken::Placeholder(Placeholder::Byte),
                MnemonicToken::Placeholder(Placeholder::Byte)
            ]
        );
    }

    #[test]
    fn relative() {
        assert_eq!(template("BPL  nearlabel"), "BPL $%X\\n");
        assert_eq!(
            first_placeholder("BPL nearlabel"),
            Some(Placeholder::NearLabel)
        );
    }

    #[test]
    fn far_label_is_literal() {
        assert_eq!(template("JML  farlabel"), "JMLfarlabel\\n");
        assert_eq!(first_placeholder("JML farlabel"), None);
        assert_eq!(
            tokenize("farlabel"),
            "farlabel".chars().map(MnemonicToken::Literal).collect::<Vec<_>>()
        );
    }

    #[test]
    fn far_label_next_to_placeholder() {
        assert_eq!(template("MVN  $ab,farlabel"), "MVN $%X,farlabel\\n");
        assert_eq!(
            first_placeholder("MVN $ab,farlabel"),
            Some(Placeholder::Byte)
        );
    }

    #[test]
    fn annotation_marks() {
        assert_eq!(template("LAX* $ab,Y"), "LAX $%X,Y\\n");
        assert_eq!(template("*NOP"), "NOP\\n");
    }

    #[test]
    fn display() {
        let m = Mnemonic::from_field("ORA  ($ab,X)");
        assert_eq!(m.as_str(), "ORA ($%X,X)\\n");
        assert_eq!(m.to_string(), m.as_str());
    }

    #[test]
    fn short_name() {
        assert_eq!(template("ab"), "%X \\n");
    }
}
