//! Tokenizer for the equation notation.
//!
//! Identifiers follow `[a-zA-Z]+[0-9]*` and are read maximally, so with
//! both `x1` and `x10` declared the text `x10` is always the longer name.

use std::fmt;

/// A lexical unit of the equation notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A variable name.
    Ident(String),
    /// `0` or `1`.
    Const(bool),
    /// `!`
    Not,
    /// `+`
    Or,
    /// `*`
    And,
    /// `=`
    Eq,
    /// `-`
    Implies,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "{name}"),
            Self::Const(b) => write!(f, "{}", u8::from(*b)),
            Self::Not => write!(f, "!"),
            Self::Or => write!(f, "+"),
            Self::And => write!(f, "*"),
            Self::Eq => write!(f, "="),
            Self::Implies => write!(f, "-"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// A character the notation has no meaning for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// The text that could not be tokenized.
    pub found: String,
}

/// Splits `input` into tokens, skipping whitespace.
///
/// # Errors
///
/// Returns the first stray character or numeral other than `0`/`1`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b if b.is_ascii_whitespace() => i += 1,
            b'!' | b'+' | b'*' | b'=' | b'-' | b'(' | b')' => {
                tokens.push(match c {
                    b'!' => Token::Not,
                    b'+' => Token::Or,
                    b'*' => Token::And,
                    b'=' => Token::Eq,
                    b'-' => Token::Implies,
                    b'(' => Token::LParen,
                    _ => Token::RParen,
                });
                i += 1;
            }
            b if b.is_ascii_alphabetic() => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                tokens.push(Token::Ident(input[start..i].to_string()));
            }
            b if b.is_ascii_digit() => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                match &input[start..i] {
                    "0" => tokens.push(Token::Const(false)),
                    "1" => tokens.push(Token::Const(true)),
                    other => {
                        return Err(LexError {
                            found: other.to_string(),
                        });
                    }
                }
            }
            _ => {
                let found = input[i..].chars().next().map(String::from).unwrap_or_default();
                return Err(LexError { found });
            }
        }
    }

    Ok(tokens)
}

/// Identifiers in `input` in order of first appearance, without duplicates.
///
/// Stray characters are skipped; this only answers which names a line uses.
#[must_use]
pub fn identifiers(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let name = &input[start..i];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        } else if bytes[i].is_ascii_digit() {
            // digits not attached to letters are constants, not names
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("!(x2 * y2) - x1 = 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Not,
                Token::LParen,
                Token::Ident("x2".into()),
                Token::And,
                Token::Ident("y2".into()),
                Token::RParen,
                Token::Implies,
                Token::Ident("x1".into()),
                Token::Eq,
                Token::Const(true),
            ]
        );
    }

    #[test]
    fn test_longest_identifier_wins() {
        assert_eq!(
            tokenize("x10=1").unwrap(),
            vec![Token::Ident("x10".into()), Token::Eq, Token::Const(true)]
        );
    }

    #[test]
    fn test_rejects_stray_characters() {
        assert_eq!(tokenize("x1 & x2"), Err(LexError { found: "&".into() }));
        assert_eq!(tokenize("x1 = 2"), Err(LexError { found: "2".into() }));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(identifiers("(x1 + y1) = 0 * x1"), vec!["x1", "y1"]);
        assert_eq!(identifiers("x1y2 & 10"), vec!["x1", "y2"]);
    }
}
