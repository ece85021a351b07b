// core/src/tokenizer.rs
//
// Splits free text into lookup tokens: numbers (with optional currency
// symbol and comma grouping), words (with internal apostrophes) and single
// punctuation characters. Whitespace only separates.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<number>[$€£]?\d+(?:,\d+)*)|(?P<word>\w+(?:['’]\w+)*)|(?P<punct>[^\w\s])")
        .expect("token pattern is valid")
});

static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

/// True for any decimal digit the number pattern accepts, in any script.
pub fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

/// Shape class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Number,
    Word,
    Punctuation,
}

/// One token of input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new<T: Into<String>>(text: T, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Tokenize `text`, scanning left to right.
///
/// At each position the number pattern is tried before the word pattern, so
/// `$1,000` stays one token while `abc123` is a single word.
///
/// # Example
/// ```
/// use steno_lookup_core::tokenizer::tokenize;
///
/// let tokens: Vec<String> = tokenize("I don't owe $1,000!")
///     .into_iter()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, ["I", "don't", "owe", "$1,000", "!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(m) = caps.name("number") {
                Some(Token::new(m.as_str(), TokenKind::Number))
            } else if let Some(m) = caps.name("word") {
                Some(Token::new(m.as_str(), TokenKind::Word))
            } else {
                caps.name("punct")
                    .map(|m| Token::new(m.as_str(), TokenKind::Punctuation))
            }
        })
        .collect()
}

/// Join tokens with single spaces to form a phrase.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::as_str)
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
    }

    #[test]
    fn words_and_punctuation() {
        assert_eq!(texts("Hello, world!"), ["Hello", ",", "world", "!"]);
        assert_eq!(texts("New  York"), ["New", "York"]);
    }

    #[test]
    fn apostrophes_join_word_runs() {
        assert_eq!(texts("don't"), ["don't"]);
        assert_eq!(texts("rock’n’roll"), ["rock’n’roll"]);
        // A trailing apostrophe is punctuation.
        assert_eq!(texts("dogs'"), ["dogs", "'"]);
    }

    #[test]
    fn currency_and_grouped_numbers() {
        let tokens = tokenize("€5 and $1,000,000 or 1,2");
        let got: Vec<(&str, TokenKind)> = tokens.iter().map(|t| (t.as_str(), t.kind)).collect();
        assert_eq!(
            got,
            [
                ("€5", TokenKind::Number),
                ("and", TokenKind::Word),
                ("$1,000,000", TokenKind::Number),
                ("or", TokenKind::Word),
                ("1,2", TokenKind::Number),
            ]
        );
    }

    #[test]
    fn lone_currency_symbol_is_punctuation() {
        let tokens = tokenize("$ 5");
        assert_eq!(tokens[0], Token::new("$", TokenKind::Punctuation));
        assert_eq!(tokens[1], Token::new("5", TokenKind::Number));
    }

    #[test]
    fn number_first_then_word() {
        assert_eq!(texts("15abc"), ["15", "abc"]);
        assert_eq!(texts("abc15"), ["abc15"]);
    }

    #[test]
    fn decimal_digits_in_other_scripts() {
        assert!(is_decimal_digit('7'));
        assert!(is_decimal_digit('\u{661}'));
        assert!(!is_decimal_digit('\u{bd}'));
        assert!(!is_decimal_digit('x'));
        assert_eq!(tokenize("\u{661}\u{665}")[0].kind, TokenKind::Number);
    }

    #[test]
    fn join_uses_single_spaces() {
        let tokens = tokenize("  cat\t hat ");
        assert_eq!(join_tokens(&tokens), "cat hat");
    }
}
