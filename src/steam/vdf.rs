// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Minimal parser for Valve's VDF key/value text format.
//!
//! The format is a tree of quoted `"key" "value"` pairs where a value is
//! either a string or a brace-delimited nested object, e.g.:
//!
//! ```text
//! "libraryfolders"
//! {
//!     "0"
//!     {
//!         "path"    "/home/user/.local/share/Steam"
//!         "apps"    { "286690" "0" }
//!     }
//! }
//! ```
//!
//! Only the subset needed to read Steam's descriptor files is supported:
//! quoted and bare tokens, `//` line comments, and `\"`/`\\` escapes. Objects
//! preserve the order their pairs were stored in, since library lookup is
//! defined as first-match-wins over that order.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ParseError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected a value after key {0:?}")]
    MissingValue(String),
    #[error("'{{' without a preceding key")]
    KeyExpected,
    #[error("unbalanced braces")]
    UnbalancedBraces,
}

/// A VDF value: either a plain string or a nested object.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Str(String),
    Obj(Obj),
}

impl Value {
    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Obj(_) => None,
        }
    }

    pub(crate) fn as_obj(&self) -> Option<&Obj> {
        match self {
            Value::Str(_) => None,
            Value::Obj(obj) => Some(obj),
        }
    }
}

/// An ordered set of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Obj {
    pairs: Vec<(String, Value)>,
}

impl Obj {
    /// Returns the value of the first pair with the given key.
    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates the pairs in stored order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

enum Token {
    Str(String),
    Open,
    Close,
}

fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '{' => tokens.push(Token::Open),
            '}' => tokens.push(Token::Close),
            '/' if chars.peek() == Some(&'/') => {
                // Line comment, skip to end of line
                while chars.next_if(|&n| n != '\n').is_some() {}
            }
            '"' => {
                let mut literal = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('n') => literal.push('\n'),
                            Some('t') => literal.push('\t'),
                            Some(escaped) => literal.push(escaped),
                            None => return Err(ParseError::UnterminatedString),
                        },
                        Some(other) => literal.push(other),
                        None => return Err(ParseError::UnterminatedString),
                    }
                }
                tokens.push(Token::Str(literal));
            }
            first => {
                let mut word = String::from(first);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '{' | '}' | '"') {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Token::Str(word));
            }
        }
    }

    Ok(tokens)
}

/// Parses a VDF document into its top-level pairs.
pub(crate) fn parse(text: &str) -> Result<Obj, ParseError> {
    let tokens = tokenize(text)?;
    let mut pos = 0;
    let root = parse_pairs(&tokens, &mut pos, false)?;
    if pos != tokens.len() {
        return Err(ParseError::UnbalancedBraces);
    }
    Ok(root)
}

fn parse_pairs(tokens: &[Token], pos: &mut usize, nested: bool) -> Result<Obj, ParseError> {
    let mut pairs = Vec::new();

    loop {
        match tokens.get(*pos) {
            None => {
                if nested {
                    return Err(ParseError::UnbalancedBraces);
                }
                break;
            }
            Some(Token::Close) => {
                if !nested {
                    return Err(ParseError::UnbalancedBraces);
                }
                *pos += 1;
                break;
            }
            Some(Token::Open) => return Err(ParseError::KeyExpected),
            Some(Token::Str(key)) => {
                *pos += 1;
                match tokens.get(*pos) {
                    Some(Token::Str(value)) => {
                        *pos += 1;
                        pairs.push((key.clone(), Value::Str(value.clone())));
                    }
                    Some(Token::Open) => {
                        *pos += 1;
                        let child = parse_pairs(tokens, pos, true)?;
                        pairs.push((key.clone(), Value::Obj(child)));
                    }
                    _ => return Err(ParseError::MissingValue(key.clone())),
                }
            }
        }
    }

    Ok(Obj { pairs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_pairs() {
        let root = parse(r#""a" "1"  "b" "2""#).unwrap();
        assert_eq!(root.get("a").and_then(Value::as_str), Some("1"));
        assert_eq!(root.get("b").and_then(Value::as_str), Some("2"));
    }

    #[test]
    fn parses_nested_objects() {
        let text = r#"
            "users"
            {
                "76561198000000001"
                {
                    "AccountName"    "gopnik"
                }
            }
        "#;
        let root = parse(text).unwrap();
        let users = root.get("users").and_then(Value::as_obj).unwrap();
        let (id, record) = users.iter().next().unwrap();
        assert_eq!(id, "76561198000000001");
        let record = record.as_obj().unwrap();
        assert_eq!(record.get("AccountName").and_then(Value::as_str), Some("gopnik"));
    }

    #[test]
    fn preserves_stored_order() {
        let root = parse(r#""z" "1" "a" "2" "m" "3""#).unwrap();
        let keys: Vec<&str> = root.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn skips_line_comments() {
        let text = "// header comment\n\"key\" \"value\" // trailing\n";
        let root = parse(text).unwrap();
        assert_eq!(root.get("key").and_then(Value::as_str), Some("value"));
    }

    #[test]
    fn handles_escaped_quotes() {
        let root = parse(r#""name" "say \"hi\"""#).unwrap();
        assert_eq!(root.get("name").and_then(Value::as_str), Some(r#"say "hi""#));
    }

    #[test]
    fn accepts_bare_tokens() {
        let root = parse("key { inner value }").unwrap();
        let inner = root.get("key").and_then(Value::as_obj).unwrap();
        assert_eq!(inner.get("inner").and_then(Value::as_str), Some("value"));
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert_eq!(parse(r#""key" { "a" "1""#), Err(ParseError::UnbalancedBraces));
        assert_eq!(parse(r#""a" "1" }"#), Err(ParseError::UnbalancedBraces));
    }

    #[test]
    fn rejects_key_without_value() {
        assert_eq!(
            parse(r#""orphan""#),
            Err(ParseError::MissingValue("orphan".to_string()))
        );
    }

    #[test]
    fn rejects_unterminated_string() {
        assert_eq!(parse(r#""open"#), Err(ParseError::UnterminatedString));
    }
}
