//! Residue Location Literals
//!
//! Interaction tables carry per-row residue coordinates as Python-literal mappings:
//!
//! ```text
//! {'Protein1': [12, 13, 14], 'Protein2': [101, 102]}
//! {'chain A': [5, 6], 'chain B': [40]}
//! ```
//!
//! This module parses that small grammar (mappings, lists, tuples, numbers, quoted strings,
//! `True`/`False`/`None`) directly instead of rewriting quotes and handing it to a JSON parser.
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    /// The field is missing or blank.
    #[error("location field is absent")]
    Absent,

    /// The text does not follow the literal grammar.
    #[error("malformed location literal at byte {position}: {message}")]
    Malformed { position: usize, message: String },

    /// The literal parsed but is not a mapping.
    #[error("location literal is not a mapping")]
    NotAMapping,
}

/// A parsed Python-style literal.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Map(Vec<(LiteralValue, LiteralValue)>),
    List(Vec<LiteralValue>),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
}

impl LiteralValue {
    /// Residue indices held by this value; nested lists are flattened and
    /// integral floats or numeric strings are accepted.
    fn residues(&self) -> Vec<i64> {
        match self {
            LiteralValue::Int(value) => vec![*value],
            LiteralValue::Float(value) if value.fract() == 0.0 => vec![*value as i64],
            LiteralValue::Str(text) => text.trim().parse().map(|v| vec![v]).unwrap_or_default(),
            LiteralValue::List(items) => items.iter().flat_map(LiteralValue::residues).collect(),
            _ => vec![],
        }
    }

    fn key_text(&self) -> Option<String> {
        match self {
            LiteralValue::Str(text) => Some(text.clone()),
            LiteralValue::Int(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

/// Parses a complete literal; trailing content is an error.
pub fn parse_literal(text: &str) -> Result<LiteralValue, LocationError> {
    let mut parser = Parser {
        bytes: text.as_bytes(),
        text,
        pos: 0,
    };
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(LocationError::Absent);
    }
    let value = parser.value()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> LocationError {
        LocationError::Malformed {
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), LocationError> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn value(&mut self) -> Result<LiteralValue, LocationError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.mapping(),
            Some(b'[') => self.sequence(b'[', b']'),
            Some(b'(') => self.sequence(b'(', b')'),
            Some(quote @ (b'\'' | b'"')) => self.string(quote).map(LiteralValue::Str),
            Some(b'-' | b'+' | b'0'..=b'9' | b'.') => self.number(),
            Some(b'A'..=b'Z' | b'a'..=b'z') => self.keyword(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn mapping(&mut self) -> Result<LiteralValue, LocationError> {
        self.expect(b'{')?;
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(LiteralValue::Map(entries));
            }
            let key = self.value()?;
            self.expect(b':')?;
            let value = self.value()?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn sequence(&mut self, open: u8, close: u8) -> Result<LiteralValue, LocationError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(LiteralValue::List(items));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(byte) if byte == close => {}
                _ => return Err(self.error(&format!("expected ',' or '{}'", close as char))),
            }
        }
    }

    fn string(&mut self, quote: u8) -> Result<String, LocationError> {
        self.pos += 1;
        let mut out = String::new();
        let mut chars = self.text[self.pos..].char_indices();
        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                ch if ch as u32 == quote as u32 => {
                    self.pos += offset + 1;
                    return Ok(out);
                }
                ch => out.push(ch),
            }
        }
        self.pos = self.bytes.len();
        Err(self.error("unterminated string"))
    }

    fn number(&mut self) -> Result<LiteralValue, LocationError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'_' | b'0'..=b'9')
        ) {
            self.pos += 1;
        }
        let token = self.text[start..self.pos].replace('_', "");
        if let Ok(value) = token.parse::<i64>() {
            return Ok(LiteralValue::Int(value));
        }
        token
            .parse::<f64>()
            .map(LiteralValue::Float)
            .map_err(|_| LocationError::Malformed {
                position: start,
                message: format!("invalid number '{}'", token),
            })
    }

    fn keyword(&mut self) -> Result<LiteralValue, LocationError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'A'..=b'Z' | b'a'..=b'z')) {
            self.pos += 1;
        }
        match &self.text[start..self.pos] {
            "True" => Ok(LiteralValue::Bool(true)),
            "False" => Ok(LiteralValue::Bool(false)),
            "None" => Ok(LiteralValue::None),
            "nan" | "NaN" => Ok(LiteralValue::Float(f64::NAN)),
            other => Err(LocationError::Malformed {
                position: start,
                message: format!("unknown identifier '{}'", other),
            }),
        }
    }
}

/// Residue lists keyed by partner label, with keys lower-cased and trimmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResidueLocation {
    sides: HashMap<String, Vec<i64>>,
}

impl ResidueLocation {
    /// Parses a location literal. A blank field is [`LocationError::Absent`].
    pub fn parse(text: &str) -> Result<Self, LocationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || matches!(trimmed, "nan" | "NaN" | "None") {
            return Err(LocationError::Absent);
        }
        match parse_literal(trimmed)? {
            LiteralValue::Map(entries) => Ok(ResidueLocation {
                sides: entries
                    .into_iter()
                    .filter_map(|(key, value)| {
                        Some((key.key_text()?.trim().to_lowercase(), value.residues()))
                    })
                    .collect(),
            }),
            _ => Err(LocationError::NotAMapping),
        }
    }

    /// The first present residue list among `candidates`, in priority order.
    pub fn side(&self, candidates: &[&str]) -> Option<&[i64]> {
        candidates
            .iter()
            .find_map(|key| self.sides.get(*key))
            .map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }
}
