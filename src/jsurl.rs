//! Compact URL-safe text form of JSON-like values.
//!
//! Every value starts with `~`:
//!
//! | Value | Text |
//! |-------|------|
//! | number | `~12.5` (`~null` when not finite) |
//! | string | `~'escaped` |
//! | boolean / null | `~true`, `~false`, `~null` |
//! | array | `~(~1~2)`, empty `~(~)` |
//! | object | `~(key~1~other~'x)`, empty `~()` |
//!
//! Object members are written as `escaped-key` followed by the encoded value,
//! sorted by that text and joined with `~`.
//!
//! Strings and keys made only of `[A-Za-z0-9_.-]` are written verbatim.
//! Otherwise `$` becomes `!`, other characters below U+0100 become `*XX` and
//! everything else becomes `**XXXX` per UTF-16 code unit (lowercase hex).

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::value::{format_number, Key, Value};

/// Deepest array/object nesting the parser accepts
pub(crate) const MAX_DEPTH: usize = 512;

/// Encode `value` as compact text
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    encode_into(value, &mut out);
    out
}

fn encode_into(value: &Value, out: &mut String) {
    match value {
        Value::Number(n) if n.is_finite() => {
            out.push('~');
            out.push_str(&format_number(*n));
        }
        Value::Number(_) | Value::Null => out.push_str("~null"),
        Value::Bool(b) => {
            out.push('~');
            out.push_str(if *b { "true" } else { "false" });
        }
        Value::String(s) => {
            out.push_str("~'");
            out.push_str(&escape(s));
        }
        Value::Array(items) => {
            out.push_str("~(");
            if items.is_empty() {
                out.push('~');
            }
            for item in items {
                encode_into(item, out);
            }
            out.push(')');
        }
        Value::Object(members) => {
            let mut parts: Vec<String> = members
                .iter()
                .map(|(key, val)| {
                    let mut part = escape_units(key.units().iter().copied());
                    encode_into(val, &mut part);
                    part
                })
                .collect();
            parts.sort_unstable();

            out.push_str("~(");
            out.push_str(&parts.join("~"));
            out.push(')');
        }
    }
}

/// Escape a string value for compact text
fn escape(s: &str) -> String {
    if s.chars().all(is_plain) {
        return s.to_string();
    }
    escape_units(s.encode_utf16())
}

/// Escape a sequence of UTF-16 code units. Unpaired surrogates are written
/// like any other unit.
fn escape_units(units: impl IntoIterator<Item = u16>) -> String {
    let mut out = String::new();
    for unit in units {
        match u8::try_from(unit) {
            Ok(b) if is_plain(char::from(b)) => out.push(char::from(b)),
            Ok(b'$') => out.push('!'),
            Ok(b) => out.push_str(&format!("*{b:02x}")),
            Err(_) => out.push_str(&format!("**{unit:04x}")),
        }
    }
    out
}

#[inline]
fn is_plain(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.')
}

/// Parse compact text into a value.
///
/// Anything after the first complete value is ignored. Object keys keep their
/// raw UTF-16 units, so a key holding half of a surrogate pair survives intact.
///
/// A bare word starting with `-` or a digit is read as the longest decimal
/// prefix, like `parseFloat`. When there is no such prefix (`-`, `-x`) the
/// word is rejected with [`ParseError::BadNumber`] instead of becoming NaN.
///
/// # Errors
/// Returns a [`ParseError`] when a structural character is missing, a bare
/// word is not `true`/`false`/`null`, a number or escape is malformed, or
/// nesting exceeds the depth limit.
pub fn decode(s: &str) -> Result<Value, ParseError> {
    Parser { s, bytes: s.as_bytes(), pos: 0, depth: 0 }.parse_one()
}

struct Parser<'a> {
    s: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: char::from(expected),
                found: self.s[self.pos..].chars().next(),
                pos: self.pos,
            })
        }
    }

    fn parse_one(&mut self) -> Result<Value, ParseError> {
        self.eat(b'~')?;

        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(ParseError::TooDeep { pos: self.pos });
                }

                let value = if self.peek() == Some(b'~') {
                    self.parse_array_body()?
                } else {
                    self.parse_object_body()?
                };

                self.eat(b')')?;
                self.depth -= 1;
                Ok(value)
            }
            Some(b'\'') => {
                self.pos += 1;
                let units = self.parse_units()?;
                Ok(Value::String(String::from_utf16_lossy(&units)))
            }
            _ => self.parse_bare(),
        }
    }

    fn parse_array_body(&mut self) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        if self.bytes.get(self.pos + 1) == Some(&b')') {
            // "~(~)"
            self.pos += 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_one()?);
            if self.peek() != Some(b'~') {
                break;
            }
        }
        Ok(Value::Array(items))
    }

    fn parse_object_body(&mut self) -> Result<Value, ParseError> {
        let mut members = IndexMap::new();
        if self.peek() == Some(b')') {
            return Ok(Value::Object(members));
        }

        loop {
            let key = Key::from_units(self.parse_units()?);
            let value = self.parse_one()?;
            members.insert(key, value);
            if self.peek() != Some(b'~') {
                break;
            }
            self.pos += 1;
        }
        Ok(Value::Object(members))
    }

    /// Number or reserved word, running until `~`, `)` or the end
    fn parse_bare(&mut self) -> Result<Value, ParseError> {
        let beg = self.pos;
        let Some(first) = self.s[beg..].chars().next() else {
            return Err(ParseError::UnknownKeyword { word: String::new(), pos: beg });
        };

        self.pos += first.len_utf8();
        while let Some(b) = self.peek() {
            if b == b'~' || b == b')' {
                break;
            }
            self.pos += 1;
        }
        let word = &self.s[beg..self.pos];

        if first.is_ascii_digit() || first == '-' {
            return parse_float_prefix(word)
                .map(Value::Number)
                .ok_or_else(|| ParseError::BadNumber { text: word.to_string(), pos: beg });
        }

        match word {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            _ => Err(ParseError::UnknownKeyword { word: word.to_string(), pos: beg }),
        }
    }

    /// Unescape text up to the next `~`, `)` or the end
    fn parse_units(&mut self) -> Result<Vec<u16>, ParseError> {
        let mut units: Vec<u16> = Vec::new();
        let mut beg = self.pos;

        while let Some(b) = self.peek() {
            match b {
                b'~' | b')' => break,
                b'*' => {
                    units.extend(self.s[beg..self.pos].encode_utf16());
                    let (digits, width) = if self.bytes.get(self.pos + 1) == Some(&b'*') {
                        (self.pos + 2..self.pos + 6, 6)
                    } else {
                        (self.pos + 1..self.pos + 3, 3)
                    };
                    let unit = self
                        .s
                        .get(digits)
                        .and_then(parse_hex)
                        .ok_or(ParseError::BadEscape { pos: self.pos })?;
                    units.push(unit);
                    self.pos += width;
                    beg = self.pos;
                }
                b'!' => {
                    units.extend(self.s[beg..self.pos].encode_utf16());
                    units.push(u16::from(b'$'));
                    self.pos += 1;
                    beg = self.pos;
                }
                _ => self.pos += 1,
            }
        }

        units.extend(self.s[beg..self.pos].encode_utf16());
        Ok(units)
    }
}

fn parse_hex(digits: &str) -> Option<u16> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Parse the longest leading decimal number of `s`, as browsers do for
/// `parseFloat`
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
