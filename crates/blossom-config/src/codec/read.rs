//! JSON5 text reader.
//!
//! Accepts the full JSON5 grammar: comments, trailing commas, identifier keys,
//! single-quoted strings with line continuations, hexadecimal numbers, leading
//! or trailing decimal points, explicit `+` signs, `Infinity` and `NaN`.
//! Integer literals are kept exact when they fit `u64` or `i64`.

use super::error::Json5Error;
use super::value::{Number, Value};

/// Parses a complete JSON5 document.
///
/// # Errors
///
/// Returns [`Json5Error::Syntax`] with the line and column of the first
/// character that does not fit the grammar.
pub fn parse(text: &str) -> Result<Value, Json5Error> {
    let mut reader = Reader {
        chars: text.chars().collect(),
        pos: 0,
    };

    reader.skip_insignificant()?;
    let value = reader.parse_value()?;
    reader.skip_insignificant()?;
    if reader.peek().is_some() {
        return Err(reader.error("unexpected trailing characters"));
    }
    Ok(value)
}

struct Reader {
    chars: Vec<char>,
    pos: usize,
}

impl Reader {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn starts_with(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(offset, c)| self.peek_at(offset) == Some(c))
    }

    fn expect(&mut self, expected: char) -> Result<(), Json5Error> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{expected}'")))
        }
    }

    fn error(&self, message: &str) -> Json5Error {
        let consumed = &self.chars[..self.pos.min(self.chars.len())];
        let line = consumed.iter().filter(|&&c| c == '\n').count() + 1;
        let column = consumed.iter().rev().take_while(|&&c| c != '\n').count() + 1;
        let message = match self.peek() {
            Some(found) => format!("{message}, found {found:?}"),
            None => format!("{message}, found end of input"),
        };
        Json5Error::Syntax {
            message,
            line,
            column,
        }
    }

    /// Skips whitespace and comments.
    fn skip_insignificant(&mut self) -> Result<(), Json5Error> {
        loop {
            match self.peek() {
                Some(c) if is_whitespace(c) => self.pos += 1,
                Some('/') if self.peek_at(1) == Some('/') => {
                    while self.peek().is_some_and(|c| !is_line_terminator(c)) {
                        self.pos += 1;
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.pos += 2;
                    loop {
                        if self.starts_with("*/") {
                            self.pos += 2;
                            break;
                        }
                        if self.next_char().is_none() {
                            return Err(self.error("unterminated block comment"));
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, Json5Error> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => self.parse_string(quote).map(Value::String),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'I' | 'N') => {
                self.parse_number().map(Value::Number)
            }
            Some(_) if self.starts_with("null") => {
                self.pos += 4;
                Ok(Value::Null)
            }
            Some(_) if self.starts_with("true") => {
                self.pos += 4;
                Ok(Value::Bool(true))
            }
            Some(_) if self.starts_with("false") => {
                self.pos += 5;
                Ok(Value::Bool(false))
            }
            _ => Err(self.error("expected a value")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, Json5Error> {
        self.expect('{')?;
        let mut entries: Vec<(String, Value)> = Vec::new();

        loop {
            self.skip_insignificant()?;
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Object(entries));
            }

            let key = match self.peek() {
                Some(quote @ ('"' | '\'')) => self.parse_string(quote)?,
                _ => self.parse_identifier()?,
            };
            self.skip_insignificant()?;
            self.expect(':')?;
            self.skip_insignificant()?;
            let value = self.parse_value()?;

            // a repeated key replaces the earlier entry
            match entries.iter_mut().find(|(name, _)| *name == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }

            self.skip_insignificant()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {}
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, Json5Error> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_insignificant()?;
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_insignificant()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {}
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_identifier(&mut self) -> Result<String, Json5Error> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            let allowed = if name.is_empty() {
                is_identifier_start(c)
            } else {
                is_identifier_part(c)
            };
            if !allowed {
                break;
            }
            name.push(c);
            self.pos += 1;
        }

        if name.is_empty() {
            return Err(self.error("expected an object key"));
        }
        Ok(name)
    }

    fn parse_string(&mut self, quote: char) -> Result<String, Json5Error> {
        self.expect(quote)?;
        let mut text = String::new();

        loop {
            match self.next_char() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(text),
                Some('\\') => self.parse_escape(&mut text)?,
                Some('\n' | '\r') => {
                    self.pos -= 1;
                    return Err(self.error("unescaped line break in string"));
                }
                Some(c) => text.push(c),
            }
        }
    }

    fn parse_escape(&mut self, text: &mut String) -> Result<(), Json5Error> {
        let Some(c) = self.next_char() else {
            return Err(self.error("unterminated escape sequence"));
        };

        match c {
            'b' => text.push('\u{8}'),
            'f' => text.push('\u{c}'),
            'n' => text.push('\n'),
            'r' => text.push('\r'),
            't' => text.push('\t'),
            'v' => text.push('\u{b}'),
            '0' if !self.peek().is_some_and(|next| next.is_ascii_digit()) => text.push('\0'),
            '1'..='9' | '0' => {
                self.pos -= 1;
                return Err(self.error("invalid escape sequence"));
            }
            'x' => {
                let code = self.parse_hex_digits(2)?;
                text.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => text.push(self.parse_unicode_escape()?),
            // line continuation
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => text.push(other),
        }
        Ok(())
    }

    fn parse_unicode_escape(&mut self) -> Result<char, Json5Error> {
        let high = self.parse_hex_digits(4)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.error("unpaired surrogate escape"));
        }

        if !self.starts_with("\\u") {
            return Err(self.error("unpaired surrogate escape"));
        }
        self.pos += 2;
        let low = self.parse_hex_digits(4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error("unpaired surrogate escape"));
        }

        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_hex_digits(&mut self, count: usize) -> Result<u32, Json5Error> {
        let mut code = 0;
        for _ in 0..count {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("expected a hexadecimal digit"))?;
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Number, Json5Error> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.pos += 1;
                true
            }
            Some('+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        if self.starts_with("Infinity") {
            self.pos += "Infinity".len();
            let infinity = if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            return Ok(Number::Float(infinity));
        }
        if self.starts_with("NaN") {
            self.pos += "NaN".len();
            return Ok(Number::Float(f64::NAN));
        }

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            return self.parse_hex_integer(negative);
        }

        let digits_start = self.pos;
        let mut is_float = false;
        self.skip_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            self.skip_digits();
        }
        let mantissa: String = self.chars[digits_start..self.pos].iter().collect();
        if !mantissa.chars().any(|c| c.is_ascii_digit()) {
            self.pos = start;
            return Err(self.error("expected a number"));
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error("expected an exponent"));
            }
            self.skip_digits();
        }

        let literal: String = self.chars[digits_start..self.pos].iter().collect();
        if !is_float {
            if let Some(number) = exact_integer(&literal, negative) {
                return Ok(number);
            }
        }

        let magnitude: f64 = literal
            .parse()
            .map_err(|_| self.error("invalid number"))?;
        Ok(Number::Float(if negative { -magnitude } else { magnitude }))
    }

    fn parse_hex_integer(&mut self, negative: bool) -> Result<Number, Json5Error> {
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[digits_start..self.pos].iter().collect();
        if digits.is_empty() {
            return Err(self.error("expected a hexadecimal digit"));
        }

        let magnitude =
            u64::from_str_radix(&digits, 16).map_err(|_| self.error("hexadecimal number too large"))?;
        if !negative {
            return Ok(Number::PosInt(magnitude));
        }
        0_i64
            .checked_sub_unsigned(magnitude)
            .map(Number::from)
            .ok_or_else(|| self.error("hexadecimal number too large"))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }
}

/// Reads an integer literal exactly, or `None` when it does not fit.
fn exact_integer(digits: &str, negative: bool) -> Option<Number> {
    let magnitude: u64 = digits.parse().ok()?;
    if !negative {
        return Some(Number::PosInt(magnitude));
    }
    0_i64.checked_sub_unsigned(magnitude).map(Number::from)
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '$' || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Number {
        match parse(text).unwrap() {
            Value::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn test_relaxed_syntax() {
        let value = parse(
            "// leading comment\n{\n\tunquoted: 'single',\n\t/* block */ \"quoted\": [1, 2,],\n}\n",
        )
        .unwrap();

        assert_eq!(
            value,
            Value::Object(vec![
                ("unquoted".to_string(), Value::String("single".to_string())),
                (
                    "quoted".to_string(),
                    Value::Array(vec![
                        Value::Number(Number::PosInt(1)),
                        Value::Number(Number::PosInt(2)),
                    ])
                ),
            ])
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(number("18446744073709551615"), Number::PosInt(u64::MAX));
        assert_eq!(number("1152921504606846977"), Number::PosInt((1 << 60) | 1));
        assert_eq!(number("-9223372036854775808"), Number::NegInt(i64::MIN));
        assert_eq!(number("+7"), Number::PosInt(7));
        assert_eq!(number("-0"), Number::PosInt(0));
        assert_eq!(number("0x1F"), Number::PosInt(31));
        assert_eq!(number("-0x10"), Number::NegInt(-16));
        assert_eq!(number(".5"), Number::Float(0.5));
        assert_eq!(number("5."), Number::Float(5.0));
        assert_eq!(number("1e3"), Number::Float(1000.0));
        assert_eq!(number("-2.5E-1"), Number::Float(-0.25));
        assert_eq!(number("Infinity"), Number::Float(f64::INFINITY));
        assert_eq!(number("-Infinity"), Number::Float(f64::NEG_INFINITY));
        assert!(matches!(number("NaN"), Number::Float(n) if n.is_nan()));
        assert_eq!(
            number("18446744073709551616"),
            Number::Float(18_446_744_073_709_551_616.0)
        );
    }

    #[test]
    fn test_string_escapes() {
        let value = parse(r#"['a\tb', "\u00e9\x41", "\uD83D\uDE00", 'it\'s', "a\
b", "\u2028"]"#)
        .unwrap();

        let expected = ["a\tb", "\u{e9}A", "\u{1F600}", "it's", "ab", "\u{2028}"];
        assert_eq!(
            value,
            Value::Array(
                expected
                    .iter()
                    .map(|s| Value::String((*s).to_string()))
                    .collect()
            )
        );
    }

    #[test]
    fn test_raw_line_separators_are_allowed_in_strings() {
        let value = parse("{ text: \"a\u{2028}b\u{2029}c\" }").unwrap();
        assert_eq!(
            value.get("text"),
            Some(&Value::String("a\u{2028}b\u{2029}c".to_string()))
        );
    }

    #[test]
    fn test_repeated_keys_keep_the_last_value() {
        let value = parse("{ a: 1, b: 2, a: 3 }").unwrap();
        assert_eq!(
            value,
            Value::Object(vec![
                ("a".to_string(), Value::Number(Number::PosInt(3))),
                ("b".to_string(), Value::Number(Number::PosInt(2))),
            ])
        );
    }

    #[test]
    fn test_syntax_errors_report_position() {
        let error = parse("{\n  volume: 50,\n  name: \"open\n}").unwrap_err();
        assert!(matches!(
            error,
            Json5Error::Syntax { line: 3, .. }
        ));

        for text in [
            "",
            "{ volume: }",
            "[1 2]",
            "{ a: 1 } extra",
            "/* open",
            "{ 1a: 2 }",
            "'\\1'",
            "\"\\uD800\"",
            "0x",
            "-",
            "1e",
        ] {
            assert!(parse(text).is_err(), "{text:?} should be rejected");
        }
    }
}
