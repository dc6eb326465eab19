//! core::reader
//!
//! Cursor-based scanner over an immutable command string.
//!
//! # Lexical Grammar
//!
//! - Tokens are separated by runs of whitespace
//! - Unquoted tokens match `[0-9A-Za-z_.+-]+`
//! - Quoted strings start with `'` or `"` and end at the matching unescaped
//!   quote; `\` escapes the next character, which is taken verbatim
//! - Integers match `^[-+]?[0-9]+$`, decimals match `^[-+]?[0-9]*\.?[0-9]+$`
//! - Booleans are `true`/`1` and `false`/`0`
//!
//! # Rollback
//!
//! Every `read_*` primitive restores the cursor to where it was when the
//! call started if it fails. Callers only need to snapshot the cursor around
//! multi-step attempts, never around a single primitive.
//!
//! # Example
//!
//! ```
//! use cmdtree::core::reader::StringReader;
//!
//! let mut reader = StringReader::new("tp 10 -2.5 'spawn point'");
//! assert_eq!(reader.read_unquoted_string().unwrap(), "tp");
//! assert_eq!(reader.read_int().unwrap(), 10);
//! assert_eq!(reader.read_double().unwrap(), -2.5);
//! assert_eq!(reader.read_string().unwrap(), "spawn point");
//! assert!(!reader.can_read());
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{ReaderError, ReaderErrorKind};

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("integer pattern is valid"));

static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("decimal pattern is valid"));

/// A scanner over a command string.
///
/// The cursor is a byte offset into the backing string and always sits on a
/// character boundary, with `0 <= cursor <= total_len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReader {
    string: String,
    cursor: usize,
}

impl StringReader {
    /// Create a reader positioned at the start of `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            string: input.into(),
            cursor: 0,
        }
    }

    /// Create a reader positioned at `cursor`.
    pub fn with_cursor(input: impl Into<String>, cursor: usize) -> Self {
        let mut reader = Self::new(input);
        reader.set_cursor(cursor);
        reader
    }

    /// The whole backing string.
    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor.
    ///
    /// Positions past the end are clamped to the end, and positions inside a
    /// multi-byte character snap back to the start of that character.
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.string.len());
        while !self.string.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn total_len(&self) -> usize {
        self.string.len()
    }

    pub fn remaining_len(&self) -> usize {
        self.string.len() - self.cursor
    }

    /// The part of the input already consumed.
    pub fn consumed(&self) -> &str {
        &self.string[..self.cursor]
    }

    /// The part of the input not yet consumed.
    pub fn remaining(&self) -> &str {
        &self.string[self.cursor..]
    }

    /// True if at least one character remains.
    pub fn can_read(&self) -> bool {
        self.cursor < self.string.len()
    }

    /// True if at least `length` characters remain.
    pub fn can_read_n(&self, length: usize) -> bool {
        length == 0 || self.remaining().chars().nth(length - 1).is_some()
    }

    /// The character under the cursor, if any.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The character `offset` characters past the cursor.
    ///
    /// # Errors
    ///
    /// Returns `ReaderErrorKind::PeekOutOfRange` if the offset is past the end.
    pub fn peek_at(&self, offset: usize) -> Result<char, ReaderError> {
        self.remaining().chars().nth(offset).ok_or_else(|| {
            ReaderError::new(ReaderErrorKind::PeekOutOfRange { offset }, self.cursor)
        })
    }

    /// Advance past the character under the cursor.
    pub fn skip(&mut self) {
        if let Some(c) = self.peek() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip();
        }
    }

    /// Characters allowed in an unquoted token.
    pub fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
    }

    /// Characters that open a quoted string.
    pub fn is_quoted_string_start(c: char) -> bool {
        c == '"' || c == '\''
    }

    /// Read a maximal run of unquoted-token characters.
    ///
    /// Trailing whitespace is skipped after a successful read.
    ///
    /// # Errors
    ///
    /// Returns `ReaderErrorKind::ExpectedString` if no token character is
    /// under the cursor.
    pub fn read_unquoted_string(&mut self) -> Result<String, ReaderError> {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_in_unquoted_string) {
            self.skip();
        }
        if self.cursor == start {
            return Err(ReaderError::new(ReaderErrorKind::ExpectedString, start));
        }
        let token = self.string[start..self.cursor].to_string();
        self.skip_whitespace();
        Ok(token)
    }

    /// Read a string wrapped in `'` or `"`.
    ///
    /// # Errors
    ///
    /// Returns `ReaderErrorKind::ExpectedQuote` if no quote is under the
    /// cursor, or any error from [`StringReader::read_string_until`].
    pub fn read_quoted_string(&mut self) -> Result<String, ReaderError> {
        let start = self.cursor;
        let quote = match self.peek() {
            Some(c) if Self::is_quoted_string_start(c) => c,
            _ => return Err(ReaderError::new(ReaderErrorKind::ExpectedQuote, start)),
        };
        self.skip();
        self.read_string_until(quote).map_err(|e| {
            self.cursor = start;
            ReaderError::new(e.kind, start)
        })
    }

    /// Read up to an unescaped `terminator` and consume the terminator.
    ///
    /// A backslash makes the next character literal; the backslash itself is
    /// dropped. Trailing whitespace is skipped after a successful read.
    ///
    /// # Errors
    ///
    /// - `ExpectedString` if the terminator immediately follows the cursor
    /// - `ExpectedEscapedCharacter` if the input ends right after a backslash
    /// - `ExpectedEndOfQuote` if the terminator never appears
    pub fn read_string_until(&mut self, terminator: char) -> Result<String, ReaderError> {
        let start = self.cursor;
        let mut result = String::new();
        let mut escaped = false;

        while let Some(c) = self.peek() {
            self.skip();
            if escaped {
                result.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == terminator {
                if result.is_empty() {
                    self.cursor = start;
                    return Err(ReaderError::new(ReaderErrorKind::ExpectedString, start));
                }
                self.skip_whitespace();
                return Ok(result);
            } else {
                result.push(c);
            }
        }

        self.cursor = start;
        let kind = if escaped {
            ReaderErrorKind::ExpectedEscapedCharacter
        } else {
            ReaderErrorKind::ExpectedEndOfQuote(terminator)
        };
        Err(ReaderError::new(kind, start))
    }

    /// Read a quoted string if a quote is under the cursor, an unquoted token otherwise.
    pub fn read_string(&mut self) -> Result<String, ReaderError> {
        match self.peek() {
            Some(c) if Self::is_quoted_string_start(c) => self.read_quoted_string(),
            _ => self.read_unquoted_string(),
        }
    }

    /// Read `true`/`1` or `false`/`0`.
    pub fn read_bool(&mut self) -> Result<bool, ReaderError> {
        let start = self.cursor;
        let token = self
            .read_unquoted_string()
            .map_err(|_| ReaderError::new(ReaderErrorKind::ExpectedBool, start))?;
        match token.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => {
                self.cursor = start;
                Err(ReaderError::new(ReaderErrorKind::InvalidBool(token), start))
            }
        }
    }

    /// Read a 32-bit signed integer.
    pub fn read_int(&mut self) -> Result<i32, ReaderError> {
        self.read_number(
            &INTEGER_PATTERN,
            ReaderErrorKind::ExpectedInt,
            ReaderErrorKind::InvalidInt,
            parse_exact::<i32>,
        )
    }

    /// Read a 64-bit signed integer.
    pub fn read_long(&mut self) -> Result<i64, ReaderError> {
        self.read_number(
            &INTEGER_PATTERN,
            ReaderErrorKind::ExpectedLong,
            ReaderErrorKind::InvalidLong,
            parse_exact::<i64>,
        )
    }

    /// Read a finite 32-bit float.
    pub fn read_float(&mut self) -> Result<f32, ReaderError> {
        self.read_number(
            &DECIMAL_PATTERN,
            ReaderErrorKind::ExpectedFloat,
            ReaderErrorKind::InvalidFloat,
            |token| parse_exact::<f32>(token).filter(|v| v.is_finite()),
        )
    }

    /// Read a finite 64-bit float.
    pub fn read_double(&mut self) -> Result<f64, ReaderError> {
        self.read_number(
            &DECIMAL_PATTERN,
            ReaderErrorKind::ExpectedDouble,
            ReaderErrorKind::InvalidDouble,
            |token| parse_exact::<f64>(token).filter(|v| v.is_finite()),
        )
    }

    fn read_number<T>(
        &mut self,
        pattern: &Regex,
        expected: ReaderErrorKind,
        invalid: fn(String) -> ReaderErrorKind,
        convert: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ReaderError> {
        let start = self.cursor;
        let token = self
            .read_unquoted_string()
            .map_err(|_| ReaderError::new(expected, start))?;

        let value = if pattern.is_match(&token) {
            convert(&token)
        } else {
            None
        };

        value.ok_or_else(|| {
            self.cursor = start;
            ReaderError::new(invalid(token), start)
        })
    }
}

fn parse_exact<T: FromStr>(token: &str) -> Option<T> {
    token.parse().ok()
}

impl From<&str> for StringReader {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}

impl From<String> for StringReader {
    fn from(input: String) -> Self {
        Self::new(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> StringReader {
        StringReader::new("Hello World")
    }

    #[test]
    fn skip_advances_one_character() {
        let mut reader = hello();
        reader.skip();
        assert_eq!(reader.cursor(), 1);
        assert_eq!(reader.consumed(), "H");
        assert_eq!(reader.remaining(), "ello World");
        assert!(reader.can_read());
        assert!(reader.can_read_n(1));
    }

    #[test]
    fn lengths_track_cursor() {
        let mut reader = hello();
        assert_eq!(reader.remaining_len(), 11);
        assert_eq!(reader.total_len(), 11);
        reader.skip();
        assert_eq!(reader.remaining_len(), 10);
        assert_eq!(reader.total_len(), 11);
    }

    #[test]
    fn fresh_reader_has_consumed_nothing() {
        let reader = hello();
        assert_eq!(reader.cursor(), 0);
        assert_eq!(reader.consumed(), "");
        assert_eq!(reader.remaining(), "Hello World");
        assert_eq!(reader.string(), "Hello World");
    }

    #[test]
    fn can_read_n_counts_remaining_characters() {
        let mut reader = StringReader::new("abc");
        assert!(reader.can_read_n(3));
        assert!(!reader.can_read_n(4));
        reader.set_cursor(2);
        assert!(reader.can_read_n(1));
        assert!(!reader.can_read_n(2));
        reader.set_cursor(3);
        assert!(!reader.can_read());
        assert!(reader.can_read_n(0));
    }

    #[test]
    fn peek_does_not_move_cursor() {
        let reader = hello();
        assert_eq!(reader.peek(), Some('H'));
        assert_eq!(reader.peek_at(6).unwrap(), 'W');
        assert_eq!(reader.cursor(), 0);
    }

    #[test]
    fn peek_past_end_fails() {
        let mut reader = StringReader::new("ab");
        reader.skip();
        let err = reader.peek_at(1).unwrap_err();
        assert_eq!(err.kind, ReaderErrorKind::PeekOutOfRange { offset: 1 });
        assert_eq!(reader.cursor(), 1);

        reader.skip();
        assert_eq!(reader.peek(), None);
    }

    #[test]
    fn set_cursor_clamps_to_end() {
        let mut reader = StringReader::new("abc");
        reader.set_cursor(10);
        assert_eq!(reader.cursor(), 3);
    }

    #[test]
    fn set_cursor_snaps_to_char_boundary() {
        let mut reader = StringReader::new("é!");
        reader.set_cursor(1);
        assert_eq!(reader.cursor(), 0);
        reader.skip();
        assert_eq!(reader.cursor(), 2);
        assert_eq!(reader.peek(), Some('!'));
    }

    #[test]
    fn reads_words_separated_by_whitespace() {
        let mut reader = hello();
        assert_eq!(reader.read_string().unwrap(), "Hello");
        assert_eq!(reader.consumed(), "Hello ");
        assert_eq!(reader.read_string().unwrap(), "World");
        assert_eq!(reader.consumed(), "Hello World");
        assert_eq!(reader.remaining(), "");
        assert!(!reader.can_read());
    }

    #[test]
    fn unquoted_character_class() {
        for c in ['H', 'e', 'w', '5', '_', '-', '.', '+'] {
            assert!(StringReader::is_allowed_in_unquoted_string(c), "{c:?}");
        }
        for c in [' ', '\t', '\n', '\r', '!', '"', '\'', '/'] {
            assert!(!StringReader::is_allowed_in_unquoted_string(c), "{c:?}");
        }
    }

    #[test]
    fn unquoted_stops_at_disallowed_character() {
        let mut reader = StringReader::new("Hello!");
        assert_eq!(reader.read_unquoted_string().unwrap(), "Hello");
        assert_eq!(reader.remaining(), "!");
        let err = reader.read_unquoted_string().unwrap_err();
        assert_eq!(err.kind, ReaderErrorKind::ExpectedString);
        assert_eq!(reader.cursor(), 5);
    }

    #[test]
    fn empty_input_has_no_string() {
        let mut reader = StringReader::new("");
        assert_eq!(
            reader.read_string().unwrap_err().kind,
            ReaderErrorKind::ExpectedString
        );
    }

    #[test]
    fn quoted_string_with_spaces() {
        let mut reader = StringReader::new("'a b' rest");
        assert_eq!(reader.read_string().unwrap(), "a b");
        assert_eq!(reader.remaining(), "rest");
    }

    #[test]
    fn double_quoted_string_keeps_single_quotes() {
        let mut reader = StringReader::new("\"it's here\"");
        assert_eq!(reader.read_quoted_string().unwrap(), "it's here");
        assert!(!reader.can_read());
    }

    #[test]
    fn escaped_terminator_is_kept() {
        let mut reader = StringReader::new(r#""say \"hi\" \\ now""#);
        assert_eq!(reader.read_quoted_string().unwrap(), r#"say "hi" \ now"#);
    }

    #[test]
    fn escape_does_not_interpret_letters() {
        let mut reader = StringReader::new(r"'a\nb'");
        assert_eq!(reader.read_quoted_string().unwrap(), "anb");
    }

    #[test]
    fn unterminated_quote_rolls_back() {
        let mut reader = StringReader::new("'a b");
        let err = reader.read_string().unwrap_err();
        assert_eq!(err.kind, ReaderErrorKind::ExpectedEndOfQuote('\''));
        assert_eq!(err.cursor, 0);
        assert_eq!(reader.cursor(), 0);
    }

    #[test]
    fn dangling_escape_rolls_back() {
        let mut reader = StringReader::new("x 'abc\\");
        reader.read_unquoted_string().unwrap();
        let err = reader.read_quoted_string().unwrap_err();
        assert_eq!(err.kind, ReaderErrorKind::ExpectedEscapedCharacter);
        assert_eq!(reader.cursor(), 2);
    }

    #[test]
    fn empty_quoted_string_is_an_error() {
        let mut reader = StringReader::new("''");
        assert_eq!(
            reader.read_quoted_string().unwrap_err().kind,
            ReaderErrorKind::ExpectedString
        );
        assert_eq!(reader.cursor(), 0);
    }

    #[test]
    fn quoted_string_requires_quote() {
        let mut reader = StringReader::new("abc");
        assert_eq!(
            reader.read_quoted_string().unwrap_err().kind,
            ReaderErrorKind::ExpectedQuote
        );
    }

    #[test]
    fn read_string_until_custom_terminator() {
        let mut reader = StringReader::new("key=value");
        assert_eq!(reader.read_string_until('=').unwrap(), "key");
        assert_eq!(reader.remaining(), "value");
    }

    #[test]
    fn easy_int() {
        assert_eq!(StringReader::new("123").read_int().unwrap(), 123);
        assert!(StringReader::new("123a").read_int().is_err());
        assert!(StringReader::new("a123").read_int().is_err());
    }

    #[test]
    fn negative_and_signed_int() {
        assert_eq!(StringReader::new("-123").read_int().unwrap(), -123);
        assert_eq!(StringReader::new("+42").read_int().unwrap(), 42);
        assert!(StringReader::new("-123a").read_int().is_err());
        assert!(StringReader::new("a-123").read_int().is_err());
    }

    #[test]
    fn int_limits() {
        assert!(StringReader::new("12345678901234567890").read_int().is_err());
        assert!(StringReader::new("2147483648").read_int().is_err());
        assert!(StringReader::new("-2147483649").read_int().is_err());
        assert_eq!(
            StringReader::new(i32::MIN.to_string()).read_int().unwrap(),
            i32::MIN
        );
        assert_eq!(
            StringReader::new(i32::MAX.to_string()).read_int().unwrap(),
            i32::MAX
        );
    }

    #[test]
    fn int_zero() {
        assert_eq!(StringReader::new("0").read_int().unwrap(), 0);
        assert_eq!(StringReader::new("-0").read_int().unwrap(), 0);
    }

    #[test]
    fn int_rejects_decimal() {
        let mut reader = StringReader::new("5.5");
        let err = reader.read_int().unwrap_err();
        assert_eq!(err.kind, ReaderErrorKind::InvalidInt("5.5".into()));
        assert_eq!(reader.cursor(), 0);
    }

    #[test]
    fn long_accepts_beyond_int_range() {
        assert_eq!(
            StringReader::new("2147483648").read_long().unwrap(),
            2_147_483_648
        );
        assert_eq!(
            StringReader::new(i64::MIN.to_string()).read_long().unwrap(),
            i64::MIN
        );
        assert!(StringReader::new("9223372036854775808").read_long().is_err());
    }

    #[test]
    fn easy_double() {
        assert_eq!(StringReader::new("123").read_double().unwrap(), 123.0);
        assert_eq!(StringReader::new("-123").read_double().unwrap(), -123.0);
        assert_eq!(StringReader::new(".5").read_double().unwrap(), 0.5);
        assert!(StringReader::new("123a").read_double().is_err());
        assert!(StringReader::new("a123").read_double().is_err());
        assert!(StringReader::new("-123a").read_double().is_err());
    }

    #[test]
    fn decimal_grammar_rejections() {
        for input in ["5.5.5", "1e5", "5.", "-", ".", "--1"] {
            let mut reader = StringReader::new(input);
            assert!(reader.read_double().is_err(), "{input}");
            assert_eq!(reader.cursor(), 0, "{input}");
        }
    }

    #[test]
    fn double_limits() {
        let huge = format!("1{}.5", "0".repeat(320));
        assert!(StringReader::new(huge).read_double().is_err());
        assert_eq!(
            StringReader::new(f64::MAX.to_string())
                .read_double()
                .unwrap(),
            f64::MAX
        );
        assert_eq!(
            StringReader::new(f64::MIN.to_string())
                .read_double()
                .unwrap(),
            f64::MIN
        );
    }

    #[test]
    fn float_limits() {
        let mut reader =
            StringReader::new("34028234663852885981170418348451692544124242352341234.000000001");
        assert!(reader.read_float().is_err());
        assert_eq!(
            StringReader::new(f32::MAX.to_string()).read_float().unwrap(),
            f32::MAX
        );
        assert_eq!(
            StringReader::new(f32::MIN.to_string()).read_float().unwrap(),
            f32::MIN
        );
    }

    #[test]
    fn easy_float() {
        assert_eq!(StringReader::new("5.5").read_float().unwrap(), 5.5);
        assert_eq!(StringReader::new("-123").read_float().unwrap(), -123.0);
        assert!(StringReader::new("5.5.5").read_float().is_err());
    }

    #[test]
    fn bool_words_and_digits() {
        assert!(StringReader::new("true").read_bool().unwrap());
        assert!(!StringReader::new("false").read_bool().unwrap());
        assert!(StringReader::new("1").read_bool().unwrap());
        assert!(!StringReader::new("0").read_bool().unwrap());
    }

    #[test]
    fn bool_rejects_other_tokens() {
        let mut reader = StringReader::new("5.5");
        let err = reader.read_bool().unwrap_err();
        assert_eq!(err.kind, ReaderErrorKind::InvalidBool("5.5".into()));
        assert_eq!(reader.cursor(), 0);

        assert!(StringReader::new("TRUE").read_bool().is_err());
        assert_eq!(
            StringReader::new("").read_bool().unwrap_err().kind,
            ReaderErrorKind::ExpectedBool
        );
    }

    #[test]
    fn numbers_skip_trailing_whitespace() {
        let mut reader = StringReader::new("12   34");
        assert_eq!(reader.read_int().unwrap(), 12);
        assert_eq!(reader.cursor(), 5);
        assert_eq!(reader.read_int().unwrap(), 34);
        assert!(!reader.can_read());
    }

    #[test]
    fn failed_read_mid_input_restores_cursor() {
        let mut reader = StringReader::new("give 12x");
        reader.read_unquoted_string().unwrap();
        let before = reader.cursor();
        let err = reader.read_int().unwrap_err();
        assert_eq!(err.cursor, before);
        assert_eq!(reader.cursor(), before);
    }
}
