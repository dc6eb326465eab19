//! core::arguments
//!
//! Canonical argument parsers.
//!
//! | Parser | Output | Accepts |
//! |---|---|---|
//! | [`BoolParser`] | `bool` | `true`, `false`, `1`, `0` |
//! | [`IntParser`] | `i32` | `^[-+]?[0-9]+$` |
//! | [`LongParser`] | `i64` | `^[-+]?[0-9]+$` |
//! | [`FloatParser`] | `f32` | `^[-+]?[0-9]*\.?[0-9]+$` |
//! | [`DoubleParser`] | `f64` | `^[-+]?[0-9]*\.?[0-9]+$` |
//! | [`StringParser`] | `String` | an unquoted token or a quoted string |
//! | [`GreedyStringParser`] | `String` | everything left in the input |
//!
//! Domain-specific parsers implement [`ArgumentParser`] the same way.

use super::error::{CommandError, ReaderError, ReaderErrorKind};
use super::parser::ArgumentParser;
use super::reader::StringReader;

/// Parses a boolean.
#[derive(Debug, Clone, Copy)]
pub struct BoolParser;

impl ArgumentParser for BoolParser {
    type Output = bool;
    const NAME: &'static str = "bool";

    fn parse(reader: &mut StringReader) -> Result<bool, CommandError> {
        Ok(reader.read_bool()?)
    }
}

/// Parses a 32-bit signed integer.
#[derive(Debug, Clone, Copy)]
pub struct IntParser;

impl ArgumentParser for IntParser {
    type Output = i32;
    const NAME: &'static str = "int";

    fn parse(reader: &mut StringReader) -> Result<i32, CommandError> {
        Ok(reader.read_int()?)
    }
}

/// Parses a 64-bit signed integer.
#[derive(Debug, Clone, Copy)]
pub struct LongParser;

impl ArgumentParser for LongParser {
    type Output = i64;
    const NAME: &'static str = "long";

    fn parse(reader: &mut StringReader) -> Result<i64, CommandError> {
        Ok(reader.read_long()?)
    }
}

/// Parses a 32-bit float.
#[derive(Debug, Clone, Copy)]
pub struct FloatParser;

impl ArgumentParser for FloatParser {
    type Output = f32;
    const NAME: &'static str = "float";

    fn parse(reader: &mut StringReader) -> Result<f32, CommandError> {
        Ok(reader.read_float()?)
    }
}

/// Parses a 64-bit float.
#[derive(Debug, Clone, Copy)]
pub struct DoubleParser;

impl ArgumentParser for DoubleParser {
    type Output = f64;
    const NAME: &'static str = "double";

    fn parse(reader: &mut StringReader) -> Result<f64, CommandError> {
        Ok(reader.read_double()?)
    }
}

/// Parses a single word or a quoted phrase.
#[derive(Debug, Clone, Copy)]
pub struct StringParser;

impl ArgumentParser for StringParser {
    type Output = String;
    const NAME: &'static str = "string";

    fn parse(reader: &mut StringReader) -> Result<String, CommandError> {
        Ok(reader.read_string()?)
    }
}

/// Consumes the rest of the input verbatim, quotes and spaces included.
#[derive(Debug, Clone, Copy)]
pub struct GreedyStringParser;

impl ArgumentParser for GreedyStringParser {
    type Output = String;
    const NAME: &'static str = "greedy string";

    fn parse(reader: &mut StringReader) -> Result<String, CommandError> {
        if !reader.can_read() {
            return Err(ReaderError::new(ReaderErrorKind::ExpectedString, reader.cursor()).into());
        }
        let rest = reader.remaining().to_string();
        reader.set_cursor(reader.total_len());
        Ok(rest)
    }
}
