//! core::error
//!
//! Error taxonomy for the command engine.
//!
//! # Kinds
//!
//! - [`ReaderError`] - Scan failure raised by [`StringReader`] primitives
//! - [`CommandError::Syntax`] - Structural failure raised while walking the tree
//! - [`CommandError::Parser`] - Semantic failure raised by an argument parser
//! - [`CommandError::Context`] - Source fetched as the wrong type
//! - [`CommandError::UnknownCommand`] - No top-level node matched the input
//!
//! Every error that relates to a position in the input carries the cursor
//! at which it was raised, and renders as `"<message> at position <cursor>"`.
//!
//! [`StringReader`]: crate::core::reader::StringReader

use thiserror::Error;

use super::source::ContextError;

/// What a reader primitive expected or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    #[error("Expected string")]
    ExpectedString,

    #[error("Expected quote")]
    ExpectedQuote,

    #[error("Expected quote '{0}' to end string")]
    ExpectedEndOfQuote(char),

    #[error("Expected character after escape")]
    ExpectedEscapedCharacter,

    #[error("Expected bool")]
    ExpectedBool,

    #[error("Invalid bool '{0}'")]
    InvalidBool(String),

    #[error("Expected int")]
    ExpectedInt,

    #[error("Invalid int '{0}'")]
    InvalidInt(String),

    #[error("Expected long")]
    ExpectedLong,

    #[error("Invalid long '{0}'")]
    InvalidLong(String),

    #[error("Expected float")]
    ExpectedFloat,

    #[error("Invalid float '{0}'")]
    InvalidFloat(String),

    #[error("Expected double")]
    ExpectedDouble,

    #[error("Invalid double '{0}'")]
    InvalidDouble(String),

    #[error("Cannot peek {offset} characters past the cursor")]
    PeekOutOfRange { offset: usize },
}

/// A scan error raised by a reader primitive.
///
/// The cursor is the position the reader was restored to, which is always
/// the position held when the failing call started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {cursor}")]
pub struct ReaderError {
    /// What went wrong.
    pub kind: ReaderErrorKind,
    /// Cursor position at which the failing read started.
    pub cursor: usize,
}

impl ReaderError {
    pub fn new(kind: ReaderErrorKind, cursor: usize) -> Self {
        Self { kind, cursor }
    }
}

/// Errors surfaced by parsing, validation and dispatch.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A lexical primitive failed.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// The input does not fit the shape of the command tree.
    #[error("{message} at position {cursor}")]
    Syntax { message: String, cursor: usize },

    /// An argument parser rejected a lexically valid value.
    #[error("{parser}: {message} at position {cursor}")]
    Parser {
        parser: &'static str,
        message: String,
        cursor: usize,
    },

    /// The source object was fetched as the wrong type.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The leading literal names no registered command.
    #[error("Unknown command '{literal}' at position {cursor}")]
    UnknownCommand { literal: String, cursor: usize },

    /// The input exceeds the configured length limit.
    #[error("input is {length} characters long, the limit is {limit}")]
    InputTooLong { length: usize, limit: usize },

    /// The bound callback returned an error.
    #[error(transparent)]
    Callback(anyhow::Error),
}

impl CommandError {
    /// Build a syntax error at the given cursor.
    pub fn syntax(message: impl Into<String>, cursor: usize) -> Self {
        CommandError::Syntax {
            message: message.into(),
            cursor,
        }
    }

    /// Build a parser error for the named parser at the given cursor.
    pub fn parser(parser: &'static str, message: impl Into<String>, cursor: usize) -> Self {
        CommandError::Parser {
            parser,
            message: message.into(),
            cursor,
        }
    }

    /// Position in the input the error refers to, if any.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            CommandError::Reader(e) => Some(e.cursor),
            CommandError::Syntax { cursor, .. }
            | CommandError::Parser { cursor, .. }
            | CommandError::UnknownCommand { cursor, .. } => Some(*cursor),
            CommandError::Context(_)
            | CommandError::InputTooLong { .. }
            | CommandError::Callback(_) => None,
        }
    }

    /// True for scan and syntax errors, the failures caused by the shape of the input.
    pub fn is_syntax(&self) -> bool {
        matches!(self, CommandError::Reader(_) | CommandError::Syntax { .. })
    }
}
