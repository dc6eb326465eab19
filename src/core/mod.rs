//! core
//!
//! Input reading, argument parsing, and the context carrier.
//!
//! # Modules
//!
//! - [`reader`] - Cursor-based tokenizer over the input string
//! - [`parser`] - The argument parser contract and type-level parser lists
//! - [`arguments`] - Canonical parsers for bool, numbers, and strings
//! - [`source`] - Type-erased borrowed context passed to callbacks
//! - [`error`] - Error types shared by the whole engine
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - A failed read never moves the cursor
//! - Parsers are stateless and referred to only by type
//! - All errors carry the cursor position where they occurred

pub mod arguments;
pub mod config;
pub mod error;
pub mod parser;
pub mod reader;
pub mod source;
