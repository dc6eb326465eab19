//! core::parser
//!
//! The argument parsing contract.
//!
//! # Overview
//!
//! An argument type is any type implementing [`ArgumentParser`]: a stateless
//! function from a [`StringReader`] to a typed value. Parsers are never
//! instantiated; a command node refers to them purely at the type level.
//!
//! A node's argument sequence is a tuple of parser types, e.g.
//! `(StringParser, IntParser)`. [`ParserList`] turns that tuple into a tuple of
//! produced values, and [`Append`] extends it by one parser. This is what lets
//! the builder derive a callback's exact signature from the declared
//! arguments at compile time.
//!
//! # Example
//!
//! ```
//! use cmdtree::core::arguments::{IntParser, StringParser};
//! use cmdtree::core::parser::ParserList;
//! use cmdtree::core::reader::StringReader;
//!
//! let mut reader = StringReader::new("alice 15");
//! let (name, score) = <(StringParser, IntParser)>::parse_all(&mut reader).unwrap();
//! assert_eq!(name, "alice");
//! assert_eq!(score, 15);
//! ```

use super::error::CommandError;
use super::reader::StringReader;

/// A type that can be parsed from a command string.
///
/// Implementations must either consume the text of their value (and any
/// trailing whitespace) or fail. A failing implementation built from
/// `StringReader` primitives leaves the cursor untouched; the command node
/// restores the cursor for any other failure.
pub trait ArgumentParser: 'static {
    /// The value produced.
    type Output;

    /// Short name of the value kind, used in usage and error messages.
    const NAME: &'static str;

    /// Consume one value from `reader`.
    fn parse(reader: &mut StringReader) -> Result<Self::Output, CommandError>;
}

/// Descriptive metadata for one argument slot.
///
/// Carries no behavior; parsing is done by the parser type bound to the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Kind name of the bound parser, filled in by the builder.
    pub kind: &'static str,
}

impl Argument {
    /// A required argument with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: true,
            kind: "",
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the argument as optional in usage output.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Render as `<name>` when required, `[name]` otherwise.
    pub fn usage(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

/// An ordered list of parser types, represented as a tuple.
pub trait ParserList: 'static {
    /// Tuple of the values produced by each parser, in order.
    type Values;

    /// Run every parser in order.
    ///
    /// Stops at the first failure. The cursor is not restored here; the
    /// caller owns the snapshot for the whole sequence.
    fn parse_all(reader: &mut StringReader) -> Result<Self::Values, CommandError>;
}

/// A parser list that can be extended by one more parser.
pub trait Append<P: ArgumentParser>: ParserList {
    /// The list with `P` appended.
    type Extended: ParserList;
}

macro_rules! parser_list {
    ($($parser:ident),*) => {
        impl<$($parser: ArgumentParser),*> ParserList for ($($parser,)*) {
            type Values = ($(<$parser as ArgumentParser>::Output,)*);

            #[allow(unused_variables)]
            fn parse_all(reader: &mut StringReader) -> Result<Self::Values, CommandError> {
                Ok(($(<$parser as ArgumentParser>::parse(reader)?,)*))
            }
        }
    };
}

macro_rules! append {
    ($($parser:ident),*) => {
        impl<$($parser: ArgumentParser,)* Next: ArgumentParser> Append<Next> for ($($parser,)*) {
            type Extended = ($($parser,)* Next,);
        }
    };
}

parser_list!();
parser_list!(P1);
parser_list!(P1, P2);
parser_list!(P1, P2, P3);
parser_list!(P1, P2, P3, P4);
parser_list!(P1, P2, P3, P4, P5);
parser_list!(P1, P2, P3, P4, P5, P6);
parser_list!(P1, P2, P3, P4, P5, P6, P7);
parser_list!(P1, P2, P3, P4, P5, P6, P7, P8);

append!();
append!(P1);
append!(P1, P2);
append!(P1, P2, P3);
append!(P1, P2, P3, P4);
append!(P1, P2, P3, P4, P5);
append!(P1, P2, P3, P4, P5, P6);
append!(P1, P2, P3, P4, P5, P6, P7);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arguments::{BoolParser, DoubleParser, GreedyStringParser, IntParser};

    #[test]
    fn empty_list_consumes_nothing() {
        let mut reader = StringReader::new("anything");
        <()>::parse_all(&mut reader).unwrap();
        assert_eq!(reader.cursor(), 0);
    }

    #[test]
    fn parses_in_declared_order() {
        let mut reader = StringReader::new("true 2.5 3 rest of it");
        let (flag, ratio, count, tail) =
            <(BoolParser, DoubleParser, IntParser, GreedyStringParser)>::parse_all(&mut reader)
                .unwrap();
        assert!(flag);
        assert_eq!(ratio, 2.5);
        assert_eq!(count, 3);
        assert_eq!(tail, "rest of it");
    }

    #[test]
    fn stops_at_first_failure() {
        let mut reader = StringReader::new("1 x 3");
        let err = <(IntParser, IntParser, IntParser)>::parse_all(&mut reader).unwrap_err();
        assert_eq!(err.cursor(), Some(2));
    }

    #[test]
    fn append_extends_the_tuple() {
        fn values_of<L: ParserList>(input: &str) -> L::Values {
            L::parse_all(&mut StringReader::new(input)).unwrap()
        }
        type Extended = <(IntParser,) as Append<BoolParser>>::Extended;
        let (n, b): (i32, bool) = values_of::<Extended>("4 false");
        assert_eq!(n, 4);
        assert!(!b);
    }

    #[test]
    fn argument_usage() {
        assert_eq!(Argument::new("score").usage(), "<score>");
        assert_eq!(Argument::new("reason").optional().usage(), "[reason]");
        let arg = Argument::new("x").description("X coordinate");
        assert_eq!(arg.description, "X coordinate");
        assert!(arg.required);
    }
}
