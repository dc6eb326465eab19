//! engine::node
//!
//! Command tree nodes and the matching algorithm.
//!
//! # Matching
//!
//! Every traversal entry point follows the same descent:
//!
//! 1. Snapshot the cursor
//! 2. Read one token; if it names a child (by name or alias), descend into it
//! 3. Otherwise rewind to the snapshot and consume this node's own arguments
//!
//! `parse` then invokes the bound callback with the decoded values,
//! `is_valid_input` reports whether that would succeed, and
//! `list_suggestions` returns the node's suggestion provider output.
//!
//! # Invariants
//!
//! - A failed `parse` leaves the cursor where it was when the call started
//! - `is_valid_input` and `list_suggestions` never fail and never move the cursor
//! - Permission predicates are evaluated only through [`Node::can_use`]; the
//!   traversal itself never consults them

use std::fmt;

use tracing::{debug, trace};

use crate::core::error::CommandError;
use crate::core::parser::{Argument, ParserList};
use crate::core::reader::StringReader;
use crate::core::source::{ContextError, Source};

/// A callback bound to a node with argument list `L`.
pub type Callback<L> =
    Box<dyn Fn(&Source<'_>, <L as ParserList>::Values) -> anyhow::Result<()> + Send + Sync>;

/// Decides whether a source may use a node.
pub type Permission = Box<dyn Fn(&Source<'_>) -> bool + Send + Sync>;

/// Produces completion candidates for a node.
pub type SuggestionProvider = Box<dyn Fn(&Source<'_>) -> Vec<String> + Send + Sync>;

/// The traversal protocol shared by command nodes and the registry.
///
/// Trees are immutable once built and can be shared across threads; every
/// call takes its own reader and source.
pub trait Node: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn aliases(&self) -> &[String];

    /// Argument slots consumed when this node is the endpoint.
    fn arguments(&self) -> &[Argument];

    fn children(&self) -> &[Box<dyn Node>];

    /// True if a callback is bound, i.e. the node can end a command.
    fn is_executable(&self) -> bool;

    /// Evaluate the permission predicate for `source`.
    fn can_use(&self, source: &Source<'_>) -> bool;

    /// Match the input against this subtree and run the selected callback.
    ///
    /// # Errors
    ///
    /// Returns the error of the failing step. The cursor is restored to where
    /// it was when the call started.
    fn parse(&self, source: &Source<'_>, reader: &mut StringReader) -> Result<(), CommandError>;

    /// True if `parse` would reach a callback and the arguments end at a
    /// token boundary.
    ///
    /// Stricter than `parse`, which ignores whatever follows the last
    /// argument.
    fn is_valid_input(&self, reader: &mut StringReader) -> bool;

    /// Completion candidates for the input.
    fn list_suggestions(&self, source: &Source<'_>, reader: &mut StringReader) -> Vec<String>;

    /// True if `literal` is this node's name or one of its aliases.
    fn matches(&self, literal: &str) -> bool {
        self.name() == literal || self.aliases().iter().any(|alias| alias == literal)
    }

    /// First child matching `literal`, in declaration order.
    fn child(&self, literal: &str) -> Option<&dyn Node> {
        self.children()
            .iter()
            .find(|child| child.matches(literal))
            .map(|child| child.as_ref())
    }

    /// Render as `name <arg> [optional]`.
    fn usage(&self) -> String {
        std::iter::once(self.name().to_string())
            .chain(self.arguments().iter().map(Argument::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Read one token as a candidate literal.
///
/// On failure the reader primitive has already restored the cursor.
pub(crate) fn read_literal(reader: &mut StringReader) -> Option<String> {
    reader.read_string().ok()
}

/// True if nothing is left or the next character separates arguments.
pub(crate) fn at_argument_boundary(reader: &StringReader) -> bool {
    reader.peek().map_or(true, char::is_whitespace)
}

/// A node whose argument list is the parser tuple `L`.
///
/// Built by [`CommandBuilder`](super::builder::CommandBuilder).
pub struct CommandNode<L: ParserList> {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) aliases: Vec<String>,
    pub(crate) children: Vec<Box<dyn Node>>,
    pub(crate) permission: Option<Permission>,
    pub(crate) callback: Option<Callback<L>>,
    pub(crate) suggestions: Option<SuggestionProvider>,
}

impl<L: ParserList> CommandNode<L> {
    fn dispatch(&self, source: &Source<'_>, reader: &mut StringReader) -> Result<(), CommandError> {
        let start = reader.cursor();
        if let Some(literal) = read_literal(reader) {
            if let Some(child) = self.child(&literal) {
                debug!(node = %self.name, child = child.name(), "descending into subcommand");
                return child.parse(source, reader);
            }
        }
        reader.set_cursor(start);

        let Some(callback) = &self.callback else {
            trace!(node = %self.name, cursor = start, "no callback bound");
            return Err(CommandError::syntax("Invalid command", start));
        };

        let values = L::parse_all(reader)?;

        debug!(node = %self.name, "invoking callback");
        callback(source, values).map_err(into_command_error)
    }

    fn validate(&self, reader: &mut StringReader) -> bool {
        let start = reader.cursor();
        if let Some(literal) = read_literal(reader) {
            if let Some(child) = self.child(&literal) {
                return child.is_valid_input(reader);
            }
        }
        reader.set_cursor(start);

        self.callback.is_some() && L::parse_all(reader).is_ok() && at_argument_boundary(reader)
    }

    fn suggest(&self, source: &Source<'_>, reader: &mut StringReader) -> Vec<String> {
        let start = reader.cursor();
        if let Some(literal) = read_literal(reader) {
            if let Some(child) = self.child(&literal) {
                return child.list_suggestions(source, reader);
            }
        }
        reader.set_cursor(start);

        match L::parse_all(reader) {
            Ok(_) => self
                .suggestions
                .as_ref()
                .map(|provider| provider(source))
                .unwrap_or_default(),
            Err(e) => {
                trace!(node = %self.name, error = %e, "arguments do not parse, no suggestions");
                Vec::new()
            }
        }
    }
}

/// Surface engine errors raised inside a callback as themselves.
fn into_command_error(error: anyhow::Error) -> CommandError {
    match error.downcast::<CommandError>() {
        Ok(e) => e,
        Err(error) => match error.downcast::<ContextError>() {
            Ok(e) => CommandError::Context(e),
            Err(error) => CommandError::Callback(error),
        },
    }
}

impl<L: ParserList> Node for CommandNode<L> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    fn children(&self) -> &[Box<dyn Node>] {
        &self.children
    }

    fn is_executable(&self) -> bool {
        self.callback.is_some()
    }

    fn can_use(&self, source: &Source<'_>) -> bool {
        self.permission
            .as_ref()
            .map_or(true, |permission| permission(source))
    }

    fn parse(&self, source: &Source<'_>, reader: &mut StringReader) -> Result<(), CommandError> {
        let start = reader.cursor();
        let result = self.dispatch(source, reader);
        if result.is_err() {
            reader.set_cursor(start);
        }
        result
    }

    fn is_valid_input(&self, reader: &mut StringReader) -> bool {
        let start = reader.cursor();
        let valid = self.validate(reader);
        reader.set_cursor(start);
        valid
    }

    fn list_suggestions(&self, source: &Source<'_>, reader: &mut StringReader) -> Vec<String> {
        let start = reader.cursor();
        let suggestions = self.suggest(source, reader);
        reader.set_cursor(start);
        suggestions
    }
}

impl<L: ParserList> fmt::Debug for CommandNode<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("arguments", &self.arguments)
            .field("children", &self.children.len())
            .field("executable", &self.callback.is_some())
            .finish()
    }
}
