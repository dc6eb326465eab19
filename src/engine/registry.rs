//! engine::registry
//!
//! The root of a command tree.
//!
//! # Overview
//!
//! A [`Registry`] holds the top-level commands and routes an input string to
//! the one named by its first token. Top-level literals are matched against
//! each command's name and aliases in registration order; the first match
//! wins.
//!
//! The registry also implements [`Node`] so it can be nested or handed to code
//! that walks trees generically. Its name is `<root>`.
//!
//! # Permissions
//!
//! Traversal never checks permissions. Callers that want to hide or refuse
//! commands use [`Registry::available`], [`Registry::usage_lines`], or
//! [`Node::can_use`] directly.

use std::any::Any;

use tracing::{debug, trace};

use crate::core::error::CommandError;
use crate::core::parser::Argument;
use crate::core::reader::StringReader;
use crate::core::source::Source;

use super::node::{read_literal, Node};

/// Tunables applied to every entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Inputs longer than this many characters are rejected without parsing.
    pub max_input_length: Option<usize>,
}

/// Ordered collection of top-level commands.
#[derive(Default)]
pub struct Registry {
    nodes: Vec<Box<dyn Node>>,
    options: RegistryOptions,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            nodes: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Register a top-level command.
    ///
    /// Nodes registered earlier take precedence when literals collide.
    pub fn add(&mut self, node: impl Into<Box<dyn Node>>) -> &mut Self {
        let node = node.into();
        if self.get(node.name()).is_some() {
            debug!(literal = node.name(), "command shadowed by an earlier registration");
        }
        self.nodes.push(node);
        self
    }

    pub fn nodes(&self) -> &[Box<dyn Node>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The top-level command matching `literal` by name or alias.
    pub fn get(&self, literal: &str) -> Option<&dyn Node> {
        self.nodes
            .iter()
            .find(|node| node.matches(literal))
            .map(|node| node.as_ref())
    }

    /// Top-level commands `source` is permitted to use, in registration order.
    pub fn available(&self, source: &Source<'_>) -> Vec<&dyn Node> {
        self.nodes
            .iter()
            .filter(|node| node.can_use(source))
            .map(|node| node.as_ref())
            .collect()
    }

    /// One usage line per executable path `source` is permitted to use.
    ///
    /// Lines are depth-first in registration order, e.g.
    /// `scoreboard players set <player> <score>`.
    pub fn usage_lines(&self, source: &Source<'_>) -> Vec<String> {
        let mut lines = Vec::new();
        for node in self.available(source) {
            collect_usage(node, "", source, &mut lines);
        }
        lines
    }

    /// Route the input to the command named by its first token and run it.
    ///
    /// # Errors
    ///
    /// - `CommandError::InputTooLong` if the input exceeds the configured limit
    /// - `CommandError::UnknownCommand` if no command matches the first token
    /// - Any error raised while matching, parsing, or running the callback
    ///
    /// The cursor is restored on failure.
    pub fn parse(&self, source: &Source<'_>, reader: &mut StringReader) -> Result<(), CommandError> {
        self.check_length(reader)?;
        let start = reader.cursor();
        let result = self.route(source, reader);
        if result.is_err() {
            reader.set_cursor(start);
        }
        result
    }

    /// Parse `input` from the beginning.
    ///
    /// # Errors
    ///
    /// See [`Registry::parse`].
    pub fn parse_str(&self, source: &Source<'_>, input: &str) -> Result<(), CommandError> {
        self.parse(source, &mut StringReader::new(input))
    }

    /// Parse `input` with `source` as the context object.
    ///
    /// # Errors
    ///
    /// See [`Registry::parse`].
    pub fn execute<T: Any>(&self, source: &T, input: &str) -> Result<(), CommandError> {
        self.parse_str(&Source::new(source), input)
    }

    /// True if `parse` would reach a callback with nothing unread after the
    /// last argument token. Never moves the cursor.
    pub fn is_valid_input(&self, reader: &mut StringReader) -> bool {
        if self.check_length(reader).is_err() {
            return false;
        }
        let start = reader.cursor();
        let valid = self.validate(reader);
        reader.set_cursor(start);
        valid
    }

    pub fn is_valid(&self, input: &str) -> bool {
        self.is_valid_input(&mut StringReader::new(input))
    }

    /// Completion candidates for the input. Never moves the cursor.
    pub fn list_suggestions(&self, source: &Source<'_>, reader: &mut StringReader) -> Vec<String> {
        if self.check_length(reader).is_err() {
            return Vec::new();
        }
        let start = reader.cursor();
        let suggestions = self.suggest_from(source, reader);
        reader.set_cursor(start);
        suggestions
    }

    pub fn suggest(&self, source: &Source<'_>, input: &str) -> Vec<String> {
        self.list_suggestions(source, &mut StringReader::new(input))
    }

    fn check_length(&self, reader: &StringReader) -> Result<(), CommandError> {
        let Some(limit) = self.options.max_input_length else {
            return Ok(());
        };
        let length = reader.string().chars().count();
        if length > limit {
            return Err(CommandError::InputTooLong { length, limit });
        }
        Ok(())
    }

    fn route(&self, source: &Source<'_>, reader: &mut StringReader) -> Result<(), CommandError> {
        reader.skip_whitespace();
        let literal_start = reader.cursor();
        let literal = reader.read_string()?;

        match self.get(&literal) {
            Some(node) => {
                debug!(node = node.name(), cursor = reader.cursor(), "routing command");
                node.parse(source, reader)
            }
            None => {
                debug!(literal = %literal, cursor = literal_start, "unknown command");
                Err(CommandError::UnknownCommand {
                    literal,
                    cursor: literal_start,
                })
            }
        }
    }

    fn validate(&self, reader: &mut StringReader) -> bool {
        reader.skip_whitespace();
        read_literal(reader)
            .and_then(|literal| self.get(&literal))
            .is_some_and(|node| node.is_valid_input(reader))
    }

    fn suggest_from(&self, source: &Source<'_>, reader: &mut StringReader) -> Vec<String> {
        reader.skip_whitespace();
        match read_literal(reader).and_then(|literal| self.get(&literal)) {
            Some(node) => node.list_suggestions(source, reader),
            None => {
                trace!(cursor = reader.cursor(), "no command to suggest for");
                Vec::new()
            }
        }
    }
}

fn collect_usage(node: &dyn Node, prefix: &str, source: &Source<'_>, lines: &mut Vec<String>) {
    let path = if prefix.is_empty() {
        node.name().to_string()
    } else {
        format!("{prefix} {}", node.name())
    };

    if node.is_executable() {
        let usage = node.usage();
        let rest = usage.strip_prefix(node.name()).unwrap_or_default();
        lines.push(format!("{path}{rest}"));
    }

    for child in node.children().iter().filter(|child| child.can_use(source)) {
        collect_usage(child.as_ref(), &path, source, lines);
    }
}

impl Node for Registry {
    fn name(&self) -> &str {
        "<root>"
    }

    fn description(&self) -> &str {
        ""
    }

    fn aliases(&self) -> &[String] {
        &[]
    }

    fn arguments(&self) -> &[Argument] {
        &[]
    }

    fn children(&self) -> &[Box<dyn Node>] {
        &self.nodes
    }

    fn is_executable(&self) -> bool {
        false
    }

    fn can_use(&self, _source: &Source<'_>) -> bool {
        true
    }

    fn parse(&self, source: &Source<'_>, reader: &mut StringReader) -> Result<(), CommandError> {
        Registry::parse(self, source, reader)
    }

    fn is_valid_input(&self, reader: &mut StringReader) -> bool {
        Registry::is_valid_input(self, reader)
    }

    fn list_suggestions(&self, source: &Source<'_>, reader: &mut StringReader) -> Vec<String> {
        Registry::list_suggestions(self, source, reader)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("nodes", &self.nodes.iter().map(|n| n.name()).collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}
