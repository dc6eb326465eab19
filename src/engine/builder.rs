//! engine::builder
//!
//! Fluent, type-checked construction of command nodes.
//!
//! # Overview
//!
//! [`CommandBuilder`] tracks the declared argument parsers in its type
//! parameter. Each [`argument`](CommandBuilder::argument) call appends a parser
//! type, and [`execute`](CommandBuilder::execute) only accepts a callback whose
//! parameters are exactly the outputs of those parsers, in order.
//!
//! Declaring an argument after a callback discards the callback, since its
//! signature no longer matches. Bind the callback last.
//!
//! # Example
//!
//! ```
//! use cmdtree::core::arguments::{IntParser, StringParser};
//! use cmdtree::engine::{CommandBuilder, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add(
//!     CommandBuilder::new("scoreboard").then(
//!         CommandBuilder::new("set")
//!             .description("Set a player's score")
//!             .argument::<StringParser>("player", "Target player")
//!             .argument::<IntParser>("score", "New score")
//!             .execute(|_source, player: String, score: i32| {
//!                 println!("{player} = {score}");
//!                 Ok(())
//!             }),
//!     ),
//! );
//!
//! assert!(registry.is_valid("scoreboard set alice 10"));
//! assert!(!registry.is_valid("scoreboard set alice ten"));
//! ```

use crate::core::parser::{Append, Argument, ArgumentParser, ParserList};
use crate::core::source::Source;

use super::node::{Callback, CommandNode, Node, Permission, SuggestionProvider};

/// Builder for a [`CommandNode`] with argument parsers `L`.
#[must_use]
pub struct CommandBuilder<L: ParserList = ()> {
    name: String,
    description: String,
    arguments: Vec<Argument>,
    aliases: Vec<String>,
    children: Vec<Box<dyn Node>>,
    permission: Option<Permission>,
    callback: Option<Callback<L>>,
    suggestions: Option<SuggestionProvider>,
}

impl CommandBuilder<()> {
    /// Start a node matched by the literal `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            arguments: Vec::new(),
            aliases: Vec::new(),
            children: Vec::new(),
            permission: None,
            callback: None,
            suggestions: None,
        }
    }
}

impl<L: ParserList> CommandBuilder<L> {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an alternative literal matching this node.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the permission predicate reported by [`Node::can_use`].
    pub fn requires<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Source<'_>) -> bool + Send + Sync + 'static,
    {
        self.permission = Some(Box::new(predicate));
        self
    }

    /// Set the suggestion provider used when this node is the endpoint.
    pub fn suggests<F>(mut self, provider: F) -> Self
    where
        F: Fn(&Source<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        self.suggestions = Some(Box::new(provider));
        self
    }

    /// Attach a subcommand. Children are tried in the order they are added.
    pub fn then(mut self, child: impl Into<Box<dyn Node>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a required argument parsed by `P`.
    pub fn argument<P>(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> CommandBuilder<<L as Append<P>>::Extended>
    where
        P: ArgumentParser,
        L: Append<P>,
    {
        self.argument_spec::<P>(Argument::new(name).description(description))
    }

    /// Append an argument described by `argument`, parsed by `P`.
    pub fn argument_spec<P>(self, mut argument: Argument) -> CommandBuilder<<L as Append<P>>::Extended>
    where
        P: ArgumentParser,
        L: Append<P>,
    {
        argument.kind = P::NAME;
        let mut arguments = self.arguments;
        arguments.push(argument);

        CommandBuilder {
            name: self.name,
            description: self.description,
            arguments,
            aliases: self.aliases,
            children: self.children,
            permission: self.permission,
            callback: None,
            suggestions: self.suggestions,
        }
    }

    pub fn build(self) -> CommandNode<L> {
        CommandNode {
            name: self.name,
            description: self.description,
            arguments: self.arguments,
            aliases: self.aliases,
            children: self.children,
            permission: self.permission,
            callback: self.callback,
            suggestions: self.suggestions,
        }
    }
}

fn boxed<L, F>(callback: F) -> Callback<L>
where
    L: ParserList,
    F: Fn(&Source<'_>, L::Values) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Box::new(callback)
}

macro_rules! execute {
    ($($parser:ident => $value:ident),*) => {
        impl<$($parser: ArgumentParser),*> CommandBuilder<($($parser,)*)> {
            /// Bind the callback run when this node is the endpoint.
            ///
            /// The callback receives the source followed by one value per
            /// declared argument.
            pub fn execute<F>(mut self, callback: F) -> Self
            where
                F: Fn(&Source<'_>, $(<$parser as ArgumentParser>::Output),*) -> anyhow::Result<()>
                    + Send
                    + Sync
                    + 'static,
            {
                self.callback = Some(boxed::<($($parser,)*), _>(
                    move |source, ($($value,)*)| callback(source, $($value),*),
                ));
                self
            }
        }
    };
}

execute!();
execute!(P1 => a);
execute!(P1 => a, P2 => b);
execute!(P1 => a, P2 => b, P3 => c);
execute!(P1 => a, P2 => b, P3 => c, P4 => d);
execute!(P1 => a, P2 => b, P3 => c, P4 => d, P5 => e);
execute!(P1 => a, P2 => b, P3 => c, P4 => d, P5 => e, P6 => f);
execute!(P1 => a, P2 => b, P3 => c, P4 => d, P5 => e, P6 => f, P7 => g);
execute!(P1 => a, P2 => b, P3 => c, P4 => d, P5 => e, P6 => f, P7 => g, P8 => h);

impl<L: ParserList> From<CommandBuilder<L>> for Box<dyn Node> {
    fn from(builder: CommandBuilder<L>) -> Self {
        Box::new(builder.build())
    }
}

impl<L: ParserList> From<CommandNode<L>> for Box<dyn Node> {
    fn from(node: CommandNode<L>) -> Self {
        Box::new(node)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;
    use crate::core::arguments::{BoolParser, IntParser, LongParser, StringParser};
    use crate::core::reader::StringReader;

    #[test]
    fn records_metadata() {
        let node = CommandBuilder::new("kick")
            .description("Remove a player")
            .alias("boot")
            .argument::<StringParser>("player", "Who to kick")
            .execute(|_, _| Ok(()))
            .build();

        assert_eq!(node.name(), "kick");
        assert_eq!(node.description(), "Remove a player");
        assert_eq!(node.aliases(), ["boot".to_string()]);
        assert_eq!(node.arguments().len(), 1);
        assert_eq!(node.arguments()[0].name, "player");
        assert_eq!(node.arguments()[0].description, "Who to kick");
        assert_eq!(node.arguments()[0].kind, "string");
        assert!(node.is_executable());
        assert!(node.children().is_empty());
    }

    #[test]
    fn callback_receives_values_in_declared_order() {
        let total = AtomicI64::new(0);
        let node = CommandBuilder::new("sum")
            .argument::<IntParser>("a", "")
            .argument::<LongParser>("b", "")
            .argument::<BoolParser>("negate", "")
            .execute(|source, a, b, negate| {
                let total = source.get::<AtomicI64>()?;
                let sum = i64::from(a) + b;
                total.store(if negate { -sum } else { sum }, Ordering::SeqCst);
                Ok(())
            })
            .build();

        node.parse(&Source::new(&total), &mut StringReader::new("2 40 true"))
            .unwrap();
        assert_eq!(total.load(Ordering::SeqCst), -42);
    }

    #[test]
    fn adding_an_argument_discards_the_callback() {
        let node = CommandBuilder::new("late")
            .execute(|_| Ok(()))
            .argument::<IntParser>("n", "")
            .build();
        assert!(!node.is_executable());
    }

    #[test]
    fn converts_into_boxed_node() {
        let from_builder: Box<dyn Node> = CommandBuilder::new("a").into();
        let from_node: Box<dyn Node> = CommandBuilder::new("b").build().into();
        assert_eq!(from_builder.name(), "a");
        assert_eq!(from_node.name(), "b");
        assert!(!from_builder.is_executable());
    }

    #[test]
    fn children_keep_insertion_order() {
        let node = CommandBuilder::new("root")
            .then(CommandBuilder::new("first"))
            .then(CommandBuilder::new("second"))
            .then(CommandBuilder::new("third"))
            .build();
        let names: Vec<_> = node.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
