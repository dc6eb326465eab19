//! cmdtree - A statically-typed command grammar engine
//!
//! cmdtree matches whitespace-separated command strings such as
//! `scoreboard players set alice 10` against a tree of commands, decodes each
//! argument into a typed value, and invokes the callback bound to the matched
//! command with those values. The same tree answers "is this input valid?"
//! and "what could come next?" without running anything.
//!
//! # Architecture
//!
//! - [`core`] - Reader, argument parsers, context carrier, errors, config
//! - [`engine`] - Command nodes, the builder, and the root registry
//! - [`cli`] - The `cmdtree-console` demo binary
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Callback signatures match declared arguments, checked at compile time
//! 2. A failed parse leaves the reader cursor where it started
//! 3. Validity checks and suggestions never run callbacks
//! 4. Matching is deterministic: first declared name or alias wins
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use cmdtree::core::arguments::IntParser;
//! use cmdtree::engine::{CommandBuilder, Registry};
//!
//! struct Counter(Cell<i32>);
//!
//! let mut registry = Registry::new();
//! registry.add(
//!     CommandBuilder::new("add")
//!         .argument::<IntParser>("amount", "How much to add")
//!         .execute(|source, amount| {
//!             let counter = source.get::<Counter>()?;
//!             counter.0.set(counter.0.get() + amount);
//!             Ok(())
//!         }),
//! );
//!
//! let counter = Counter(Cell::new(0));
//! registry.execute(&counter, "add 5").unwrap();
//! registry.execute(&counter, "add 2").unwrap();
//! assert_eq!(counter.0.get(), 7);
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
