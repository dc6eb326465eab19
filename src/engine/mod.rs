//! engine
//!
//! The command tree: nodes, their builder, and the root registry.
//!
//! # Architecture
//!
//! ```text
//! Registry ── CommandNode ── CommandNode ── ...
//!                  │
//!                  └── argument parsers (type-level tuple) ── callback
//! ```
//!
//! 1. **Build**: [`CommandBuilder`] assembles nodes, checking callback
//!    signatures against declared arguments at compile time
//! 2. **Register**: [`Registry::add`] collects top-level commands
//! 3. **Traverse**: `parse`, `is_valid_input`, and `list_suggestions` walk the
//!    tree from one shared [`StringReader`](crate::core::reader::StringReader)
//!
//! # Invariants
//!
//! - Trees are immutable after construction
//! - Child and top-level matching is by name or alias, first declared wins
//! - Failed traversals restore the reader cursor
//! - Only `parse` runs callbacks

pub mod builder;
pub mod node;
pub mod registry;

pub use builder::CommandBuilder;
pub use node::{CommandNode, Node};
pub use registry::{Registry, RegistryOptions};
