//! core::source
//!
//! Type-erased, borrowed context passed through a traversal.
//!
//! # Design
//!
//! A command tree is built once and driven by callers of unrelated types.
//! [`Source`] lets the tree carry a reference to whatever object the caller
//! supplies without the tree depending on that type. The object is tagged
//! with its exact [`TypeId`](std::any::TypeId); fetching it back succeeds only for that exact
//! type. There is no upcasting or trait-object matching.
//!
//! # Ownership
//!
//! `Source<'a>` never owns the referent. The borrow checker guarantees the
//! referent outlives every call the carrier is passed to. Callbacks receive a
//! shared reference, so a source that needs to be mutated by commands should
//! use interior mutability (`Cell`, `RefCell`, `Mutex`).
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use cmdtree::core::source::Source;
//!
//! struct Player {
//!     health: Cell<u32>,
//! }
//!
//! let player = Player { health: Cell::new(20) };
//! let source = Source::new(&player);
//!
//! assert!(source.is::<Player>());
//! source.get::<Player>().unwrap().health.set(10);
//! assert_eq!(player.health.get(), 10);
//!
//! // Fetching as any other type is a type mismatch.
//! assert!(source.get::<u32>().is_err());
//! ```

use std::any::{type_name, Any};
use std::fmt;

use thiserror::Error;

/// Errors from fetching the source object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("invalid source type: requested {requested}, source holds {held}")]
    TypeMismatch {
        /// The type the source holds.
        held: &'static str,
        /// The type the caller asked for.
        requested: &'static str,
    },
}

/// A borrowed reference to a caller-supplied object of any `'static` type.
#[derive(Clone, Copy)]
pub struct Source<'a> {
    value: Option<&'a (dyn Any + 'static)>,
    type_name: &'static str,
}

impl<'a> Source<'a> {
    /// Wrap a reference to `value`.
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            value: Some(value as &(dyn Any + 'static)),
            type_name: type_name::<T>(),
        }
    }

    /// A source that holds nothing.
    ///
    /// Every `get` on an empty source fails.
    pub fn empty() -> Self {
        Self {
            value: None,
            type_name: type_name::<()>(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the held type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True if the held object is exactly of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is_some_and(|value| value.is::<T>())
    }

    /// Fetch the held object as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::TypeMismatch` unless the held object is
    /// exactly of type `T`.
    pub fn get<T: Any>(&self) -> Result<&'a T, ContextError> {
        self.try_get().ok_or(ContextError::TypeMismatch {
            held: self.type_name,
            requested: type_name::<T>(),
        })
    }

    /// Fetch the held object as `T`, or `None` on a type mismatch.
    pub fn try_get<T: Any>(&self) -> Option<&'a T> {
        self.value.and_then(|value| value.downcast_ref::<T>())
    }
}

impl Default for Source<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("type", &self.type_name)
            .field("empty", &self.is_empty())
            .finish()
    }
}
