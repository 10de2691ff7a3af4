//! A singly linked list whose nodes live in one growable arena.
//!
//! Nodes are slots in a contiguous `Vec` rather than individual heap
//! allocations. Unused slots form an intrusive free chain, so allocating or
//! releasing a node is O(1) index manipulation.
//!
//! # Architecture
//!
//! ```text
//! ArenaList<T, R> (logical order, position-based insert/remove)
//! ├── head ──> occupied chain (live nodes, logical order)
//! ├── Arena<T> (Vec of slots, index-stable doubling growth)
//! │   └── free_head ──> free chain (unused slots, LIFO reuse)
//! ├── ErrorState (accumulated ErrorFlags, fail-fast halt, corruption)
//! └── R: ErrorReporter (log, closure, or no-op)
//! ```
//!
//! Physical indices ([`NodeIndex`]) are 1-based and never change while a node
//! is alive, growth included. "No node" is `None`; the sentinel 0 of the
//! classic array-list layout has no representation.
//!
//! # Errors
//!
//! Every fallible operation returns a [`ListError`]. Errors are also recorded
//! on the list ([`ArenaList::errors`], [`ArenaList::last_error`]) and passed
//! to the list's [`ErrorReporter`]. The [`ErrorPolicy`] chooses between
//! carrying on after a fault and halting mutation at the first one.
//! Detected corruption always poisons the list until it is recreated.
//!
//! ```rust
//! use arenalist::{ArenaList, ListError};
//!
//! let mut list = ArenaList::new(2)?;
//! list.insert(0, 10)?;
//! list.insert(1, 20)?;
//! list.insert(2, 30)?; // grows the arena to 4 slots
//!
//! let thirty = list.search(&30)?;
//! assert_eq!(list.logical_index_of(thirty)?, 2);
//!
//! assert_eq!(list.remove_at(1)?, 20);
//! assert_eq!(list.search(&20), Err(ListError::NotFound));
//! assert_eq!(list.logical_index_of(thirty)?, 1);
//! # Ok::<(), ListError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "logging"), allow(unused_variables))]

#[macro_use]
mod logging;

pub mod arena;
pub mod config;
pub mod error;
pub mod free_list;
pub mod handle;
pub mod iter;
pub mod list;
pub mod policy;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ListConfig;
pub use error::{Chain, CorruptionReason, ErrorFlags, ErrorKind, ListError};
pub use handle::NodeIndex;
pub use list::ArenaList;
pub use policy::{ErrorPolicy, ErrorReporter, LogReporter, NullReporter};
