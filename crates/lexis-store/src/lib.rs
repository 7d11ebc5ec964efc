//! Position-indexed store of tokens and comments.
//!
//! The store is built once from the flat token and comment list of a parse
//! and then answers navigation queries ("the token before this node", "the
//! comments directly after this token") by resolving offsets to positions in
//! the sorted sequence instead of walking the tree or re-scanning the text.
//!
//! Nodes passed to queries are only inspected for their range. For
//! `*_between` queries the caller guarantees that `left` ends before `right`
//! starts; this is not checked, and out-of-contract pairs produce empty or
//! truncated results rather than panics.

mod index;
mod options;
mod ranged;
mod store;

/// Options accepted by single and multi element queries.
pub use options::{CountArg, CountOptions, SkipArg, SkipOptions};
/// Anything occupying a half-open range of the source text.
pub use ranged::Ranged;
/// The query surface.
pub use store::{Comments, TokenStore};
