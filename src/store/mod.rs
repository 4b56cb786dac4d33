//! Term storage / 词条存储
//!
//! - `gaps`: in-memory list of freed primary keys
//! - `term_store`: the terms table, with gap reuse on insert and release on delete

pub mod gaps;
pub mod term_store;

pub use gaps::GapTracker;
pub use term_store::{Lookup, TermStore};
