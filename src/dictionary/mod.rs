//! Dictionary lookup - supplies glosses for new terms / 词典查询
//!
//! The vocabulary only needs one thing from a dictionary: the gloss for an
//! exact term, if there is one. A missing gloss is not an error.

pub mod cedict;

use std::collections::HashMap;

pub use cedict::{CedictDictionary, DictionaryEntry};

/// Gloss provider / 释义提供者
pub trait Dictionary: Send + Sync {
    /// Gloss for `term`, or `None` when the dictionary has no entry / 获取释义
    fn definition(&self, term: &str) -> Option<String>;
}

/// Dictionary with no entries; every term is stored with an empty definition
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyDictionary;

impl Dictionary for EmptyDictionary {
    fn definition(&self, _term: &str) -> Option<String> {
        None
    }
}

impl Dictionary for HashMap<String, String> {
    fn definition(&self, term: &str) -> Option<String> {
        self.get(term).cloned()
    }
}
