//! Vocabulary - caller-facing add / delete / find / list / 词库接口

use std::collections::BTreeMap;

use crate::decompose;
use crate::dictionary::Dictionary;
use crate::error::FlashcardResult;
use crate::language;
use crate::models::{TermId, TermRecord};
use crate::store::TermStore;

pub struct Vocabulary {
    store: TermStore,
    dictionary: Box<dyn Dictionary>,
}

impl Vocabulary {
    pub fn new(store: TermStore, dictionary: impl Dictionary + 'static) -> Self {
        Self {
            store,
            dictionary: Box::new(dictionary),
        }
    }

    /// Add a term and its characters; returns the new ids / 添加词条
    pub async fn add(&mut self, term: &str) -> FlashcardResult<Vec<TermId>> {
        decompose::add(&mut self.store, self.dictionary.as_ref(), term).await
    }

    /// Delete every row holding exactly `term` / 删除词条
    pub async fn delete(&mut self, term: &str) -> FlashcardResult<()> {
        language::validate(term)?;
        self.store.delete(term).await?;
        Ok(())
    }

    /// Terms containing `term`; `NotFound` when nothing matches / 查找词条
    pub async fn find(&self, term: &str) -> FlashcardResult<BTreeMap<TermId, TermRecord>> {
        language::validate(term)?;
        self.store.find_substring(term).await
    }

    /// Every stored term / 列出全部
    pub async fn list(&self) -> FlashcardResult<BTreeMap<TermId, TermRecord>> {
        self.store.list_all().await
    }

    pub fn store(&self) -> &TermStore {
        &self.store
    }
}
