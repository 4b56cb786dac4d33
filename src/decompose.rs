//! Decomposition engine / 拆分插入
//!
//! A term is stored as its individual characters plus, when it is longer than
//! one character, the whole phrase. Each unit is checked for an existing row
//! first; duplicates are skipped, new units get a gloss and are inserted.
//!
//! There is no transaction around a whole `add`: if a later unit fails, units
//! inserted before it stay in the store.

use crate::dictionary::Dictionary;
use crate::error::FlashcardResult;
use crate::language;
use crate::models::TermId;
use crate::store::{Lookup, TermStore};

/// One insertion unit / 插入单元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'a> {
    Character(&'a str),
    Phrase(&'a str),
}

impl<'a> Unit<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Unit::Character(s) | Unit::Phrase(s) => s,
        }
    }
}

/// Split a term into characters (in order) followed by the phrase / 拆分词条
pub fn units(term: &str) -> Vec<Unit<'_>> {
    let mut units: Vec<Unit<'_>> = term
        .char_indices()
        .map(|(i, c)| Unit::Character(&term[i..i + c.len_utf8()]))
        .collect();
    if units.len() > 1 {
        units.push(Unit::Phrase(term));
    }
    units
}

/// Add a term and its characters, returning the ids created / 添加词条
///
/// Ids come back in processing order: characters first, phrase last. Units
/// that already exist contribute nothing.
pub async fn add(
    store: &mut TermStore,
    dictionary: &dyn Dictionary,
    term: &str,
) -> FlashcardResult<Vec<TermId>> {
    language::validate(term)?;

    let mut added = Vec::new();
    for unit in units(term) {
        if let Some(id) = add_if_not_duplicate(store, dictionary, unit).await? {
            added.push(id);
        }
    }
    Ok(added)
}

async fn add_if_not_duplicate(
    store: &mut TermStore,
    dictionary: &dyn Dictionary,
    unit: Unit<'_>,
) -> FlashcardResult<Option<TermId>> {
    let text = unit.as_str();

    if let Lookup::Found(ids) = store.lookup(text).await? {
        tracing::debug!("{:?} already exists at {:?}", text, ids);
        return Ok(None);
    }

    let definition = dictionary.definition(text).unwrap_or_else(|| {
        tracing::debug!("No dictionary entry for {:?}", text);
        String::new()
    });

    let id = store.insert(text, &definition).await?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::dictionary::EmptyDictionary;
    use crate::error::FlashcardError;
    use std::collections::HashMap;

    async fn memory_store() -> TermStore {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        db::run_migrations(&pool, "terms").await.unwrap();
        TermStore::open(pool, "terms").await.unwrap()
    }

    #[test]
    fn test_units() {
        assert!(units("").is_empty());
        assert_eq!(units("我"), vec![Unit::Character("我")]);
        assert_eq!(
            units("我们"),
            vec![Unit::Character("我"), Unit::Character("们"), Unit::Phrase("我们")]
        );
        assert_eq!(
            units("好好"),
            vec![Unit::Character("好"), Unit::Character("好"), Unit::Phrase("好好")]
        );
    }

    #[tokio::test]
    async fn test_single_character() {
        let mut store = memory_store().await;
        let ids = add(&mut store, &EmptyDictionary, "我").await.unwrap();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_phrase_adds_characters_then_phrase() {
        let mut store = memory_store().await;
        let ids = add(&mut store, &EmptyDictionary, "中国人").await.unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(store.find_exact("中国人").await.unwrap(), vec![4]);
    }

    #[tokio::test]
    async fn test_existing_units_are_skipped() {
        let mut store = memory_store().await;
        add(&mut store, &EmptyDictionary, "我").await.unwrap();

        let ids = add(&mut store, &EmptyDictionary, "我们").await.unwrap();
        assert_eq!(ids, vec![2, 3]);

        let ids = add(&mut store, &EmptyDictionary, "我们").await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_character() {
        let mut store = memory_store().await;
        let ids = add(&mut store, &EmptyDictionary, "好好").await.unwrap();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.find_exact("好").await.unwrap(), vec![1]);
        assert_eq!(store.find_exact("好好").await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_definitions_from_dictionary() {
        let mut store = memory_store().await;
        let mut dict = HashMap::new();
        dict.insert("我".to_string(), "I; me".to_string());
        dict.insert("我们".to_string(), "we; us".to_string());

        add(&mut store, &dict, "我们").await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all[&1].definition, "I; me");
        assert_eq!(all[&2].definition, "");
        assert_eq!(all[&3].definition, "we; us");
    }

    #[tokio::test]
    async fn test_wrong_language_touches_nothing() {
        let mut store = memory_store().await;
        let err = add(&mut store, &EmptyDictionary, "我c").await.unwrap_err();
        match err {
            FlashcardError::UnexpectedLanguage { character, .. } => assert_eq!(character, 'c'),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_mid_phrase_keeps_earlier_units() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        db::run_migrations(&pool, "terms").await.unwrap();
        sqlx::query("INSERT INTO terms (id, term, definition) VALUES (1, '甲', ''), (4, '乙', '')")
            .execute(&pool)
            .await
            .unwrap();
        let mut store = TermStore::open(pool, "terms").await.unwrap();
        assert_eq!(store.gaps(), vec![2, 3]);

        // Another writer takes id 3 behind the tracker's back / 其他写入者占用了ID 3
        sqlx::query("INSERT INTO terms (id, term, definition) VALUES (3, '丙', '')")
            .execute(store.pool())
            .await
            .unwrap();

        let err = add(&mut store, &EmptyDictionary, "们我").await.unwrap_err();
        assert!(matches!(err, FlashcardError::Storage { operation: "insert", .. }));

        // 们 stays, 我 and the phrase are absent / 已插入的单元保留
        assert_eq!(store.find_exact("们").await.unwrap(), vec![2]);
        assert_eq!(store.lookup("我").await.unwrap(), Lookup::NotFound);
        assert_eq!(store.lookup("们我").await.unwrap(), Lookup::NotFound);
        assert_eq!(store.gaps(), vec![3]);
    }
}
