//! 词条存储 / Term store
//!
//! Owns the terms table and the gap tracker:
//! - `open` scans the id range for holes left by earlier deletions
//! - `insert` fills the oldest known hole first, otherwise lets SQLite assign
//! - `delete` hands the freed ids back to the tracker
//!
//! Every literal is a bound parameter; the table name is validated once in
//! `open` and is the only thing formatted into SQL text.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use super::gaps::GapTracker;
use crate::error::{FlashcardError, FlashcardResult};
use crate::models::{TermId, TermRecord};
use crate::utils::{contains_pattern, is_valid_identifier};

/// Result of an exact-match lookup / 精确查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Vec<TermId>),
    NotFound,
}

pub struct TermStore {
    pool: SqlitePool,
    table: String,
    gaps: GapTracker,
}

impl TermStore {
    /// Open the store and compute the initial gap list / 打开存储并扫描主键空洞
    pub async fn open(pool: SqlitePool, table: &str) -> FlashcardResult<Self> {
        if !is_valid_identifier(table) {
            return Err(FlashcardError::InvalidTableName(table.to_string()));
        }

        let mut store = Self {
            pool,
            table: table.to_string(),
            gaps: GapTracker::new(),
        };

        let gaps = store.scan_gaps().await?;
        if !gaps.is_empty() {
            tracing::info!("Found gaps {:?} in {}", gaps, store.table);
        }
        store.gaps = GapTracker::from_gaps(gaps);

        Ok(store)
    }

    /// Ids missing between MIN(id) and MAX(id), ascending / 扫描主键空洞
    async fn scan_gaps(&self) -> FlashcardResult<Vec<TermId>> {
        let any: Option<TermId> =
            sqlx::query_scalar(&format!("SELECT id FROM {} LIMIT 1", self.table))
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| FlashcardError::table_storage("scan_gaps", e))?;
        if any.is_none() {
            return Ok(Vec::new());
        }

        let gaps: Vec<TermId> = sqlx::query_scalar(&format!(
            r#"
            WITH RECURSIVE all_ids(id) AS (
                SELECT MIN(id) FROM {table}
                UNION ALL
                SELECT id + 1 FROM all_ids
                WHERE id < (SELECT MAX(id) FROM {table})
            )
            SELECT a.id
            FROM all_ids a
            LEFT JOIN {table} e ON a.id = e.id
            WHERE e.id IS NULL
            ORDER BY a.id
            "#,
            table = self.table
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlashcardError::table_storage("scan_gaps", e))?;

        Ok(gaps)
    }

    /// Exact-match lookup as a tagged result / 精确查找
    pub async fn lookup(&self, term: &str) -> FlashcardResult<Lookup> {
        let ids: Vec<TermId> = sqlx::query_scalar(&format!(
            "SELECT id FROM {} WHERE term = ? ORDER BY id",
            self.table
        ))
        .bind(term)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlashcardError::storage("find_term", term, e))?;

        if ids.is_empty() {
            Ok(Lookup::NotFound)
        } else {
            Ok(Lookup::Found(ids))
        }
    }

    /// All ids whose term equals `term`; `NotFound` when there are none
    pub async fn find_exact(&self, term: &str) -> FlashcardResult<Vec<TermId>> {
        match self.lookup(term).await? {
            Lookup::Found(ids) => Ok(ids),
            Lookup::NotFound => Err(FlashcardError::not_found(term)),
        }
    }

    /// Terms containing `term` as a substring / 子串查找
    pub async fn find_substring(
        &self,
        term: &str,
    ) -> FlashcardResult<BTreeMap<TermId, TermRecord>> {
        let rows: Vec<TermRecord> = sqlx::query_as(&format!(
            r"SELECT id, term, definition FROM {} WHERE term LIKE ? ESCAPE '\' ORDER BY id",
            self.table
        ))
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlashcardError::storage("find_substring", term, e))?;

        if rows.is_empty() {
            return Err(FlashcardError::not_found(term));
        }
        Ok(rows.into_iter().map(|r| (r.id, r)).collect())
    }

    /// Insert a term, reusing the oldest gap when one is known / 插入词条
    pub async fn insert(&mut self, term: &str, definition: &str) -> FlashcardResult<TermId> {
        let result = match self.gaps.next_insertion_id() {
            Some(id) => {
                tracing::debug!("Inserting {:?} into sequence gap {}", term, id);
                sqlx::query(&format!(
                    "INSERT INTO {} (id, term, definition) VALUES (?, ?, ?)",
                    self.table
                ))
                .bind(id)
                .bind(term)
                .bind(definition)
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "INSERT INTO {} (term, definition) VALUES (?, ?)",
                    self.table
                ))
                .bind(term)
                .bind(definition)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e| FlashcardError::storage("insert", term, e))?;

        let id = result.last_insert_rowid();
        self.gaps.confirm_consumed(id);

        tracing::info!("Added {:?} at {}", term, id);
        Ok(id)
    }

    /// Delete every row whose term equals `term` / 删除词条
    ///
    /// Returns the deleted ids. The freed ids only go back to the gap list when
    /// the affected row count matches the lookup.
    pub async fn delete(&mut self, term: &str) -> FlashcardResult<Vec<TermId>> {
        let ids = self.find_exact(term).await?;

        let result = sqlx::query(&format!("DELETE FROM {} WHERE term = ?", self.table))
            .bind(term)
            .execute(&self.pool)
            .await
            .map_err(|e| FlashcardError::storage("delete", term, e))?;

        let affected = result.rows_affected();
        if affected == ids.len() as u64 {
            tracing::info!("Deleted {:?} in rows {:?}", term, ids);
            self.gaps.release(ids.iter().copied());
        } else {
            tracing::warn!(
                "{} rows deleted for {:?}, expected {}; gap list left unchanged",
                affected,
                term,
                ids.len()
            );
        }

        Ok(ids)
    }

    /// Every stored term, ordered by id / 列出全部词条
    pub async fn list_all(&self) -> FlashcardResult<BTreeMap<TermId, TermRecord>> {
        let rows: Vec<TermRecord> = sqlx::query_as(&format!(
            "SELECT id, term, definition FROM {} ORDER BY id",
            self.table
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlashcardError::table_storage("list_all", e))?;

        Ok(rows.into_iter().map(|r| (r.id, r)).collect())
    }

    /// Currently known gaps, in reuse order / 当前空洞列表
    pub fn gaps(&self) -> Vec<TermId> {
        self.gaps.gaps().iter().copied().collect()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
