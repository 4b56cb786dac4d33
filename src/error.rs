//! Error types / 错误类型

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    /// Lookup matched no rows. Expected during dedup and for missing targets / 未找到
    #[error("unable to find {term:?}")]
    NotFound { term: String },

    #[error("{character:?} is not in expected language of {expected_language}")]
    UnexpectedLanguage {
        expected_language: &'static str,
        character: char,
    },

    #[error("{operation} {term:?}: {source}")]
    Storage {
        operation: &'static str,
        term: String,
        #[source]
        source: sqlx::Error,
    },

    /// Failure of a table-wide operation with no term involved / 整表操作失败
    #[error("{operation}: {source}")]
    TableStorage {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid table name {0:?}")]
    InvalidTableName(String),

    #[error("failed to read dictionary {path:?}: {source}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlashcardError {
    pub fn not_found(term: impl Into<String>) -> Self {
        Self::NotFound { term: term.into() }
    }

    pub(crate) fn storage(operation: &'static str, term: &str, source: sqlx::Error) -> Self {
        Self::Storage {
            operation,
            term: term.to_string(),
            source,
        }
    }

    pub(crate) fn table_storage(operation: &'static str, source: sqlx::Error) -> Self {
        Self::TableStorage { operation, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type FlashcardResult<T> = Result<T, FlashcardError>;
