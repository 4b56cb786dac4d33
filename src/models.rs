use serde::{Deserialize, Serialize};

/// Primary key of a stored term / 词条主键
pub type TermId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TermRecord {
    pub id: TermId,
    pub term: String,
    pub definition: String,
}
