use anyhow::{bail, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::utils::is_valid_identifier;

/// Open the vocabulary database / 打开词库数据库
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1) // one logical operation at a time / 单一操作
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await?;

    // 启用WAL模式
    sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;

    // 设置busy_timeout，避免锁超时
    sqlx::query("PRAGMA busy_timeout=5000").execute(&pool).await?;

    sqlx::query("PRAGMA synchronous=NORMAL").execute(&pool).await?;

    tracing::info!("Connected to {}", database_url);
    Ok(pool)
}

/// Run database migrations / 运行数据库迁移
pub async fn run_migrations(pool: &SqlitePool, table: &str) -> Result<()> {
    if !is_valid_identifier(table) {
        bail!("invalid table name {:?}", table);
    }

    // No UNIQUE on term: duplicates are filtered before insertion / term 不设唯一约束
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY,
            term TEXT NOT NULL,
            definition TEXT NOT NULL DEFAULT ''
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_term ON {table}(term)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}
