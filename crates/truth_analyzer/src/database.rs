use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};
use truth_analyzer_entity::analysis;

/// 创建连接池选项
fn connect_options(url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(url.to_owned());
    if is_memory_sqlite(url) {
        // 内存数据库的每个连接互相独立，只能使用单连接
        options.max_connections(1).min_connections(1);
    } else {
        options
            .max_connections(50)
            .min_connections(5)
            .acquire_timeout(Duration::from_secs(90))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600));
    }
    options.sqlx_logging(false);
    options
}

fn is_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite") && (url.contains(":memory:") || url.contains("mode=memory"))
}

/// 根据实体定义建表（表已存在时跳过），并创建 created_at 索引
pub async fn ensure_analysis_table(connection: &DatabaseConnection) -> Result<()> {
    let backend = connection.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(analysis::Entity);
    table.if_not_exists();
    connection
        .execute(backend.build(&table))
        .await
        .context("创建 analyses 表失败")?;

    for mut index in schema.create_index_from_entity(analysis::Entity) {
        index.if_not_exists();
        connection
            .execute(backend.build(&index))
            .await
            .context("创建 analyses 索引失败")?;
    }

    debug!("analyses 表检查完成");
    Ok(())
}

/// 建立数据库连接并确保表结构存在，供外部使用
pub async fn setup_database(url: &str) -> Result<DatabaseConnection> {
    let connection = Database::connect(connect_options(url))
        .await
        .context("连接数据库失败")?;
    ensure_analysis_table(&connection).await?;
    info!("数据库已就绪，后端: {:?}", connection.get_database_backend());
    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_memory_sqlite() {
        assert!(is_memory_sqlite("sqlite::memory:"));
        assert!(is_memory_sqlite("sqlite://file:test?mode=memory"));
        assert!(!is_memory_sqlite("sqlite://data.sqlite?mode=rwc"));
        assert!(!is_memory_sqlite("postgres://localhost/analysis"));
    }

    #[tokio::test]
    async fn test_setup_database_is_idempotent() {
        let connection = setup_database("sqlite::memory:").await.unwrap();
        // 重复建表不应报错
        ensure_analysis_table(&connection).await.unwrap();
    }

    #[tokio::test]
    async fn test_table_name_matches_existing_store() {
        let connection = setup_database("sqlite::memory:").await.unwrap();
        let backend = connection.get_database_backend();
        let count: Option<i64> = connection
            .query_one(sea_orm::Statement::from_string(
                backend,
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'analyses'",
            ))
            .await
            .unwrap()
            .and_then(|row| row.try_get_by_index(0).ok());
        assert_eq!(count, Some(1));
    }
}
