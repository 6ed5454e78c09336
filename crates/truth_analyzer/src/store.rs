use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use truth_analyzer_entity::analysis;

use crate::ai::AnalysisResult;

/// 待写入的分析记录
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub text_content: String,
    pub result: AnalysisResult,
}

/// 分析记录存储，只支持新增与按时间倒序读取
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// 写入一条记录，返回数据库生成的 id
    async fn insert(&self, record: NewAnalysis) -> Result<i32>;

    /// 按创建时间倒序读取最近 limit 条记录
    async fn list_recent(&self, limit: u64) -> Result<Vec<analysis::Model>>;
}

pub struct SeaOrmAnalysisStore {
    db: DatabaseConnection,
}

impl SeaOrmAnalysisStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalysisStore for SeaOrmAnalysisStore {
    async fn insert(&self, record: NewAnalysis) -> Result<i32> {
        let NewAnalysis { text_content, result } = record;
        let model = analysis::ActiveModel {
            text_content: Set(text_content),
            confidence: Set(result.confidence),
            verdict: Set(result.verdict),
            sentiment: Set(result.sentiment),
            sentiment_score: Set(result.sentiment_score),
            ai_score: Set(result.ai_score),
            ai_insights: Set(serde_json::to_string(&result.ai_insights)?),
            sources: Set(serde_json::to_string(&result.sources)?),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.context("写入分析记录失败")?;
        Ok(inserted.id)
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<analysis::Model>> {
        let records = analysis::Entity::find()
            .order_by_desc(analysis::Column::CreatedAt)
            .order_by_desc(analysis::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("读取分析记录失败")?;
        Ok(records)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Duration;
    use truth_analyzer_entity::analysis::{Sentiment, Verdict};

    use super::*;

    pub(crate) async fn memory_store() -> SeaOrmAnalysisStore {
        let db = crate::database::setup_database("sqlite::memory:").await.unwrap();
        SeaOrmAnalysisStore::new(db)
    }

    pub(crate) fn sample_result() -> AnalysisResult {
        AnalysisResult {
            confidence: 42,
            verdict: Verdict::Unverified,
            sentiment: Sentiment::Negative,
            sentiment_score: -30,
            ai_score: 55,
            ai_insights: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            sources: vec!["Reuters".to_string(), "AP".to_string()],
        }
    }

    fn record(text: &str) -> NewAnalysis {
        NewAnalysis {
            text_content: text.to_string(),
            result: sample_result(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let store = memory_store().await;
        let id = store.insert(record("первый текст")).await.unwrap();

        let records = store.list_recent(50).await.unwrap();
        assert_eq!(records.len(), 1);
        let saved = &records[0];
        assert_eq!(saved.id, id);
        assert_eq!(saved.text_content, "первый текст");
        assert_eq!(saved.verdict, Verdict::Unverified);
        assert_eq!(saved.sentiment, Sentiment::Negative);
        assert_eq!(saved.ai_insights_list().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(saved.sources_list().unwrap(), vec!["Reuters", "AP"]);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = memory_store().await;
        let first = store.insert(record("1")).await.unwrap();
        let second = store.insert(record("2")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_recent_respects_limit_and_order() {
        let store = memory_store().await;
        for i in 0..55 {
            store.insert(record(&format!("text {}", i))).await.unwrap();
        }

        let records = store.list_recent(50).await.unwrap();
        assert_eq!(records.len(), 50);
        assert_eq!(records[0].text_content, "text 54");
        assert!(records
            .windows(2)
            .all(|w| (w[0].created_at, w[0].id) > (w[1].created_at, w[1].id)));
    }

    #[tokio::test]
    async fn test_list_recent_orders_by_created_at() {
        let store = memory_store().await;
        let newer = store.insert(record("newer")).await.unwrap();

        // id 更大但创建时间更早的记录应排在后面
        let older = analysis::ActiveModel {
            text_content: Set("older".to_string()),
            confidence: Set(1),
            verdict: Set(Verdict::Warning),
            sentiment: Set(Sentiment::Neutral),
            sentiment_score: Set(0),
            ai_score: Set(1),
            ai_insights: Set("[]".to_string()),
            sources: Set("[]".to_string()),
            created_at: Set(Utc::now() - Duration::hours(1)),
            ..Default::default()
        }
        .insert(&store.db)
        .await
        .unwrap();
        assert!(older.id > newer);

        let records = store.list_recent(50).await.unwrap();
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer, older.id]);
    }

    #[tokio::test]
    async fn test_list_recent_empty() {
        let store = memory_store().await;
        assert!(store.list_recent(50).await.unwrap().is_empty());
    }
}
