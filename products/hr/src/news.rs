//! News articles gathered from external feeds.

use std::collections::HashSet;

use chrono::Utc;
use entity::news_article;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{HrError, HrResult};

/// One entry of a news feed document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NewArticle {
    #[serde(default)]
    pub author: String,
    pub title: String,
    pub content: String,
    pub published_at: DateTimeWithTimeZone,
    #[serde(default)]
    pub source_url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArticlePatch {
    pub author: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parses a JSON array of [`NewArticle`].
pub fn parse_feed(json: &str) -> HrResult<Vec<NewArticle>> {
    Ok(serde_json::from_str(json)?)
}

fn normalize(input: NewArticle) -> HrResult<NewArticle> {
    let article = NewArticle {
        author: input.author.trim().to_string(),
        title: input.title.trim().to_string(),
        content: input.content,
        published_at: input.published_at.with_timezone(&Utc).into(),
        source_url: input.source_url.trim().to_string(),
    };
    news_article::validate_fields(&article.author, &article.title, &article.source_url)?;
    Ok(article)
}

pub async fn create_article<C: ConnectionTrait>(
    db: &C,
    input: NewArticle,
) -> HrResult<news_article::Model> {
    let article = normalize(input)?;
    let created = news_article::ActiveModel {
        id: Set(Uuid::new_v4()),
        author: Set(article.author),
        title: Set(article.title),
        content: Set(article.content),
        published_at: Set(article.published_at),
        source_url: Set(article.source_url),
        fetched_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    debug!(article_id = %created.id, title = %created.title, "news article stored");
    Ok(created)
}

pub async fn find_article<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> HrResult<news_article::Model> {
    news_article::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found("news article", id))
}

/// Newest publications first.
pub async fn list_articles<C: ConnectionTrait>(
    db: &C,
    limit: Option<u64>,
) -> HrResult<Vec<news_article::Model>> {
    let mut query = news_article::Entity::find().order_by_desc(news_article::Column::PublishedAt);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    Ok(query.all(db).await?)
}

/// Edits the article body. `fetched_at` and `published_at` are never touched.
pub async fn update_article<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    patch: ArticlePatch,
) -> HrResult<news_article::Model> {
    let existing = find_article(db, id).await?;
    let author = patch
        .author
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| existing.author.clone());
    let title = patch
        .title
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| existing.title.clone());
    let source_url = patch
        .source_url
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| existing.source_url.clone());
    news_article::validate_fields(&author, &title, &source_url)?;

    let mut active: news_article::ActiveModel = existing.into();
    active.author = Set(author);
    active.title = Set(title);
    active.source_url = Set(source_url);
    if let Some(content) = patch.content {
        active.content = Set(content);
    }
    Ok(active.update(db).await?)
}

pub async fn delete_article<C: ConnectionTrait>(db: &C, id: Uuid) -> HrResult<()> {
    let result = news_article::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found("news article", id));
    }
    Ok(())
}

/// Stores a batch in one transaction. Entries whose source URL is already
/// known, in the store or earlier in the batch, are skipped. Any invalid
/// entry aborts the whole batch.
pub async fn import_articles<C>(db: &C, articles: Vec<NewArticle>) -> HrResult<ImportSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let mut summary = ImportSummary::default();
    let mut seen: HashSet<String> = HashSet::new();
    for input in articles {
        let article = normalize(input)?;
        if !article.source_url.is_empty() {
            let duplicate = !seen.insert(article.source_url.clone())
                || news_article::Entity::find()
                    .filter(news_article::Column::SourceUrl.eq(article.source_url.as_str()))
                    .one(&txn)
                    .await?
                    .is_some();
            if duplicate {
                debug!(source_url = %article.source_url, "skipping known article");
                summary.skipped += 1;
                continue;
            }
        }
        create_article(&txn, article).await?;
        summary.inserted += 1;
    }
    txn.commit().await?;
    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "news import finished"
    );
    Ok(summary)
}
