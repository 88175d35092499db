mod common;

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use common::setup_db;
use entity::validation::ValidationError;
use products_hr::HrError;
use products_hr::news::{
    ArticlePatch, ImportSummary, NewArticle, create_article, delete_article, find_article,
    import_articles, list_articles, parse_feed, update_article,
};

fn article(title: &str, published_at: DateTime<FixedOffset>, url: &str) -> NewArticle {
    NewArticle {
        author: "Редакция".into(),
        title: title.into(),
        content: format!("{title}: текст"),
        published_at,
        source_url: url.into(),
    }
}

#[tokio::test]
async fn listing_is_newest_first() {
    let db = setup_db().await;
    let now = Utc::now();
    create_article(&db, article("old", (now - Duration::days(2)).into(), ""))
        .await
        .unwrap();
    create_article(&db, article("new", now.into(), ""))
        .await
        .unwrap();
    create_article(&db, article("mid", (now - Duration::days(1)).into(), ""))
        .await
        .unwrap();

    let titles: Vec<String> = list_articles(&db, None)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, ["new", "mid", "old"]);

    let limited = list_articles(&db, Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].title, "new");
}

#[tokio::test]
async fn ordering_ignores_the_publisher_offset() {
    let db = setup_db().await;
    let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
    // 10:00 in Moscow is 07:00 UTC, earlier than 08:00 UTC.
    let earlier = DateTime::parse_from_rfc3339("2024-05-01T10:00:00+03:00").unwrap();
    let later = DateTime::parse_from_rfc3339("2024-05-01T08:00:00+00:00").unwrap();
    assert_eq!(earlier.offset(), &moscow);
    create_article(&db, article("moscow", earlier, "")).await.unwrap();
    create_article(&db, article("utc", later, "")).await.unwrap();

    let titles: Vec<String> = list_articles(&db, None)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, ["utc", "moscow"]);
}

#[tokio::test]
async fn fetched_at_is_set_once() {
    let db = setup_db().await;
    let before = Utc::now();
    let created = create_article(&db, article("t", before.into(), ""))
        .await
        .unwrap();
    assert!(created.fetched_at >= before);

    tokio::time::sleep(StdDuration::from_millis(10)).await;
    let updated = update_article(
        &db,
        created.id,
        ArticlePatch {
            title: Some("renamed".into()),
            ..ArticlePatch::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.fetched_at, created.fetched_at);
    assert_eq!(updated.published_at, created.published_at);
}

#[tokio::test]
async fn title_is_required_and_url_checked() {
    let db = setup_db().await;
    let now: DateTime<FixedOffset> = Utc::now().into();
    let err = create_article(&db, article("  ", now, "")).await.unwrap_err();
    assert!(matches!(
        err,
        HrError::Validation(ValidationError::Required { field: "title" })
    ));
    let err = create_article(&db, article("t", now, "javascript:alert(1)"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HrError::Validation(ValidationError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn import_skips_known_sources() {
    let db = setup_db().await;
    let now = Utc::now();
    create_article(
        &db,
        article("known", now.into(), "https://news.example/known"),
    )
    .await
    .unwrap();

    let summary = import_articles(
        &db,
        vec![
            article("known again", now.into(), "https://news.example/known"),
            article("fresh", now.into(), "https://news.example/fresh"),
            article("fresh dup", now.into(), "https://news.example/fresh"),
            article("no source", now.into(), ""),
        ],
    )
    .await
    .unwrap();

    assert_eq!(
        summary,
        ImportSummary {
            inserted: 2,
            skipped: 2
        }
    );
    assert_eq!(list_articles(&db, None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_entry_aborts_the_import() {
    let db = setup_db().await;
    let now = Utc::now();
    let err = import_articles(
        &db,
        vec![
            article("ok", now.into(), "https://news.example/ok"),
            article("", now.into(), "https://news.example/blank"),
        ],
    )
    .await
    .unwrap_err();
    assert!(err.is_client_error());
    assert!(list_articles(&db, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn feed_documents_parse() {
    let feed = r#"[
        {"title": "Релиз", "content": "Вышла новая версия", "published_at": "2024-05-01T09:30:00+03:00"},
        {"author": "HR", "title": "Офис", "content": "Переезд", "published_at": "2024-04-30T12:00:00Z", "source_url": "https://news.example/office"}
    ]"#;
    let articles = parse_feed(feed).unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].author, "");
    assert_eq!(articles[1].source_url, "https://news.example/office");

    assert!(matches!(parse_feed("{}"), Err(HrError::Feed(_))));
}

#[tokio::test]
async fn articles_can_be_deleted() {
    let db = setup_db().await;
    let created = create_article(&db, article("gone", Utc::now().into(), ""))
        .await
        .unwrap();
    delete_article(&db, created.id).await.unwrap();
    assert!(matches!(
        find_article(&db, created.id).await,
        Err(HrError::NotFound { .. })
    ));
    assert!(matches!(
        delete_article(&db, created.id).await,
        Err(HrError::NotFound { .. })
    ));
}
