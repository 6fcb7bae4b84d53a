//! Tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` set: `cargo test -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use shortr::domain::repositories::LinkRepository;
use shortr::error::AppError;
use shortr::infrastructure::persistence::PgLinkRepository;
use shortr::utils::base62;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_with_derived_name(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create_with_derived_name("https://example.com/")
        .await
        .unwrap();

    assert_eq!(link.name, base62::encode(link.id).unwrap());
    assert_eq!(link.url, "https://example.com/");
    assert_eq!(link.hits, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_derived_names_are_unique(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let mut handles = Vec::new();
    for i in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.create_with_derived_name(&format!("https://example.com/{i}"))
                .await
                .unwrap()
        }));
    }

    let mut names = Vec::new();
    for handle in handles {
        names.push(handle.await.unwrap().name);
    }
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 20);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_derived_name_skips_explicit_token(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let explicit = repo
        .create_named("2", "https://a.example.com/")
        .await
        .unwrap();
    assert_eq!(explicit.id, 1);

    let derived = repo
        .create_with_derived_name("https://b.example.com/")
        .await
        .unwrap();

    assert_eq!(derived.name, "3");
    assert_eq!(derived.id, 3);
    assert_eq!(repo.find_by_name("2").await.unwrap().unwrap().url, "https://a.example.com/");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_name(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_named("docs", "https://example.com/docs")
        .await
        .unwrap();

    let link = repo.find_by_name("docs").await.unwrap().unwrap();
    assert_eq!(link.url, "https://example.com/docs");

    assert!(repo.find_by_name("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_named_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_named("docs", "https://example.com/a")
        .await
        .unwrap();

    let err = repo
        .create_named("docs", "https://example.com/b")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let created = repo
        .create_named("docs", "https://example.com/a")
        .await
        .unwrap();

    let updated = repo
        .update_url("docs", "https://example.com/b")
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.url, "https://example.com/b");
    assert!(updated.modified_at >= created.modified_at);

    let err = repo
        .update_url("missing", "https://example.com/")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_rename(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_named("old", "https://example.com/")
        .await
        .unwrap();
    repo.create_named("taken", "https://example.com/")
        .await
        .unwrap();

    let renamed = repo.rename("old", "new").await.unwrap();
    assert_eq!(renamed.name, "new");
    assert!(repo.find_by_name("old").await.unwrap().is_none());

    let err = repo.rename("new", "taken").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_named("gone", "https://example.com/")
        .await
        .unwrap();

    let deleted = repo.delete("gone").await.unwrap();
    assert_eq!(deleted.name, "gone");

    let err = repo.delete("gone").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_bump_metrics(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create_named("docs", "https://example.com/")
        .await
        .unwrap();

    repo.bump_metrics("docs").await.unwrap();
    repo.bump_metrics("docs").await.unwrap();

    let link = repo.find_by_name("docs").await.unwrap().unwrap();
    assert_eq!(link.hits, 2);
    assert!(link.last_hit_at.is_some());

    let err = repo.bump_metrics("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
