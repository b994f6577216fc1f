use ideaboard::{NewIdea, Session, store::DB_FILE};

use crate::helpers::*;

#[tokio::test]
async fn test_missing_document_loads_empty() {
    let ctx = TestContext::new();
    assert!(ctx.store().load().await.is_empty());
    assert!(ctx.store().try_load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_document_loads_empty() {
    let ctx = TestContext::new();
    std::fs::write(ctx.dir().join(DB_FILE), "{ this is not json").unwrap();

    assert!(ctx.store().load().await.is_empty());
    let err = ctx.store().try_load().await.unwrap_err();
    assert!(err.is_serialization_error());
}

#[tokio::test]
async fn test_wrong_shape_document_loads_empty() {
    let ctx = TestContext::new();
    std::fs::write(ctx.dir().join(DB_FILE), r#"{"ideas": "nope"}"#).unwrap();
    assert!(ctx.store().load().await.is_empty());
}

#[tokio::test]
async fn test_document_without_ideas_field_loads_empty() {
    let ctx = TestContext::new();
    std::fs::write(ctx.dir().join(DB_FILE), "{}").unwrap();
    assert!(ctx.store().try_load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_document_is_overwritten_by_next_post() {
    let ctx = TestContext::new();
    std::fs::write(ctx.dir().join(DB_FILE), "garbage").unwrap();

    ctx.relay()
        .post_idea(&Session::new(), NewIdea::new("fresh", "", "All"))
        .await
        .unwrap();

    let loaded = ctx.store().try_load().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.ideas[0].title, "fresh");
}

#[tokio::test]
async fn test_null_like_count_keeps_existing_records() {
    let ctx = TestContext::new();
    std::fs::write(
        ctx.dir().join(DB_FILE),
        r#"{"ideas": [
            {"id":"b","title":"second","body":"","author":"Ana","profession":"Nurse",
             "audience":"All","createdAt":"2024-01-01T00:00:01.000Z","likes":null},
            {"id":"a","title":"first","body":"","author":"Bo","profession":"Chef",
             "audience":"All","createdAt":"2024-01-01T00:00:00.000Z","likes":2}
        ]}"#,
    )
    .unwrap();

    let before = ctx.store().try_load().await.unwrap();
    assert_eq!(before.get("b").unwrap().likes, 0);
    assert_eq!(before.get("a").unwrap().likes, 2);

    ctx.relay()
        .post_idea(&Session::new(), NewIdea::new("new", "", "All"))
        .await
        .unwrap();
    let update = ctx.relay().like_idea("b").await.unwrap().unwrap();
    assert_eq!(update.likes, 1);

    let titles: Vec<_> = ctx
        .store()
        .try_load()
        .await
        .unwrap()
        .iter()
        .map(|idea| idea.title.clone())
        .collect();
    assert_eq!(titles, ["new", "second", "first"]);
}
