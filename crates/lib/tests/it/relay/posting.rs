use std::collections::HashSet;

use ideaboard::{
    ClientEvent, NewIdea, Session,
    idea::{MAX_BODY_CHARS, MAX_TITLE_CHARS},
};

use crate::helpers::*;

#[tokio::test]
async fn test_posts_read_back_newest_first() {
    let ctx = TestContext::initialised().await;
    let session = joined_session("Ana", "Nurse");

    for title in ["A", "B", "C"] {
        ctx.relay()
            .post_idea(&session, NewIdea::new(title, "", "All"))
            .await
            .unwrap();
    }

    let titles: Vec<_> = ctx
        .store()
        .load()
        .await
        .iter()
        .map(|i| i.title.clone())
        .collect();
    assert_eq!(titles, ["C", "B", "A"]);
}

#[tokio::test]
async fn test_new_ideas_are_truncated_and_unliked() {
    let ctx = TestContext::initialised().await;
    let idea = ctx
        .relay()
        .post_idea(
            &Session::new(),
            NewIdea::new("x".repeat(MAX_TITLE_CHARS + 50), "y".repeat(5000), "All"),
        )
        .await
        .unwrap();

    assert_eq!(idea.title.chars().count(), MAX_TITLE_CHARS);
    assert_eq!(idea.body.chars().count(), MAX_BODY_CHARS);
    assert_eq!(idea.likes, 0);
    assert_eq!(ctx.store().load().await.ideas[0], idea);
}

#[tokio::test]
async fn test_empty_submission_gets_defaults() {
    let ctx = TestContext::initialised().await;
    let relay = ctx.relay();
    let mut conn = relay.connect().await;

    relay
        .handle(&mut conn.session, ClientEvent::PostIdea(NewIdea::default()))
        .await
        .unwrap();

    let idea = next_idea(&mut conn.events).await;
    assert_eq!(idea.title, "");
    assert_eq!(idea.body, "");
    assert_eq!(idea.audience, "All");
    assert_eq!(idea.author, "Anonymous");
}

#[tokio::test]
async fn test_sequential_posts_get_unique_ids() {
    let ctx = TestContext::initialised().await;
    let session = Session::new();
    let mut ids = HashSet::new();

    for i in 0..100 {
        let idea = ctx
            .relay()
            .post_idea(&session, NewIdea::new(format!("#{i}"), "", "All"))
            .await
            .unwrap();
        assert!(ids.insert(idea.id.clone()), "id {} reused", idea.id);
    }

    let stored: HashSet<_> = ctx
        .store()
        .load()
        .await
        .iter()
        .map(|i| i.id.clone())
        .collect();
    assert_eq!(stored, ids);
}

#[tokio::test]
async fn test_post_write_failure_is_returned_without_broadcast() {
    let ctx = TestContext::new();
    let relay = ideaboard::Relay::new(ideaboard::Store::in_dir(ctx.dir().join("missing")));
    let mut conn = relay.connect().await;

    let err = relay
        .handle(&mut conn.session, post_event("lost", "", "All"))
        .await
        .unwrap_err();
    assert!(err.is_io_error());
    assert_no_event(&mut conn.events);
}
