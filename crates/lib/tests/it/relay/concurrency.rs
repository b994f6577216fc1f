//! Concurrent mutations from many connections must not lose updates.

use ideaboard::NewIdea;

use crate::helpers::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_posts_are_all_kept() {
    let ctx = TestContext::initialised().await;
    let relay = ctx.relay().clone();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let relay = relay.clone();
            tokio::spawn(async move {
                let session = joined_session(&format!("user{i}"), "Tester");
                relay
                    .post_idea(&session, NewIdea::new(format!("idea {i}"), "", "All"))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(ctx.store().load().await.len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_are_all_counted() {
    let ctx = TestContext::initialised().await;
    let relay = ctx.relay().clone();
    let idea = relay
        .post_idea(&joined_session("Ana", "Nurse"), NewIdea::default())
        .await
        .unwrap();

    let mut observer = relay.connect().await;

    let tasks: Vec<_> = (0..40)
        .map(|_| {
            let relay = relay.clone();
            let id = idea.id.clone();
            tokio::spawn(async move { relay.like_idea(&id).await.unwrap() })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().is_some());
    }

    assert_eq!(ctx.store().load().await.get(&idea.id).unwrap().likes, 40);

    // Every broadcast count is distinct and they arrive in increasing order.
    let mut counts = Vec::new();
    for _ in 0..40 {
        counts.push(next_like(&mut observer.events).await.likes);
    }
    assert_eq!(counts, (1..=40).collect::<Vec<u64>>());
}
