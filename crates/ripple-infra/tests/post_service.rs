//! Post service behavior against the in-memory adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use uuid::Uuid;

use ripple_core::DomainError;
use ripple_core::domain::{Caller, EventKind};
use ripple_core::input::{CommentInput, PostInput, SearchFilter};
use ripple_core::ports::{PubSub, comment_channel};
use ripple_core::service::{CommentAdded, NotificationService, PostService};
use ripple_infra::{InMemoryEventLogRepository, InMemoryPostRepository, InMemoryPubSub};

fn caller(name: &str) -> Caller {
    Caller {
        id: Uuid::new_v4(),
        name: name.to_string(),
        avatar: format!("{name}.png"),
    }
}

fn post_input(text: &str) -> PostInput {
    PostInput {
        text: text.to_string(),
        tags: vec![],
    }
}

fn comment_input(text: &str) -> CommentInput {
    CommentInput {
        text: text.to_string(),
    }
}

struct Fixture {
    service: PostService,
    notifications: NotificationService,
    pubsub: Arc<InMemoryPubSub>,
}

fn fixture() -> Fixture {
    let posts = Arc::new(InMemoryPostRepository::new());
    let logs = Arc::new(InMemoryEventLogRepository::new());
    let pubsub = Arc::new(InMemoryPubSub::default());
    let notifications = NotificationService::new(logs);
    let service = PostService::new(posts, notifications.clone(), pubsub.clone());
    Fixture {
        service,
        notifications,
        pubsub,
    }
}

#[tokio::test]
async fn create_returns_post_with_author_snapshot() {
    let f = fixture();
    let alice = caller("alice");

    let post = f
        .service
        .create(post_input("Hello world this is a test"), &alice)
        .await
        .unwrap();

    assert_eq!(post.text, "Hello world this is a test");
    assert_eq!(post.user_id, alice.id);
    assert_eq!(post.name, "alice");
    assert_eq!(post.avatar, "alice.png");
    assert!(post.likes.is_empty());
    assert!(post.comments.is_empty());
}

#[tokio::test]
async fn create_rejects_text_out_of_bounds() {
    let f = fixture();
    let err = f
        .service
        .create(post_input("x"), &caller("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn like_then_duplicate_like_scenario() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("Hello world this is a test"), &alice)
        .await
        .unwrap();

    // Bob likes: one like on the post, one unread LIKE entry for Alice.
    let liked = f.service.add_like(post.id, &bob).await.unwrap();
    assert_eq!(liked.likes.len(), 1);
    assert_eq!(liked.likes[0].user_id, bob.id);

    let log = f.notifications.events_for(alice.id).await.unwrap().unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].post_id, post.id);
    assert_eq!(log.events[0].kind, EventKind::Like);
    assert!(!log.events[0].is_read);

    // Second like conflicts and leaves everything untouched.
    let err = f.service.add_like(post.id, &bob).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyLiked));

    let post = f.service.get(post.id).await.unwrap();
    assert_eq!(post.likes.len(), 1);
    let log = f.notifications.events_for(alice.id).await.unwrap().unwrap();
    assert_eq!(log.events.len(), 1);
}

#[tokio::test]
async fn double_toggle_restores_like_set() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("toggle me twice"), &alice)
        .await
        .unwrap();

    let once = f.service.toggle_like(post.id, &bob).await.unwrap();
    assert_eq!(once.likes.len(), 1);

    let twice = f.service.toggle_like(post.id, &bob).await.unwrap();
    assert!(twice.likes.is_empty());

    // The pending LIKE event was retracted with the like.
    let log = f.notifications.events_for(alice.id).await.unwrap().unwrap();
    assert!(log.events.is_empty());
}

#[tokio::test]
async fn unread_like_entry_is_not_duplicated() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");
    let carol = caller("carol");

    let post = f
        .service
        .create(post_input("a well liked post"), &alice)
        .await
        .unwrap();

    f.service.add_like(post.id, &bob).await.unwrap();
    // Carol's like lands while Bob's entry is still unread: deduplicated.
    f.service.add_like(post.id, &carol).await.unwrap();

    let log = f.notifications.events_for(alice.id).await.unwrap().unwrap();
    assert_eq!(log.events.len(), 1);
}

#[tokio::test]
async fn own_like_does_not_notify() {
    let f = fixture();
    let alice = caller("alice");

    let post = f
        .service
        .create(post_input("liking my own post"), &alice)
        .await
        .unwrap();
    f.service.add_like(post.id, &alice).await.unwrap();

    assert!(f.notifications.events_for(alice.id).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_like_requires_existing_like() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("nothing to remove"), &alice)
        .await
        .unwrap();

    let err = f.service.remove_like(post.id, &bob).await.unwrap_err();
    assert!(matches!(err, DomainError::NotLiked));
}

#[tokio::test]
async fn update_by_non_owner_is_rejected_and_leaves_post_alone() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("original text here"), &alice)
        .await
        .unwrap();

    let err = f
        .service
        .update(post.id, post_input("overwritten by someone else"), &bob)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    let unchanged = f.service.get(post.id).await.unwrap();
    assert_eq!(unchanged.text, "original text here");
}

#[tokio::test]
async fn delete_returns_snapshot_and_removes_post() {
    let f = fixture();
    let alice = caller("alice");

    let post = f
        .service
        .create(post_input("soon to be gone"), &alice)
        .await
        .unwrap();

    let snapshot = f.service.delete(post.id, &alice).await.unwrap();
    assert_eq!(snapshot.text, "soon to be gone");

    let err = f.service.get(post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn delete_many_rejects_mixed_ownership_without_deleting() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let mine = f
        .service
        .create(post_input("alice's own post"), &alice)
        .await
        .unwrap();
    let theirs = f
        .service
        .create(post_input("bob's own post"), &bob)
        .await
        .unwrap();

    let err = f
        .service
        .delete_many(&[mine.id, theirs.id], &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    // Nothing was deleted, including the post Alice does own.
    assert!(f.service.get(mine.id).await.is_ok());
    assert!(f.service.get(theirs.id).await.is_ok());
}

#[tokio::test]
async fn delete_many_rejects_unknown_ids() {
    let f = fixture();
    let alice = caller("alice");

    let post = f
        .service
        .create(post_input("the only real one"), &alice)
        .await
        .unwrap();

    let err = f
        .service
        .delete_many(&[post.id, Uuid::new_v4()], &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(f.service.get(post.id).await.is_ok());
}

#[tokio::test]
async fn delete_many_removes_all_owned_targets() {
    let f = fixture();
    let alice = caller("alice");

    let a = f
        .service
        .create(post_input("first of two"), &alice)
        .await
        .unwrap();
    let b = f
        .service
        .create(post_input("second of two"), &alice)
        .await
        .unwrap();

    let deleted = f.service.delete_many(&[a.id, b.id], &alice).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(f.service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_is_prepended_and_notifies_owner() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("come talk to me"), &alice)
        .await
        .unwrap();

    f.service
        .add_comment(post.id, comment_input("first comment"), &bob)
        .await
        .unwrap();
    let post = f
        .service
        .add_comment(post.id, comment_input("second comment"), &bob)
        .await
        .unwrap();

    assert_eq!(post.comments.len(), 2);
    assert_eq!(post.comments[0].text, "second comment");

    // One unread COMMENT entry, deduplicated while unread, described by
    // the comment that created it.
    let log = f.notifications.events_for(alice.id).await.unwrap().unwrap();
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].kind, EventKind::Comment);
    assert_eq!(log.events[0].description, "first comment");
}

#[tokio::test]
async fn comment_publishes_on_the_post_channel() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("subscribe to me"), &alice)
        .await
        .unwrap();

    let received = Arc::new(AtomicUsize::new(0));
    let counter = received.clone();
    f.pubsub
        .subscribe(
            &comment_channel(post.id),
            Box::new(move |msg| {
                let counter = counter.clone();
                Box::pin(async move {
                    let payload: CommentAdded = serde_json::from_str(&msg.payload).unwrap();
                    assert_eq!(payload.comment.text, "streamed comment");
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                })
            }),
        )
        .await
        .unwrap();

    f.service
        .add_comment(post.id, comment_input("streamed comment"), &bob)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(received.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn comment_update_is_author_only() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("a post of alice"), &alice)
        .await
        .unwrap();
    let post = f
        .service
        .add_comment(post.id, comment_input("bob's comment"), &bob)
        .await
        .unwrap();
    let comment_id = post.comments[0].id;

    // Even the post owner cannot edit someone else's comment.
    let err = f
        .service
        .update_comment(post.id, comment_id, comment_input("edited by alice"), &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));

    let updated = f
        .service
        .update_comment(post.id, comment_id, comment_input("edited by bob"), &bob)
        .await
        .unwrap();
    assert_eq!(updated.comments[0].text, "edited by bob");
}

#[tokio::test]
async fn missing_comment_is_its_own_error() {
    let f = fixture();
    let alice = caller("alice");

    let post = f
        .service
        .create(post_input("no comments here"), &alice)
        .await
        .unwrap();

    let err = f
        .service
        .delete_comment(post.id, Uuid::new_v4(), &alice)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::CommentNotFound));
}

#[tokio::test]
async fn deleting_a_comment_retracts_the_pending_event() {
    let f = fixture();
    let alice = caller("alice");
    let bob = caller("bob");

    let post = f
        .service
        .create(post_input("comment and run"), &alice)
        .await
        .unwrap();
    let post = f
        .service
        .add_comment(post.id, comment_input("hit and run"), &bob)
        .await
        .unwrap();
    let comment_id = post.comments[0].id;

    let post = f
        .service
        .delete_comment(post.id, comment_id, &bob)
        .await
        .unwrap();
    assert!(post.comments.is_empty());

    let log = f.notifications.events_for(alice.id).await.unwrap().unwrap();
    assert!(log.events.is_empty());
}

#[tokio::test]
async fn search_matches_name_and_honors_paging() {
    let f = fixture();
    let hello = caller("Hello");
    let other = caller("Other");

    f.service
        .create(post_input("a post by Hello"), &hello)
        .await
        .unwrap();
    f.service
        .create(post_input("a post by Other"), &other)
        .await
        .unwrap();

    let filter = SearchFilter {
        name: Some("Hello".into()),
        page: Some("0".into()),
        ..Default::default()
    };
    let results = f.service.search(&filter).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Hello");

    let filter = SearchFilter {
        page: Some("not-a-number".into()),
        ..Default::default()
    };
    assert!(matches!(
        f.service.search(&filter).await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn search_rejects_page_whose_offset_would_overflow() {
    let f = fixture();

    // Parses as a valid u64 but cannot be scaled to a skip offset.
    let filter = SearchFilter {
        page: Some(u64::MAX.to_string()),
        ..Default::default()
    };
    assert!(matches!(
        f.service.search(&filter).await,
        Err(DomainError::Validation(_))
    ));
}
