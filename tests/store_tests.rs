// Integration tests for the in-memory document store
// Runs the friend-request and invite flows end to end, then checks live
// subscriptions, visibility queries, and the upload size gate

mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use calgrid::models::event::{Event, Visibility};
use calgrid::models::notification::NotificationKind;
use calgrid::services::validation::{validate_image_size, MAX_COVER_PHOTO_BYTES};
use calgrid::store::{EventStore, MemoryStore, ObjectUpload};

use fixtures::{dt, named_user, sample_events};

fn store_with_users() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .put_user(&named_user("uid-alice", "alice", "Alice", "Anderson"))
        .expect("Failed to store alice");
    store
        .put_user(&named_user("uid-bob", "bobby", "Bob", "Borisov"))
        .expect("Failed to store bob");
    store
}

#[test]
fn test_friend_request_lifecycle() {
    let store = store_with_users();

    // Send: both profiles gain a pending link, the recipient is notified
    let notification_id = store
        .send_friend_request("uid-alice", "uid-bob")
        .expect("Failed to send friend request");

    let alice = store.user("uid-alice").expect("read alice").expect("alice exists");
    let bob = store.user("uid-bob").expect("read bob").expect("bob exists");
    assert!(alice.friend_requests.sent.contains_key("uid-bob"));
    assert!(bob.friend_requests.received.contains_key("uid-alice"));
    assert!(alice.contacts.is_empty());

    let inbox = store.notifications_for("uid-bob").expect("read inbox");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, notification_id);
    assert_eq!(inbox[0].kind, NotificationKind::FriendRequest);
    assert_eq!(inbox[0].message, "Alice Anderson sent you a friend request!");
    assert_eq!(inbox[0].sender_id.as_deref(), Some("uid-alice"));

    // Accept: contacts link both ways, pending state and notification clear
    store
        .accept_friend_request("uid-bob", "uid-alice", &notification_id)
        .expect("Failed to accept friend request");

    let alice = store.user("uid-alice").expect("read alice").expect("alice exists");
    let bob = store.user("uid-bob").expect("read bob").expect("bob exists");
    assert!(alice.contacts.contains_key("uid-bob"));
    assert!(bob.contacts.contains_key("uid-alice"));
    assert!(alice.friend_requests.is_empty());
    assert!(bob.friend_requests.is_empty());
    assert!(store.notifications_for("uid-bob").expect("read inbox").is_empty());

    // Remove: the contact link drops on both sides
    store
        .remove_friend("uid-alice", "uid-bob")
        .expect("Failed to remove friend");
    let alice = store.user("uid-alice").expect("read alice").expect("alice exists");
    let bob = store.user("uid-bob").expect("read bob").expect("bob exists");
    assert!(alice.contacts.is_empty());
    assert!(bob.contacts.is_empty());
}

#[test]
fn test_declined_friend_request_leaves_no_trace() {
    let store = store_with_users();

    let notification_id = store
        .send_friend_request("uid-alice", "uid-bob")
        .expect("Failed to send friend request");
    store
        .decline_friend_request("uid-bob", "uid-alice", &notification_id)
        .expect("Failed to decline friend request");

    let alice = store.user("uid-alice").expect("read alice").expect("alice exists");
    let bob = store.user("uid-bob").expect("read bob").expect("bob exists");
    assert!(alice.contacts.is_empty());
    assert!(bob.contacts.is_empty());
    assert!(alice.friend_requests.is_empty());
    assert!(bob.friend_requests.is_empty());
    assert!(store.notifications_for("uid-bob").expect("read inbox").is_empty());
}

#[test]
fn test_friend_request_requires_both_profiles() {
    let store = MemoryStore::new();
    store
        .put_user(&named_user("uid-alice", "alice", "Alice", "Anderson"))
        .expect("Failed to store alice");

    assert!(store.send_friend_request("uid-alice", "uid-ghost").is_err());
    assert!(store.send_friend_request("uid-ghost", "uid-alice").is_err());
}

#[test]
fn test_event_invite_accept_joins_the_event() {
    let store = store_with_users();
    let picnic = Event::builder()
        .creator_id("uid-alice")
        .title("Spring Picnic")
        .start(dt(2025, 4, 5, 11, 0))
        .end(dt(2025, 4, 5, 15, 0))
        .build()
        .expect("Failed to build event");
    let event_id = store.create_event(&picnic).expect("Failed to create event");

    let notification_id = store
        .send_event_invite("uid-alice", "uid-bob", &event_id)
        .expect("Failed to send invite");

    let inbox = store.notifications_for("uid-bob").expect("read inbox");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::EventInvite);
    assert_eq!(inbox[0].message, "You have been invited to \"Spring Picnic\"");
    assert_eq!(inbox[0].event_id.as_deref(), Some(event_id.as_str()));
    assert_eq!(inbox[0].event_start, Some(dt(2025, 4, 5, 11, 0)));

    store
        .accept_event_invite("uid-bob", &event_id, &notification_id)
        .expect("Failed to accept invite");

    let joined = store.event(&event_id).expect("read event").expect("event exists");
    assert_eq!(joined.participants.get("uid-bob"), Some(&true));
    assert!(store.notifications_for("uid-bob").expect("read inbox").is_empty());

    let bobs_events = store.events_joined_by("uid-bob").expect("Failed to query joined");
    assert_eq!(bobs_events.len(), 1);
    assert_eq!(bobs_events[0].title, "Spring Picnic");
}

#[test]
fn test_event_invite_decline_only_clears_the_notification() {
    let store = store_with_users();
    let picnic = Event::builder()
        .creator_id("uid-alice")
        .title("Spring Picnic")
        .start(dt(2025, 4, 5, 11, 0))
        .end(dt(2025, 4, 5, 15, 0))
        .build()
        .expect("Failed to build event");
    let event_id = store.create_event(&picnic).expect("Failed to create event");
    let notification_id = store
        .send_event_invite("uid-alice", "uid-bob", &event_id)
        .expect("Failed to send invite");

    store
        .decline_event_invite(&notification_id)
        .expect("Failed to decline invite");

    let event = store.event(&event_id).expect("read event").expect("event exists");
    assert!(event.participants.is_empty());
    assert!(store.notifications_for("uid-bob").expect("read inbox").is_empty());
}

#[test]
fn test_set_participant_joins_and_leaves() {
    let store = store_with_users();
    let samples = sample_events();
    let event_id = store.create_event(&samples[0]).expect("Failed to create event");

    store
        .set_participant(&event_id, "uid-bob", true)
        .expect("Failed to join event");
    let joined = store.events_joined_by("uid-bob").expect("Failed to query joined");
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].title, samples[0].title);

    store
        .set_participant(&event_id, "uid-bob", false)
        .expect("Failed to leave event");
    assert!(store.events_joined_by("uid-bob").expect("Failed to query joined").is_empty());

    // Leaving removes the key rather than flipping it to false
    let event = store.event(&event_id).expect("read event").expect("event exists");
    assert!(event.participants.is_empty());

    let missing = store.set_participant("ev-none", "uid-bob", true);
    assert!(missing.is_err());
}

#[test]
fn test_event_subscription_fires_now_and_on_every_change() {
    let store = store_with_users();
    let samples = sample_events();
    for event in samples.iter().take(2) {
        store.create_event(event).expect("Failed to seed event");
    }

    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = store.subscribe_events(Box::new(move |events| {
        sink.lock().unwrap().push(events.len());
    }));

    // Fires immediately with the current snapshot
    assert_eq!(*seen.lock().unwrap(), vec![2]);

    store.create_event(&samples[2]).expect("Failed to create event");
    assert_eq!(*seen.lock().unwrap(), vec![2, 3]);

    // A cancelled subscription goes quiet
    subscription.cancel();
    store.create_event(&samples[3]).expect("Failed to create event");
    assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
}

#[test]
fn test_notification_subscription_sees_only_its_recipient() {
    let store = store_with_users();
    store
        .put_user(&named_user("uid-carol", "carol", "Carol", "Carter"))
        .expect("Failed to store carol");

    let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = store.subscribe_notifications(
        "uid-bob",
        Box::new(move |notifications| {
            let ids = notifications
                .iter()
                .map(|notification| notification.user_id.clone())
                .collect();
            sink.lock().unwrap().push(ids);
        }),
    );

    store
        .send_friend_request("uid-alice", "uid-bob")
        .expect("Failed to send to bob");
    store
        .send_friend_request("uid-carol", "uid-alice")
        .expect("Failed to send to alice");

    let snapshots = seen.lock().unwrap();
    assert!(!snapshots.is_empty());
    // Every snapshot is filtered to bob, and bob's request showed up
    for snapshot in snapshots.iter() {
        assert!(snapshot.iter().all(|uid| uid == "uid-bob"));
    }
    assert_eq!(snapshots.last().map(Vec::len), Some(1));
}

#[test]
fn test_query_helpers_respect_visibility_and_creator() {
    let store = store_with_users();

    let open_mic = Event::builder()
        .creator_id("uid-alice")
        .title("Open Mic Night")
        .start(dt(2025, 4, 18, 20, 0))
        .end(dt(2025, 4, 18, 23, 0))
        .visibility(Visibility::Public)
        .build()
        .expect("Failed to build event");
    let planning = Event::builder()
        .creator_id("uid-alice")
        .title("Planning Session")
        .start(dt(2025, 4, 19, 9, 0))
        .end(dt(2025, 4, 19, 10, 0))
        .build()
        .expect("Failed to build event");
    let book_club = Event::builder()
        .creator_id("uid-bob")
        .title("Book Club")
        .start(dt(2025, 4, 20, 18, 0))
        .end(dt(2025, 4, 20, 19, 30))
        .build()
        .expect("Failed to build event");
    for event in [&open_mic, &planning, &book_club] {
        store.create_event(event).expect("Failed to create event");
    }

    let public = store.public_events().expect("Failed to query public");
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "Open Mic Night");

    let alices: Vec<String> = store
        .events_created_by("uid-alice")
        .expect("Failed to query created")
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(alices, vec!["Open Mic Night".to_string(), "Planning Session".to_string()]);

    assert!(store.events_joined_by("uid-bob").expect("Failed to query joined").is_empty());
}

/// Upload double that keeps objects in memory and enforces the cover
/// photo size cap the way a hosting adapter would.
struct MemoryUpload {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryUpload {
    fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
        }
    }
}

impl ObjectUpload for MemoryUpload {
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        validate_image_size(bytes.len())?;
        self.objects
            .lock()
            .unwrap()
            .insert(file_name.to_string(), bytes.to_vec());
        Ok(format!("mem://{file_name}"))
    }
}

#[test]
fn test_upload_rejects_oversized_cover_photos() {
    let uploads = MemoryUpload::new();

    let url = uploads
        .upload("cover.png", &[0u8; 1024])
        .expect("Failed to upload small image");
    assert_eq!(url, "mem://cover.png");

    let oversized = vec![0u8; MAX_COVER_PHOTO_BYTES + 1];
    assert!(uploads.upload("huge.png", &oversized).is_err());
}
