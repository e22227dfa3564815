// In-memory store
// Reference EventStore holding raw JSON documents, the shape a hosted
// store serves; backs the demo binary and the test suites

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::event::Event;
use crate::models::notification::Notification;
use crate::models::user::User;

use super::subscription::Subscription;
use super::{EventListener, EventStore, NotificationListener, StoreError, UserPatch};

#[derive(Default)]
struct Documents {
    events: BTreeMap<String, Value>,
    users: BTreeMap<String, Value>,
    notifications: BTreeMap<String, Value>,
}

#[derive(Default)]
struct Listeners {
    events: HashMap<u64, EventListener>,
    notifications: HashMap<u64, (String, NotificationListener)>,
}

#[derive(Default)]
struct Inner {
    documents: RwLock<Documents>,
    listeners: Mutex<Listeners>,
    next_listener_id: AtomicU64,
    next_push_id: AtomicU64,
}

/// In-memory [`EventStore`] over a raw JSON document tree.
///
/// Documents deserialize on the way out, so the tree can hold anything a
/// hosted store might serve, malformed entries included. Listeners run
/// synchronously on the mutating call, after the write has landed; a
/// listener may read the store but must not register or cancel
/// subscriptions from inside the callback.
///
/// Cloning shares the same tree and listeners.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a raw document at `collection/id`, bypassing the typed API.
    /// Lets seeds and tests shape the tree exactly as a hosted store
    /// might, malformed entries included.
    pub fn insert_document(&self, path: &str, document: Value) -> Result<()> {
        let (collection, id) = path
            .split_once('/')
            .with_context(|| format!("Document path {path:?} must be collection/id"))?;
        match collection {
            "events" => {
                self.write_docs().events.insert(id.to_string(), document);
                self.notify_event_listeners();
            }
            "users" => {
                self.write_docs().users.insert(id.to_string(), document);
            }
            "notifications" => {
                self.write_docs()
                    .notifications
                    .insert(id.to_string(), document);
                self.notify_notification_listeners();
            }
            other => bail!("Unknown collection {other:?} in path {path:?}"),
        }
        Ok(())
    }

    fn read_docs(&self) -> RwLockReadGuard<'_, Documents> {
        self.inner
            .documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_docs(&self) -> RwLockWriteGuard<'_, Documents> {
        self.inner
            .documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn next_push_id(&self, prefix: &str) -> String {
        let seq = self.inner.next_push_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{seq:06}")
    }

    fn notify_event_listeners(&self) {
        let snapshot = collect_events(&self.read_docs());
        let listeners = self.lock_listeners();
        for listener in listeners.events.values() {
            listener(&snapshot);
        }
    }

    fn notify_notification_listeners(&self) {
        let snapshot = collect_notifications(&self.read_docs());
        let listeners = self.lock_listeners();
        for (uid, listener) in listeners.notifications.values() {
            let addressed: Vec<Notification> = snapshot
                .iter()
                .filter(|notification| notification.user_id == *uid)
                .cloned()
                .collect();
            listener(&addressed);
        }
    }
}

impl EventStore for MemoryStore {
    fn event(&self, id: &str) -> Result<Option<Event>> {
        let docs = self.read_docs();
        match docs.events.get(id) {
            Some(value) => {
                let mut event: Event = parse_document("events", id, value)?;
                event.id = id.to_string();
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    fn events(&self) -> Result<Vec<Event>> {
        Ok(collect_events(&self.read_docs()))
    }

    fn public_events(&self) -> Result<Vec<Event>> {
        let mut events = collect_events(&self.read_docs());
        events.retain(|event| event.is_visible_to(None));
        Ok(events)
    }

    fn events_created_by(&self, uid: &str) -> Result<Vec<Event>> {
        let mut events = collect_events(&self.read_docs());
        events.retain(|event| event.creator_id == uid);
        Ok(events)
    }

    fn events_joined_by(&self, uid: &str) -> Result<Vec<Event>> {
        let mut events = collect_events(&self.read_docs());
        events.retain(|event| event.is_participant(uid));
        Ok(events)
    }

    fn create_event(&self, event: &Event) -> Result<String> {
        let id = self.next_push_id("ev");
        let mut stored = event.clone();
        stored.id = id.clone();
        let document = to_document(&stored, "events", &id)?;
        self.write_docs().events.insert(id.clone(), document);
        self.notify_event_listeners();
        Ok(id)
    }

    fn put_event(&self, event: &Event) -> Result<()> {
        if event.id.is_empty() {
            bail!("Cannot write an event without an id");
        }
        let document = to_document(event, "events", &event.id)?;
        self.write_docs().events.insert(event.id.clone(), document);
        self.notify_event_listeners();
        Ok(())
    }

    fn remove_event(&self, id: &str) -> Result<()> {
        let removed = self.write_docs().events.remove(id).is_some();
        if removed {
            self.notify_event_listeners();
        }
        Ok(())
    }

    fn set_participant(&self, event_id: &str, uid: &str, joined: bool) -> Result<()> {
        {
            let mut docs = self.write_docs();
            let mut event = parse_event_entry(&docs, event_id)?;
            if joined {
                event.participants.insert(uid.to_string(), true);
            } else {
                event.participants.remove(uid);
            }
            docs.events
                .insert(event_id.to_string(), to_document(&event, "events", event_id)?);
        }
        self.notify_event_listeners();
        Ok(())
    }

    fn user(&self, uid: &str) -> Result<Option<User>> {
        let docs = self.read_docs();
        match docs.users.get(uid) {
            Some(value) => Ok(Some(parse_document("users", uid, value)?)),
            None => Ok(None),
        }
    }

    fn users(&self) -> Result<Vec<User>> {
        Ok(collect_users(&self.read_docs()))
    }

    fn put_user(&self, user: &User) -> Result<()> {
        if user.uid.is_empty() {
            bail!("Cannot write a profile without a uid");
        }
        let document = to_document(user, "users", &user.uid)?;
        self.write_docs().users.insert(user.uid.clone(), document);
        Ok(())
    }

    fn update_user(&self, uid: &str, patch: &UserPatch) -> Result<()> {
        let mut docs = self.write_docs();
        let mut user = parse_user_entry(&docs, uid)?;
        patch.apply_to(&mut user);
        let document = to_document(&user, "users", uid)?;
        docs.users.insert(uid.to_string(), document);
        Ok(())
    }

    fn send_friend_request(&self, from_uid: &str, to_uid: &str) -> Result<String> {
        let notification_id = self.next_push_id("ntf");
        {
            let mut docs = self.write_docs();
            let mut sender = parse_user_entry(&docs, from_uid)?;
            let mut recipient = parse_user_entry(&docs, to_uid)?;

            sender.friend_requests.sent.insert(to_uid.to_string(), true);
            recipient
                .friend_requests
                .received
                .insert(from_uid.to_string(), true);
            let notification = Notification::friend_request(&sender, to_uid, now_millis());

            docs.users
                .insert(from_uid.to_string(), to_document(&sender, "users", from_uid)?);
            docs.users
                .insert(to_uid.to_string(), to_document(&recipient, "users", to_uid)?);
            docs.notifications.insert(
                notification_id.clone(),
                to_document(&notification, "notifications", &notification_id)?,
            );
        }
        self.notify_notification_listeners();
        Ok(notification_id)
    }

    fn accept_friend_request(
        &self,
        uid: &str,
        sender_uid: &str,
        notification_id: &str,
    ) -> Result<()> {
        {
            let mut docs = self.write_docs();
            let mut accepter = parse_user_entry(&docs, uid)?;
            let mut sender = parse_user_entry(&docs, sender_uid)?;

            accepter.contacts.insert(sender_uid.to_string(), true);
            sender.contacts.insert(uid.to_string(), true);
            accepter.friend_requests.received.remove(sender_uid);
            sender.friend_requests.sent.remove(uid);

            docs.users
                .insert(uid.to_string(), to_document(&accepter, "users", uid)?);
            docs.users
                .insert(sender_uid.to_string(), to_document(&sender, "users", sender_uid)?);
            docs.notifications.remove(notification_id);
        }
        self.notify_notification_listeners();
        Ok(())
    }

    fn decline_friend_request(
        &self,
        uid: &str,
        sender_uid: &str,
        notification_id: &str,
    ) -> Result<()> {
        {
            let mut docs = self.write_docs();
            let mut decliner = parse_user_entry(&docs, uid)?;
            let mut sender = parse_user_entry(&docs, sender_uid)?;

            decliner.friend_requests.received.remove(sender_uid);
            sender.friend_requests.sent.remove(uid);

            docs.users
                .insert(uid.to_string(), to_document(&decliner, "users", uid)?);
            docs.users
                .insert(sender_uid.to_string(), to_document(&sender, "users", sender_uid)?);
            docs.notifications.remove(notification_id);
        }
        self.notify_notification_listeners();
        Ok(())
    }

    fn remove_friend(&self, uid: &str, friend_uid: &str) -> Result<()> {
        let mut docs = self.write_docs();
        let mut user = parse_user_entry(&docs, uid)?;
        let mut friend = parse_user_entry(&docs, friend_uid)?;

        user.contacts.remove(friend_uid);
        friend.contacts.remove(uid);

        docs.users
            .insert(uid.to_string(), to_document(&user, "users", uid)?);
        docs.users
            .insert(friend_uid.to_string(), to_document(&friend, "users", friend_uid)?);
        Ok(())
    }

    fn send_event_invite(
        &self,
        sender_uid: &str,
        recipient_uid: &str,
        event_id: &str,
    ) -> Result<String> {
        let notification_id = self.next_push_id("ntf");
        {
            let mut docs = self.write_docs();
            let event = parse_event_entry(&docs, event_id)?;
            let notification =
                Notification::event_invite(sender_uid, recipient_uid, &event, now_millis());
            docs.notifications.insert(
                notification_id.clone(),
                to_document(&notification, "notifications", &notification_id)?,
            );
        }
        self.notify_notification_listeners();
        Ok(notification_id)
    }

    fn accept_event_invite(&self, uid: &str, event_id: &str, notification_id: &str) -> Result<()> {
        {
            let mut docs = self.write_docs();
            let mut event = parse_event_entry(&docs, event_id)?;
            event.participants.insert(uid.to_string(), true);
            docs.events
                .insert(event_id.to_string(), to_document(&event, "events", event_id)?);
            docs.notifications.remove(notification_id);
        }
        self.notify_event_listeners();
        self.notify_notification_listeners();
        Ok(())
    }

    fn decline_event_invite(&self, notification_id: &str) -> Result<()> {
        self.remove_notification(notification_id)
    }

    fn notifications_for(&self, uid: &str) -> Result<Vec<Notification>> {
        let mut notifications = collect_notifications(&self.read_docs());
        notifications.retain(|notification| notification.user_id == uid);
        Ok(notifications)
    }

    fn remove_notification(&self, id: &str) -> Result<()> {
        let removed = self.write_docs().notifications.remove(id).is_some();
        if removed {
            self.notify_notification_listeners();
        }
        Ok(())
    }

    fn subscribe_events(&self, listener: EventListener) -> Subscription {
        let snapshot = collect_events(&self.read_docs());
        listener(&snapshot);

        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().events.insert(id, listener);

        let store = self.clone();
        Subscription::new(move || {
            store.lock_listeners().events.remove(&id);
        })
    }

    fn subscribe_notifications(&self, uid: &str, listener: NotificationListener) -> Subscription {
        let addressed: Vec<Notification> = collect_notifications(&self.read_docs())
            .into_iter()
            .filter(|notification| notification.user_id == uid)
            .collect();
        listener(&addressed);

        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners()
            .notifications
            .insert(id, (uid.to_string(), listener));

        let store = self.clone();
        Subscription::new(move || {
            store.lock_listeners().notifications.remove(&id);
        })
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_document<T: serde::Serialize>(value: &T, collection: &str, id: &str) -> Result<Value> {
    serde_json::to_value(value)
        .with_context(|| format!("Failed to serialize document at {collection}/{id}"))
}

fn parse_document<T: DeserializeOwned>(
    collection: &str,
    id: &str,
    value: &Value,
) -> Result<T, StoreError> {
    serde_json::from_value(value.clone()).map_err(|err| StoreError::Malformed {
        path: format!("{collection}/{id}"),
        reason: err.to_string(),
    })
}

fn parse_user_entry(docs: &Documents, uid: &str) -> Result<User> {
    let value = docs.users.get(uid).ok_or_else(|| StoreError::NotFound {
        path: format!("users/{uid}"),
    })?;
    Ok(parse_document("users", uid, value)?)
}

fn parse_event_entry(docs: &Documents, id: &str) -> Result<Event> {
    let value = docs.events.get(id).ok_or_else(|| StoreError::NotFound {
        path: format!("events/{id}"),
    })?;
    let mut event: Event = parse_document("events", id, value)?;
    event.id = id.to_string();
    Ok(event)
}

fn collect_events(docs: &Documents) -> Vec<Event> {
    docs.events
        .iter()
        .filter_map(|(id, value)| match parse_document::<Event>("events", id, value) {
            Ok(mut event) => {
                event.id = id.clone();
                Some(event)
            }
            Err(err) => {
                warn!("Skipping {err}");
                None
            }
        })
        .collect()
}

fn collect_users(docs: &Documents) -> Vec<User> {
    docs.users
        .iter()
        .filter_map(|(uid, value)| match parse_document::<User>("users", uid, value) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("Skipping {err}");
                None
            }
        })
        .collect()
}

fn collect_notifications(docs: &Documents) -> Vec<Notification> {
    docs.notifications
        .iter()
        .filter_map(|(id, value)| {
            match parse_document::<Notification>("notifications", id, value) {
                Ok(mut notification) => {
                    notification.id = id.clone();
                    Some(notification)
                }
                Err(err) => {
                    warn!("Skipping {err}");
                    None
                }
            }
        })
        .collect()
}
