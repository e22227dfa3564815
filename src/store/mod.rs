//! Document-store boundary.
//!
//! Persistence, identity, and media hosting are delegated to hosted
//! services; the traits here pin down exactly what the application
//! consumes from each so everything above the boundary stays typed.
//! [`MemoryStore`] is the in-process reference implementation backing the
//! demo and the test suites.

pub mod auth;
mod memory;
mod subscription;
pub mod upload;

pub use auth::{AuthListener, AuthProvider, AuthUser, Session};
pub use memory::MemoryStore;
pub use subscription::Subscription;
pub use upload::ObjectUpload;

use anyhow::Result;
use thiserror::Error;

use crate::models::event::Event;
use crate::models::notification::Notification;
use crate::models::user::User;

/// Listener invoked with the full updated event set.
pub type EventListener = Box<dyn Fn(&[Event]) + Send + Sync>;

/// Listener invoked with the recipient's updated notifications.
pub type NotificationListener = Box<dyn Fn(&[Notification]) + Send + Sync>;

/// Typed store failures, surfaced inside [`anyhow::Error`] chains.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document at {path}")]
    NotFound { path: String },
    #[error("malformed document at {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Profile fields an edit can change; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub allow_event_invites: Option<bool>,
}

impl UserPatch {
    /// Copy the set fields onto `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            user.phone_number = phone_number.clone();
        }
        if let Some(address) = &self.address {
            user.address = address.clone();
        }
        if let Some(image) = &self.image {
            user.image = Some(image.clone());
        }
        if let Some(allow_event_invites) = self.allow_event_invites {
            user.allow_event_invites = allow_event_invites;
        }
    }
}

/// Operations the application performs against the document store.
///
/// Collection reads skip documents that fail to deserialize (logging a
/// warning), so one bad record never blanks a calendar. Single-document
/// reads surface [`StoreError::Malformed`] instead. Removals of missing
/// documents are no-ops.
pub trait EventStore {
    /// Read one event by id.
    fn event(&self, id: &str) -> Result<Option<Event>>;

    /// All well-formed events.
    fn events(&self) -> Result<Vec<Event>>;

    /// Events anyone may see.
    fn public_events(&self) -> Result<Vec<Event>>;

    /// Events `uid` created.
    fn events_created_by(&self, uid: &str) -> Result<Vec<Event>>;

    /// Events `uid` has joined.
    fn events_joined_by(&self, uid: &str) -> Result<Vec<Event>>;

    /// Store a new event under a fresh push id and return the id.
    fn create_event(&self, event: &Event) -> Result<String>;

    /// Write an event at `events/{event.id}`.
    fn put_event(&self, event: &Event) -> Result<()>;

    /// Delete an event.
    fn remove_event(&self, id: &str) -> Result<()>;

    /// Set or clear `uid`'s membership under `events/{id}/participants`.
    /// Joining writes `true`; leaving removes the key.
    fn set_participant(&self, event_id: &str, uid: &str, joined: bool) -> Result<()>;

    /// Read one profile by uid.
    fn user(&self, uid: &str) -> Result<Option<User>>;

    /// All well-formed profiles.
    fn users(&self) -> Result<Vec<User>>;

    /// Write a profile at `users/{user.uid}`.
    fn put_user(&self, user: &User) -> Result<()>;

    /// Apply a field-level profile update.
    fn update_user(&self, uid: &str, patch: &UserPatch) -> Result<()>;

    /// Link a pending request on both profiles and notify the recipient.
    /// Returns the notification id.
    fn send_friend_request(&self, from_uid: &str, to_uid: &str) -> Result<String>;

    /// Make the two users contacts, clear the pending links, and remove
    /// the originating notification.
    fn accept_friend_request(
        &self,
        uid: &str,
        sender_uid: &str,
        notification_id: &str,
    ) -> Result<()>;

    /// Clear the pending links and remove the originating notification.
    fn decline_friend_request(
        &self,
        uid: &str,
        sender_uid: &str,
        notification_id: &str,
    ) -> Result<()>;

    /// Drop the contact link on both profiles.
    fn remove_friend(&self, uid: &str, friend_uid: &str) -> Result<()>;

    /// Notify `recipient_uid` of an invitation to the event. Returns the
    /// notification id.
    fn send_event_invite(
        &self,
        sender_uid: &str,
        recipient_uid: &str,
        event_id: &str,
    ) -> Result<String>;

    /// Join `uid` to the event and remove the invite notification.
    fn accept_event_invite(&self, uid: &str, event_id: &str, notification_id: &str) -> Result<()>;

    /// Remove the invite notification without joining.
    fn decline_event_invite(&self, notification_id: &str) -> Result<()>;

    /// Notifications addressed to `uid`, oldest first.
    fn notifications_for(&self, uid: &str) -> Result<Vec<Notification>>;

    /// Delete a notification.
    fn remove_notification(&self, id: &str) -> Result<()>;

    /// Watch the event set. The listener fires once with the current
    /// events before this returns, then again after every change.
    fn subscribe_events(&self, listener: EventListener) -> Subscription;

    /// Watch `uid`'s notifications, with the same fire-now-then-on-change
    /// contract as [`subscribe_events`](EventStore::subscribe_events).
    fn subscribe_notifications(&self, uid: &str, listener: NotificationListener) -> Subscription;
}
