// Notification module
// In-app notification schema pushed under notifications/

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::event::Event;
use crate::models::user::User;

/// What a notification asks the recipient to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FriendRequest,
    EventInvite,
}

/// Notification document.
///
/// The id is the push key of the entry, not a stored field; the store fills
/// it in when reading and it stays out of the written document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(default, skip_serializing)]
    pub id: String,
    /// Recipient uid.
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    /// Unix milliseconds at send time.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_start: Option<NaiveDateTime>,
}

impl Notification {
    /// Notification sent to `recipient_uid` when `sender` requests to
    /// connect.
    pub fn friend_request(sender: &User, recipient_uid: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: String::new(),
            user_id: recipient_uid.into(),
            kind: NotificationKind::FriendRequest,
            message: format!("{} sent you a friend request!", sender.display_name()),
            timestamp,
            sender_id: Some(sender.uid.clone()),
            sender_image: sender.image.clone(),
            event_id: None,
            event_title: None,
            event_start: None,
        }
    }

    /// Notification sent to `recipient_uid` inviting them to `event`.
    ///
    /// Carries the event's title and start so the inbox can render the
    /// invite without another read; the thumbnail is the event's cover
    /// photo.
    pub fn event_invite(
        sender_uid: impl Into<String>,
        recipient_uid: impl Into<String>,
        event: &Event,
        timestamp: i64,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: recipient_uid.into(),
            kind: NotificationKind::EventInvite,
            message: format!("You have been invited to \"{}\"", event.title),
            timestamp,
            sender_id: Some(sender_uid.into()),
            sender_image: event.image.clone(),
            event_id: Some(event.id.clone()),
            event_title: Some(event.title.clone()),
            event_start: Some(event.start),
        }
    }
}
