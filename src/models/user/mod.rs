// User module
// Profile schema as stored under users/{uid}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::validation::{self, ValidationError};

/// Pending friend-request links, keyed by the other user's uid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequests {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sent: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub received: BTreeMap<String, bool>,
}

impl FriendRequests {
    pub fn is_empty(&self) -> bool {
        self.sent.is_empty() && self.received.is_empty()
    }
}

/// Application user profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    /// Hosted avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_allow_invites")]
    pub allow_event_invites: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_blocked: bool,
    /// Accepted friends, keyed by uid.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contacts: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "FriendRequests::is_empty")]
    pub friend_requests: FriendRequests,
}

fn default_allow_invites() -> bool {
    true
}

impl User {
    /// Create a profile with the fields collected at registration.
    pub fn new(
        uid: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            phone_number: String::new(),
            address: String::new(),
            image: None,
            allow_event_invites: true,
            is_admin: false,
            is_blocked: false,
            contacts: BTreeMap::new(),
            friend_requests: FriendRequests::default(),
        }
    }

    /// "First Last" as shown in notifications and the contacts list.
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => self.username.clone(),
        }
    }

    pub fn is_contact(&self, uid: &str) -> bool {
        self.contacts.get(uid).copied().unwrap_or(false)
    }

    pub fn has_pending_request_from(&self, uid: &str) -> bool {
        self.friend_requests
            .received
            .get(uid)
            .copied()
            .unwrap_or(false)
    }

    /// Validate the profile fields against the registration rules
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_username(&self.username)?;
        validation::validate_name("first name", &self.first_name)?;
        validation::validate_name("last name", &self.last_name)?;
        validation::validate_email(&self.email)?;
        validation::validate_phone_number(&self.phone_number)?;
        if !self.address.is_empty() {
            validation::validate_address(&self.address)?;
        }
        Ok(())
    }
}
