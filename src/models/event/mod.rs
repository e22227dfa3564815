// Event module
// Calendar event schema as stored under events/{id}

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::recurrence::Recurrence;
use crate::services::validation::{self, ValidationError};

/// Who can see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// Calendar event document.
///
/// Times are local wall-clock values with no zone attached, exactly as the
/// store records them. `id` is empty until the store assigns one on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub creator_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    /// Hosted cover-photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `None` means the event happens exactly once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    pub visibility: Visibility,
    /// Users who joined the event, keyed by uid.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub participants: BTreeMap<String, bool>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `title` - Event title (required, 3-30 characters)
    /// * `start` - Event start time
    /// * `end` - Event end time
    ///
    /// # Examples
    /// ```
    /// use calgrid::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Team Meeting", start, end).unwrap();
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let event = Self {
            id: String::new(),
            creator_id: String::new(),
            title: title.into(),
            description: String::new(),
            location: String::new(),
            map_url: None,
            image: None,
            start,
            end,
            recurrence: None,
            visibility: Visibility::Private,
            participants: BTreeMap::new(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_event_title(&self.title)?;
        if !self.description.is_empty() {
            validation::validate_event_description(&self.description)?;
        }
        validation::validate_event_times(self.start, self.end)?;
        Ok(())
    }

    /// Check if this is a recurring event
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Get the duration of one occurrence
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Whether `uid` has joined the event.
    pub fn is_participant(&self, uid: &str) -> bool {
        self.participants.get(uid).copied().unwrap_or(false)
    }

    /// Visibility check used by calendar queries: public events are visible
    /// to everyone, private ones to their creator and participants.
    pub fn is_visible_to(&self, viewer: Option<&str>) -> bool {
        match self.visibility {
            Visibility::Public => true,
            Visibility::Private => match viewer {
                Some(uid) => self.creator_id == uid || self.is_participant(uid),
                None => false,
            },
        }
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: String,
    creator_id: String,
    title: Option<String>,
    description: String,
    location: String,
    map_url: Option<String>,
    image: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    recurrence: Option<Recurrence>,
    visibility: Visibility,
    participants: BTreeMap<String, bool>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self {
            id: String::new(),
            creator_id: String::new(),
            title: None,
            description: String::new(),
            location: String::new(),
            map_url: None,
            image: None,
            start: None,
            end: None,
            recurrence: None,
            visibility: Visibility::Private,
            participants: BTreeMap::new(),
        }
    }

    /// Set the document id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the creator's uid
    pub fn creator_id(mut self, creator_id: impl Into<String>) -> Self {
        self.creator_id = creator_id.into();
        self
    }

    /// Set the event title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the event description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the event location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the map link shown next to the location
    pub fn map_url(mut self, map_url: impl Into<String>) -> Self {
        self.map_url = Some(map_url.into());
        self
    }

    /// Set the hosted cover-photo URL
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the start time
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the repeat frequency
    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Set the event visibility
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark `uid` as having joined the event
    pub fn participant(mut self, uid: impl Into<String>) -> Self {
        self.participants.insert(uid.into(), true);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, ValidationError> {
        let title = self.title.ok_or(ValidationError::Required { field: "title" })?;
        let start = self.start.ok_or(ValidationError::Required { field: "start" })?;
        let end = self.end.ok_or(ValidationError::Required { field: "end" })?;

        let event = Event {
            id: self.id,
            creator_id: self.creator_id,
            title,
            description: self.description,
            location: self.location,
            map_url: self.map_url,
            image: self.image,
            start,
            end,
            recurrence: self.recurrence,
            visibility: self.visibility,
            participants: self.participants,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
