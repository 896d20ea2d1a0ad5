//! Guild scheduled events as sent by the REST API and the gateway.
//!
//! The request-side operations (`delete`, `edit`, `fetch_users`) live in
//! the crate's `scheduled_event` module behind the `runtime` feature.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::id::{
    marker::{ChannelMarker, GuildMarker, ScheduledEventEntityMarker, ScheduledEventMarker, UserMarker},
    Id,
};
use crate::types::user::{Member, User};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GuildScheduledEvent {
    pub id: Id<ScheduledEventMarker>,
    pub guild_id: Id<GuildMarker>,
    /// `None` for external events.
    #[serde(default)]
    pub channel_id: Option<Id<ChannelMarker>>,
    /// `None` for events created before October 25th, 2021.
    #[serde(default)]
    pub creator_id: Option<Id<UserMarker>>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_start_time: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub privacy_level: PrivacyLevel,
    pub status: EventStatus,
    pub entity_type: EntityType,
    #[serde(default)]
    pub entity_id: Option<Id<ScheduledEventEntityMarker>>,
    /// Present, with a location, for external events.
    #[serde(default)]
    pub entity_metadata: Option<EntityMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    /// Only set when fetched with `with_user_count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
}

impl Display for GuildScheduledEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EntityMetadata {
    #[serde(default)]
    pub location: Option<String>,
}

impl EntityMetadata {
    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
        }
    }
}

/// Who can see a scheduled event.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum PrivacyLevel {
    /// Only guild members.
    GuildOnly,
    /// Variant value is unknown to the library.
    Unknown(u8),
}

impl From<u8> for PrivacyLevel {
    fn from(value: u8) -> Self {
        match value {
            2 => Self::GuildOnly,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<PrivacyLevel> for u8 {
    fn from(value: PrivacyLevel) -> Self {
        match value {
            PrivacyLevel::GuildOnly => 2,
            PrivacyLevel::Unknown(unknown) => unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum EventStatus {
    Scheduled,
    Active,
    Completed,
    Canceled,
    /// Variant value is unknown to the library.
    Unknown(u8),
}

impl From<u8> for EventStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Scheduled,
            2 => Self::Active,
            3 => Self::Completed,
            4 => Self::Canceled,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<EventStatus> for u8 {
    fn from(value: EventStatus) -> Self {
        match value {
            EventStatus::Scheduled => 1,
            EventStatus::Active => 2,
            EventStatus::Completed => 3,
            EventStatus::Canceled => 4,
            EventStatus::Unknown(unknown) => unknown,
        }
    }
}

/// Where a scheduled event takes place.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum EntityType {
    StageInstance,
    Voice,
    /// Somewhere outside Discord, described by [`EntityMetadata::location`].
    External,
    /// Variant value is unknown to the library.
    Unknown(u8),
}

impl From<u8> for EntityType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::StageInstance,
            2 => Self::Voice,
            3 => Self::External,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<EntityType> for u8 {
    fn from(value: EntityType) -> Self {
        match value {
            EntityType::StageInstance => 1,
            EntityType::Voice => 2,
            EntityType::External => 3,
            EntityType::Unknown(unknown) => unknown,
        }
    }
}

/// Entry of `GET guilds/{g}/scheduled-events/{e}/users`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ScheduledEventUser {
    pub guild_scheduled_event_id: Id<ScheduledEventMarker>,
    pub user: User,
    /// Only requested with `with_member=true`, and only for users still in
    /// the guild.
    #[serde(default)]
    pub member: Option<Member>,
}

/// A subscriber to a scheduled event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduledEventSubscriber {
    Member(Member),
    User(User),
}

impl ScheduledEventSubscriber {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Member(member) => member.user.as_ref(),
            Self::User(user) => Some(user),
        }
    }
}

impl From<ScheduledEventUser> for ScheduledEventSubscriber {
    /// Members returned without their user get it filled in from the entry.
    fn from(entry: ScheduledEventUser) -> Self {
        match entry.member {
            Some(mut member) => {
                member.user.get_or_insert(entry.user);
                Self::Member(member)
            }
            None => Self::User(entry.user),
        }
    }
}

/// Payload of `GUILD_SCHEDULED_EVENT_USER_ADD` and `_REMOVE`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScheduledEventUserEvent {
    pub guild_scheduled_event_id: Id<ScheduledEventMarker>,
    pub user_id: Id<UserMarker>,
    pub guild_id: Id<GuildMarker>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{json, Value};

    pub(crate) fn external_event() -> Value {
        json!({
            "id": "941485034146869249",
            "guild_id": "613425648685547541",
            "channel_id": null,
            "creator_id": "80351110224678912",
            "name": "Movie night",
            "description": "Bring snacks",
            "scheduled_start_time": "2022-03-01T20:00:00+00:00",
            "scheduled_end_time": "2022-03-01T23:00:00+00:00",
            "privacy_level": 2,
            "status": 1,
            "entity_type": 3,
            "entity_id": null,
            "entity_metadata": { "location": "Cinema" },
            "creator": { "id": "80351110224678912", "username": "nelly" },
            "user_count": 12
        })
    }

    #[test]
    fn parse_external_event() {
        let event: GuildScheduledEvent = serde_json::from_value(external_event()).unwrap();

        assert_eq!(event.entity_type, EntityType::External);
        assert_eq!(event.status, EventStatus::Scheduled);
        assert_eq!(event.privacy_level, PrivacyLevel::GuildOnly);
        assert!(event.channel_id.is_none());
        assert_eq!(event.entity_metadata, Some(EntityMetadata::location("Cinema")));
        assert_eq!(event.creator.as_ref().map(|user| user.id), event.creator_id);
        assert_eq!(event.user_count, Some(12));
        assert_eq!(event.to_string(), "Movie night");
    }

    #[test]
    fn unknown_enum_values_are_preserved() {
        let mut payload = external_event();
        payload["status"] = json!(9);
        payload["entity_type"] = json!(7);
        payload["privacy_level"] = json!(1);

        let event: GuildScheduledEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.status, EventStatus::Unknown(9));
        assert_eq!(event.entity_type, EntityType::Unknown(7));
        assert_eq!(event.privacy_level, PrivacyLevel::Unknown(1));
    }

    #[test]
    fn subscriber_prefers_member() {
        let entry: ScheduledEventUser = serde_json::from_value(json!({
            "guild_scheduled_event_id": "941485034146869249",
            "user": { "id": "5", "username": "five" },
            "member": { "nick": "V", "roles": [] }
        }))
        .unwrap();

        let subscriber = ScheduledEventSubscriber::from(entry);
        let ScheduledEventSubscriber::Member(member) = &subscriber else {
            panic!("expected member");
        };
        assert_eq!(member.nick.as_deref(), Some("V"));
        assert_eq!(subscriber.user().map(|user| user.id), Some(Id::new(5)));
    }

    #[test]
    fn subscriber_without_member_is_user() {
        let entry: ScheduledEventUser = serde_json::from_value(json!({
            "guild_scheduled_event_id": "941485034146869249",
            "user": { "id": "5", "username": "five" }
        }))
        .unwrap();

        assert!(matches!(
            ScheduledEventSubscriber::from(entry),
            ScheduledEventSubscriber::User(_)
        ));
    }
}
