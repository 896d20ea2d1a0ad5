//! Requests acting on a [`GuildScheduledEvent`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::http::{ApiRequests, HttpError, Requester, ScheduledEventUsersQuery};
use crate::types::id::{
    marker::{ChannelMarker, UserMarker},
    Id,
};
use crate::types::scheduled_event::{
    EntityMetadata, EntityType, EventStatus, GuildScheduledEvent, PrivacyLevel,
    ScheduledEventSubscriber,
};

#[derive(Debug, thiserror::Error)]
pub enum ScheduledEventError {
    /// Rejected before any request was made.
    #[error("if entity_type is external, {field} must be {requirement}")]
    Validation {
        field: &'static str,
        requirement: &'static str,
    },
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Fields to change on an event. Unset fields are left alone.
///
/// `channel_id` and `entity_metadata` take an inner `None` to clear them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditScheduledEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub channel_id: Option<Option<Id<ChannelMarker>>>,
    pub privacy_level: Option<PrivacyLevel>,
    pub scheduled_start_time: Option<DateTime<Utc>>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub entity_type: Option<EntityType>,
    pub entity_metadata: Option<Option<EntityMetadata>>,
    pub status: Option<EventStatus>,
}

impl EditScheduledEvent {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn channel_id(mut self, channel_id: Option<Id<ChannelMarker>>) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    #[must_use]
    pub const fn privacy_level(mut self, privacy_level: PrivacyLevel) -> Self {
        self.privacy_level = Some(privacy_level);
        self
    }

    #[must_use]
    pub const fn scheduled_start_time(mut self, time: DateTime<Utc>) -> Self {
        self.scheduled_start_time = Some(time);
        self
    }

    #[must_use]
    pub const fn scheduled_end_time(mut self, time: DateTime<Utc>) -> Self {
        self.scheduled_end_time = Some(time);
        self
    }

    #[must_use]
    pub const fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    #[must_use]
    pub fn entity_metadata(mut self, metadata: Option<EntityMetadata>) -> Self {
        self.entity_metadata = Some(metadata);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// The PATCH body.
    ///
    /// Moving an event to [`EntityType::External`] requires a location, an
    /// end time and no channel. An omitted channel is sent as `null` so the
    /// old one is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduledEventError::Validation`] naming the first
    /// offending field.
    pub fn to_body(&self) -> Result<Value, ScheduledEventError> {
        let external = self.entity_type == Some(EntityType::External);
        let mut body = Map::new();

        if let Some(privacy_level) = self.privacy_level {
            body.insert("privacy_level".into(), u8::from(privacy_level).into());
        }
        if let Some(entity_type) = self.entity_type {
            body.insert("entity_type".into(), u8::from(entity_type).into());
        }

        match &self.entity_metadata {
            Some(Some(metadata)) => {
                body.insert("entity_metadata".into(), metadata_payload(metadata));
            }
            Some(None) if !external => {
                body.insert("entity_metadata".into(), Value::Null);
            }
            None if !external => {}
            _ => return Err(external_requires("entity_metadata", "provided")),
        }

        if let Some(status) = self.status {
            body.insert("status".into(), u8::from(status).into());
        }
        if let Some(name) = &self.name {
            body.insert("name".into(), name.clone().into());
        }
        if let Some(description) = &self.description {
            body.insert("description".into(), description.clone().into());
        }

        match self.channel_id {
            Some(Some(_)) if external => {
                return Err(external_requires("channel_id", "None or omitted"));
            }
            Some(channel_id) => {
                body.insert("channel_id".into(), channel_id.map(|id| id.to_string()).into());
            }
            None if external => {
                body.insert("channel_id".into(), Value::Null);
            }
            None => {}
        }

        if let Some(start) = self.scheduled_start_time {
            body.insert("scheduled_start_time".into(), iso8601(start).into());
        }
        match self.scheduled_end_time {
            Some(end) => {
                body.insert("scheduled_end_time".into(), iso8601(end).into());
            }
            None if external => return Err(external_requires("scheduled_end_time", "provided")),
            None => {}
        }

        Ok(Value::Object(body))
    }
}

/// Options of [`GuildScheduledEvent::fetch_users`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchUsers {
    pub limit: Option<u16>,
    /// Return members instead of bare users where possible.
    pub with_members: bool,
    pub before_id: Option<Id<UserMarker>>,
    pub after_id: Option<Id<UserMarker>>,
}

impl Default for FetchUsers {
    fn default() -> Self {
        Self {
            limit: None,
            with_members: true,
            before_id: None,
            after_id: None,
        }
    }
}

impl GuildScheduledEvent {
    pub async fn delete<R: Requester + ?Sized>(
        &self,
        requester: &R,
    ) -> Result<(), ScheduledEventError> {
        requester
            .delete_guild_scheduled_event(self.guild_id, self.id)
            .await?;
        Ok(())
    }

    /// Apply `changes` and return the updated event.
    ///
    /// Nothing is sent when `changes` fails validation.
    pub async fn edit<R: Requester + ?Sized>(
        &self,
        requester: &R,
        changes: &EditScheduledEvent,
    ) -> Result<Self, ScheduledEventError> {
        let body = changes.to_body()?;
        Ok(requester
            .edit_guild_scheduled_event(self.guild_id, self.id, &body)
            .await?)
    }

    /// Users subscribed to the event.
    pub async fn fetch_users<R: Requester + ?Sized>(
        &self,
        requester: &R,
        options: FetchUsers,
    ) -> Result<Vec<ScheduledEventSubscriber>, ScheduledEventError> {
        let query = ScheduledEventUsersQuery {
            limit: options.limit,
            with_member: Some(options.with_members),
            before: options.before_id,
            after: options.after_id,
        };

        let users = requester
            .get_guild_scheduled_event_users(self.guild_id, self.id, &query)
            .await?;

        Ok(users.into_iter().map(ScheduledEventSubscriber::from).collect())
    }
}

const fn external_requires(field: &'static str, requirement: &'static str) -> ScheduledEventError {
    ScheduledEventError::Validation { field, requirement }
}

fn metadata_payload(metadata: &EntityMetadata) -> Value {
    serde_json::json!({ "location": metadata.location })
}

fn iso8601(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeRequester;
    use crate::http::HttpMethod;
    use crate::types::scheduled_event::tests::external_event;
    use chrono::TimeZone;
    use serde_json::json;

    fn event() -> GuildScheduledEvent {
        serde_json::from_value(external_event()).unwrap()
    }

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 2, 1, 0, 0).unwrap()
    }

    #[test]
    fn external_requires_metadata() {
        let err = EditScheduledEvent::new()
            .entity_type(EntityType::External)
            .scheduled_end_time(end())
            .to_body()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "if entity_type is external, entity_metadata must be provided"
        );

        let cleared = EditScheduledEvent::new()
            .entity_type(EntityType::External)
            .entity_metadata(None)
            .scheduled_end_time(end())
            .to_body();
        assert!(matches!(
            cleared,
            Err(ScheduledEventError::Validation { field: "entity_metadata", .. })
        ));
    }

    #[test]
    fn external_rejects_channel() {
        let err = EditScheduledEvent::new()
            .entity_type(EntityType::External)
            .entity_metadata(Some(EntityMetadata::location("Park")))
            .channel_id(Some(Id::new(5)))
            .scheduled_end_time(end())
            .to_body()
            .unwrap_err();
        assert!(matches!(err, ScheduledEventError::Validation { field: "channel_id", .. }));
    }

    #[test]
    fn external_requires_end_time() {
        let err = EditScheduledEvent::new()
            .entity_type(EntityType::External)
            .entity_metadata(Some(EntityMetadata::location("Park")))
            .to_body()
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduledEventError::Validation { field: "scheduled_end_time", .. }
        ));
    }

    #[test]
    fn external_sends_null_channel_when_omitted() {
        let body = EditScheduledEvent::new()
            .entity_type(EntityType::External)
            .entity_metadata(Some(EntityMetadata::location("Park")))
            .scheduled_end_time(end())
            .to_body()
            .unwrap();

        assert_eq!(
            body,
            json!({
                "entity_type": 3,
                "entity_metadata": { "location": "Park" },
                "channel_id": null,
                "scheduled_end_time": "2022-03-02T01:00:00+00:00"
            })
        );
    }

    #[test]
    fn only_provided_fields_are_sent() {
        let body = EditScheduledEvent::new()
            .name("Renamed")
            .status(EventStatus::Canceled)
            .to_body()
            .unwrap();
        assert_eq!(body, json!({ "name": "Renamed", "status": 4 }));
    }

    #[test]
    fn explicit_clears_send_null() {
        let body = EditScheduledEvent::new()
            .entity_type(EntityType::Voice)
            .channel_id(None)
            .entity_metadata(None)
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            json!({ "entity_type": 2, "entity_metadata": null, "channel_id": null })
        );
    }

    #[tokio::test]
    async fn edit_patches_and_parses_reply() {
        let mut updated = external_event();
        updated["name"] = json!("Renamed");
        let requester = FakeRequester::replying(vec![Ok(updated)]);

        let edited = event()
            .edit(&requester, &EditScheduledEvent::new().name("Renamed"))
            .await
            .unwrap();
        assert_eq!(edited.name, "Renamed");

        let recorded = requester.recorded().await;
        assert_eq!(recorded[0].method, HttpMethod::Patch);
        assert_eq!(
            recorded[0].path,
            "guilds/613425648685547541/scheduled-events/941485034146869249"
        );
        assert_eq!(recorded[0].body, Some(json!({ "name": "Renamed" })));
    }

    #[tokio::test]
    async fn invalid_edit_sends_nothing() {
        let requester = FakeRequester::default();
        let result = event()
            .edit(
                &requester,
                &EditScheduledEvent::new().entity_type(EntityType::External),
            )
            .await;

        assert!(matches!(result, Err(ScheduledEventError::Validation { .. })));
        assert!(requester.recorded().await.is_empty());
    }

    #[tokio::test]
    async fn delete_targets_event() {
        let requester = FakeRequester::default();
        event().delete(&requester).await.unwrap();

        let recorded = requester.recorded().await;
        assert_eq!(recorded[0].method, HttpMethod::Delete);
        assert_eq!(
            recorded[0].route_key,
            "DELETE /guilds/613425648685547541/scheduled-events"
        );
    }

    #[tokio::test]
    async fn fetch_users_defaults_to_members() {
        let requester = FakeRequester::replying(vec![Ok(json!([
            {
                "guild_scheduled_event_id": "941485034146869249",
                "user": { "id": "1", "username": "one" },
                "member": { "roles": [] }
            },
            {
                "guild_scheduled_event_id": "941485034146869249",
                "user": { "id": "2", "username": "two" }
            }
        ]))]);

        let users = event()
            .fetch_users(&requester, FetchUsers::default())
            .await
            .unwrap();

        assert!(matches!(users[0], ScheduledEventSubscriber::Member(_)));
        assert!(matches!(users[1], ScheduledEventSubscriber::User(_)));
        assert_eq!(users[0].user().map(|user| user.id), Some(Id::new(1)));

        let recorded = requester.recorded().await;
        assert!(recorded[0].path.ends_with("/users?with_member=true"));
    }

    #[tokio::test]
    async fn http_failure_is_wrapped() {
        let requester = FakeRequester::replying(vec![Err(HttpError::Transport("reset".into()))]);
        let err = event().delete(&requester).await.unwrap_err();
        assert!(matches!(err, ScheduledEventError::Http(HttpError::Transport(_))));
    }
}
