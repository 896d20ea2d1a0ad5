//! REST calls, abstracted over the transport.
//!
//! Every outbound call funnels through [`Requester::request`], so auth,
//! rate limiting and retries belong to whoever implements it. The endpoint
//! wrappers in [`ApiRequests`] only build paths, route keys and bodies.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::types::id::{
    marker::{GuildMarker, InteractionMarker, ScheduledEventMarker, UserMarker},
    Id,
};
use crate::types::interaction::InteractionResponse;
use crate::types::scheduled_event::{GuildScheduledEvent, ScheduledEventUser};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Non-success status from Discord.
    #[error("Discord API error {status} on {route}: {body}")]
    Api {
        status: u16,
        body: String,
        route: String,
    },
    /// Transport / network error.
    #[error("HTTP transport error: {0}")]
    Transport(String),
    /// Request or response body didn't (de)serialize.
    #[error("serialisation error: {0}")]
    Serde(String),
}

/// Sends one request to `https://discord.com/api/v10/{path}`.
///
/// `route_key` names the rate-limit route, e.g.
/// `DELETE /guilds/{guild_id}/scheduled-events`. Returns the raw body on
/// success and [`HttpError::Api`] for non-2xx statuses.
#[async_trait]
pub trait Requester: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        route_key: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, HttpError>;
}

#[async_trait]
impl<R: Requester + ?Sized> Requester for Arc<R> {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        route_key: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, HttpError> {
        (**self).request(method, path, route_key, body).await
    }
}

/// Endpoint wrappers available on every [`Requester`].
#[async_trait]
pub trait ApiRequests: Requester {
    /// Like [`Requester::request`] but deserializes the body as JSON.
    async fn request_json<T: DeserializeOwned + Send>(
        &self,
        method: HttpMethod,
        path: &str,
        route_key: &str,
        body: Option<&Value>,
    ) -> Result<T, HttpError> {
        let bytes = self.request(method, path, route_key, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            let raw = String::from_utf8_lossy(&bytes);
            HttpError::Serde(format!("{e}: {}", raw.chars().take(200).collect::<String>()))
        })
    }

    /// Initial response to an interaction. Discord answers 204, so nothing
    /// is parsed.
    async fn create_interaction_response(
        &self,
        interaction_id: Id<InteractionMarker>,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> Result<(), HttpError> {
        let path = format!("interactions/{interaction_id}/{interaction_token}/callback");
        let body = serde_json::to_value(response).map_err(|e| HttpError::Serde(e.to_string()))?;
        self.request(
            HttpMethod::Post,
            &path,
            "POST /interactions/callback",
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn delete_guild_scheduled_event(
        &self,
        guild_id: Id<GuildMarker>,
        event_id: Id<ScheduledEventMarker>,
    ) -> Result<(), HttpError> {
        let path = format!("guilds/{guild_id}/scheduled-events/{event_id}");
        let route_key = format!("DELETE /guilds/{guild_id}/scheduled-events");
        self.request(HttpMethod::Delete, &path, &route_key, None)
            .await?;
        Ok(())
    }

    /// `fields` is sent as is; only the keys present are changed.
    async fn edit_guild_scheduled_event(
        &self,
        guild_id: Id<GuildMarker>,
        event_id: Id<ScheduledEventMarker>,
        fields: &Value,
    ) -> Result<GuildScheduledEvent, HttpError> {
        let path = format!("guilds/{guild_id}/scheduled-events/{event_id}");
        let route_key = format!("PATCH /guilds/{guild_id}/scheduled-events");
        self.request_json(HttpMethod::Patch, &path, &route_key, Some(fields))
            .await
    }

    async fn get_guild_scheduled_event_users(
        &self,
        guild_id: Id<GuildMarker>,
        event_id: Id<ScheduledEventMarker>,
        query: &ScheduledEventUsersQuery,
    ) -> Result<Vec<ScheduledEventUser>, HttpError> {
        let path = format!(
            "guilds/{guild_id}/scheduled-events/{event_id}/users{}",
            query.to_query_string()
        );
        let route_key = format!("GET /guilds/{guild_id}/scheduled-events/users");
        self.request_json(HttpMethod::Get, &path, &route_key, None)
            .await
    }
}

impl<R: Requester + ?Sized> ApiRequests for R {}

/// Query of `GET guilds/{g}/scheduled-events/{e}/users`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScheduledEventUsersQuery {
    pub limit: Option<u16>,
    pub with_member: Option<bool>,
    pub before: Option<Id<UserMarker>>,
    pub after: Option<Id<UserMarker>>,
}

impl ScheduledEventUsersQuery {
    /// `?key=value&...`, or an empty string when nothing is set.
    fn to_query_string(self) -> String {
        let pairs: Vec<String> = [
            self.limit.map(|limit| format!("limit={limit}")),
            self.with_member.map(|with| format!("with_member={with}")),
            self.before.map(|id| format!("before={id}")),
            self.after.map(|id| format!("after={id}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// A [`Requester`] that records calls and replays canned responses.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_lock::Mutex;
    use std::collections::VecDeque;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct RecordedRequest {
        pub method: HttpMethod,
        pub path: String,
        pub route_key: String,
        pub body: Option<Value>,
    }

    #[derive(Default)]
    pub(crate) struct FakeRequester {
        pub requests: Mutex<Vec<RecordedRequest>>,
        responses: Mutex<VecDeque<Result<Vec<u8>, HttpError>>>,
    }

    impl FakeRequester {
        pub(crate) fn replying(responses: Vec<Result<Value, HttpError>>) -> Self {
            Self {
                requests: Mutex::default(),
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(|v| serde_json::to_vec(&v).unwrap()))
                        .collect(),
                ),
            }
        }

        pub(crate) async fn recorded(&self) -> Vec<RecordedRequest> {
            self.requests.lock().await.clone()
        }
    }

    #[async_trait]
    impl Requester for FakeRequester {
        async fn request(
            &self,
            method: HttpMethod,
            path: &str,
            route_key: &str,
            body: Option<&Value>,
        ) -> Result<Vec<u8>, HttpError> {
            self.requests.lock().await.push(RecordedRequest {
                method,
                path: path.to_owned(),
                route_key: route_key.to_owned(),
                body: body.cloned(),
            });

            // No canned reply means an empty 204.
            self.responses
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
