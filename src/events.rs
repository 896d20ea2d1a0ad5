//! Typed gateway events.
//!
//! Raw `(op, t, d)` envelopes are routed into [`GatewayEvent`] so consumers
//! can pattern-match on parsed data. Only the dispatches this crate models
//! get a typed variant; the rest stay raw.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::types::gateway::GatewayPayload;
use crate::types::interaction::ModalInteraction;
use crate::types::scheduled_event::{GuildScheduledEvent, ScheduledEventUserEvent};

/// Interaction `type` of a modal submission.
const MODAL_SUBMIT: u64 = 5;

#[derive(Clone, Debug)]
pub enum GatewayEvent {
    /// A user submitted a modal.
    ModalSubmit(Box<ModalInteraction>),

    /// Any other interaction, left raw.
    Interaction(Value),

    ScheduledEventCreate(Box<GuildScheduledEvent>),
    ScheduledEventUpdate(Box<GuildScheduledEvent>),
    ScheduledEventDelete(Box<GuildScheduledEvent>),
    ScheduledEventUserAdd(ScheduledEventUserEvent),
    ScheduledEventUserRemove(ScheduledEventUserEvent),

    /// The gateway is asking for a heartbeat right away (op 1).
    HeartbeatRequest,

    /// Reconnect and resume (op 7).
    Reconnect,

    /// Session invalidated (op 9). `true` when it can be resumed.
    InvalidSession(bool),

    /// Op 11.
    HeartbeatAck,

    /// Anything without a typed variant, including payloads that failed to
    /// parse.
    Unknown {
        event_name: Option<String>,
        op: u8,
        data: Option<Value>,
    },
}

impl GatewayEvent {
    /// Route a raw envelope. Never fails: unrecognised or malformed events
    /// become [`GatewayEvent::Unknown`].
    pub fn from_payload(payload: GatewayPayload) -> Self {
        match payload.op {
            0 => Self::parse_dispatch(payload.t, payload.d),
            1 => Self::HeartbeatRequest,
            7 => Self::Reconnect,
            9 => Self::InvalidSession(
                payload.d.as_ref().and_then(Value::as_bool).unwrap_or(false),
            ),
            11 => Self::HeartbeatAck,
            op => Self::Unknown {
                event_name: payload.t,
                op,
                data: payload.d,
            },
        }
    }

    fn parse_dispatch(event_name: Option<String>, data: Option<Value>) -> Self {
        let (Some(name), Some(d)) = (event_name.as_deref(), data.as_ref()) else {
            return Self::Unknown {
                event_name,
                op: 0,
                data,
            };
        };

        let parsed = match name {
            "INTERACTION_CREATE" if d.get("type").and_then(Value::as_u64) == Some(MODAL_SUBMIT) => {
                parse(name, d).map(|i| Self::ModalSubmit(Box::new(i)))
            }
            "INTERACTION_CREATE" => Some(Self::Interaction(d.clone())),
            "GUILD_SCHEDULED_EVENT_CREATE" => {
                parse(name, d).map(|e| Self::ScheduledEventCreate(Box::new(e)))
            }
            "GUILD_SCHEDULED_EVENT_UPDATE" => {
                parse(name, d).map(|e| Self::ScheduledEventUpdate(Box::new(e)))
            }
            "GUILD_SCHEDULED_EVENT_DELETE" => {
                parse(name, d).map(|e| Self::ScheduledEventDelete(Box::new(e)))
            }
            "GUILD_SCHEDULED_EVENT_USER_ADD" => parse(name, d).map(Self::ScheduledEventUserAdd),
            "GUILD_SCHEDULED_EVENT_USER_REMOVE" => {
                parse(name, d).map(Self::ScheduledEventUserRemove)
            }
            _ => None,
        };

        parsed.unwrap_or(Self::Unknown {
            event_name,
            op: 0,
            data,
        })
    }

    /// Event name for dispatches, `None` for control frames.
    pub fn name(&self) -> Option<&str> {
        Some(match self {
            Self::ModalSubmit(_) | Self::Interaction(_) => "INTERACTION_CREATE",
            Self::ScheduledEventCreate(_) => "GUILD_SCHEDULED_EVENT_CREATE",
            Self::ScheduledEventUpdate(_) => "GUILD_SCHEDULED_EVENT_UPDATE",
            Self::ScheduledEventDelete(_) => "GUILD_SCHEDULED_EVENT_DELETE",
            Self::ScheduledEventUserAdd(_) => "GUILD_SCHEDULED_EVENT_USER_ADD",
            Self::ScheduledEventUserRemove(_) => "GUILD_SCHEDULED_EVENT_USER_REMOVE",
            Self::Unknown { event_name, .. } => return event_name.as_deref(),
            Self::HeartbeatRequest
            | Self::Reconnect
            | Self::InvalidSession(_)
            | Self::HeartbeatAck => return None,
        })
    }
}

fn parse<T: DeserializeOwned>(event: &str, data: &Value) -> Option<T> {
    match serde_json::from_value(data.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(event, error = %e, "failed to parse gateway payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::Id;
    use crate::types::scheduled_event::tests::external_event;
    use serde_json::json;

    fn modal_submit() -> Value {
        json!({
            "id": "1100000000000000001",
            "application_id": "1200000000000000002",
            "type": 5,
            "token": "tok",
            "user": { "id": "42", "username": "nelly" },
            "data": { "custom_id": "signup", "components": [] }
        })
    }

    #[test]
    fn modal_submission_is_typed() {
        let event =
            GatewayEvent::from_payload(GatewayPayload::dispatch("INTERACTION_CREATE", modal_submit()));

        let GatewayEvent::ModalSubmit(interaction) = event else {
            panic!("expected ModalSubmit, got {event:?}");
        };
        assert_eq!(interaction.custom_id(), "signup");
        assert_eq!(interaction.author_id(), Some(Id::new(42)));
    }

    #[test]
    fn unknown_component_keeps_modal_submission_typed() {
        let mut payload = modal_submit();
        payload["data"]["components"] = json!([
            { "type": 1, "components": [{ "type": 300 }] }
        ]);

        let event = GatewayEvent::from_payload(GatewayPayload::dispatch("INTERACTION_CREATE", payload));
        assert!(matches!(event, GatewayEvent::ModalSubmit(ref i) if i.custom_id() == "signup"));
    }

    #[test]
    fn other_interactions_stay_raw() {
        let mut payload = modal_submit();
        payload["type"] = json!(3);

        let event = GatewayEvent::from_payload(GatewayPayload::dispatch("INTERACTION_CREATE", payload));
        assert!(matches!(event, GatewayEvent::Interaction(ref d) if d["type"] == 3));
    }

    #[test]
    fn broken_modal_submission_becomes_unknown() {
        let mut payload = modal_submit();
        payload.as_object_mut().unwrap().remove("data");

        let event = GatewayEvent::from_payload(GatewayPayload::dispatch("INTERACTION_CREATE", payload));
        assert!(matches!(event, GatewayEvent::Unknown { op: 0, .. }));
        assert_eq!(event.name(), Some("INTERACTION_CREATE"));
    }

    #[test]
    fn scheduled_event_dispatches() {
        let event = GatewayEvent::from_payload(GatewayPayload::dispatch(
            "GUILD_SCHEDULED_EVENT_UPDATE",
            external_event(),
        ));
        assert!(matches!(event, GatewayEvent::ScheduledEventUpdate(ref e) if e.name == "Movie night"));

        let event = GatewayEvent::from_payload(GatewayPayload::dispatch(
            "GUILD_SCHEDULED_EVENT_USER_ADD",
            json!({ "guild_scheduled_event_id": "9", "user_id": "8", "guild_id": "7" }),
        ));
        let GatewayEvent::ScheduledEventUserAdd(add) = event else {
            panic!("expected ScheduledEventUserAdd");
        };
        assert_eq!(add.user_id, Id::new(8));
    }

    #[test]
    fn control_opcodes() {
        let control = |op, d| GatewayEvent::from_payload(GatewayPayload { op, d, s: None, t: None });

        assert!(matches!(control(1, None), GatewayEvent::HeartbeatRequest));
        assert!(matches!(control(7, None), GatewayEvent::Reconnect));
        assert!(matches!(control(9, Some(json!(true))), GatewayEvent::InvalidSession(true)));
        assert!(matches!(control(9, None), GatewayEvent::InvalidSession(false)));
        assert!(matches!(control(11, None), GatewayEvent::HeartbeatAck));
        assert!(matches!(control(10, None), GatewayEvent::Unknown { op: 10, .. }));
        assert_eq!(control(11, None).name(), None);
    }

    #[test]
    fn unmodelled_dispatch_is_unknown() {
        let event = GatewayEvent::from_payload(GatewayPayload::dispatch("TYPING_START", json!({})));
        assert_eq!(event.name(), Some("TYPING_START"));
    }
}
