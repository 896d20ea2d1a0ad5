//! Inbound modal submissions and outbound interaction responses.

use serde::{Deserialize, Serialize};
use serde_repr::Serialize_repr;
use std::collections::HashMap;

use crate::types::component::{ActionRow, Component, Modal};
use crate::types::id::{
    marker::{ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, UserMarker},
    Id,
};
use crate::types::user::{Member, User};

/// Kind of an incoming interaction.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u64", into = "u64")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutocomplete,
    ModalSubmit,
    /// Variant value is unknown to the library.
    Unknown(u64),
}

impl From<u64> for InteractionType {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<InteractionType> for u64 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(unknown) => unknown,
        }
    }
}

/// A user submitting a modal.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModalInteraction {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
    /// Set when submitted inside a guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Set when submitted in a DM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub data: ModalSubmitData,
}

/// The `data` object of a modal submission.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModalSubmitData {
    pub custom_id: String,
    /// Submitted rows, each holding the inputs with their `value` set.
    #[serde(default)]
    pub components: Vec<ActionRow>,
}

impl ModalInteraction {
    /// The submitting user. Guild submissions nest it inside `member`.
    pub fn author(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn author_id(&self) -> Option<Id<UserMarker>> {
        self.author().map(|user| user.id)
    }

    /// `custom_id` of the submitted modal.
    pub fn custom_id(&self) -> &str {
        &self.data.custom_id
    }

    /// Submitted text keyed by input `custom_id`.
    ///
    /// Inputs left empty by the user are reported with an empty string.
    pub fn text_values(&self) -> HashMap<&str, &str> {
        self.data
            .components
            .iter()
            .flat_map(|row| &row.components)
            .filter_map(|component| match component {
                Component::InputText(input) => Some((
                    input.custom_id.as_str(),
                    input.value.as_deref().unwrap_or_default(),
                )),
                _ => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Interaction responses
// ---------------------------------------------------------------------------

/// Body of `POST /interactions/{id}/{token}/callback`.
#[derive(Clone, Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    /// Open `modal` for the user.
    pub fn modal(modal: &Modal) -> Self {
        Self {
            kind: InteractionCallbackType::Modal,
            data: Some(InteractionCallbackData {
                title: Some(modal.title.clone()),
                custom_id: Some(modal.custom_id.clone()),
                components: Some(
                    modal
                        .components
                        .iter()
                        .cloned()
                        .map(Component::ActionRow)
                        .collect(),
                ),
                ..Default::default()
            }),
        }
    }

    /// Reply with a plain message, optionally only visible to the user.
    pub fn message(content: impl Into<String>, ephemeral: bool) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                content: Some(content.into()),
                flags: ephemeral.then_some(EPHEMERAL),
                ..Default::default()
            }),
        }
    }

    /// Acknowledge a component interaction without changing the message.
    pub const fn deferred_update() -> Self {
        Self {
            kind: InteractionCallbackType::DeferredUpdateMessage,
            data: None,
        }
    }
}

/// Message flag hiding a reply from everyone but the invoking user.
const EPHEMERAL: u32 = 1 << 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

impl<'de> Deserialize<'de> for InteractionCallbackType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            5 => Ok(Self::DeferredChannelMessageWithSource),
            6 => Ok(Self::DeferredUpdateMessage),
            7 => Ok(Self::UpdateMessage),
            8 => Ok(Self::ApplicationCommandAutocompleteResult),
            9 => Ok(Self::Modal),
            other => Err(serde::de::Error::custom(format!(
                "unknown interaction callback type: {other}"
            ))),
        }
    }
}

/// `data` of an [`InteractionResponse`]. Build with struct update syntax
/// over `Default::default()`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    /// Modal responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Modal responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}
