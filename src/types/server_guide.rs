//! Wire shapes of a guild's server guide (onboarding home).

use serde::{Deserialize, Serialize};

use crate::types::emoji::PartialEmoji;
use crate::types::id::{
    marker::{ChannelMarker, GuildMarker, UserMarker},
    Id,
};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ServerGuidePayload {
    pub guild_id: Id<GuildMarker>,
    pub enabled: bool,
    #[serde(default)]
    pub new_member_actions: Vec<MemberActionPayload>,
    #[serde(default)]
    pub resource_channels: Vec<ResourceChannelPayload>,
    pub welcome_message: WelcomeMessagePayload,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberActionPayload {
    pub action_type: MemberActionType,
    pub channel_id: Id<ChannelMarker>,
    pub title: String,
    /// Always empty today; clients can't set it.
    #[serde(default)]
    pub description: String,
    /// `null` and a missing key both mean no emoji.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResourceChannelPayload {
    pub channel_id: Id<ChannelMarker>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WelcomeMessagePayload {
    #[serde(default)]
    pub author_ids: Vec<Id<UserMarker>>,
    pub message: String,
}

/// What a new member is asked to do.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum MemberActionType {
    /// Read a channel.
    View,
    /// Post in a channel.
    Talk,
    /// Variant value is unknown to the library.
    Unknown(u8),
}

impl From<u8> for MemberActionType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::View,
            1 => Self::Talk,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<MemberActionType> for u8 {
    fn from(value: MemberActionType) -> Self {
        match value {
            MemberActionType::View => 0,
            MemberActionType::Talk => 1,
            MemberActionType::Unknown(unknown) => unknown,
        }
    }
}
