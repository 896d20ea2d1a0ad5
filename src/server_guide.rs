//! A guild's server guide with its emojis resolved against the client's
//! emoji cache.

use crate::types::emoji::{EmojiCache, PartialEmoji, ReactionEmoji};
use crate::types::id::{
    marker::{ChannelMarker, GuildMarker, UserMarker},
    Id,
};
use crate::types::server_guide::{
    MemberActionPayload, MemberActionType, ResourceChannelPayload, ServerGuidePayload,
    WelcomeMessagePayload,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerGuide {
    pub guild_id: Id<GuildMarker>,
    pub enabled: bool,
    pub new_member_actions: Vec<MemberAction>,
    pub resource_channels: Vec<ResourceChannel>,
    pub welcome_message: WelcomeMessage,
}

impl ServerGuide {
    pub fn new(payload: ServerGuidePayload, cache: &impl EmojiCache) -> Self {
        Self {
            guild_id: payload.guild_id,
            enabled: payload.enabled,
            new_member_actions: payload
                .new_member_actions
                .into_iter()
                .map(|action| MemberAction::new(action, cache))
                .collect(),
            resource_channels: payload
                .resource_channels
                .into_iter()
                .map(|channel| ResourceChannel::new(channel, cache))
                .collect(),
            welcome_message: WelcomeMessage::from(payload.welcome_message),
        }
    }
}

/// Something a new member is asked to do in a channel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberAction {
    pub action_type: MemberActionType,
    pub channel_id: Id<ChannelMarker>,
    pub title: String,
    pub description: String,
    pub emoji: Option<ReactionEmoji>,
}

impl MemberAction {
    pub fn new(payload: MemberActionPayload, cache: &impl EmojiCache) -> Self {
        Self {
            action_type: payload.action_type,
            channel_id: payload.channel_id,
            title: payload.title,
            description: payload.description,
            emoji: resolve(payload.emoji, cache),
        }
    }
}

/// A channel pinned to the guide for reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceChannel {
    pub channel_id: Id<ChannelMarker>,
    pub title: String,
    pub emoji: Option<ReactionEmoji>,
}

impl ResourceChannel {
    pub fn new(payload: ResourceChannelPayload, cache: &impl EmojiCache) -> Self {
        Self {
            channel_id: payload.channel_id,
            title: payload.title,
            emoji: resolve(payload.emoji, cache),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WelcomeMessage {
    /// The client currently allows a single author.
    pub author_ids: Vec<Id<UserMarker>>,
    pub message: String,
}

impl From<WelcomeMessagePayload> for WelcomeMessage {
    fn from(payload: WelcomeMessagePayload) -> Self {
        Self {
            author_ids: payload.author_ids,
            message: payload.message,
        }
    }
}

fn resolve(emoji: Option<PartialEmoji>, cache: &impl EmojiCache) -> Option<ReactionEmoji> {
    emoji.map(|emoji| ReactionEmoji::resolve(emoji, cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::emoji::Emoji;
    use crate::types::server_guide::tests::guide;
    use std::collections::HashMap;

    fn cache() -> HashMap<Id<crate::types::id::marker::EmojiMarker>, Emoji> {
        let emoji = Emoji {
            id: Id::new(345),
            name: "wave".to_owned(),
            animated: false,
            available: true,
            managed: false,
            guild_id: Some(Id::new(123)),
        };
        HashMap::from([(emoji.id, emoji)])
    }

    fn server_guide() -> ServerGuide {
        let payload: ServerGuidePayload = serde_json::from_value(guide()).unwrap();
        ServerGuide::new(payload, &cache())
    }

    #[test]
    fn fields_carry_over() {
        let guide = server_guide();

        assert_eq!(guide.guild_id, Id::new(123));
        assert!(guide.enabled);
        assert_eq!(guide.welcome_message.author_ids, [Id::new(123)]);
        assert_eq!(guide.welcome_message.message, "welcome!");

        let actions = &guide.new_member_actions;
        assert_eq!(actions[0].action_type, MemberActionType::View);
        assert_eq!(actions[0].channel_id, Id::new(123));
        assert_eq!(actions[0].description, "desc");
        assert_eq!(actions[1].action_type, MemberActionType::Talk);
        assert_eq!(actions[1].title, "title2");

        let channels = &guide.resource_channels;
        assert_eq!(channels[0].channel_id, Id::new(456));
        assert_eq!(channels[1].title, "title2");
    }

    #[test]
    fn emojis_resolve_through_cache() {
        let guide = server_guide();

        assert!(guide.new_member_actions[0].emoji.is_none());
        assert!(matches!(
            &guide.new_member_actions[1].emoji,
            Some(ReactionEmoji::Custom(emoji)) if emoji.name == "wave"
        ));

        assert!(guide.resource_channels[0].emoji.is_none());
        assert!(matches!(
            &guide.resource_channels[1].emoji,
            Some(ReactionEmoji::Partial(emoji)) if emoji.id == Some(Id::new(321))
        ));
    }

    #[test]
    fn unicode_emoji_stays_unicode() {
        let payload = ResourceChannelPayload {
            channel_id: Id::new(1),
            title: "rules".to_owned(),
            emoji: Some(PartialEmoji::unicode("📜")),
        };

        let channel = ResourceChannel::new(payload, &cache());
        assert_eq!(channel.emoji, Some(ReactionEmoji::Unicode("📜".to_owned())));
    }
}
