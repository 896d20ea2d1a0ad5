//! Discord API types.
//!
//! Wire models for the parts of the API this crate touches: message and
//! modal components, emojis, users, modal interactions, guild scheduled
//! events and server guides. Everything deserializes straight from gateway
//! or REST JSON; types sent back to Discord build their own payloads.

pub mod builders;
pub mod component;
pub mod emoji;
pub mod gateway;
pub mod id;
pub mod interaction;
pub mod scheduled_event;
pub mod server_guide;
pub mod user;

pub(crate) mod util;

// ---- IDs ------------------------------------------------------------------
pub use self::id::marker::{
    ApplicationMarker, ChannelMarker, EmojiMarker, GuildMarker, InteractionMarker, RoleMarker,
    ScheduledEventEntityMarker, ScheduledEventMarker, UserMarker,
};
pub use self::id::Id;

// ---- Components -----------------------------------------------------------
pub use self::component::{
    ActionRow, Button, ButtonStyle, Component, ComponentError, ComponentType, InputText,
    InputTextStyle, Modal, SelectMenu, SelectOption,
};
pub use self::emoji::{Emoji, EmojiCache, IntoPartialEmoji, PartialEmoji, ReactionEmoji};

// ---- Users / interactions -------------------------------------------------
pub use self::interaction::{
    InteractionCallbackData, InteractionCallbackType, InteractionResponse, InteractionType,
    ModalInteraction, ModalSubmitData,
};
pub use self::user::{Member, User};

// ---- Scheduled events / server guide --------------------------------------
pub use self::gateway::GatewayPayload;
pub use self::scheduled_event::{
    EntityMetadata, EntityType, EventStatus, GuildScheduledEvent, PrivacyLevel,
    ScheduledEventSubscriber, ScheduledEventUser, ScheduledEventUserEvent,
};
pub use self::server_guide::{
    MemberActionPayload, MemberActionType, ResourceChannelPayload, ServerGuidePayload,
    WelcomeMessagePayload,
};

// ---- Component helpers ----------------------------------------------------
pub use self::builders::{action_row, button, link_button, string_select, text_input};
