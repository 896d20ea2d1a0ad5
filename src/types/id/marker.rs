//! Markers for the resource types this crate hands IDs out for.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used. A scheduled event's ID
//! can't be passed where a guild's ID is required, even though both are
//! 64-bit snowflakes on the wire.

/// Marker for application IDs.
///
/// Types such as [`ModalInteraction`] use this ID marker.
///
/// [`ModalInteraction`]: crate::types::interaction::ModalInteraction
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for channel IDs.
///
/// Types such as [`GuildScheduledEvent`] or [`ResourceChannelPayload`] use
/// this ID marker.
///
/// [`GuildScheduledEvent`]: crate::types::scheduled_event::GuildScheduledEvent
/// [`ResourceChannelPayload`]: crate::types::server_guide::ResourceChannelPayload
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for emoji IDs.
///
/// Types such as [`PartialEmoji`] or [`Emoji`] use this ID marker.
///
/// [`PartialEmoji`]: crate::types::emoji::PartialEmoji
/// [`Emoji`]: crate::types::emoji::Emoji
#[derive(Debug)]
#[non_exhaustive]
pub struct EmojiMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for interaction IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for role IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for guild scheduled event IDs.
///
/// Types such as [`GuildScheduledEvent`] use this ID marker.
///
/// [`GuildScheduledEvent`]: crate::types::scheduled_event::GuildScheduledEvent
#[derive(Debug)]
#[non_exhaustive]
pub struct ScheduledEventMarker;

/// Marker for the ID of the entity a scheduled event is attached to
/// (a stage instance, for example).
#[derive(Debug)]
#[non_exhaustive]
pub struct ScheduledEventEntityMarker;

/// Marker for user IDs.
///
/// The modal registry keys entries by an `Id<UserMarker>`.
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
