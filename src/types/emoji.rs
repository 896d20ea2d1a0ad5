//! Emoji as they appear on components, select options, and the server guide.
//!
//! Three shapes show up on the wire and in user code:
//!
//! * [`PartialEmoji`]: the `{id?, name, animated?}` object attached to
//!   buttons and select options;
//! * [`Emoji`]: a custom guild emoji known to the client's cache;
//! * [`ReactionEmoji`]: the result of resolving a wire emoji against an
//!   [`EmojiCache`], as the server guide does.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::types::component::ComponentError;
use crate::types::id::{
    marker::{EmojiMarker, GuildMarker},
    Id,
};

/// Smallest and largest number of digits a custom emoji snowflake can have
/// in mention syntax.
const SNOWFLAKE_DIGITS: std::ops::RangeInclusive<usize> = 13..=20;

// ---------------------------------------------------------------------------
// PartialEmoji
// ---------------------------------------------------------------------------

/// An emoji reference: either a unicode emoji (`name` only) or a custom
/// emoji (`id` plus an optional `name`).
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
pub struct PartialEmoji {
    /// Present for custom emojis.
    #[serde(default)]
    pub id: Option<Id<EmojiMarker>>,
    /// The unicode character, or the custom emoji's name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl PartialEmoji {
    /// A unicode emoji such as `"🍕"`.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// A custom emoji.
    pub fn custom(id: Id<EmojiMarker>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }

    /// Parse an emoji from user input.
    ///
    /// Accepts custom emoji mentions (`<:name:id>`, `<a:name:id>`) and the
    /// bare `name:id` form. Anything else is taken as a unicode emoji.
    pub fn parse(value: &str) -> Self {
        match parse_custom(value) {
            Some((animated, name, id)) => Self::custom(id, name, animated),
            None => Self::unicode(value),
        }
    }

    /// Build an emoji from a dynamic JSON argument.
    ///
    /// Strings go through [`PartialEmoji::parse`] and objects are read as an
    /// emoji payload. Any other JSON type is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidEmoji`] for numbers, booleans,
    /// arrays and `null`, and [`ComponentError::Parse`] for an object that
    /// isn't an emoji payload.
    pub fn try_from_value(value: &Value) -> Result<Self, ComponentError> {
        match value {
            Value::String(s) => Ok(Self::parse(s)),
            Value::Object(_) => Ok(Self::deserialize(value)?),
            other => Err(ComponentError::InvalidEmoji {
                found: json_type_name(other),
            }),
        }
    }

    /// Whether this references a custom emoji rather than a unicode one.
    pub const fn is_custom(&self) -> bool {
        self.id.is_some()
    }

    /// Wire payload: `name` is always present (`null` when unknown), `id`
    /// only for custom emojis and `animated` only when set.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("name".into(), self.name.clone().into());
        if let Some(id) = self.id {
            payload.insert("id".into(), id.to_string().into());
        }
        if self.animated {
            payload.insert("animated".into(), true.into());
        }

        Value::Object(payload)
    }
}

impl Serialize for PartialEmoji {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl FromStr for PartialEmoji {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Display for PartialEmoji {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = self.name.as_deref().unwrap_or("_");
        match self.id {
            None => f.write_str(name),
            Some(id) if self.animated => write!(f, "<a:{name}:{id}>"),
            Some(id) => write!(f, "<:{name}:{id}>"),
        }
    }
}

/// Split a custom emoji mention into `(animated, name, id)`.
fn parse_custom(value: &str) -> Option<(bool, &str, Id<EmojiMarker>)> {
    let inner = value.strip_prefix('<').unwrap_or(value);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    let (animated, rest) = match inner.strip_prefix("a:") {
        Some(rest) => (true, rest),
        None => (false, inner.strip_prefix(':').unwrap_or(inner)),
    };

    let (name, id) = rest.split_once(':')?;

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    let valid_id =
        SNOWFLAKE_DIGITS.contains(&id.len()) && id.chars().all(|c| c.is_ascii_digit());

    if !valid_name || !valid_id {
        return None;
    }

    Some((animated, name, id.parse().ok()?))
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Emoji (custom, cached)
// ---------------------------------------------------------------------------

/// A custom guild emoji as held by the client's cache.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Emoji {
    pub id: Id<EmojiMarker>,
    pub name: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub managed: bool,
    /// Guild the emoji belongs to, when the cache tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
}

const fn default_available() -> bool {
    true
}

impl Emoji {
    /// The partial reference used inside component payloads.
    pub fn to_partial(&self) -> PartialEmoji {
        PartialEmoji::custom(self.id, self.name.clone(), self.animated)
    }
}

impl Display for Emoji {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.to_partial(), f)
    }
}

// ---------------------------------------------------------------------------
// Conversion into PartialEmoji
// ---------------------------------------------------------------------------

/// Types accepted wherever a component takes an emoji.
///
/// Strings are parsed with [`PartialEmoji::parse`], cached emojis are
/// converted to their partial form, and partial emojis pass through.
pub trait IntoPartialEmoji {
    fn into_partial_emoji(self) -> PartialEmoji;
}

impl IntoPartialEmoji for PartialEmoji {
    fn into_partial_emoji(self) -> PartialEmoji {
        self
    }
}

impl IntoPartialEmoji for &PartialEmoji {
    fn into_partial_emoji(self) -> PartialEmoji {
        self.clone()
    }
}

impl IntoPartialEmoji for Emoji {
    fn into_partial_emoji(self) -> PartialEmoji {
        self.to_partial()
    }
}

impl IntoPartialEmoji for &Emoji {
    fn into_partial_emoji(self) -> PartialEmoji {
        self.to_partial()
    }
}

impl IntoPartialEmoji for &str {
    fn into_partial_emoji(self) -> PartialEmoji {
        PartialEmoji::parse(self)
    }
}

impl IntoPartialEmoji for String {
    fn into_partial_emoji(self) -> PartialEmoji {
        PartialEmoji::parse(&self)
    }
}

impl IntoPartialEmoji for ReactionEmoji {
    fn into_partial_emoji(self) -> PartialEmoji {
        match self {
            ReactionEmoji::Custom(emoji) => emoji.to_partial(),
            ReactionEmoji::Partial(partial) => partial,
            ReactionEmoji::Unicode(name) => PartialEmoji::unicode(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution against a cache
// ---------------------------------------------------------------------------

/// Lookup of custom emojis the client already knows about.
pub trait EmojiCache {
    fn emoji(&self, id: Id<EmojiMarker>) -> Option<Emoji>;
}

impl EmojiCache for HashMap<Id<EmojiMarker>, Emoji> {
    fn emoji(&self, id: Id<EmojiMarker>) -> Option<Emoji> {
        self.get(&id).cloned()
    }
}

/// An emoji resolved against an [`EmojiCache`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReactionEmoji {
    /// Custom emoji found in the cache.
    Custom(Emoji),
    /// Custom emoji the cache doesn't know.
    Partial(PartialEmoji),
    /// Unicode emoji.
    Unicode(String),
}

impl ReactionEmoji {
    /// Resolve a wire emoji.
    ///
    /// Name-only emojis become [`ReactionEmoji::Unicode`]; custom emojis are
    /// looked up in the cache and fall back to [`ReactionEmoji::Partial`].
    pub fn resolve(emoji: PartialEmoji, cache: &impl EmojiCache) -> Self {
        let Some(id) = emoji.id else {
            return Self::Unicode(emoji.name.unwrap_or_default());
        };

        match cache.emoji(id) {
            Some(cached) => Self::Custom(cached),
            None => Self::Partial(emoji),
        }
    }
}

impl Display for ReactionEmoji {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Custom(emoji) => Display::fmt(emoji, f),
            Self::Partial(partial) => Display::fmt(partial, f),
            Self::Unicode(name) => f.write_str(name),
        }
    }
}
