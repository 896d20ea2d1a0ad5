use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::types::emoji::{IntoPartialEmoji, PartialEmoji};
use crate::types::util::insert_non_empty;

/// Clickable button.
///
/// Link buttons carry a `url`, every other style carries a `custom_id`.
/// Parsing doesn't check this pairing; the constructors below always
/// produce a consistent button.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Button {
    pub style: ButtonStyle,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub label: Option<String>,
    /// `None` when the `emoji` key is missing or `null`. Any object,
    /// even an empty one, parses into a [`PartialEmoji`].
    #[serde(default)]
    pub emoji: Option<PartialEmoji>,
}

impl Button {
    /// An interactive button reporting `custom_id` when clicked.
    pub fn new(style: ButtonStyle, custom_id: impl Into<String>) -> Self {
        Self {
            style,
            custom_id: Some(custom_id.into()),
            url: None,
            disabled: false,
            label: None,
            emoji: None,
        }
    }

    /// A button opening `url`.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            style: ButtonStyle::Link,
            custom_id: None,
            url: Some(url.into()),
            disabled: false,
            label: None,
            emoji: None,
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn emoji(mut self, emoji: impl IntoPartialEmoji) -> Self {
        self.emoji = Some(emoji.into_partial_emoji());
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Wire payload. `label` and `disabled` are always present because
    /// Discord requires them.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("type".into(), 2.into());
        payload.insert("style".into(), u64::from(self.style).into());
        payload.insert("label".into(), self.label.clone().into());
        payload.insert("disabled".into(), self.disabled.into());
        insert_non_empty(&mut payload, "custom_id", self.custom_id.as_deref());
        insert_non_empty(&mut payload, "url", self.url.as_deref());
        if let Some(emoji) = &self.emoji {
            payload.insert("emoji".into(), emoji.to_payload());
        }

        Value::Object(payload)
    }
}

impl Serialize for Button {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// Visual style of a [`Button`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u64", into = "u64")]
pub enum ButtonStyle {
    /// Blurple.
    Primary,
    /// Grey.
    Secondary,
    /// Green.
    Success,
    /// Red.
    Danger,
    /// Grey, navigates to a URL.
    Link,
    /// Variant value is unknown to the library.
    Unknown(u64),
}

impl From<u64> for ButtonStyle {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::Primary,
            2 => Self::Secondary,
            3 => Self::Success,
            4 => Self::Danger,
            5 => Self::Link,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ButtonStyle> for u64 {
    fn from(value: ButtonStyle) -> Self {
        match value {
            ButtonStyle::Primary => 1,
            ButtonStyle::Secondary => 2,
            ButtonStyle::Success => 3,
            ButtonStyle::Danger => 4,
            ButtonStyle::Link => 5,
            ButtonStyle::Unknown(unknown) => unknown,
        }
    }
}
