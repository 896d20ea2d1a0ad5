use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::ComponentError;
use crate::types::emoji::{IntoPartialEmoji, PartialEmoji};
use crate::types::util::insert_non_empty;

/// Dropdown of text options.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SelectMenu {
    pub custom_id: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Between 1 and 25, defaults to 1.
    #[serde(default = "default_values")]
    pub min_values: u8,
    /// Between 1 and 25, defaults to 1.
    #[serde(default = "default_values")]
    pub max_values: u8,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub disabled: bool,
}

const fn default_values() -> u8 {
    1
}

impl SelectMenu {
    pub fn new(custom_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            custom_id: custom_id.into(),
            placeholder: None,
            min_values: 1,
            max_values: 1,
            options,
            disabled: false,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub const fn values(mut self, min_values: u8, max_values: u8) -> Self {
        self.min_values = min_values;
        self.max_values = max_values;
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn to_payload(&self) -> Value {
        let options: Vec<Value> = self.options.iter().map(SelectOption::to_payload).collect();

        let mut payload = Map::new();
        payload.insert("type".into(), 3.into());
        payload.insert("custom_id".into(), self.custom_id.clone().into());
        payload.insert("min_values".into(), self.min_values.into());
        payload.insert("max_values".into(), self.max_values.into());
        payload.insert("options".into(), options.into());
        payload.insert("disabled".into(), self.disabled.into());
        insert_non_empty(&mut payload, "placeholder", self.placeholder.as_deref());

        Value::Object(payload)
    }
}

impl Serialize for SelectMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// One choice in a [`SelectMenu`].
///
/// `label`, `value` and `description` are limited to 100 characters by
/// Discord; this type doesn't check it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SelectOption {
    /// Shown to the user.
    pub label: String,
    /// Sent back in the interaction. Defaults to the label.
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub emoji: Option<PartialEmoji>,
    #[serde(default)]
    pub default: bool,
}

impl SelectOption {
    /// An option whose value is its label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();

        Self {
            value: label.clone(),
            label,
            description: None,
            emoji: None,
            default: false,
        }
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn emoji(mut self, emoji: impl IntoPartialEmoji) -> Self {
        self.emoji = Some(emoji.into_partial_emoji());
        self
    }

    /// Whether the option starts selected.
    #[must_use]
    pub const fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// # Errors
    ///
    /// Returns [`ComponentError::Parse`] if `label` or `value` is missing.
    pub fn from_payload(payload: &Value) -> Result<Self, ComponentError> {
        Ok(Self::deserialize(payload)?)
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("label".into(), self.label.clone().into());
        payload.insert("value".into(), self.value.clone().into());
        payload.insert("default".into(), self.default.into());
        if let Some(emoji) = &self.emoji {
            payload.insert("emoji".into(), emoji.to_payload());
        }
        insert_non_empty(&mut payload, "description", self.description.as_deref());

        Value::Object(payload)
    }
}

impl Serialize for SelectOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl Display for SelectOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(emoji) = &self.emoji {
            write!(f, "{emoji} ")?;
        }
        f.write_str(&self.label)?;

        match self.description.as_deref() {
            Some(description) if !description.is_empty() => write!(f, "\n{description}"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::component::Component;
    use crate::types::emoji::Emoji;
    use crate::types::id::Id;
    use serde_json::json;

    #[test]
    fn value_defaults_to_label() {
        let option = SelectOption::new("Pizza");
        assert_eq!(option.value, "Pizza");
    }

    #[test]
    fn explicit_value_wins() {
        let option = SelectOption::new("Pizza").value("pizza-42");
        assert_eq!(option.label, "Pizza");
        assert_eq!(option.value, "pizza-42");
    }

    #[test]
    fn emoji_from_str_and_cached_emoji() {
        let from_str = SelectOption::new("Pizza").emoji("🍕");
        assert_eq!(from_str.emoji, Some(PartialEmoji::unicode("🍕")));

        let cached = Emoji {
            id: Id::new(77),
            name: "slice".to_owned(),
            animated: false,
            available: true,
            managed: false,
            guild_id: None,
        };
        let from_cached = SelectOption::new("Pizza").emoji(&cached);
        assert_eq!(from_cached.emoji, Some(PartialEmoji::custom(Id::new(77), "slice", false)));
    }

    #[test]
    fn display_prefixes_emoji_and_appends_description() {
        let option = SelectOption::new("Pizza")
            .emoji("🍕")
            .description("Cheesy");
        assert_eq!(option.to_string(), "🍕 Pizza\nCheesy");
        assert_eq!(SelectOption::new("Plain").to_string(), "Plain");
    }

    #[test]
    fn payload_omits_absent_emoji_and_description() {
        assert_eq!(
            SelectOption::new("Pizza").to_payload(),
            json!({ "label": "Pizza", "value": "Pizza", "default": false })
        );
    }

    #[test]
    fn from_payload_requires_value() {
        let err = SelectOption::from_payload(&json!({ "label": "Pizza" })).unwrap_err();
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn menu_defaults() {
        let menu: SelectMenu =
            serde_json::from_value(json!({ "type": 3, "custom_id": "food" })).unwrap();
        assert_eq!(menu.min_values, 1);
        assert_eq!(menu.max_values, 1);
        assert!(menu.options.is_empty());
        assert!(!menu.disabled);
        assert!(menu.to_payload().get("placeholder").is_none());
    }

    #[test]
    fn menu_round_trip() {
        let menu = SelectMenu::new(
            "food",
            vec![
                SelectOption::new("Pizza").emoji("🍕").default(true),
                SelectOption::new("Salad")
                    .value("salad")
                    .description("Green"),
            ],
        )
        .placeholder("Pick a dish")
        .values(1, 2)
        .disabled(true);

        let parsed = Component::from_payload(&menu.to_payload()).unwrap();
        assert_eq!(parsed, Component::SelectMenu(menu));
    }
}
