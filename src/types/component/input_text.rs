use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::types::util::insert_non_empty;

/// Text field shown inside a modal.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct InputText {
    #[serde(default = "InputTextStyle::default")]
    pub style: InputTextStyle,
    pub custom_id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Pre-filled text.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub min_length: u16,
    #[serde(default)]
    pub max_length: Option<u16>,
}

const fn default_required() -> bool {
    true
}

impl InputText {
    /// A required, single-line input.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            style: InputTextStyle::Short,
            custom_id: custom_id.into(),
            label: Some(label.into()),
            placeholder: None,
            value: None,
            required: true,
            min_length: 0,
            max_length: None,
        }
    }

    #[must_use]
    pub const fn style(mut self, style: InputTextStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub const fn min_length(mut self, min_length: u16) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub const fn max_length(mut self, max_length: u16) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("type".into(), 4.into());
        payload.insert("style".into(), u64::from(self.style).into());
        payload.insert("label".into(), self.label.clone().into());
        payload.insert("custom_id".into(), self.custom_id.clone().into());
        payload.insert("required".into(), self.required.into());
        payload.insert("min_length".into(), self.min_length.into());
        insert_non_empty(&mut payload, "placeholder", self.placeholder.as_deref());
        insert_non_empty(&mut payload, "value", self.value.as_deref());
        if let Some(max_length) = self.max_length.filter(|max| *max > 0) {
            payload.insert("max_length".into(), max_length.into());
        }

        Value::Object(payload)
    }
}

impl Serialize for InputText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// Style of an [`InputText`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u64", into = "u64")]
pub enum InputTextStyle {
    /// Single line.
    #[default]
    Short,
    /// Multiple lines.
    Paragraph,
    /// Variant value is unknown to the library.
    Unknown(u64),
}

impl From<u64> for InputTextStyle {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::Short,
            2 => Self::Paragraph,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<InputTextStyle> for u64 {
    fn from(value: InputTextStyle) -> Self {
        match value {
            InputTextStyle::Short => 1,
            InputTextStyle::Paragraph => 2,
            InputTextStyle::Unknown(unknown) => unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::component::Component;
    use serde_json::json;

    #[test]
    fn defaults_when_fields_missing() {
        let input: InputText =
            serde_json::from_value(json!({ "type": 4, "custom_id": "name" })).unwrap();
        assert_eq!(input.style, InputTextStyle::Short);
        assert!(input.required);
        assert_eq!(input.min_length, 0);
        assert!(input.label.is_none());
        assert!(input.max_length.is_none());
    }

    #[test]
    fn wide_style_is_unknown() {
        let input: InputText =
            serde_json::from_value(json!({ "type": 4, "custom_id": "name", "style": 400 }))
                .unwrap();
        assert_eq!(input.style, InputTextStyle::Unknown(400));
        assert_eq!(input.to_payload()["style"], 400);
    }

    #[test]
    fn optional_fields_absent_not_null() {
        let payload = InputText::new("name", "Name").to_payload();
        assert_eq!(
            payload,
            json!({
                "type": 4,
                "style": 1,
                "label": "Name",
                "custom_id": "name",
                "required": true,
                "min_length": 0
            })
        );
    }

    #[test]
    fn round_trip_all_fields() {
        let input = InputText::new("bio", "About you")
            .style(InputTextStyle::Paragraph)
            .placeholder("Tell us something")
            .value("I like pizza")
            .required(false)
            .min_length(10)
            .max_length(400);

        let parsed = Component::from_payload(&input.to_payload()).unwrap();
        assert_eq!(parsed, Component::InputText(input));
    }
}
