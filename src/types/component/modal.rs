use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use super::{ActionRow, ComponentError};

/// Wire form of a modal: a titled form made of action rows.
///
/// This type only carries data. The callback-bearing modal used with a
/// registry lives in `ui::Modal` and wraps one of these.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Modal {
    pub title: String,
    pub custom_id: String,
    /// Every top-level child is read as an action row.
    #[serde(default)]
    pub components: Vec<ActionRow>,
}

impl Modal {
    /// Build from rows the caller already holds. Skips payload parsing.
    pub fn from_attributes(
        title: impl Into<String>,
        custom_id: impl Into<String>,
        components: Option<Vec<ActionRow>>,
    ) -> Self {
        Self {
            title: title.into(),
            custom_id: custom_id.into(),
            components: components.unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ComponentError::Parse`] when `title` or `custom_id` is
    /// missing, or a row child is malformed.
    pub fn from_payload(payload: &Value) -> Result<Self, ComponentError> {
        Ok(Self::deserialize(payload)?)
    }

    pub fn to_payload(&self) -> Value {
        let components: Vec<Value> = self.components.iter().map(ActionRow::to_payload).collect();

        json!({
            "title": self.title,
            "custom_id": self.custom_id,
            "components": components,
        })
    }
}

impl Serialize for Modal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::component::{Component, InputText, InputTextStyle};

    fn rows() -> Vec<ActionRow> {
        vec![
            ActionRow::new(vec![InputText::new("name", "Name").into()]),
            ActionRow::new(vec![InputText::new("bio", "Bio")
                .style(InputTextStyle::Paragraph)
                .into()]),
        ]
    }

    #[test]
    fn both_constructors_serialize_identically() {
        let built = Modal::from_attributes("Sign up", "signup", Some(rows()));
        let parsed = Modal::from_payload(&built.to_payload()).unwrap();

        assert_eq!(parsed, built);
        assert_eq!(parsed.to_payload(), built.to_payload());
    }

    #[test]
    fn from_attributes_defaults_to_no_rows() {
        let modal = Modal::from_attributes("Empty", "empty", None);
        assert!(modal.components.is_empty());
        assert_eq!(
            modal.to_payload(),
            json!({ "title": "Empty", "custom_id": "empty", "components": [] })
        );
    }

    #[test]
    fn nested_inputs_survive_parsing() {
        let payload = json!({
            "title": "Feedback",
            "custom_id": "fb",
            "components": [{
                "type": 1,
                "components": [{ "type": 4, "custom_id": "text", "style": 2, "label": "Text" }]
            }]
        });

        let modal = Modal::from_payload(&payload).unwrap();
        let Component::InputText(input) = &modal.components[0].components[0] else {
            panic!("expected InputText");
        };
        assert_eq!(input.style, InputTextStyle::Paragraph);
    }

    #[test]
    fn missing_title_is_an_error() {
        let err = Modal::from_payload(&json!({ "custom_id": "x" })).unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
