//! Interactive message and modal components.
//!
//! Components arrive as JSON objects tagged with an integer `type`. The
//! [`Component`] sum type dispatches on that tag; tags this crate doesn't
//! know yet become [`Component::Unknown`] instead of failing, so a single
//! new component type can't break parsing of a whole interaction.

mod action_row;
mod button;
mod error;
mod input_text;
mod modal;
mod select_menu;

pub use self::{
    action_row::ActionRow,
    button::{Button, ButtonStyle},
    error::ComponentError,
    input_text::{InputText, InputTextStyle},
    modal::Modal,
    select_menu::{SelectMenu, SelectOption},
};

use serde::{
    de::{Deserializer, Error as DeError},
    ser::Serializer,
    Deserialize, Serialize,
};
use serde_json::{json, Value};

/// Discriminant of a [`Component`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u64", into = "u64")]
pub enum ComponentType {
    /// Container for other components.
    ActionRow,
    Button,
    /// Dropdown of text options.
    SelectMenu,
    /// Text field, only valid inside modals.
    InputText,
    /// Variant value is unknown to the library.
    Unknown(u64),
}

impl From<u64> for ComponentType {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::ActionRow,
            2 => Self::Button,
            3 => Self::SelectMenu,
            4 => Self::InputText,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ComponentType> for u64 {
    fn from(value: ComponentType) -> Self {
        match value {
            ComponentType::ActionRow => 1,
            ComponentType::Button => 2,
            ComponentType::SelectMenu => 3,
            ComponentType::InputText => 4,
            ComponentType::Unknown(unknown) => unknown,
        }
    }
}

impl ComponentType {
    /// Name of the type as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ActionRow => "ActionRow",
            Self::Button => "Button",
            Self::SelectMenu => "SelectMenu",
            Self::InputText => "InputText",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// A component parsed from, or destined for, the wire.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    SelectMenu(SelectMenu),
    InputText(InputText),
    /// A component type this library doesn't model. Only the raw
    /// discriminant survives.
    Unknown(u64),
}

impl Component {
    /// Parse any component payload.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::Parse`] if `type` is missing or a known
    /// component type lacks a required field. Unknown types never error.
    pub fn from_payload(payload: &Value) -> Result<Self, ComponentError> {
        Ok(Self::deserialize(payload)?)
    }

    /// Serialize into the minimal wire payload.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::ActionRow(row) => row.to_payload(),
            Self::Button(button) => button.to_payload(),
            Self::SelectMenu(menu) => menu.to_payload(),
            Self::InputText(input) => input.to_payload(),
            Self::Unknown(kind) => json!({ "type": kind }),
        }
    }

    /// Type of the component.
    pub const fn kind(&self) -> ComponentType {
        match self {
            Self::ActionRow(_) => ComponentType::ActionRow,
            Self::Button(_) => ComponentType::Button,
            Self::SelectMenu(_) => ComponentType::SelectMenu,
            Self::InputText(_) => ComponentType::InputText,
            Self::Unknown(unknown) => ComponentType::Unknown(*unknown),
        }
    }

    /// Developer-defined ID of the component, if it has one.
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Button(button) => button.custom_id.as_deref(),
            Self::SelectMenu(menu) => Some(&menu.custom_id),
            Self::InputText(input) => Some(&input.custom_id),
            Self::ActionRow(_) | Self::Unknown(_) => None,
        }
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let kind = value
            .get("type")
            .cloned()
            .ok_or_else(|| <serde_json::Error as DeError>::missing_field("type"))?;

        Ok(match serde_json::from_value::<ComponentType>(kind)? {
            ComponentType::ActionRow => Self::ActionRow(serde_json::from_value(value)?),
            ComponentType::Button => Self::Button(serde_json::from_value(value)?),
            ComponentType::SelectMenu => Self::SelectMenu(serde_json::from_value(value)?),
            ComponentType::InputText => Self::InputText(serde_json::from_value(value)?),
            ComponentType::Unknown(unknown) => Self::Unknown(unknown),
        })
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        Self::from_value(value).map_err(DeError::custom)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

impl From<ActionRow> for Component {
    fn from(row: ActionRow) -> Self {
        Self::ActionRow(row)
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<SelectMenu> for Component {
    fn from(menu: SelectMenu) -> Self {
        Self::SelectMenu(menu)
    }
}

impl From<InputText> for Component {
    fn from(input: InputText) -> Self {
        Self::InputText(input)
    }
}
