//! Shorthand constructors for message and modal components.
//!
//! Each helper returns a ready [`Component`], hiding the per-variant struct
//! so a layout reads as a tree of calls:
//!
//! ```
//! use discord_ui_kit::types::builders::{action_row, button};
//! use discord_ui_kit::types::component::ButtonStyle;
//!
//! let row = action_row(vec![
//!     button(ButtonStyle::Success, "Accept", "accept"),
//!     button(ButtonStyle::Danger, "Decline", "decline"),
//! ]);
//! assert_eq!(row.to_payload()["components"][1]["custom_id"], "decline");
//! ```

use super::component::{
    ActionRow, Button, ButtonStyle, Component, InputText, InputTextStyle, SelectMenu, SelectOption,
};

/// Wrap components in an action row.
pub fn action_row(components: Vec<Component>) -> Component {
    ActionRow::new(components).into()
}

/// An interactive button. Use [`link_button`] for [`ButtonStyle::Link`].
pub fn button(style: ButtonStyle, label: impl Into<String>, custom_id: impl Into<String>) -> Component {
    Button::new(style, custom_id).label(label).into()
}

pub fn link_button(label: impl Into<String>, url: impl Into<String>) -> Component {
    Button::link(url).label(label).into()
}

/// A single-choice select menu with a placeholder.
pub fn string_select(
    custom_id: impl Into<String>,
    placeholder: impl Into<String>,
    options: Vec<SelectOption>,
) -> Component {
    SelectMenu::new(custom_id, options)
        .placeholder(placeholder)
        .into()
}

/// A text input for use inside a modal.
pub fn text_input(
    custom_id: impl Into<String>,
    label: impl Into<String>,
    style: InputTextStyle,
    required: bool,
) -> Component {
    InputText::new(custom_id, label)
        .style(style)
        .required(required)
        .into()
}
