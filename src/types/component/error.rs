//! Error type for component parsing and construction.

/// Reason a component couldn't be parsed or built.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// The payload is malformed: `type` is missing or a required field of a
    /// known component type is absent.
    #[error("malformed component payload: {0}")]
    Parse(#[from] serde_json::Error),
    /// An emoji argument of an unsupported JSON type.
    #[error("expected emoji to be a string or an emoji object, not {found}")]
    InvalidEmoji { found: &'static str },
}

#[cfg(test)]
mod tests {
    use super::ComponentError;
    use static_assertions::assert_impl_all;
    use std::error::Error;

    assert_impl_all!(ComponentError: Error, Send, Sync);

    #[test]
    fn invalid_emoji_display() {
        let err = ComponentError::InvalidEmoji { found: "number" };
        assert_eq!(
            err.to_string(),
            "expected emoji to be a string or an emoji object, not number"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn parse_error_keeps_source() {
        let inner = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ComponentError::from(inner);
        assert!(err.source().is_some());
    }
}
