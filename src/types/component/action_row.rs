use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use super::Component;

/// Row holding up to five child components.
///
/// The five-child limit is Discord's; callers building rows enforce it.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ActionRow {
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ActionRow {
    pub const fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn to_payload(&self) -> Value {
        let components: Vec<Value> = self.components.iter().map(Component::to_payload).collect();

        json!({ "type": 1, "components": components })
    }
}

impl Serialize for ActionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}
