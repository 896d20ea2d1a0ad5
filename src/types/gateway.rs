use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw gateway envelope. Every message on the WebSocket is wrapped in one.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GatewayPayload {
    pub op: u8,
    #[serde(default)]
    pub d: Option<Value>,
    #[serde(default)]
    pub s: Option<u64>,
    #[serde(default)]
    pub t: Option<String>,
}

impl GatewayPayload {
    /// An op-0 dispatch, as the gateway would send it.
    pub fn dispatch(event_name: impl Into<String>, data: Value) -> Self {
        Self {
            op: 0,
            d: Some(data),
            s: None,
            t: Some(event_name.into()),
        }
    }
}
