//! `modal_relay`: replays gateway traffic through a modal registry.
//!
//! Reads one raw gateway payload (JSON) per line from stdin. Every
//! interaction other than a modal submission is answered with a sign-up
//! modal, and submissions are dispatched to the modal registered for their
//! author. REST calls aren't sent anywhere; each one is printed to stdout
//! as a JSON line instead.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use discord_ui_kit::config::Config;
use discord_ui_kit::events::GatewayEvent;
use discord_ui_kit::http::{HttpError, HttpMethod, Requester};
use discord_ui_kit::types::component::InputTextStyle;
use discord_ui_kit::types::id::{marker::InteractionMarker, Id};
use discord_ui_kit::types::user::{Member, User};
use discord_ui_kit::types::{text_input, GatewayPayload};
use discord_ui_kit::ui::{BoxError, Modal, ModalError, ModalStore};

/// Prints requests instead of sending them.
struct StdoutRequester;

#[async_trait]
impl Requester for StdoutRequester {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        route_key: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, HttpError> {
        let line = json!({
            "method": method.to_string(),
            "path": path,
            "route": route_key,
            "body": body,
        });
        println!("{line}");
        Ok(Vec::new())
    }
}

/// The fields needed to answer an interaction.
#[derive(Deserialize)]
struct InteractionStub {
    id: Id<InteractionMarker>,
    token: String,
    #[serde(default)]
    member: Option<Member>,
    #[serde(default)]
    user: Option<User>,
}

fn signup_modal() -> Result<Modal, ModalError> {
    let modal = Modal::new(
        "Sign up",
        "signup",
        vec![
            text_input("name", "Name", InputTextStyle::Short, true),
            text_input("about", "About you", InputTextStyle::Paragraph, false),
        ],
    )?;

    Ok(modal.on_submit(|interaction| async move {
        let values = interaction.text_values();
        info!(
            user = interaction.author().map_or("unknown", User::display_name),
            name = values.get("name").copied().unwrap_or_default(),
            about = values.get("about").copied().unwrap_or_default(),
            "sign-up received"
        );
        Ok::<_, BoxError>(())
    }))
}

/// Returns the callback task when a submission was dispatched.
async fn handle(store: &ModalStore, event: GatewayEvent) -> Option<JoinHandle<()>> {
    match event {
        GatewayEvent::ModalSubmit(interaction) => {
            let task = store.dispatch(*interaction).await;
            if task.is_none() {
                warn!("modal submission had no registered modal");
            }
            return task;
        }
        GatewayEvent::Interaction(raw) => {
            let stub: InteractionStub = match serde_json::from_value(raw) {
                Ok(stub) => stub,
                Err(e) => {
                    warn!(error = %e, "interaction missing id or token");
                    return None;
                }
            };
            let Some(user_id) = stub
                .member
                .and_then(|m| m.user)
                .or(stub.user)
                .map(|u| u.id)
            else {
                warn!("interaction without a user");
                return None;
            };

            let modal = match signup_modal() {
                Ok(modal) => modal,
                Err(e) => {
                    error!(error = %e, "failed to build modal");
                    return None;
                }
            };
            if let Err(e) = store
                .send_modal(&StdoutRequester, stub.id, &stub.token, user_id, modal)
                .await
            {
                error!(error = %e, "failed to send modal");
            }
        }
        GatewayEvent::ScheduledEventCreate(event)
        | GatewayEvent::ScheduledEventUpdate(event)
        | GatewayEvent::ScheduledEventDelete(event) => {
            info!(event = %event, status = ?event.status, "scheduled event changed");
        }
        other => info!(event = other.name().unwrap_or("control"), "ignored"),
    }
    None
}

#[tokio::main]
async fn main() {
    // Initialise tracing (respects RUST_LOG env, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad configuration");
            std::process::exit(1);
        }
    };
    let store = config.modal_store();
    info!(timeout_secs = config.modal_timeout.as_secs(), "relay ready");

    let mut callbacks = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<GatewayPayload>(&line) {
            Ok(payload) => {
                callbacks.extend(handle(&store, GatewayEvent::from_payload(payload)).await);
            }
            Err(e) => warn!(error = %e, "skipping line that isn't a gateway payload"),
        }
    }

    for callback in callbacks {
        if let Err(e) = callback.await {
            error!(error = %e, "modal callback task failed");
        }
    }
    info!(pending = store.len().await, "stdin closed");
}
