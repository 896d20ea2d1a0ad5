use async_lock::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::Modal;
use crate::http::{ApiRequests, HttpError, Requester};
use crate::types::id::{
    marker::{InteractionMarker, UserMarker},
    Id,
};
use crate::types::interaction::{InteractionResponse, ModalInteraction};

/// How long an unsubmitted modal stays registered. Discord sends nothing
/// when a user closes a modal, so this is the only bound on abandoned ones.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

type Key = (Id<UserMarker>, String);

struct Entry {
    modal: Arc<Modal>,
    generation: u64,
    in_flight: bool,
}

#[derive(Default)]
struct State {
    modals: HashMap<Key, Entry>,
    generation: u64,
}

/// Modals waiting for their submission, keyed by user and `custom_id`.
///
/// Cheap to clone; clones share the same registry. Must be used inside a
/// Tokio runtime since timeouts and callbacks run as spawned tasks.
#[derive(Clone)]
pub struct ModalStore {
    state: Arc<Mutex<State>>,
    timeout: Duration,
}

impl Default for ModalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStore {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            state: Arc::default(),
            timeout,
        }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Register `modal` for `user_id`, replacing any modal with the same
    /// `custom_id`, and schedule its expiry.
    pub async fn register(&self, user_id: Id<UserMarker>, modal: Modal) {
        let key = (user_id, modal.custom_id().to_owned());

        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            let generation = state.generation;
            let replaced = state
                .modals
                .insert(
                    key.clone(),
                    Entry {
                        modal: Arc::new(modal),
                        generation,
                        in_flight: false,
                    },
                )
                .is_some();
            debug!(user_id = %user_id, custom_id = key.1.as_str(), generation, replaced, "modal registered");
            generation
        };

        let store = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(store.timeout).await;
            if store.remove_if_current(&key, generation).await {
                debug!(user_id = %key.0, custom_id = key.1.as_str(), "modal expired");
            }
        });
    }

    /// Hand a submission to its modal's callback.
    ///
    /// Returns as soon as the callback task is spawned, with its handle.
    /// Returns `None` without doing anything when no modal matches, or the
    /// matching one is still handling an earlier submission.
    pub async fn dispatch(&self, interaction: ModalInteraction) -> Option<JoinHandle<()>> {
        let Some(user_id) = interaction.author_id() else {
            debug!(custom_id = interaction.custom_id(), "modal submission without author");
            return None;
        };
        let key = (user_id, interaction.custom_id().to_owned());

        let (modal, generation) = {
            let mut state = self.state.lock().await;
            let Some(entry) = state.modals.get_mut(&key) else {
                debug!(user_id = %user_id, custom_id = key.1.as_str(), "no modal registered, dropping submission");
                return None;
            };
            if entry.in_flight {
                debug!(user_id = %user_id, custom_id = key.1.as_str(), "modal already dispatched, dropping duplicate");
                return None;
            }
            entry.in_flight = true;
            (Arc::clone(&entry.modal), entry.generation)
        };

        debug!(user_id = %user_id, custom_id = key.1.as_str(), generation, "dispatching modal");
        let store = self.clone();
        Some(tokio::spawn(async move {
            modal.run(&interaction).await;
            store.remove_if_current(&key, generation).await;
        }))
    }

    /// Answer `interaction_id` with `modal`, then register it for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the request error; the modal isn't registered in that case.
    pub async fn send_modal<R: Requester + ?Sized>(
        &self,
        requester: &R,
        interaction_id: Id<InteractionMarker>,
        interaction_token: &str,
        user_id: Id<UserMarker>,
        modal: Modal,
    ) -> Result<(), HttpError> {
        let response = InteractionResponse::modal(modal.payload());
        requester
            .create_interaction_response(interaction_id, interaction_token, &response)
            .await?;
        self.register(user_id, modal).await;
        Ok(())
    }

    pub async fn contains(&self, user_id: Id<UserMarker>, custom_id: &str) -> bool {
        self.state
            .lock()
            .await
            .modals
            .contains_key(&(user_id, custom_id.to_owned()))
    }

    /// Drop a registration early. Returns whether one existed.
    pub async fn remove(&self, user_id: Id<UserMarker>, custom_id: &str) -> bool {
        self.state
            .lock()
            .await
            .modals
            .remove(&(user_id, custom_id.to_owned()))
            .is_some()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.modals.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.modals.is_empty()
    }

    /// Remove `key` only if it still holds the registration `generation`.
    async fn remove_if_current(&self, key: &Key, generation: u64) -> bool {
        let mut state = self.state.lock().await;
        match state.modals.get(key) {
            Some(entry) if entry.generation == generation => {
                state.modals.remove(key);
                true
            }
            _ => false,
        }
    }
}
