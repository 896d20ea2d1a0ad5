use async_trait::async_trait;
use futures_lite::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::error;

use crate::types::component::{self, ActionRow, Component};
use crate::types::interaction::ModalInteraction;

/// Rows a modal can hold.
pub const MAX_ROWS: usize = 5;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ModalError {
    #[error("a modal holds at most 5 rows, {count} requested")]
    TooManyComponents { count: usize },
    #[error("modals only hold InputText components, not {found}")]
    InvalidComponent { found: &'static str },
}

/// A fault raised while running a modal's callback.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("modal callback failed: {0}")]
    Failed(BoxError),
    #[error("modal callback panicked: {0}")]
    Panicked(String),
}

/// Behaviour of a modal once the user submits it.
#[async_trait]
pub trait ModalCallback: Send + Sync + 'static {
    async fn callback(&self, _interaction: &ModalInteraction) -> Result<(), BoxError> {
        Ok(())
    }

    /// Called with whatever [`callback`](Self::callback) returned or
    /// panicked with.
    async fn on_error(&self, error: CallbackError, interaction: &ModalInteraction) {
        error!(
            custom_id = interaction.custom_id(),
            error = %error,
            "ignoring exception in modal"
        );
    }
}

struct NoCallback;

impl ModalCallback for NoCallback {}

/// Adapts an async closure into a [`ModalCallback`].
pub struct FnCallback<F>(pub F);

#[async_trait]
impl<F, Fut> ModalCallback for FnCallback<F>
where
    F: Fn(ModalInteraction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    async fn callback(&self, interaction: &ModalInteraction) -> Result<(), BoxError> {
        (self.0)(interaction.clone()).await
    }
}

/// A modal together with what to do when it's submitted.
///
/// Register it with a [`ModalStore`](super::ModalStore) after sending it
/// so the submission finds its way back here.
#[derive(Clone)]
pub struct Modal {
    payload: component::Modal,
    callback: Arc<dyn ModalCallback>,
}

impl Modal {
    /// Bare inputs each get a row of their own; action rows are kept as
    /// they are.
    ///
    /// # Errors
    ///
    /// [`ModalError::InvalidComponent`] if anything other than an
    /// [`InputText`](component::InputText) shows up, and
    /// [`ModalError::TooManyComponents`] for more than [`MAX_ROWS`] rows.
    pub fn new(
        title: impl Into<String>,
        custom_id: impl Into<String>,
        components: Vec<Component>,
    ) -> Result<Self, ModalError> {
        let rows = components
            .into_iter()
            .map(into_row)
            .collect::<Result<Vec<_>, _>>()?;

        if rows.len() > MAX_ROWS {
            return Err(ModalError::TooManyComponents { count: rows.len() });
        }

        Ok(Self {
            payload: component::Modal::from_attributes(title, custom_id, Some(rows)),
            callback: Arc::new(NoCallback),
        })
    }

    #[must_use]
    pub fn with_callback(mut self, callback: impl ModalCallback) -> Self {
        self.callback = Arc::new(callback);
        self
    }

    /// Run `f` on submission.
    #[must_use]
    pub fn on_submit<F, Fut>(self, f: F) -> Self
    where
        F: Fn(ModalInteraction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.with_callback(FnCallback(f))
    }

    pub fn title(&self) -> &str {
        &self.payload.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.payload.title = title.into();
    }

    pub fn custom_id(&self) -> &str {
        &self.payload.custom_id
    }

    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) {
        self.payload.custom_id = custom_id.into();
    }

    pub fn components(&self) -> &[ActionRow] {
        &self.payload.components
    }

    pub const fn payload(&self) -> &component::Modal {
        &self.payload
    }

    /// Append an input on a new row.
    ///
    /// # Errors
    ///
    /// See [`Modal::add_components`].
    pub fn add_component(&mut self, component: Component) -> Result<(), ModalError> {
        self.add_components(vec![component])
    }

    /// Append inputs, one row each. Nothing is added unless the whole
    /// batch fits.
    ///
    /// # Errors
    ///
    /// [`ModalError::TooManyComponents`] when the modal is full or the
    /// batch would overflow it, [`ModalError::InvalidComponent`] when any
    /// component isn't an [`InputText`](component::InputText).
    pub fn add_components(&mut self, components: Vec<Component>) -> Result<(), ModalError> {
        let count = self.payload.components.len() + components.len();
        if self.payload.components.len() >= MAX_ROWS || count > MAX_ROWS {
            return Err(ModalError::TooManyComponents { count });
        }

        if let Some(invalid) = components
            .iter()
            .find(|c| !matches!(c, Component::InputText(_)))
        {
            return Err(ModalError::InvalidComponent {
                found: invalid.kind().name(),
            });
        }

        self.payload
            .components
            .extend(components.into_iter().map(|c| ActionRow::new(vec![c])));
        Ok(())
    }

    pub fn to_payload(&self) -> Value {
        self.payload.to_payload()
    }

    /// Run the callback, routing any failure or panic to the error hook.
    pub(crate) async fn run(&self, interaction: &ModalInteraction) {
        let outcome = AssertUnwindSafe(self.callback.callback(interaction))
            .catch_unwind()
            .await;

        let error = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => CallbackError::Failed(e),
            Err(panic) => CallbackError::Panicked(panic_message(panic.as_ref())),
        };

        let hook = AssertUnwindSafe(self.callback.on_error(error, interaction))
            .catch_unwind()
            .await;
        if let Err(panic) = hook {
            error!(
                custom_id = self.custom_id(),
                panic = %panic_message(panic.as_ref()),
                "modal error hook panicked"
            );
        }
    }
}

impl Debug for Modal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Modal")
            .field("title", &self.payload.title)
            .field("custom_id", &self.payload.custom_id)
            .field("components", &self.payload.components)
            .finish_non_exhaustive()
    }
}

fn into_row(component: Component) -> Result<ActionRow, ModalError> {
    let row = match component {
        Component::ActionRow(row) => row,
        other => ActionRow::new(vec![other]),
    };

    match row
        .components
        .iter()
        .find(|c| !matches!(c, Component::InputText(_)))
    {
        Some(invalid) => Err(ModalError::InvalidComponent {
            found: invalid.kind().name(),
        }),
        None => Ok(row),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
