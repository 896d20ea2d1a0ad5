//! Modals with callbacks, and the registry that routes submissions back
//! to them.

mod modal;
mod store;

pub use self::{
    modal::{BoxError, CallbackError, FnCallback, Modal, ModalCallback, ModalError, MAX_ROWS},
    store::{ModalStore, DEFAULT_TIMEOUT},
};
