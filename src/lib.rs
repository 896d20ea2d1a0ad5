//! Discord UI components and a modal registry.
//!
//! [`types`] holds the wire models (components, emojis, interactions,
//! scheduled events) and [`events`] turns raw gateway envelopes into typed
//! events. With the default `runtime` feature, [`ui`] adds modals that
//! carry their own submit callback together with the [`ui::ModalStore`]
//! that routes submissions back to them, and [`http`] wraps the REST
//! endpoints the components need behind a pluggable [`http::Requester`].

pub mod events;
pub mod server_guide;
pub mod types;

#[cfg(feature = "runtime")]
pub mod config;
#[cfg(feature = "runtime")]
pub mod http;
#[cfg(feature = "runtime")]
pub mod scheduled_event;
#[cfg(feature = "runtime")]
pub mod ui;
