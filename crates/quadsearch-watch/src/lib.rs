//! # Quadsearch Change Capture
//!
//! Turns every mutating call on a quad store into a [`Patch`] and delivers it
//! to subscribed listeners.
//!
//! ```text
//! ┌─────────────┐   ┌───────────────┐   ┌──────────┐   ┌──────────────┐
//! │   caller    │──▶│ PatchingStore │──▶│ PatchHub │──▶│ listener #1  │
//! │ insert/del  │   │  (decorator)  │   │          │──▶│ listener #2  │
//! └─────────────┘   └───────┬───────┘   └──────────┘   └──────────────┘
//!                           ▼                 one ordered queue per listener
//!                    wrapped QuadStore
//! ```
//!
//! The wrapped store runs first; a Patch is only emitted after it succeeds.
//! Each listener owns a queue and a worker task, so it sees Patches in
//! emission order and never handles two at once. Listener failures and panics
//! are logged and counted, never returned to the mutating caller.
//!
//! [`DeliveryMode::Synchronous`] makes the mutating call wait for every
//! listener; [`DeliveryMode::Detached`] returns immediately and
//! [`PatchingStore::drain`] waits for outstanding work.
//!
//! [`Patch`]: quadsearch_core::Patch

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod capture;
pub mod error;
pub mod hub;
pub mod listener;

pub use capture::PatchingStore;
pub use error::{Error, Result};
pub use hub::{HubStats, PatchHub, Subscription};
pub use listener::{listener_fn, FnListener, PatchListener};
pub use quadsearch_config::DeliveryMode;
