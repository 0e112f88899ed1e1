//! Reminder notifications for under-voted proposals.
//!
//! This crate provides:
//! - `Composer`, turning an `AlertBatch` into one message per alerting proposal
//! - Minijinja templates for the two message tones
//! - `Notifier` trait with webhook and append-only file implementations
//! - Dispatcher that delivers messages and tallies the outcome

pub mod composer;
pub mod dispatcher;
pub mod file;
pub mod templating;
pub mod traits;
pub mod webhook;

pub use composer::{ComposeFailure, Composer, Composition};
pub use dispatcher::{DeliveryReport, Dispatcher};
pub use traits::{Message, Notifier, NotifyError};
