//! LINE Messaging API adapter

pub mod client;
pub mod flex;
pub mod signature;
pub mod webhook;

pub use client::LineClient;
pub use webhook::{router, WebhookState};
