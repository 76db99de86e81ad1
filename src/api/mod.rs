//! # API Module
//!
//! HTTP endpoints served by the bot.
//!
//! ## Endpoints
//!
//! - [`interactions`] - Discord interaction webhook. Verifies the request
//!   signature, answers pings, and turns the playlist slash command into a
//!   background job followed by a deferred acknowledgment.
//! - [`callback`] - OAuth redirect target used by `hot100bot auth`. Exchanges
//!   the authorization code for a token.
//! - [`health`] - Health check returning status and version.
//!
//! Handlers get their state through axum `Extension` layers, see
//! [`crate::server`] for the routers.

mod callback;
mod health;
mod interactions;

pub use callback::{CallbackState, callback};
pub use health::health;
pub use interactions::{GatewayError, GatewayState, interactions, parse_request};
