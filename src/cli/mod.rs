//! # CLI Module
//!
//! Command implementations behind the `hot100bot` binary:
//!
//! - [`serve`] - runs the Discord interaction webhook; every `/spotify date:`
//!   command becomes a background playlist job
//! - [`auth`] - one-time Spotify authorization, caches the token the jobs use
//! - [`chart`] - prints the Hot 100 for a date as a table
//! - [`playlist`] - builds the playlist for a date locally, without Discord
//!
//! Each command loads the configuration sections it needs and terminates with
//! an error message when something fatal happens.

mod auth;
mod chart;
mod playlist;
mod serve;

pub use auth::auth;
pub use chart::chart;
pub use playlist::playlist;
pub use serve::serve;
