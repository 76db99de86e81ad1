//! Billboard Hot 100 to Spotify playlist bot.
//!
//! This library backs a Discord slash command that, given a date, scrapes the
//! Billboard Hot 100 chart for that week and creates a private Spotify playlist
//! with the matching tracks. The command platform gets a deferred
//! acknowledgment immediately while the playlist is built in a background job,
//! which later edits the original response with the playlist link.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the interaction webhook, OAuth callback and health
//! - `billboard` - Chart date handling, chart page fetching and parsing
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `discord` - Request signature verification and follow-up messages
//! - `job` - Background playlist jobs and their dispatching
//! - `management` - On-disk token cache
//! - `server` - HTTP server wiring
//! - `spotify` - Spotify Web API client, authorization, search and playlists
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use hot100bot::{billboard::ChartDate, config};
//!
//! #[tokio::main]
//! async fn main() -> hot100bot::Res<()> {
//!     config::load_env().await?;
//!     let date = ChartDate::parse("14.06.2024")?;
//!     println!("{}", date.playlist_name());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod billboard;
pub mod cli;
pub mod config;
pub mod discord;
pub mod job;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Received {} command", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the command-line entry points. Code running inside the
/// server or a background job must use [`failure!`] instead, which reports
/// without terminating the process.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints an error message with a red cross and keeps running.
///
/// # Example
///
/// ```
/// failure!("Playlist job for {} failed: {}", date, err);
/// ```
#[macro_export]
macro_rules! failure {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "x".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. a chart entry that could not be matched
/// or a track that could not be added to a playlist.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
