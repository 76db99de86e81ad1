//! # Discord Module
//!
//! The two places the bot talks to Discord outside of plain JSON handling:
//!
//! - [`verify`] - checks the Ed25519 signature Discord puts on every webhook
//!   call, over the `X-Signature-Timestamp` header followed by the raw body
//! - [`followup`] - edits the deferred response with the job result

pub mod followup;
pub mod verify;

pub use followup::Followup;
pub use verify::SignatureVerifier;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";
