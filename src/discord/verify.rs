use data_encoding::HEXLOWER_PERMISSIVE;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::Res;

/// Verifies interaction webhook signatures against the application public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Parses the hex encoded public key shown in the developer portal.
    pub fn from_hex(public_key: &str) -> Res<Self> {
        let bytes = HEXLOWER_PERMISSIVE.decode(public_key.trim().as_bytes())?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| "DISCORD_PUBLIC_KEY must be 32 bytes")?;
        Ok(Self::new(VerifyingKey::from_bytes(&bytes)?))
    }

    /// Checks `signature` over `timestamp` followed by `body`.
    ///
    /// Returns `false` for malformed signatures as well as for mismatches.
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool {
        let Ok(bytes) = HEXLOWER_PERMISSIVE.decode(signature.trim().as_bytes()) else {
            return false;
        };
        let Ok(bytes) = <[u8; 64]>::try_from(bytes) else {
            return false;
        };
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify(&message, &signature).is_ok()
    }
}
