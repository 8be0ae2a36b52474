//! Opaque handle generation for refresh tokens and reference tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes in a generated handle (256 bits).
pub const HANDLE_BYTES: usize = 32;

/// Source of unguessable store keys.
pub trait HandleGenerator: Send + Sync {
    /// Generates a fresh handle.
    fn generate(&self) -> String;
}

/// Generates handles from the operating system CSPRNG.
///
/// Each handle is 256 random bits encoded as base64url without padding
/// (43 characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomHandleGenerator;

impl HandleGenerator for RandomHandleGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; HANDLE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}
