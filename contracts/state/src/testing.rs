//! Deterministic keys and signing helpers for unit tests.

use crate::{
    crypto::{address_from_public_key, eth_signed_message_hash},
    Address,
};

pub const OWNER_KEY: [u8; 32] = [0x11; 32];
pub const SESSION_KEY: [u8; 32] = [0x22; 32];
pub const STRANGER_KEY: [u8; 32] = [0x33; 32];

pub fn address_of(secret: &[u8; 32]) -> Address {
    let secret = libsecp256k1::SecretKey::parse(secret).unwrap();
    let serialized = libsecp256k1::PublicKey::from_secret_key(&secret).serialize();
    let mut public_key = [0u8; 64];
    public_key.copy_from_slice(&serialized[1..]);
    address_from_public_key(&public_key)
}

/// Signs a raw digest, returning `r || s || v` with `v` in {27, 28}.
pub fn sign_digest(secret: &[u8; 32], digest: &[u8; 32]) -> [u8; 65] {
    let secret = libsecp256k1::SecretKey::parse(secret).unwrap();
    let (signature, recovery_id) =
        libsecp256k1::sign(&libsecp256k1::Message::parse(digest), &secret);
    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&signature.serialize());
    out[64] = recovery_id.serialize() + 27;
    out
}

/// Signs a hash the way `signMessage(bytes32)` does.
pub fn sign_message(secret: &[u8; 32], hash: &[u8; 32]) -> [u8; 65] {
    sign_digest(secret, &eth_signed_message_hash(hash))
}
