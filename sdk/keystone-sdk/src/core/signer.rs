use keystone_state::{
    crypto::{address_from_public_key, eth_signed_message_hash},
    Address,
};

use crate::error::{KeystoneSdkError, Result};

/// Abstraction for a secp256k1 key that signs for a Keystone account.
///
/// Owners and session keys both sign 32 byte hashes the way
/// `signMessage(bytes32)` does.
pub trait KeystoneSigner {
    fn address(&self) -> Address;

    /// Sign the EIP-191 personal message digest of `hash`, returning `r || s || v`.
    fn sign_message(&self, hash: &[u8; 32]) -> Result<[u8; 65]>;
}

/// Signer holding the secret key in memory.
#[derive(Clone)]
pub struct LocalSigner {
    secret: libsecp256k1::SecretKey,
}

impl LocalSigner {
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self> {
        let secret =
            libsecp256k1::SecretKey::parse(secret).map_err(|_| KeystoneSdkError::InvalidSecretKey)?;
        Ok(Self { secret })
    }

    /// Sign a raw digest. `v` is 27 or 28.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> [u8; 65] {
        let message = libsecp256k1::Message::parse(digest);
        let (signature, recovery_id) = libsecp256k1::sign(&message, &self.secret);
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.serialize());
        out[64] = recovery_id.serialize() + 27;
        out
    }
}

impl KeystoneSigner for LocalSigner {
    fn address(&self) -> Address {
        let serialized = libsecp256k1::PublicKey::from_secret_key(&self.secret).serialize();
        let mut public_key = [0u8; 64];
        public_key.copy_from_slice(&serialized[1..]);
        address_from_public_key(&public_key)
    }

    fn sign_message(&self, hash: &[u8; 32]) -> Result<[u8; 65]> {
        Ok(self.sign_digest(&eth_signed_message_hash(hash)))
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address())
            .finish()
    }
}
