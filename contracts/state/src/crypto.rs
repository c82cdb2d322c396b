//! Keccak-256 hashing and secp256k1 signer recovery.
//!
//! On-chain both primitives go through the runtime syscalls. Off-chain the
//! `sha3` and `libsecp256k1` crates compute the same values, so the validators
//! behave identically in unit tests and in the SDK.

#[cfg(target_os = "solana")]
use core::mem::MaybeUninit;

#[cfg(target_os = "solana")]
use pinocchio::syscalls::{sol_keccak256, sol_secp256k1_recover};

use crate::{
    constants::SIGNATURE_LEN,
    error::ValidationError,
    Address,
};

/// Prefix of the EIP-191 personal message digest for a 32 byte payload
pub const ETH_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 over the concatenation of `data`.
#[cfg(target_os = "solana")]
pub fn hashv(data: &[&[u8]]) -> [u8; 32] {
    let mut hash = MaybeUninit::<[u8; 32]>::uninit();
    unsafe {
        sol_keccak256(
            data.as_ptr() as *const u8,
            data.len() as u64,
            hash.as_mut_ptr() as *mut u8,
        );
        hash.assume_init()
    }
}

/// Keccak-256 over the concatenation of `data`.
#[cfg(not(target_os = "solana"))]
pub fn hashv(data: &[&[u8]]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};

    let mut hasher = Keccak256::new();
    for chunk in data {
        hasher.update(chunk);
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    hashv(&[data])
}

/// Digest signed by `personal_sign` / `signMessage` over a 32 byte hash.
pub fn eth_signed_message_hash(hash: &[u8; 32]) -> [u8; 32] {
    hashv(&[ETH_MESSAGE_PREFIX, &hash[..]])
}

/// Address of an uncompressed public key given as its 64 byte X || Y form.
pub fn address_from_public_key(public_key: &[u8; 64]) -> Address {
    let hash = keccak256(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recovers the address that produced `signature` over `digest`.
///
/// The signature is `r || s || v` with `v` in `{0, 1, 27, 28}`. High-s
/// signatures are rejected so a signature has exactly one valid encoding.
pub fn recover_signer(digest: &[u8; 32], signature: &[u8]) -> Result<Address, ValidationError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ValidationError::MalformedSignature);
    }

    let parsed = libsecp256k1::Signature::parse_standard_slice(&signature[..64])
        .map_err(|_| ValidationError::MalformedSignature)?;
    if parsed.s.is_high() {
        return Err(ValidationError::MalformedSignature);
    }

    let recovery_id = match signature[64] {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(ValidationError::MalformedSignature),
    };

    let public_key = recover_public_key(digest, &parsed, &signature[..64], recovery_id)?;
    Ok(address_from_public_key(&public_key))
}

#[cfg(target_os = "solana")]
fn recover_public_key(
    digest: &[u8; 32],
    _parsed: &libsecp256k1::Signature,
    compact: &[u8],
    recovery_id: u8,
) -> Result<[u8; 64], ValidationError> {
    let mut recovered = MaybeUninit::<[u8; 64]>::uninit();
    let res = unsafe {
        sol_secp256k1_recover(
            digest.as_ptr(),
            recovery_id as u64,
            compact.as_ptr(),
            recovered.as_mut_ptr() as *mut u8,
        )
    };
    if res != 0 {
        return Err(ValidationError::MalformedSignature);
    }
    Ok(unsafe { recovered.assume_init() })
}

#[cfg(not(target_os = "solana"))]
fn recover_public_key(
    digest: &[u8; 32],
    parsed: &libsecp256k1::Signature,
    _compact: &[u8],
    recovery_id: u8,
) -> Result<[u8; 64], ValidationError> {
    let message = libsecp256k1::Message::parse(digest);
    let recovery_id = libsecp256k1::RecoveryId::parse(recovery_id)
        .map_err(|_| ValidationError::MalformedSignature)?;
    let public_key = libsecp256k1::recover(&message, parsed, &recovery_id)
        .map_err(|_| ValidationError::MalformedSignature)?;

    // serialize() yields 0x04 || X || Y
    let serialized = public_key.serialize();
    let mut recovered = [0u8; 64];
    recovered.copy_from_slice(&serialized[1..]);
    Ok(recovered)
}
