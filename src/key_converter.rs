//! Conversions between user keys and the bytes the tries store.
//!
//! Keys go in as anything that is `AsRef<[u8]>` (`&str`, `String`, `[u8]`,
//! `Vec<u8>`). Before storage each key is checked for the sentinel byte and
//! then has the sentinel appended. Keys come back out through [`TrieKey`].
use std::sync::Arc;

use crate::{Error, Result, SENTINEL};

/// An owned key type that can be rebuilt from stored key bytes.
pub trait TrieKey: Sized {
    /// Builds the key from its bytes. The sentinel is never included.
    fn from_key_bytes(bytes: &[u8]) -> Self;
}

/// Keys inserted from `str` round-trip exactly. Byte keys that are not valid
/// UTF-8 are decoded lossily.
impl TrieKey for String {
    fn from_key_bytes(bytes: &[u8]) -> Self {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl TrieKey for Vec<u8> {
    fn from_key_bytes(bytes: &[u8]) -> Self {
        bytes.to_vec()
    }
}

impl TrieKey for Box<[u8]> {
    fn from_key_bytes(bytes: &[u8]) -> Self {
        bytes.into()
    }
}

/// Rejects keys that contain the sentinel byte.
pub(crate) fn check_key(key: &[u8]) -> Result<()> {
    match key.iter().position(|&b| b == SENTINEL) {
        Some(position) => {
            tracing::debug!(position, len = key.len(), "rejecting key containing sentinel");
            Err(Error::InvalidKey { position })
        }
        None => Ok(()),
    }
}

/// Returns `true` if the key could be stored, i.e. it has no sentinel byte.
pub(crate) fn is_storable(key: &[u8]) -> bool {
    !key.contains(&SENTINEL)
}

/// Copies the key into a fresh shared buffer with the sentinel appended.
pub(crate) fn terminated(key: &[u8]) -> Arc<[u8]> {
    let mut bytes = Vec::with_capacity(key.len() + 1);
    bytes.extend_from_slice(key);
    bytes.push(SENTINEL);
    Arc::from(bytes)
}
