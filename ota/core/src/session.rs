use core::fmt;

use crate::constants::{DEVICE_ID_LEN, SESSION_IV_LEN, SESSION_KEY_LEN};
use crate::crypto::random::random_bytes;
use crate::error::UpdaterResult;
use crate::utils::unix_nanos;

/**
    Ephemeral symmetric key material for exactly one request.

    The same key encrypts the outbound query and decrypts the server's
    answer; the server recovers it from the `protectedKey` header. It is
    neither `Clone` nor serializable, and must never outlive its request.
*/
pub struct SessionMaterial {
    key: [u8; SESSION_KEY_LEN],
    iv: [u8; SESSION_IV_LEN],
}

impl SessionMaterial {
    /**
        Draw a fresh key and IV from the OS CSPRNG.
    */
    pub fn generate() -> UpdaterResult<Self> {
        Ok(Self {
            key: random_bytes()?,
            iv: random_bytes()?,
        })
    }

    /**
        Build session material from known bytes.
        Only meant for tests and for replaying captured traffic.
    */
    pub fn from_parts(key: [u8; SESSION_KEY_LEN], iv: [u8; SESSION_IV_LEN]) -> Self {
        Self { key, iv }
    }

    pub fn key(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; SESSION_IV_LEN] {
        &self.iv
    }
}

impl fmt::Debug for SessionMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionMaterial")
            .field("key", &"<redacted>")
            .field("iv", &hex::encode(self.iv))
            .finish()
    }
}

/**
    Generate a random device identifier: 32 random bytes as lowercase hex.
    Used for the per-request `deviceId` header and as the query GUID when
    the caller does not supply one.
*/
pub fn generate_device_id() -> UpdaterResult<String> {
    let bytes: [u8; DEVICE_ID_LEN] = random_bytes()?;
    Ok(hex::encode(bytes))
}

/**
    Fresh token identifying one wrapping of the session key.
    The server treats it as opaque; the current time in nanoseconds is unique
    enough per request.
*/
pub fn generate_scheme_version() -> String {
    unix_nanos().to_string()
}
