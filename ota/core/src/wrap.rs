use crate::constants::SESSION_KEY_LEN;
use crate::crypto::rsa::{parse_public_key, rsa_oaep_sha1_wrap};
use crate::envelope::{ProtectedKey, ProtectedKeyHeader};
use crate::error::UpdaterResult;
use crate::session::generate_scheme_version;

/**
    A session key wrapped for the server, plus the token naming this
    particular wrapping.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedKey {
    /// base64 RSA-OAEP ciphertext of the base64 session key.
    pub protected_key: String,
    pub scheme_version: String,
}

impl WrappedKey {
    /**
        Pair the wrapped key with the region's negotiation version to form
        the `protectedKey` header record.
    */
    pub fn into_header(self, negotiation_version: impl Into<String>) -> ProtectedKeyHeader {
        ProtectedKeyHeader {
            scene: ProtectedKey {
                protected_key: self.protected_key,
                version: self.scheme_version,
                negotiation_version: negotiation_version.into(),
            },
        }
    }
}

/**
    Wrap `key` under the region public key (PEM or bare base64 SPKI).
    Never logs the key.
*/
pub fn wrap_key(key: &[u8; SESSION_KEY_LEN], public_key: &str) -> UpdaterResult<WrappedKey> {
    let public_key = parse_public_key(public_key)?;
    let protected_key = rsa_oaep_sha1_wrap(&public_key, key)?;
    Ok(WrappedKey {
        protected_key,
        scheme_version: generate_scheme_version(),
    })
}
