use data_encoding::BASE64;
use rsa::{
    RsaPublicKey, oaep, pkcs1::DecodeRsaPublicKey, pkcs8::DecodePublicKey,
    traits::RandomizedEncryptor,
};
use sha1::Sha1;

use crate::error::{UpdaterError, UpdaterResult};

/**
    Parse a regional public key.

    Accepted encodings, in the order they are tried:
      - SPKI PEM     ("-----BEGIN PUBLIC KEY-----")
      - PKCS#1 PEM   ("-----BEGIN RSA PUBLIC KEY-----")
      - bare base64 of an SPKI DER key, whitespace allowed
*/
pub fn parse_public_key(text: &str) -> UpdaterResult<RsaPublicKey> {
    let text = text.trim();
    if text.contains("BEGIN PUBLIC KEY") {
        return RsaPublicKey::from_public_key_pem(text)
            .map_err(|e| UpdaterError::KeyWrap(format!("SPKI public key: {e}")));
    }
    if text.contains("BEGIN RSA PUBLIC KEY") {
        return RsaPublicKey::from_pkcs1_pem(text)
            .map_err(|e| UpdaterError::KeyWrap(format!("PKCS#1 public key: {e}")));
    }

    let compact: String = text.split_ascii_whitespace().collect();
    let der = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| UpdaterError::KeyWrap(format!("public key base64: {e}")))?;
    RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| UpdaterError::KeyWrap(format!("SPKI public key: {e}")))
}

/**
    RSA-OAEP-SHA1 wrapping of the session key for the `protectedKey` header.

    Parameters (protocol-mandated):
      Hash: SHA-1
      MGF: MGF1-SHA-1
      Label: empty

    Input: the raw session key. The server expects the *base64 text* of the
    key inside the OAEP envelope, not the key bytes themselves, so the key is
    encoded before encryption.
    Output: base64 of the RSA ciphertext (modulus-sized).
*/
pub fn rsa_oaep_sha1_wrap(public_key: &RsaPublicKey, key: &[u8]) -> UpdaterResult<String> {
    let encoded_key = BASE64.encode(key);
    let encrypting_key = oaep::EncryptingKey::<Sha1>::new(public_key.clone());
    let mut rng = rsa::rand_core::OsRng;
    let ciphertext = encrypting_key
        .encrypt_with_rng(&mut rng, encoded_key.as_bytes())
        .map_err(|e| UpdaterError::KeyWrap(e.to_string()))?;
    Ok(BASE64.encode(&ciphertext))
}
