use data_encoding::BASE64;
use serde::{Deserialize, Serialize};

use crate::crypto::aes::aes_ctr_apply;
use crate::error::{UpdaterError, UpdaterResult};
use crate::session::SessionMaterial;

/**
    The plaintext query document.

    Field set and order are fixed by the server: keys are emitted in
    alphabetical order, exactly as the vendor client serializes them.
    Only `deviceId` and `time` vary between requests.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDocument {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "isLocked")]
    pub is_locked: bool,
    #[serde(rename = "isRooted")]
    pub is_rooted: String,
    pub mode: String,
    pub opex: Opex,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Capability flags nested in the query document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opex {
    pub check: bool,
}

impl QueryDocument {
    pub fn new(guid: impl Into<String>, time_millis: i64) -> Self {
        Self {
            device_id: guid.into(),
            is_locked: true,
            is_rooted: "0".to_owned(),
            mode: "0".to_owned(),
            opex: Opex { check: true },
            time: time_millis,
            kind: "0".to_owned(),
        }
    }
}

/**
    A symmetric envelope: base64 ciphertext plus the base64 IV it was
    encrypted under. Sent as the `params` string of the request body.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    pub cipher: String,
    pub iv: String,
}

/**
    Serialize and encrypt the query document, returning the JSON text of the
    resulting [`RequestBody`].

    Steps:
      1. serialize the [`QueryDocument`] to compact JSON
      2. AES-256-CTR encrypt it with the session key and IV
      3. base64 the ciphertext and the IV
      4. serialize `{"cipher": .., "iv": ..}` to a JSON string

    The returned string is embedded as a JSON *string value* in the outer
    body, not as a nested object.
*/
pub fn build_outbound(
    material: &SessionMaterial,
    guid: &str,
    time_millis: i64,
) -> UpdaterResult<String> {
    let document = QueryDocument::new(guid, time_millis);
    let plaintext =
        serde_json::to_vec(&document).map_err(|e| UpdaterError::Serialization(e.to_string()))?;

    let ciphertext = aes_ctr_apply(material.key(), material.iv(), &plaintext);

    let body = RequestBody {
        cipher: BASE64.encode(&ciphertext),
        iv: BASE64.encode(material.iv()),
    };
    serde_json::to_string(&body).map_err(|e| UpdaterError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> SessionMaterial {
        SessionMaterial::from_parts([0x11; 32], [0x22; 16])
    }

    #[test]
    fn document_field_order() {
        let json = serde_json::to_string(&QueryDocument::new("abc", 1_700_000_000_000)).unwrap();
        assert_eq!(
            json,
            r#"{"deviceId":"abc","isLocked":true,"isRooted":"0","mode":"0","opex":{"check":true},"time":1700000000000,"type":"0"}"#
        );
    }

    #[test]
    fn outbound_decrypts_to_document() {
        let material = material();
        let outbound = build_outbound(&material, "guid-1", 42).unwrap();

        let body: RequestBody = serde_json::from_str(&outbound).unwrap();
        assert_eq!(BASE64.decode(body.iv.as_bytes()).unwrap(), material.iv());

        let ciphertext = BASE64.decode(body.cipher.as_bytes()).unwrap();
        let plaintext = aes_ctr_apply(material.key(), material.iv(), &ciphertext);
        let document: QueryDocument = serde_json::from_slice(&plaintext).unwrap();
        assert_eq!(document, QueryDocument::new("guid-1", 42));
    }

    #[test]
    fn ciphertext_length_matches_plaintext() {
        let material = material();
        let outbound = build_outbound(&material, "guid-1", 42).unwrap();
        let body: RequestBody = serde_json::from_str(&outbound).unwrap();
        let ciphertext = BASE64.decode(body.cipher.as_bytes()).unwrap();
        let plaintext = serde_json::to_vec(&QueryDocument::new("guid-1", 42)).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_ne!(ciphertext, plaintext);
    }

    #[test]
    fn outbound_is_cipher_then_iv() {
        let outbound = build_outbound(&material(), "g", 0).unwrap();
        assert!(outbound.starts_with(r#"{"cipher":""#));
        assert!(outbound.contains(r#","iv":""#));
    }
}
