use data_encoding::BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::SESSION_KEY_LEN;
use crate::crypto::aes::aes_ctr_decrypt;
use crate::error::{UpdaterError, UpdaterResult};

/**
    The `body` field of a response envelope.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeBody {
    /// `body` missing or `null`: nothing to decrypt.
    Absent,
    /// `body` is a string holding the JSON text of an `{iv, cipher}` envelope.
    EncodedString(String),
}

impl TryFrom<Option<Value>> for EnvelopeBody {
    type Error = UpdaterError;

    fn try_from(value: Option<Value>) -> Result<Self, Self::Error> {
        match value {
            None | Some(Value::Null) => Ok(Self::Absent),
            Some(Value::String(s)) => Ok(Self::EncodedString(s)),
            Some(other) => Err(UpdaterError::Protocol(format!(
                "response body must be a string, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

/**
    The outer response envelope, before decryption.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub response_code: i64,
    pub err_msg: String,
    pub body: EnvelopeBody,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "responseCode", default)]
    response_code: i64,
    #[serde(rename = "errMsg", default)]
    err_msg: String,
    #[serde(default)]
    body: Option<Value>,
}

#[derive(Deserialize)]
struct InnerEnvelope {
    iv: String,
    cipher: String,
}

impl ResponseEnvelope {
    /**
        Parse the outer JSON envelope. Only the shape of `body` is checked
        here; its contents are left for [`ResponseEnvelope::decrypt`].
    */
    pub fn parse(raw: &[u8]) -> UpdaterResult<Self> {
        let envelope: RawEnvelope = serde_json::from_slice(raw)
            .map_err(|e| UpdaterError::Protocol(format!("response envelope: {e}")))?;
        Ok(Self {
            response_code: envelope.response_code,
            err_msg: envelope.err_msg,
            body: envelope.body.try_into()?,
        })
    }

    /**
        Decrypt the body with the session key of the request that produced
        this response. The server answers under the client's own key, so no
        other key is ever valid here.
    */
    pub fn decrypt(&self, key: &[u8; SESSION_KEY_LEN]) -> UpdaterResult<Vec<u8>> {
        let encoded = match &self.body {
            EnvelopeBody::Absent => return Ok(Vec::new()),
            EnvelopeBody::EncodedString(s) => s,
        };

        let inner: InnerEnvelope = serde_json::from_str(encoded)
            .map_err(|e| UpdaterError::Protocol(format!("body envelope: {e}")))?;

        let iv = BASE64
            .decode(inner.iv.as_bytes())
            .map_err(|e| UpdaterError::Protocol(format!("body iv base64: {e}")))?;
        let ciphertext = BASE64
            .decode(inner.cipher.as_bytes())
            .map_err(|e| UpdaterError::Protocol(format!("body cipher base64: {e}")))?;

        aes_ctr_decrypt(key, &iv, &ciphertext)
    }
}

/**
    A decoded update-check response.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseResult {
    pub response_code: i64,
    pub err_msg: String,
    /// Decrypted body bytes. Empty when the server sent no body.
    pub payload: Vec<u8>,
}

/**
    Parse a raw response and decrypt its body with the request's session key.
*/
pub fn decode_response(raw: &[u8], key: &[u8; SESSION_KEY_LEN]) -> UpdaterResult<ResponseResult> {
    let envelope = ResponseEnvelope::parse(raw)?;
    let payload = envelope.decrypt(key)?;
    Ok(ResponseResult {
        response_code: envelope.response_code,
        err_msg: envelope.err_msg,
        payload,
    })
}

#[derive(Serialize)]
struct DisplayEnvelope<'a> {
    #[serde(rename = "responseCode")]
    response_code: i64,
    #[serde(rename = "errMsg")]
    err_msg: &'a str,
    body: Value,
}

impl ResponseResult {
    /**
        The payload for display: the parsed JSON object when the payload is
        one, the payload text otherwise.
    */
    pub fn body_value(&self) -> Value {
        match serde_json::from_slice::<Value>(&self.payload) {
            Ok(value @ Value::Object(_)) => value,
            _ => Value::String(String::from_utf8_lossy(&self.payload).into_owned()),
        }
    }

    fn display(&self) -> DisplayEnvelope<'_> {
        DisplayEnvelope {
            response_code: self.response_code,
            err_msg: &self.err_msg,
            body: self.body_value(),
        }
    }

    /// Compact JSON of code, message and decoded body.
    pub fn to_json(&self) -> UpdaterResult<String> {
        serde_json::to_string(&self.display())
            .map_err(|e| UpdaterError::Serialization(e.to_string()))
    }

    /// Indented JSON of code, message and decoded body.
    pub fn to_pretty_json(&self) -> UpdaterResult<String> {
        serde_json::to_string_pretty(&self.display())
            .map_err(|e| UpdaterError::Serialization(e.to_string()))
    }

    /// Payload as text, replacing invalid UTF-8.
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
