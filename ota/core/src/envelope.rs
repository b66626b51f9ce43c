use serde::{Deserialize, Serialize};

use crate::constants::{
    CONTENT_TYPE, INF_VERSION, PLACEHOLDER_ANDROID_VERSION, PLACEHOLDER_COLOROS_VERSION,
    PLACEHOLDER_ROM_VERSION, UPDATE_PATH,
};
use crate::error::{UpdaterError, UpdaterResult};
use crate::types::Mode;

/**
    The wrapped session key as the server expects it in the `protectedKey`
    header.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedKey {
    #[serde(rename = "protectedKey")]
    pub protected_key: String,
    pub version: String,
    #[serde(rename = "negotiationVersion")]
    pub negotiation_version: String,
}

/**
    The `protectedKey` header value: a single record under the fixed
    `SCENE_1` scene identifier.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedKeyHeader {
    #[serde(rename = "SCENE_1")]
    pub scene: ProtectedKey,
}

impl ProtectedKeyHeader {
    pub fn to_json(&self) -> UpdaterResult<String> {
        serde_json::to_string(self).map_err(|e| UpdaterError::Serialization(e.to_string()))
    }
}

/**
    Ordered request headers.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(&'static str, String)>);

impl Headers {
    fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/**
    Per-request values that end up in the header set.
*/
#[derive(Debug, Clone)]
pub struct HeaderFields<'a> {
    pub language: &'a str,
    pub ota_version: &'a str,
    pub model: &'a str,
    pub mode: Mode,
    pub carrier_id: &'a str,
    pub version: &'a str,
    pub device_id: &'a str,
}

/**
    Build the header set. The device/OS headers are fixed placeholders.
*/
pub fn build_headers(
    fields: &HeaderFields<'_>,
    protected_key: &ProtectedKeyHeader,
) -> UpdaterResult<Headers> {
    let mut headers = Headers::default();
    headers.push("language", fields.language);
    headers.push("androidVersion", PLACEHOLDER_ANDROID_VERSION);
    headers.push("colorOSVersion", PLACEHOLDER_COLOROS_VERSION);
    headers.push("romVersion", PLACEHOLDER_ROM_VERSION);
    headers.push("otaVersion", fields.ota_version);
    headers.push("model", fields.model);
    headers.push("mode", fields.mode.to_name());
    headers.push("nvCarrier", fields.carrier_id);
    headers.push("infVersion", INF_VERSION);
    headers.push("version", fields.version);
    headers.push("deviceId", fields.device_id);
    headers.push("Content-Type", CONTENT_TYPE);
    headers.push("protectedKey", protected_key.to_json()?);
    Ok(headers)
}

#[derive(Serialize)]
struct OuterBody<'a> {
    params: &'a str,
}

/**
    Wrap the outbound envelope JSON as a string under `params`.
*/
pub fn build_body(params: &str) -> UpdaterResult<String> {
    serde_json::to_string(&OuterBody { params })
        .map_err(|e| UpdaterError::Serialization(e.to_string()))
}

/**
    Everything the transport needs to send one update query.
*/
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub host: String,
    pub headers: Headers,
    pub body: String,
}

impl OutboundRequest {
    pub fn url(&self) -> String {
        format!("https://{}{UPDATE_PATH}", self.host)
    }
}
