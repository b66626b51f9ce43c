#![allow(clippy::doc_overindented_list_items)]

mod config;
mod constants;
mod crypto;
mod envelope;
mod error;
mod query;
mod request;
mod response;
mod session;
mod transport;
mod types;
mod updater;
mod utils;
mod wrap;

#[cfg(test)]
mod testing;

pub use self::config::{RegionConfig, RegionTable, ResolvedConfig};
pub use self::constants::{OTA_VERSION_SUFFIX, PROTECTED_KEY_SCENE, UPDATE_PATH};
pub use self::envelope::{
    HeaderFields, Headers, OutboundRequest, ProtectedKey, ProtectedKeyHeader, build_body,
    build_headers,
};
pub use self::error::{ParseError, UpdaterError, UpdaterResult};
pub use self::query::{NormalizedQuery, QueryArgs, validate_mode};
pub use self::request::{Opex, QueryDocument, RequestBody, build_outbound};
pub use self::response::{EnvelopeBody, ResponseEnvelope, ResponseResult, decode_response};
pub use self::session::{SessionMaterial, generate_device_id, generate_scheme_version};
pub use self::transport::{DEFAULT_TIMEOUT, HttpTransport, Transport};
pub use self::types::{Mode, Region};
pub use self::updater::{PreparedQuery, prepare_query, query_update, query_update_http};
pub use self::wrap::{WrappedKey, wrap_key};
