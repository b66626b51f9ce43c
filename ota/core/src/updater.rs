use std::time::Duration;

use tracing::{debug, info};

use crate::config::{RegionTable, ResolvedConfig};
use crate::envelope::{HeaderFields, OutboundRequest, build_body, build_headers};
use crate::error::UpdaterResult;
use crate::query::{NormalizedQuery, QueryArgs};
use crate::request::build_outbound;
use crate::response::{ResponseResult, decode_response};
use crate::session::{SessionMaterial, generate_device_id};
use crate::transport::{HttpTransport, Transport};
use crate::utils::unix_millis;
use crate::wrap::wrap_key;

/**
    A fully assembled update query, holding the session material needed to
    decode its answer.

    Sending consumes it, so a retry has to go through [`prepare_query`]
    again and gets fresh key material.
*/
#[derive(Debug)]
pub struct PreparedQuery {
    pub query: NormalizedQuery,
    pub config: ResolvedConfig,
    pub request: OutboundRequest,
    material: SessionMaterial,
}

/**
    Run every stage up to, but not including, the network call:

      NORMALIZE     validate and default the arguments
      CONFIGURE     resolve host, key and carrier for the region
      GENERATE_KEYS fresh session key/IV, header device id, GUID if needed
      WRAP_KEY      RSA-wrap the session key
      BUILD_REQUEST encrypt the query, assemble headers and body

    Validation failures return before any key material is drawn.
*/
pub fn prepare_query(args: QueryArgs, table: &RegionTable) -> UpdaterResult<PreparedQuery> {
    let query = args.normalize()?;
    debug!(
        ota_version = %query.ota_version,
        model = %query.model,
        region = %query.region,
        mode = %query.mode,
        "normalized query"
    );

    let config = table.get_config(query.region, query.gray)?;
    debug!(host = %config.host, gray = config.gray, "resolved region config");

    let material = SessionMaterial::generate()?;
    let device_id = generate_device_id()?;
    let guid = match &query.guid {
        Some(guid) => guid.clone(),
        None => generate_device_id()?,
    };

    let protected_key = wrap_key(material.key(), &config.public_key)?
        .into_header(config.public_key_version.clone());
    debug!(scheme_version = %protected_key.scene.version, "wrapped session key");

    let params = build_outbound(&material, &guid, unix_millis())?;
    let carrier_id = query.carrier_id.as_deref().unwrap_or(&config.carrier_id);
    let headers = build_headers(
        &HeaderFields {
            language: &config.language,
            ota_version: &query.ota_version,
            model: &query.model,
            mode: query.mode,
            carrier_id,
            version: &config.version,
            device_id: &device_id,
        },
        &protected_key,
    )?;
    let body = build_body(&params)?;

    let request = OutboundRequest {
        host: config.host.clone(),
        headers,
        body,
    };
    debug!(url = %request.url(), headers = request.headers.len(), "built request");

    Ok(PreparedQuery {
        query,
        config,
        request,
        material,
    })
}

impl PreparedQuery {
    /**
        SEND, RECEIVE and DECRYPT. The response is decrypted with this
        query's own session key.
    */
    pub async fn send<T: Transport>(self, transport: &T) -> UpdaterResult<ResponseResult> {
        let raw = transport.post(&self.request).await?;
        let result = decode_response(&raw, self.material.key())?;
        info!(
            response_code = result.response_code,
            err_msg = %result.err_msg,
            payload_len = result.payload.len(),
            "update query complete"
        );
        Ok(result)
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.query.proxy_url.as_deref()
    }
}

/**
    Run one update query end-to-end over `transport`.
*/
pub async fn query_update<T: Transport>(
    args: QueryArgs,
    table: &RegionTable,
    transport: &T,
) -> UpdaterResult<ResponseResult> {
    prepare_query(args, table)?.send(transport).await
}

/**
    Run one update query over HTTPS, using the proxy named in `args`.
*/
pub async fn query_update_http(
    args: QueryArgs,
    table: &RegionTable,
    timeout: Duration,
) -> UpdaterResult<ResponseResult> {
    let prepared = prepare_query(args, table)?;
    let transport = HttpTransport::new(prepared.proxy_url(), timeout)?;
    prepared.send(&transport).await
}
