//! Test fixtures: a throwaway RSA key pair and an in-process update server.

use std::sync::{LazyLock, Mutex};

use data_encoding::BASE64;
use rsa::{
    RsaPrivateKey,
    oaep::DecryptingKey,
    pkcs8::{EncodePublicKey, LineEnding},
    traits::Decryptor,
};
use serde::Deserialize;
use serde_json::json;
use sha1::Sha1;

use crate::constants::{SESSION_IV_LEN, SESSION_KEY_LEN};
use crate::crypto::aes::aes_ctr_apply;
use crate::crypto::random::random_bytes;
use crate::envelope::{OutboundRequest, ProtectedKeyHeader};
use crate::error::UpdaterResult;
use crate::request::RequestBody;
use crate::transport::Transport;

// 1024 bits keeps key generation fast in debug builds.
static TEST_KEY: LazyLock<RsaPrivateKey> = LazyLock::new(|| {
    RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 1024).expect("RSA key generation")
});

pub(crate) fn test_private_key() -> RsaPrivateKey {
    TEST_KEY.clone()
}

pub(crate) fn test_public_key_pem() -> String {
    TEST_KEY
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("PEM encoding")
}

/// Reverse of the key wrap, as the server performs it.
pub(crate) fn unwrap_protected_key(protected_key: &str) -> [u8; SESSION_KEY_LEN] {
    let ciphertext = BASE64.decode(protected_key.as_bytes()).unwrap();
    let encoded_key = DecryptingKey::<Sha1>::new(test_private_key())
        .decrypt(&ciphertext)
        .unwrap();
    BASE64
        .decode(&encoded_key)
        .unwrap()
        .try_into()
        .expect("32-byte session key")
}

pub(crate) const REGION_TABLE_TEMPLATE: &str = r#"
CN:
  host: cn.test
  gray_host: gray.test
  public_key_version: "1615879139745"
  carrier_id: "10010111"
  language: zh-CN
  version: "2"
EU:
  host: eu.test
  public_key_version: "1615897067573"
  carrier_id: "01000100"
  language: en-GB
  version: "2"
"#;

/// Region table for CN and EU using the test key.
pub(crate) fn test_region_table() -> crate::config::RegionTable {
    let pem = test_public_key_pem().replace('\n', "\\n");
    let yaml = REGION_TABLE_TEMPLATE.replace(
        "  public_key_version",
        &format!("  public_key: \"{pem}\"\n  public_key_version"),
    );
    crate::config::RegionTable::from_yaml(&yaml).unwrap()
}

#[derive(Deserialize)]
struct OuterBody {
    params: String,
}

/**
    What the fake server saw in one request.
*/
#[derive(Debug, Clone)]
pub(crate) struct Received {
    pub request: OutboundRequest,
    pub session_key: [u8; SESSION_KEY_LEN],
    pub query: serde_json::Value,
}

/**
    Fake update server: recovers the session key from `protectedKey`,
    decrypts the query, and answers `reply` sealed under that same key.
*/
pub(crate) struct EchoServer {
    reply: Vec<u8>,
    pub received: Mutex<Vec<Received>>,
}

impl EchoServer {
    pub fn new(reply: &[u8]) -> Self {
        Self {
            reply: reply.to_vec(),
            received: Mutex::new(Vec::new()),
        }
    }

    fn handle(&self, request: &OutboundRequest) -> Vec<u8> {
        let header: ProtectedKeyHeader =
            serde_json::from_str(request.headers.get("protectedKey").unwrap()).unwrap();
        let session_key = unwrap_protected_key(&header.scene.protected_key);

        let outer: OuterBody = serde_json::from_str(&request.body).unwrap();
        let body: RequestBody = serde_json::from_str(&outer.params).unwrap();
        let iv: [u8; SESSION_IV_LEN] = BASE64
            .decode(body.iv.as_bytes())
            .unwrap()
            .try_into()
            .unwrap();
        let ciphertext = BASE64.decode(body.cipher.as_bytes()).unwrap();
        let query = serde_json::from_slice(&aes_ctr_apply(&session_key, &iv, &ciphertext)).unwrap();

        self.received.lock().unwrap().push(Received {
            request: request.clone(),
            session_key,
            query,
        });

        let reply_iv: [u8; SESSION_IV_LEN] = random_bytes().unwrap();
        let sealed = json!({
            "iv": BASE64.encode(&reply_iv),
            "cipher": BASE64.encode(&aes_ctr_apply(&session_key, &reply_iv, &self.reply)),
        });
        json!({ "responseCode": 200, "errMsg": "success", "body": sealed.to_string() })
            .to_string()
            .into_bytes()
    }
}

impl Transport for EchoServer {
    async fn post(&self, request: &OutboundRequest) -> UpdaterResult<Vec<u8>> {
        Ok(self.handle(request))
    }
}

/**
    Transport that fails the test if it is ever reached.
*/
pub(crate) struct UnreachableTransport;

impl Transport for UnreachableTransport {
    async fn post(&self, _request: &OutboundRequest) -> UpdaterResult<Vec<u8>> {
        panic!("transport must not be reached");
    }
}

/**
    Transport returning a fixed response, whatever was sent.
*/
pub(crate) struct CannedTransport(pub Vec<u8>);

impl Transport for CannedTransport {
    async fn post(&self, _request: &OutboundRequest) -> UpdaterResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}
