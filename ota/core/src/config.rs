use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{UpdaterError, UpdaterResult};
use crate::types::Region;

/**
    Server parameters for one region, as stored in the region table.
*/
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegionConfig {
    pub host: String,
    /// Alternate host serving gray (staged rollout) builds. CN only.
    #[serde(default)]
    pub gray_host: Option<String>,
    /// RSA public key used to wrap session keys (PEM or bare base64 SPKI).
    pub public_key: String,
    /// Sent as `negotiationVersion`; identifies `public_key` to the server.
    pub public_key_version: String,
    /// Carrier ID used when the query does not name one.
    pub carrier_id: String,
    pub language: String,
    /// Protocol version, sent in the `version` header.
    pub version: String,
}

/**
    Region configuration resolved for one request.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub region: Region,
    pub host: String,
    pub gray: bool,
    pub public_key: String,
    pub public_key_version: String,
    pub carrier_id: String,
    pub language: String,
    pub version: String,
}

/**
    Region table, keyed by region code.

    Loaded from YAML:
    ```yaml
    CN:
      host: component-ota-cn.example
      gray_host: component-ota-gray.example
      public_key: |
        -----BEGIN PUBLIC KEY-----
        ...
      public_key_version: "1615879139745"
      carrier_id: "10010111"
      language: zh-CN
      version: "2"
    ```
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RegionTable {
    regions: BTreeMap<Region, RegionConfig>,
}

impl RegionTable {
    pub fn new(regions: impl IntoIterator<Item = (Region, RegionConfig)>) -> Self {
        Self {
            regions: regions.into_iter().collect(),
        }
    }

    pub fn from_yaml(text: &str) -> UpdaterResult<Self> {
        serde_yaml::from_str(text).map_err(|e| UpdaterError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> UpdaterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UpdaterError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&text)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.keys().copied()
    }

    /**
        Look up the configuration for `region`.

        `gray` selects the region's gray host. Only CN has one; asking for
        gray elsewhere logs a warning and falls back to the regular host.
    */
    pub fn get_config(&self, region: Region, gray: bool) -> UpdaterResult<ResolvedConfig> {
        let config = self.regions.get(&region).ok_or_else(|| {
            UpdaterError::Config(format!("region {region} is not in the region table"))
        })?;

        let (host, gray) = match (gray, &config.gray_host) {
            (true, Some(gray_host)) => (gray_host.clone(), true),
            (true, None) => {
                warn!(%region, "no gray host configured, using the regular host");
                (config.host.clone(), false)
            }
            (false, _) => (config.host.clone(), false),
        };

        Ok(ResolvedConfig {
            region,
            host,
            gray,
            public_key: config.public_key.clone(),
            public_key_version: config.public_key_version.clone(),
            carrier_id: config.carrier_id.clone(),
            language: config.language.clone(),
            version: config.version.clone(),
        })
    }
}
