use crate::constants::{DEFAULT_REGION, OTA_VERSION_SUFFIX};
use crate::error::{UpdaterError, UpdaterResult};
use crate::types::{Mode, Region};

/**
    Caller-supplied parameters of one update query.

    Empty strings mean "use the default"; see [`QueryArgs::normalize`].
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pub ota_version: String,
    pub region: String,
    pub model: String,
    pub carrier_id: String,
    pub guid: String,
    pub proxy_url: String,
    pub gray: bool,
    pub mode: Mode,
}

impl QueryArgs {
    pub fn new(ota_version: impl Into<String>) -> Self {
        Self {
            ota_version: ota_version.into(),
            ..Self::default()
        }
    }

    /**
        Reject combinations the server does not serve. Runs before any key
        material is generated.
    */
    pub fn validate(&self) -> UpdaterResult<()> {
        if self.ota_version.trim().is_empty() {
            return Err(UpdaterError::Validation("OTA version is empty".into()));
        }
        if self.gray && self.mode == Mode::Taste {
            return Err(UpdaterError::Validation(
                "mode taste cannot be used together with gray".into(),
            ));
        }
        Ok(())
    }

    /**
        Validate, then fill in defaults:
          - a short OTA version (fewer than three `_` segments *and* fewer
            than three `.` segments) gets the placeholder build suffix
          - an empty region becomes CN
          - an empty model becomes the first `_` segment of the OTA version
    */
    pub fn normalize(self) -> UpdaterResult<NormalizedQuery> {
        self.validate()?;

        let mut ota_version = self.ota_version.trim().to_owned();
        if is_short_ota_version(&ota_version) {
            ota_version.push_str(OTA_VERSION_SUFFIX);
        }

        let region = match self.region.trim() {
            "" => DEFAULT_REGION,
            r => r,
        };
        let region: Region = region.parse()?;

        let model = match self.model.trim() {
            "" => ota_version
                .split('_')
                .next()
                .unwrap_or_default()
                .to_owned(),
            m => m.to_owned(),
        };

        let guid = match self.guid.trim() {
            "" => None,
            g => Some(g.to_lowercase()),
        };
        let carrier_id = match self.carrier_id.trim() {
            "" => None,
            c => Some(c.to_owned()),
        };
        let proxy_url = match self.proxy_url.trim() {
            "" => None,
            p => Some(p.to_owned()),
        };

        Ok(NormalizedQuery {
            ota_version,
            region,
            model,
            carrier_id,
            guid,
            proxy_url,
            gray: self.gray,
            mode: self.mode,
        })
    }
}

/**
    Query arguments after validation and defaulting.
    `None` fields are resolved later from the region table or generated.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub ota_version: String,
    pub region: Region,
    pub model: String,
    pub carrier_id: Option<String>,
    /// Lowercased caller GUID.
    pub guid: Option<String>,
    pub proxy_url: Option<String>,
    pub gray: bool,
    pub mode: Mode,
}

/**
    Parse a request mode, treating an empty or blank string as
    [`Mode::Manual`].
*/
pub fn validate_mode(raw: &str) -> UpdaterResult<Mode> {
    if raw.trim().is_empty() {
        return Ok(Mode::Manual);
    }
    Ok(raw.parse()?)
}

fn is_short_ota_version(ota_version: &str) -> bool {
    ota_version.split('_').count() < 3 && ota_version.split('.').count() < 3
}
