/**
    Path of the update-check endpoint on every regional host.
*/
pub const UPDATE_PATH: &str = "/update/v5";

/**
    Suffix appended to short OTA versions so the server accepts them.
    Fills in the build number and a 1970 build timestamp.
*/
pub const OTA_VERSION_SUFFIX: &str = ".01_0001_197001010000";

/// Region used when none is given.
pub const DEFAULT_REGION: &str = "CN";

/**
    Scene identifier keying the `protectedKey` header blob.
*/
pub const PROTECTED_KEY_SCENE: &str = "SCENE_1";

/// AES-256 key length in bytes.
pub const SESSION_KEY_LEN: usize = 32;

/// AES block length in bytes, and so the IV length.
pub const SESSION_IV_LEN: usize = 16;

/// Length of generated device identifiers, in random bytes (hex doubles it).
pub const DEVICE_ID_LEN: usize = 32;

/**
    Placeholder values for the device/OS headers. The server does not check
    them against a real device.
*/
pub const PLACEHOLDER_ANDROID_VERSION: &str = "unknown";
pub const PLACEHOLDER_COLOROS_VERSION: &str = "unknown";
pub const PLACEHOLDER_ROM_VERSION: &str = "unknown";

pub const INF_VERSION: &str = "1";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
