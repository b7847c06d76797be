use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationError};

/// Configuration for loading the portal SDK
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SdkConfig {
    /// Where the SDK script is hosted
    #[validate(custom = "validate_script_url")]
    pub script_url: String,

    /// Engine name reported to the vendor as part of the wrapper info
    #[validate(length(min = 1))]
    pub engine: String,

    /// Wrapper version reported to the vendor
    #[validate(length(min = 1))]
    pub sdk_version: String,
}

impl SdkConfig {
    pub const DEFAULT_SCRIPT_URL: &'static str =
        "https://sdk.crazygames.com/crazygames-sdk-v3.js";

    /// The options object passed to the vendor's `init` function
    pub fn init_options(&self) -> serde_json::Value {
        json!({
            "wrapper": {
                "engine": self.engine,
                "sdkVersion": self.sdk_version,
            }
        })
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            script_url: Self::DEFAULT_SCRIPT_URL.into(),
            engine: "wasm".into(),
            sdk_version: "2.0.0".into(),
        }
    }
}

fn validate_script_url(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ValidationError::new("script_url"))
    }
}
