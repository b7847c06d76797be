use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error as ThisError;

/// Every error code the portal SDK can report. This is a flat list; the
/// vendor groups them by module but never reuses a code with a different
/// meaning, so there's no need to nest them here.
///
/// Codes are (de)serialized exactly as the vendor spells them, typos
/// included.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    // General
    #[strum(serialize = "initFailed")]
    InitFailed,
    #[strum(serialize = "unexpectedError")]
    UnexpectedError,
    #[strum(serialize = "sdkNotInitialized")]
    SdkNotInitialized,
    #[strum(serialize = "networkRequestFailed")]
    NetworkRequestFailed,
    #[strum(serialize = "sdkDisabled")]
    SdkDisabled,

    // User
    #[strum(serialize = "userNotAuthenticated")]
    UserNotAuthenticated,
    #[strum(serialize = "missingXsollaConfig")]
    MissingXsollaConfig,
    #[strum(serialize = "notAvailableInStandaloneQaTool")]
    NotAvailableInStandaloneQaTool,
    #[strum(serialize = "invalidScoreFormat")]
    InvalidScoreFormat,
    #[strum(serialize = "showAccountLinkPromptInProgress")]
    ShowAccountLinkPromptInProgress,
    #[strum(serialize = "showAuthPromptInProgress")]
    ShowAuthPromptInProgress,
    #[strum(serialize = "userAlreadySignedIn")]
    UserAlreadySignedIn,
    #[strum(serialize = "userCancelled")]
    UserCancelled,

    // Data
    #[strum(serialize = "dataLimitExcedeed")]
    DataLimitExcedeed,
    #[strum(serialize = "dataModuleDisabled")]
    DataModuleDisabled,

    // Ads and banners
    #[strum(serialize = "unfilled")]
    Unfilled,
    #[strum(serialize = "other")]
    Other,
    #[strum(serialize = "missingId")]
    MissingId,
    #[strum(serialize = "notVisible")]
    NotVisible,
    #[strum(serialize = "notCreated")]
    NotCreated,
    #[strum(serialize = "noAvailableSizes")]
    NoAvailableSizes,
}

/// An error reported by the portal SDK itself. Banner errors also say which
/// banner container they're about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message}")]
pub struct VendorError {
    pub code: ErrorCode,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

impl VendorError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            container_id: None,
        }
    }

    /// Attach the id of the banner container this error relates to
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }
}

/// Anything that can go wrong while talking to the SDK. Nothing here is
/// retried automatically; callers decide what to do.
#[derive(Debug, ThisError)]
pub enum SdkError {
    #[error("SDK is not initialized yet. Call init() and wait for it first.")]
    NotInitialized,
    #[error("SDK is not enabled on this platform")]
    Disabled,
    #[error("Invalid SDK config: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Vendor(#[from] VendorError),
    /// A JS exception that didn't look like a vendor error
    #[error("JS error: {0}")]
    Js(String),
}

impl SdkError {
    /// Map this error onto the vendor's error code taxonomy
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::SdkNotInitialized,
            Self::Disabled => ErrorCode::SdkDisabled,
            Self::InvalidConfig(_) => ErrorCode::InitFailed,
            Self::Vendor(error) => error.code,
            Self::Js(_) => ErrorCode::UnexpectedError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_spelling() {
        for code in [
            ErrorCode::InitFailed,
            ErrorCode::SdkNotInitialized,
            ErrorCode::NotAvailableInStandaloneQaTool,
            ErrorCode::DataLimitExcedeed,
            ErrorCode::NoAvailableSizes,
        ] {
            // strum and serde have to agree
            let name: &'static str = code.into();
            assert_eq!(
                serde_json::to_value(code).unwrap(),
                serde_json::Value::String(name.to_owned())
            );
            assert_eq!(name.parse::<ErrorCode>().unwrap(), code);
        }
        assert_eq!(
            ErrorCode::DataLimitExcedeed.to_string(),
            "dataLimitExcedeed"
        );
    }

    #[test]
    fn test_vendor_error_from_json() {
        let error: VendorError = serde_json::from_str(
            r#"{"code": "missingId", "message": "no id", "containerId": "x"}"#,
        )
        .unwrap();
        assert_eq!(
            error,
            VendorError::new(ErrorCode::MissingId, "no id")
                .with_container("x")
        );
        assert_eq!(error.to_string(), "missingId: no id");
    }

    #[test]
    fn test_sdk_error_code() {
        assert_eq!(
            SdkError::NotInitialized.code(),
            ErrorCode::SdkNotInitialized
        );
        assert_eq!(SdkError::Disabled.code(), ErrorCode::SdkDisabled);
        assert_eq!(
            SdkError::from(VendorError::new(ErrorCode::Unfilled, "")).code(),
            ErrorCode::Unfilled
        );
        assert_eq!(
            SdkError::Js("boom".into()).code(),
            ErrorCode::UnexpectedError
        );
    }
}
