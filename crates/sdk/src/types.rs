//! Plain data types shared with the portal SDK. These serialize to the same
//! JSON shapes the vendor uses.

use crate::VendorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString, IntoStaticStr};

/// Where the game is currently running, according to the SDK
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SdkEnvironment {
    CrazyGames,
    Yandex,
    Facebook,
    Local,
    Disabled,
    #[default]
    Uninitialized,
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdType {
    /// A short ad between levels or rounds
    Midgame,
    /// An ad that the player opts into, in exchange for a reward
    Rewarded,
}

/// Hooks invoked over the lifecycle of a single ad request. Either `error`
/// or `finished` is called at the end, never both.
pub struct AdCallbacks {
    pub started: Box<dyn FnOnce()>,
    pub error: Box<dyn FnOnce(VendorError)>,
    pub finished: Box<dyn FnOnce()>,
}

impl AdCallbacks {
    pub fn on_started(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.started = Box::new(callback);
        self
    }

    pub fn on_error(
        mut self,
        callback: impl FnOnce(VendorError) + 'static,
    ) -> Self {
        self.error = Box::new(callback);
        self
    }

    pub fn on_finished(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.finished = Box::new(callback);
        self
    }
}

impl Default for AdCallbacks {
    fn default() -> Self {
        Self {
            started: Box::new(|| {}),
            error: Box::new(|_| {}),
            finished: Box::new(|| {}),
        }
    }
}

impl std::fmt::Debug for AdCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdCallbacks").finish_non_exhaustive()
    }
}

/// A logged-in portal user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalUser {
    pub username: String,
    pub profile_picture_url: String,
}

/// Answer to the account link prompt
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinkAccountResponse {
    Yes,
    No,
}

/// The vendor wraps [LinkAccountResponse] in an object
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAccountPromptResult {
    pub response: LinkAccountResponse,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

/// What the SDK knows about the player's system
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub country_code: Option<String>,
    pub browser: Software,
    pub os: Software,
    pub device: DeviceType,
}

/// A fixed-size display banner, rendered into the page element with the given
/// id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// Query parameters for invite links. Sorted, so generated links are stable.
pub type InviteParams = BTreeMap<String, String>;
