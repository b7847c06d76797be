//! A single facade over a games portal SDK (CrazyGames-style) that is loaded
//! at runtime. The facade makes sure the SDK gets loaded and initialized
//! exactly once, no matter how many callers ask for it concurrently, and
//! exposes the SDK's modules (ads, game, user, data, banners) through traits.
//!
//! Where the SDK actually comes from is up to a [SdkBackend]:
//! - [LocalBackend] is an in-process stand-in, for native builds and tests
//! - `ScriptBackend` (feature `js`) injects the vendor's script into the
//!   browser page

mod config;
mod error;
mod facade;
pub mod gate;
#[cfg(feature = "js")]
mod js;
mod local;
pub mod module;
mod types;

pub use crate::{
    config::SdkConfig,
    error::{ErrorCode, SdkError, VendorError},
    facade::{LoadCallback, PlatformSdk, SdkBackend, SdkHandle},
    gate::{InitGate, InitState, InitWaiter},
    local::{
        LocalAd, LocalBackend, LocalBanner, LocalConfig, LocalData, LocalGame,
        LocalSdk, LocalUser,
    },
    module::{
        AdModule, AuthListener, AuthListenerId, BannerModule, DataModule,
        GameModule, LoadedSdk, SdkFuture, UserModule,
    },
    types::{
        AdCallbacks, AdType, Banner, DeviceType, InviteParams,
        LinkAccountPromptResult, LinkAccountResponse, PortalUser,
        SdkEnvironment, Software, SystemInfo,
    },
};
#[cfg(feature = "js")]
pub use crate::js::{
    ScriptAd, ScriptBackend, ScriptBanner, ScriptData, ScriptGame, ScriptSdk,
    ScriptUser,
};
pub use validator;
