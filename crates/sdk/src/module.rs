//! The capabilities a loaded SDK exposes. Each backend implements these once;
//! consumers only ever see the traits.
//!
//! Asynchronous operations return a [LocalBoxFuture]. Everything here is
//! single-threaded, so none of these futures are `Send`.

use crate::{
    AdCallbacks, AdType, Banner, InviteParams, LinkAccountPromptResult,
    PortalUser, SdkEnvironment, SdkError, SystemInfo,
};
use futures::future::LocalBoxFuture;

pub type SdkFuture<T> = LocalBoxFuture<'static, Result<T, SdkError>>;

/// A fully loaded and initialized SDK
pub trait LoadedSdk {
    fn environment(&self) -> SdkEnvironment;
    /// Is the game running inside the vendor's QA tool?
    fn is_qa_tool(&self) -> bool;
    fn ad(&self) -> &dyn AdModule;
    fn game(&self) -> &dyn GameModule;
    fn user(&self) -> &dyn UserModule;
    fn data(&self) -> &dyn DataModule;
    fn banner(&self) -> &dyn BannerModule;
}

pub trait AdModule {
    /// Show a video ad. Progress is reported through the callbacks.
    fn request_ad(&self, ad_type: AdType, callbacks: AdCallbacks);

    fn has_adblock(&self) -> SdkFuture<bool>;
}

/// Game lifecycle signals, plus invite links
pub trait GameModule {
    /// Link to the game's page on the portal
    fn link(&self) -> String;
    fn id(&self) -> String;

    /// Signal a moment of player delight (e.g. a level was beaten)
    fn happytime(&self);
    fn gameplay_start(&self);
    fn gameplay_stop(&self);
    fn loading_start(&self);
    fn loading_stop(&self);

    /// Build a link that opens the game with the given parameters
    fn invite_link(&self, params: &InviteParams) -> Result<String, SdkError>;
    /// Show the portal's invite button, returning the link it points to
    fn show_invite_button(
        &self,
        params: &InviteParams,
    ) -> Result<String, SdkError>;
    fn hide_invite_button(&self);
    /// Read a parameter from the invite link the game was opened with, if any
    fn get_invite_param(&self, name: &str) -> Option<String>;

    fn track_xsolla_order(
        &self,
        order: &serde_json::Value,
    ) -> Result<(), SdkError>;
}

/// Called whenever the player logs in or out. `None` means logged out.
pub type AuthListener = Box<dyn FnMut(Option<&PortalUser>)>;

/// Handle for removing an [AuthListener]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthListenerId(pub u32);

pub trait UserModule {
    fn is_user_account_available(&self) -> bool;
    fn system_info(&self) -> Result<SystemInfo, SdkError>;

    /// Ask the player to log in. Resolves to the user, or `None` if they
    /// didn't.
    fn show_auth_prompt(&self) -> SdkFuture<Option<PortalUser>>;
    fn show_account_link_prompt(&self) -> SdkFuture<LinkAccountPromptResult>;
    fn get_user(&self) -> SdkFuture<Option<PortalUser>>;

    fn add_auth_listener(&self, listener: AuthListener) -> AuthListenerId;
    /// Returns `false` if no listener had that id
    fn remove_auth_listener(&self, id: AuthListenerId) -> bool;

    fn get_user_token(&self) -> SdkFuture<Option<String>>;
    fn get_xsolla_user_token(&self) -> SdkFuture<Option<String>>;

    fn add_score(&self, score: f64) -> Result<(), SdkError>;
    fn add_score_encrypted(
        &self,
        score: f64,
        encrypted_score_json: &str,
    ) -> Result<(), SdkError>;
}

/// Key/value storage with the same semantics as `window.localStorage`
pub trait DataModule {
    fn clear(&self) -> Result<(), SdkError>;
    fn get_item(&self, key: &str) -> Result<Option<String>, SdkError>;
    fn remove_item(&self, key: &str) -> Result<(), SdkError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SdkError>;
}

pub trait BannerModule {
    fn request_banner(&self, banner: &Banner) -> SdkFuture<()>;
    /// Fill the given container with a banner sized to fit it
    fn request_responsive_banner(&self, container_id: &str) -> SdkFuture<()>;
    fn clear_banner(&self, container_id: &str);
    fn clear_all_banners(&self);
}
