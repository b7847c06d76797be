//! An in-process SDK, for native builds and tests. Everything succeeds
//! immediately (unless configured otherwise), and state lives in memory.

use crate::{
    module::{
        AdModule, AuthListener, AuthListenerId, BannerModule, DataModule,
        GameModule, LoadedSdk, SdkFuture, UserModule,
    },
    AdCallbacks, AdType, Banner, DeviceType, ErrorCode, InviteParams,
    LinkAccountPromptResult, LinkAccountResponse, LoadCallback, PortalUser,
    SdkBackend, SdkConfig, SdkEnvironment, SdkError, Software, SystemInfo,
    VendorError,
};
use futures::{future, FutureExt};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
};

/// Configuration for [LocalBackend]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Pretend to be an unsupported platform
    pub disabled: bool,
    /// Report a failure instead of loading
    pub fail_load: bool,
    /// Pretend an ad blocker is running
    pub adblock: bool,
    /// Fail every ad request with this code instead of playing it
    pub ad_error: Option<ErrorCode>,
    /// Link to the game. Invite links are built off of this.
    pub game_link: String,
    pub game_id: String,
    /// Parameters the game was "opened" with
    pub invite_params: InviteParams,
    /// The user that the auth prompt logs in
    pub user: PortalUser,
    /// Maximum total size of stored keys and values, in bytes
    pub data_limit: Option<usize>,
    pub data_enabled: bool,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            fail_load: false,
            adblock: false,
            ad_error: None,
            game_link: "http://localhost:8080/".into(),
            game_id: "local".into(),
            invite_params: InviteParams::new(),
            user: PortalUser {
                username: "local_player".into(),
                profile_picture_url: String::new(),
            },
            data_limit: None,
            data_enabled: true,
        }
    }
}

/// A backend that never leaves the process. Loading completes synchronously.
#[derive(Clone, Debug, Default)]
pub struct LocalBackend {
    config: LocalConfig,
}

impl LocalBackend {
    pub fn new(config: LocalConfig) -> Self {
        Self { config }
    }
}

impl SdkBackend for LocalBackend {
    type Sdk = LocalSdk;

    fn is_supported_platform(&self) -> bool {
        !self.config.disabled
    }

    fn load(&self, config: &SdkConfig, on_complete: LoadCallback<LocalSdk>) {
        if self.config.fail_load {
            on_complete(Err(VendorError::new(
                ErrorCode::InitFailed,
                "Local SDK configured to fail",
            )
            .into()));
            return;
        }

        info!(
            "Local SDK initialized (engine {}, version {})",
            config.engine, config.sdk_version
        );
        on_complete(Ok(LocalSdk::new(self.config.clone())));
    }
}

/// The [LoadedSdk] created by [LocalBackend]
#[derive(Debug)]
pub struct LocalSdk {
    ad: LocalAd,
    game: LocalGame,
    user: LocalUser,
    data: LocalData,
    banner: LocalBanner,
}

impl LocalSdk {
    fn new(config: LocalConfig) -> Self {
        Self {
            ad: LocalAd {
                adblock: config.adblock,
                error: config.ad_error,
                played: Cell::new(0),
            },
            game: LocalGame {
                link: config.game_link,
                id: config.game_id,
                invite_params: config.invite_params,
                gameplay: Cell::new(false),
                loading: Cell::new(false),
                happytimes: Cell::new(0),
                invite_button: RefCell::new(None),
            },
            user: LocalUser {
                login_as: config.user,
                current: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                notifying: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                scores: RefCell::new(Vec::new()),
            },
            data: LocalData {
                enabled: config.data_enabled,
                limit: config.data_limit,
                items: RefCell::new(BTreeMap::new()),
            },
            banner: LocalBanner {
                visible: RefCell::new(BTreeSet::new()),
            },
        }
    }

    /// Concrete access to the game module, for inspecting recorded state
    pub fn local_game(&self) -> &LocalGame {
        &self.game
    }

    pub fn local_ad(&self) -> &LocalAd {
        &self.ad
    }

    pub fn local_user(&self) -> &LocalUser {
        &self.user
    }

    pub fn local_banner(&self) -> &LocalBanner {
        &self.banner
    }
}

impl LoadedSdk for LocalSdk {
    fn environment(&self) -> SdkEnvironment {
        SdkEnvironment::Local
    }

    fn is_qa_tool(&self) -> bool {
        false
    }

    fn ad(&self) -> &dyn AdModule {
        &self.ad
    }

    fn game(&self) -> &dyn GameModule {
        &self.game
    }

    fn user(&self) -> &dyn UserModule {
        &self.user
    }

    fn data(&self) -> &dyn DataModule {
        &self.data
    }

    fn banner(&self) -> &dyn BannerModule {
        &self.banner
    }
}

#[derive(Debug)]
pub struct LocalAd {
    adblock: bool,
    error: Option<ErrorCode>,
    played: Cell<u32>,
}

impl LocalAd {
    /// Number of ads that have been played to completion
    pub fn played(&self) -> u32 {
        self.played.get()
    }
}

impl AdModule for LocalAd {
    fn request_ad(&self, ad_type: AdType, callbacks: AdCallbacks) {
        debug!("Playing {} ad", ad_type);
        match self.error {
            Some(code) => {
                (callbacks.error)(VendorError::new(code, "Local ad failed"))
            }
            None => {
                (callbacks.started)();
                self.played.set(self.played.get() + 1);
                (callbacks.finished)();
            }
        }
    }

    fn has_adblock(&self) -> SdkFuture<bool> {
        future::ready(Ok(self.adblock)).boxed_local()
    }
}

#[derive(Debug)]
pub struct LocalGame {
    link: String,
    id: String,
    invite_params: InviteParams,
    gameplay: Cell<bool>,
    loading: Cell<bool>,
    happytimes: Cell<u32>,
    invite_button: RefCell<Option<String>>,
}

impl LocalGame {
    pub fn is_gameplay_active(&self) -> bool {
        self.gameplay.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn happytimes(&self) -> u32 {
        self.happytimes.get()
    }

    /// The link the invite button points to, if it's visible
    pub fn invite_button(&self) -> Option<String> {
        self.invite_button.borrow().clone()
    }
}

impl GameModule for LocalGame {
    fn link(&self) -> String {
        self.link.clone()
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn happytime(&self) {
        self.happytimes.set(self.happytimes.get() + 1);
    }

    fn gameplay_start(&self) {
        self.gameplay.set(true);
    }

    fn gameplay_stop(&self) {
        self.gameplay.set(false);
    }

    fn loading_start(&self) {
        self.loading.set(true);
    }

    fn loading_stop(&self) {
        self.loading.set(false);
    }

    /// Appends each parameter to the game link as-is, with no escaping
    fn invite_link(&self, params: &InviteParams) -> Result<String, SdkError> {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            Ok(self.link.clone())
        } else {
            Ok(format!("{}?{}", self.link, query))
        }
    }

    fn show_invite_button(
        &self,
        params: &InviteParams,
    ) -> Result<String, SdkError> {
        let link = self.invite_link(params)?;
        *self.invite_button.borrow_mut() = Some(link.clone());
        Ok(link)
    }

    fn hide_invite_button(&self) {
        *self.invite_button.borrow_mut() = None;
    }

    fn get_invite_param(&self, name: &str) -> Option<String> {
        self.invite_params.get(name).cloned()
    }

    fn track_xsolla_order(
        &self,
        order: &serde_json::Value,
    ) -> Result<(), SdkError> {
        debug!("Xsolla order: {}", order);
        Ok(())
    }
}

pub struct LocalUser {
    login_as: PortalUser,
    current: RefCell<Option<PortalUser>>,
    listeners: RefCell<Vec<(AuthListenerId, AuthListener)>>,
    /// Listeners that are checked out by an in-progress notification, and
    /// haven't been removed since
    notifying: RefCell<Vec<AuthListenerId>>,
    next_listener_id: Cell<u32>,
    scores: RefCell<Vec<f64>>,
}

impl LocalUser {
    /// Every score submitted so far, in order
    pub fn scores(&self) -> Vec<f64> {
        self.scores.borrow().clone()
    }

    /// Log out, notifying listeners
    pub fn log_out(&self) {
        self.current.borrow_mut().take();
        self.notify();
    }

    fn notify(&self) {
        // Listeners could add or remove listeners, so don't hold the borrow
        // while calling them. Removals of checked-out listeners are tracked
        // in `notifying`.
        let mut listeners = self.listeners.take();
        let ids = listeners.iter().map(|(id, _)| *id).collect();
        let outer = self.notifying.replace(ids);
        let user = self.current.borrow().clone();
        for (id, listener) in &mut listeners {
            if self.notifying.borrow().contains(id) {
                listener(user.as_ref());
            }
        }

        let remaining = self.notifying.replace(outer);
        listeners.retain(|(id, _)| remaining.contains(id));
        let mut current = self.listeners.borrow_mut();
        listeners.append(&mut current);
        *current = listeners;
    }
}

impl std::fmt::Debug for LocalUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalUser")
            .field("current", &self.current)
            .field("listeners", &self.listeners.borrow().len())
            .field("scores", &self.scores)
            .finish()
    }
}

impl UserModule for LocalUser {
    fn is_user_account_available(&self) -> bool {
        true
    }

    fn system_info(&self) -> Result<SystemInfo, SdkError> {
        Ok(SystemInfo {
            country_code: None,
            browser: Software::default(),
            os: Software {
                name: Some(std::env::consts::OS.into()),
                version: None,
            },
            device: DeviceType::Desktop,
        })
    }

    fn show_auth_prompt(&self) -> SdkFuture<Option<PortalUser>> {
        if self.current.borrow().is_some() {
            return future::ready(Err(VendorError::new(
                ErrorCode::UserAlreadySignedIn,
                "User is already signed in",
            )
            .into()))
            .boxed_local();
        }

        *self.current.borrow_mut() = Some(self.login_as.clone());
        self.notify();
        future::ready(Ok(Some(self.login_as.clone()))).boxed_local()
    }

    fn show_account_link_prompt(&self) -> SdkFuture<LinkAccountPromptResult> {
        let response = if self.current.borrow().is_some() {
            LinkAccountResponse::Yes
        } else {
            LinkAccountResponse::No
        };
        future::ready(Ok(LinkAccountPromptResult { response })).boxed_local()
    }

    fn get_user(&self) -> SdkFuture<Option<PortalUser>> {
        future::ready(Ok(self.current.borrow().clone())).boxed_local()
    }

    fn add_auth_listener(&self, listener: AuthListener) -> AuthListenerId {
        let id = AuthListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_auth_listener(&self, id: AuthListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        if listeners.len() != before {
            return true;
        }

        let mut notifying = self.notifying.borrow_mut();
        match notifying.iter().position(|listener_id| *listener_id == id) {
            Some(index) => {
                notifying.remove(index);
                true
            }
            None => false,
        }
    }

    fn get_user_token(&self) -> SdkFuture<Option<String>> {
        let result = match self.current.borrow().as_ref() {
            Some(user) => Ok(Some(format!("local-token-{}", user.username))),
            None => Err(VendorError::new(
                ErrorCode::UserNotAuthenticated,
                "No user is signed in",
            )
            .into()),
        };
        future::ready(result).boxed_local()
    }

    fn get_xsolla_user_token(&self) -> SdkFuture<Option<String>> {
        future::ready(Err(VendorError::new(
            ErrorCode::MissingXsollaConfig,
            "Xsolla is not available locally",
        )
        .into()))
        .boxed_local()
    }

    fn add_score(&self, score: f64) -> Result<(), SdkError> {
        if !score.is_finite() {
            return Err(VendorError::new(
                ErrorCode::InvalidScoreFormat,
                format!("Invalid score: {}", score),
            )
            .into());
        }
        self.scores.borrow_mut().push(score);
        Ok(())
    }

    fn add_score_encrypted(
        &self,
        score: f64,
        encrypted_score_json: &str,
    ) -> Result<(), SdkError> {
        serde_json::from_str::<serde_json::Value>(encrypted_score_json)
            .map_err(|err| {
                VendorError::new(ErrorCode::InvalidScoreFormat, err.to_string())
            })?;
        self.add_score(score)
    }
}

#[derive(Debug)]
pub struct LocalData {
    enabled: bool,
    limit: Option<usize>,
    items: RefCell<BTreeMap<String, String>>,
}

impl LocalData {
    fn check_enabled(&self) -> Result<(), SdkError> {
        if self.enabled {
            Ok(())
        } else {
            Err(VendorError::new(
                ErrorCode::DataModuleDisabled,
                "Data module is disabled",
            )
            .into())
        }
    }
}

impl DataModule for LocalData {
    fn clear(&self) -> Result<(), SdkError> {
        self.check_enabled()?;
        self.items.borrow_mut().clear();
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, SdkError> {
        self.check_enabled()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn remove_item(&self, key: &str) -> Result<(), SdkError> {
        self.check_enabled()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SdkError> {
        self.check_enabled()?;
        let mut items = self.items.borrow_mut();
        if let Some(limit) = self.limit {
            // Total size as it would be after this write
            let size: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum::<usize>()
                + key.len()
                + value.len();
            if size > limit {
                return Err(VendorError::new(
                    ErrorCode::DataLimitExcedeed,
                    format!(
                        "Data would take {} bytes, limit is {}",
                        size, limit
                    ),
                )
                .into());
            }
        }
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug)]
pub struct LocalBanner {
    visible: RefCell<BTreeSet<String>>,
}

impl LocalBanner {
    /// Ids of every container currently showing a banner
    pub fn visible(&self) -> Vec<String> {
        self.visible.borrow().iter().cloned().collect()
    }

    fn show(&self, container_id: &str) -> Result<(), SdkError> {
        if container_id.is_empty() {
            return Err(VendorError::new(
                ErrorCode::MissingId,
                "Banner container id is empty",
            )
            .with_container(container_id)
            .into());
        }
        self.visible.borrow_mut().insert(container_id.to_owned());
        Ok(())
    }
}

impl BannerModule for LocalBanner {
    fn request_banner(&self, banner: &Banner) -> SdkFuture<()> {
        future::ready(self.show(&banner.id)).boxed_local()
    }

    fn request_responsive_banner(&self, container_id: &str) -> SdkFuture<()> {
        future::ready(self.show(container_id)).boxed_local()
    }

    fn clear_banner(&self, container_id: &str) {
        self.visible.borrow_mut().remove(container_id);
    }

    fn clear_all_banners(&self) {
        self.visible.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::rc::Rc;

    fn sdk() -> LocalSdk {
        LocalSdk::new(LocalConfig::default())
    }

    #[test]
    fn test_ad_callbacks() {
        let sdk = sdk();
        let events = Rc::new(RefCell::new(Vec::new()));
        let callbacks = AdCallbacks::default()
            .on_started({
                let events = Rc::clone(&events);
                move || events.borrow_mut().push("started")
            })
            .on_finished({
                let events = Rc::clone(&events);
                move || events.borrow_mut().push("finished")
            });
        sdk.ad().request_ad(AdType::Rewarded, callbacks);
        assert_eq!(*events.borrow(), vec!["started", "finished"]);
        assert_eq!(sdk.local_ad().played(), 1);
    }

    #[test]
    fn test_ad_error() {
        let sdk = LocalSdk::new(LocalConfig {
            ad_error: Some(ErrorCode::Unfilled),
            ..Default::default()
        });
        let error = Rc::new(RefCell::new(None));
        sdk.ad().request_ad(
            AdType::Midgame,
            AdCallbacks::default().on_error({
                let error = Rc::clone(&error);
                move |err| *error.borrow_mut() = Some(err.code)
            }),
        );
        assert_eq!(*error.borrow(), Some(ErrorCode::Unfilled));
        assert_eq!(sdk.local_ad().played(), 0);
    }

    #[test]
    fn test_invite_link() {
        let sdk = sdk();
        let mut params = InviteParams::new();
        params.insert("roomId".into(), "123".into());
        params.insert("mode".into(), "duel".into());

        let link = sdk.game().invite_link(&params).unwrap();
        assert_eq!(link, "http://localhost:8080/?mode=duel&roomId=123");

        sdk.game().show_invite_button(&params).unwrap();
        assert_eq!(sdk.local_game().invite_button(), Some(link));
        sdk.game().hide_invite_button();
        assert_eq!(sdk.local_game().invite_button(), None);
    }

    #[test]
    fn test_auth() {
        let sdk = sdk();
        let user = sdk.user();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = user.add_auth_listener(Box::new({
            let seen = Rc::clone(&seen);
            move |user: Option<&PortalUser>| {
                seen.borrow_mut()
                    .push(user.map(|user| user.username.clone()))
            }
        }));

        assert_eq!(block_on(user.get_user()).unwrap(), None);
        assert_eq!(
            block_on(user.get_user_token()).unwrap_err().code(),
            ErrorCode::UserNotAuthenticated
        );

        let logged_in = block_on(user.show_auth_prompt()).unwrap().unwrap();
        assert_eq!(logged_in.username, "local_player");
        assert_eq!(
            block_on(user.show_auth_prompt()).unwrap_err().code(),
            ErrorCode::UserAlreadySignedIn
        );
        assert_eq!(
            block_on(user.get_user_token()).unwrap(),
            Some("local-token-local_player".into())
        );

        sdk.local_user().log_out();
        assert!(user.remove_auth_listener(id));
        assert!(!user.remove_auth_listener(id));
        assert_eq!(
            *seen.borrow(),
            vec![Some("local_player".to_owned()), None]
        );
    }

    #[test]
    fn test_auth_listener_removes_itself() {
        let sdk = Rc::new(sdk());
        let id = Rc::new(Cell::new(None));
        let removed = Rc::new(RefCell::new(Vec::new()));
        let other_calls = Rc::new(Cell::new(0));

        let listener_id = sdk.local_user().add_auth_listener(Box::new({
            let sdk = Rc::clone(&sdk);
            let id = Rc::clone(&id);
            let removed = Rc::clone(&removed);
            move |_: Option<&PortalUser>| {
                if let Some(id) = id.get() {
                    removed
                        .borrow_mut()
                        .push(sdk.local_user().remove_auth_listener(id));
                }
            }
        }));
        id.set(Some(listener_id));
        sdk.local_user().add_auth_listener(Box::new({
            let other_calls = Rc::clone(&other_calls);
            move |_: Option<&PortalUser>| {
                other_calls.set(other_calls.get() + 1)
            }
        }));

        block_on(sdk.local_user().show_auth_prompt()).unwrap();
        sdk.local_user().log_out();

        // Only called once, and the removal stuck
        assert_eq!(*removed.borrow(), vec![true]);
        assert!(!sdk.local_user().remove_auth_listener(listener_id));
        assert_eq!(other_calls.get(), 2);
    }

    #[test]
    fn test_scores() {
        let sdk = sdk();
        sdk.user().add_score(10.0).unwrap();
        assert_eq!(
            sdk.user().add_score(f64::NAN).unwrap_err().code(),
            ErrorCode::InvalidScoreFormat
        );
        assert_eq!(
            sdk.user()
                .add_score_encrypted(5.0, "not json")
                .unwrap_err()
                .code(),
            ErrorCode::InvalidScoreFormat
        );
        sdk.user()
            .add_score_encrypted(5.0, r#"{"iv": "abc"}"#)
            .unwrap();
        assert_eq!(sdk.local_user().scores(), vec![10.0, 5.0]);
    }

    #[test]
    fn test_data_limit() {
        let sdk = LocalSdk::new(LocalConfig {
            data_limit: Some(10),
            ..Default::default()
        });
        let data = sdk.data();
        data.set_item("key", "value").unwrap(); // 8 bytes
        // Overwriting doesn't count the old value
        data.set_item("key", "value12").unwrap(); // 10 bytes
        assert_eq!(
            data.set_item("k", "v").unwrap_err().code(),
            ErrorCode::DataLimitExcedeed
        );
        assert_eq!(data.get_item("key").unwrap(), Some("value12".into()));
        assert_eq!(data.get_item("k").unwrap(), None);

        data.remove_item("key").unwrap();
        data.set_item("k", "v").unwrap();
        data.clear().unwrap();
        assert_eq!(data.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_data_disabled() {
        let sdk = LocalSdk::new(LocalConfig {
            data_enabled: false,
            ..Default::default()
        });
        assert_eq!(
            sdk.data().get_item("key").unwrap_err().code(),
            ErrorCode::DataModuleDisabled
        );
    }

    #[test]
    fn test_banners() {
        let sdk = sdk();
        let banner = Banner {
            id: "top".into(),
            width: 728,
            height: 90,
        };
        block_on(sdk.banner().request_banner(&banner)).unwrap();
        block_on(sdk.banner().request_responsive_banner("side")).unwrap();
        assert_eq!(sdk.local_banner().visible(), vec!["side", "top"]);

        let err = block_on(sdk.banner().request_responsive_banner(""))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingId);

        sdk.banner().clear_banner("top");
        assert_eq!(sdk.local_banner().visible(), vec!["side"]);
        sdk.banner().clear_all_banners();
        assert!(sdk.local_banner().visible().is_empty());
    }
}
