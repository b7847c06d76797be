//! Demo components that exercise the SDK from host lifecycle hooks. The
//! logic is generic over the backend and the host's widgets, so it can run
//! against [hexlay_sdk::LocalBackend] natively; the `Js*` types at the bottom
//! bind it to the browser.

use crate::Sdk;
use futures::{future::LocalBoxFuture, FutureExt};
use hexlay_sdk::{
    AdCallbacks, AdType, GameModule, InviteParams, PortalUser, ScriptBackend,
    SdkBackend, SdkError, SdkHandle,
};
use log::{error, info, warn};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// A widget that displays a line of text
pub trait TextLabel {
    fn set_text(&self, text: &str);
}

/// The host's scene manager
pub trait SceneDirector {
    fn load_scene(&self, name: &str);
}

pub struct SdkDemoLabels<L> {
    pub supported_platform: L,
    pub environment: L,
    pub adblock_usage: L,
    pub invite_link: L,
}

/// Shows off each SDK module. Every button handler logs failures instead of
/// propagating them, the same way a game would.
pub struct SdkDemo<B: SdkBackend, L> {
    sdk: SdkHandle<B>,
    labels: Rc<SdkDemoLabels<L>>,
}

impl<B: SdkBackend, L> Clone for SdkDemo<B, L> {
    fn clone(&self) -> Self {
        Self {
            sdk: Rc::clone(&self.sdk),
            labels: Rc::clone(&self.labels),
        }
    }
}

impl<B, L> SdkDemo<B, L>
where
    B: SdkBackend + 'static,
    L: TextLabel + 'static,
{
    pub fn new(sdk: SdkHandle<B>, labels: SdkDemoLabels<L>) -> Self {
        Self {
            sdk,
            labels: Rc::new(labels),
        }
    }

    /// Show whether the platform is supported, then initialize the SDK and
    /// show the environment it reports
    pub fn on_load(&self) -> LocalBoxFuture<'static, ()> {
        let supported = self.sdk.is_supported_platform();
        self.labels.supported_platform.set_text(&format!(
            "Supported platform: {}",
            if supported { "yes" } else { "no" }
        ));

        let this = self.clone();
        async move {
            if !supported {
                return;
            }
            let result: Result<_, SdkError> = async {
                this.sdk.init()?.await?;
                this.sdk.environment()
            }
            .await;
            match result {
                Ok(environment) => this
                    .labels
                    .environment
                    .set_text(&format!("Environment: {}", environment)),
                Err(err) => error!("Initialization failed {}", err),
            }
        }
        .boxed_local()
    }

    pub fn show_rewarded_video(&self) {
        self.request_ad(AdType::Rewarded, "Rewarded video");
    }

    pub fn show_ad_break_video(&self) {
        self.request_ad(AdType::Midgame, "Ad break video");
    }

    fn request_ad(&self, ad_type: AdType, name: &'static str) {
        let ad = match self.sdk.ad() {
            Ok(ad) => ad,
            Err(err) => {
                error!("{} failed: {}", name, err);
                return;
            }
        };
        ad.request_ad(
            ad_type,
            AdCallbacks::default()
                .on_started(move || info!("{} started", name))
                .on_error(move |err| info!("{} error {}", name, err))
                .on_finished(move || info!("{} finished", name)),
        );
    }

    pub fn check_adblock_usage(&self) -> LocalBoxFuture<'static, ()> {
        let this = self.clone();
        async move {
            let result: Result<bool, SdkError> =
                async { this.sdk.ad()?.has_adblock().await }.await;
            match result {
                Ok(adblock) => this.labels.adblock_usage.set_text(&format!(
                    "Adblock: {}",
                    if adblock { "on" } else { "off" }
                )),
                Err(err) => {
                    this.labels.adblock_usage.set_text("Adblock check failed");
                    error!("Adblock check failed {}", err);
                }
            }
        }
        .boxed_local()
    }

    fn with_game(&self, action: &str, f: impl FnOnce(&dyn GameModule)) {
        match self.sdk.game() {
            Ok(game) => f(game),
            Err(err) => error!("{} failed: {}", action, err),
        }
    }

    pub fn gameplay_start(&self) {
        self.with_game("Gameplay start", |game| game.gameplay_start());
    }

    pub fn gameplay_stop(&self) {
        self.with_game("Gameplay stop", |game| game.gameplay_stop());
    }

    pub fn loading_start(&self) {
        self.with_game("Loading start", |game| game.loading_start());
    }

    pub fn loading_stop(&self) {
        self.with_game("Loading stop", |game| game.loading_stop());
    }

    pub fn happytime(&self) {
        self.with_game("Happytime", |game| game.happytime());
    }

    /// Build an invite link to room 123 and show it
    pub fn invite_link(&self) {
        let mut params = InviteParams::new();
        params.insert("roomId".into(), "123".into());
        match self.sdk.game().and_then(|game| game.invite_link(&params)) {
            Ok(link) => self.labels.invite_link.set_text(&link),
            Err(err) => error!("Invite link failed: {}", err),
        }
    }

    pub fn get_user(
        &self,
    ) -> LocalBoxFuture<'static, Result<Option<PortalUser>, SdkError>> {
        let this = self.clone();
        async move {
            let user = this.sdk.user()?.get_user().await?;
            info!("User retrieved: {}", user_json(&user));
            Ok(user)
        }
        .boxed_local()
    }

    pub fn show_auth_prompt(
        &self,
    ) -> LocalBoxFuture<'static, Result<Option<PortalUser>, SdkError>> {
        let this = self.clone();
        async move {
            let user = this.sdk.user()?.show_auth_prompt().await?;
            info!("Auth prompt result: {}", user_json(&user));
            Ok(user)
        }
        .boxed_local()
    }
}

fn user_json(user: &Option<PortalUser>) -> String {
    serde_json::to_string(user).unwrap_or_else(|err| err.to_string())
}

/// Initializes the SDK, then moves on to the next scene
pub struct LoadSceneDemo<B: SdkBackend, D> {
    sdk: SdkHandle<B>,
    director: Rc<D>,
    next_scene_name: String,
}

impl<B, D> LoadSceneDemo<B, D>
where
    B: SdkBackend + 'static,
    D: SceneDirector + 'static,
{
    pub fn new(
        sdk: SdkHandle<B>,
        director: D,
        next_scene_name: String,
    ) -> Self {
        Self {
            sdk,
            director: Rc::new(director),
            next_scene_name,
        }
    }

    pub fn start(&self) -> LocalBoxFuture<'static, ()> {
        let sdk = Rc::clone(&self.sdk);
        let director = Rc::clone(&self.director);
        let next_scene_name = self.next_scene_name.clone();
        async move {
            let result: Result<(), SdkError> =
                async { sdk.init()?.await }.await;
            match result {
                Ok(()) => {
                    load_scene(director.as_ref(), &next_scene_name);
                }
                Err(err) => error!("Initialization failed {}", err),
            }
        }
        .boxed_local()
    }

    /// Load the next scene. Returns false if no scene name is configured.
    pub fn load_scene(&self) -> bool {
        load_scene(self.director.as_ref(), &self.next_scene_name)
    }
}

fn load_scene(director: &impl SceneDirector, name: &str) -> bool {
    if name.is_empty() {
        warn!("Scene name is not provided");
        false
    } else {
        director.load_scene(name);
        true
    }
}

#[wasm_bindgen]
extern "C" {
    /// A host UI label. Only its `string` property is used.
    #[wasm_bindgen(typescript_type = "Label")]
    pub type Label;

    #[wasm_bindgen(method, setter)]
    fn set_string(this: &Label, text: &str);

    /// The host's scene director
    #[wasm_bindgen(typescript_type = "Director")]
    pub type Director;

    #[wasm_bindgen(method, js_name = loadScene)]
    fn load_scene(this: &Director, name: &str);
}

#[wasm_bindgen(typescript_custom_section)]
const TS_DEMO: &'static str = r#"
export interface Label {
    string: string;
}

export interface Director {
    loadScene(name: string): void;
}
"#;

impl TextLabel for Label {
    fn set_text(&self, text: &str) {
        self.set_string(text);
    }
}

impl SceneDirector for Director {
    fn load_scene(&self, name: &str) {
        Director::load_scene(self, name);
    }
}

fn to_promise(future: LocalBoxFuture<'static, ()>) -> js_sys::Promise {
    future_to_promise(async move {
        future.await;
        Ok(JsValue::UNDEFINED)
    })
}

#[wasm_bindgen(js_name = SdkDemo)]
pub struct JsSdkDemo(SdkDemo<ScriptBackend, Label>);

#[wasm_bindgen(js_class = SdkDemo)]
impl JsSdkDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(
        sdk: &Sdk,
        supported_platform_label: Label,
        environment_label: Label,
        adblock_usage_label: Label,
        invite_link_label: Label,
    ) -> Self {
        Self(SdkDemo::new(
            Rc::clone(sdk.handle()),
            SdkDemoLabels {
                supported_platform: supported_platform_label,
                environment: environment_label,
                adblock_usage: adblock_usage_label,
                invite_link: invite_link_label,
            },
        ))
    }

    #[wasm_bindgen(js_name = onLoad)]
    pub fn on_load(&self) -> js_sys::Promise {
        to_promise(self.0.on_load())
    }

    #[wasm_bindgen(js_name = showRewardedVideo)]
    pub fn show_rewarded_video(&self) {
        self.0.show_rewarded_video()
    }

    #[wasm_bindgen(js_name = showAdBreakVideo)]
    pub fn show_ad_break_video(&self) {
        self.0.show_ad_break_video()
    }

    #[wasm_bindgen(js_name = checkAdblockUsage)]
    pub fn check_adblock_usage(&self) -> js_sys::Promise {
        to_promise(self.0.check_adblock_usage())
    }

    #[wasm_bindgen(js_name = gameplayStart)]
    pub fn gameplay_start(&self) {
        self.0.gameplay_start()
    }

    #[wasm_bindgen(js_name = gameplayStop)]
    pub fn gameplay_stop(&self) {
        self.0.gameplay_stop()
    }

    #[wasm_bindgen(js_name = sdkGameLoadingStart)]
    pub fn loading_start(&self) {
        self.0.loading_start()
    }

    #[wasm_bindgen(js_name = sdkGameLoadingStop)]
    pub fn loading_stop(&self) {
        self.0.loading_stop()
    }

    pub fn happytime(&self) {
        self.0.happytime()
    }

    #[wasm_bindgen(js_name = inviteLink)]
    pub fn invite_link(&self) {
        self.0.invite_link()
    }

    #[wasm_bindgen(js_name = getUser)]
    pub fn get_user(&self) -> js_sys::Promise {
        to_promise(self.0.get_user().map(log_failure).boxed_local())
    }

    #[wasm_bindgen(js_name = showAuthPrompt)]
    pub fn show_auth_prompt(&self) -> js_sys::Promise {
        to_promise(self.0.show_auth_prompt().map(log_failure).boxed_local())
    }
}

fn log_failure<T>(result: Result<T, SdkError>) {
    if let Err(err) = result {
        error!("{}", err);
    }
}

#[wasm_bindgen(js_name = LoadSceneDemo)]
pub struct JsLoadSceneDemo(LoadSceneDemo<ScriptBackend, Director>);

#[wasm_bindgen(js_class = LoadSceneDemo)]
impl JsLoadSceneDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(sdk: &Sdk, director: Director, next_scene_name: String) -> Self {
        Self(LoadSceneDemo::new(
            Rc::clone(sdk.handle()),
            director,
            next_scene_name,
        ))
    }

    pub fn start(&self) -> js_sys::Promise {
        to_promise(self.0.start())
    }

    #[wasm_bindgen(js_name = loadScene)]
    pub fn load_scene(&self) -> bool {
        self.0.load_scene()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use hexlay_sdk::{LocalBackend, LocalConfig, PlatformSdk, SdkConfig};
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct TestLabel(Rc<RefCell<String>>);

    impl TestLabel {
        fn text(&self) -> String {
            self.0.borrow().clone()
        }
    }

    impl TextLabel for TestLabel {
        fn set_text(&self, text: &str) {
            *self.0.borrow_mut() = text.to_owned();
        }
    }

    #[derive(Default)]
    struct TestDirector(RefCell<Vec<String>>);

    impl SceneDirector for TestDirector {
        fn load_scene(&self, name: &str) {
            self.0.borrow_mut().push(name.to_owned());
        }
    }

    fn labels() -> SdkDemoLabels<TestLabel> {
        SdkDemoLabels {
            supported_platform: TestLabel::default(),
            environment: TestLabel::default(),
            adblock_usage: TestLabel::default(),
            invite_link: TestLabel::default(),
        }
    }

    fn sdk(config: LocalConfig) -> SdkHandle<LocalBackend> {
        PlatformSdk::new(LocalBackend::new(config), SdkConfig::default())
            .unwrap()
    }

    #[test]
    fn test_sdk_demo() {
        let labels = labels();
        let (supported, environment, adblock, invite) = (
            labels.supported_platform.clone(),
            labels.environment.clone(),
            labels.adblock_usage.clone(),
            labels.invite_link.clone(),
        );
        let sdk = sdk(LocalConfig {
            adblock: true,
            ..Default::default()
        });
        let demo = SdkDemo::new(Rc::clone(&sdk), labels);

        // Nothing works before init
        demo.invite_link();
        assert_eq!(invite.text(), "");

        block_on(demo.on_load());
        assert_eq!(supported.text(), "Supported platform: yes");
        assert_eq!(environment.text(), "Environment: local");

        block_on(demo.check_adblock_usage());
        assert_eq!(adblock.text(), "Adblock: on");

        demo.invite_link();
        assert_eq!(invite.text(), "http://localhost:8080/?roomId=123");

        demo.show_rewarded_video();
        demo.show_ad_break_video();
        assert_eq!(sdk.sdk().unwrap().local_ad().played(), 2);

        demo.gameplay_start();
        demo.happytime();
        let game = sdk.sdk().unwrap().local_game();
        assert!(game.is_gameplay_active());
        assert_eq!(game.happytimes(), 1);

        assert_eq!(block_on(demo.get_user()).unwrap(), None);
        let user = block_on(demo.show_auth_prompt()).unwrap().unwrap();
        assert_eq!(user.username, "local_player");
    }

    #[test]
    fn test_sdk_demo_unsupported() {
        let labels = labels();
        let (supported, environment) =
            (labels.supported_platform.clone(), labels.environment.clone());
        let demo = SdkDemo::new(
            sdk(LocalConfig {
                disabled: true,
                ..Default::default()
            }),
            labels,
        );

        block_on(demo.on_load());
        assert_eq!(supported.text(), "Supported platform: no");
        assert_eq!(environment.text(), "");

        block_on(demo.check_adblock_usage());
        assert!(matches!(
            block_on(demo.get_user()),
            Err(SdkError::NotInitialized)
        ));
    }

    #[test]
    fn test_load_scene_demo() {
        let demo = LoadSceneDemo::new(
            sdk(LocalConfig::default()),
            TestDirector::default(),
            "level_1".into(),
        );
        block_on(demo.start());
        assert_eq!(*demo.director.0.borrow(), vec!["level_1".to_owned()]);
    }

    #[test]
    fn test_load_scene_demo_no_name() {
        let demo = LoadSceneDemo::new(
            sdk(LocalConfig::default()),
            TestDirector::default(),
            String::new(),
        );
        block_on(demo.start());
        assert!(!demo.load_scene());
        assert!(demo.director.0.borrow().is_empty());
    }
}
