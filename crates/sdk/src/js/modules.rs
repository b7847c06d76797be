use crate::{
    js::{
        bindings::{
            JsAdModule, JsBannerModule, JsDataModule, JsGameModule,
            JsUserModule,
        },
        describe, to_js,
    },
    module::{
        AdModule, AuthListener, AuthListenerId, BannerModule, DataModule,
        GameModule, SdkFuture, UserModule,
    },
    AdCallbacks, AdType, Banner, ErrorCode, InviteParams,
    LinkAccountPromptResult, PortalUser, SdkError, SystemInfo, VendorError,
};
use futures::FutureExt;
use js_sys::{Function, Object, Promise, Reflect};
use log::warn;
use serde::de::DeserializeOwned;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;

/// Wait on a vendor promise and deserialize whatever it resolves to
fn resolve<T: DeserializeOwned + 'static>(
    promise: Result<Promise, SdkError>,
) -> SdkFuture<T> {
    async move {
        let value = JsFuture::from(promise?).await?;
        value
            .into_serde::<T>()
            .map_err(|err| SdkError::Js(err.to_string()))
    }
    .boxed_local()
}

pub struct ScriptAd(JsAdModule);

impl ScriptAd {
    pub(super) fn new(module: JsAdModule) -> Self {
        Self(module)
    }
}

impl AdModule for ScriptAd {
    fn request_ad(&self, ad_type: AdType, callbacks: AdCallbacks) {
        let AdCallbacks {
            started,
            error,
            finished,
        } = callbacks;

        let object = Object::new();
        let handlers = [
            ("adStarted", Closure::once_into_js(move || started())),
            (
                "adError",
                Closure::once_into_js(move |value: JsValue| {
                    error(value.into_serde::<VendorError>().unwrap_or_else(
                        |_| {
                            VendorError::new(ErrorCode::Other, describe(&value))
                        },
                    ))
                }),
            ),
            ("adFinished", Closure::once_into_js(move || finished())),
        ];
        for (name, handler) in handlers.iter() {
            if let Err(err) = Reflect::set(&object, &(*name).into(), handler) {
                warn!("Failed to attach ad callback {}: {:?}", name, err);
            }
        }

        let ad_type: &'static str = ad_type.into();
        self.0.request_ad(ad_type, &object);
    }

    fn has_adblock(&self) -> SdkFuture<bool> {
        resolve(self.0.has_adblock().map_err(SdkError::from))
    }
}

pub struct ScriptGame(JsGameModule);

impl ScriptGame {
    pub(super) fn new(module: JsGameModule) -> Self {
        Self(module)
    }
}

impl GameModule for ScriptGame {
    fn link(&self) -> String {
        self.0.link()
    }

    fn id(&self) -> String {
        self.0.id()
    }

    fn happytime(&self) {
        self.0.happytime()
    }

    fn gameplay_start(&self) {
        self.0.gameplay_start()
    }

    fn gameplay_stop(&self) {
        self.0.gameplay_stop()
    }

    fn loading_start(&self) {
        self.0.loading_start()
    }

    fn loading_stop(&self) {
        self.0.loading_stop()
    }

    fn invite_link(&self, params: &InviteParams) -> Result<String, SdkError> {
        Ok(self.0.invite_link(&to_js(params)?)?)
    }

    fn show_invite_button(
        &self,
        params: &InviteParams,
    ) -> Result<String, SdkError> {
        Ok(self.0.show_invite_button(&to_js(params)?)?)
    }

    fn hide_invite_button(&self) {
        self.0.hide_invite_button()
    }

    fn get_invite_param(&self, name: &str) -> Option<String> {
        self.0.get_invite_param(name)
    }

    fn track_xsolla_order(
        &self,
        order: &serde_json::Value,
    ) -> Result<(), SdkError> {
        Ok(self.0.track_xsolla_order(&to_js(order)?)?)
    }
}

/// JS keeps a reference to every listener we register, so the closures have
/// to live here until they're removed
pub struct ScriptUser {
    module: JsUserModule,
    listeners: RefCell<HashMap<AuthListenerId, Closure<dyn FnMut(JsValue)>>>,
    next_listener_id: Cell<u32>,
}

impl ScriptUser {
    pub(super) fn new(module: JsUserModule) -> Self {
        Self {
            module,
            listeners: RefCell::new(HashMap::new()),
            next_listener_id: Cell::new(0),
        }
    }
}

impl UserModule for ScriptUser {
    fn is_user_account_available(&self) -> bool {
        self.module.is_user_account_available()
    }

    fn system_info(&self) -> Result<SystemInfo, SdkError> {
        self.module
            .system_info()
            .into_serde()
            .map_err(|err| SdkError::Js(err.to_string()))
    }

    fn show_auth_prompt(&self) -> SdkFuture<Option<PortalUser>> {
        resolve(self.module.show_auth_prompt().map_err(SdkError::from))
    }

    fn show_account_link_prompt(&self) -> SdkFuture<LinkAccountPromptResult> {
        resolve(self.module.show_account_link_prompt().map_err(SdkError::from))
    }

    fn get_user(&self) -> SdkFuture<Option<PortalUser>> {
        resolve(self.module.get_user().map_err(SdkError::from))
    }

    fn add_auth_listener(&self, mut listener: AuthListener) -> AuthListenerId {
        let closure = Closure::wrap(Box::new(move |value: JsValue| {
            let user = value.into_serde::<Option<PortalUser>>().unwrap_or_else(
                |err| {
                    warn!("Unexpected user from auth listener: {}", err);
                    None
                },
            );
            listener(user.as_ref());
        }) as Box<dyn FnMut(JsValue)>);
        self.module
            .add_auth_listener(closure.as_ref().unchecked_ref::<Function>());

        let id = AuthListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_auth_listener(&self, id: AuthListenerId) -> bool {
        match self.listeners.borrow_mut().remove(&id) {
            Some(closure) => {
                self.module.remove_auth_listener(
                    closure.as_ref().unchecked_ref::<Function>(),
                );
                true
            }
            None => false,
        }
    }

    fn get_user_token(&self) -> SdkFuture<Option<String>> {
        resolve(self.module.get_user_token().map_err(SdkError::from))
    }

    fn get_xsolla_user_token(&self) -> SdkFuture<Option<String>> {
        resolve(self.module.get_xsolla_user_token().map_err(SdkError::from))
    }

    fn add_score(&self, score: f64) -> Result<(), SdkError> {
        Ok(self.module.add_score(score)?)
    }

    fn add_score_encrypted(
        &self,
        score: f64,
        encrypted_score_json: &str,
    ) -> Result<(), SdkError> {
        Ok(self
            .module
            .add_score_encrypted(score, encrypted_score_json)?)
    }
}

pub struct ScriptData(JsDataModule);

impl ScriptData {
    pub(super) fn new(module: JsDataModule) -> Self {
        Self(module)
    }
}

impl DataModule for ScriptData {
    fn clear(&self) -> Result<(), SdkError> {
        Ok(self.0.clear()?)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, SdkError> {
        Ok(self.0.get_item(key)?)
    }

    fn remove_item(&self, key: &str) -> Result<(), SdkError> {
        Ok(self.0.remove_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SdkError> {
        Ok(self.0.set_item(key, value)?)
    }
}

pub struct ScriptBanner(JsBannerModule);

impl ScriptBanner {
    pub(super) fn new(module: JsBannerModule) -> Self {
        Self(module)
    }
}

impl BannerModule for ScriptBanner {
    fn request_banner(&self, banner: &Banner) -> SdkFuture<()> {
        resolve(to_js(banner).and_then(|banner| {
            self.0.request_banner(&banner).map_err(SdkError::from)
        }))
    }

    fn request_responsive_banner(&self, container_id: &str) -> SdkFuture<()> {
        resolve(
            self.0
                .request_responsive_banner(container_id)
                .map_err(SdkError::from),
        )
    }

    fn clear_banner(&self, container_id: &str) {
        self.0.clear_banner(container_id)
    }

    fn clear_all_banners(&self) {
        self.0.clear_all_banners()
    }
}
