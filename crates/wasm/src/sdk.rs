use crate::util::{sdk_error_to_js, ResultExt};
use hexlay_sdk::{
    AdCallbacks, AdType, Banner, InviteParams, PlatformSdk, ScriptBackend,
    SdkConfig, SdkError, SdkFuture, SdkHandle, VendorError,
};
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::future_to_promise;

/// JS handle to the portal SDK. Create one at startup and hand it to
/// everything that needs the SDK; every method goes through the same
/// single-flight initialization.
///
/// Methods that talk to the SDK throw (or reject) with an `Error` that has a
/// `code` field, holding one of the vendor's error codes.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct Sdk {
    handle: SdkHandle<ScriptBackend>,
}

/// Turn a pending SDK call into a promise that resolves to its serialized
/// result
fn to_promise<T: Serialize + 'static>(
    future: Result<SdkFuture<T>, SdkError>,
) -> Promise {
    future_to_promise(async move {
        let value = future.into_js()?.await.into_js()?;
        JsValue::from_serde(&value)
            .map_err(|err| js_sys::Error::new(&err.to_string()).into())
    })
}

fn from_js<T: for<'a> serde::Deserialize<'a>>(
    value: &JsValue,
) -> Result<T, JsValue> {
    value.into_serde().map_err(|err| {
        js_sys::Error::new(&format!("Error deserializing value: {}", err))
            .into()
    })
}

/// Pull an optional callback out of a JS object
fn get_callback(object: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(object, &name.into())
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

// Non-Wasm API
impl Sdk {
    pub fn handle(&self) -> &SdkHandle<ScriptBackend> {
        &self.handle
    }
}

#[wasm_bindgen]
impl Sdk {
    /// Create the SDK handle. `config` is an optional object with any of
    /// `script_url`, `engine` and `sdk_version`. Nothing is loaded until
    /// `init` is called.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Sdk, JsValue> {
        let config: SdkConfig = if config.is_undefined() || config.is_null() {
            SdkConfig::default()
        } else {
            from_js(&config)?
        };
        let handle =
            PlatformSdk::new(ScriptBackend, config).map_err(sdk_error_to_js)?;
        Ok(Self { handle })
    }

    #[wasm_bindgen(getter, js_name = isSupportedPlatform)]
    pub fn is_supported_platform(&self) -> bool {
        self.handle.is_supported_platform()
    }

    /// Load and initialize the SDK. Safe to call any number of times, from
    /// anywhere. The promise resolves once the SDK is ready.
    pub fn init(&self) -> Promise {
        let waiter = self.handle.init();
        future_to_promise(async move {
            waiter.into_js()?.await.into_js()?;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(getter)]
    pub fn environment(&self) -> Result<String, JsValue> {
        self.handle
            .environment()
            .map(|environment| environment.to_string())
            .into_js()
    }

    #[wasm_bindgen(getter, js_name = isQaTool)]
    pub fn is_qa_tool(&self) -> Result<bool, JsValue> {
        self.handle.is_qa_tool().into_js()
    }

    /// Show an ad. `ad_type` is `"midgame"` or `"rewarded"`. `callbacks` may
    /// contain any of `adStarted`, `adError` and `adFinished`.
    #[wasm_bindgen(js_name = requestAd)]
    pub fn request_ad(
        &self,
        ad_type: &str,
        callbacks: JsValue,
    ) -> Result<(), JsValue> {
        let ad_type = ad_type.parse::<AdType>().map_err(|_| {
            js_sys::Error::new(&format!("Unknown ad type: {:?}", ad_type))
        })?;

        let mut ad_callbacks = AdCallbacks::default();
        if let Some(started) = get_callback(&callbacks, "adStarted") {
            ad_callbacks = ad_callbacks.on_started(move || {
                let _ = started.call0(&JsValue::NULL);
            });
        }
        if let Some(error) = get_callback(&callbacks, "adError") {
            ad_callbacks = ad_callbacks.on_error(move |err: VendorError| {
                let value = JsValue::from_serde(&err).unwrap_or_else(|_| {
                    JsValue::from_str(&err.to_string())
                });
                let _ = error.call1(&JsValue::NULL, &value);
            });
        }
        if let Some(finished) = get_callback(&callbacks, "adFinished") {
            ad_callbacks = ad_callbacks.on_finished(move || {
                let _ = finished.call0(&JsValue::NULL);
            });
        }

        self.handle.ad().into_js()?.request_ad(ad_type, ad_callbacks);
        Ok(())
    }

    #[wasm_bindgen(js_name = hasAdblock)]
    pub fn has_adblock(&self) -> Promise {
        to_promise(self.handle.ad().map(|ad| ad.has_adblock()))
    }

    #[wasm_bindgen(getter, js_name = gameLink)]
    pub fn game_link(&self) -> Result<String, JsValue> {
        Ok(self.handle.game().into_js()?.link())
    }

    #[wasm_bindgen(getter, js_name = gameId)]
    pub fn game_id(&self) -> Result<String, JsValue> {
        Ok(self.handle.game().into_js()?.id())
    }

    pub fn happytime(&self) -> Result<(), JsValue> {
        self.handle.game().into_js()?.happytime();
        Ok(())
    }

    #[wasm_bindgen(js_name = gameplayStart)]
    pub fn gameplay_start(&self) -> Result<(), JsValue> {
        self.handle.game().into_js()?.gameplay_start();
        Ok(())
    }

    #[wasm_bindgen(js_name = gameplayStop)]
    pub fn gameplay_stop(&self) -> Result<(), JsValue> {
        self.handle.game().into_js()?.gameplay_stop();
        Ok(())
    }

    #[wasm_bindgen(js_name = loadingStart)]
    pub fn loading_start(&self) -> Result<(), JsValue> {
        self.handle.game().into_js()?.loading_start();
        Ok(())
    }

    #[wasm_bindgen(js_name = loadingStop)]
    pub fn loading_stop(&self) -> Result<(), JsValue> {
        self.handle.game().into_js()?.loading_stop();
        Ok(())
    }

    /// Build an invite link. `params` is an object of string values.
    #[wasm_bindgen(js_name = inviteLink)]
    pub fn invite_link(&self, params: JsValue) -> Result<String, JsValue> {
        let params: InviteParams = from_js(&params)?;
        self.handle.game().into_js()?.invite_link(&params).into_js()
    }

    #[wasm_bindgen(js_name = showInviteButton)]
    pub fn show_invite_button(
        &self,
        params: JsValue,
    ) -> Result<String, JsValue> {
        let params: InviteParams = from_js(&params)?;
        self.handle
            .game()
            .into_js()?
            .show_invite_button(&params)
            .into_js()
    }

    #[wasm_bindgen(js_name = hideInviteButton)]
    pub fn hide_invite_button(&self) -> Result<(), JsValue> {
        self.handle.game().into_js()?.hide_invite_button();
        Ok(())
    }

    #[wasm_bindgen(js_name = getInviteParam)]
    pub fn get_invite_param(
        &self,
        name: &str,
    ) -> Result<Option<String>, JsValue> {
        Ok(self.handle.game().into_js()?.get_invite_param(name))
    }

    #[wasm_bindgen(js_name = getUser)]
    pub fn get_user(&self) -> Promise {
        to_promise(self.handle.user().map(|user| user.get_user()))
    }

    #[wasm_bindgen(js_name = showAuthPrompt)]
    pub fn show_auth_prompt(&self) -> Promise {
        to_promise(self.handle.user().map(|user| user.show_auth_prompt()))
    }

    #[wasm_bindgen(js_name = showAccountLinkPrompt)]
    pub fn show_account_link_prompt(&self) -> Promise {
        to_promise(
            self.handle
                .user()
                .map(|user| user.show_account_link_prompt()),
        )
    }

    #[wasm_bindgen(js_name = getUserToken)]
    pub fn get_user_token(&self) -> Promise {
        to_promise(self.handle.user().map(|user| user.get_user_token()))
    }

    #[wasm_bindgen(js_name = addScore)]
    pub fn add_score(&self, score: f64) -> Result<(), JsValue> {
        self.handle.user().into_js()?.add_score(score).into_js()
    }

    #[wasm_bindgen(js_name = getItem)]
    pub fn get_item(&self, key: &str) -> Result<Option<String>, JsValue> {
        self.handle.data().into_js()?.get_item(key).into_js()
    }

    #[wasm_bindgen(js_name = setItem)]
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), JsValue> {
        self.handle.data().into_js()?.set_item(key, value).into_js()
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&self, key: &str) -> Result<(), JsValue> {
        self.handle.data().into_js()?.remove_item(key).into_js()
    }

    #[wasm_bindgen(js_name = clearData)]
    pub fn clear_data(&self) -> Result<(), JsValue> {
        self.handle.data().into_js()?.clear().into_js()
    }

    /// `banner` is an object with `id`, `width` and `height`
    #[wasm_bindgen(js_name = requestBanner)]
    pub fn request_banner(&self, banner: JsValue) -> Result<Promise, JsValue> {
        let banner: Banner = from_js(&banner)?;
        Ok(to_promise(
            self.handle.banner().map(|module| module.request_banner(&banner)),
        ))
    }

    #[wasm_bindgen(js_name = requestResponsiveBanner)]
    pub fn request_responsive_banner(&self, container_id: &str) -> Promise {
        to_promise(
            self.handle
                .banner()
                .map(|module| module.request_responsive_banner(container_id)),
        )
    }

    #[wasm_bindgen(js_name = clearBanner)]
    pub fn clear_banner(&self, container_id: &str) -> Result<(), JsValue> {
        self.handle.banner().into_js()?.clear_banner(container_id);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearAllBanners)]
    pub fn clear_all_banners(&self) -> Result<(), JsValue> {
        self.handle.banner().into_js()?.clear_all_banners();
        Ok(())
    }
}
