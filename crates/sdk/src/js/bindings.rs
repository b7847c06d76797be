//! Raw bindings to the vendor's JS SDK object (`window.CrazyGames.SDK`)

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type JsSdk;

    #[wasm_bindgen(method, catch)]
    pub fn init(this: &JsSdk, options: &JsValue) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, getter)]
    pub fn environment(this: &JsSdk) -> String;
    #[wasm_bindgen(method, getter, js_name = isQaTool)]
    pub fn is_qa_tool(this: &JsSdk) -> bool;
    #[wasm_bindgen(method, getter)]
    pub fn ad(this: &JsSdk) -> JsAdModule;
    #[wasm_bindgen(method, getter)]
    pub fn game(this: &JsSdk) -> JsGameModule;
    #[wasm_bindgen(method, getter)]
    pub fn user(this: &JsSdk) -> JsUserModule;
    #[wasm_bindgen(method, getter)]
    pub fn data(this: &JsSdk) -> JsDataModule;
    #[wasm_bindgen(method, getter)]
    pub fn banner(this: &JsSdk) -> JsBannerModule;

    pub type JsAdModule;

    #[wasm_bindgen(method, js_name = requestAd)]
    pub fn request_ad(this: &JsAdModule, ad_type: &str, callbacks: &JsValue);
    #[wasm_bindgen(method, catch, js_name = hasAdblock)]
    pub fn has_adblock(this: &JsAdModule) -> Result<Promise, JsValue>;

    pub type JsGameModule;

    #[wasm_bindgen(method, getter)]
    pub fn link(this: &JsGameModule) -> String;
    #[wasm_bindgen(method, getter)]
    pub fn id(this: &JsGameModule) -> String;
    #[wasm_bindgen(method)]
    pub fn happytime(this: &JsGameModule);
    #[wasm_bindgen(method, js_name = gameplayStart)]
    pub fn gameplay_start(this: &JsGameModule);
    #[wasm_bindgen(method, js_name = gameplayStop)]
    pub fn gameplay_stop(this: &JsGameModule);
    #[wasm_bindgen(method, js_name = loadingStart)]
    pub fn loading_start(this: &JsGameModule);
    #[wasm_bindgen(method, js_name = loadingStop)]
    pub fn loading_stop(this: &JsGameModule);
    #[wasm_bindgen(method, catch, js_name = inviteLink)]
    pub fn invite_link(
        this: &JsGameModule,
        params: &JsValue,
    ) -> Result<String, JsValue>;
    #[wasm_bindgen(method, catch, js_name = showInviteButton)]
    pub fn show_invite_button(
        this: &JsGameModule,
        params: &JsValue,
    ) -> Result<String, JsValue>;
    #[wasm_bindgen(method, js_name = hideInviteButton)]
    pub fn hide_invite_button(this: &JsGameModule);
    #[wasm_bindgen(method, js_name = getInviteParam)]
    pub fn get_invite_param(this: &JsGameModule, name: &str) -> Option<String>;
    #[wasm_bindgen(method, catch, js_name = trackXsollaOrder)]
    pub fn track_xsolla_order(
        this: &JsGameModule,
        order: &JsValue,
    ) -> Result<(), JsValue>;

    pub type JsUserModule;

    #[wasm_bindgen(method, getter, js_name = isUserAccountAvailable)]
    pub fn is_user_account_available(this: &JsUserModule) -> bool;
    #[wasm_bindgen(method, getter, js_name = systemInfo)]
    pub fn system_info(this: &JsUserModule) -> JsValue;
    #[wasm_bindgen(method, catch, js_name = showAuthPrompt)]
    pub fn show_auth_prompt(this: &JsUserModule) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, catch, js_name = showAccountLinkPrompt)]
    pub fn show_account_link_prompt(
        this: &JsUserModule,
    ) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, catch, js_name = getUser)]
    pub fn get_user(this: &JsUserModule) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, js_name = addAuthListener)]
    pub fn add_auth_listener(this: &JsUserModule, listener: &Function);
    #[wasm_bindgen(method, js_name = removeAuthListener)]
    pub fn remove_auth_listener(this: &JsUserModule, listener: &Function);
    #[wasm_bindgen(method, catch, js_name = getUserToken)]
    pub fn get_user_token(this: &JsUserModule) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, catch, js_name = getXsollaUserToken)]
    pub fn get_xsolla_user_token(
        this: &JsUserModule,
    ) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, catch, js_name = addScore)]
    pub fn add_score(this: &JsUserModule, score: f64) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch, js_name = addScoreEncrypted)]
    pub fn add_score_encrypted(
        this: &JsUserModule,
        score: f64,
        encrypted_score_json: &str,
    ) -> Result<(), JsValue>;

    pub type JsDataModule;

    #[wasm_bindgen(method, catch)]
    pub fn clear(this: &JsDataModule) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch, js_name = getItem)]
    pub fn get_item(
        this: &JsDataModule,
        key: &str,
    ) -> Result<Option<String>, JsValue>;
    #[wasm_bindgen(method, catch, js_name = removeItem)]
    pub fn remove_item(this: &JsDataModule, key: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(method, catch, js_name = setItem)]
    pub fn set_item(
        this: &JsDataModule,
        key: &str,
        value: &str,
    ) -> Result<(), JsValue>;

    pub type JsBannerModule;

    #[wasm_bindgen(method, catch, js_name = requestBanner)]
    pub fn request_banner(
        this: &JsBannerModule,
        banner: &JsValue,
    ) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, catch, js_name = requestResponsiveBanner)]
    pub fn request_responsive_banner(
        this: &JsBannerModule,
        container_id: &str,
    ) -> Result<Promise, JsValue>;
    #[wasm_bindgen(method, js_name = clearBanner)]
    pub fn clear_banner(this: &JsBannerModule, container_id: &str);
    #[wasm_bindgen(method, js_name = clearAllBanners)]
    pub fn clear_all_banners(this: &JsBannerModule);
}
