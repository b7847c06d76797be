//! Browser backend. Loads the vendor's script into the page and wraps the
//! `CrazyGames.SDK` object it exposes.

mod bindings;
mod modules;

pub use modules::{ScriptAd, ScriptBanner, ScriptData, ScriptGame, ScriptUser};

use crate::{
    js::bindings::JsSdk,
    module::{
        AdModule, BannerModule, DataModule, GameModule, LoadedSdk, UserModule,
    },
    ErrorCode, LoadCallback, SdkBackend, SdkConfig, SdkEnvironment, SdkError,
    VendorError,
};
use js_sys::Reflect;
use log::{debug, warn};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlScriptElement;

const SCRIPT_LOAD_FAILED: &str =
    "Failed to load the SDK script. Please check your internet connection.";

/// Loads the SDK by injecting a `<script>` tag into the page
#[derive(Copy, Clone, Debug, Default)]
pub struct ScriptBackend;

type SharedCallback = Rc<RefCell<Option<LoadCallback<ScriptSdk>>>>;

impl SdkBackend for ScriptBackend {
    type Sdk = ScriptSdk;

    fn is_supported_platform(&self) -> bool {
        web_sys::window().is_some()
    }

    fn load(&self, config: &SdkConfig, on_complete: LoadCallback<ScriptSdk>) {
        // Both the load and error handlers need the callback, whichever
        // fires first gets it
        let on_complete: SharedCallback =
            Rc::new(RefCell::new(Some(on_complete)));
        if let Err(err) = inject_script(config, Rc::clone(&on_complete)) {
            complete(&on_complete, Err(err));
        }
    }
}

fn complete(callback: &SharedCallback, result: Result<ScriptSdk, SdkError>) {
    let callback = callback.borrow_mut().take();
    match callback {
        Some(callback) => callback(result),
        None => debug!("SDK script reported completion twice, ignoring"),
    }
}

fn inject_script(
    config: &SdkConfig,
    on_complete: SharedCallback,
) -> Result<(), SdkError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| SdkError::Js("No document available".into()))?;
    let head = document
        .head()
        .ok_or_else(|| SdkError::Js("Document has no <head>".into()))?;

    let script: HtmlScriptElement = document
        .create_element("script")?
        .dyn_into()
        .map_err(|_| SdkError::Js("Created element is not a script".into()))?;
    script.set_src(&config.script_url);
    script.set_async(true);

    let init_options = to_js(&config.init_options())?;
    let onload = Closure::once_into_js({
        let on_complete = Rc::clone(&on_complete);
        move || {
            spawn_local(async move {
                let result = init_vendor_sdk(&init_options).await;
                complete(&on_complete, result);
            })
        }
    });
    let onerror = Closure::once_into_js(move || {
        complete(
            &on_complete,
            Err(VendorError::new(ErrorCode::InitFailed, SCRIPT_LOAD_FAILED)
                .into()),
        )
    });
    script.set_onload(Some(onload.unchecked_ref()));
    script.set_onerror(Some(onerror.unchecked_ref()));

    head.append_child(&script)?;
    Ok(())
}

/// Grab the SDK object the script put on the page and initialize it
async fn init_vendor_sdk(options: &JsValue) -> Result<ScriptSdk, SdkError> {
    let namespace = Reflect::get(&js_sys::global(), &"CrazyGames".into())?;
    let sdk = Reflect::get(&namespace, &"SDK".into())?;
    if sdk.is_undefined() {
        return Err(VendorError::new(
            ErrorCode::InitFailed,
            "SDK script loaded, but CrazyGames.SDK is missing",
        )
        .into());
    }

    let sdk: JsSdk = sdk.unchecked_into();
    JsFuture::from(sdk.init(options)?).await?;
    Ok(ScriptSdk::new(sdk))
}

/// The SDK as loaded from the vendor's script
pub struct ScriptSdk {
    sdk: JsSdk,
    ad: ScriptAd,
    game: ScriptGame,
    user: ScriptUser,
    data: ScriptData,
    banner: ScriptBanner,
}

impl ScriptSdk {
    fn new(sdk: JsSdk) -> Self {
        Self {
            ad: ScriptAd::new(sdk.ad()),
            game: ScriptGame::new(sdk.game()),
            user: ScriptUser::new(sdk.user()),
            data: ScriptData::new(sdk.data()),
            banner: ScriptBanner::new(sdk.banner()),
            sdk,
        }
    }
}

impl LoadedSdk for ScriptSdk {
    fn environment(&self) -> SdkEnvironment {
        let name = self.sdk.environment();
        name.parse().unwrap_or_else(|_| {
            warn!(
                "Unknown SDK environment {:?}, treating it as disabled",
                name
            );
            SdkEnvironment::Disabled
        })
    }

    fn is_qa_tool(&self) -> bool {
        self.sdk.is_qa_tool()
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

/// Errors thrown by the vendor SDK are plain objects with a `code` and a
/// `message`. Anything else is kept as a string.
impl From<JsValue> for SdkError {
    fn from(value: JsValue) -> Self {
        match value.into_serde::<VendorError>() {
            Ok(error) => Self::Vendor(error),
            Err(_) => Self::Js(describe(&value)),
        }
    }
}

/// Turn an arbitrary thrown JS value into a readable message
fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return error.message().into();
    }
    match js_sys::JSON::stringify(value) {
        Ok(json) => json.into(),
        Err(_) => format!("{:?}", value),
    }
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, SdkError> {
    JsValue::from_serde(value).map_err(|err| SdkError::Js(err.to_string()))
}
