use crate::{LayoutConfigObject, RenderConfigObject};
use hexlay::{anyhow, validator::Validate, LayoutConfig, RenderConfig};
use hexlay_sdk::SdkError;
use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use std::{marker::PhantomData, ops::Deref};
use wasm_bindgen::{prelude::*, JsCast};

/// An extension trait for `Result` to allow us to add custom methods
pub trait ResultExt<T, E> {
    /// Helper to convert any result to a result with a JS error value.
    fn into_js(self) -> Result<T, JsValue>;
}

impl<T> ResultExt<T, anyhow::Error> for Result<T, anyhow::Error> {
    fn into_js(self) -> Result<T, JsValue> {
        self.map_err(|error| js_sys::Error::new(&format!("{:#}", error)).into())
    }
}

impl<T> ResultExt<T, SdkError> for Result<T, SdkError> {
    fn into_js(self) -> Result<T, JsValue> {
        self.map_err(sdk_error_to_js)
    }
}

/// Convert an SDK error into a JS `Error`, with the vendor error code attached
/// as `code` so JS callers can branch on it
pub fn sdk_error_to_js(error: SdkError) -> JsValue {
    let js_error = js_sys::Error::new(&error.to_string());
    let code: &'static str = error.code().into();
    // Setting a property on a fresh Error can't fail
    let _ = Reflect::set(&js_error, &"code".into(), &code.into());
    js_error.into()
}

/// A little container for consolidating functionality related to mapping
/// config objects between JS values and Rust values.
pub struct ConfigHelper<T, J>
where
    T: Default + Serialize + for<'a> Deserialize<'a> + Validate,
    J: Deref<Target = JsValue> + JsCast,
{
    phantom_t: PhantomData<T>,
    phantom_j: PhantomData<J>,
}

impl<T, J> ConfigHelper<T, J>
where
    T: Default + Serialize + for<'a> Deserialize<'a> + Validate,
    J: Deref<Target = JsValue> + JsCast,
{
    pub fn new() -> Self {
        Self {
            phantom_t: PhantomData,
            phantom_j: PhantomData,
        }
    }

    /// Get the default config as a JS object
    pub fn default(&self) -> Result<J, JsValue> {
        self.serialize(&T::default())
    }

    /// Deserialize a JS object into a config. The input should be an
    /// **object**, not a JSON string. Will return an error if deserialization
    /// fails in any way. This does **not** validate the config.
    pub fn deserialize(&self, input: J) -> Result<T, JsValue> {
        JsValue::into_serde(&input).map_err(|err| {
            js_sys::Error::new(&format!("Error deserializing value: {}", err))
                .into()
        })
    }

    /// Verify that the given JS object is a valid config. Return the
    /// validated config, with all defaults populated, if it's valid. Return
    /// an error if it isn't.
    pub fn validate(&self, input: J) -> Result<J, JsValue> {
        let config = self.deserialize(input)?;
        config.validate().map_err::<JsValue, _>(|err| {
            js_sys::Error::new(&format!("Invalid value: {:?}", err)).into()
        })?;
        // Re-serialize it back into a JS object
        self.serialize(&config)
    }

    fn serialize(&self, config: &T) -> Result<J, JsValue> {
        JsValue::from_serde(config)
            .map(|value| value.unchecked_into())
            .map_err(|err| {
                js_sys::Error::new(&format!("Error serializing value: {}", err))
                    .into()
            })
    }
}

pub type LayoutConfigHelper = ConfigHelper<LayoutConfig, LayoutConfigObject>;
pub type RenderConfigHelper = ConfigHelper<RenderConfig, RenderConfigObject>;
