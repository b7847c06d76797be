//! Browser tests, run with `wasm-pack test --headless --firefox crates/wasm`
#![cfg(target_arch = "wasm32")]

use hexlay::HexCoordinate;
use hexlay_wasm::{Hexlay, Sdk};
use js_sys::{Array, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_geometry_arrays() {
    let hexlay = Hexlay::new();
    let center = HexCoordinate::new(1, 2);
    let ring: Array = hexlay.ring(&center, 2).unwrap().unchecked_into();
    assert_eq!(ring.length(), 12);
    let spiral: Array =
        hexlay.spiral(&center, 0, 2).unwrap().unchecked_into();
    assert_eq!(spiral.length(), 19);
}

#[wasm_bindgen_test]
fn test_geometry_out_of_bounds() {
    let hexlay = Hexlay::new();
    let edge = HexCoordinate::new(0, i32::MIN);
    assert!(hexlay.ring(&edge, 1).is_err());
    assert!(hexlay.hexagon(&edge, 1).is_err());
    assert!(hexlay.spiral(&edge, 0, 1).is_err());
    let seeds = JsValue::from_serde(&[edge]).unwrap();
    assert!(hexlay.flood_fill(seeds, 0).is_err());
}

#[wasm_bindgen_test]
fn test_flood_fill() {
    let hexlay = Hexlay::new();
    let seeds = JsValue::from_serde(&[HexCoordinate::ORIGIN]).unwrap();
    let cells: Array = hexlay.flood_fill(seeds, 1).unwrap().unchecked_into();
    assert_eq!(cells.length(), 7);
}

#[wasm_bindgen_test]
fn test_generate_default_layout() {
    let hexlay = Hexlay::new();
    let config = hexlay.default_layout_config().unwrap();
    let layout = hexlay.generate_layout(config).unwrap();
    assert_eq!(layout.len(), hexlay::hexagon_len(5));

    let renderer = hexlay
        .build_renderer(hexlay.default_render_config().unwrap())
        .unwrap();
    assert!(hexlay.render_svg(&renderer, &layout).contains("<svg"));
}

#[wasm_bindgen_test]
fn test_sdk_not_initialized() {
    let sdk = Sdk::new(JsValue::UNDEFINED).unwrap();
    assert!(sdk.is_supported_platform());
    let error = sdk.environment().unwrap_err();
    let code = Reflect::get(&error, &"code".into()).unwrap();
    assert_eq!(code.as_string().as_deref(), Some("sdkNotInitialized"));
}
