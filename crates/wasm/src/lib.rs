//! This crate provides WebAssembly bindings for hexlay. The [Hexlay] struct is
//! the main interface for grid math and layouts; initialize a single instance
//! of it before doing anything else from JS, since that also sets up logging
//! and panic reporting. [Sdk] is the handle to the games portal SDK, and the
//! components ([HexNodeComponent] and the demos) are driven from the host
//! engine's lifecycle hooks.
//!
//! You probably won't ever want to include this crate in another Rust project.
//! Instead, use `wasm-pack` to build this into an npm package, then import that
//! into your JS project.

mod demo;
mod node;
mod sdk;
mod util;

pub use crate::{
    demo::{
        JsLoadSceneDemo, JsSdkDemo, LoadSceneDemo, SceneDirector, SdkDemo,
        SdkDemoLabels, TextLabel,
    },
    node::HexNodeComponent,
    sdk::Sdk,
};

use crate::util::{LayoutConfigHelper, RenderConfigHelper, ResultExt};
use hexlay::{
    fits_in_grid, flood_fill_within, hexagon, ring, spiral, HexCoordinate,
    Layout, LayoutRenderer,
};
use js_sys::Array;
use wasm_bindgen::{prelude::*, JsCast};

/// A top-level interface for interacting with hexlay from Wasm.
#[wasm_bindgen]
pub struct Hexlay;

fn to_array(
    coordinates: impl IntoIterator<Item = HexCoordinate>,
) -> CoordinateArray {
    coordinates
        .into_iter()
        .map(JsValue::from)
        .collect::<Array>()
        .unchecked_into()
}

/// Reject shapes that would run off the edge of the coordinate space
fn check_bounds(center: &HexCoordinate, radius: u32) -> Result<(), JsValue> {
    if fits_in_grid(*center, radius) {
        Ok(())
    } else {
        Err(js_sys::Error::new(&format!(
            "Radius {} around {} is out of bounds",
            radius, center
        ))
        .into())
    }
}

#[wasm_bindgen]
impl Hexlay {
    /// Initialize global state. Should be called once per app instance.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        wasm_logger::init(wasm_logger::Config::default());
        Self
    }

    /// Get every cell exactly `radius` steps from `center`. Throws if any of
    /// the cells would be outside the `i32` coordinate range.
    pub fn ring(
        &self,
        center: &HexCoordinate,
        radius: u32,
    ) -> Result<CoordinateArray, JsValue> {
        check_bounds(center, radius)?;
        Ok(to_array(ring(*center, radius)))
    }

    /// Get every cell whose distance from `center` is between the two radii,
    /// inclusive, ring by ring. Throws if the outer ring would be outside the
    /// `i32` coordinate range.
    pub fn spiral(
        &self,
        center: &HexCoordinate,
        min_radius: u32,
        max_radius: u32,
    ) -> Result<CoordinateArray, JsValue> {
        check_bounds(center, max_radius)?;
        Ok(to_array(spiral(*center, min_radius, max_radius)))
    }

    /// Get every cell within `radius` of `center`
    pub fn hexagon(
        &self,
        center: &HexCoordinate,
        radius: u32,
    ) -> Result<CoordinateArray, JsValue> {
        check_bounds(center, radius)?;
        Ok(to_array(hexagon(*center, radius)))
    }

    /// Flood fill out from the seeds, which are plain `{q, r}` objects. Cells
    /// more than `max_distance` from every seed are skipped, which keeps the
    /// fill finite.
    #[wasm_bindgen(js_name = floodFill)]
    pub fn flood_fill(
        &self,
        seeds: JsValue,
        max_distance: u32,
    ) -> Result<CoordinateArray, JsValue> {
        let seeds: Vec<HexCoordinate> = seeds.into_serde().map_err(|err| {
            js_sys::Error::new(&format!("Invalid seeds: {}", err))
        })?;
        // The fill looks one step past its edge
        for seed in &seeds {
            check_bounds(seed, max_distance.saturating_add(1))?;
        }
        let bounds = seeds.clone();
        let max_distance = u64::from(max_distance);
        Ok(to_array(flood_fill_within(seeds, move |coordinate| {
            bounds
                .iter()
                .any(|seed| seed.distance_to(coordinate) <= max_distance)
        })))
    }

    /// Get the default layout config as a JS object.
    #[wasm_bindgen(js_name = defaultLayoutConfig)]
    pub fn default_layout_config(&self) -> Result<LayoutConfigObject, JsValue> {
        LayoutConfigHelper::new().default()
    }

    /// Verify that the given JS object is a valid layout config. Return the
    /// validated config, with all defaults populated, if it's valid. Return
    /// an error if it isn't.
    #[wasm_bindgen(js_name = validateLayoutConfig)]
    pub fn validate_layout_config(
        &self,
        input: LayoutConfigObject,
    ) -> Result<LayoutConfigObject, JsValue> {
        LayoutConfigHelper::new().validate(input)
    }

    /// Generate a new layout from the given config object
    #[wasm_bindgen(js_name = generateLayout)]
    pub fn generate_layout(
        &self,
        config: LayoutConfigObject,
    ) -> Result<Layout, JsValue> {
        let config = LayoutConfigHelper::new().deserialize(config)?;
        Layout::generate(config).into_js()
    }

    /// Load a layout that was serialized with [Hexlay::layout_to_json]
    #[wasm_bindgen(js_name = layoutFromJson)]
    pub fn layout_from_json(&self, json: &str) -> Result<Layout, JsValue> {
        Layout::from_json(json).into_js()
    }

    #[wasm_bindgen(js_name = layoutToJson)]
    pub fn layout_to_json(&self, layout: &Layout) -> Result<String, JsValue> {
        layout.to_json().into_js()
    }

    /// Get the default render config as a JS object.
    #[wasm_bindgen(js_name = defaultRenderConfig)]
    pub fn default_render_config(&self) -> Result<RenderConfigObject, JsValue> {
        RenderConfigHelper::new().default()
    }

    /// Create a layout renderer. A renderer is configured once at creation,
    /// but from then it can be used to render any number of layouts.
    #[wasm_bindgen(js_name = buildRenderer)]
    pub fn build_renderer(
        &self,
        config: RenderConfigObject,
    ) -> Result<LayoutRenderer, JsValue> {
        let config = RenderConfigHelper::new().deserialize(config)?;
        LayoutRenderer::new(config).into_js()
    }

    /// Render a layout as a 2D SVG document
    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(
        &self,
        renderer: &LayoutRenderer,
        layout: &Layout,
    ) -> String {
        renderer.render_as_svg(layout)
    }

    /// A type-hacked copy of every cell in the layout, in generation order.
    /// This can be cleaned up after
    /// https://github.com/rustwasm/wasm-bindgen/issues/111
    #[wasm_bindgen(js_name = copyCells)]
    pub fn copy_cells(&self, layout: &Layout) -> CoordinateArray {
        to_array(layout.coordinates())
    }
}

#[wasm_bindgen(typescript_custom_section)]
const TS_APPEND_CONTENT: &'static str = r#"

export interface CoordinateObject {
    q: number;
    r: number;
}

/**
 * See description in the `extern "C"` section below
 */
export type ShapeConfigObject =
    | { type: 'ring'; center: CoordinateObject; radius: number }
    | {
          type: 'spiral';
          center: CoordinateObject;
          min_radius: number;
          max_radius: number;
      }
    | { type: 'hexagon'; center: CoordinateObject; radius: number }
    | {
          type: 'flood';
          seeds: CoordinateObject[];
          blocked: CoordinateObject[];
          max_distance: number;
      };

export interface LayoutConfigObject {
    name: string;
    shapes: ShapeConfigObject[];
}

export interface RenderConfigObject {
    scale: number;
    show_coordinates: boolean;
    stroke_width: number;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// A TS version of the [hexlay::LayoutConfig] type from the core crate.
    /// This represents what **can be deserialized into a
    /// [hexlay::LayoutConfig]**, so it has to stay up to date with it.
    #[wasm_bindgen(typescript_type = "LayoutConfigObject")]
    pub type LayoutConfigObject;

    /// Similar to [LayoutConfigObject], but for the render config instead.
    #[wasm_bindgen(typescript_type = "RenderConfigObject")]
    pub type RenderConfigObject;

    /// Type hack needed until https://github.com/rustwasm/wasm-bindgen/issues/111
    #[wasm_bindgen(typescript_type = "HexCoordinate[]")]
    pub type CoordinateArray;
}
