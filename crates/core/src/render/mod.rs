pub mod config;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

use crate::{
    render::{
        config::RenderConfig,
        unit::{Color3, Point2},
    },
    HexCoordinate, LayoutCell,
};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "js")]
use wasm_bindgen::prelude::*;

/// Colors assigned to shapes, by shape index. Wraps around if a layout has
/// more shapes than this.
const SHAPE_PALETTE: &[Color3] = &[
    Color3::new(43, 179, 31),
    Color3::new(32, 166, 178),
    Color3::new(214, 204, 107),
    Color3::new(173, 201, 115),
    Color3::new(20, 77, 163),
    Color3::new(191, 191, 191),
    Color3::new(99, 122, 99),
];

/// A layout renderer is used to convert layouts into visual output formats. A
/// renderer is created with a particular [RenderConfig], and from there can be
/// used to render any number of layouts any number of times.
///
/// Config options can't be changed after creating a renderer, but renderers
/// are very cheap to create so if you need to change the config, just create
/// a new one.
#[cfg_attr(feature = "js", wasm_bindgen)]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutRenderer {
    render_config: RenderConfig,
}

impl LayoutRenderer {
    /// Distance from a cell's center to one of its vertices, relative to the
    /// distance between two adjacent centers. Cells are pointy-topped.
    pub const CELL_VERTEX_RADIUS: f64 = 0.577_350_269_189_625_8; // 1/sqrt(3)

    /// Initialize a new renderer with the given options. Returns an error if
    /// the render config is invalid.
    pub fn new(render_config: RenderConfig) -> anyhow::Result<Self> {
        render_config.validate()?;
        Ok(Self { render_config })
    }

    /// Get a reference to the config that this renderer uses
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Get the position of a cell's center in screen space. The planar grid
    /// has y pointing up, so it gets flipped here.
    pub fn cell_position(&self, coordinate: HexCoordinate) -> Point2 {
        let planar = coordinate.to_planar() * self.render_config.scale;
        Point2::new(planar.x, -planar.y)
    }

    /// Get the 6 vertices of a cell centered on the screen-space origin,
    /// clockwise from the top
    pub fn cell_vertices(&self) -> Vec<Point2> {
        let radius = Self::CELL_VERTEX_RADIUS * self.render_config.scale;
        (0..6)
            .map(|i| {
                let angle = (-90.0 + 60.0 * i as f64).to_radians();
                Point2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }

    /// Get the fill color for a cell, based on which shape it came from
    pub fn cell_color(&self, cell: &LayoutCell) -> Color3 {
        SHAPE_PALETTE[cell.shape % SHAPE_PALETTE.len()]
    }
}

// Wasm-friendly API
#[cfg_attr(feature = "js", wasm_bindgen)]
impl LayoutRenderer {
    /// JS version of [Self::cell_position]
    #[cfg_attr(feature = "js", wasm_bindgen(js_name = cellPosition))]
    pub fn js_cell_position(&self, coordinate: &HexCoordinate) -> Point2 {
        self.cell_position(*coordinate)
    }

    /// Render a layout as a 2D SVG, from a top-down perspective. Returns the
    /// SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self, layout: &crate::Layout) -> String {
        svg::layout_to_svg(layout, self).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use validator::ValidationErrors;

    #[test]
    fn test_invalid_config() {
        let err = LayoutRenderer::new(RenderConfig {
            scale: 0.0,
            ..Default::default()
        })
        .unwrap_err();
        let errors = err.downcast::<ValidationErrors>().unwrap();
        assert!(errors.errors().contains_key("scale"));
    }

    #[test]
    fn test_cell_position() {
        let renderer = LayoutRenderer::new(RenderConfig {
            scale: 2.0,
            ..Default::default()
        })
        .unwrap();
        let pos = renderer.cell_position(HexCoordinate::new(0, 1));
        assert_approx_eq!(pos.x, 1.0);
        assert_approx_eq!(pos.y, -(3.0f64.sqrt()));
    }

    #[test]
    fn test_cell_vertices() {
        let renderer = LayoutRenderer::new(RenderConfig::default()).unwrap();
        let vertices = renderer.cell_vertices();
        assert_eq!(vertices.len(), 6);
        // Pointy top
        assert_approx_eq!(vertices[0].x, 0.0);
        assert!(vertices[0].y < 0.0);
        // Adjacent cells share an edge, so the inradius is half the spacing
        let side_midpoint = (vertices[1] + vertices[2]) * 0.5;
        assert_approx_eq!(
            (side_midpoint.x.powi(2) + side_midpoint.y.powi(2)).sqrt(),
            5.0
        );
    }

    #[test]
    fn test_cell_color_wraps() {
        let renderer = LayoutRenderer::new(RenderConfig::default()).unwrap();
        let cell = |shape| LayoutCell {
            coordinate: HexCoordinate::ORIGIN,
            shape,
        };
        assert_eq!(
            renderer.cell_color(&cell(0)),
            renderer.cell_color(&cell(SHAPE_PALETTE.len()))
        );
        assert_ne!(
            renderer.cell_color(&cell(0)),
            renderer.cell_color(&cell(1))
        );
    }
}
