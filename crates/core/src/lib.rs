//! Hexlay is the hex grid core of a browser game. This crate contains axial
//! coordinate math, grid geometry (rings, spirals, flood fills), a component
//! for snapping scene objects onto the grid, and level layout generation.
//! Presentation layers are implemented elsewhere.
//!
//! ```
//! use hexlay::{spiral, HexCoordinate, Layout, LayoutConfig};
//!
//! let center = HexCoordinate::new(2, -1);
//! assert_eq!(spiral(center, 0, 2).len(), 19);
//!
//! let layout = Layout::generate(LayoutConfig::default()).unwrap();
//! println!("{} cells", layout.len());
//! ```
//!
//! See [LayoutConfig] for details on how layouts can be customized, and
//! [hex] for a description of the coordinate systems.

pub mod hex;
mod config;
mod layout;
mod node;
mod render;
mod util;

// Re-export for the wasm and CLI crates
pub use anyhow;
pub use validator;

pub use crate::{
    config::{
        FloodShape, HexagonShape, LayoutConfig, RingShape, ShapeConfig,
        SpiralShape,
    },
    hex::{
        fits_in_grid, flood_fill, flood_fill_within, hexagon, ring, spiral,
        FloodFill, HasHexPosition, HexCoordinate, HexCoordinateIndexMap,
        HexCoordinateIndexSet, HexCoordinateMap, HexCoordinateSet,
        HexDirection, UpAxis,
    },
    layout::{Layout, LayoutCell},
    node::{HexNode, NodeTransform, Placement},
    render::{
        config::RenderConfig,
        unit::{Color3, Point2},
        LayoutRenderer,
    },
    util::hexagon_len,
};
// Positions passed to node placement and coordinate conversion
pub use nalgebra::{Vector2, Vector3};
