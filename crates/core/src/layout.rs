use crate::{
    config::{FloodShape, HexagonShape, RingShape, ShapeConfig, SpiralShape},
    hex::{
        flood_fill_within, hexagon, ring, spiral, HasHexPosition,
        HexCoordinate, HexCoordinateIndexMap, HexCoordinateSet,
    },
    timed, LayoutConfig,
};
use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "js")]
use wasm_bindgen::prelude::*;

/// A generated level layout: an ordered, deduplicated set of cells, plus the
/// config that produced them.
///
/// ## Serialization
/// Layouts can be serialized to JSON (with the `json` feature). All fields
/// and values use snake casing, and cells are stored as a list rather than a
/// keyed object, so consumers don't need to support complex map keys.
#[cfg_attr(feature = "js", wasm_bindgen)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// The config used to generate this layout. Generation is deterministic,
    /// and once the layout has been generated the config can never change.
    config: LayoutConfig,

    /// Every cell in the layout, in the order they were laid down
    // Serialize as a vec because coordinates can't be keys
    #[serde(with = "crate::util::serde_coordinate_map_to_vec")]
    cells: HexCoordinateIndexMap<LayoutCell>,
}

/// A single cell in a [Layout]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub coordinate: HexCoordinate,
    /// Index of the shape (within [LayoutConfig::shapes]) that this cell came
    /// from
    pub shape: usize,
}

impl HasHexPosition for LayoutCell {
    fn position(&self) -> HexCoordinate {
        self.coordinate
    }
}

// Non-Wasm API
impl Layout {
    /// Generate a new layout from the given config. Returns an error if the
    /// config is invalid, with [validator::ValidationErrors] as the root
    /// cause.
    pub fn generate(config: LayoutConfig) -> anyhow::Result<Self> {
        info!("Generating layout with config {:#?}", config);

        config.validate().context("invalid config")?;

        let cells = timed!(
            "Layout generation",
            log::Level::Info,
            Self::lay_shapes(&config.shapes)
        );

        Ok(Self { config, cells })
    }

    fn lay_shapes(shapes: &[ShapeConfig]) -> HexCoordinateIndexMap<LayoutCell> {
        let mut cells = HexCoordinateIndexMap::default();
        for (shape_index, shape) in shapes.iter().enumerate() {
            let before = cells.len();
            for coordinate in shape_cells(shape) {
                // First shape to claim a cell keeps it
                cells.entry(coordinate).or_insert(LayoutCell {
                    coordinate,
                    shape: shape_index,
                });
            }
            debug!(
                "Shape {} added {} cells",
                shape_index,
                cells.len() - before
            );
        }
        cells
    }

    /// Get a reference to the config that defines this layout
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Get every cell in the layout, in generation order
    pub fn cells(&self) -> impl Iterator<Item = &LayoutCell> {
        self.cells.values()
    }

    /// Get just the coordinates of every cell, in generation order
    pub fn coordinates(&self) -> impl Iterator<Item = HexCoordinate> + '_ {
        self.cells.keys().copied()
    }

    /// Is the given cell part of this layout?
    pub fn contains(&self, coordinate: HexCoordinate) -> bool {
        self.cells.contains_key(&coordinate)
    }

    /// Get the cell at the given position, if it's in the layout
    pub fn get(&self, coordinate: HexCoordinate) -> Option<&LayoutCell> {
        self.cells.get(&coordinate)
    }

    /// Deserialize a layout from JSON. A layout can be serialized into JSON
    /// with [Layout::to_json]. Will fail if the input is malformed.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing layout")
    }

    /// Serialize this layout into JSON. This is a recoverable format, which
    /// can be loaded back into a [Layout] with [Layout::from_json].
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing layout")
    }
}

// Wasm-friendly API
#[cfg_attr(feature = "js", wasm_bindgen)]
impl Layout {
    /// Number of cells in the layout
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// JS version of [Self::contains]
    #[cfg_attr(feature = "js", wasm_bindgen(js_name = contains))]
    pub fn contains_coordinate(&self, coordinate: &HexCoordinate) -> bool {
        self.contains(*coordinate)
    }
}

/// Get every cell covered by a single shape, in that shape's natural order.
/// May contain cells that other shapes also cover.
fn shape_cells(shape: &ShapeConfig) -> Vec<HexCoordinate> {
    match shape {
        ShapeConfig::Ring(RingShape { center, radius }) => {
            ring(*center, *radius)
        }
        ShapeConfig::Spiral(SpiralShape {
            center,
            min_radius,
            max_radius,
        }) => spiral(*center, *min_radius, *max_radius),
        ShapeConfig::Hexagon(HexagonShape { center, radius }) => {
            hexagon(*center, *radius)
        }
        ShapeConfig::Flood(FloodShape {
            seeds,
            blocked,
            max_distance,
        }) => {
            let blocked: HexCoordinateSet = blocked.iter().copied().collect();
            let max_distance = u64::from(*max_distance);
            flood_fill_within(seeds.iter().copied(), |cell| {
                !blocked.contains(&cell)
                    && seeds
                        .iter()
                        .any(|seed| seed.distance_to(cell) <= max_distance)
            })
            .collect()
        }
    }
}
