use crate::HexCoordinate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Configuration that defines a level layout. A layout is built by laying
/// down a list of shapes, in order. Two layouts generated from the same config
/// will always be identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutConfig {
    /// Human-readable name for the layout. Only used for display/logging.
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Shapes that make up the layout. Where shapes overlap, each cell is only
    /// included once, and belongs to the first shape that covered it.
    #[validate(custom = "validate_shapes")]
    pub shapes: Vec<ShapeConfig>,
}

/// One group of cells within a layout. Each variant maps to one of the
/// geometry functions in [crate::hex]. Radii are capped at 1000; anything
/// bigger is almost certainly a typo, and would take ages to generate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
    Ring(RingShape),
    Spiral(SpiralShape),
    Hexagon(HexagonShape),
    Flood(FloodShape),
}

/// See [crate::ring]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RingShape {
    pub center: HexCoordinate,
    /// A ring of radius 0 is empty, so that's not allowed here
    #[validate(range(min = 1, max = 1000))]
    pub radius: u32,
}

/// See [crate::spiral]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_spiral"))]
#[serde(default)]
pub struct SpiralShape {
    pub center: HexCoordinate,
    #[validate(range(max = 1000))]
    pub min_radius: u32,
    #[validate(range(max = 1000))]
    pub max_radius: u32,
}

/// See [crate::hexagon]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HexagonShape {
    pub center: HexCoordinate,
    #[validate(range(max = 1000))]
    pub radius: u32,
}

/// A bounded flood fill (see [crate::flood_fill_within]). The fill spreads
/// out from the seeds, and can't pass through any of the blocked cells or
/// travel further than `max_distance` from the nearest seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FloodShape {
    #[validate(length(min = 1))]
    pub seeds: Vec<HexCoordinate>,
    pub blocked: Vec<HexCoordinate>,
    #[validate(range(max = 1000))]
    pub max_distance: u32,
}

impl ShapeConfig {
    /// The largest distance from any of this shape's anchor points to one of
    /// its cells. Useful for sizing renderings.
    pub fn extent(&self) -> u32 {
        match self {
            Self::Ring(RingShape { radius, .. })
            | Self::Hexagon(HexagonShape { radius, .. }) => *radius,
            Self::Spiral(SpiralShape { max_radius, .. }) => *max_radius,
            Self::Flood(FloodShape { max_distance, .. }) => *max_distance,
        }
    }

    /// Can every cell of this shape be represented? A flood fill also looks
    /// one step past its edge, so that has to fit as well.
    pub fn fits_in_grid(&self) -> bool {
        let extent = match self {
            Self::Flood(_) => self.extent().saturating_add(1),
            _ => self.extent(),
        };
        self.anchors()
            .iter()
            .all(|anchor| crate::hex::fits_in_grid(*anchor, extent))
    }

    /// Every anchor point of this shape, i.e. the center or the seeds
    pub fn anchors(&self) -> &[HexCoordinate] {
        match self {
            Self::Ring(RingShape { center, .. })
            | Self::Spiral(SpiralShape { center, .. })
            | Self::Hexagon(HexagonShape { center, .. }) => {
                std::slice::from_ref(center)
            }
            Self::Flood(FloodShape { seeds, .. }) => seeds,
        }
    }
}

// The derive doesn't support enums, so just delegate to the variant
impl Validate for ShapeConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Ring(shape) => shape.validate(),
            Self::Spiral(shape) => shape.validate(),
            Self::Hexagon(shape) => shape.validate(),
            Self::Flood(shape) => shape.validate(),
        }
    }
}

/// A layout needs at least one shape, and every shape has to be valid
fn validate_shapes(shapes: &[ShapeConfig]) -> Result<(), ValidationError> {
    if shapes.is_empty() {
        return Err(ValidationError::new("empty"));
    }

    for (i, shape) in shapes.iter().enumerate() {
        if let Err(errors) = shape.validate() {
            let mut error = ValidationError::new("invalid_shape");
            error.message =
                Some(Cow::Owned(format!("shape {}: {}", i, errors)));
            error.add_param(Cow::Borrowed("index"), &i);
            return Err(error);
        }
        if !shape.fits_in_grid() {
            let mut error = ValidationError::new("shape_out_of_bounds");
            error.add_param(Cow::Borrowed("index"), &i);
            return Err(error);
        }
    }
    Ok(())
}

fn validate_spiral(shape: &SpiralShape) -> Result<(), ValidationError> {
    if shape.min_radius > shape.max_radius {
        let mut error = ValidationError::new("min_radius_exceeds_max_radius");
        error.add_param(Cow::Borrowed("min_radius"), &shape.min_radius);
        error.add_param(Cow::Borrowed("max_radius"), &shape.max_radius);
        return Err(error);
    }
    Ok(())
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name: "layout".into(),
            shapes: vec![ShapeConfig::Hexagon(HexagonShape::default())],
        }
    }
}

impl Default for RingShape {
    fn default() -> Self {
        Self {
            center: HexCoordinate::ORIGIN,
            radius: 1,
        }
    }
}

impl Default for SpiralShape {
    fn default() -> Self {
        Self {
            center: HexCoordinate::ORIGIN,
            min_radius: 0,
            max_radius: 3,
        }
    }
}

impl Default for HexagonShape {
    fn default() -> Self {
        Self {
            center: HexCoordinate::ORIGIN,
            radius: 5,
        }
    }
}

impl Default for FloodShape {
    fn default() -> Self {
        Self {
            seeds: vec![HexCoordinate::ORIGIN],
            blocked: Vec::new(),
            max_distance: 5,
        }
    }
}
