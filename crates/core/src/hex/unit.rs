//! This sub-module contains basic types for units that form the hex coordinate
//! system. See the parent module documentation for more info on the coordinate
//! system.

use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};
#[cfg(feature = "js")]
use wasm_bindgen::prelude::*;

/// `sqrt(3)`, which `f64::sqrt` can't give us in a const context
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Round to the nearest integer, with halves going towards positive infinity.
/// This differs from [f64::round] for negative halves: `-0.5` becomes `0`,
/// not `-1`. Compares against the floor instead of adding `0.5` first, since
/// that addition can itself round up (e.g. `0.49999999999999994`).
fn round_half_up(value: f64) -> i32 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor + 1.0) as i32
    } else {
        floor as i32
    }
}

/// A cell in the hex grid, in axial coordinates. See the module-level
/// documentation for a description of the coordinate system.
///
/// Coordinates are immutable values. Both components are integers; any
/// fractional input is rounded when the coordinate is created.
#[cfg_attr(feature = "js", wasm_bindgen)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    Neg,
    Mul,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({};{})", q, r)]
pub struct HexCoordinate {
    q: i32,
    r: i32,
}

// Non-Wasm API
impl HexCoordinate {
    /// Scale factor shared by the forward and inverse planar bases
    pub const RADIUS: f64 = 0.5;
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Create a coordinate from fractional components, rounding each one to
    /// the nearest integer. This is the only place where rounding happens.
    pub fn from_fractional(q: f64, r: f64) -> Self {
        Self::new(round_half_up(q), round_half_up(r))
    }

    /// Planar offset of one step along `q`
    pub fn q_basis() -> Vector2<f64> {
        Vector2::new(2.0, 0.0) * Self::RADIUS
    }

    /// Planar offset of one step along `r`
    pub fn r_basis() -> Vector2<f64> {
        Vector2::new(1.0, SQRT_3) * Self::RADIUS
    }

    /// Projection vector that recovers `q` (times [Self::RADIUS]) from a
    /// planar point
    pub fn q_inverse() -> Vector2<f64> {
        Vector2::new(0.5, -SQRT_3 / 6.0)
    }

    /// Projection vector that recovers `r` (times [Self::RADIUS]) from a
    /// planar point
    pub fn r_inverse() -> Vector2<f64> {
        Vector2::new(0.0, SQRT_3 / 3.0)
    }

    /// Find the cell containing a planar point
    pub fn from_planar(planar: Vector2<f64>) -> Self {
        let q = planar.dot(&Self::q_inverse()) / Self::RADIUS;
        let r = planar.dot(&Self::r_inverse()) / Self::RADIUS;
        Self::from_fractional(q, r)
    }

    /// Find the cell containing a world position, treating the default
    /// [UpAxis] as vertical.
    pub fn from_world(world: Vector3<f64>) -> Self {
        Self::from_world_along(world, UpAxis::default())
    }

    /// Find the cell containing a world position, ignoring the given vertical
    /// axis.
    pub fn from_world_along(world: Vector3<f64>, up: UpAxis) -> Self {
        Self::from_planar(up.to_planar(world))
    }

    /// Get the planar center of this cell
    pub fn to_planar(self) -> Vector2<f64> {
        Self::q_basis() * self.q as f64 + Self::r_basis() * self.r as f64
    }

    /// Get the world position of this cell's center, with the vertical
    /// component (along the default [UpAxis]) set to `vertical`.
    pub fn to_world(self, vertical: f64) -> Vector3<f64> {
        self.to_world_along(vertical, UpAxis::default())
    }

    /// Get the world position of this cell's center, with the component along
    /// `up` set to `vertical`.
    pub fn to_world_along(self, vertical: f64, up: UpAxis) -> Vector3<f64> {
        up.to_world(self.to_planar(), vertical)
    }

    /// Calculate the path distance between two cells, meaning the number of
    /// hops it takes to get from one to the other. 0 if the cells are equal,
    /// 1 if they're adjacent, 2 if there is 1 cell between them, etc.
    ///
    /// Calculated in 64 bits, so any two coordinates have a distance, even at
    /// opposite ends of the `i32` range.
    pub fn distance_to(self, other: HexCoordinate) -> u64 {
        // https://www.redblobgames.com/grids/hexagons/#distance-axial
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        (dq.unsigned_abs() + (dq + dr).unsigned_abs() + dr.unsigned_abs())
            // Each hop changes exactly two of the three cube components
            / 2
    }

    /// Get the cell one step away in the given direction
    pub fn neighbor(self, direction: HexDirection) -> Self {
        self + direction.to_vector()
    }

    /// Get the cell one step away in the direction with the given index. Any
    /// index is accepted; it wraps around the 6 directions.
    pub fn neighbor_at(self, index: i64) -> Self {
        self.neighbor(HexDirection::from_index(index))
    }

    /// Get an iterator of all the cells directly adjacent to this one, in
    /// [HexDirection] order. The iterator will always contain exactly 6
    /// values.
    pub fn neighbors(self) -> impl Iterator<Item = HexCoordinate> {
        HexDirection::iter().map(move |dir| self.neighbor(dir))
    }
}

// Wasm-friendly API
#[cfg_attr(feature = "js", wasm_bindgen)]
impl HexCoordinate {
    /// Construct a coordinate from (possibly fractional) components. See
    /// [Self::from_fractional].
    #[cfg_attr(feature = "js", wasm_bindgen(constructor))]
    pub fn create(q: f64, r: f64) -> Self {
        Self::from_fractional(q, r)
    }

    #[cfg_attr(feature = "js", wasm_bindgen(getter))]
    pub fn q(&self) -> i32 {
        self.q
    }

    #[cfg_attr(feature = "js", wasm_bindgen(getter))]
    pub fn r(&self) -> i32 {
        self.r
    }

    /// Render as `(q;r)`
    #[cfg_attr(feature = "js", wasm_bindgen(js_name = toString))]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

#[cfg(feature = "js")]
#[wasm_bindgen]
impl HexCoordinate {
    /// JS version of [Self::distance_to], which borrows the other coordinate
    /// so the JS object stays usable. Returned as a plain number; every
    /// possible distance fits in an `f64` exactly.
    #[wasm_bindgen(js_name = distanceTo)]
    pub fn js_distance_to(&self, other: &HexCoordinate) -> f64 {
        self.distance_to(*other) as f64
    }
}

/// The 6 directions in which cells line up side-to-side. Each direction also
/// points from a cell's center to one of its neighbors.
///
/// The declaration order is significant: it's the order in which neighbors,
/// rings and flood fills are walked, and each direction's index in it
/// determines facing (see [HexDirection::facing_degrees]). Going through the
/// list turns counter-clockwise on the planar grid, starting east.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HexDirection {
    /// `(1, 0)`
    #[default]
    East,
    /// `(0, 1)`
    NorthEast,
    /// `(-1, 1)`
    NorthWest,
    /// `(-1, 0)`
    West,
    /// `(0, -1)`
    SouthWest,
    /// `(1, -1)`
    SouthEast,
}

impl HexDirection {
    /// All directions, in index order
    pub const ALL: &'static [Self] = &[
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Get the direction for any integer index. Indexes wrap around, so `6`
    /// is [Self::East] again and `-1` is [Self::SouthEast].
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(Self::ALL.len() as i64) as usize]
    }

    /// Derive a stable direction from a cell's position. This is used to give
    /// scattered objects varied but reproducible orientations: the index is
    /// `q * 100 + r`, wrapped into `[0, 6)`.
    pub fn from_coordinate_hash(coordinate: HexCoordinate) -> Self {
        Self::from_index(coordinate.q() as i64 * 100 + coordinate.r() as i64)
    }

    /// Index of this direction, in `[0, 6)`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the direction that is directly opposite this one
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() as i64 + 3)
    }

    /// Get a vector offset that would move a coordinate one cell in this
    /// direction
    pub fn to_vector(self) -> HexCoordinate {
        match self {
            Self::East => HexCoordinate::new(1, 0),
            Self::NorthEast => HexCoordinate::new(0, 1),
            Self::NorthWest => HexCoordinate::new(-1, 1),
            Self::West => HexCoordinate::new(-1, 0),
            Self::SouthWest => HexCoordinate::new(0, -1),
            Self::SouthEast => HexCoordinate::new(1, -1),
        }
    }

    /// Rotation (in degrees, around the vertical axis) of an object facing
    /// this direction: `-60` per index step.
    pub fn facing_degrees(self) -> f64 {
        -60.0 * self.index() as f64
    }
}

/// The world axis that points "up", i.e. the one that's dropped when a world
/// position is flattened onto the hex grid.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UpAxis {
    /// The grid lies on the world `x`/`z` plane
    Y,
    /// The grid lies on the world `x`/`y` plane
    #[default]
    Z,
}

impl UpAxis {
    /// Drop the vertical component of a world position
    pub fn to_planar(self, world: Vector3<f64>) -> Vector2<f64> {
        match self {
            Self::Y => Vector2::new(world.x, world.z),
            Self::Z => Vector2::new(world.x, world.y),
        }
    }

    /// Build a world position from a planar point plus a vertical component
    pub fn to_world(self, planar: Vector2<f64>, vertical: f64) -> Vector3<f64> {
        match self {
            Self::Y => Vector3::new(planar.x, vertical, planar.y),
            Self::Z => Vector3::new(planar.x, planar.y, vertical),
        }
    }

    /// Get the vertical component of a world position
    pub fn vertical(self, world: Vector3<f64>) -> f64 {
        match self {
            Self::Y => world.y,
            Self::Z => world.z,
        }
    }

    /// Euler angles (in degrees) for a rotation around this axis only
    pub fn euler_angles(self, degrees: f64) -> Vector3<f64> {
        match self {
            Self::Y => Vector3::new(0.0, degrees, 0.0),
            Self::Z => Vector3::new(0.0, 0.0, degrees),
        }
    }
}
