//! This module holds basic types, algorithms and data structures related to
//! hexagon grids.
//!
//! ## Coordinate Systems
//!
//! hexlay uses three closely related coordinate systems:
//!
//! ### Hex Coordinates
//!
//! Hex coordinates address whole cells of the grid. We use the [axial
//! coordinate system described by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-axial):
//! each cell has two integer components, `q` and `r`. A third cube component
//! could be derived as `-q - r`, but nothing here needs it except the distance
//! formula, which inlines it.
//!
//! **Both components are always integers.** Any fractional input (e.g. a
//! position that falls somewhere inside a cell) is rounded at the moment a
//! [HexCoordinate] is created, and never after that. All conversion math is
//! done in `f64` up to that single rounding point.
//!
//! ### Planar Coordinates
//!
//! Planar coordinates are regular 2D cartesian coordinates on the ground
//! plane. A hex coordinate maps to the planar center of its cell via two basis
//! vectors:
//!
//! ```text
//! planar = q * Q_BASIS + r * R_BASIS
//! Q_BASIS = (2, 0) * RADIUS
//! R_BASIS = (1, sqrt(3)) * RADIUS
//! ```
//!
//! With `RADIUS = 0.5`, two adjacent cell centers are exactly 1 unit apart,
//! and cells are "pointy topped". The reverse mapping projects a planar point
//! onto the inverse basis and divides by `RADIUS`.
//!
//! ### World Coordinates
//!
//! World coordinates are the 3D positions of the host scene. A world position
//! becomes planar by dropping its vertical component, and a planar point
//! becomes a world position by inserting one. Which world axis counts as
//! vertical is controlled by [UpAxis].
//!
//! ```text
//! +-------------------+
//! |        +r         |
//! |       /           |
//! |      /            |
//! | -q <o------> +q   |
//! |    /              |
//! |   /               |
//! | -r                |
//! +-------------------+
//! ```

mod data_structure;
mod geometry;
mod unit;

pub use self::{data_structure::*, geometry::*, unit::*};
