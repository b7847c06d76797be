use crate::hex::HexCoordinate;
use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// A set of hex coordinates
pub type HexCoordinateSet = HashSet<HexCoordinate, FnvBuildHasher>;
/// A map of hex coordinates to some `T`
pub type HexCoordinateMap<T> = HashMap<HexCoordinate, T, FnvBuildHasher>;
/// An ORDERED set of hex coordinates. This has some extra memory overhead, so
/// we should only use it when we actually need the ordering.
pub type HexCoordinateIndexSet = IndexSet<HexCoordinate, FnvBuildHasher>;
/// An ORDERED map of hex coordinates to some `T`. This has some extra memory
/// overhead, so we should only use it when we actually need the ordering.
pub type HexCoordinateIndexMap<T> = IndexMap<HexCoordinate, T, FnvBuildHasher>;

/// A trait that denotes any data type that has a singular assigned position in
/// the hex grid.
pub trait HasHexPosition: Sized {
    fn position(&self) -> HexCoordinate;
}

impl HasHexPosition for HexCoordinate {
    fn position(&self) -> HexCoordinate {
        *self
    }
}
