//! Algorithms that generate groups of cells: rings, spirals, filled hexagons
//! and flood fills.

use crate::hex::{HexCoordinate, HexCoordinateSet, HexDirection};
use std::{cmp, collections::VecDeque};
use strum::IntoEnumIterator;

/// Check that every cell within `radius` of `center` can be represented, i.e.
/// both axes stay inside the `i32` range. [ring], [spiral] and [hexagon]
/// require this of their input.
pub fn fits_in_grid(center: HexCoordinate, radius: u32) -> bool {
    let radius = i64::from(radius);
    let fits = |value: i32| {
        let value = i64::from(value);
        value - radius >= i64::from(i32::MIN)
            && value + radius <= i64::from(i32::MAX)
    };
    fits(center.q()) && fits(center.r())
}

/// Get every cell at exactly `radius` steps from `center`.
///
/// The walk starts at `center + (0, -radius)`, then takes `radius` steps in
/// each [HexDirection] (in order), recording each cell _before_ stepping off
/// of it. So the result always has exactly `6 * radius` cells, and a radius of
/// 0 produces an empty ring. If you want the center itself, see [spiral].
///
/// # Panics
///
/// If the ring runs off the edge of the coordinate space (see
/// [fits_in_grid]).
pub fn ring(center: HexCoordinate, radius: u32) -> Vec<HexCoordinate> {
    assert!(
        fits_in_grid(center, radius),
        "ring of radius {} around {} is out of bounds",
        radius,
        center
    );
    let mut cells = Vec::with_capacity(6 * radius as usize);
    let mut current = center + HexCoordinate::new(0, -(radius as i32));
    for direction in HexDirection::iter() {
        let step = direction.to_vector();
        for _ in 0..radius {
            cells.push(current);
            current += step;
        }
    }
    cells
}

/// Concatenate the rings around `center` for every radius from `min_radius`
/// to `max_radius` (inclusive), innermost first. A ring of radius 0 would be
/// empty, so if `min_radius` is 0 the center itself is emitted first instead.
///
/// Returns an empty list if `min_radius > max_radius` (unless `min_radius` is
/// 0, in which case you just get the center).
///
/// # Panics
///
/// If the outermost ring runs off the edge of the coordinate space (see
/// [fits_in_grid]).
pub fn spiral(
    center: HexCoordinate,
    min_radius: u32,
    max_radius: u32,
) -> Vec<HexCoordinate> {
    let mut cells = Vec::new();
    let mut min_radius = min_radius;
    if min_radius == 0 {
        cells.push(center);
        min_radius = 1;
    }
    for radius in min_radius..=max_radius {
        cells.extend(ring(center, radius));
    }
    cells
}

/// Get every cell within `radius` steps of `center`, in a super hexagon
/// pattern (the cells make up the shape of a larger hexagon). Contains the
/// same cells as `spiral(center, 0, radius)`, but ordered by row instead of by
/// ring. See [crate::util::hexagon_len] for the size of the result.
///
/// # Panics
///
/// If the hexagon runs off the edge of the coordinate space (see
/// [fits_in_grid]).
pub fn hexagon(center: HexCoordinate, radius: u32) -> Vec<HexCoordinate> {
    assert!(
        fits_in_grid(center, radius),
        "hexagon of radius {} around {} is out of bounds",
        radius,
        center
    );
    let mut cells = Vec::with_capacity(crate::util::hexagon_len(radius));
    let r = radius as i32;
    for q in -r..=r {
        // If we just do [-r,r] for the second axis as well, then we end up
        // with a diamond pattern instead of a super hexagon
        // https://www.redblobgames.com/grids/hexagons/#range
        let r_min = cmp::max(-r, -q - r);
        let r_max = cmp::min(r, -q + r);
        for s in r_min..=r_max {
            cells.push(center + HexCoordinate::new(q, s));
        }
    }
    cells
}

/// Breadth-first traversal over the grid, starting from any number of seed
/// cells. Created via [flood_fill] or [flood_fill_within].
///
/// This is a lazy iterator. Cells are yielded in visitation order: first the
/// seeds (in the order they were given), then their neighbors in FIFO order,
/// expanding each cell's neighbors in [HexDirection] order. Each cell is
/// yielded at most once.
///
/// The grid has no edges, so an unbounded fill never ends. Bound it with a
/// passability predicate ([flood_fill_within]) or with iterator adapters like
/// [Iterator::take].
#[derive(Clone, Debug)]
pub struct FloodFill<P> {
    frontier: VecDeque<HexCoordinate>,
    /// Every cell that's ever been queued (or rejected), so nothing gets
    /// checked twice
    visited: HexCoordinateSet,
    passable: P,
}

impl<P: FnMut(HexCoordinate) -> bool> FloodFill<P> {
    fn new(
        seeds: impl IntoIterator<Item = HexCoordinate>,
        mut passable: P,
    ) -> Self {
        let mut frontier = VecDeque::new();
        let mut visited = HexCoordinateSet::default();
        for seed in seeds {
            if visited.insert(seed) && passable(seed) {
                frontier.push_back(seed);
            }
        }
        Self {
            frontier,
            visited,
            passable,
        }
    }
}

impl<P: FnMut(HexCoordinate) -> bool> Iterator for FloodFill<P> {
    type Item = HexCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.frontier.pop_front()?;
        for next in current.neighbors() {
            if self.visited.insert(next) && (self.passable)(next) {
                self.frontier.push_back(next);
            }
        }
        Some(current)
    }
}

/// Flood fill the entire (infinite) grid outward from the given seeds. See
/// [FloodFill] for ordering details. An empty list of seeds produces nothing.
///
/// ```
/// use hexlay::{flood_fill, HexCoordinate};
///
/// // Everything within 2 steps of the origin
/// let cells: Vec<_> = flood_fill([HexCoordinate::ORIGIN]).take(19).collect();
/// assert!(cells.iter().all(|c| c.distance_to(HexCoordinate::ORIGIN) <= 2));
/// ```
pub fn flood_fill(
    seeds: impl IntoIterator<Item = HexCoordinate>,
) -> FloodFill<fn(HexCoordinate) -> bool> {
    let everywhere: fn(HexCoordinate) -> bool = |_| true;
    FloodFill::new(seeds, everywhere)
}

/// Flood fill outward from the given seeds, only visiting cells that satisfy
/// `passable`. Seeds that aren't passable are skipped. The traversal ends once
/// every passable cell reachable from the seeds has been visited.
pub fn flood_fill_within<P: FnMut(HexCoordinate) -> bool>(
    seeds: impl IntoIterator<Item = HexCoordinate>,
    passable: P,
) -> FloodFill<P> {
    FloodFill::new(seeds, passable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hexagon_len;

    fn assert_unique(cells: &[HexCoordinate]) {
        let set: HexCoordinateSet = cells.iter().copied().collect();
        assert_eq!(set.len(), cells.len(), "duplicate cells in {:?}", cells);
    }

    #[test]
    fn test_ring_order() {
        assert_eq!(
            ring(HexCoordinate::ORIGIN, 1),
            vec![
                HexCoordinate::new(0, -1),
                HexCoordinate::new(1, -1),
                HexCoordinate::new(1, 0),
                HexCoordinate::new(0, 1),
                HexCoordinate::new(-1, 1),
                HexCoordinate::new(-1, 0),
            ]
        );
    }

    #[test]
    fn test_ring_len() {
        let center = HexCoordinate::new(5, -2);
        assert!(ring(center, 0).is_empty());
        for radius in 1..10 {
            let cells = ring(center, radius);
            assert_eq!(cells.len(), 6 * radius as usize);
            assert_unique(&cells);
            for cell in cells {
                assert_eq!(center.distance_to(cell), u64::from(radius));
            }
        }
    }

    #[test]
    fn test_fits_in_grid() {
        let low = HexCoordinate::new(0, i32::MIN);
        assert!(fits_in_grid(low, 0));
        assert!(!fits_in_grid(low, 1));
        assert!(fits_in_grid(HexCoordinate::new(i32::MAX - 3, 0), 3));
        assert!(!fits_in_grid(HexCoordinate::new(i32::MAX - 3, 0), 4));
        assert!(!fits_in_grid(HexCoordinate::ORIGIN, u32::MAX));

        // Right up against the edge still works
        let edge = HexCoordinate::new(i32::MIN + 1, i32::MAX - 1);
        let cells = ring(edge, 1);
        assert_eq!(cells.len(), 6);
        assert_eq!(hexagon(edge, 1).len(), 7);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_ring_out_of_bounds() {
        ring(HexCoordinate::new(0, i32::MIN), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_hexagon_out_of_bounds() {
        hexagon(HexCoordinate::ORIGIN, u32::MAX);
    }

    #[test]
    fn test_spiral() {
        let center = HexCoordinate::new(-1, 3);
        assert_eq!(spiral(center, 0, 0), vec![center]);

        let cells = spiral(center, 0, 2);
        assert_eq!(cells.len(), 19);
        assert_eq!(cells[0], center);
        assert_eq!(&cells[1..7], ring(center, 1).as_slice());
        assert_unique(&cells);

        assert_eq!(spiral(center, 2, 3).len(), 12 + 18);
        assert_eq!(spiral(center, 3, 3), ring(center, 3));
        assert!(spiral(center, 3, 2).is_empty());
    }

    #[test]
    fn test_hexagon() {
        let center = HexCoordinate::new(2, 2);
        for radius in 0..6 {
            let cells = hexagon(center, radius);
            assert_eq!(cells.len(), hexagon_len(radius));
            assert_unique(&cells);

            let from_hexagon: HexCoordinateSet = cells.into_iter().collect();
            let from_spiral: HexCoordinateSet =
                spiral(center, 0, radius).into_iter().collect();
            assert_eq!(from_hexagon, from_spiral);
        }
    }

    #[test]
    fn test_flood_fill_empty() {
        assert_eq!(flood_fill(Vec::<HexCoordinate>::new()).next(), None);
        assert_eq!(
            flood_fill_within([HexCoordinate::ORIGIN], |_| false).next(),
            None
        );
    }

    #[test]
    fn test_flood_fill_order() {
        let origin = HexCoordinate::ORIGIN;
        let cells: Vec<_> = flood_fill([origin]).take(19).collect();

        // The seed comes first, then its neighbors in direction order
        assert_eq!(cells[0], origin);
        assert_eq!(&cells[1..7], origin.neighbors().collect::<Vec<_>>());
        assert_unique(&cells);

        // BFS order is also distance order on this grid
        let distances: Vec<_> =
            cells.iter().map(|cell| origin.distance_to(*cell)).collect();
        let mut sorted = distances.clone();
        sorted.sort_unstable();
        assert_eq!(distances, sorted);
        assert_eq!(*distances.last().unwrap(), 2);
    }

    #[test]
    fn test_flood_fill_within_radius() {
        let center = HexCoordinate::new(3, 4);
        let cells: Vec<_> =
            flood_fill_within([center], |cell| center.distance_to(cell) <= 3)
                .collect();
        assert_eq!(cells.len(), hexagon_len(3));
        assert_unique(&cells);
    }

    #[test]
    fn test_flood_fill_multiple_seeds() {
        let a = HexCoordinate::ORIGIN;
        let b = HexCoordinate::new(10, 0);
        let cells: Vec<_> = flood_fill_within([a, b, a], |cell| {
            a.distance_to(cell) <= 1 || b.distance_to(cell) <= 1
        })
        .collect();

        // Duplicate seeds are dropped, and both islands get filled
        assert_eq!(&cells[..2], &[a, b]);
        assert_eq!(cells.len(), 14);
        assert_unique(&cells);
    }
}
