//! Placement of scene objects on the hex grid. The host scene graph owns the
//! objects; this module only computes where they should go and which way they
//! should face, and talks to the host through [NodeTransform].

use crate::hex::{HexCoordinate, HexDirection, UpAxis};
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// The slice of a host scene node that [HexNode] needs to read and write.
/// Positions are world-space 3D vectors; the host decides what units mean.
pub trait NodeTransform {
    /// Absolute position of the node
    fn world_position(&self) -> Vector3<f64>;

    /// Position of the node relative to its parent
    fn local_position(&self) -> Vector3<f64>;

    fn set_local_position(&mut self, position: Vector3<f64>);

    /// Set the node's rotation, as Euler angles in degrees
    fn set_euler_angles(&mut self, angles: Vector3<f64>);
}

/// Snaps a scene object to the center of the cell it's in, and rotates it to
/// face one of the 6 [HexDirection]s.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexNode {
    /// Arbitrary identifier, only used for logging
    pub id: u32,

    /// The direction this node faces. If `randomize_direction` is enabled,
    /// this gets overwritten every time the transform is applied.
    pub direction: HexDirection,

    /// Derive the facing direction from the node's cell instead of using
    /// `direction`. See [HexDirection::from_coordinate_hash]. The result is
    /// deterministic, so the same cell always gets the same direction.
    pub randomize_direction: bool,

    /// Force the node onto the ground plane. If disabled, the node's current
    /// height is kept.
    pub lock_vertical: bool,

    /// Which world axis is vertical
    pub up_axis: UpAxis,
}

/// The outcome of placing a [HexNode]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// The cell the node was snapped to
    pub coordinate: HexCoordinate,
    pub direction: HexDirection,
    /// New local position of the node
    pub position: Vector3<f64>,
    /// New rotation of the node, in degrees. Only the vertical axis is ever
    /// non-zero.
    pub euler_angles: Vector3<f64>,
}

impl HexNode {
    /// Get the cell that the node is currently in, based on its world
    /// position
    pub fn hex(&self, node: &impl NodeTransform) -> HexCoordinate {
        HexCoordinate::from_world_along(node.world_position(), self.up_axis)
    }

    /// Get the cell that the node is currently in, based on its local
    /// position
    pub fn local_hex(&self, node: &impl NodeTransform) -> HexCoordinate {
        HexCoordinate::from_world_along(node.local_position(), self.up_axis)
    }

    /// Compute where a node with the given positions should be placed. This
    /// doesn't modify anything, see [Self::apply_transform] for that.
    ///
    /// The facing direction is derived from the **world** position (so it's
    /// stable no matter how the node is parented), while the new position is
    /// derived from the **local** position.
    pub fn placement(
        &self,
        world_position: Vector3<f64>,
        local_position: Vector3<f64>,
    ) -> Placement {
        let direction = if self.randomize_direction {
            HexDirection::from_coordinate_hash(
                HexCoordinate::from_world_along(world_position, self.up_axis),
            )
        } else {
            self.direction
        };

        let vertical = if self.lock_vertical {
            0.0
        } else {
            self.up_axis.vertical(local_position)
        };
        let coordinate =
            HexCoordinate::from_world_along(local_position, self.up_axis);

        Placement {
            coordinate,
            direction,
            position: coordinate.to_world_along(vertical, self.up_axis),
            euler_angles: self
                .up_axis
                .euler_angles(direction.facing_degrees()),
        }
    }

    /// Snap the node to its cell and rotate it. If direction randomization is
    /// enabled, the derived direction is stored back on this component.
    pub fn apply_transform(
        &mut self,
        node: &mut impl NodeTransform,
    ) -> Placement {
        let placement =
            self.placement(node.world_position(), node.local_position());
        debug!(
            "Placing node {} at {} facing {:?}",
            self.id, placement.coordinate, placement.direction
        );

        self.direction = placement.direction;
        node.set_local_position(placement.position);
        node.set_euler_angles(placement.euler_angles);
        placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    /// A scene node with a parent offset, so world and local positions differ
    #[derive(Debug, Default)]
    struct TestNode {
        parent: Vector3<f64>,
        local: Vector3<f64>,
        angles: Vector3<f64>,
    }

    impl NodeTransform for TestNode {
        fn world_position(&self) -> Vector3<f64> {
            self.parent + self.local
        }

        fn local_position(&self) -> Vector3<f64> {
            self.local
        }

        fn set_local_position(&mut self, position: Vector3<f64>) {
            self.local = position;
        }

        fn set_euler_angles(&mut self, angles: Vector3<f64>) {
            self.angles = angles;
        }
    }

    fn assert_vec_eq(actual: Vector3<f64>, expected: Vector3<f64>) {
        assert_approx_eq!(actual.x, expected.x);
        assert_approx_eq!(actual.y, expected.y);
        assert_approx_eq!(actual.z, expected.z);
    }

    #[test]
    fn test_fixed_direction() {
        let mut hex_node = HexNode {
            direction: HexDirection::NorthWest,
            ..Default::default()
        };
        let target = HexCoordinate::new(-2, 1);
        let mut node = TestNode {
            // Slightly off-center
            local: target.to_world(0.0) + Vector3::new(0.1, 0.1, 0.0),
            ..Default::default()
        };

        let placement = hex_node.apply_transform(&mut node);
        assert_eq!(placement.coordinate, target);
        assert_eq!(placement.direction, HexDirection::NorthWest);
        assert_vec_eq(node.local, target.to_world(0.0));
        assert_vec_eq(node.angles, Vector3::new(0.0, 0.0, -120.0));
    }

    #[test]
    fn test_randomized_direction() {
        let mut hex_node = HexNode {
            randomize_direction: true,
            ..Default::default()
        };
        let mut node = TestNode {
            local: HexCoordinate::new(2, 3).to_world(0.0),
            ..Default::default()
        };

        // 2 * 100 + 3 = 203, and 203 mod 6 = 5
        let placement = hex_node.apply_transform(&mut node);
        assert_eq!(placement.direction, HexDirection::SouthEast);
        assert_eq!(hex_node.direction, HexDirection::SouthEast);
        assert_vec_eq(node.angles, Vector3::new(0.0, 0.0, -300.0));

        // Same cell, same answer
        let again = hex_node.placement(node.world_position(), node.local);
        assert_eq!(again.direction, HexDirection::SouthEast);
    }

    #[test]
    fn test_direction_uses_world_position() {
        let hex_node = HexNode {
            randomize_direction: true,
            ..Default::default()
        };
        let node = TestNode {
            parent: HexCoordinate::new(2, 3).to_world(0.0),
            local: HexCoordinate::ORIGIN.to_world(0.0),
            ..Default::default()
        };

        let placement =
            hex_node.placement(node.world_position(), node.local_position());
        // Direction comes from the world cell (2;3), position from the local
        assert_eq!(placement.direction, HexDirection::SouthEast);
        assert_eq!(placement.coordinate, HexCoordinate::ORIGIN);
        assert_eq!(hex_node.hex(&node), HexCoordinate::new(2, 3));
        assert_eq!(hex_node.local_hex(&node), HexCoordinate::ORIGIN);
    }

    #[test]
    fn test_vertical() {
        let target = HexCoordinate::new(1, 1);
        let node = TestNode {
            local: target.to_world(4.5),
            ..Default::default()
        };

        let kept =
            HexNode::default().placement(node.world_position(), node.local);
        assert_approx_eq!(kept.position.z, 4.5);

        let locked = HexNode {
            lock_vertical: true,
            ..Default::default()
        }
        .placement(node.world_position(), node.local);
        assert_approx_eq!(locked.position.z, 0.0);
        assert_eq!(locked.coordinate, target);
    }

    #[test]
    fn test_y_up() {
        let mut hex_node = HexNode {
            direction: HexDirection::East,
            lock_vertical: false,
            up_axis: UpAxis::Y,
            ..Default::default()
        };
        let target = HexCoordinate::new(3, -1);
        let mut node = TestNode {
            local: target.to_world_along(2.0, UpAxis::Y),
            ..Default::default()
        };

        let placement = hex_node.apply_transform(&mut node);
        assert_eq!(placement.coordinate, target);
        assert_approx_eq!(node.local.y, 2.0);
        assert_vec_eq(node.angles, Vector3::new(0.0, 0.0, 0.0));

        hex_node.direction = HexDirection::West;
        hex_node.apply_transform(&mut node);
        assert_vec_eq(node.angles, Vector3::new(0.0, -180.0, 0.0));
    }
}
