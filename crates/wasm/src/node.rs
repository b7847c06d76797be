use hexlay::{
    HexCoordinate, HexDirection, HexNode, NodeTransform, UpAxis, Vector3,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Anything with numeric `x`, `y` and `z` fields
    #[wasm_bindgen(typescript_type = "Vec3Like")]
    pub type Vec3Like;

    #[wasm_bindgen(method, getter)]
    fn x(this: &Vec3Like) -> f64;
    #[wasm_bindgen(method, getter)]
    fn y(this: &Vec3Like) -> f64;
    #[wasm_bindgen(method, getter)]
    fn z(this: &Vec3Like) -> f64;

    /// The host engine's scene node. See the `SceneNode` TS interface.
    #[wasm_bindgen(typescript_type = "SceneNode")]
    pub type SceneNode;

    #[wasm_bindgen(method, getter, js_name = worldPosition)]
    fn world_position(this: &SceneNode) -> Vec3Like;
    #[wasm_bindgen(method, getter)]
    fn position(this: &SceneNode) -> Vec3Like;
    #[wasm_bindgen(method, js_name = setPosition)]
    fn set_position(this: &SceneNode, x: f64, y: f64, z: f64);
    #[wasm_bindgen(method, js_name = setRotationFromEuler)]
    fn set_rotation_from_euler(this: &SceneNode, x: f64, y: f64, z: f64);
}

#[wasm_bindgen(typescript_custom_section)]
const TS_SCENE_NODE: &'static str = r#"
export interface Vec3Like {
    x: number;
    y: number;
    z: number;
}

/**
 * The parts of a host scene node that `HexNodeComponent` needs. Rotations
 * are Euler angles in degrees.
 */
export interface SceneNode {
    readonly worldPosition: Vec3Like;
    readonly position: Vec3Like;
    setPosition(x: number, y: number, z: number): void;
    setRotationFromEuler(x: number, y: number, z: number): void;
}
"#;

fn to_vector(value: &Vec3Like) -> Vector3<f64> {
    Vector3::new(value.x(), value.y(), value.z())
}

impl NodeTransform for &SceneNode {
    fn world_position(&self) -> Vector3<f64> {
        to_vector(&SceneNode::world_position(self))
    }

    fn local_position(&self) -> Vector3<f64> {
        to_vector(&self.position())
    }

    fn set_local_position(&mut self, position: Vector3<f64>) {
        self.set_position(position.x, position.y, position.z);
    }

    fn set_euler_angles(&mut self, angles: Vector3<f64>) {
        self.set_rotation_from_euler(angles.x, angles.y, angles.z);
    }
}

/// Component that snaps a scene node onto the hex grid when it starts. Attach
/// one per node; the host calls [HexNodeComponent::start] from the node's
/// start hook.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct HexNodeComponent {
    node: HexNode,
}

#[wasm_bindgen]
impl HexNodeComponent {
    /// Create a component. `up_axis` is `"y"` or `"z"`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        id: u32,
        direction: i32,
        randomize_direction: bool,
        lock_vertical: bool,
        up_axis: Option<String>,
    ) -> Result<HexNodeComponent, JsValue> {
        let up_axis = match up_axis {
            Some(name) => name.parse::<UpAxis>().map_err(|_| {
                js_sys::Error::new(&format!("Unknown up axis: {:?}", name))
            })?,
            None => UpAxis::default(),
        };
        Ok(Self {
            node: HexNode {
                id,
                direction: HexDirection::from_index(direction.into()),
                randomize_direction,
                lock_vertical,
                up_axis,
            },
        })
    }

    /// Index of the direction the node faces, in `[0, 6)`
    #[wasm_bindgen(getter)]
    pub fn direction(&self) -> usize {
        self.node.direction.index()
    }

    /// The cell the node is in, according to its world position
    pub fn hex(&self, node: &SceneNode) -> HexCoordinate {
        self.node.hex(&node)
    }

    /// The cell the node is in, according to its local position
    #[wasm_bindgen(js_name = localHex)]
    pub fn local_hex(&self, node: &SceneNode) -> HexCoordinate {
        self.node.local_hex(&node)
    }

    /// Snap the node to the center of its cell and rotate it to face this
    /// component's direction. Returns the cell it was placed in.
    pub fn start(&mut self, node: &SceneNode) -> HexCoordinate {
        let mut transform = node;
        self.node.apply_transform(&mut transform).coordinate
    }
}
