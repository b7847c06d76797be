use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration specific to visually rendering a layout. These options have
/// no bearing on layout _generation_, only on the visual presentation. If you
/// output a layout to a non-visual format (e.g. JSON), these options will
/// **never** affect that output.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// Screen-space distance between the centers of two adjacent cells
    #[validate(range(min = 0.001))]
    pub scale: f64,

    /// Label each cell with its `(q;r)` coordinate
    pub show_coordinates: bool,

    /// Width of the outline drawn around each cell, in screen space. 0
    /// disables outlines.
    #[validate(range(min = 0.0))]
    pub stroke_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            show_coordinates: false,
            stroke_width: 0.5,
        }
    }
}
