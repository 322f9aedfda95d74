use serde::{Deserialize, Serialize};

/// Opaque token identifying the rendering target the camera binds to.
///
/// The engine never looks inside it; it is handed to the hardware device on
/// `bind_target` and otherwise only stored for re-application passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceTarget(pub u64);

/// Current width/height of the rendering surface.
///
/// Mutated only by the `changed` lifecycle event. `(0, 0)` is a valid
/// transient value while the surface is being laid out; parameter sessions
/// treat it as "no negotiation possible" rather than an error at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceDimensions {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Device orientation at the moment parameters are applied.
///
/// `Portrait` covers every non-landscape configuration. The engine reads this
/// live from an [`OrientationSource`] on each apply pass and never caches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::Landscape)
    }

    /// Display rotation for this orientation: landscape frames pass through,
    /// anything else is rotated a quarter turn.
    pub fn display_rotation(&self) -> Rotation {
        match self {
            Orientation::Landscape => Rotation::Rotate0,
            Orientation::Portrait => Rotation::Rotate90,
        }
    }
}

/// Degrees the captured frame must be rotated to match the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Rotate0,
    Rotate90,
}

impl Rotation {
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Rotate0 => 0,
            Rotation::Rotate90 => 90,
        }
    }
}

/// Environment query for the current device orientation.
///
/// Queried at apply time so an orientation change between two passes is
/// picked up by the next one.
pub trait OrientationSource {
    fn orientation(&self) -> Orientation;
}

/// Orientation source that always reports the same value. Used by the demo
/// driver and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrientation(pub Orientation);

impl OrientationSource for FixedOrientation {
    fn orientation(&self) -> Orientation {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_detected() {
        assert!(SurfaceDimensions::new(0, 0).is_zero());
        assert!(SurfaceDimensions::new(0, 480).is_zero());
        assert!(SurfaceDimensions::new(640, 0).is_zero());
        assert!(!SurfaceDimensions::new(640, 480).is_zero());
    }

    #[test]
    fn rotation_mapping_is_two_valued() {
        assert_eq!(Orientation::Landscape.display_rotation().degrees(), 0);
        assert_eq!(Orientation::Portrait.display_rotation().degrees(), 90);
    }
}
