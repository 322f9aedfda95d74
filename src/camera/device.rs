use crate::error::CameraError;
use crate::modes::{FlashMode, FocusMode};
use crate::negotiate::Size;
use crate::surface::{Rotation, SurfaceTarget};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which physical camera is logically selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraFacing {
    Rear,
    Front,
}

impl CameraFacing {
    pub fn toggled(&self) -> Self {
        match self {
            CameraFacing::Rear => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Rear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraFacing::Rear => "rear",
            CameraFacing::Front => "front",
        }
    }
}

impl Default for CameraFacing {
    fn default() -> Self {
        CameraFacing::Rear
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full parameter set committed to the device in one call.
///
/// The engine never sends partial updates: a parameter session builds this
/// struct completely and hands it to [`CameraDevice::apply_parameters`] once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraParameters {
    pub preview_size: Size,
    pub capture_size: Size,
    pub display_rotation: Rotation,
    pub flash_mode: FlashMode,
    pub focus_mode: FocusMode,
}

/// Exclusive handle to an opened camera device.
///
/// Exactly one live handle exists per engine instance; the engine checks for
/// its absence before every configure/stream call, and no call reaches a
/// handle after `release`. All operations are blocking with no timeout.
pub trait CameraDevice {
    /// Supported live-preview resolutions, in driver order.
    fn supported_preview_sizes(&self) -> Vec<Size>;

    /// Supported still-capture resolutions, in driver order.
    fn supported_capture_sizes(&self) -> Vec<Size>;

    /// Bind the rendering target the preview stream draws into.
    fn bind_target(&mut self, target: SurfaceTarget) -> Result<(), CameraError>;

    /// Commit a complete parameter set atomically.
    fn apply_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError>;

    /// Start (or restart) the preview stream.
    fn start_streaming(&mut self) -> Result<(), CameraError>;

    /// Stop the preview stream.
    fn stop_streaming(&mut self) -> Result<(), CameraError>;

    /// Release the hardware resource, consuming the handle.
    fn release(self: Box<Self>);
}

/// Factory for camera device handles.
///
/// `open` blocks until the driver answers; failure (device busy, absent,
/// permission denied) is an error value, never a panic.
pub trait CameraProvider {
    fn open(&mut self, facing: CameraFacing) -> Result<Box<dyn CameraDevice>, CameraError>;
}
