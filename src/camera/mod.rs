mod device;
mod mock;
#[cfg(test)]
mod tests;

pub use device::{CameraDevice, CameraFacing, CameraParameters, CameraProvider};
pub use mock::{MockCamera, MockCameraState, MockProbe, MockProvider};
