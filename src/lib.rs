pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod modes;
pub mod negotiate;
pub mod session;
pub mod surface;

pub use camera::{CameraDevice, CameraFacing, CameraParameters, CameraProvider, MockProvider};
pub use config::SurfacecamConfig;
pub use engine::{CameraSurfaceEngine, CameraSurfaceEngineBuilder, LifecycleState};
pub use error::{CameraError, Result, SurfacecamError};
pub use modes::{CameraParamsConfig, FlashMode, FocusMode, ModeChangedListener, ModeRing};
pub use negotiate::{best_size, Size};
pub use surface::{
    FixedOrientation, Orientation, OrientationSource, Rotation, SurfaceDimensions, SurfaceTarget,
};
