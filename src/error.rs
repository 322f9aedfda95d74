use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfacecamError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("System error: {message}")]
    System { message: String },
}

impl SurfacecamError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }
}

/// Errors raised by the camera engine itself.
///
/// None of these are fatal to the process: device-open, binding and
/// invalid-state failures are recovered locally (the engine degrades to an
/// inactive-but-safe state and logs), while missing candidate lists and a
/// zero-area surface are precondition violations surfaced to the caller.
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to open camera device ({facing}): {details}")]
    DeviceOpen { facing: String, details: String },

    #[error("Failed to bind rendering target to camera: {details}")]
    SurfaceBinding { details: String },

    #[error("Camera reports no supported {kind} sizes")]
    NoSupportedSizes { kind: &'static str },

    #[error("Cannot negotiate against a zero-area surface")]
    ZeroSurface,

    #[error("Operation '{operation}' invalid in lifecycle state {state}")]
    InvalidState { operation: &'static str, state: String },

    #[error("Camera device released or never opened")]
    NoDevice,
}

pub type Result<T> = std::result::Result<T, SurfacecamError>;
