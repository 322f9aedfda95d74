use super::controller::CameraSurfaceEngine;
use crate::camera::CameraProvider;
use crate::error::{Result, SurfacecamError};
use crate::modes::CameraParamsConfig;
use crate::surface::OrientationSource;

/// Builder for the camera surface engine.
pub struct CameraSurfaceEngineBuilder {
    provider: Option<Box<dyn CameraProvider>>,
    orientation: Option<Box<dyn OrientationSource>>,
    params: Option<CameraParamsConfig>,
}

impl CameraSurfaceEngineBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            orientation: None,
            params: None,
        }
    }

    pub fn provider<P: CameraProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn orientation_source<O: OrientationSource + 'static>(mut self, source: O) -> Self {
        self.orientation = Some(Box::new(source));
        self
    }

    /// Mode rings to cycle through. Defaults to the standard flash/focus
    /// cycles when not specified.
    pub fn params(mut self, params: CameraParamsConfig) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<CameraSurfaceEngine> {
        let provider = self
            .provider
            .ok_or_else(|| SurfacecamError::system("Camera provider must be specified"))?;
        let orientation = self
            .orientation
            .ok_or_else(|| SurfacecamError::system("Orientation source must be specified"))?;
        let params = self.params.unwrap_or_default();

        Ok(CameraSurfaceEngine::new(provider, orientation, params))
    }
}

impl Default for CameraSurfaceEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
