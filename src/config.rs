use crate::camera::CameraFacing;
use crate::error::Result;
use crate::modes::{CameraParamsConfig, FlashMode, FocusMode};
use crate::negotiate::Size;
use crate::surface::Orientation;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SurfacecamConfig {
    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub surface: SurfaceSettings,

    #[serde(default)]
    pub mock: MockSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CameraSettings {
    /// Logical camera facing to open first ("rear" or "front")
    #[serde(default = "default_facing")]
    pub facing: String,

    /// Ordered flash mode cycle
    #[serde(default = "default_flash_modes")]
    pub flash_modes: Vec<String>,

    /// Ordered focus mode cycle
    #[serde(default = "default_focus_modes")]
    pub focus_modes: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SurfaceSettings {
    /// Surface dimensions the demo driver reports on its `changed` event
    #[serde(default = "default_surface_resolution")]
    pub resolution: (u32, u32),

    /// Device orientation the demo driver reports ("landscape" or "portrait")
    #[serde(default = "default_orientation")]
    pub orientation: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MockSettings {
    /// Supported preview sizes advertised by the mock camera
    #[serde(default = "default_preview_sizes")]
    pub preview_sizes: Vec<(u32, u32)>,

    /// Supported still-capture sizes advertised by the mock camera
    #[serde(default = "default_capture_sizes")]
    pub capture_sizes: Vec<(u32, u32)>,

    /// Make every open attempt fail (exercise the degraded path)
    #[serde(default)]
    pub fail_open: bool,

    /// Make surface binding fail (exercise the non-fatal binding path)
    #[serde(default)]
    pub fail_bind: bool,
}

impl SurfacecamConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from_file("surfacecam.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            // Start with default values
            .set_default("camera.facing", default_facing())?
            .set_default("camera.flash_modes", default_flash_modes())?
            .set_default("camera.focus_modes", default_focus_modes())?
            .set_default(
                "surface.resolution",
                vec![
                    default_surface_resolution().0,
                    default_surface_resolution().1,
                ],
            )?
            .set_default("surface.orientation", default_orientation())?
            .set_default("mock.fail_open", false)?
            .set_default("mock.fail_bind", false)?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with SURFACECAM_ prefix
            .add_source(Environment::with_prefix("SURFACECAM").separator("_"))
            .build()?;

        let config: SurfacecamConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.facing()?;
        self.orientation()?;
        self.flash_modes()?;
        self.focus_modes()?;

        if self.surface.resolution.0 == 0 || self.surface.resolution.1 == 0 {
            return Err(ConfigError::Message(
                "Surface resolution must be greater than 0".to_string(),
            ));
        }

        if self.mock.preview_sizes.is_empty() {
            return Err(ConfigError::Message(
                "Mock preview size table must not be empty".to_string(),
            ));
        }

        if self.mock.capture_sizes.is_empty() {
            return Err(ConfigError::Message(
                "Mock capture size table must not be empty".to_string(),
            ));
        }

        for &(w, h) in self.mock.preview_sizes.iter().chain(&self.mock.capture_sizes) {
            if w == 0 || h == 0 {
                return Err(ConfigError::Message(
                    "Mock size table entries must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn facing(&self) -> std::result::Result<CameraFacing, ConfigError> {
        match self.camera.facing.as_str() {
            "rear" => Ok(CameraFacing::Rear),
            "front" => Ok(CameraFacing::Front),
            other => Err(ConfigError::Message(format!(
                "Unknown camera facing '{}' (expected 'rear' or 'front')",
                other
            ))),
        }
    }

    pub fn orientation(&self) -> std::result::Result<Orientation, ConfigError> {
        match self.surface.orientation.as_str() {
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            other => Err(ConfigError::Message(format!(
                "Unknown orientation '{}' (expected 'landscape' or 'portrait')",
                other
            ))),
        }
    }

    pub fn flash_modes(&self) -> std::result::Result<Vec<FlashMode>, ConfigError> {
        self.camera
            .flash_modes
            .iter()
            .map(|label| {
                FlashMode::parse(label).ok_or_else(|| {
                    ConfigError::Message(format!("Unknown flash mode '{}'", label))
                })
            })
            .collect()
    }

    pub fn focus_modes(&self) -> std::result::Result<Vec<FocusMode>, ConfigError> {
        self.camera
            .focus_modes
            .iter()
            .map(|label| {
                FocusMode::parse(label).ok_or_else(|| {
                    ConfigError::Message(format!("Unknown focus mode '{}'", label))
                })
            })
            .collect()
    }

    /// Build the engine's mode rings from the configured cycles.
    pub fn params_config(&self) -> Result<CameraParamsConfig> {
        CameraParamsConfig::new(self.flash_modes()?, self.focus_modes()?)
    }

    pub fn mock_preview_sizes(&self) -> Vec<Size> {
        self.mock
            .preview_sizes
            .iter()
            .map(|&(w, h)| Size::new(w, h))
            .collect()
    }

    pub fn mock_capture_sizes(&self) -> Vec<Size> {
        self.mock
            .capture_sizes
            .iter()
            .map(|&(w, h)| Size::new(w, h))
            .collect()
    }

    /// Serialize the configuration to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let rendered = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), rendered)?;
        info!("Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for SurfacecamConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            surface: SurfaceSettings::default(),
            mock: MockSettings::default(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            facing: default_facing(),
            flash_modes: default_flash_modes(),
            focus_modes: default_focus_modes(),
        }
    }
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            resolution: default_surface_resolution(),
            orientation: default_orientation(),
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            preview_sizes: default_preview_sizes(),
            capture_sizes: default_capture_sizes(),
            fail_open: false,
            fail_bind: false,
        }
    }
}

// Default value functions
fn default_facing() -> String {
    "rear".to_string()
}
fn default_flash_modes() -> Vec<String> {
    vec!["off".to_string(), "on".to_string(), "auto".to_string()]
}
fn default_focus_modes() -> Vec<String> {
    vec![
        "auto".to_string(),
        "continuous-picture".to_string(),
        "macro".to_string(),
    ]
}
fn default_surface_resolution() -> (u32, u32) {
    (1280, 720)
}
fn default_orientation() -> String {
    "landscape".to_string()
}
fn default_preview_sizes() -> Vec<(u32, u32)> {
    vec![(640, 480), (1280, 720), (1920, 1080)]
}
fn default_capture_sizes() -> Vec<(u32, u32)> {
    vec![(1280, 720), (1920, 1080), (2592, 1944)]
}
