use super::state::LifecycleState;
use crate::camera::{CameraDevice, CameraFacing, CameraProvider};
use crate::error::{CameraError, Result};
use crate::modes::{CameraParamsConfig, FlashMode, FocusMode, ModeChangedListener};
use crate::session;
use crate::surface::{OrientationSource, SurfaceDimensions, SurfaceTarget};
use tracing::{debug, error, info, warn};

/// Coordinates surface lifecycle events with exclusive camera ownership.
///
/// Single-threaded by design: every entry point takes `&mut self` and runs
/// to completion, so lifecycle events, mode cycling and parameter sessions
/// execute in strict sequential order with no internal locking. Mode-change
/// listeners are invoked synchronously and must not call back into the
/// engine.
///
/// No failure here is fatal: a camera that cannot be opened or configured
/// leaves the engine in an inactive-but-safe state, and every dependent
/// operation degrades to a logged no-op until hardware comes back.
pub struct CameraSurfaceEngine {
    provider: Box<dyn CameraProvider>,
    orientation: Box<dyn OrientationSource>,
    state: LifecycleState,
    device: Option<Box<dyn CameraDevice>>,
    surface: Option<SurfaceTarget>,
    dimensions: SurfaceDimensions,
    facing: CameraFacing,
    params: CameraParamsConfig,
    on_flash_mode_changed: Option<ModeChangedListener<FlashMode>>,
    on_focus_mode_changed: Option<ModeChangedListener<FocusMode>>,
}

impl CameraSurfaceEngine {
    pub fn new(
        provider: Box<dyn CameraProvider>,
        orientation: Box<dyn OrientationSource>,
        params: CameraParamsConfig,
    ) -> Self {
        Self {
            provider,
            orientation,
            state: LifecycleState::Uninitialized,
            device: None,
            surface: None,
            dimensions: SurfaceDimensions::default(),
            facing: CameraFacing::default(),
            params,
            on_flash_mode_changed: None,
            on_focus_mode_changed: None,
        }
    }

    /// The surface exists; acquire the camera.
    ///
    /// Valid from `Uninitialized` and `Destroyed`. Any prior handle is
    /// released before reopening. Open failure is not fatal: the engine
    /// stays in `Created` with no hardware bound and every configure/stream
    /// call degrades to a no-op until a future successful open.
    pub fn on_surface_created(&mut self, target: SurfaceTarget) -> Result<()> {
        match self.state {
            LifecycleState::Uninitialized | LifecycleState::Destroyed => {}
            state => {
                warn!(
                    "Ignoring out-of-order lifecycle event: {}",
                    CameraError::InvalidState {
                        operation: "surface_created",
                        state: state.to_string(),
                    }
                );
                return Ok(());
            }
        }

        self.release_device();
        self.surface = Some(target);
        self.dimensions = SurfaceDimensions::default();
        self.state = LifecycleState::Created;
        self.open_device();
        Ok(())
    }

    /// The surface was laid out (or re-laid out) at the given dimensions.
    ///
    /// Records the dimensions, runs a parameter session and requests
    /// streaming. With no hardware bound the step degrades to recording
    /// dimensions only.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) -> Result<()> {
        match self.state {
            LifecycleState::Created | LifecycleState::Active => {}
            state => {
                warn!(
                    "Ignoring out-of-order lifecycle event: {}",
                    CameraError::InvalidState {
                        operation: "surface_changed",
                        state: state.to_string(),
                    }
                );
                return Ok(());
            }
        }

        self.dimensions = SurfaceDimensions::new(width, height);
        debug!("Surface dimensions recorded: {}x{}", width, height);
        self.state = LifecycleState::Active;
        self.apply_and_stream("surface change")
    }

    /// The surface is gone; stop streaming and release the camera.
    ///
    /// Valid from any state. The exclusive hardware resource is always
    /// released here so a destroyed surface never leaks an open device.
    /// Mode ring indices survive for the next surface incarnation.
    pub fn on_surface_destroyed(&mut self) {
        self.release_device();
        self.surface = None;
        self.dimensions = SurfaceDimensions::default();
        self.state = LifecycleState::Destroyed;
        info!("Surface destroyed, camera engine torn down");
    }

    /// Toggle the logical facing between rear and front.
    ///
    /// With a live handle the device is released and reopened with the new
    /// facing immediately, re-applying parameters and restarting streaming
    /// when the surface is active. With no live handle only the selector
    /// changes and takes effect on the next open.
    pub fn switch_camera(&mut self) -> Result<()> {
        self.facing = self.facing.toggled();
        info!("Camera facing switched to {}", self.facing);

        if self.device.is_some() {
            self.release_device();
            self.open_device();
            if self.state == LifecycleState::Active {
                return self.apply_and_stream("camera switch");
            }
        }
        Ok(())
    }

    /// Advance to the next flash mode, re-apply parameters and restart the
    /// preview, then notify the registered listener.
    ///
    /// The ring always advances and the listener always fires; with no
    /// hardware bound only the hardware steps are skipped.
    pub fn advance_flash_mode(&mut self) -> Result<()> {
        let (index, mode) = self.params.next_flash_mode();
        let result = self.apply_and_stream("flash mode change");
        if let Some(listener) = self.on_flash_mode_changed.as_mut() {
            listener(index, mode);
        }
        result
    }

    /// Advance to the next focus mode. Same contract as
    /// [`advance_flash_mode`](Self::advance_flash_mode).
    pub fn advance_focus_mode(&mut self) -> Result<()> {
        let (index, mode) = self.params.next_focus_mode();
        let result = self.apply_and_stream("focus mode change");
        if let Some(listener) = self.on_focus_mode_changed.as_mut() {
            listener(index, mode);
        }
        result
    }

    /// Install the flash-mode change listener. Replaces any previous one.
    pub fn set_on_flash_mode_changed<F>(&mut self, listener: F)
    where
        F: FnMut(usize, FlashMode) + 'static,
    {
        self.on_flash_mode_changed = Some(Box::new(listener));
    }

    /// Install the focus-mode change listener. Replaces any previous one.
    pub fn set_on_focus_mode_changed<F>(&mut self, listener: F)
    where
        F: FnMut(usize, FocusMode) + 'static,
    {
        self.on_focus_mode_changed = Some(Box::new(listener));
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn dimensions(&self) -> SurfaceDimensions {
        self.dimensions
    }

    pub fn has_device(&self) -> bool {
        self.device.is_some()
    }

    pub fn current_flash_mode(&self) -> FlashMode {
        self.params.current_flash_mode()
    }

    pub fn flash_mode_index(&self) -> usize {
        self.params.flash_mode_index()
    }

    pub fn current_focus_mode(&self) -> FocusMode {
        self.params.current_focus_mode()
    }

    pub fn focus_mode_index(&self) -> usize {
        self.params.focus_mode_index()
    }

    fn open_device(&mut self) {
        match self.provider.open(self.facing) {
            Ok(device) => {
                info!("Opened {} camera", self.facing);
                self.device = Some(device);
            }
            Err(e) => {
                warn!("Camera open failed, engine stays inactive: {}", e);
                self.device = None;
            }
        }
    }

    fn release_device(&mut self) {
        if let Some(mut device) = self.device.take() {
            if let Err(e) = device.stop_streaming() {
                debug!("Stop streaming during release failed: {}", e);
            }
            device.release();
            info!("Camera device released");
        }
    }

    /// Run a parameter session and (re)start streaming, degrading to a
    /// logged no-op when the surface or hardware is not ready. Only a
    /// missing candidate list propagates as an error.
    fn apply_and_stream(&mut self, reason: &str) -> Result<()> {
        let Some(target) = self.surface else {
            debug!("No surface target, skipping {}", reason);
            return Ok(());
        };
        if self.dimensions.is_zero() {
            debug!("Surface has no usable dimensions yet, skipping {}", reason);
            return Ok(());
        }
        let orientation = self.orientation.orientation();
        let Some(device) = self.device.as_mut() else {
            debug!("No camera device, skipping {}", reason);
            return Ok(());
        };

        match session::apply(
            device.as_mut(),
            target,
            self.dimensions,
            orientation,
            &self.params,
        ) {
            Ok(_) => {
                if let Err(e) = device.start_streaming() {
                    warn!("Failed to start streaming after {}: {}", reason, e);
                }
                Ok(())
            }
            Err(e @ CameraError::NoSupportedSizes { .. }) => {
                error!("Parameter session aborted during {}: {}", reason, e);
                Err(e.into())
            }
            Err(e) => {
                warn!("Parameter session failed during {}: {}", reason, e);
                Ok(())
            }
        }
    }
}
