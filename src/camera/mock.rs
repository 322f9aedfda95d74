use super::device::{CameraDevice, CameraFacing, CameraParameters, CameraProvider};
use crate::error::CameraError;
use crate::negotiate::Size;
use crate::surface::SurfaceTarget;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Observable state of one mock camera device.
///
/// Shared between the device handle and the probe so tests can keep
/// inspecting it after the engine has consumed (or released) the handle.
#[derive(Debug, Default)]
pub struct MockCameraState {
    pub applied: Vec<CameraParameters>,
    pub bound_target: Option<SurfaceTarget>,
    pub bind_attempts: u32,
    pub streaming: bool,
    pub start_count: u32,
    pub released: bool,
}

/// In-memory camera device for tests and the demo driver.
pub struct MockCamera {
    preview_sizes: Vec<Size>,
    capture_sizes: Vec<Size>,
    fail_bind: bool,
    state: Rc<RefCell<MockCameraState>>,
}

impl CameraDevice for MockCamera {
    fn supported_preview_sizes(&self) -> Vec<Size> {
        self.preview_sizes.clone()
    }

    fn supported_capture_sizes(&self) -> Vec<Size> {
        self.capture_sizes.clone()
    }

    fn bind_target(&mut self, target: SurfaceTarget) -> Result<(), CameraError> {
        let mut state = self.state.borrow_mut();
        state.bind_attempts += 1;
        if self.fail_bind {
            return Err(CameraError::SurfaceBinding {
                details: "mock binding failure".to_string(),
            });
        }
        state.bound_target = Some(target);
        Ok(())
    }

    fn apply_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError> {
        debug!(
            "Mock camera committing parameters: preview {} capture {} rotation {}° flash {} focus {}",
            params.preview_size,
            params.capture_size,
            params.display_rotation.degrees(),
            params.flash_mode,
            params.focus_mode
        );
        self.state.borrow_mut().applied.push(*params);
        Ok(())
    }

    fn start_streaming(&mut self) -> Result<(), CameraError> {
        let mut state = self.state.borrow_mut();
        state.streaming = true;
        state.start_count += 1;
        Ok(())
    }

    fn stop_streaming(&mut self) -> Result<(), CameraError> {
        self.state.borrow_mut().streaming = false;
        Ok(())
    }

    fn release(self: Box<Self>) {
        let mut state = self.state.borrow_mut();
        state.streaming = false;
        state.released = true;
        debug!("Mock camera released");
    }
}

/// Handle onto the provider's internals, usable after the provider itself
/// has been moved into an engine.
#[derive(Clone, Default)]
pub struct MockProbe {
    opened: Rc<RefCell<Vec<CameraFacing>>>,
    devices: Rc<RefCell<Vec<Rc<RefCell<MockCameraState>>>>>,
}

impl MockProbe {
    /// Facings passed to `open`, in call order (including failed attempts).
    pub fn opened_facings(&self) -> Vec<CameraFacing> {
        self.opened.borrow().clone()
    }

    /// Number of device handles successfully opened so far.
    pub fn device_count(&self) -> usize {
        self.devices.borrow().len()
    }

    /// State of the most recently opened device.
    pub fn last_device(&self) -> Option<Rc<RefCell<MockCameraState>>> {
        self.devices.borrow().last().cloned()
    }

    /// State of the n-th opened device.
    pub fn device(&self, index: usize) -> Rc<RefCell<MockCameraState>> {
        Rc::clone(&self.devices.borrow()[index])
    }
}

/// Provider handing out [`MockCamera`] devices with configurable size tables
/// and failure injection.
pub struct MockProvider {
    preview_sizes: Vec<Size>,
    capture_sizes: Vec<Size>,
    fail_open: bool,
    fail_bind: bool,
    probe: MockProbe,
}

impl MockProvider {
    pub fn new(preview_sizes: Vec<Size>, capture_sizes: Vec<Size>) -> Self {
        Self {
            preview_sizes,
            capture_sizes,
            fail_open: false,
            fail_bind: false,
            probe: MockProbe::default(),
        }
    }

    /// Default size tables covering common 4:3 and 16:9 resolutions.
    pub fn with_default_sizes() -> Self {
        Self::new(
            vec![
                Size::new(640, 480),
                Size::new(1280, 720),
                Size::new(1920, 1080),
            ],
            vec![
                Size::new(1280, 720),
                Size::new(1920, 1080),
                Size::new(2592, 1944),
            ],
        )
    }

    /// Make subsequent `open` calls fail until cleared.
    pub fn set_fail_open(&mut self, fail: bool) -> &mut Self {
        self.fail_open = fail;
        self
    }

    /// Make devices opened from now on reject `bind_target`.
    pub fn set_fail_bind(&mut self, fail: bool) -> &mut Self {
        self.fail_bind = fail;
        self
    }

    pub fn fail_open(mut self, fail: bool) -> Self {
        self.fail_open = fail;
        self
    }

    pub fn fail_bind(mut self, fail: bool) -> Self {
        self.fail_bind = fail;
        self
    }

    pub fn probe(&self) -> MockProbe {
        self.probe.clone()
    }
}

impl CameraProvider for MockProvider {
    fn open(&mut self, facing: CameraFacing) -> Result<Box<dyn CameraDevice>, CameraError> {
        self.probe.opened.borrow_mut().push(facing);

        if self.fail_open {
            return Err(CameraError::DeviceOpen {
                facing: facing.to_string(),
                details: "mock device unavailable".to_string(),
            });
        }

        let state = Rc::new(RefCell::new(MockCameraState::default()));
        self.probe.devices.borrow_mut().push(Rc::clone(&state));

        debug!("Mock provider opened {} camera", facing);
        Ok(Box::new(MockCamera {
            preview_sizes: self.preview_sizes.clone(),
            capture_sizes: self.capture_sizes.clone(),
            fail_bind: self.fail_bind,
            state,
        }))
    }
}
