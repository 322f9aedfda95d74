use super::*;
use crate::error::CameraError;
use crate::modes::{FlashMode, FocusMode};
use crate::negotiate::Size;
use crate::surface::{Rotation, SurfaceTarget};

fn test_parameters() -> CameraParameters {
    CameraParameters {
        preview_size: Size::new(1280, 720),
        capture_size: Size::new(1920, 1080),
        display_rotation: Rotation::Rotate0,
        flash_mode: FlashMode::Off,
        focus_mode: FocusMode::Auto,
    }
}

#[test]
fn facing_toggles_between_rear_and_front() {
    assert_eq!(CameraFacing::Rear.toggled(), CameraFacing::Front);
    assert_eq!(CameraFacing::Front.toggled(), CameraFacing::Rear);
    assert_eq!(CameraFacing::default(), CameraFacing::Rear);
}

#[test]
fn mock_provider_hands_out_working_devices() {
    let mut provider = MockProvider::with_default_sizes();
    let probe = provider.probe();

    let mut device = provider.open(CameraFacing::Rear).unwrap();
    assert_eq!(probe.opened_facings(), vec![CameraFacing::Rear]);
    assert_eq!(probe.device_count(), 1);
    assert_eq!(device.supported_preview_sizes().len(), 3);
    assert_eq!(device.supported_capture_sizes().len(), 3);

    device.bind_target(SurfaceTarget(7)).unwrap();
    device.apply_parameters(&test_parameters()).unwrap();
    device.start_streaming().unwrap();

    let state = probe.last_device().unwrap();
    {
        let state = state.borrow();
        assert_eq!(state.bound_target, Some(SurfaceTarget(7)));
        assert_eq!(state.applied.len(), 1);
        assert!(state.streaming);
        assert_eq!(state.start_count, 1);
        assert!(!state.released);
    }

    device.release();
    let state = state.borrow();
    assert!(state.released);
    assert!(!state.streaming);
}

#[test]
fn mock_provider_open_failure() {
    let mut provider = MockProvider::with_default_sizes().fail_open(true);
    let probe = provider.probe();

    let result = provider.open(CameraFacing::Front);
    assert!(matches!(result, Err(CameraError::DeviceOpen { .. })));
    // Failed attempts are still recorded, but no device state exists.
    assert_eq!(probe.opened_facings(), vec![CameraFacing::Front]);
    assert_eq!(probe.device_count(), 0);
}

#[test]
fn mock_bind_failure_leaves_target_unbound() {
    let mut provider = MockProvider::with_default_sizes().fail_bind(true);
    let probe = provider.probe();

    let mut device = provider.open(CameraFacing::Rear).unwrap();
    let result = device.bind_target(SurfaceTarget(1));
    assert!(matches!(result, Err(CameraError::SurfaceBinding { .. })));

    let state = probe.last_device().unwrap();
    let state = state.borrow();
    assert_eq!(state.bind_attempts, 1);
    assert_eq!(state.bound_target, None);
}
