use crate::camera::{CameraDevice, CameraParameters};
use crate::error::CameraError;
use crate::modes::CameraParamsConfig;
use crate::negotiate::best_size;
use crate::surface::{Orientation, SurfaceDimensions, SurfaceTarget};
use tracing::{info, warn};

/// Run one full "apply configuration" pass against an open camera device.
///
/// Negotiates the preview and still-capture sizes independently against the
/// surface dimensions, derives the display rotation from the orientation,
/// reads the current flash/focus modes from the rings, binds the rendering
/// target, and commits the whole parameter set in a single atomic call.
///
/// A binding failure is reported and non-fatal: the session continues and
/// commits the parameters anyway. A missing candidate list or a zero-area
/// surface aborts the pass with an error and commits nothing.
///
/// Streaming is not touched here; the caller decides when to (re)start it.
pub fn apply(
    device: &mut dyn CameraDevice,
    target: SurfaceTarget,
    dimensions: SurfaceDimensions,
    orientation: Orientation,
    params: &CameraParamsConfig,
) -> Result<CameraParameters, CameraError> {
    if dimensions.is_zero() {
        return Err(CameraError::ZeroSurface);
    }

    let preview_size = best_size(
        dimensions,
        orientation,
        &device.supported_preview_sizes(),
        "preview",
    )?;
    info!("Negotiated preview size: {}", preview_size);

    let capture_size = best_size(
        dimensions,
        orientation,
        &device.supported_capture_sizes(),
        "capture",
    )?;
    info!("Negotiated capture size: {}", capture_size);

    let parameters = CameraParameters {
        preview_size,
        capture_size,
        display_rotation: orientation.display_rotation(),
        flash_mode: params.current_flash_mode(),
        focus_mode: params.current_focus_mode(),
    };

    if let Err(e) = device.bind_target(target) {
        warn!("Surface binding failed, continuing with commit: {}", e);
    }

    device.apply_parameters(&parameters)?;

    info!(
        "Committed camera parameters: preview {} capture {} rotation {}° flash {} focus {}",
        parameters.preview_size,
        parameters.capture_size,
        parameters.display_rotation.degrees(),
        parameters.flash_mode,
        parameters.focus_mode
    );

    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraFacing, CameraProvider, MockProvider};
    use crate::modes::{FlashMode, FocusMode};
    use crate::negotiate::Size;
    use crate::surface::Rotation;

    fn dims(w: u32, h: u32) -> SurfaceDimensions {
        SurfaceDimensions::new(w, h)
    }

    #[test]
    fn preview_and_capture_negotiated_independently() {
        let mut provider = MockProvider::new(
            vec![Size::new(640, 480), Size::new(1280, 720)],
            vec![Size::new(1920, 1080), Size::new(2592, 1944)],
        );
        let mut device = provider.open(CameraFacing::Rear).unwrap();
        let params = CameraParamsConfig::default();

        let applied = apply(
            device.as_mut(),
            SurfaceTarget(1),
            dims(1280, 720),
            Orientation::Landscape,
            &params,
        )
        .unwrap();

        // Preview matches exactly; capture falls back to closest ratio.
        assert_eq!(applied.preview_size, Size::new(1280, 720));
        assert_eq!(applied.capture_size, Size::new(1920, 1080));
    }

    #[test]
    fn portrait_orientation_rotates_display() {
        let mut provider = MockProvider::with_default_sizes();
        let probe = provider.probe();
        let mut device = provider.open(CameraFacing::Rear).unwrap();
        let params = CameraParamsConfig::default();

        let applied = apply(
            device.as_mut(),
            SurfaceTarget(1),
            dims(720, 1280),
            Orientation::Portrait,
            &params,
        )
        .unwrap();

        assert_eq!(applied.display_rotation, Rotation::Rotate90);
        // Portrait target swapped to landscape terms finds the exact match.
        assert_eq!(applied.preview_size, Size::new(1280, 720));

        let state = probe.last_device().unwrap();
        let state = state.borrow();
        assert_eq!(state.applied.len(), 1);
        assert_eq!(state.bound_target, Some(SurfaceTarget(1)));
    }

    #[test]
    fn current_modes_flow_into_committed_parameters() {
        let mut provider = MockProvider::with_default_sizes();
        let mut device = provider.open(CameraFacing::Rear).unwrap();
        let mut params = CameraParamsConfig::default();
        params.next_flash_mode(); // Off -> On
        params.next_focus_mode(); // Auto -> ContinuousPicture

        let applied = apply(
            device.as_mut(),
            SurfaceTarget(1),
            dims(1280, 720),
            Orientation::Landscape,
            &params,
        )
        .unwrap();

        assert_eq!(applied.flash_mode, FlashMode::On);
        assert_eq!(applied.focus_mode, FocusMode::ContinuousPicture);
    }

    #[test]
    fn bind_failure_still_commits_parameters() {
        let mut provider = MockProvider::with_default_sizes().fail_bind(true);
        let probe = provider.probe();
        let mut device = provider.open(CameraFacing::Rear).unwrap();
        let params = CameraParamsConfig::default();

        let result = apply(
            device.as_mut(),
            SurfaceTarget(9),
            dims(1280, 720),
            Orientation::Landscape,
            &params,
        );
        assert!(result.is_ok());

        let state = probe.last_device().unwrap();
        let state = state.borrow();
        assert_eq!(state.bind_attempts, 1);
        assert_eq!(state.bound_target, None);
        assert_eq!(state.applied.len(), 1);
    }

    #[test]
    fn zero_surface_aborts_without_commit() {
        let mut provider = MockProvider::with_default_sizes();
        let probe = provider.probe();
        let mut device = provider.open(CameraFacing::Rear).unwrap();
        let params = CameraParamsConfig::default();

        let result = apply(
            device.as_mut(),
            SurfaceTarget(1),
            dims(0, 0),
            Orientation::Landscape,
            &params,
        );
        assert!(matches!(result, Err(CameraError::ZeroSurface)));

        let state = probe.last_device().unwrap();
        assert!(state.borrow().applied.is_empty());
    }

    #[test]
    fn empty_capture_table_aborts_without_commit() {
        let mut provider = MockProvider::new(vec![Size::new(640, 480)], vec![]);
        let probe = provider.probe();
        let mut device = provider.open(CameraFacing::Rear).unwrap();
        let params = CameraParamsConfig::default();

        let result = apply(
            device.as_mut(),
            SurfaceTarget(1),
            dims(640, 480),
            Orientation::Landscape,
            &params,
        );
        assert!(matches!(
            result,
            Err(CameraError::NoSupportedSizes { kind: "capture" })
        ));

        let state = probe.last_device().unwrap();
        assert!(state.borrow().applied.is_empty());
    }
}
