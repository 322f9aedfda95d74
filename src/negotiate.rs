use crate::error::CameraError;
use crate::surface::{Orientation, SurfaceDimensions};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported camera resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pick the best supported size for a surface of the given dimensions.
///
/// The target is first normalized to landscape terms: for a portrait
/// orientation the width and height swap, so matching always reasons with the
/// long side as width. Candidates are then checked in two passes:
///
/// 1. the first candidate equal to the normalized target wins outright
///    (pixel-exact, no scaling needed);
/// 2. otherwise the candidate whose aspect ratio is closest to the target's
///    wins, with the earliest candidate preferred among equal deltas.
///
/// First-match tie-breaking in both passes makes the result a pure function
/// of `(target, orientation, candidates)`.
///
/// `kind` names the candidate list ("preview" or "capture") in errors.
pub fn best_size(
    target: SurfaceDimensions,
    orientation: Orientation,
    candidates: &[Size],
    kind: &'static str,
) -> Result<Size, CameraError> {
    if target.is_zero() {
        return Err(CameraError::ZeroSurface);
    }
    if candidates.is_empty() {
        return Err(CameraError::NoSupportedSizes { kind });
    }

    let (req_width, req_height) = if orientation.is_landscape() {
        (target.width, target.height)
    } else {
        (target.height, target.width)
    };

    for size in candidates {
        if size.width == req_width && size.height == req_height {
            return Ok(*size);
        }
    }

    let req_ratio = req_width as f64 / req_height as f64;
    let mut best = candidates[0];
    let mut best_delta = f64::INFINITY;
    for size in candidates {
        let delta = (size.aspect_ratio() - req_ratio).abs();
        // Strict comparison keeps the earliest candidate on equal deltas.
        if delta < best_delta {
            best_delta = delta;
            best = *size;
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: u32, h: u32) -> SurfaceDimensions {
        SurfaceDimensions::new(w, h)
    }

    #[test]
    fn exact_match_wins_regardless_of_position() {
        let candidates = [
            Size::new(640, 480),
            Size::new(1280, 720),
            Size::new(1920, 1080),
        ];
        let best = best_size(dims(1920, 1080), Orientation::Landscape, &candidates, "preview")
            .unwrap();
        assert_eq!(best, Size::new(1920, 1080));

        // An earlier close-ratio entry does not shadow a later exact match.
        let candidates = [Size::new(1280, 720), Size::new(1920, 1080)];
        let best = best_size(dims(1920, 1080), Orientation::Landscape, &candidates, "preview")
            .unwrap();
        assert_eq!(best, Size::new(1920, 1080));
    }

    #[test]
    fn closest_ratio_when_no_exact_match() {
        // Ratios 1.333, 1.778, 1.778 against target 1000/550 = 1.818.
        let candidates = [
            Size::new(640, 480),
            Size::new(1280, 720),
            Size::new(1920, 1080),
        ];
        let best = best_size(dims(1000, 550), Orientation::Landscape, &candidates, "preview")
            .unwrap();
        // 1280x720 and 1920x1080 tie on delta; the earlier one wins.
        assert_eq!(best, Size::new(1280, 720));
    }

    #[test]
    fn equal_delta_prefers_earlier_candidate() {
        let candidates = [Size::new(160, 120), Size::new(320, 240), Size::new(640, 480)];
        let best = best_size(dims(400, 300), Orientation::Landscape, &candidates, "preview")
            .unwrap();
        assert_eq!(best, Size::new(160, 120));
    }

    #[test]
    fn portrait_swaps_target_dimensions() {
        let candidates = [
            Size::new(800, 480),
            Size::new(640, 480),
            Size::new(1280, 720),
        ];
        let portrait =
            best_size(dims(480, 800), Orientation::Portrait, &candidates, "preview").unwrap();
        let landscape =
            best_size(dims(800, 480), Orientation::Landscape, &candidates, "preview").unwrap();
        assert_eq!(portrait, landscape);
        assert_eq!(portrait, Size::new(800, 480));
    }

    #[test]
    fn orientation_swap_equivalence_without_exact_match() {
        let candidates = [Size::new(640, 480), Size::new(1280, 720)];
        let portrait =
            best_size(dims(550, 1000), Orientation::Portrait, &candidates, "capture").unwrap();
        let landscape =
            best_size(dims(1000, 550), Orientation::Landscape, &candidates, "capture").unwrap();
        assert_eq!(portrait, landscape);
    }

    #[test]
    fn duplicate_candidates_return_first_occurrence() {
        let candidates = [Size::new(1280, 720), Size::new(1280, 720)];
        let best = best_size(dims(1280, 720), Orientation::Landscape, &candidates, "preview")
            .unwrap();
        assert_eq!(best, Size::new(1280, 720));
    }

    #[test]
    fn empty_candidate_list_is_an_error() {
        let result = best_size(dims(640, 480), Orientation::Landscape, &[], "capture");
        assert!(matches!(
            result,
            Err(CameraError::NoSupportedSizes { kind: "capture" })
        ));
    }

    #[test]
    fn zero_surface_is_an_error() {
        let candidates = [Size::new(640, 480)];
        let result = best_size(dims(0, 0), Orientation::Landscape, &candidates, "preview");
        assert!(matches!(result, Err(CameraError::ZeroSurface)));

        let result = best_size(dims(640, 0), Orientation::Portrait, &candidates, "preview");
        assert!(matches!(result, Err(CameraError::ZeroSurface)));
    }
}
