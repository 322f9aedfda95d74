use crate::error::SurfacecamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Flash modes the engine can cycle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashMode {
    Off,
    On,
    Auto,
    Torch,
    RedEye,
}

impl FlashMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashMode::Off => "off",
            FlashMode::On => "on",
            FlashMode::Auto => "auto",
            FlashMode::Torch => "torch",
            FlashMode::RedEye => "red-eye",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "off" => Some(FlashMode::Off),
            "on" => Some(FlashMode::On),
            "auto" => Some(FlashMode::Auto),
            "torch" => Some(FlashMode::Torch),
            "red-eye" => Some(FlashMode::RedEye),
            _ => None,
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Focus modes the engine can cycle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusMode {
    Auto,
    Infinity,
    Macro,
    ContinuousPicture,
    ContinuousVideo,
    Fixed,
}

impl FocusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusMode::Auto => "auto",
            FocusMode::Infinity => "infinity",
            FocusMode::Macro => "macro",
            FocusMode::ContinuousPicture => "continuous-picture",
            FocusMode::ContinuousVideo => "continuous-video",
            FocusMode::Fixed => "fixed",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "auto" => Some(FocusMode::Auto),
            "infinity" => Some(FocusMode::Infinity),
            "macro" => Some(FocusMode::Macro),
            "continuous-picture" => Some(FocusMode::ContinuousPicture),
            "continuous-video" => Some(FocusMode::ContinuousVideo),
            "fixed" => Some(FocusMode::Fixed),
            _ => None,
        }
    }
}

impl fmt::Display for FocusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked synchronously after a successful mode advance with the
/// new index and mode value. Absence of a listener is a first-class state.
pub type ModeChangedListener<M> = Box<dyn FnMut(usize, M)>;

/// An ordered, cyclic list of modes with a current index.
///
/// Invariant: the list is non-empty and `index < len` at all times, so
/// `current()` and `advance()` are total.
#[derive(Debug, Clone)]
pub struct ModeRing<M: Copy> {
    modes: Vec<M>,
    index: usize,
}

impl<M: Copy> ModeRing<M> {
    /// Construct from an ordered mode list. Empty lists are rejected.
    pub fn new(modes: Vec<M>) -> Result<Self, SurfacecamError> {
        if modes.is_empty() {
            return Err(SurfacecamError::system("Mode list must not be empty"));
        }
        Ok(Self { modes, index: 0 })
    }

    pub fn current(&self) -> M {
        self.modes[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Advance to the next mode, wrapping at the end of the list.
    pub fn advance(&mut self) -> (usize, M) {
        self.index = (self.index + 1) % self.modes.len();
        (self.index, self.modes[self.index])
    }
}

/// Holder for the engine's cyclable parameters: one flash ring and one focus
/// ring, each with its own current index. Created once per engine instance;
/// indices survive surface destruction and recreation.
#[derive(Debug, Clone)]
pub struct CameraParamsConfig {
    flash: ModeRing<FlashMode>,
    focus: ModeRing<FocusMode>,
}

impl CameraParamsConfig {
    pub fn new(
        flash_modes: Vec<FlashMode>,
        focus_modes: Vec<FocusMode>,
    ) -> Result<Self, SurfacecamError> {
        Ok(Self {
            flash: ModeRing::new(flash_modes)?,
            focus: ModeRing::new(focus_modes)?,
        })
    }

    pub fn current_flash_mode(&self) -> FlashMode {
        self.flash.current()
    }

    pub fn current_focus_mode(&self) -> FocusMode {
        self.focus.current()
    }

    pub fn flash_mode_index(&self) -> usize {
        self.flash.index()
    }

    pub fn focus_mode_index(&self) -> usize {
        self.focus.index()
    }

    pub fn flash_mode_count(&self) -> usize {
        self.flash.len()
    }

    pub fn focus_mode_count(&self) -> usize {
        self.focus.len()
    }

    pub fn next_flash_mode(&mut self) -> (usize, FlashMode) {
        let (index, mode) = self.flash.advance();
        debug!("Flash mode advanced to {} (index {})", mode, index);
        (index, mode)
    }

    pub fn next_focus_mode(&mut self) -> (usize, FocusMode) {
        let (index, mode) = self.focus.advance();
        debug!("Focus mode advanced to {} (index {})", mode, index);
        (index, mode)
    }
}

impl Default for CameraParamsConfig {
    fn default() -> Self {
        Self {
            flash: ModeRing {
                modes: vec![FlashMode::Off, FlashMode::On, FlashMode::Auto],
                index: 0,
            },
            focus: ModeRing {
                modes: vec![FocusMode::Auto, FocusMode::ContinuousPicture, FocusMode::Macro],
                index: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mode_list_rejected() {
        assert!(ModeRing::<FlashMode>::new(vec![]).is_err());
    }

    #[test]
    fn advance_cycles_back_to_start() {
        let mut ring =
            ModeRing::new(vec![FlashMode::Off, FlashMode::On, FlashMode::Auto]).unwrap();
        assert_eq!(ring.advance(), (1, FlashMode::On));
        assert_eq!(ring.advance(), (2, FlashMode::Auto));
        assert_eq!(ring.advance(), (0, FlashMode::Off));
        assert_eq!(ring.index(), 0);
    }

    #[test]
    fn n_advances_restore_index_for_any_length() {
        let modes = vec![
            FocusMode::Auto,
            FocusMode::Infinity,
            FocusMode::Macro,
            FocusMode::Fixed,
        ];
        let mut ring = ModeRing::new(modes.clone()).unwrap();
        let start = ring.index();
        for _ in 0..modes.len() {
            ring.advance();
        }
        assert_eq!(ring.index(), start);
    }

    #[test]
    fn single_mode_ring_stays_put() {
        let mut ring = ModeRing::new(vec![FlashMode::Torch]).unwrap();
        assert_eq!(ring.advance(), (0, FlashMode::Torch));
        assert_eq!(ring.current(), FlashMode::Torch);
    }

    #[test]
    fn rings_advance_independently() {
        let mut config = CameraParamsConfig::default();
        config.next_flash_mode();
        assert_eq!(config.flash_mode_index(), 1);
        assert_eq!(config.focus_mode_index(), 0);
        config.next_focus_mode();
        assert_eq!(config.flash_mode_index(), 1);
        assert_eq!(config.focus_mode_index(), 1);
    }

    #[test]
    fn mode_labels_round_trip() {
        for mode in [
            FlashMode::Off,
            FlashMode::On,
            FlashMode::Auto,
            FlashMode::Torch,
            FlashMode::RedEye,
        ] {
            assert_eq!(FlashMode::parse(mode.as_str()), Some(mode));
        }
        for mode in [
            FocusMode::Auto,
            FocusMode::Infinity,
            FocusMode::Macro,
            FocusMode::ContinuousPicture,
            FocusMode::ContinuousVideo,
            FocusMode::Fixed,
        ] {
            assert_eq!(FocusMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(FlashMode::parse("strobe"), None);
        assert_eq!(FocusMode::parse("manual"), None);
    }
}
