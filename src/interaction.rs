//! Window-independent interaction state: swatch selection and resizing.

use winit::keyboard::KeyCode;

use crate::{camera::Projection, config::SwatchConfig, data_structures::color::Color};

/// The outcome of a swatch click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchChange {
    /// The swatch that lost the active state, if another one had it.
    pub deactivated: Option<usize>,
    pub activated: usize,
    pub color: Color,
}

/// A row of color swatches of which at most one is active.
#[derive(Debug, Clone, Default)]
pub struct SwatchPicker {
    swatches: Vec<SwatchConfig>,
    active: Option<usize>,
}

impl SwatchPicker {
    /// An `active` index out of range is dropped.
    pub fn new(swatches: Vec<SwatchConfig>, active: Option<usize>) -> Self {
        let active = active.filter(|&i| i < swatches.len());
        Self { swatches, active }
    }

    /// The first swatch starts out active.
    pub fn from_config(swatches: &[SwatchConfig]) -> Self {
        Self::new(swatches.to_vec(), Some(0))
    }

    pub fn swatches(&self) -> &[SwatchConfig] {
        &self.swatches
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Class edits that bring the page in line with the picker, given which
    /// swatch elements carry the active class right now. Each entry is the
    /// element index and whether the class must be added (`true`) or removed.
    pub fn class_updates(&self, marked: impl IntoIterator<Item = bool>) -> Vec<(usize, bool)> {
        marked
            .into_iter()
            .enumerate()
            .filter_map(|(i, has_class)| {
                let wanted = self.is_active(i);
                (wanted != has_class).then_some((i, wanted))
            })
            .collect()
    }

    /// Make `index` the only active swatch. Returns `None` for unknown indices.
    pub fn select(&mut self, index: usize) -> Option<SwatchChange> {
        let swatch = self.swatches.get(index)?;
        let deactivated = self.active.filter(|&previous| previous != index);
        self.active = Some(index);
        Some(SwatchChange {
            deactivated,
            activated: index,
            color: swatch.color,
        })
    }
}

/// Swatch index for the digit keys `1` to `9`.
pub fn swatch_for_key(key: KeyCode) -> Option<usize> {
    let index = match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => 0,
        KeyCode::Digit2 | KeyCode::Numpad2 => 1,
        KeyCode::Digit3 | KeyCode::Numpad3 => 2,
        KeyCode::Digit4 | KeyCode::Numpad4 => 3,
        KeyCode::Digit5 | KeyCode::Numpad5 => 4,
        KeyCode::Digit6 | KeyCode::Numpad6 => 5,
        KeyCode::Digit7 | KeyCode::Numpad7 => 6,
        KeyCode::Digit8 | KeyCode::Numpad8 => 7,
        KeyCode::Digit9 | KeyCode::Numpad9 => 8,
        _ => return None,
    };
    Some(index)
}

/// Fit the projection and the surface configuration to a new viewport.
///
/// Zero-sized viewports (minimized windows, hidden canvases) are ignored and
/// `false` is returned; the caller only reconfigures the surface on `true`.
pub fn apply_resize(
    projection: &mut Projection,
    config: &mut wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,
) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    config.width = width;
    config.height = height;
    projection.resize(width, height);
    true
}
