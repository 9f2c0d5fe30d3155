//! Viewer configuration.
//!
//! Every constant the viewer depends on lives in [`ViewerConfig`]. The defaults
//! describe the ring product page; [`ViewerConfig::from_env`] lets a native
//! build point at a different asset directory.

use std::path::PathBuf;

use crate::{binding::MaterialBindings, data_structures::color::Color};

/// Environment variable that overrides the native asset root.
pub const ASSET_DIR_ENV: &str = "FACET_ASSET_DIR";

#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            position: [0.0, 1.0, 2.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// A selectable color option shown in the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct SwatchConfig {
    pub label: String,
    pub color: Color,
}

impl SwatchConfig {
    pub fn new(label: &str, color: Color) -> Self {
        Self {
            label: label.to_string(),
            color,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Native asset root. On the web assets are fetched from `<origin>/assets/`.
    pub asset_dir: PathBuf,
    pub environment_path: String,
    pub model_path: String,
    /// Id of the DOM element the canvas gets appended to.
    pub mount_id: String,
    /// Class that marks swatch elements in the page.
    pub swatch_class: String,
    pub active_class: String,
    pub window_title: String,
    pub background: Color,
    pub colored_gem: Color,
    pub white_gem: Color,
    pub camera: CameraConfig,
    pub bindings: MaterialBindings,
    /// Swatches for builds without a page. The first one matches `colored_gem`.
    pub swatches: Vec<SwatchConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let colored_gem = Color::from_rgb8(0x74, 0x14, 0x14);
        Self {
            asset_dir: PathBuf::from("./assets"),
            environment_path: "env.hdr".to_string(),
            model_path: "ring.glb".to_string(),
            mount_id: "app".to_string(),
            swatch_class: "parameters-item".to_string(),
            active_class: "active".to_string(),
            window_title: "facet-viewer".to_string(),
            background: Color::from_rgb8(0xf5, 0xf5, 0xf5),
            colored_gem,
            white_gem: Color::WHITE,
            camera: CameraConfig::default(),
            bindings: MaterialBindings::ring(),
            swatches: vec![
                SwatchConfig::new("ruby", colored_gem),
                SwatchConfig::new("sapphire", Color::from_rgb8(0x14, 0x2a, 0x74)),
                SwatchConfig::new("emerald", Color::from_rgb8(0x0f, 0x5c, 0x2e)),
                SwatchConfig::new("topaz", Color::from_rgb8(0xc8, 0x8a, 0x12)),
                SwatchConfig::new("diamond", Color::WHITE),
            ],
        }
    }
}

impl ViewerConfig {
    /// Defaults with the asset root taken from [`ASSET_DIR_ENV`] when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(ASSET_DIR_ENV) {
            log::info!("using asset directory {}", dir);
            config.asset_dir = PathBuf::from(dir);
        }
        config
    }
}
