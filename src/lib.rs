//! facet-viewer
//!
//! An interactive 3D viewer for a gemstone ring, running natively and in the
//! browser. The ring is lit by a pre-filtered HDR environment; its stones are
//! drawn with a custom gem material whose color follows a row of swatches.
//!
//! High-level modules
//! - `app`: event loop, frame loop and the async loading chain
//! - `binding`: name-based assignment of gem materials to mesh nodes
//! - `camera`: orbit camera, its controller and uniforms for view/projection
//! - `config`: every constant of the viewer in one struct
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: meshes, instances, textures, colors and the node tree
//! - `environment`: HDR decoding and reflection map pre-filtering
//! - `interaction`: swatch selection and resize handling
//! - `material`: the gem material and its live parameters
//! - `pipelines`: the standard and gem render pipelines
//! - `render`: draw list construction and pipeline batching
//! - `resources`: asset fetching and glTF import
//! - `scene`: the staged scene assembly
//! - `web`: canvas mounting and page swatches (wasm only)
//!

pub mod app;
pub mod binding;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod environment;
pub mod error;
pub mod interaction;
pub mod material;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::run;
pub use config::ViewerConfig;
pub use error::ViewerError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run(ViewerConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}
