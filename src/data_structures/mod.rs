//! Viewer data structures: colors, models, textures, scene graphs, and instances.
//!
//! - `color` parses and converts the colors used by swatches and materials
//! - `instance` holds the per-draw world transform uploaded to the GPU
//! - `model` contains mesh and model-material definitions
//! - `scene_graph` is the node tree of a loaded model
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod color;
pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
