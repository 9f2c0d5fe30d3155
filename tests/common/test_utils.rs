#![allow(dead_code)]

use facet_viewer::data_structures::scene_graph::Node;
#[cfg(feature = "integration-tests")]
use facet_viewer::environment::{EnvLevel, ReflectionMap};

/// A mesh node drawing the single mesh `index`.
pub(crate) fn mesh(name: Option<&str>, index: usize) -> Node {
    Node::with_meshes(name, vec![index])
}

/// A small stand-in for the ring file:
///
/// ```text
/// Scene
/// └── Ring (group)
///     ├── Band        0
///     ├── Diamond5    1
///     ├── Diamond300  2
///     ├── Oval003     3
///     ├── Oval002     4
///     ├── <unnamed>   5
///     └── #occluder   6
///         └── Diamond7  7
/// ```
pub(crate) fn ring_graph() -> Node {
    let mut occluder = mesh(Some("#occluder"), 6);
    occluder.add_child(mesh(Some("Diamond7"), 7));

    let mut ring = Node::new(Some("Ring"));
    ring.add_child(mesh(Some("Band"), 0));
    ring.add_child(mesh(Some("Diamond5"), 1));
    ring.add_child(mesh(Some("Diamond300"), 2));
    ring.add_child(mesh(Some("Oval003"), 3));
    ring.add_child(mesh(Some("Oval002"), 4));
    ring.add_child(mesh(None, 5));
    ring.add_child(occluder);

    let mut root = Node::new(Some("Scene"));
    root.add_child(ring);
    root
}

/// The first mesh node without a name.
pub(crate) fn find_unnamed(root: &Node) -> Option<&Node> {
    if root.name.is_none() && root.is_mesh() {
        return Some(root);
    }
    root.children.iter().find_map(find_unnamed)
}

#[cfg(feature = "integration-tests")]
pub(crate) async fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no adapter available");
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("test device"),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            ..Default::default()
        })
        .await
        .expect("failed to create a device")
}

/// A tiny uniformly grey environment.
#[cfg(feature = "integration-tests")]
pub(crate) fn grey_reflection_map(device: &wgpu::Device, queue: &wgpu::Queue) -> ReflectionMap {
    let base = EnvLevel {
        width: 8,
        height: 4,
        pixels: vec![[0.5, 0.5, 0.5, 1.0]; 32],
    };
    let levels = vec![base.clone(), base.downsample(), base.downsample().downsample()];
    ReflectionMap::from_levels(device, queue, &levels)
}
