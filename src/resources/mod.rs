use std::path::PathBuf;

use wgpu::util::DeviceExt;

use crate::{
    config::ViewerConfig,
    data_structures::{
        model::{self, StandardMaterial},
        scene_graph::Node,
    },
    environment::ReflectionMap,
    error::ViewerError,
};

/**
 * This module contains all logic for loading models and raw asset bytes from
 * the asset root, on disk for native builds and over HTTP on the web.
 */
pub mod mesh;

/// Where assets are resolved from.
#[derive(Debug, Clone)]
pub struct AssetRoot {
    #[cfg(not(target_arch = "wasm32"))]
    dir: PathBuf,
}

impl AssetRoot {
    #[allow(unused_variables)]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            dir: config.asset_dir.clone(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(target_arch = "wasm32")]
    fn format_url(&self, file_name: &str) -> anyhow::Result<reqwest::Url> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let origin = window
            .location()
            .origin()
            .map_err(|_| anyhow::anyhow!("page origin is not readable"))?;
        let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
        Ok(base.join(file_name)?)
    }

    pub async fn load_binary(&self, file_name: &str) -> Result<Vec<u8>, ViewerError> {
        let to_error = |source: anyhow::Error| ViewerError::AssetLoad {
            path: file_name.to_string(),
            source,
        };

        #[cfg(target_arch = "wasm32")]
        let data = {
            let fetch = async {
                let url = self.format_url(file_name)?;
                let response = reqwest::get(url).await?.error_for_status()?;
                anyhow::Ok(response.bytes().await?.to_vec())
            };
            fetch.await.map_err(to_error)?
        };
        #[cfg(not(target_arch = "wasm32"))]
        let data = {
            let path = self.dir.join(file_name);
            tokio::fs::read(&path)
                .await
                .map_err(|e| to_error(anyhow::Error::new(e).context(path.display().to_string())))?
        };

        log::debug!("loaded {} ({} bytes)", file_name, data.len());
        Ok(data)
    }
}

/// Load a binary glTF file into a [`model::Model`].
///
/// Every glTF material becomes a [`StandardMaterial`] lit by `environment`.
/// Primitives without a material use an extra neutral material appended last.
pub async fn load_model_gltf(
    assets: &AssetRoot,
    file_name: &str,
    device: &wgpu::Device,
    environment: &ReflectionMap,
    material_layout: &wgpu::BindGroupLayout,
) -> Result<model::Model, ViewerError> {
    let bytes = assets.load_binary(file_name).await?;
    let gltf = gltf::Gltf::from_slice(&bytes).map_err(|source| ViewerError::ModelParse {
        path: file_name.to_string(),
        source,
    })?;
    let unsupported = |reason: &str| ViewerError::UnsupportedAsset {
        path: file_name.to_string(),
        reason: reason.to_string(),
    };

    // Load buffers
    let mut buffer_data: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| unsupported("binary chunk referenced but missing"))?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                return Err(unsupported("embedded data URIs are not supported"));
            }
            gltf::buffer::Source::Uri(uri) => {
                buffer_data.push(assets.load_binary(uri).await?);
            }
        }
    }

    // Load materials
    let mut materials = Vec::new();
    for (idx, material) in gltf.materials().enumerate() {
        let pbr = material.pbr_metallic_roughness();
        let name = material
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} material {}", file_name, idx));
        let uniform = model::StandardUniform {
            base_color: pbr.base_color_factor(),
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            max_lod: environment.max_lod,
            _padding: 0.0,
        };
        materials.push(StandardMaterial::new(
            device,
            material_layout,
            environment,
            &name,
            uniform,
        ));
    }
    let fallback_material = materials.len();
    materials.push(StandardMaterial::new(
        device,
        material_layout,
        environment,
        "default material",
        model::StandardUniform::neutral(environment.max_lod),
    ));

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| unsupported("the file contains no scene"))?;

    let mut meshes = Vec::new();
    let mut root = Node::new(scene.name());
    for node in scene.nodes() {
        let child = to_node(node, &buffer_data, device, &mut meshes, fallback_material);
        root.add_child(child);
    }
    log::info!(
        "loaded model {}: {} meshes, {} materials",
        file_name,
        meshes.len(),
        materials.len()
    );

    Ok(model::Model {
        root,
        meshes,
        materials,
    })
}

fn to_node(
    node: gltf::scene::Node,
    buffers: &[Vec<u8>],
    device: &wgpu::Device,
    meshes: &mut Vec<model::Mesh>,
    fallback_material: usize,
) -> Node {
    let mut scene_node = Node::new(node.name());
    scene_node.local = node.transform().matrix().into();

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "skipping primitive {} of {:?}: only triangle lists are drawn",
                    primitive.index(),
                    node.name()
                );
                continue;
            }
            let (vertices, indices) = mesh::read_primitive(&primitive, buffers);
            if vertices.is_empty() || indices.is_empty() {
                continue;
            }
            let label = node.name().or(mesh.name()).unwrap_or("unnamed");

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", label)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", label)),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            scene_node.meshes.push(meshes.len());
            meshes.push(model::Mesh {
                name: label.to_string(),
                vertex_buffer,
                index_buffer,
                num_elements: indices.len() as u32,
                material: primitive.material().index().unwrap_or(fallback_material),
            });
        }
    }

    for child in node.children() {
        scene_node.add_child(to_node(child, buffers, device, meshes, fallback_material));
    }
    scene_node
}
