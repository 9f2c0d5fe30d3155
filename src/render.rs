//! Draw list construction and pipeline batching.
//!
//! The scene graph is flattened once, after bindings were applied, into
//! [`DrawItem`]s: one per visible mesh reference, carrying its world transform
//! and its gem slot if it has one. [`DrawList`] uploads the transforms as
//! single-instance buffers and records the passes: meshes that kept the model's
//! material go through the standard pipeline, bound meshes through the gem
//! pipeline.

use wgpu::util::DeviceExt;

use crate::{
    camera::CameraResources,
    data_structures::{
        instance::Instance,
        model::{DrawModel, Model},
        scene_graph::Node,
    },
    material::{GemMaterials, MaterialSlot},
    pipelines::Pipelines,
};

/// One mesh to draw, as decided by the scene graph.
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Index into [`Model::meshes`].
    pub mesh: usize,
    pub material: Option<MaterialSlot>,
    pub instance: Instance,
}

/// Flatten the visible part of `root` into draw items.
pub fn plan_draws(root: &Node) -> Vec<DrawItem> {
    root.visible_meshes(&Instance::new())
        .into_iter()
        .flat_map(|(node, instance)| {
            node.meshes.iter().map(move |&mesh| DrawItem {
                mesh,
                material: node.material,
                instance: instance.clone(),
            })
        })
        .collect()
}

/// A draw item with its instance data on the GPU.
#[derive(Debug)]
pub struct Instanced {
    pub mesh: usize,
    pub instance: wgpu::Buffer,
}

#[derive(Debug, Default)]
pub struct DrawList {
    standard: Vec<Instanced>,
    colored: Vec<Instanced>,
    white: Vec<Instanced>,
}

impl DrawList {
    pub fn new(device: &wgpu::Device, model: &Model) -> Self {
        let mut list = Self::default();
        for item in plan_draws(&model.root) {
            if item.mesh >= model.meshes.len() {
                log::warn!("node references missing mesh {}", item.mesh);
                continue;
            }
            let instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Instance Buffer"),
                contents: bytemuck::cast_slice(&[item.instance.to_raw()]),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let instanced = Instanced {
                mesh: item.mesh,
                instance,
            };
            match item.material {
                None => list.standard.push(instanced),
                Some(MaterialSlot::Colored) => list.colored.push(instanced),
                Some(MaterialSlot::White) => list.white.push(instanced),
            }
        }
        list
    }

    pub fn len(&self) -> usize {
        self.standard.len() + self.colored.len() + self.white.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipelines: &Pipelines,
        camera: &CameraResources,
        model: &Model,
        gems: &GemMaterials,
    ) {
        if !self.standard.is_empty() {
            render_pass.set_pipeline(&pipelines.standard);
            for instanced in &self.standard {
                let mesh = &model.meshes[instanced.mesh];
                let material = &model.materials[mesh.material];
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh(mesh, &material.bind_group, &camera.bind_group);
            }
        }

        render_pass.set_pipeline(&pipelines.gem);
        for (batch, slot) in [
            (&self.colored, MaterialSlot::Colored),
            (&self.white, MaterialSlot::White),
        ] {
            let material = gems.get(slot);
            for instanced in batch {
                let mesh = &model.meshes[instanced.mesh];
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh(mesh, &material.bind_group, &camera.bind_group);
            }
        }
    }
}
