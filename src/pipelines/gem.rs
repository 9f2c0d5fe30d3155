use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{self, Vertex},
        texture::Texture,
    },
    pipelines::basic::mk_render_pipeline,
};

/// Pipeline for the two gem materials.
///
/// Stones are drawn without culling so the pavilion facets behind the table
/// still contribute when the camera looks through a thin mesh.
pub fn mk_gem_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Gem Pipeline Layout"),
        bind_group_layouts: &[camera_bind_group_layout, material_bind_group_layout],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Gem Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("gem.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        "Gem Pipeline",
        &render_pipeline_layout,
        config.format,
        Some(wgpu::BlendState::REPLACE),
        Some(Texture::DEPTH_FORMAT),
        None,
        &[model::ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
