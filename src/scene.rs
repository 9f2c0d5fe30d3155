//! Scene assembly.
//!
//! Loading runs as a chain of stages, each awaiting the previous one:
//! environment, gem materials, model, bindings. The result is a [`SceneReady`]
//! that the application installs once. Any stage error aborts the chain and is
//! handed back to the caller, which logs it and keeps drawing the empty scene.

use std::sync::Arc;

use instant::Instant;

use crate::{
    binding::BindingReport,
    camera::CameraResources,
    config::ViewerConfig,
    data_structures::model::Model,
    environment::{self, ReflectionMap},
    error::ViewerError,
    material::GemMaterials,
    pipelines::Pipelines,
    render::DrawList,
    resources::{self, AssetRoot},
};

/// A fully loaded scene, ready to be drawn.
#[derive(Debug)]
pub struct SceneReady {
    pub environment: Arc<ReflectionMap>,
    pub materials: GemMaterials,
    pub model: Model,
    pub draws: DrawList,
    pub report: BindingReport,
}

impl SceneReady {
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipelines: &Pipelines,
        camera: &CameraResources,
    ) {
        self.draws
            .draw(render_pass, pipelines, camera, &self.model, &self.materials);
    }
}

pub async fn assemble(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    material_layout: &wgpu::BindGroupLayout,
    config: &ViewerConfig,
) -> Result<SceneReady, ViewerError> {
    let started = Instant::now();
    let assets = AssetRoot::new(config);

    log::info!("loading environment {}", config.environment_path);
    let environment = Arc::new(
        environment::load_reflection_map(&assets, &config.environment_path, device, queue).await?,
    );

    let materials = GemMaterials::new(
        device,
        material_layout,
        &environment,
        config.colored_gem,
        config.white_gem,
    )?;

    log::info!("loading model {}", config.model_path);
    let mut model = resources::load_model_gltf(
        &assets,
        &config.model_path,
        device,
        &environment,
        material_layout,
    )
    .await?;

    let report = config.bindings.apply(&mut model.root);
    log::info!(
        "bound {} colored and {} white gems, {} hidden, {} unparsed",
        report.colored,
        report.white,
        report.hidden,
        report.unparsed.len()
    );

    let draws = DrawList::new(device, &model);
    log::info!("scene assembled in {:?}", started.elapsed());

    Ok(SceneReady {
        environment,
        materials,
        model,
        draws,
        report,
    })
}
