//! Gemstone shading material.
//!
//! A [`GemMaterial`] blends a tinted refraction of the environment with a
//! Fresnel-weighted reflection, which reads as a faceted stone under the
//! pre-filtered [`ReflectionMap`]. The color is a live parameter: writes go to
//! the CPU copy in [`GemParams`] and reach the GPU before the next frame.

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::{data_structures::color::Color, environment::ReflectionMap, error::ViewerError};

/// Refractive index of diamond.
pub const DIAMOND_IOR: f32 = 2.42;
/// Spread of the per-channel refractive index that produces the colored fire.
pub const DIAMOND_DISPERSION: f32 = 0.044;

/// Which of the two gem materials a node is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    /// The material whose color follows the swatch picker.
    Colored,
    White,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GemUniform {
    pub color: [f32; 4],
    pub ior: f32,
    pub dispersion: f32,
    pub max_lod: f32,
    pub _padding: f32,
}

/// CPU side state of a gem material.
#[derive(Debug, Clone, PartialEq)]
pub struct GemParams {
    color: Color,
    ior: f32,
    dispersion: f32,
    dirty: bool,
}

impl GemParams {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ior: DIAMOND_IOR,
            dispersion: DIAMOND_DISPERSION,
            dirty: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag and reports whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn to_uniform(&self, max_lod: f32) -> GemUniform {
        let [r, g, b] = self.color.to_linear();
        GemUniform {
            color: [r, g, b, 1.0],
            ior: self.ior,
            dispersion: self.dispersion,
            max_lod,
            _padding: 0.0,
        }
    }
}

/// Constructor input for [`GemMaterial`]. Both fields are required.
#[derive(Debug, Default, Clone)]
pub struct GemMaterialDescriptor<'a> {
    pub label: Option<&'a str>,
    pub env_map: Option<Arc<ReflectionMap>>,
    pub color: Option<Color>,
}

#[derive(Debug)]
pub struct GemMaterial {
    params: GemParams,
    env_map: Arc<ReflectionMap>,
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl GemMaterial {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        desc: GemMaterialDescriptor<'_>,
    ) -> Result<Self, ViewerError> {
        let env_map = desc
            .env_map
            .ok_or(ViewerError::Configuration("gem material needs an environment map"))?;
        let color = desc
            .color
            .ok_or(ViewerError::Configuration("gem material needs a base color"))?;
        let label = desc.label.unwrap_or("gem material");

        let params = GemParams::new(color);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniform Buffer", label)),
            contents: bytemuck::cast_slice(&[params.to_uniform(env_map.max_lod)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&env_map.texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&env_map.sampler),
                },
            ],
            label: Some(label),
        });

        Ok(Self {
            params,
            env_map,
            buffer,
            bind_group,
        })
    }

    pub fn color(&self) -> Color {
        self.params.color()
    }

    /// Takes effect on the next rendered frame.
    pub fn set_color(&mut self, color: Color) {
        self.params.set_color(color);
    }

    pub fn params(&self) -> &GemParams {
        &self.params
    }

    pub fn env_map(&self) -> &Arc<ReflectionMap> {
        &self.env_map
    }

    /// Upload the parameters if they changed since the last upload.
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue) {
        if self.params.take_dirty() {
            queue.write_buffer(
                &self.buffer,
                0,
                bytemuck::cast_slice(&[self.params.to_uniform(self.env_map.max_lod)]),
            );
        }
    }
}

/// The two gem materials of the scene.
#[derive(Debug)]
pub struct GemMaterials {
    pub colored: GemMaterial,
    pub white: GemMaterial,
}

impl GemMaterials {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        env_map: &Arc<ReflectionMap>,
        colored: Color,
        white: Color,
    ) -> Result<Self, ViewerError> {
        let colored = GemMaterial::new(
            device,
            layout,
            GemMaterialDescriptor {
                label: Some("colored gem"),
                env_map: Some(env_map.clone()),
                color: Some(colored),
            },
        )?;
        let white = GemMaterial::new(
            device,
            layout,
            GemMaterialDescriptor {
                label: Some("white gem"),
                env_map: Some(env_map.clone()),
                color: Some(white),
            },
        )?;
        Ok(Self { colored, white })
    }

    pub fn get(&self, slot: MaterialSlot) -> &GemMaterial {
        match slot {
            MaterialSlot::Colored => &self.colored,
            MaterialSlot::White => &self.white,
        }
    }

    pub fn get_mut(&mut self, slot: MaterialSlot) -> &mut GemMaterial {
        match slot {
            MaterialSlot::Colored => &mut self.colored,
            MaterialSlot::White => &mut self.white,
        }
    }

    pub fn write_to_buffers(&mut self, queue: &wgpu::Queue) {
        self.colored.write_to_buffer(queue);
        self.white.write_to_buffer(queue);
    }
}
