//! Environment lighting from an equirectangular HDR image.
//!
//! The radiance image is decoded on the CPU and pre-filtered into a mip chain
//! where each level is half the size and blurrier than the previous one. Rough
//! surfaces sample the blurry levels, polished ones the sharp level. The result
//! is uploaded once as a [`ReflectionMap`] and shared by every material.

use image::{ImageFormat, Rgba32FImage};

use crate::{
    data_structures::texture::{Texture, create_environment_sampler},
    error::ViewerError,
    resources::AssetRoot,
};

/// WebGL2 guarantees 2048 texels per dimension.
pub const MAX_WIDTH: u32 = 2048;
/// Number of roughness levels kept in the chain.
pub const MAX_LEVELS: usize = 6;

/// One level of the pre-filtered chain in linear RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[f32; 4]>,
}

impl EnvLevel {
    pub fn from_image(image: &Rgba32FImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|pixel| pixel.0).collect(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Box filter to half size (never below one texel).
    pub fn downsample(&self) -> EnvLevel {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let mut sum = [0.0f32; 4];
                for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    let sx = (x * 2 + dx).min(self.width - 1);
                    let sy = (y * 2 + dy).min(self.height - 1);
                    let texel = self.pixel(sx, sy);
                    sum.iter_mut().zip(texel).for_each(|(s, t)| *s += t);
                }
                pixels.push(sum.map(|s| s / 4.0));
            }
        }
        EnvLevel {
            width,
            height,
            pixels,
        }
    }

    /// Separable box blur. Longitude wraps around, latitude clamps at the poles.
    pub fn blur(&self, radius: u32) -> EnvLevel {
        if radius == 0 {
            return self.clone();
        }
        let r = radius as i64;
        let taps = (2 * r + 1) as f32;
        let (w, h) = (self.width as i64, self.height as i64);

        let mut horizontal = Vec::with_capacity(self.pixels.len());
        for y in 0..h {
            for x in 0..w {
                let mut sum = [0.0f32; 4];
                for offset in -r..=r {
                    let sx = (x + offset).rem_euclid(w);
                    let texel = self.pixels[(y * w + sx) as usize];
                    sum.iter_mut().zip(texel).for_each(|(s, t)| *s += t);
                }
                horizontal.push(sum.map(|s| s / taps));
            }
        }

        let mut pixels = Vec::with_capacity(self.pixels.len());
        for y in 0..h {
            for x in 0..w {
                let mut sum = [0.0f32; 4];
                for offset in -r..=r {
                    let sy = (y + offset).clamp(0, h - 1);
                    let texel = horizontal[(sy * w + x) as usize];
                    sum.iter_mut().zip(texel).for_each(|(s, t)| *s += t);
                }
                pixels.push(sum.map(|s| s / taps));
            }
        }

        EnvLevel {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Converts a decoded equirectangular image into a blurred mip chain.
///
/// The converter owns the decoded image; both are gone once
/// [`EquirectPrefilter::into_levels`] returns.
pub struct EquirectPrefilter {
    source: EnvLevel,
}

impl EquirectPrefilter {
    pub fn new(image: Rgba32FImage) -> Self {
        Self {
            source: EnvLevel::from_image(&image),
        }
    }

    pub fn from_level(source: EnvLevel) -> Self {
        Self { source }
    }

    /// How many levels a chain for a `width` x `height` base gets.
    pub fn level_count(width: u32, height: u32) -> usize {
        let smallest = width.min(height).max(1);
        (smallest.ilog2() as usize + 1).min(MAX_LEVELS)
    }

    pub fn into_levels(self) -> Vec<EnvLevel> {
        let mut base = self.source;
        while base.width > MAX_WIDTH {
            base = base.downsample();
        }
        let count = Self::level_count(base.width, base.height);
        let mut levels = Vec::with_capacity(count);
        levels.push(base);
        for level in 1..count {
            let previous = &levels[level - 1];
            let next = previous.downsample().blur(level as u32);
            levels.push(next);
        }
        levels
    }
}

/// The pre-filtered environment shared by all materials.
#[derive(Debug)]
pub struct ReflectionMap {
    pub texture: Texture,
    pub sampler: wgpu::Sampler,
    /// Highest mip level, used by the shaders to map roughness to a level.
    pub max_lod: f32,
}

impl ReflectionMap {
    pub fn from_levels(device: &wgpu::Device, queue: &wgpu::Queue, levels: &[EnvLevel]) -> Self {
        let texture = Texture::from_hdr_levels(device, queue, levels, "reflection map");
        Self {
            texture,
            sampler: create_environment_sampler(device),
            max_lod: levels.len().saturating_sub(1) as f32,
        }
    }
}

/// Fetch, decode, pre-filter and upload the environment image at `path`.
pub async fn load_reflection_map(
    assets: &AssetRoot,
    path: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Result<ReflectionMap, ViewerError> {
    let bytes = assets.load_binary(path).await?;
    let levels = {
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Hdr)
            .map_err(|source| ViewerError::EnvironmentDecode {
                path: path.to_string(),
                source,
            })?
            .into_rgba32f();
        log::info!(
            "decoded environment {} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        EquirectPrefilter::new(image).into_levels()
    };
    drop(bytes);

    let map = ReflectionMap::from_levels(device, queue, &levels);
    log::info!(
        "reflection map ready: {} levels, base {}x{}",
        levels.len(),
        levels[0].width,
        levels[0].height
    );
    Ok(map)
}
