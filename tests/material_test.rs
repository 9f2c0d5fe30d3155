use facet_viewer::{
    data_structures::color::Color,
    material::{DIAMOND_DISPERSION, DIAMOND_IOR, GemParams},
};

#[cfg(feature = "integration-tests")]
mod common;

fn ruby() -> Color {
    Color::from_rgb8(0x74, 0x14, 0x14)
}

#[test]
fn should_start_clean() {
    let params = GemParams::new(ruby());
    assert_eq!(params.color(), ruby());
    assert!(!params.is_dirty());
}

#[test]
fn should_mark_color_changes_until_uploaded() {
    let mut params = GemParams::new(ruby());

    params.set_color(Color::WHITE);
    assert_eq!(params.color(), Color::WHITE);
    assert!(params.is_dirty());

    assert!(params.take_dirty());
    assert!(!params.take_dirty());
}

#[test]
fn should_upload_linear_color_and_diamond_constants() {
    let params = GemParams::new(ruby());
    let uniform = params.to_uniform(5.0);

    let [r, g, b] = ruby().to_linear();
    assert_eq!(uniform.color, [r, g, b, 1.0]);
    assert_eq!(uniform.ior, DIAMOND_IOR);
    assert_eq!(uniform.dispersion, DIAMOND_DISPERSION);
    assert_eq!(uniform.max_lod, 5.0);
}

#[test]
fn should_keep_params_independent() {
    let mut colored = GemParams::new(ruby());
    let white = GemParams::new(Color::WHITE);

    colored.set_color(Color::from_rgb8(0x14, 0x2a, 0x74));

    assert_eq!(white.color(), Color::WHITE);
    assert!(!white.is_dirty());
}

#[cfg(feature = "integration-tests")]
mod gpu {
    use std::sync::Arc;

    use facet_viewer::{
        data_structures::color::Color,
        error::ViewerError,
        material::{GemMaterial, GemMaterialDescriptor, GemMaterials, MaterialSlot},
        pipelines,
    };

    use crate::common::test_utils::{grey_reflection_map, headless_device};

    #[tokio::test]
    async fn should_require_environment_and_color() {
        let (device, queue) = headless_device().await;
        let layout = pipelines::material_layout(&device);
        let env_map = Arc::new(grey_reflection_map(&device, &queue));

        let missing_env = GemMaterial::new(
            &device,
            &layout,
            GemMaterialDescriptor {
                color: Some(Color::WHITE),
                ..Default::default()
            },
        );
        assert!(matches!(missing_env, Err(ViewerError::Configuration(_))));

        let missing_color = GemMaterial::new(
            &device,
            &layout,
            GemMaterialDescriptor {
                env_map: Some(env_map.clone()),
                ..Default::default()
            },
        );
        assert!(matches!(missing_color, Err(ViewerError::Configuration(_))));

        let complete = GemMaterial::new(
            &device,
            &layout,
            GemMaterialDescriptor {
                label: Some("test gem"),
                env_map: Some(env_map),
                color: Some(Color::WHITE),
            },
        );
        assert!(complete.is_ok());
    }

    #[tokio::test]
    async fn should_recolor_only_the_colored_gem() {
        let (device, queue) = headless_device().await;
        let layout = pipelines::material_layout(&device);
        let env_map = Arc::new(grey_reflection_map(&device, &queue));
        let ruby = Color::from_rgb8(0x74, 0x14, 0x14);
        let sapphire = Color::from_rgb8(0x14, 0x2a, 0x74);

        let mut gems = GemMaterials::new(&device, &layout, &env_map, ruby, Color::WHITE)
            .expect("both materials are configured");

        gems.get_mut(MaterialSlot::Colored).set_color(sapphire);
        assert_eq!(gems.get(MaterialSlot::Colored).color(), sapphire);
        assert_eq!(gems.get(MaterialSlot::White).color(), Color::WHITE);
        assert!(gems.colored.params().is_dirty());
        assert!(!gems.white.params().is_dirty());

        gems.write_to_buffers(&queue);
        assert!(!gems.colored.params().is_dirty());
        assert!(Arc::ptr_eq(gems.colored.env_map(), gems.white.env_map()));
    }
}
