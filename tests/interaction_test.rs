use cgmath::Deg;
use facet_viewer::{
    camera::Projection,
    config::{SwatchConfig, ViewerConfig},
    data_structures::color::Color,
    interaction::{SwatchPicker, apply_resize, swatch_for_key},
};
use winit::keyboard::KeyCode;

fn picker() -> SwatchPicker {
    SwatchPicker::new(
        vec![
            SwatchConfig::new("ruby", Color::from_rgb8(0x74, 0x14, 0x14)),
            SwatchConfig::new("sapphire", Color::from_rgb8(0x14, 0x2a, 0x74)),
            SwatchConfig::new("diamond", Color::WHITE),
        ],
        None,
    )
}

fn surface_config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: wgpu::TextureFormat::Bgra8UnormSrgb,
        width,
        height,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}

#[test]
fn should_keep_exactly_one_swatch_active() {
    let mut picker = picker();
    assert_eq!(picker.active(), None);

    for index in [1, 0, 2, 2, 1] {
        picker.select(index);
        let active: Vec<usize> = (0..picker.swatches().len())
            .filter(|&i| picker.is_active(i))
            .collect();
        assert_eq!(active, vec![index]);
    }
    assert_eq!(picker.active(), Some(1));
}

#[test]
fn should_report_swatch_changes() {
    let mut picker = picker();

    let first = picker.select(1).expect("swatch 1 exists");
    assert_eq!(first.deactivated, None);
    assert_eq!(first.activated, 1);
    assert_eq!(first.color, Color::from_rgb8(0x14, 0x2a, 0x74));

    let second = picker.select(2).expect("swatch 2 exists");
    assert_eq!(second.deactivated, Some(1));
    assert_eq!(second.color, Color::WHITE);

    let again = picker.select(2).expect("swatch 2 exists");
    assert_eq!(again.deactivated, None);
}

#[test]
fn should_ignore_unknown_swatches() {
    let mut picker = picker();
    picker.select(0);
    assert!(picker.select(7).is_none());
    assert_eq!(picker.active(), Some(0));
}

#[test]
fn should_move_the_active_class_with_the_selection() {
    let mut picker = picker();
    picker.select(2);

    // The page still marks the first swatch from the initial markup
    assert_eq!(
        picker.class_updates([true, false, false]),
        vec![(0, false), (2, true)]
    );
    assert!(picker.class_updates([false, false, true]).is_empty());
}

#[test]
fn should_clear_stray_active_classes() {
    let picker = picker();

    assert_eq!(
        picker.class_updates([true, true, false]),
        vec![(0, false), (1, false)]
    );
    assert!(picker.class_updates([false, false, false]).is_empty());
}

#[test]
fn should_start_with_first_configured_swatch() {
    let config = ViewerConfig::default();
    let picker = SwatchPicker::from_config(&config.swatches);
    assert_eq!(picker.active(), Some(0));
    assert_eq!(picker.swatches()[0].color, config.colored_gem);

    assert_eq!(SwatchPicker::new(Vec::new(), Some(0)).active(), None);
}

#[test]
fn should_map_digit_keys_to_swatches() {
    assert_eq!(swatch_for_key(KeyCode::Digit1), Some(0));
    assert_eq!(swatch_for_key(KeyCode::Numpad3), Some(2));
    assert_eq!(swatch_for_key(KeyCode::Digit9), Some(8));
    assert_eq!(swatch_for_key(KeyCode::Digit0), None);
    assert_eq!(swatch_for_key(KeyCode::KeyA), None);
}

#[test]
fn should_resize_projection_and_surface() {
    let mut projection = Projection::new(800, 600, Deg(75.0), 0.1, 1000.0);
    let mut config = surface_config(800, 600);

    assert!(apply_resize(&mut projection, &mut config, 1280, 720));
    assert_eq!((config.width, config.height), (1280, 720));
    assert!((projection.aspect() - 1280.0 / 720.0).abs() < f32::EPSILON);

    assert!(apply_resize(&mut projection, &mut config, 300, 900));
    assert_eq!((config.width, config.height), (300, 900));
    assert!((projection.aspect() - 300.0 / 900.0).abs() < f32::EPSILON);
}

#[test]
fn should_ignore_zero_sized_resizes() {
    let mut projection = Projection::new(800, 600, Deg(75.0), 0.1, 1000.0);
    let mut config = surface_config(800, 600);

    assert!(!apply_resize(&mut projection, &mut config, 0, 600));
    assert!(!apply_resize(&mut projection, &mut config, 800, 0));
    assert_eq!((config.width, config.height), (800, 600));
    assert!((projection.aspect() - 800.0 / 600.0).abs() < f32::EPSILON);
}
