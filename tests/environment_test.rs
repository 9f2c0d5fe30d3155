use facet_viewer::environment::{EnvLevel, EquirectPrefilter, MAX_LEVELS, MAX_WIDTH};

fn constant(width: u32, height: u32, value: [f32; 4]) -> EnvLevel {
    EnvLevel {
        width,
        height,
        pixels: vec![value; (width * height) as usize],
    }
}

fn assert_pixel_close(actual: [f32; 4], expected: [f32; 4]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-4, "expected {:?} but got {:?}", expected, actual);
    }
}

#[test]
fn should_halve_every_level() {
    let levels = EquirectPrefilter::from_level(constant(16, 8, [1.0; 4])).into_levels();

    let sizes: Vec<(u32, u32)> = levels.iter().map(|l| (l.width, l.height)).collect();
    assert_eq!(sizes, vec![(16, 8), (8, 4), (4, 2), (2, 1)]);
    for level in &levels {
        assert_eq!(level.pixels.len(), (level.width * level.height) as usize);
    }
}

#[test]
fn should_preserve_a_constant_environment() {
    let value = [2.0, 1.0, 0.5, 1.0];
    let levels = EquirectPrefilter::from_level(constant(32, 16, value)).into_levels();

    for level in levels {
        for pixel in level.pixels {
            assert_pixel_close(pixel, value);
        }
    }
}

#[test]
fn should_cap_the_level_count() {
    assert_eq!(EquirectPrefilter::level_count(1024, 512), MAX_LEVELS);
    assert_eq!(EquirectPrefilter::level_count(16, 8), 4);
    assert_eq!(EquirectPrefilter::level_count(1, 1), 1);
}

#[test]
fn should_shrink_oversized_sources() {
    let levels = EquirectPrefilter::from_level(constant(4 * MAX_WIDTH, 4, [1.0; 4])).into_levels();

    assert_eq!((levels[0].width, levels[0].height), (MAX_WIDTH, 1));
    assert_eq!(levels.len(), 1);
}

#[test]
fn should_wrap_blur_around_longitude() {
    let mut level = constant(4, 1, [0.0; 4]);
    level.pixels[0] = [3.0, 3.0, 3.0, 3.0];

    let blurred = level.blur(1);

    assert_pixel_close(blurred.pixel(3, 0), [1.0; 4]);
    assert_pixel_close(blurred.pixel(1, 0), [1.0; 4]);
    assert_pixel_close(blurred.pixel(2, 0), [0.0; 4]);
}

#[test]
fn should_average_when_downsampling() {
    let level = EnvLevel {
        width: 2,
        height: 2,
        pixels: vec![[0.0; 4], [1.0; 4], [2.0; 4], [5.0; 4]],
    };

    let half = level.downsample();

    assert_eq!((half.width, half.height), (1, 1));
    assert_pixel_close(half.pixel(0, 0), [2.0; 4]);
}
