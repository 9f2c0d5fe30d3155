use facet_viewer::{data_structures::color::Color, error::ColorParseError};

fn assert_color_close(value: &str, expected: Color) {
    let parsed = value
        .parse::<Color>()
        .unwrap_or_else(|e| panic!("{:?} should parse: {}", value, e));
    for (a, e) in [parsed.r, parsed.g, parsed.b]
        .iter()
        .zip([expected.r, expected.g, expected.b])
    {
        assert!(
            (a - e).abs() < 1e-4,
            "{:?} parsed to {:?}, expected {:?}",
            value,
            parsed,
            expected
        );
    }
}

#[test]
fn should_parse_hex_colors() {
    assert_eq!(
        "#741414".parse::<Color>(),
        Ok(Color::from_rgb8(0x74, 0x14, 0x14))
    );
    assert_eq!("#FFF".parse::<Color>(), Ok(Color::WHITE));
    assert_eq!(
        "  #0f5C2e ".parse::<Color>(),
        Ok(Color::from_rgb8(0x0f, 0x5c, 0x2e))
    );
}

#[test]
fn should_parse_rgb_functions() {
    assert_eq!(
        "rgb(255, 0, 128)".parse::<Color>(),
        Ok(Color::from_rgb8(255, 0, 128))
    );
    assert_eq!(
        "RGB(20,42,116)".parse::<Color>(),
        Ok(Color::from_rgb8(20, 42, 116))
    );
}

#[test]
fn should_clamp_rgb_channels_and_ignore_alpha() {
    assert_eq!(
        "rgb(300, 0, 0)".parse::<Color>(),
        Ok(Color::from_rgb8(255, 0, 0))
    );
    assert_eq!(
        "rgba(20, 42, 116, 0.5)".parse::<Color>(),
        Ok(Color::from_rgb8(20, 42, 116))
    );
}

#[test]
fn should_parse_percentage_rgb() {
    assert_color_close("rgb(100%, 0%, 0%)", Color::new(1.0, 0.0, 0.0));
    assert_color_close("rgb(50%, 25%, 150%)", Color::new(0.5, 0.25, 1.0));
}

#[test]
fn should_parse_hsl_functions() {
    assert_color_close("hsl(0, 100%, 50%)", Color::new(1.0, 0.0, 0.0));
    assert_color_close("hsl(120, 100%, 50%)", Color::new(0.0, 1.0, 0.0));
    assert_color_close("hsl(240, 100%, 25%)", Color::new(0.0, 0.0, 0.5));
    assert_color_close("hsla(0, 0%, 75%, 1)", Color::new(0.75, 0.75, 0.75));
    assert_color_close("hsl(360, 100%, 50%)", Color::new(1.0, 0.0, 0.0));
}

#[test]
fn should_parse_named_colors() {
    assert_eq!("white".parse::<Color>(), Ok(Color::WHITE));
    assert_eq!("red".parse::<Color>(), Ok(Color::from_rgb8(255, 0, 0)));
    assert_eq!(
        " DarkRed ".parse::<Color>(),
        Ok(Color::from_rgb8(0x8b, 0, 0))
    );
    assert_eq!(
        "rebeccapurple".parse::<Color>(),
        Ok(Color::from_rgb8(0x66, 0x33, 0x99))
    );
}

#[test]
fn should_reject_other_values() {
    for value in [
        "",
        "741414",
        "#12345",
        "#gg0000",
        "rgb(1, 2)",
        "rgb(1, 2, 3, 4, 5)",
        "rgb(-1, 0, 0)",
        "rgb(100%, 0, 0)",
        "rgb(1, 2, 3",
        "hsl(0, 100, 50)",
        "cmyk(0, 0, 0, 0)",
        "notacolor",
    ] {
        assert_eq!(
            value.parse::<Color>(),
            Err(ColorParseError(value.to_string())),
            "{:?} should not parse",
            value
        );
    }
}

#[test]
fn should_print_as_hex() {
    let color = Color::from_rgb8(0x14, 0x2a, 0x74);
    assert_eq!(color.to_string(), "#142a74");
    assert_eq!(color.to_string().parse::<Color>(), Ok(color));
}

#[test]
fn should_convert_to_linear() {
    let close = |a: f32, b: f32| (a - b).abs() < 1e-3;

    assert!(Color::WHITE.to_linear().iter().all(|&c| close(c, 1.0)));
    assert_eq!(Color::new(0.0, 0.0, 0.0).to_linear(), [0.0, 0.0, 0.0]);

    let [r, _, _] = Color::new(0.5, 0.5, 0.5).to_linear();
    assert!(close(r, 0.214));
}
