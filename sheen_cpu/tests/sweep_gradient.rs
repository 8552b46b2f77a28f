// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use sheen_cpu::sheen_common::color::palette::css::{BLACK, BLUE, RED, WHITE};
use sheen_cpu::sheen_common::kurbo::{Affine, Point, Rect, Vec2};
use sheen_cpu::sheen_common::peniko::Color;
use sheen_cpu::{CpuEffects, Effects, Shader};

use crate::util::{circle, premul, Paint, Pixmap};

mod util;

fn rainbow() -> [Color; 7] {
    [
        Color::new([1.0, 0.0, 0.0, 1.0]),
        Color::new([1.0, 1.0, 0.0, 1.0]),
        Color::new([0.0, 1.0, 0.0, 1.0]),
        Color::new([0.0, 1.0, 1.0, 1.0]),
        Color::new([0.0, 0.0, 1.0, 1.0]),
        Color::new([1.0, 0.0, 1.0, 1.0]),
        Color::new([1.0, 0.0, 0.0, 1.0]),
    ]
}

#[test]
fn sweep_rings() -> anyhow::Result<()> {
    let effects = CpuEffects::default();
    let center = Point::new(256.0, 256.0);
    let bw = [BLACK, WHITE, BLACK];
    let rings: [(f64, f64, &[Color]); 5] = [
        (FRAC_PI_2, 250.0, &bw),
        (0.0, 200.0, &rainbow()),
        (-FRAC_PI_2, 150.0, &bw),
        (PI, 100.0, &rainbow()),
        (0.0, 50.0, &bw[..2]),
    ];

    let mut pixmap = Pixmap::new(512, 512);
    let mut shaders = Vec::new();
    for (start, radius, colors) in rings {
        let shader = effects
            .sweep_gradient(center, start, colors)
            .expect("sweep gradient");
        pixmap.fill_path(
            &circle(center, radius),
            Paint::Shader(shader.as_ref(), Affine::IDENTITY),
        );
        shaders.push(shader);
    }
    pixmap.dump("sweep_rings")?;

    // Every pixel of the innermost disc comes from the last shader.
    let inner = &shaders[4];
    let mapper = inner.mapper(Affine::IDENTITY).unwrap();
    for (x, y) in [(270_u16, 256_u16), (256, 270), (240, 250), (260, 230)] {
        let expected = premul(inner.color_at(mapper.map_pixel(i32::from(x), i32::from(y))));
        assert_eq!(pixmap.pixel(x, y), expected, "pixel ({x}, {y})");
    }

    // Outside of the largest ring nothing is painted.
    assert!(!pixmap.is_painted(2, 2));
    assert!(!pixmap.is_painted(509, 509));

    Ok(())
}

#[test]
fn start_and_end_of_the_turn() {
    let effects = CpuEffects::default();
    let colors = [RED, BLUE];
    let shader = effects.sweep_gradient(Point::ORIGIN, 0.0, &colors).unwrap();

    let at = |angle: f64| shader.color_at((Vec2::from_angle(angle) * 20.0).to_point());

    assert_eq!(premul(at(0.0)), premul(RED));

    let almost = at(TAU - 1e-3);
    assert!(almost.components[0] > 0.99);
    assert!(almost.components[2] > 0.0 && almost.components[2] < 0.01);

    // Two colors each get half of the turn: the second one is reached exactly at π, and
    // the blend is halfway at π/2.
    assert_eq!(premul(at(PI)), premul(BLUE));
    let quarter = at(FRAC_PI_2).components;
    assert!((quarter[0] - 0.5).abs() < 1e-5 && (quarter[2] - 0.5).abs() < 1e-5);
}

#[test]
fn rotation_of_the_ctm_rotates_the_sweep() {
    let effects = CpuEffects::default();
    let shader = effects
        .sweep_gradient(Point::new(16.5, 16.5), 0.0, &[RED, BLUE])
        .unwrap();

    let mut plain = Pixmap::new(32, 32);
    let mut rotated = Pixmap::new(32, 32);
    let rect = Rect::new(0.0, 0.0, 32.0, 32.0);
    plain.fill_rect_with_shader(rect, shader.as_ref(), Affine::IDENTITY);
    rotated.fill_rect_with_shader(
        rect,
        shader.as_ref(),
        Affine::rotate_about(PI, Point::new(16.5, 16.5)),
    );

    // Rotating by half a turn swaps the two colors.
    assert_eq!(plain.pixel(28, 16), premul(RED));
    assert_eq!(plain.pixel(4, 16), premul(BLUE));
    assert_eq!(rotated.pixel(4, 16), premul(RED));
    assert_eq!(rotated.pixel(28, 16), premul(BLUE));
}

#[test]
fn center_pixel_is_the_first_color() {
    let effects = CpuEffects::default();
    let shader = effects
        .sweep_gradient(Point::new(10.5, 10.5), 2.0, &[WHITE, BLACK])
        .unwrap();

    let mut pixmap = Pixmap::new(21, 21);
    pixmap.fill_rect_with_shader(
        Rect::new(0.0, 0.0, 21.0, 21.0),
        shader.as_ref(),
        Affine::IDENTITY,
    );
    assert_eq!(pixmap.pixel(10, 10), premul(WHITE));
}
