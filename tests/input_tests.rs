// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn css_corners_map_to_ndc_corners() {
    assert_eq!(ndc_from_css(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(ndc_from_css(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(ndc_from_css(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn ndc_is_clamped_outside_the_canvas() {
    let p = ndc_from_css(-50.0, 900.0, 800.0, 600.0);
    assert_eq!(p, Vec2::new(-1.0, -1.0));
}

#[test]
fn degenerate_canvas_maps_to_center() {
    assert_eq!(ndc_from_css(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    assert_eq!(ndc_from_css(10.0, 10.0, 800.0, 0.0), Vec2::ZERO);
}

#[test]
fn same_pixel_gives_identical_ndc() {
    // Click detection compares NDC for exact equality.
    let a = ndc_from_css(123.0, 456.0, 1024.0, 768.0);
    let b = ndc_from_css(123.0, 456.0, 1024.0, 768.0);
    assert_eq!(a, b);
    assert_ne!(a, ndc_from_css(124.0, 456.0, 1024.0, 768.0));
}

#[test]
fn ndc_to_px_inverts_ndc_from_css() {
    let (w, h) = (640.0, 480.0);
    for (x, y) in [(0.0, 0.0), (320.0, 240.0), (100.0, 400.0), (640.0, 480.0)] {
        let px = ndc_to_px(ndc_from_css(x, y, w, h), w, h);
        assert!((px.x - x).abs() < 1e-3 && (px.y - y).abs() < 1e-3, "{px:?}");
    }
}

#[test]
fn wheel_notches_by_delta_mode() {
    assert_eq!(wheel_notches(100.0, 0), 1.0);
    assert_eq!(wheel_notches(-250.0, 0), -2.5);
    assert_eq!(wheel_notches(3.0, 1), 1.0);
    assert_eq!(wheel_notches(-1.0, 2), -1.0);
}
