use glam::Vec2;
use web_sys as web;

/// Map a CSS-pixel position inside a `width`×`height` box to normalized
/// device coordinates: x right, y up, both in [-1, 1].
#[inline]
pub fn ndc_from_css(x_css: f32, y_css: f32, width: f32, height: f32) -> Vec2 {
    if width > 0.0 && height > 0.0 {
        let x = (x_css / width) * 2.0 - 1.0;
        let y = 1.0 - (y_css / height) * 2.0;
        Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
    } else {
        Vec2::ZERO
    }
}

#[inline]
pub fn pointer_canvas_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    ndc_from_css(x_css, y_css, rect.width() as f32, rect.height() as f32)
}

/// Wheel delta in notches; `delta_mode` follows `WheelEvent.deltaMode`
/// (0 pixels, 1 lines, 2 pages).
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    let notches = match delta_mode {
        0 => delta_y / crate::constants::WHEEL_PIXELS_PER_NOTCH,
        1 => delta_y / crate::constants::WHEEL_LINES_PER_NOTCH,
        _ => delta_y,
    };
    notches as f32
}

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

/// NDC to canvas backing-store pixels.
#[inline]
pub fn ndc_to_px(ndc: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
}
