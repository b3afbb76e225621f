use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => add_element_click_listener(&el, handler),
        None => log::warn!("[dom] missing #{}", element_id),
    }
}

pub fn add_element_click_listener(el: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Elements carrying `attr`, paired with the attribute's value.
pub fn elements_with_attribute(document: &web::Document, attr: &str) -> Vec<(web::Element, String)> {
    let Ok(list) = document.query_selector_all(&format!("[{attr}]")) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .filter_map(|el| {
            let value = el.get_attribute(attr)?;
            Some((el, value))
        })
        .collect()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn reload_page() {
    if let Some(w) = web::window() {
        if let Err(e) = w.location().reload() {
            log::error!("[dom] reload failed: {:?}", e);
        }
    }
}
