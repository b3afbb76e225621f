use crate::constants::{EXPORT_FILE_NAME, EXPORT_MIME};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Download the current frame as a PNG. A tainted canvas or any DOM failure
/// aborts quietly; nothing is downloaded in that case.
pub fn export_png(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    match try_export(document, canvas) {
        Ok(()) => log::info!("[export] {}", EXPORT_FILE_NAME),
        Err(e) => log::warn!("[export] aborted: {:?}", e),
    }
}

fn try_export(document: &web::Document, canvas: &web::HtmlCanvasElement) -> Result<(), JsValue> {
    let url = canvas.to_data_url_with_type(EXPORT_MIME)?;
    let anchor: web::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();
    Ok(())
}
