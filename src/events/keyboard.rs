use crate::overlay;
use builder_core::{EditorEvent, EditorSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys the editor consumes: gizmo modes and delete.
#[inline]
pub fn is_editor_key(key: &str) -> bool {
    builder_core::GizmoMode::from_key(key).is_some() || matches!(key, "Delete" | "Backspace")
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    session: &Rc<RefCell<EditorSession>>,
    document: &web::Document,
) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    if !is_editor_key(&key) {
        return;
    }
    let mut session = session.borrow_mut();
    session.handle(EditorEvent::Key(key));
    overlay::sync(document, &session);
    ev.prevent_default();
}

pub fn wire_global_keydown(session: Rc<RefCell<EditorSession>>, document: web::Document) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &session, &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
