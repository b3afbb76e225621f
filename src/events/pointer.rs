use crate::input;
use crate::overlay;
use builder_core::{EditorEvent, EditorSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub session: Rc<RefCell<EditorSession>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_canvas_ndc(&ev, &w.canvas);
        w.session.borrow_mut().handle(EditorEvent::PointerDown(ndc));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_canvas_ndc(&ev, &w.canvas);
        w.session.borrow_mut().handle(EditorEvent::PointerMove(ndc));
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_canvas_ndc(&ev, &w.canvas);
        let mut session = w.session.borrow_mut();
        session.handle(EditorEvent::PointerUp(ndc));
        overlay::sync(&w.document, &session);
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let notches = input::wheel_notches(ev.delta_y(), ev.delta_mode());
        w.session.borrow_mut().handle(EditorEvent::Wheel(notches));
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
