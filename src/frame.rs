use crate::input;
use crate::render::Preview;
use builder_core::{EditorEvent, EditorSession};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<EditorSession>>,
    pub canvas: web::HtmlCanvasElement,
    pub preview: Preview,
    pub last_instant: Instant,
}

impl FrameContext {
    /// One animation tick: camera damping, then redraw. Runs every frame.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let mut session = self.session.borrow_mut();
        session.set_aspect(input::canvas_aspect(&self.canvas));
        session.handle(EditorEvent::FrameTick(dt));
        self.preview.draw(&self.canvas, &session);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
