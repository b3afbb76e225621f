#![cfg(target_arch = "wasm32")]
use builder_core::{persistence, CatalogLoader, EditorSession, ProceduralCatalog};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod export;
mod frame;
mod input;
mod overlay;
mod render;
mod storage;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("builder-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx2d: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let store = storage::LocalStore::open().ok_or_else(|| anyhow::anyhow!("no localStorage"))?;
    let loader = Rc::new(ProceduralCatalog);
    let session = Rc::new(RefCell::new(EditorSession::new()));

    // The backdrop goes in before the snapshot so restored instances keep
    // their order behind it.
    match persistence::read_vehicle(&store) {
        Some(vehicle) => {
            let backdrop = loader.load(&vehicle.asset_id()).await?;
            session
                .borrow_mut()
                .bootstrap_vehicle(vehicle, &backdrop)?;
            session.borrow_mut().load(&store);
            overlay::hide_vehicle_picker(&document);
        }
        None => {
            log::info!("[vehicle] no vehicle chosen yet");
            overlay::show_vehicle_picker(&document);
        }
    }
    overlay::sync(&document, &session.borrow());

    let store = Rc::new(RefCell::new(store));
    events::wire_vehicle_picker(&document, store.clone());
    events::wire_toolbar(&events::ToolbarWiring {
        document: document.clone(),
        canvas: canvas.clone(),
        session: session.clone(),
        store: store.clone(),
        loader,
    });
    events::wire_global_keydown(session.clone(), document.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        document: document.clone(),
        session: session.clone(),
    });

    // Camera damping and redraw driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas: canvas.clone(),
        preview: render::Preview::new(ctx2d),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
