use crate::constants::{
    CATALOG_ATTR, DELETE_BUTTON_ID, EXPORT_BUTTON_ID, MODE_BUTTON_IDS, RESET_BUTTON_ID,
    SAVE_BUTTON_ID, VEHICLE_ATTR,
};
use crate::dom;
use crate::export;
use crate::overlay;
use crate::storage::LocalStore;
use builder_core::{
    CatalogLoader, EditorEvent, EditorSession, KeyValueStore, ProceduralCatalog, VehicleType,
    KEY_CAR_TYPE,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone)]
pub struct ToolbarWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<EditorSession>>,
    pub store: Rc<RefCell<LocalStore>>,
    pub loader: Rc<ProceduralCatalog>,
}

pub fn wire_toolbar(w: &ToolbarWiring) {
    wire_catalog_buttons(w);
    wire_mode_buttons(w);

    let del = w.clone();
    dom::add_click_listener(&w.document, DELETE_BUTTON_ID, move || {
        let mut session = del.session.borrow_mut();
        session.handle(EditorEvent::Delete);
        overlay::sync(&del.document, &session);
    });

    let save = w.clone();
    dom::add_click_listener(&w.document, SAVE_BUTTON_ID, move || {
        let session = save.session.borrow();
        if let Err(e) = session.save(&mut *save.store.borrow_mut()) {
            log::error!("[save] {}", e);
        }
    });

    let reset = w.clone();
    dom::add_click_listener(&w.document, RESET_BUTTON_ID, move || {
        reset
            .session
            .borrow_mut()
            .reset(&mut *reset.store.borrow_mut());
        dom::reload_page();
    });

    let exp = w.clone();
    dom::add_click_listener(&w.document, EXPORT_BUTTON_ID, move || {
        export::export_png(&exp.document, &exp.canvas);
    });
}

fn wire_catalog_buttons(w: &ToolbarWiring) {
    for (el, item_id) in dom::elements_with_attribute(&w.document, CATALOG_ATTR) {
        let w = w.clone();
        dom::add_element_click_listener(&el, move || spawn_item(&w, item_id.clone()));
    }
}

/// Load the asset and insert it once it resolves. Failed loads never touch
/// the registry.
fn spawn_item(w: &ToolbarWiring, item_id: String) {
    let load = w.loader.load(&item_id);
    let session = w.session.clone();
    let document = w.document.clone();
    spawn_local(async move {
        match load.await {
            Ok(record) => {
                let mut session = session.borrow_mut();
                session.spawn(&item_id, &record);
                overlay::sync(&document, &session);
            }
            Err(e) => log::error!("[spawn] {}", e),
        }
    });
}

fn wire_mode_buttons(w: &ToolbarWiring) {
    for (id, mode) in MODE_BUTTON_IDS {
        let w = w.clone();
        dom::add_click_listener(&w.document.clone(), id, move || {
            let mut session = w.session.borrow_mut();
            session.handle(EditorEvent::SetMode(mode));
            overlay::sync(&w.document, &session);
        });
    }
}

/// First-run chooser: persist the vehicle and restart so the bootstrap picks it up.
pub fn wire_vehicle_picker(document: &web::Document, store: Rc<RefCell<LocalStore>>) {
    for (el, name) in dom::elements_with_attribute(document, VEHICLE_ATTR) {
        let store = store.clone();
        dom::add_element_click_listener(&el, move || match name.parse::<VehicleType>() {
            Ok(vehicle) => {
                store.borrow_mut().set(KEY_CAR_TYPE, &vehicle.to_json());
                dom::reload_page();
            }
            Err(e) => log::error!("[vehicle] {}", e),
        });
    }
}
