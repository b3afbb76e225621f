use crate::constants::{INFO_PANEL_ID, MODE_BUTTON_IDS, VEHICLE_PICKER_ID};
use builder_core::{EditorSession, GizmoMode, InfoPanel};
use web_sys as web;

#[inline]
fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        if hidden {
            _ = cl.add_1("hidden");
            // fallback for environments without CSS class
            _ = el.set_attribute("style", "display:none");
        } else {
            _ = cl.remove_1("hidden");
            _ = el.set_attribute("style", "");
        }
    }
}

#[inline]
pub fn show_vehicle_picker(document: &web::Document) {
    set_hidden(document, VEHICLE_PICKER_ID, false);
}

#[inline]
pub fn hide_vehicle_picker(document: &web::Document) {
    set_hidden(document, VEHICLE_PICKER_ID, true);
}

/// Render the dimension readout for the selection, or hide it.
///
/// Names come from saved data, so everything goes in as text nodes.
pub fn update_info_panel(document: &web::Document, panel: &InfoPanel) {
    let Some(el) = document.get_element_by_id(INFO_PANEL_ID) else {
        return;
    };
    el.set_text_content(None);
    if !panel.visible {
        set_hidden(document, INFO_PANEL_ID, true);
        return;
    }
    append_text(document, &el, "strong", &panel.title);
    for line in panel.lines() {
        append_text(document, &el, "div", &line);
    }
    set_hidden(document, INFO_PANEL_ID, false);
}

fn append_text(document: &web::Document, parent: &web::Element, tag: &str, text: &str) {
    match document.create_element(tag) {
        Ok(child) => {
            child.set_text_content(Some(text));
            _ = parent.append_child(&child);
        }
        Err(e) => log::warn!("[overlay] create <{}> failed: {:?}", tag, e),
    }
}

/// Mark the button of the active gizmo mode.
pub fn update_mode_buttons(document: &web::Document, mode: GizmoMode) {
    for (id, m) in MODE_BUTTON_IDS {
        if let Some(el) = document.get_element_by_id(id) {
            _ = el.class_list().toggle_with_force("active", m == mode);
        }
    }
}

/// Bring every overlay in line with the session after an input event.
pub fn sync(document: &web::Document, session: &EditorSession) {
    update_info_panel(document, session.selection().panel());
    update_mode_buttons(document, session.selection().gadget().mode());
}
