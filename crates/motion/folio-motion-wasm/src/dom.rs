//! Inline style writes and element lookup.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use folio_motion_core::{TargetId, VisualState};

/// Attribute carrying the core target id, read back by the observer callback.
pub const TARGET_ATTR: &str = "data-motion-id";

pub fn set_style(el: &HtmlElement, name: &str, value: &str) {
    if let Err(e) = el.style().set_property(name, value) {
        warn!("style {name}={value} rejected: {e:?}");
    }
}

pub fn apply_state(el: &HtmlElement, state: &VisualState) {
    set_style(el, "opacity", &state.opacity.to_string());
    set_style(el, "transform", &state.transform_css());
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn tag_target(el: &Element, target: TargetId) {
    if let Err(e) = el.set_attribute(TARGET_ATTR, &target.0.to_string()) {
        warn!("cannot tag element with {target:?}: {e:?}");
    }
}

pub fn read_target(el: &Element) -> Option<TargetId> {
    el.get_attribute(TARGET_ATTR)?.parse().ok().map(TargetId)
}

pub fn class_names(el: &Element) -> Vec<String> {
    let list = el.class_list();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}
