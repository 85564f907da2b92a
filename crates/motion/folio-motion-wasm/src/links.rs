//! Link hover styling. Pure CSS transitions; no tweens involved.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement};

use crate::dom::{query_all, set_style};
use crate::page::{listen, Listener};

fn hover_on(link: &HtmlElement) {
    set_style(link, "text-decoration", "underline");
    set_style(link, "transform", "translateY(-1px)");
    set_style(link, "text-shadow", "0 2px 4px rgba(0,0,0,0.1)");
}

fn hover_off(link: &HtmlElement) {
    set_style(link, "text-decoration", "none");
    set_style(link, "transform", "translateY(0)");
    set_style(link, "text-shadow", "none");
}

pub fn style_links(document: &Document) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    for link in query_all(document, "a") {
        set_style(&link, "text-decoration", "none");
        set_style(&link, "transition", "all 0.3s ease");
        set_style(&link, "position", "relative");

        let el = link.clone();
        listeners.push(listen(&link, "mouseenter", move |_: Event| hover_on(&el))?);
        let el = link.clone();
        listeners.push(listen(&link, "mouseleave", move |_: Event| hover_off(&el))?);
    }
    Ok(listeners)
}
