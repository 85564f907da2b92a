//! Wires a live document to the stage.
//!
//! Every optional element is looked up once. A missing element disables only
//! the behavior that needs it.

use std::rc::Rc;

use js_sys::Array;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use folio_motion_core::{anchor_fragment, AnimationRole, HostEvent, ModalEvent, TargetId};

use crate::dom::{apply_state, class_names, query, query_all, read_target, set_style, tag_target};
use crate::frame_loop::FrameLoop;
use crate::links::style_links;
use crate::runtime::Shared;

pub type Listener = Closure<dyn FnMut(Event)>;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

const SECTION_SELECTORS: [&str; 3] = [".tomGriffin", "#webDevelopment", "#cyberSecurity"];
const CAROUSEL_CONTAINER: &str = ".hero-carousel-columns";
const CAROUSEL_TRACK: &str = ".hero-carousel-columns .carousel-track";

/// Keeps listeners, the observer and the frame loop alive for the page lifetime.
pub struct Page {
    frames: Rc<FrameLoop>,
    _listeners: Vec<Listener>,
    _observer: Option<(IntersectionObserver, ObserverCallback)>,
}

impl Page {
    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }
}

pub fn listen<F>(target: &EventTarget, kind: &str, f: F) -> Result<Listener, JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// Queue a host event and make sure a frame will pick it up.
fn enqueue(rt: &Shared, frames: &FrameLoop, event: HostEvent) {
    rt.borrow_mut().push(event);
    if let Err(e) = frames.ensure_running() {
        warn!("cannot schedule frame: {e:?}");
    }
}

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn attach(rt: Shared) -> Result<Page, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let started = now(&window);

    let frames = {
        let rt = rt.clone();
        Rc::new(FrameLoop::new(move |now| {
            let mut rt = rt.borrow_mut();
            rt.frame(now);
            !rt.is_idle()
        }))
    };

    let mut listeners = Vec::new();
    register_fades(&rt, &document)?;
    let observer = register_sections(&rt, &frames, &document, started)?;
    listeners.extend(register_hover_cards(&rt, &frames, &document)?);
    listeners.extend(style_links(&document)?);
    listeners.extend(register_anchors(&rt, &frames, &window, &document)?);
    listeners.extend(register_modal(&rt, &frames, &window, &document)?);
    listeners.extend(register_carousel(&rt, &frames, &window, &document)?);

    frames.ensure_running()?;
    info!("motion attached ({} listeners)", listeners.len());
    Ok(Page {
        frames,
        _listeners: listeners,
        _observer: observer,
    })
}

fn register_fades(rt: &Shared, document: &Document) -> Result<(), JsValue> {
    let mut rt = rt.borrow_mut();
    if let Some(body) = document.body() {
        let id = rt.stage.register_page_fade().map_err(to_js)?;
        set_style(&body, "opacity", "0");
        rt.body = Some(body.clone());
        rt.bind(id, body);
    }
    for selector in ["header", "footer"] {
        if let Some(el) = query(document, selector) {
            let id = rt.stage.register_chrome().map_err(to_js)?;
            set_style(&el, "opacity", "0");
            rt.bind(id, el);
        }
    }
    Ok(())
}

fn register_sections(
    rt: &Shared,
    frames: &Rc<FrameLoop>,
    document: &Document,
    started: f64,
) -> Result<Option<(IntersectionObserver, ObserverCallback)>, JsValue> {
    let sections: Vec<HtmlElement> = SECTION_SELECTORS
        .iter()
        .filter_map(|s| query(document, s))
        .collect();
    if sections.is_empty() {
        return Ok(None);
    }

    let callback: ObserverCallback = {
        let rt = rt.clone();
        let frames = frames.clone();
        Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if let Some(target) = read_target(&entry.target()) {
                    enqueue(
                        &rt,
                        &frames,
                        HostEvent::Intersection {
                            target,
                            intersecting: entry.is_intersecting(),
                        },
                    );
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    {
        let rt = rt.borrow();
        let cfg = rt.stage.config();
        init.set_threshold(&JsValue::from_f64(f64::from(cfg.observer_threshold)));
        init.set_root_margin(&cfg.root_margin());
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    let mut rt = rt.borrow_mut();
    for el in sections {
        let classes = class_names(&el);
        let id = el.id();
        let role = AnimationRole::from_markers(
            (!id.is_empty()).then_some(id.as_str()),
            classes.iter().map(String::as_str),
        );
        let target = match rt.stage.register_section(role, started) {
            Ok(t) => t,
            Err(e) => {
                warn!("section #{id} skipped: {e}");
                continue;
            }
        };
        tag_target(&el, target);
        set_style(&el, "opacity", "0");
        set_style(&el, "visibility", "hidden");
        set_style(&el, "transform-origin", "center center");
        // Reports before arming are held by the stage.
        observer.observe(&el);
        rt.bind(target, el);
    }
    Ok(Some((observer, callback)))
}

fn register_hover_cards(
    rt: &Shared,
    frames: &Rc<FrameLoop>,
    document: &Document,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    for card in query_all(document, ".listBox") {
        let target = {
            let mut rt = rt.borrow_mut();
            let target = rt.stage.register_hover();
            if let Some(state) = rt.stage.visual(target).copied() {
                apply_state(&card, &state);
            }
            set_style(&card, "visibility", "visible");
            rt.bind(target, card.clone());
            target
        };
        listeners.push(pointer_listener(rt, frames, &card, "mouseenter", target, true)?);
        listeners.push(pointer_listener(rt, frames, &card, "mouseleave", target, false)?);
    }
    debug!("{} hover cards", listeners.len() / 2);
    Ok(listeners)
}

fn pointer_listener(
    rt: &Shared,
    frames: &Rc<FrameLoop>,
    el: &HtmlElement,
    kind: &str,
    target: TargetId,
    entered: bool,
) -> Result<Listener, JsValue> {
    let rt = rt.clone();
    let frames = frames.clone();
    listen(el, kind, move |_| {
        let event = if entered {
            HostEvent::PointerEnter { target }
        } else {
            HostEvent::PointerLeave { target }
        };
        enqueue(&rt, &frames, event);
    })
}

fn register_anchors(
    rt: &Shared,
    frames: &Rc<FrameLoop>,
    window: &Window,
    document: &Document,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    for anchor in query_all(document, "a[href^=\"#\"]") {
        let rt = rt.clone();
        let frames = frames.clone();
        let window = window.clone();
        let document = document.clone();
        let href_el = anchor.clone();
        listeners.push(listen(&anchor, "click", move |event: Event| {
            let Some(href) = href_el.get_attribute("href") else {
                return;
            };
            let Some(target) = anchor_fragment(&href)
                .and_then(|id| document.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            event.prevent_default();
            let current_y = window.page_y_offset().unwrap_or(0.0);
            enqueue(
                &rt,
                &frames,
                HostEvent::ScrollRequest {
                    current_y: current_y as f32,
                    target_top: target.offset_top() as f32,
                },
            );
        })?);
    }
    Ok(listeners)
}

fn register_modal(
    rt: &Shared,
    frames: &Rc<FrameLoop>,
    window: &Window,
    document: &Document,
) -> Result<Vec<Listener>, JsValue> {
    let Some(modal) = document
        .get_element_by_id("contactModal")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("no contact modal on page");
        return Ok(Vec::new());
    };
    rt.borrow_mut().modal = Some(modal.clone());

    let modal_listener = |target: &EventTarget, kind: &str, event: ModalEvent| {
        let rt = rt.clone();
        let frames = frames.clone();
        listen(target, kind, move |_| {
            enqueue(&rt, &frames, HostEvent::Modal(event.clone()))
        })
    };

    let mut listeners = Vec::new();
    if let Some(button) = document.get_element_by_id("hireMeBtn") {
        let button: &EventTarget = &button;
        listeners.push(modal_listener(button, "click", ModalEvent::TriggerClicked)?);
    }
    if let Some(close) = query(document, ".close-modal") {
        let close: &EventTarget = &close;
        listeners.push(modal_listener(close, "click", ModalEvent::CloseClicked)?);
    }

    {
        let rt = rt.clone();
        let frames = frames.clone();
        let backdrop: JsValue = modal.into();
        listeners.push(listen(window, "click", move |event: Event| {
            let on_backdrop = event
                .target()
                .is_some_and(|t| JsValue::from(t) == backdrop);
            if on_backdrop {
                enqueue(&rt, &frames, HostEvent::Modal(ModalEvent::BackdropClicked));
            }
        })?);
    }
    {
        let rt = rt.clone();
        let frames = frames.clone();
        listeners.push(listen(document, "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if key == "Escape" {
                enqueue(&rt, &frames, HostEvent::Modal(ModalEvent::KeyPressed(key)));
            }
        })?);
    }
    Ok(listeners)
}

fn register_carousel(
    rt: &Shared,
    frames: &Rc<FrameLoop>,
    window: &Window,
    document: &Document,
) -> Result<Vec<Listener>, JsValue> {
    let (Some(track), Some(container)) = (
        query(document, CAROUSEL_TRACK),
        query(document, CAROUSEL_CONTAINER),
    ) else {
        return Ok(Vec::new());
    };

    // Content twice, end to end, for a seamless wrap at the halfway point.
    let content = track.inner_html();
    track.set_inner_html(&format!("{content}{content}"));

    let target = {
        let mut rt = rt.borrow_mut();
        let target = rt.stage.attach_carousel(f64::from(track.scroll_width()));
        rt.bind(target, track.clone());
        target
    };

    let mut listeners = vec![
        pointer_listener(rt, frames, &container, "mouseenter", target, true)?,
        pointer_listener(rt, frames, &container, "mouseleave", target, false)?,
    ];
    {
        let rt = rt.clone();
        let frames = frames.clone();
        listeners.push(listen(window, "resize", move |_| {
            enqueue(
                &rt,
                &frames,
                HostEvent::CarouselResized {
                    track_width: f64::from(track.scroll_width()),
                },
            );
        })?);
    }
    Ok(listeners)
}

fn to_js(e: folio_motion_core::MotionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
