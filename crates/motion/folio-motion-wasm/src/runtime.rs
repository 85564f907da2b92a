//! Shared page state: the stage, the elements it drives, and queued host events.

use std::cell::RefCell;
use std::rc::Rc;

use folio_motion_core::{CoreEvent, HostEvent, Inputs, Outputs, Stage, TargetId};
use hashbrown::HashMap;
use log::debug;
use web_sys::HtmlElement;

use crate::dom::{apply_state, set_style};

pub type Shared = Rc<RefCell<Runtime>>;

pub struct Runtime {
    pub stage: Stage,
    pub elements: HashMap<TargetId, HtmlElement>,
    pub modal: Option<HtmlElement>,
    pub body: Option<HtmlElement>,
    pending: Inputs,
}

impl Runtime {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            elements: HashMap::new(),
            modal: None,
            body: None,
            pending: Inputs::default(),
        }
    }

    pub fn push(&mut self, event: HostEvent) {
        self.pending.push(event);
    }

    pub fn extend(&mut self, inputs: Inputs) {
        self.pending.events.extend(inputs.events);
    }

    pub fn bind(&mut self, target: TargetId, el: HtmlElement) {
        self.elements.insert(target, el);
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.stage.is_idle()
    }

    /// Step the stage with everything queued and write the results to the page.
    pub fn frame(&mut self, now: f64) -> &Outputs {
        let viewport = self.stage.viewport();
        let inputs = std::mem::take(&mut self.pending);
        let out = self.stage.update(now, inputs);

        for change in &out.changes {
            if change.target == viewport {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, f64::from(change.state.scroll_y));
                }
            } else if let Some(el) = self.elements.get(&change.target) {
                apply_state(el, &change.state);
            }
        }

        for event in &out.events {
            match event {
                CoreEvent::SectionArmed { target } => {
                    if let Some(el) = self.elements.get(target) {
                        set_style(el, "visibility", "visible");
                    }
                }
                CoreEvent::ModalOpened | CoreEvent::ModalClosed => {
                    let Some(effect) = event.modal_effect() else {
                        continue;
                    };
                    if let Some(modal) = &self.modal {
                        set_style(modal, "display", effect.display());
                    }
                    if let Some(body) = &self.body {
                        set_style(body, "overflow", effect.body_overflow());
                    }
                }
                CoreEvent::ScrollTo { target_y, .. } => {
                    debug!("scrolling viewport toward {target_y}px");
                }
                _ => {}
            }
        }
        out
    }
}

pub fn shared(stage: Stage) -> Shared {
    Rc::new(RefCell::new(Runtime::new(stage)))
}
