//! wasm-bindgen adapter for folio motion.
//!
//! `FolioMotion::attach()` wires the current document (sections, hover cards,
//! anchors, modal, carousel) and runs a requestAnimationFrame loop. Hosts that
//! drive their own clock can instead call `update(now, inputs)` each frame.

mod dom;
mod frame_loop;
mod links;
mod logger;
mod page;
mod runtime;

use log::LevelFilter;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use folio_motion_core::{Inputs, MotionConfig, Stage};

use crate::page::Page;
use crate::runtime::Shared;

#[wasm_bindgen]
pub struct FolioMotion {
    runtime: Shared,
    page: Option<Page>,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

#[wasm_bindgen]
impl FolioMotion {
    /// Create a new instance. Pass a config object or undefined/null for defaults.
    /// Example:
    ///   new FolioMotion({ carousel_speed_px: 0.5, header_offset_px: 96 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FolioMotion, JsError> {
        console_error_panic_hook::set_once();
        logger::init(LevelFilter::Info);

        let cfg: MotionConfig = if jsvalue_is_undefined_or_null(&config) {
            MotionConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let stage = Stage::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(FolioMotion {
            runtime: runtime::shared(stage),
            page: None,
        })
    }

    /// Attach to the current document and start the frame loop. Idempotent.
    pub fn attach(&mut self) -> Result<(), JsError> {
        if self.page.is_some() {
            return Ok(());
        }
        let page = page::attach(self.runtime.clone())
            .map_err(|e| JsError::new(&format!("attach error: {e:?}")))?;
        self.page = Some(page);
        Ok(())
    }

    /// Stop the frame loop and the carousel task.
    pub fn stop(&mut self) {
        self.runtime.borrow_mut().stage.set_carousel_running(false);
        if let Some(page) = &self.page {
            page.frames().stop();
        }
    }

    /// Restart the carousel task and the frame loop after `stop()`.
    pub fn resume(&mut self) -> Result<(), JsError> {
        self.runtime.borrow_mut().stage.set_carousel_running(true);
        if let Some(page) = &self.page {
            page.frames()
                .start()
                .map_err(|e| JsError::new(&format!("frame error: {e:?}")))?;
        }
        Ok(())
    }

    /// Step one frame at `now` (ms) with optional Inputs JSON, together with any
    /// queued page events. Returns the Outputs JSON.
    pub fn update(&mut self, now: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let mut rt = self.runtime.borrow_mut();
        rt.extend(inputs);
        let out = rt.frame(now);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Current configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.runtime.borrow().stage.config())
            .map_err(|e| JsError::new(&format!("config error: {e}")))
    }

    #[wasm_bindgen(js_name = is_idle)]
    pub fn is_idle(&self) -> bool {
        self.runtime.borrow().is_idle()
    }

    /// Whether a frame is scheduled on the page.
    #[wasm_bindgen(js_name = is_running)]
    pub fn is_running(&self) -> bool {
        self.page.as_ref().is_some_and(|p| p.frames().is_scheduled())
    }

    #[wasm_bindgen(js_name = is_attached)]
    pub fn is_attached(&self) -> bool {
        self.page.is_some()
    }
}

/// Set the console log level ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level: {level}")))?;
    logger::init(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
