//! Stage: data ownership and the per-frame update for one page.
//!
//! Methods:
//! - register_* (sections, hover cards, fades, carousel), start_tween
//! - update(now, inputs): arm sections -> host events -> carousel -> tweens -> outputs

use hashbrown::HashMap;
use log::{debug, warn};

use crate::carousel::{CarouselDriver, CarouselState};
use crate::config::MotionConfig;
use crate::easing::Easing;
use crate::engine::{Finished, TweenEngine};
use crate::error::{MotionError, Result};
use crate::ids::{IdAllocator, TargetId, TweenId};
use crate::inputs::{HostEvent, Inputs};
use crate::modal::{Modal, ModalEvent};
use crate::outputs::{Change, CoreEvent, Outputs};
use crate::role::{AnimationRole, MotionPair};
use crate::scroll::plan_scroll;
use crate::style::{Property, StyleSink, StyleTable, VisualState};
use crate::tween::{Tween, TweenSpec};
use crate::visibility::{Phase, Transition, VisibilityTrigger};

#[derive(Debug)]
struct Carousel {
    target: TargetId,
    driver: CarouselDriver,
}

#[derive(Debug)]
pub struct Stage {
    cfg: MotionConfig,
    ids: IdAllocator,
    styles: StyleTable,
    engine: TweenEngine,
    visibility: VisibilityTrigger,
    sections: HashMap<TargetId, MotionPair>,
    hover: HashMap<TargetId, MotionPair>,
    carousel: Option<Carousel>,
    modal: Modal,
    viewport: TargetId,
    chrome_count: u32,

    // Per-tick scratch and outputs
    finished: Vec<Finished>,
    outputs: Outputs,
}

impl Stage {
    pub fn new(cfg: MotionConfig) -> Result<Self> {
        cfg.validate()?;
        let mut ids = IdAllocator::new();
        let viewport = ids.alloc_target();
        Ok(Self {
            visibility: VisibilityTrigger::new(cfg.reveal_delay_ms, cfg.reveal_stagger_ms),
            cfg,
            ids,
            styles: StyleTable::new(),
            engine: TweenEngine::new(),
            sections: HashMap::new(),
            hover: HashMap::new(),
            carousel: None,
            modal: Modal::new(),
            viewport,
            chrome_count: 0,
            finished: Vec::new(),
            outputs: Outputs::default(),
        })
    }

    pub fn config(&self) -> &MotionConfig {
        &self.cfg
    }

    /// Pseudo-target standing for the window scroll position.
    pub fn viewport(&self) -> TargetId {
        self.viewport
    }

    /// Plain target with an initial state and no role.
    pub fn register_target(&mut self, initial: VisualState) -> TargetId {
        let id = self.ids.alloc_target();
        self.styles.insert(id, initial);
        id
    }

    /// Scroll-triggered section. Held hidden until its staggered arming time.
    pub fn register_section(&mut self, role: AnimationRole, now: f64) -> Result<TargetId> {
        let pair = role
            .motion_pair(&self.cfg.roles)
            .filter(|_| role.is_scroll_triggered())
            .ok_or(MotionError::UnsupportedRole(role))?;
        let index = self.sections.len() as u32;
        let id = self.register_target(VisualState::hidden());
        let armed_at = self.visibility.register(id, role, index, now);
        self.sections.insert(id, pair);
        debug!("section {id:?} ({role:?}) arms at {armed_at}");
        Ok(id)
    }

    /// Card that lifts on hover. Always visible, at rest.
    pub fn register_hover(&mut self) -> TargetId {
        let id = self.register_target(VisualState::default());
        if let Some(pair) = AnimationRole::HoverLift.motion_pair(&self.cfg.roles) {
            self.hover.insert(id, pair);
        }
        id
    }

    /// Make `target` transparent and fade it to `to_opacity` once.
    pub fn register_fade(
        &mut self,
        target: TargetId,
        delay_ms: f64,
        duration_ms: f64,
        easing: Easing,
        to_opacity: f32,
    ) -> Result<TweenId> {
        if !self.styles.contains(target) {
            return Err(MotionError::UnknownTarget(target));
        }
        let spec = TweenSpec::new(duration_ms, easing)
            .channel(Property::Opacity, 0.0, to_opacity)
            .delayed(delay_ms);
        spec.validate()?;
        self.styles.write(target, Property::Opacity, 0.0);
        self.start_tween(target, spec)
    }

    /// Page body fade-in.
    pub fn register_page_fade(&mut self) -> Result<TargetId> {
        let id = self.register_target(VisualState::hidden());
        self.register_fade(
            id,
            self.cfg.page_fade_delay_ms,
            self.cfg.page_fade_duration_ms,
            Easing::InOut,
            1.0,
        )?;
        Ok(id)
    }

    /// Header/footer fade-in, staggered in registration order.
    pub fn register_chrome(&mut self) -> Result<TargetId> {
        let delay =
            self.cfg.chrome_fade_delay_ms + f64::from(self.chrome_count) * self.cfg.chrome_stagger_ms;
        let id = self.register_target(VisualState::hidden());
        self.register_fade(id, delay, self.cfg.chrome_fade_duration_ms, Easing::CubicOut, 1.0)?;
        self.chrome_count += 1;
        Ok(id)
    }

    /// Attach and start the carousel. A second call replaces the first.
    pub fn attach_carousel(&mut self, track_width: f64) -> TargetId {
        let target = self.register_target(VisualState::default());
        let mut driver = CarouselDriver::new(track_width, self.cfg.carousel_speed_px);
        driver.start();
        self.carousel = Some(Carousel { target, driver });
        target
    }

    pub fn carousel(&self) -> Option<&CarouselState> {
        self.carousel.as_ref().map(|c| c.driver.state())
    }

    pub fn carousel_target(&self) -> Option<TargetId> {
        self.carousel.as_ref().map(|c| c.target)
    }

    /// Stop or restart the carousel task.
    pub fn set_carousel_running(&mut self, running: bool) {
        if let Some(c) = self.carousel.as_mut() {
            if running {
                c.driver.start();
            } else {
                c.driver.stop();
            }
        }
    }

    pub fn start_tween(&mut self, target: TargetId, spec: TweenSpec) -> Result<TweenId> {
        if target != self.viewport && !self.styles.contains(target) {
            return Err(MotionError::UnknownTarget(target));
        }
        let tween = Tween::new(target, spec)?;
        Ok(self.engine.start(tween))
    }

    pub fn visual(&self, target: TargetId) -> Option<&VisualState> {
        self.styles.get(target)
    }

    pub fn phase(&self, target: TargetId) -> Option<Phase> {
        self.visibility.phase(target)
    }

    pub fn modal_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn running_tweens(&self) -> usize {
        self.engine.len()
    }

    /// Nothing left to animate until the next host event.
    pub fn is_idle(&self) -> bool {
        let carousel_moving = self
            .carousel
            .as_ref()
            .is_some_and(|c| c.driver.is_running() && !c.driver.state().paused);
        self.engine.is_idle() && !self.visibility.has_unarmed() && !carousel_moving
    }

    /// Step one frame at `now` (ms, host clock).
    pub fn update(&mut self, now: f64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();

        for (target, pending) in self.visibility.arm_due(now) {
            self.outputs.push_event(CoreEvent::SectionArmed { target });
            if let Some(intersecting) = pending {
                self.apply_report(target, intersecting);
            }
        }

        for event in inputs.events {
            self.handle_event(event);
        }

        if let Some(c) = self.carousel.as_mut() {
            if c.driver.advance() {
                self.styles
                    .write(c.target, Property::TranslateX, c.driver.translation() as f32);
            }
        }

        let mut finished = std::mem::take(&mut self.finished);
        self.engine.tick(now, &mut self.styles, &mut finished);
        for f in finished.drain(..) {
            self.visibility.tween_finished(f.target, f.tween);
            self.outputs.push_event(CoreEvent::TweenFinished {
                tween: f.tween,
                target: f.target,
            });
        }
        self.finished = finished;

        for (target, state) in self.styles.drain_dirty() {
            self.outputs.push_change(Change { target, state });
        }
        &self.outputs
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Intersection {
                target,
                intersecting,
            } => self.apply_report(target, intersecting),
            HostEvent::PointerEnter { target } => self.pointer(target, true),
            HostEvent::PointerLeave { target } => self.pointer(target, false),
            HostEvent::ScrollRequest {
                current_y,
                target_top,
            } => {
                let spec = plan_scroll(current_y, target_top, &self.cfg);
                let target_y = spec.end_value(Property::ScrollY).unwrap_or(current_y);
                let viewport = self.viewport;
                if self.start_logged(viewport, spec).is_some() {
                    self.outputs.push_event(CoreEvent::ScrollTo {
                        from_y: current_y,
                        target_y,
                    });
                }
            }
            HostEvent::Modal(event) => self.modal_event(&event),
            HostEvent::CarouselResized { track_width } => {
                if let Some(c) = self.carousel.as_mut() {
                    c.driver.set_track_width(track_width);
                }
            }
        }
    }

    fn apply_report(&mut self, target: TargetId, intersecting: bool) {
        let Some(transition) = self.visibility.report(target, intersecting) else {
            return;
        };
        let Some(pair) = self.sections.get(&target) else {
            return;
        };
        let current = self.styles.current(target);
        let spec = match transition {
            Transition::Enter => pair.enter.resolve(&current),
            Transition::Exit => pair.leave.resolve(&current),
        };
        if let Some(id) = self.start_logged(target, spec) {
            self.visibility.bind_tween(target, id);
        }
    }

    fn pointer(&mut self, target: TargetId, entered: bool) {
        if let Some(c) = self.carousel.as_mut().filter(|c| c.target == target) {
            if entered {
                c.driver.pause();
            } else {
                c.driver.resume();
            }
            return;
        }
        let Some(pair) = self.hover.get(&target) else {
            debug!("pointer event on {target:?} without hover motion");
            return;
        };
        let motion = if entered { &pair.enter } else { &pair.leave };
        let spec = motion.resolve(&self.styles.current(target));
        self.start_logged(target, spec);
    }

    fn modal_event(&mut self, event: &ModalEvent) {
        if let Some(effect) = self.modal.handle(event) {
            self.outputs.push_event(effect.into());
        }
    }

    /// Start `spec` as the only tween writing `target`.
    fn start_logged(&mut self, target: TargetId, spec: TweenSpec) -> Option<TweenId> {
        match self.start_tween(target, spec) {
            Ok(id) => {
                self.engine.supersede(target, id);
                Some(id)
            }
            Err(e) => {
                warn!("tween on {target:?} rejected: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_roles_cannot_be_sections() {
        let mut stage = Stage::new(MotionConfig::default()).unwrap();
        assert_eq!(
            stage.register_section(AnimationRole::HoverLift, 0.0),
            Err(MotionError::UnsupportedRole(AnimationRole::HoverLift))
        );
        assert_eq!(
            stage.register_section(AnimationRole::None, 0.0),
            Err(MotionError::UnsupportedRole(AnimationRole::None))
        );
    }

    #[test]
    fn unknown_target_rejected() {
        let mut stage = Stage::new(MotionConfig::default()).unwrap();
        let spec = TweenSpec::new(10.0, Easing::Linear).channel(Property::Opacity, 0.0, 1.0);
        assert_eq!(
            stage.start_tween(TargetId(99), spec.clone()),
            Err(MotionError::UnknownTarget(TargetId(99)))
        );
        let vp = stage.viewport();
        assert!(stage.start_tween(vp, spec).is_ok());
    }

    #[test]
    fn fade_needs_a_registered_target() {
        let mut stage = Stage::new(MotionConfig::default()).unwrap();
        assert_eq!(
            stage.register_fade(TargetId(42), 0.0, 100.0, Easing::Linear, 1.0),
            Err(MotionError::UnknownTarget(TargetId(42)))
        );
        let id = stage.register_target(VisualState::default());
        assert!(matches!(
            stage.register_fade(id, 0.0, 0.0, Easing::Linear, 1.0),
            Err(MotionError::InvalidDuration(_))
        ));
        assert!(stage.is_idle());

        stage.register_fade(id, 0.0, 100.0, Easing::Linear, 0.6).unwrap();
        assert_eq!(stage.visual(id).unwrap().opacity, 0.0);
        stage.update(0.0, Inputs::new());
        stage.update(50.0, Inputs::new());
        assert!((stage.visual(id).unwrap().opacity - 0.3).abs() < 1e-6);
        stage.update(100.0, Inputs::new());
        assert_eq!(stage.visual(id).unwrap().opacity, 0.6);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = MotionConfig {
            observer_threshold: -0.1,
            ..MotionConfig::default()
        };
        assert!(matches!(Stage::new(cfg), Err(MotionError::InvalidConfig(_))));
    }
}
