//! Carousel driver: a repeating per-frame task scrolling a duplicated track.
//!
//! The track holds its content twice, end to end, so wrapping the offset at
//! half the track width is visually seamless.

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    /// Current scroll distance in px, always within [0, track_width / 2).
    pub offset: f64,
    /// Full width of the duplicated track in px.
    pub track_width: f64,
    pub paused: bool,
}

#[derive(Debug)]
pub struct CarouselDriver {
    state: CarouselState,
    speed: f64,
    running: bool,
}

impl CarouselDriver {
    pub fn new(track_width: f64, speed: f64) -> Self {
        Self {
            state: CarouselState {
                offset: 0.0,
                track_width,
                paused: false,
            },
            speed,
            running: false,
        }
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Width at which the offset wraps.
    #[inline]
    pub fn wrap_width(&self) -> f64 {
        self.state.track_width / 2.0
    }

    /// Translation to apply to the track, in px.
    #[inline]
    pub fn translation(&self) -> f64 {
        -self.state.offset
    }

    pub fn start(&mut self) {
        if !self.running {
            debug!("carousel started (track {}px)", self.state.track_width);
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    /// Track width changed (e.g. a resize); keeps the offset in range.
    pub fn set_track_width(&mut self, track_width: f64) {
        self.state.track_width = track_width;
        self.state.offset = self.wrapped(self.state.offset);
    }

    fn wrapped(&self, offset: f64) -> f64 {
        let wrap = self.wrap_width();
        if wrap <= 0.0 {
            0.0
        } else {
            offset.rem_euclid(wrap)
        }
    }

    /// Run one frame. Returns whether the offset moved.
    pub fn advance(&mut self) -> bool {
        if !self.running || self.state.paused || self.wrap_width() <= 0.0 || self.speed == 0.0 {
            return false;
        }
        self.state.offset = self.wrapped(self.state.offset + self.speed);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_frames_times_speed_mod_half_width() {
        let mut c = CarouselDriver::new(200.0, 1.0);
        c.start();
        for n in 1..=350u32 {
            assert!(c.advance());
            let expected = (f64::from(n) * 1.0) % 100.0;
            assert_eq!(c.state().offset, expected, "frame {n}");
            assert!(c.state().offset < c.wrap_width());
        }
    }

    #[test]
    fn wraps_to_zero_at_half_track() {
        let mut c = CarouselDriver::new(10.0, 2.5);
        c.start();
        c.advance();
        assert_eq!(c.state().offset, 2.5);
        c.advance();
        assert_eq!(c.state().offset, 0.0);
        assert_eq!(c.translation(), 0.0);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let mut c = CarouselDriver::new(1000.0, 0.5);
        c.start();
        for _ in 0..10 {
            c.advance();
        }
        c.pause();
        for _ in 0..10 {
            assert!(!c.advance());
        }
        assert_eq!(c.state().offset, 5.0);
        c.resume();
        c.advance();
        assert_eq!(c.state().offset, 5.5);
        assert_eq!(c.translation(), -5.5);
    }

    #[test]
    fn stopped_or_empty_track_does_not_move() {
        let mut c = CarouselDriver::new(100.0, 1.0);
        assert!(!c.advance());
        c.start();
        c.stop();
        assert!(!c.advance());

        let mut empty = CarouselDriver::new(0.0, 1.0);
        empty.start();
        assert!(!empty.advance());
        assert_eq!(empty.state().offset, 0.0);
    }

    #[test]
    fn shrinking_track_keeps_offset_in_range() {
        let mut c = CarouselDriver::new(400.0, 1.0);
        c.start();
        for _ in 0..150 {
            c.advance();
        }
        c.set_track_width(200.0);
        assert_eq!(c.state().offset, 50.0);
    }
}
