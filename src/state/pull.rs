// Pull gesture state machine; no DOM access, driven by the hook or by tests.
use crate::model::{PullConfig, PullPhase, PullSnapshot, Release};
use crate::util::clog;

#[derive(Debug, Clone, Default)]
pub struct PullTracker {
    config: PullConfig,
    phase: PullPhase,
    start_y: f64,
    distance: f64,
}

impl PullTracker {
    pub fn new(config: PullConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    pub fn phase(&self) -> PullPhase {
        self.phase
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == PullPhase::Refreshing
    }

    /// Swaps the configuration. Disabling aborts an active pull but leaves an
    /// in-flight refresh alone.
    pub fn set_config(&mut self, config: PullConfig) {
        self.config = config;
        if config.disabled && self.phase.is_active() {
            self.reset();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        let mut config = self.config;
        config.disabled = disabled;
        self.set_config(config);
    }

    /// Returns true when a pull started. `scroll_top` is the monitored
    /// element's scroll offset; elastic overscroll (negative) counts as top.
    pub fn touch_start(&mut self, y: f64, scroll_top: f64) -> bool {
        if self.config.disabled || self.phase != PullPhase::Idle {
            return false;
        }
        if scroll_top > 0.0 {
            return false;
        }
        self.start_y = y;
        self.distance = 0.0;
        self.phase = PullPhase::Pulling;
        true
    }

    /// Returns true when the native scroll should be prevented.
    pub fn touch_move(&mut self, y: f64) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        let raw = y - self.start_y;
        if raw <= 0.0 {
            self.distance = 0.0;
            self.phase = PullPhase::Pulling;
            return false;
        }
        self.distance = self.config.damp(raw);
        self.phase = if self.distance >= self.config.threshold {
            PullPhase::Releasing
        } else {
            PullPhase::Pulling
        };
        self.distance > self.config.dead_zone
    }

    /// Finger lifted. On `Release::Refresh` the tracker sits in `Refreshing`
    /// until [`PullTracker::finish_refresh`] is called.
    pub fn touch_end(&mut self) -> Release {
        if !self.phase.is_active() {
            return Release::Ignored;
        }
        if self.distance >= self.config.threshold {
            clog(&format!("pull released at {:.1}px, refreshing", self.distance));
            self.phase = PullPhase::Refreshing;
            self.distance = 0.0;
            Release::Refresh
        } else {
            self.reset();
            Release::Cancelled
        }
    }

    /// The platform aborted the gesture (touchcancel); never refreshes.
    pub fn touch_cancel(&mut self) {
        if self.phase.is_active() {
            self.reset();
        }
    }

    pub fn finish_refresh(&mut self) {
        if self.phase == PullPhase::Refreshing {
            self.reset();
        }
    }

    pub fn snapshot(&self) -> PullSnapshot {
        let pull_distance = if self.phase.is_active() {
            self.distance
        } else {
            0.0
        };
        PullSnapshot {
            phase: self.phase,
            is_refreshing: self.is_refreshing(),
            pull_distance,
            pull_progress: self.config.progress(pull_distance),
        }
    }

    fn reset(&mut self) {
        self.phase = PullPhase::Idle;
        self.distance = 0.0;
        self.start_y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulled(raw: f64) -> PullTracker {
        let mut t = PullTracker::new(PullConfig::default());
        assert!(t.touch_start(100.0, 0.0));
        t.touch_move(100.0 + raw);
        t
    }

    #[test]
    fn upward_moves_never_pull() {
        let mut t = PullTracker::new(PullConfig::default());
        assert!(t.touch_start(300.0, 0.0));
        for y in [299.0, 250.0, 300.0, 10.0] {
            assert!(!t.touch_move(y));
            assert_eq!(t.distance(), 0.0);
        }
        assert_eq!(t.touch_end(), Release::Cancelled);
        assert_eq!(t.phase(), PullPhase::Idle);
    }

    #[test]
    fn scrolled_container_never_starts() {
        let mut t = PullTracker::new(PullConfig::default());
        assert!(!t.touch_start(100.0, 12.0));
        t.touch_move(600.0);
        assert_eq!(t.phase(), PullPhase::Idle);
        assert_eq!(t.distance(), 0.0);
        assert_eq!(t.touch_end(), Release::Ignored);
    }

    #[test]
    fn releasing_just_short_of_threshold_cancels() {
        let cfg = PullConfig::default();
        let mut t = pulled(cfg.undamp(79.0).unwrap());
        assert!((t.distance() - 79.0).abs() < 1e-9);
        assert_eq!(t.phase(), PullPhase::Pulling);
        assert_eq!(t.touch_end(), Release::Cancelled);
        assert_eq!(t.snapshot(), PullSnapshot::default());
    }

    #[test]
    fn reaching_threshold_arms_and_refreshes_once() {
        let mut t = pulled(200.0);
        assert_eq!(t.distance(), 80.0);
        assert_eq!(t.phase(), PullPhase::Releasing);
        assert_eq!(t.touch_end(), Release::Refresh);
        assert!(t.is_refreshing());
        assert_eq!(t.touch_end(), Release::Ignored);
        t.finish_refresh();
        assert_eq!(t.phase(), PullPhase::Idle);
        assert!(!t.snapshot().is_refreshing);
    }

    #[test]
    fn moving_back_disarms() {
        let mut t = pulled(300.0);
        assert_eq!(t.phase(), PullPhase::Releasing);
        t.touch_move(150.0);
        assert_eq!(t.phase(), PullPhase::Pulling);
        assert_eq!(t.touch_end(), Release::Cancelled);
    }

    #[test]
    fn refreshing_blocks_new_pulls() {
        let mut t = pulled(250.0);
        assert_eq!(t.touch_end(), Release::Refresh);
        assert!(!t.touch_start(0.0, 0.0));
        assert!(!t.touch_move(500.0));
        assert_eq!(t.snapshot().pull_distance, 0.0);
        assert!(t.snapshot().is_refreshing);
    }

    #[test]
    fn dead_zone_gates_prevent_default() {
        let cfg = PullConfig::default();
        let mut t = PullTracker::new(cfg);
        t.touch_start(0.0, 0.0);
        assert!(!t.touch_move(cfg.undamp(cfg.dead_zone - 0.5).unwrap()));
        assert!(t.touch_move(cfg.undamp(cfg.dead_zone + 1.0).unwrap()));
    }

    #[test]
    fn disabled_suppresses_until_reenabled() {
        let mut t = PullTracker::new(PullConfig::default());
        t.set_disabled(true);
        assert!(!t.touch_start(0.0, 0.0));
        t.set_disabled(false);
        assert!(t.touch_start(0.0, 0.0));
    }

    #[test]
    fn disabling_mid_pull_aborts_but_not_mid_refresh() {
        let mut t = pulled(120.0);
        t.set_disabled(true);
        assert_eq!(t.phase(), PullPhase::Idle);

        let mut t = pulled(250.0);
        t.touch_end();
        t.set_disabled(true);
        assert!(t.is_refreshing());
        t.finish_refresh();
        assert_eq!(t.phase(), PullPhase::Idle);
    }

    #[test]
    fn extra_touch_start_keeps_anchor() {
        let mut t = pulled(100.0);
        let before = t.distance();
        assert!(!t.touch_start(400.0, 0.0));
        t.touch_move(200.0);
        assert_eq!(t.distance(), before);
    }

    #[test]
    fn cancel_never_refreshes() {
        let mut t = pulled(500.0);
        t.touch_cancel();
        assert_eq!(t.phase(), PullPhase::Idle);
        assert_eq!(t.touch_end(), Release::Ignored);
    }

    #[test]
    fn progress_tracks_threshold() {
        let t = pulled(PullConfig::default().undamp(40.0).unwrap());
        assert!((t.snapshot().pull_progress - 0.5).abs() < 1e-9);
        let t = pulled(1000.0);
        assert_eq!(t.snapshot().pull_progress, 1.0);
    }
}
