//! Core data types for the pull-to-refresh tracker.
//! Configuration, phases and the snapshot the renderer reads.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 80.0;
pub const DEFAULT_DEAD_ZONE: f64 = 5.0;
pub const DEFAULT_MAX_DISTANCE: f64 = 400.0;
pub const DEFAULT_RESISTANCE: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Finger down at scroll top, distance below threshold.
    Pulling,
    /// Finger still down, distance at or past threshold (release to refresh).
    Releasing,
    /// Refresh callback in flight.
    Refreshing,
}

impl PullPhase {
    /// True while a finger is tracked as a pull.
    pub fn is_active(self) -> bool {
        matches!(self, PullPhase::Pulling | PullPhase::Releasing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullConfig {
    /// Damped pixel distance required to commit to a refresh.
    pub threshold: f64,
    /// Suppresses every touch-start while set.
    pub disabled: bool,
    /// Damped distance past which native scrolling is prevented.
    pub dead_zone: f64,
    /// Asymptote of the damping curve.
    pub max_distance: f64,
    /// Slope of the damping curve at zero; below 1 the pull always lags the finger.
    pub resistance: f64,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            disabled: false,
            dead_zone: DEFAULT_DEAD_ZONE,
            max_distance: DEFAULT_MAX_DISTANCE,
            resistance: DEFAULT_RESISTANCE,
        }
    }
}

impl PullConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn knee(&self) -> f64 {
        self.max_distance / self.resistance.max(f64::EPSILON)
    }

    /// Rubber-band damping: `max * d / (d + max / resistance)`.
    ///
    /// Grows monotonically with a shrinking slope and never reaches
    /// `max_distance`. Non-positive input maps to 0.
    pub fn damp(&self, raw: f64) -> f64 {
        if raw.is_nan() || raw <= 0.0 || self.max_distance <= 0.0 {
            return 0.0;
        }
        self.max_distance * raw / (raw + self.knee())
    }

    /// Raw finger travel that produces `distance` after damping.
    /// Returns `None` for distances the curve never reaches.
    pub fn undamp(&self, distance: f64) -> Option<f64> {
        if distance <= 0.0 {
            return Some(0.0);
        }
        if distance >= self.max_distance {
            return None;
        }
        Some(self.knee() * distance / (self.max_distance - distance))
    }

    /// `distance / threshold` clamped to `[0, 1]`.
    pub fn progress(&self, distance: f64) -> f64 {
        if self.threshold <= 0.0 {
            return if distance > 0.0 { 1.0 } else { 0.0 };
        }
        (distance / self.threshold).clamp(0.0, 1.0)
    }
}

/// What the renderer consumes after every transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PullSnapshot {
    pub phase: PullPhase,
    pub is_refreshing: bool,
    pub pull_distance: f64,
    pub pull_progress: f64,
}

/// Outcome of lifting the finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// No active gesture, nothing happened.
    Ignored,
    /// Released short of the threshold.
    Cancelled,
    /// Threshold reached; caller must run the refresh and then settle.
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damp_is_zero_for_non_positive_travel() {
        let cfg = PullConfig::default();
        assert_eq!(cfg.damp(0.0), 0.0);
        assert_eq!(cfg.damp(-35.0), 0.0);
        assert_eq!(cfg.damp(f64::NAN), 0.0);
    }

    #[test]
    fn damp_is_monotonic_and_sub_linear() {
        let cfg = PullConfig::default();
        let mut prev = 0.0;
        let mut prev_slope = f64::INFINITY;
        for step in 1..2000 {
            let d = step as f64 * 0.5;
            let v = cfg.damp(d);
            assert!(v >= prev, "not monotonic at {d}");
            assert!(v < d, "not damped at {d}");
            let slope = v - prev;
            assert!(slope <= prev_slope + 1e-9, "slope grew at {d}");
            prev_slope = slope;
            prev = v;
        }
        assert!(cfg.damp(1e9) < cfg.max_distance);
    }

    #[test]
    fn default_curve_hits_threshold_at_200px() {
        let cfg = PullConfig::default();
        assert_eq!(cfg.damp(200.0), 80.0);
        assert_eq!(cfg.undamp(80.0), Some(200.0));
        assert_eq!(cfg.undamp(cfg.max_distance), None);
    }

    #[test]
    fn undamp_inverts_damp() {
        let cfg = PullConfig::default();
        for target in [1.0, 12.5, 79.0, 150.0, 399.0] {
            let raw = cfg.undamp(target).unwrap();
            assert!((cfg.damp(raw) - target).abs() < 1e-9);
        }
    }

    #[test]
    fn progress_is_clamped() {
        let cfg = PullConfig::default();
        assert_eq!(cfg.progress(0.0), 0.0);
        assert_eq!(cfg.progress(40.0), 0.5);
        assert_eq!(cfg.progress(200.0), 1.0);
    }

    #[test]
    fn config_from_partial_json_keeps_defaults() {
        let cfg = PullConfig::from_json(r#"{"threshold": 120, "disabled": true}"#).unwrap();
        assert_eq!(cfg.threshold, 120.0);
        assert!(cfg.disabled);
        assert_eq!(cfg.dead_zone, DEFAULT_DEAD_ZONE);
        assert_eq!(cfg.resistance, DEFAULT_RESISTANCE);
    }
}
