// First-finger tracking for touch events; extra fingers are ignored.
use super::pull::PullTracker;
use crate::model::Release;
use web_sys::TouchList;

/// One active finger as seen in a `TouchList`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub y: f64,
}

/// Active fingers of an event, in list order.
pub fn touch_points(touches: &TouchList) -> Vec<TouchPoint> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            y: t.client_y() as f64,
        })
        .collect()
}

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    /// Identifier of the finger that started the gesture.
    pub tracked_id: Option<i32>,
}

impl TouchState {
    /// Locks onto the first active touch. Returns its Y.
    pub fn begin(&mut self, points: &[TouchPoint]) -> Option<f64> {
        if self.tracked_id.is_some() {
            return None;
        }
        let first = points.first()?;
        self.tracked_id = Some(first.id);
        Some(first.y)
    }

    /// Y of the tracked finger, falling back to the first touch.
    pub fn current_y(&self, points: &[TouchPoint]) -> Option<f64> {
        let id = self.tracked_id?;
        points
            .iter()
            .find(|p| p.id == id)
            .or_else(|| points.first())
            .map(|p| p.y)
    }

    /// True once the tracked finger is no longer among the active touches.
    pub fn lifted(&self, points: &[TouchPoint]) -> bool {
        match self.tracked_id {
            Some(id) => !points.iter().any(|p| p.id == id),
            None => points.is_empty(),
        }
    }

    pub fn clear(&mut self) {
        self.tracked_id = None;
    }

    /// touchstart. Returns true when a pull started; a rejected start
    /// releases the finger so a later touch can try again.
    pub fn start(&mut self, points: &[TouchPoint], scroll_top: f64, tracker: &mut PullTracker) -> bool {
        let Some(y) = self.begin(points) else {
            return false;
        };
        if !tracker.touch_start(y, scroll_top) {
            self.clear();
            return false;
        }
        true
    }

    /// touchmove. Returns true when the native scroll should be prevented;
    /// non-cancelable events are never prevented.
    pub fn track_move(&self, points: &[TouchPoint], cancelable: bool, tracker: &mut PullTracker) -> bool {
        let Some(y) = self.current_y(points) else {
            return false;
        };
        tracker.touch_move(y) && cancelable
    }

    /// touchend. `None` while the tracked finger is still down.
    pub fn end(&mut self, points: &[TouchPoint], tracker: &mut PullTracker) -> Option<Release> {
        if self.tracked_id.is_none() || !self.lifted(points) {
            return None;
        }
        self.clear();
        Some(tracker.touch_end())
    }

    /// touchcancel. Only aborts when the tracked finger was the one cancelled.
    pub fn cancel(&mut self, points: &[TouchPoint], tracker: &mut PullTracker) -> bool {
        if self.tracked_id.is_none() || !self.lifted(points) {
            return false;
        }
        self.clear();
        tracker.touch_cancel();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PullConfig, PullPhase};

    fn pt(id: i32, y: f64) -> TouchPoint {
        TouchPoint { id, y }
    }

    fn tracker() -> PullTracker {
        PullTracker::new(PullConfig::default())
    }

    #[test]
    fn follows_first_finger_by_identifier() {
        let mut ts = TouchState::default();
        assert_eq!(ts.begin(&[pt(7, 10.0), pt(9, 500.0)]), Some(10.0));
        assert_eq!(ts.tracked_id, Some(7));
        // list order changed, tracked finger is second now
        assert_eq!(ts.current_y(&[pt(9, 480.0), pt(7, 60.0)]), Some(60.0));
        // second finger down again does not re-anchor
        assert_eq!(ts.begin(&[pt(7, 60.0), pt(11, 0.0)]), None);
    }

    #[test]
    fn untracked_state_reports_no_position() {
        let ts = TouchState::default();
        assert_eq!(ts.current_y(&[pt(1, 5.0)]), None);
        assert!(ts.lifted(&[]));
    }

    #[test]
    fn end_waits_for_tracked_finger() {
        let mut t = tracker();
        let mut ts = TouchState::default();
        assert!(ts.start(&[pt(1, 0.0)], 0.0, &mut t));
        assert!(ts.track_move(&[pt(1, 100.0), pt(2, 0.0)], true, &mut t));

        // second finger lifts, first still down
        assert_eq!(ts.end(&[pt(1, 100.0)], &mut t), None);
        assert!(t.phase().is_active());

        assert_eq!(ts.end(&[], &mut t), Some(Release::Cancelled));
        assert_eq!(ts.tracked_id, None);
        assert_eq!(t.phase(), PullPhase::Idle);
    }

    #[test]
    fn rejected_start_releases_finger() {
        let mut t = tracker();
        let mut ts = TouchState::default();
        assert!(!ts.start(&[pt(3, 0.0)], 40.0, &mut t));
        assert_eq!(ts.tracked_id, None);
        assert!(ts.start(&[pt(4, 0.0)], 0.0, &mut t));
        assert_eq!(ts.tracked_id, Some(4));
    }

    #[test]
    fn moves_ignored_without_tracked_finger() {
        let mut t = tracker();
        let ts = TouchState::default();
        assert!(!ts.track_move(&[pt(1, 900.0)], true, &mut t));
        assert_eq!(t.phase(), PullPhase::Idle);
    }

    #[test]
    fn prevent_needs_dead_zone_and_cancelable() {
        let cfg = PullConfig::default();
        let mut t = tracker();
        let mut ts = TouchState::default();
        ts.start(&[pt(1, 0.0)], 0.0, &mut t);
        let inside = cfg.undamp(cfg.dead_zone - 0.5).unwrap();
        let past = cfg.undamp(cfg.dead_zone + 10.0).unwrap();
        assert!(!ts.track_move(&[pt(1, inside)], true, &mut t));
        assert!(!ts.track_move(&[pt(1, past)], false, &mut t));
        assert!(t.distance() > cfg.dead_zone);
        assert!(ts.track_move(&[pt(1, past)], true, &mut t));
    }

    #[test]
    fn threshold_release_through_touch_layer() {
        let mut t = tracker();
        let mut ts = TouchState::default();
        ts.start(&[pt(5, 100.0)], 0.0, &mut t);
        ts.track_move(&[pt(5, 300.0)], true, &mut t);
        assert_eq!(ts.end(&[], &mut t), Some(Release::Refresh));
        assert!(t.is_refreshing());
        assert!(!ts.start(&[pt(6, 0.0)], 0.0, &mut t));
        assert_eq!(ts.tracked_id, None);
    }

    #[test]
    fn cancel_of_other_finger_keeps_pull() {
        let mut t = tracker();
        let mut ts = TouchState::default();
        ts.start(&[pt(1, 0.0)], 0.0, &mut t);
        ts.track_move(&[pt(1, 150.0), pt(2, 10.0)], true, &mut t);
        let before = t.distance();

        assert!(!ts.cancel(&[pt(1, 150.0)], &mut t));
        assert_eq!(ts.tracked_id, Some(1));
        assert_eq!(t.distance(), before);

        assert!(ts.cancel(&[pt(2, 10.0)], &mut t));
        assert_eq!(ts.tracked_id, None);
        assert_eq!(t.phase(), PullPhase::Idle);
    }
}
