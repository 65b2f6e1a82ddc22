//! Wheel / swipe normalization.
//!
//! Both gestures collapse to a single step in one direction, whatever their
//! magnitude; anything at or under the noise threshold is dropped.

/// Wheel deltas at or under this are ignored.
pub const WHEEL_THRESHOLD: f64 = 20.0;
/// Vertical touch travel at or under this is ignored.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// One navigation step: `+1` towards later cards, `-1` towards earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

impl Step {
    pub fn delta(self) -> i64 {
        match self {
            Step::Forward => 1,
            Step::Back => -1,
        }
    }
}

/// Positive `delta_y` (scrolling down) moves forward.
pub fn wheel_step(delta_y: f64) -> Option<Step> {
    if delta_y.abs() > WHEEL_THRESHOLD {
        Some(if delta_y > 0.0 { Step::Forward } else { Step::Back })
    } else {
        None
    }
}

/// Swiping up (start below end) moves forward.
pub fn swipe_step(start_y: f64, end_y: f64) -> Option<Step> {
    let travel = start_y - end_y;
    if travel.abs() > SWIPE_THRESHOLD {
        Some(if travel > 0.0 { Step::Forward } else { Step::Back })
    } else {
        None
    }
}

/// Remembers where the current touch began.
#[derive(Debug, Default, Clone, Copy)]
pub struct TouchTracker {
    start_y: Option<f64>,
}

impl TouchTracker {
    pub fn start(&mut self, y: f64) {
        self.start_y = Some(y);
    }

    /// Finish the gesture.  A release without a recorded start yields nothing.
    pub fn end(&mut self, y: f64) -> Option<Step> {
        self.start_y.take().and_then(|start| swipe_step(start, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_noise_is_ignored() {
        assert_eq!(wheel_step(20.0), None);
        assert_eq!(wheel_step(-20.0), None);
        assert_eq!(wheel_step(20.5), Some(Step::Forward));
        assert_eq!(wheel_step(-300.0), Some(Step::Back));
    }

    #[test]
    fn swipe_of_exactly_fifty_does_not_navigate() {
        assert_eq!(swipe_step(300.0, 250.0), None);
        assert_eq!(swipe_step(300.0, 249.0), Some(Step::Forward));
        assert_eq!(swipe_step(249.0, 300.0), Some(Step::Back));
    }

    #[test]
    fn large_gestures_are_still_one_step() {
        assert_eq!(wheel_step(5000.0).map(Step::delta), Some(1));
        assert_eq!(swipe_step(0.0, 4000.0).map(Step::delta), Some(-1));
    }

    #[test]
    fn tracker_needs_a_start() {
        let mut touch = TouchTracker::default();
        assert_eq!(touch.end(10.0), None);

        touch.start(400.0);
        assert_eq!(touch.end(300.0), Some(Step::Forward));
        // The start is consumed by the first release.
        assert_eq!(touch.end(0.0), None);
    }
}
