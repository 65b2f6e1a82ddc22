//! Per-card pose easing with exponential ease-out.
//!
//! When a card's target transform changes, the displayed pose keeps its old
//! values and each frame covers a fixed fraction of the remaining distance,
//! giving visible deceleration.  Fields snap once the gap is negligible.

use crate::core::transform::CardTransform;

/// Below this gap (in the field's own unit) a field snaps to its target.
const SNAP_PX: f64 = 0.5;
const SNAP_DEG: f64 = 0.05;
const SNAP_UNIT: f64 = 0.002;

#[derive(Debug, Clone)]
pub struct EasedTransform {
    current: CardTransform,
    target: CardTransform,
    /// `gap *= (1 - speed)` each tick.
    speed: f64,
}

impl EasedTransform {
    /// Start at rest on `initial`.
    pub fn new(initial: CardTransform, speed: f64) -> Self {
        Self {
            current: initial,
            target: initial,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    pub fn set_target(&mut self, target: CardTransform) {
        self.target = target;
    }

    /// Move every field one step toward the target.  Call once per frame.
    pub fn tick(&mut self) {
        let s = self.speed;
        let (c, t) = (&mut self.current, &self.target);
        approach(&mut c.opacity, t.opacity, s, SNAP_UNIT);
        approach(&mut c.blur, t.blur, s, SNAP_DEG);
        approach(&mut c.translate_x, t.translate_x, s, SNAP_PX);
        approach(&mut c.translate_y, t.translate_y, s, SNAP_PX);
        approach(&mut c.translate_z, t.translate_z, s, SNAP_PX);
        approach(&mut c.rotate_y, t.rotate_y, s, SNAP_DEG);
        approach(&mut c.scale, t.scale, s, SNAP_UNIT);
    }

    pub fn current(&self) -> &CardTransform {
        &self.current
    }

    /// True until the displayed pose has reached the target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

fn approach(value: &mut f64, target: f64, speed: f64, snap: f64) {
    *value += (target - *value) * speed;
    if (target - *value).abs() < snap {
        *value = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pushed_back() -> CardTransform {
        CardTransform {
            opacity: 0.65,
            blur: 10.0,
            translate_x: -400.0,
            translate_y: 0.0,
            translate_z: -1100.0,
            rotate_y: -12.0,
            scale: 0.92,
        }
    }

    #[test]
    fn decelerates_then_settles_on_target() {
        let mut ease = EasedTransform::new(CardTransform::IDENTITY, 0.3);
        ease.set_target(pushed_back());
        assert!(ease.is_animating());

        ease.tick();
        let first_step = ease.current().translate_z;
        assert!(first_step < 0.0 && first_step > -1100.0);
        ease.tick();
        let second_step = ease.current().translate_z - first_step;
        assert!(second_step.abs() < first_step.abs());

        for _ in 0..200 {
            ease.tick();
        }
        assert!(!ease.is_animating());
        assert_eq!(*ease.current(), pushed_back());
    }

    #[test]
    fn full_speed_jumps_immediately() {
        let mut ease = EasedTransform::new(CardTransform::IDENTITY, 1.0);
        ease.set_target(pushed_back());
        ease.tick();
        assert_eq!(*ease.current(), pushed_back());
    }
}
