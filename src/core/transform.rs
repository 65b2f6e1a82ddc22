//! Per-card 3D transform derivation.
//!
//! Everything here is a pure function of the card's offset from the
//! selection, its parity and the viewport width.  Units are CSS-like
//! pixels and degrees; the host decides how to project them.

use super::card::CardId;

/// Depth step between consecutive cards ahead of the selection.
pub const STEP_DEPTH: f64 = 1100.0;
/// Viewports at or below this width use the mobile offsets.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

const SIDE_OFFSET_DESKTOP: f64 = 0.38;
const SIDE_OFFSET_MOBILE: f64 = 0.45;
const FOCUS_OFFSET_DESKTOP: f64 = 0.03;
const FOCUS_OFFSET_MOBILE: f64 = 0.05;
const TILT_DESKTOP_DEG: f64 = 12.0;
const TILT_MOBILE_DEG: f64 = 22.0;

const AHEAD_SCALE: f64 = 0.92;
const AHEAD_OPACITY_DECAY: f64 = 0.35;
const AHEAD_BLUR_STEP: f64 = 10.0;

/// Cards already passed go past the perspective origin (1200) so they
/// leave the frustum instead of clipping at the screen edge.
pub const BEHIND_DEPTH: f64 = 2000.0;
const BEHIND_BLUR: f64 = 25.0;
const BEHIND_SIDE_FACTOR: f64 = 1.5;
const BEHIND_SCALE: f64 = 0.5;

// ───────────────────────────────────────── viewport ──────────

/// Viewport-dependent layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
}

impl Viewport {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn is_mobile(&self) -> bool {
        self.width <= MOBILE_BREAKPOINT
    }

    /// Horizontal offset of cards off the focus position.
    pub fn side_offset(&self) -> f64 {
        let pct = if self.is_mobile() { SIDE_OFFSET_MOBILE } else { SIDE_OFFSET_DESKTOP };
        self.width * pct
    }

    /// Small nudge applied to the active card.
    pub fn focus_offset(&self) -> f64 {
        let pct = if self.is_mobile() { FOCUS_OFFSET_MOBILE } else { FOCUS_OFFSET_DESKTOP };
        self.width * pct
    }

    pub fn tilt_deg(&self) -> f64 {
        if self.is_mobile() { TILT_MOBILE_DEG } else { TILT_DESKTOP_DEG }
    }
}

// ───────────────────────────────────────── transform ─────────

/// Visual parameters for one card.  `translate_y` is always zero (cards are
/// vertically centred) but is part of the presenter contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub opacity: f64,
    pub blur: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub translate_z: f64,
    /// Rotation around the vertical axis, degrees.
    pub rotate_y: f64,
    pub scale: f64,
}

impl CardTransform {
    /// The resting pose of the active card, before any side nudge.
    pub const IDENTITY: CardTransform = CardTransform {
        opacity: 1.0,
        blur: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
        translate_z: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };
}

/// Left/right alternation by parity: even cards lean left.
pub fn side(index: CardId) -> f64 {
    if index % 2 == 0 { -1.0 } else { 1.0 }
}

/// Transform of card `index` while `selected` is the active card.
pub fn card_transform(index: CardId, selected: CardId, viewport: Viewport) -> CardTransform {
    let diff = index as i64 - selected as i64;
    let side = side(index);

    match diff {
        0 => CardTransform {
            translate_x: side * viewport.focus_offset(),
            ..CardTransform::IDENTITY
        },
        d if d > 0 => {
            let d = d as f64;
            CardTransform {
                opacity: (1.0 - d * AHEAD_OPACITY_DECAY).max(0.0),
                blur: d * AHEAD_BLUR_STEP,
                translate_x: side * viewport.side_offset(),
                translate_y: 0.0,
                translate_z: -d * STEP_DEPTH,
                rotate_y: side * viewport.tilt_deg(),
                scale: AHEAD_SCALE,
            }
        }
        _ => CardTransform {
            opacity: 0.0,
            blur: BEHIND_BLUR,
            translate_x: side * viewport.side_offset() * BEHIND_SIDE_FACTOR,
            translate_y: 0.0,
            translate_z: BEHIND_DEPTH,
            rotate_y: 0.0,
            scale: BEHIND_SCALE,
        },
    }
}

/// Transforms for a whole collection of `count` cards.
pub fn layout(count: usize, selected: CardId, viewport: Viewport) -> Vec<CardTransform> {
    (0..count)
        .map(|i| card_transform(i, selected, viewport))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn three_cards_desktop_around_middle() {
        let vp = Viewport::new(1024.0);
        let t = layout(3, 1, vp);

        // Behind: invisible and past the camera.
        assert!(close(t[0].opacity, 0.0));
        assert!(close(t[0].translate_z, 2000.0));
        assert!(close(t[0].blur, 25.0));
        assert!(close(t[0].scale, 0.5));
        assert!(close(t[0].translate_x, -1024.0 * 0.38 * 1.5));

        // Active: odd index leans right by the focus offset.
        assert!(close(t[1].opacity, 1.0));
        assert!(close(t[1].translate_z, 0.0));
        assert!(close(t[1].blur, 0.0));
        assert!(close(t[1].translate_x, 1024.0 * 0.03));
        assert!(close(t[1].rotate_y, 0.0));
        assert!(close(t[1].scale, 1.0));

        // Ahead: one step back, partly faded, tilted.
        assert!(close(t[2].opacity, 0.65));
        assert!(close(t[2].translate_z, -1100.0));
        assert!(close(t[2].blur, 10.0));
        assert!(close(t[2].translate_x, -1024.0 * 0.38));
        assert!(close(t[2].rotate_y, -12.0));
        assert!(close(t[2].scale, 0.92));
    }

    #[test]
    fn opacity_never_goes_negative_far_ahead() {
        let t = card_transform(9, 0, Viewport::new(1280.0));
        assert!(close(t.opacity, 0.0));
        assert!(close(t.translate_z, -9.0 * STEP_DEPTH));
        assert!(close(t.blur, 90.0));
    }

    #[test]
    fn breakpoint_is_inclusive_of_768() {
        let mobile = Viewport::new(768.0);
        assert!(mobile.is_mobile());
        assert!(close(mobile.side_offset(), 768.0 * 0.45));
        assert!(close(mobile.focus_offset(), 768.0 * 0.05));
        assert!(close(card_transform(1, 0, mobile).rotate_y, 22.0));

        let desktop = Viewport::new(769.0);
        assert!(!desktop.is_mobile());
        assert!(close(desktop.side_offset(), 769.0 * 0.38));
        assert!(close(desktop.focus_offset(), 769.0 * 0.03));
        assert!(close(card_transform(1, 0, desktop).rotate_y, 12.0));
    }

    #[test]
    fn side_alternates_by_parity() {
        assert_eq!(side(0), -1.0);
        assert_eq!(side(1), 1.0);
        assert_eq!(side(4), -1.0);
    }

    #[test]
    fn recomputation_is_deterministic() {
        let vp = Viewport::new(900.0);
        assert_eq!(layout(6, 2, vp), layout(6, 2, vp));
    }
}
