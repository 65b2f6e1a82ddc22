//! Terminal-side scene graph — what the controller last told us to show.
//!
//! [`Scene`] is the host's [`Presenter`]: it records targets and flags per
//! card, and eases the displayed poses toward the targets on every frame.

use crate::app::presenter::Presenter;
use crate::core::card::CardId;
use crate::core::transform::CardTransform;

use super::easing::EasedTransform;

/// Display state of a single card.
#[derive(Debug, Clone, Default)]
pub struct CardVisual {
    /// `None` until the first transform arrives.
    motion: Option<EasedTransform>,
    pub active: bool,
    pub open: bool,
    pub dot_active: bool,
}

impl CardVisual {
    /// Pose to draw this frame.
    pub fn shown(&self) -> Option<&CardTransform> {
        self.motion.as_ref().map(|m| m.current())
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    cards: Vec<CardVisual>,
    detail_mode: bool,
    ease_speed: f64,
}

impl Scene {
    pub fn new(ease_speed: f64) -> Self {
        Self {
            cards: Vec::new(),
            detail_mode: false,
            ease_speed,
        }
    }

    pub fn card(&self, id: CardId) -> Option<&CardVisual> {
        self.cards.get(id)
    }

    pub fn cards(&self) -> impl Iterator<Item = (CardId, &CardVisual)> {
        self.cards.iter().enumerate()
    }

    pub fn detail_mode(&self) -> bool {
        self.detail_mode
    }

    pub fn open_card(&self) -> Option<CardId> {
        self.cards.iter().position(|c| c.open)
    }

    pub fn is_animating(&self) -> bool {
        self.cards
            .iter()
            .any(|c| c.motion.as_ref().is_some_and(EasedTransform::is_animating))
    }

    /// Advance every card's easing by one frame.
    pub fn tick(&mut self) {
        for card in &mut self.cards {
            if let Some(motion) = card.motion.as_mut() {
                motion.tick();
            }
        }
    }

    fn slot(&mut self, id: CardId) -> &mut CardVisual {
        if id >= self.cards.len() {
            self.cards.resize_with(id + 1, CardVisual::default);
        }
        &mut self.cards[id]
    }
}

impl Presenter for Scene {
    fn apply_transform(&mut self, card: CardId, transform: &CardTransform) {
        let speed = self.ease_speed;
        let slot = self.slot(card);
        match slot.motion.as_mut() {
            Some(motion) => motion.set_target(*transform),
            // First placement: appear in position, no glide in.
            None => slot.motion = Some(EasedTransform::new(*transform, speed)),
        }
    }

    fn set_card_active(&mut self, card: CardId, active: bool) {
        self.slot(card).active = active;
    }

    fn set_dot_active(&mut self, card: CardId, active: bool) {
        self.slot(card).dot_active = active;
    }

    fn set_card_open(&mut self, card: CardId, open: bool) {
        self.slot(card).open = open;
    }

    fn set_detail_mode(&mut self, on: bool) {
        self.detail_mode = on;
    }
}
