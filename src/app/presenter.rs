//! Presentation boundary.
//!
//! The controller pushes every visual change through this trait and never
//! reads anything back.  The terminal host implements it with
//! [`crate::ui::scene::Scene`]; tests use a recorder.

use crate::core::card::CardId;
use crate::core::transform::CardTransform;

pub trait Presenter {
    /// Replace the target transform of one card.
    fn apply_transform(&mut self, card: CardId, transform: &CardTransform);
    /// Mark the card sitting at the selection.
    fn set_card_active(&mut self, card: CardId, active: bool);
    /// Highlight one indicator dot.
    fn set_dot_active(&mut self, card: CardId, active: bool);
    /// Show or hide a card's back face.
    fn set_card_open(&mut self, card: CardId, open: bool);
    /// Global detail-mode flag, for styling everything around the open card.
    fn set_detail_mode(&mut self, on: bool);
}
