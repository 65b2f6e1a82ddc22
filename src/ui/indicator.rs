//! Vertical rail of position dots, one per card.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
};

use super::scene::Scene;
use super::theme::Theme;
use crate::core::card::CardId;

const ACTIVE_DOT: &str = "●";
const IDLE_DOT: &str = "○";

pub struct IndicatorWidget<'a> {
    pub scene: &'a Scene,
    pub count: usize,
}

impl<'a> IndicatorWidget<'a> {
    /// Draw the dots centred vertically in `area`, two rows apart, and
    /// return each dot's clickable cell.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<(CardId, Rect)> {
        if area.width == 0 || area.height == 0 || self.count == 0 {
            return Vec::new();
        }
        let span = (self.count as u16).saturating_mul(2).saturating_sub(1);
        let top = area.y + area.height.saturating_sub(span) / 2;
        let x = area.x + area.width / 2;

        let mut hits = Vec::with_capacity(self.count);
        for id in 0..self.count {
            let y = top + (id as u16) * 2;
            if y >= area.y + area.height {
                break;
            }
            let active = self.scene.card(id).is_some_and(|c| c.dot_active);
            let symbol = if active { ACTIVE_DOT } else { IDLE_DOT };
            buf.set_line(x, y, &Line::from(Span::styled(symbol, Theme::dot_style(active))), 1);
            // A slightly wider target than the glyph itself.
            let hit_x = x.saturating_sub(1).max(area.x);
            hits.push((id, Rect::new(hit_x, y, area.width.min(3), 1)));
        }
        hits
    }
}
