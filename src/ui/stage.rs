//! The 3D stage — projects card transforms onto terminal cells.
//!
//! Projection follows a CSS `perspective: 1200px` camera: a card at depth
//! `z` is scaled by `P / (P - z)`, both in size and in its horizontal
//! offset from the centre.  Cards at or beyond the perspective origin are
//! behind the camera and are not drawn at all.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::preview::{self, PreviewCache};
use super::scene::Scene;
use super::theme::Theme;
use crate::core::card::{Card, CardCollection, CardId};
use crate::core::transform::CardTransform;

/// Distance from the camera to the z = 0 plane.
pub const PERSPECTIVE: f64 = 1200.0;
/// Unscaled card size as a fraction of the stage.
const CARD_WIDTH_FRAC: f64 = 0.46;
const CARD_HEIGHT_FRAC: f64 = 0.72;
/// Cards fainter than this are skipped.
const MIN_VISIBLE_OPACITY: f64 = 0.02;
/// From this blur on, the card shows only its frame.
const TEXT_BLUR_LIMIT: f64 = 15.0;

/// Cell-to-pixel scale of the terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub px_per_column: f64,
    pub px_per_row: f64,
}

/// Where a transformed card lands on the stage, or `None` if invisible.
pub fn project(t: &CardTransform, stage: Rect, cells: CellMetrics) -> Option<Rect> {
    if t.opacity <= MIN_VISIBLE_OPACITY || t.translate_z >= PERSPECTIVE - 1.0 {
        return None;
    }
    if stage.width == 0 || stage.height == 0 {
        return None;
    }

    let f = PERSPECTIVE / (PERSPECTIVE - t.translate_z);
    let tilt = t.rotate_y.to_radians().cos().abs();
    let w = stage.width as f64 * CARD_WIDTH_FRAC * t.scale * f * tilt;
    let h = stage.height as f64 * CARD_HEIGHT_FRAC * t.scale * f;

    let cx = stage.x as f64 + stage.width as f64 / 2.0 + t.translate_x * f / cells.px_per_column;
    let cy = stage.y as f64 + stage.height as f64 / 2.0 + t.translate_y * f / cells.px_per_row;

    let left = (cx - w / 2.0).round();
    let top = (cy - h / 2.0).round();
    let right = (cx + w / 2.0).round();
    let bottom = (cy + h / 2.0).round();

    let x0 = left.max(stage.x as f64);
    let y0 = top.max(stage.y as f64);
    let x1 = right.min(stage.right() as f64);
    let y1 = bottom.min(stage.bottom() as f64);
    if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

pub struct StageWidget<'a> {
    pub cards: &'a CardCollection,
    pub scene: &'a Scene,
    pub previews: &'a mut PreviewCache,
    pub cells: CellMetrics,
}

impl<'a> StageWidget<'a> {
    /// Draw back to front and return each visible card's rect, topmost
    /// last.
    pub fn render_and_hit(mut self, stage: Rect, buf: &mut Buffer) -> Vec<(CardId, Rect)> {
        let cards = self.cards;
        let mut visible: Vec<(CardId, CardTransform, Rect)> = self
            .scene
            .cards()
            .filter_map(|(id, visual)| {
                let t = *visual.shown()?;
                let rect = project(&t, stage, self.cells)?;
                Some((id, t, rect))
            })
            .collect();

        // Farthest first; the active card wins ties by drawing last.
        visible.sort_by(|a, b| {
            a.1.translate_z
                .total_cmp(&b.1.translate_z)
                .then_with(|| self.is_active(a.0).cmp(&self.is_active(b.0)))
        });

        let dimmed = self.scene.detail_mode();
        for &(id, t, rect) in &visible {
            if let Some(card) = cards.get(id) {
                self.draw_card(card, &t, rect, dimmed, buf);
            }
        }

        visible.into_iter().map(|(id, _, rect)| (id, rect)).collect()
    }

    fn is_active(&self, id: CardId) -> bool {
        self.scene.card(id).is_some_and(|c| c.active)
    }

    fn draw_card(&mut self, card: &Card, t: &CardTransform, rect: Rect, dimmed: bool, buf: &mut Buffer) {
        let active = self.is_active(card.id);
        let opacity = if dimmed { t.opacity * 0.35 } else { t.opacity };

        Clear.render(rect, buf);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style(active, opacity));
        if t.blur > 0.0 {
            block = block.style(ratatui::style::Style::default().add_modifier(Modifier::DIM));
        }
        let inner = block.inner(rect);
        block.render(rect, buf);

        if t.blur >= TEXT_BLUR_LIMIT || inner.width < 4 || inner.height < 3 {
            return;
        }

        // Text overlay takes the bottom rows; the preview fills the rest.
        let overlay_rows: u16 = if active { 4 } else { 3 };
        let overlay_h = overlay_rows.min(inner.height);
        let preview_area = Rect::new(inner.x, inner.y, inner.width, inner.height - overlay_h);
        let overlay_area = Rect::new(inner.x, inner.y + preview_area.height, inner.width, overlay_h);

        self.draw_preview(card, preview_area, opacity, buf);

        let mut lines = vec![
            Line::from(Span::styled(card.tag.clone(), Theme::card_tag_style(opacity))),
            Line::from(Span::styled(card.title.clone(), Theme::card_title_style(opacity))),
        ];
        if active {
            lines.push(Line::from(Span::styled(
                "View Case Study →",
                Theme::muted_style(opacity),
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(overlay_area, buf);
    }

    fn draw_preview(&mut self, card: &Card, area: Rect, opacity: f64, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let reference = card.preview_image_ref.as_str();
        if let Some(fitted) = self.previews.fitted(reference, area.width, area.height) {
            preview::render_halfblocks(fitted, area, opacity, buf);
        } else if !card.preview_image_ref.is_empty() {
            let label = if preview::is_remote(&card.preview_image_ref) {
                format!("⧉ {}", host_of(&card.preview_image_ref))
            } else {
                format!("⧉ {}", card.preview_image_ref)
            };
            let y = area.y + area.height / 2;
            Paragraph::new(Line::from(Span::styled(label, Theme::muted_style(opacity))))
                .centered()
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

/// `https://images.example.com/a.jpg?w=1` → `images.example.com`.
fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}
