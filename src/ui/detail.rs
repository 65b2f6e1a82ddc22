//! The back face of an opened card.
//!
//! Renders the card's detail sections as a scrollable pane centred over the
//! stage, with a close button on the top-right corner of the border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::theme::Theme;
use crate::core::card::{Card, SectionKind};

/// Lines for every detail section, in order.  The first section is
/// followed by the time-span caption.
pub fn render_sections(card: &Card) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, section) in card.detail_sections.iter().enumerate() {
        match section.kind {
            SectionKind::Title => {
                lines.push(Line::from(Span::styled(
                    section.value.clone(),
                    Theme::section_title_style(),
                )));
            }
            SectionKind::Text => {
                lines.push(Line::from(Span::styled(
                    section.value.clone(),
                    Theme::section_text_style(),
                )));
            }
            SectionKind::Image => {
                lines.push(Line::from(Span::styled(
                    format!("▣ {}", section.value),
                    Theme::section_image_style(),
                )));
            }
        }
        if idx == 0 {
            lines.push(Line::from(Span::styled(
                card.time_span.clone(),
                Theme::muted_style(1.0),
            )));
        }
        lines.push(Line::raw(""));
    }
    lines
}

pub struct DetailWidget<'a> {
    pub card: &'a Card,
    /// Rows scrolled off the top of the content.
    pub scroll: u16,
}

/// Clickable regions returned after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailHitZones {
    pub pane: Rect,
    pub close_rect: Rect,
}

impl<'a> DetailWidget<'a> {
    /// Centred, 80% of the stage.
    pub fn pane_area(stage: Rect) -> Rect {
        let margin_x = (stage.width as f32 * 0.1).round() as u16;
        let margin_y = (stage.height as f32 * 0.1).round() as u16;
        Rect::new(
            stage.x + margin_x,
            stage.y + margin_y,
            stage.width.saturating_sub(margin_x * 2).max(20).min(stage.width),
            stage.height.saturating_sub(margin_y * 2).max(8).min(stage.height),
        )
    }

    pub fn render_and_hit(self, stage: Rect, buf: &mut Buffer) -> DetailHitZones {
        let area = Self::pane_area(stage);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::card_border_style(true, 1.0))
            .title(Span::styled(
                format!(" {} ", self.card.title),
                Theme::card_title_style(1.0),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let close_rect = Rect::new(area.x + area.width.saturating_sub(5), area.y, 3, 1);
        Paragraph::new(Line::from(Span::styled("[X]", Theme::close_button_style())))
            .render(close_rect, buf);

        let content = Rect::new(
            inner.x.saturating_add(2),
            inner.y.saturating_add(1),
            inner.width.saturating_sub(4),
            inner.height.saturating_sub(1),
        );
        let mut lines = vec![
            Line::from(Span::styled(
                self.card.tag.clone(),
                Theme::card_tag_style(1.0),
            )),
            Line::raw(""),
        ];
        lines.extend(render_sections(self.card));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(content, buf);

        DetailHitZones {
            pane: area,
            close_rect,
        }
    }
}
