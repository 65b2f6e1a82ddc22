//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Backdrop the cards fade into.
    pub const BACKDROP: (u8, u8, u8) = (12, 12, 14);
    /// Card text at full opacity.
    pub const CARD_TEXT: (u8, u8, u8) = (245, 245, 247);
    /// Secondary copy (time span, hints).
    pub const MUTED: (u8, u8, u8) = (134, 134, 139);
    /// Border of the active card.
    pub const ACCENT: (u8, u8, u8) = (41, 151, 255);
    pub const BORDER: (u8, u8, u8) = (72, 72, 78);

    /// Blend `rgb` toward the backdrop; `opacity` 1.0 leaves it unchanged.
    pub fn fade(rgb: (u8, u8, u8), opacity: f64) -> Color {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |c: u8, b: u8| (b as f64 + (c as f64 - b as f64) * a).round() as u8;
        let (br, bg, bb) = Self::BACKDROP;
        Color::Rgb(mix(rgb.0, br), mix(rgb.1, bg), mix(rgb.2, bb))
    }

    // ── cards ──────────────────────────────────────────────────
    pub fn card_tag_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::fade(Self::ACCENT, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_title_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::fade(Self::CARD_TEXT, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(opacity: f64) -> Style {
        Style::default().fg(Self::fade(Self::MUTED, opacity))
    }

    pub fn card_border_style(active: bool, opacity: f64) -> Style {
        let rgb = if active { Self::ACCENT } else { Self::BORDER };
        Style::default().fg(Self::fade(rgb, opacity))
    }

    // ── detail pane ────────────────────────────────────────────
    pub fn section_title_style() -> Style {
        Style::default()
            .fg(Self::fade(Self::CARD_TEXT, 1.0))
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_text_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn section_image_style() -> Style {
        Style::default()
            .fg(Self::fade(Self::MUTED, 1.0))
            .add_modifier(Modifier::ITALIC)
    }

    pub fn close_button_style() -> Style {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Self::fade(Self::CARD_TEXT, 1.0))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
