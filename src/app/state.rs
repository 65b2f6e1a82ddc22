//! Central application state.
//!
//! Everything the event loop mutates lives here: the controller (which owns
//! the scene it presents into), the user config, and the hit zones recorded
//! by the last draw so mouse clicks can be resolved against what is on
//! screen.

use std::time::Instant;

use ratatui::layout::Rect;

use super::controller::PortfolioApp;
use crate::config::AppConfig;
use crate::core::card::{CardCollection, CardId};
use crate::core::transform::Viewport;
use crate::ui::preview::PreviewCache;
use crate::ui::scene::Scene;
use crate::ui::stage::CellMetrics;

/// Clickable regions from the most recent frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitZones {
    /// Visible cards, topmost last.
    pub cards: Vec<(CardId, Rect)>,
    pub dots: Vec<(CardId, Rect)>,
    /// Close button of the open detail pane.
    pub close: Option<Rect>,
}

/// A left button that went down and has not come back up yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPress {
    pub column: u16,
    pub row: u16,
    /// Set once the pointer leaves the cell it was pressed on.
    pub dragged: bool,
}

/// Top-level application state.
pub struct AppState {
    pub app: PortfolioApp<Scene>,
    /// User-configurable keybindings and input scaling.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Full terminal area, kept in sync with resize events.
    pub terminal_area: Rect,
    pub hit: HitZones,
    pub pointer: Option<PointerPress>,
    /// Rows scrolled in the detail pane.
    pub detail_scroll: u16,
    /// Decoded local preview images.
    pub previews: PreviewCache,
    started: Instant,
}

impl AppState {
    pub fn new(cards: CardCollection, config: AppConfig, terminal_area: Rect) -> Self {
        let viewport = Viewport::new(viewport_width(terminal_area.width, &config));
        let scene = Scene::new(config.ease_speed);
        Self {
            app: PortfolioApp::new(cards, viewport, scene),
            config,
            should_quit: false,
            terminal_area,
            hit: HitZones::default(),
            pointer: None,
            detail_scroll: 0,
            previews: PreviewCache::new(),
            started: Instant::now(),
        }
    }

    /// Milliseconds since startup; the controller's clock.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            px_per_column: f64::from(self.config.px_per_column),
            px_per_row: f64::from(self.config.px_per_row),
        }
    }

    /// Terminal row expressed in the pixel space gestures are measured in.
    pub fn row_px(&self, row: u16) -> f64 {
        f64::from(row) * f64::from(self.config.px_per_row)
    }
}

/// Viewport width in pixels for a terminal `columns` wide.
pub fn viewport_width(columns: u16, config: &AppConfig) -> f64 {
    f64::from(columns) * f64::from(config.px_per_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::builtin_descriptors;

    #[test]
    fn viewport_follows_terminal_columns() {
        let config = AppConfig::default();
        assert_eq!(viewport_width(128, &config), 1024.0);
        assert!(Viewport::new(viewport_width(96, &config)).is_mobile());

        let state = AppState::new(
            CardCollection::build(builtin_descriptors()),
            config,
            Rect::new(0, 0, 128, 40),
        );
        assert_eq!(state.app.viewport().width, 1024.0);
        assert_eq!(state.row_px(3), 48.0);
    }
}
