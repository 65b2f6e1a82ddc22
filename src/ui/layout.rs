//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Stage for the cards, an indicator rail on the right, and a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub stage_area: Rect,
    pub indicator_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // stage + indicator
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),   // stage
                Constraint::Length(3), // indicator rail
            ])
            .split(rows[0]);

        Self {
            stage_area: cols[0],
            indicator_area: cols[1],
            status_area: rows[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_terminal() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.status_area, Rect::new(0, 39, 120, 1));
        assert_eq!(layout.indicator_area, Rect::new(117, 0, 3, 39));
        assert_eq!(layout.stage_area, Rect::new(0, 0, 117, 39));
    }
}
