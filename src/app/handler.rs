//! Input handling — maps key/mouse events onto controller operations.
//!
//! Terminal input is translated into the carousel's own vocabulary: scroll
//! notches become wheel deltas, left-button drags become touch gestures and
//! plain clicks are resolved against the hit zones of the last frame.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::controller::Phase;
use super::state::{viewport_width, AppState, PointerPress};
use crate::config::Action;
use crate::ui::detail;

/// Detail-pane rows moved per scroll notch.
const DETAIL_SCROLL_STEP: u16 = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now_ms: u64) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, whatever is bound.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Number keys jump like the indicator dots.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            let card = c as usize - '1' as usize;
            state.app.set_selected_by_dot(card);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let detail_open = state.app.phase() == Phase::DetailOpen;

    match action {
        Action::Quit => state.should_quit = true,
        Action::NextCard if detail_open => scroll_detail(state, 1),
        Action::PrevCard if detail_open => scroll_detail(state, -1),
        Action::NextCard => {
            state.app.navigate(1, now_ms);
        }
        Action::PrevCard => {
            state.app.navigate(-1, now_ms);
        }
        Action::OpenCard => open_selected(state),
        Action::CloseDetail => {
            state.app.close_detail();
        }
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now_ms: u64) {
    match mouse.kind {
        MouseEventKind::ScrollDown => wheel(state, 1, now_ms),
        MouseEventKind::ScrollUp => wheel(state, -1, now_ms),
        MouseEventKind::Down(MouseButton::Left) => {
            state.pointer = Some(PointerPress {
                column: mouse.column,
                row: mouse.row,
                dragged: false,
            });
            let y = state.row_px(mouse.row);
            state.app.on_touch_start(y);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(press) = state.pointer.as_mut() {
                if press.column != mouse.column || press.row != mouse.row {
                    press.dragged = true;
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(press) = state.pointer.take() else {
                return;
            };
            let y = state.row_px(mouse.row);
            if state.app.on_touch_end(y, now_ms) {
                return;
            }
            let moved = press.dragged || press.column != mouse.column || press.row != mouse.row;
            if !moved {
                click(state, mouse.column, mouse.row);
            }
        }
        _ => {}
    }
}

/// Track a new terminal size and relayout for the new viewport.
pub fn handle_resize(state: &mut AppState, columns: u16, rows: u16) {
    state.terminal_area = Rect::new(0, 0, columns, rows);
    let width = viewport_width(columns, &state.config);
    let relaid = state.app.on_resize(width);
    let viewport = state.app.viewport();
    tracing::debug!(width = viewport.width, mobile = viewport.is_mobile(), relaid, "terminal resized");
}

fn wheel(state: &mut AppState, sign: i32, now_ms: u64) {
    if state.app.phase() == Phase::DetailOpen {
        scroll_detail(state, sign * i32::from(DETAIL_SCROLL_STEP));
        return;
    }
    let delta_y = f64::from(sign) * f64::from(state.config.wheel_notch_px);
    state.app.on_wheel(delta_y, now_ms);
}

/// Resolve a click: the close button first, then the dots, then whichever
/// card is on top at that cell.
fn click(state: &mut AppState, column: u16, row: u16) {
    if let Some(close) = state.hit.close {
        if point_in_rect(close, column, row) {
            state.app.close_detail();
            return;
        }
    }

    let dot = state
        .hit
        .dots
        .iter()
        .find(|(_, rect)| point_in_rect(*rect, column, row))
        .map(|(id, _)| *id);
    if let Some(card) = dot {
        state.app.set_selected_by_dot(card);
        return;
    }

    let topmost = state
        .hit
        .cards
        .iter()
        .rev()
        .find(|(_, rect)| point_in_rect(*rect, column, row))
        .map(|(id, _)| *id);
    if let Some(card) = topmost {
        if state.app.activate_card(card) {
            state.detail_scroll = 0;
        }
    }
}

fn open_selected(state: &mut AppState) {
    let card = state.app.selected();
    if state.app.activate_card(card) {
        state.detail_scroll = 0;
    }
}

fn scroll_detail(state: &mut AppState, delta: i32) {
    let limit = state
        .app
        .cards()
        .get(state.app.selected())
        .map_or(0, |card| detail::render_sections(card).len() as i32);
    let next = (i32::from(state.detail_scroll) + delta).clamp(0, limit);
    state.detail_scroll = next as u16;
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::card::CardCollection;
    use crate::core::data::builtin_descriptors;

    fn state() -> AppState {
        AppState::new(
            CardCollection::build(builtin_descriptors()),
            AppConfig::default(),
            Rect::new(0, 0, 128, 40),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn tap(state: &mut AppState, column: u16, row: u16, now_ms: u64) {
        handle_mouse(state, mouse(MouseEventKind::Down(MouseButton::Left), column, row), now_ms);
        handle_mouse(state, mouse(MouseEventKind::Up(MouseButton::Left), column, row), now_ms);
    }

    #[test]
    fn keys_navigate_with_cooldown() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Down), 0);
        assert_eq!(s.app.selected(), 1);

        handle_key(&mut s, key(KeyCode::Down), 10);
        assert_eq!(s.app.selected(), 1);

        s.app.advance(1000);
        handle_key(&mut s, key(KeyCode::Char('k')), 1000);
        assert_eq!(s.app.selected(), 0);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut s = state();
        let mut release = key(KeyCode::Down);
        release.kind = KeyEventKind::Release;
        handle_key(&mut s, release, 0);
        assert_eq!(s.app.selected(), 0);
    }

    #[test]
    fn number_keys_jump_without_cooldown() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('3')), 0);
        assert_eq!(s.app.selected(), 2);
        assert_eq!(s.app.phase(), Phase::Idle);

        handle_key(&mut s, key(KeyCode::Char('9')), 0);
        assert_eq!(s.app.selected(), 2);
    }

    #[test]
    fn open_then_close_with_keys() {
        let mut s = state();
        s.detail_scroll = 4;
        handle_key(&mut s, key(KeyCode::Enter), 0);
        assert_eq!(s.app.phase(), Phase::DetailOpen);
        assert_eq!(s.detail_scroll, 0);
        assert_eq!(s.app.presenter().open_card(), Some(0));

        // Browsing keys scroll the pane instead of the carousel.
        handle_key(&mut s, key(KeyCode::Down), 0);
        assert_eq!(s.app.selected(), 0);
        assert_eq!(s.detail_scroll, 1);
        handle_key(&mut s, key(KeyCode::Up), 0);
        handle_key(&mut s, key(KeyCode::Up), 0);
        assert_eq!(s.detail_scroll, 0);

        handle_key(&mut s, key(KeyCode::Esc), 0);
        assert_eq!(s.app.phase(), Phase::Idle);
        assert_eq!(s.app.presenter().open_card(), None);
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('q')), 0);
        assert!(s.should_quit);

        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 0);
        assert!(s.should_quit);
    }

    #[test]
    fn scroll_notches_become_wheel_steps() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 5, 5), 0);
        assert_eq!(s.app.selected(), 1);

        s.app.advance(1000);
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollUp, 5, 5), 1000);
        assert_eq!(s.app.selected(), 0);
    }

    #[test]
    fn notch_below_threshold_is_noise() {
        let mut s = state();
        s.config.wheel_notch_px = 20;
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 5, 5), 0);
        assert_eq!(s.app.selected(), 0);
    }

    #[test]
    fn upward_drag_swipes_forward() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 60, 30), 0);
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 60, 25), 0);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 60, 20), 0);
        assert_eq!(s.app.selected(), 1);
        assert_eq!(s.app.phase(), Phase::Transitioning);
        assert!(s.pointer.is_none());
    }

    #[test]
    fn short_drag_is_neither_swipe_nor_click() {
        let mut s = state();
        s.hit.cards = vec![(0, Rect::new(0, 0, 128, 39))];
        // 2 rows = 32px, under the swipe threshold.
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 60, 20), 0);
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 60, 18), 0);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 60, 18), 0);
        assert_eq!(s.app.selected(), 0);
        assert_eq!(s.app.phase(), Phase::Idle);
    }

    #[test]
    fn click_on_active_card_opens_it() {
        let mut s = state();
        s.hit.cards = vec![(1, Rect::new(70, 10, 20, 10)), (0, Rect::new(30, 5, 60, 28))];
        tap(&mut s, 75, 12, 0);
        assert_eq!(s.app.phase(), Phase::DetailOpen);
    }

    #[test]
    fn click_on_covered_card_hits_the_top_one_only() {
        let mut s = state();
        // Card 1 drawn last, so it is on top, but it is not selected.
        s.hit.cards = vec![(0, Rect::new(30, 5, 60, 28)), (1, Rect::new(70, 10, 20, 10))];
        tap(&mut s, 75, 12, 0);
        assert_eq!(s.app.phase(), Phase::Idle);
        assert_eq!(s.app.selected(), 0);
    }

    #[test]
    fn dot_click_selects_card() {
        let mut s = state();
        s.hit.dots = vec![(0, Rect::new(125, 16, 3, 1)), (3, Rect::new(125, 22, 3, 1))];
        tap(&mut s, 126, 22, 0);
        assert_eq!(s.app.selected(), 3);
        assert_eq!(s.app.phase(), Phase::Idle);
    }

    #[test]
    fn close_button_closes_detail() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Enter), 0);
        s.hit.close = Some(Rect::new(100, 3, 3, 1));

        tap(&mut s, 50, 20, 0);
        assert_eq!(s.app.phase(), Phase::DetailOpen);

        tap(&mut s, 101, 3, 0);
        assert_eq!(s.app.phase(), Phase::Idle);
    }

    #[test]
    fn wheel_scrolls_detail_instead_of_navigating() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Enter), 0);
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 5, 5), 0);
        assert_eq!(s.app.selected(), 0);
        assert_eq!(s.detail_scroll, DETAIL_SCROLL_STEP);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut s = state();
        handle_resize(&mut s, 90, 30);
        assert_eq!(s.terminal_area, Rect::new(0, 0, 90, 30));
        assert_eq!(s.app.viewport().width, 720.0);
        assert!(s.app.viewport().is_mobile());
    }
}
