//! The carousel controller — selection, cooldown and detail mode.
//!
//! [`PortfolioApp`] owns the cards and the only mutable view state.  Every
//! accepted input recomputes the transform of every card (no diffing) and
//! pushes the result straight into the [`Presenter`].  Requests that are not
//! allowed in the current phase, or that point outside the collection, are
//! dropped silently.

use tracing::{debug, trace};

use super::presenter::Presenter;
use super::scheduler::{Deferred, Scheduler, TaskHandle};
use crate::core::card::{CardCollection, CardId};
use crate::core::gesture::{self, Step, TouchTracker};
use crate::core::transform::{card_transform, Viewport};

/// How long navigation stays locked after a step.
pub const SETTLE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A step was just taken; further steps are ignored until it settles.
    Transitioning,
    /// The selected card is flipped open; the carousel is frozen.
    DetailOpen,
}

/// Snapshot of the view state as booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub selected_index: CardId,
    pub is_transitioning: bool,
    pub is_detail_open: bool,
}

pub struct PortfolioApp<P: Presenter> {
    cards: CardCollection,
    selected: CardId,
    phase: Phase,
    viewport: Viewport,
    scheduler: Scheduler,
    /// Relayout deferred by `close_detail`, until it fires.
    deferred_relayout: Option<TaskHandle>,
    touch: TouchTracker,
    presenter: P,
}

impl<P: Presenter> PortfolioApp<P> {
    /// Build the controller and lay out every card once.
    pub fn new(cards: CardCollection, viewport: Viewport, presenter: P) -> Self {
        let mut app = Self {
            cards,
            selected: 0,
            phase: Phase::Idle,
            viewport,
            scheduler: Scheduler::new(),
            deferred_relayout: None,
            touch: TouchTracker::default(),
            presenter,
        };
        app.recompute();
        app
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn cards(&self) -> &CardCollection {
        &self.cards
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> CardId {
        self.selected
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            selected_index: self.selected,
            is_transitioning: self.phase == Phase::Transitioning,
            is_detail_open: self.phase == Phase::DetailOpen,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // ── transitions ────────────────────────────────────────────

    /// Step the selection by `direction` (±1).  Enters the cooldown and
    /// updates the layout right away; the settle task only unlocks input.
    pub fn navigate(&mut self, direction: i64, now_ms: u64) -> bool {
        if self.phase != Phase::Idle {
            trace!(phase = ?self.phase, direction, "navigate ignored");
            return false;
        }
        let target = self.selected as i64 + direction;
        if target < 0 || target >= self.cards.len() as i64 {
            trace!(target, "navigate out of range");
            return false;
        }

        self.selected = target as CardId;
        self.phase = Phase::Transitioning;
        self.relayout_now();
        self.scheduler
            .after(now_ms, SETTLE_DELAY_MS, Deferred::SettleTransition);
        debug!(selected = self.selected, "navigated");
        true
    }

    /// Flip the selected card open.  Clicks on any other card do nothing.
    pub fn activate_card(&mut self, card: CardId) -> bool {
        if self.phase != Phase::Idle || card != self.selected || self.cards.get(card).is_none() {
            return false;
        }
        self.phase = Phase::DetailOpen;
        self.presenter.set_detail_mode(true);
        self.presenter.set_card_open(card, true);
        debug!(card, "detail opened");
        true
    }

    /// Close the open card.  The layout is re-derived one frame later so
    /// the flip back can settle first.
    pub fn close_detail(&mut self) -> bool {
        if self.phase != Phase::DetailOpen {
            return false;
        }
        self.phase = Phase::Idle;
        self.presenter.set_detail_mode(false);
        self.presenter.set_card_open(self.selected, false);
        self.deferred_relayout = Some(self.scheduler.next_frame(Deferred::RecomputeLayout));
        debug!(card = self.selected, "detail closed");
        true
    }

    /// Jump straight to `card` from the indicator.  Not rate-limited.
    pub fn set_selected_by_dot(&mut self, card: CardId) -> bool {
        if self.phase != Phase::Idle || card == self.selected || card >= self.cards.len() {
            return false;
        }
        self.selected = card;
        self.relayout_now();
        debug!(selected = card, "jumped by dot");
        true
    }

    /// Track the new viewport; relayout unless a card is open.
    pub fn on_resize(&mut self, width: f64) -> bool {
        self.viewport = Viewport::new(width);
        if self.phase == Phase::DetailOpen {
            return false;
        }
        self.relayout_now();
        true
    }

    /// One extra layout pass once the host has finished loading.
    pub fn on_load(&mut self) {
        self.relayout_now();
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> bool {
        if self.phase == Phase::DetailOpen {
            return false;
        }
        match gesture::wheel_step(delta_y) {
            Some(step) => self.step(step, now_ms),
            None => false,
        }
    }

    pub fn on_touch_start(&mut self, y: f64) {
        self.touch.start(y);
    }

    pub fn on_touch_end(&mut self, y: f64, now_ms: u64) -> bool {
        let step = self.touch.end(y);
        if self.phase == Phase::DetailOpen {
            return false;
        }
        match step {
            Some(step) => self.step(step, now_ms),
            None => false,
        }
    }

    /// Start a frame: run every deferred task that is due.
    pub fn advance(&mut self, now_ms: u64) {
        for task in self.scheduler.advance(now_ms) {
            match task {
                Deferred::SettleTransition => {
                    if self.phase == Phase::Transitioning {
                        self.phase = Phase::Idle;
                        trace!("transition settled");
                    }
                }
                Deferred::RecomputeLayout => {
                    self.deferred_relayout = None;
                    self.recompute();
                }
            }
        }
    }

    fn step(&mut self, step: Step, now_ms: u64) -> bool {
        self.navigate(step.delta(), now_ms)
    }

    /// Relayout immediately.  A relayout still deferred from closing the
    /// detail would only repeat this one, so it is dropped.
    fn relayout_now(&mut self) {
        if let Some(handle) = self.deferred_relayout.take() {
            if self.scheduler.cancel(handle) {
                trace!("deferred relayout superseded");
            }
        }
        self.recompute();
    }

    /// Full relayout of every card for the current selection.
    fn recompute(&mut self) {
        let open = self.phase == Phase::DetailOpen;
        for card in self.cards.iter() {
            let i = card.id;
            let transform = card_transform(i, self.selected, self.viewport);
            let is_selected = i == self.selected;
            self.presenter.set_dot_active(i, is_selected);
            self.presenter.set_card_active(i, is_selected);
            self.presenter.set_card_open(i, open && is_selected);
            self.presenter.apply_transform(i, &transform);
        }
        trace!(selected = self.selected, width = self.viewport.width, "layout recomputed");
    }
}
