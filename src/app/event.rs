//! Terminal event abstraction.
//!
//! A blocking reader forwards crossterm input over a channel and interleaves
//! a steady `Frame` tick, so the main loop can advance animations and
//! deferred controller work at a fixed rate while staying non-blocking.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One animation frame has elapsed.
    Frame,
}

impl AppEvent {
    /// Keep the crossterm events the app reacts to.
    fn from_terminal(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawn the reader and return the receiving end of its channel.  A
/// `Frame` is sent every `frame` even while input keeps arriving.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut next_frame = Instant::now() + frame;
        loop {
            let wait = next_frame.saturating_duration_since(Instant::now());
            match event::poll(wait) {
                Ok(true) => {
                    let forwarded = match event::read() {
                        Ok(ev) => AppEvent::from_terminal(ev),
                        Err(e) => {
                            tracing::warn!("terminal read failed: {e}");
                            None
                        }
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("terminal poll failed: {e}");
                    break;
                }
            }

            let now = Instant::now();
            if now >= next_frame {
                // After a stall, resume the cadence instead of bursting.
                next_frame = (next_frame + frame).max(now);
                if tx.send(AppEvent::Frame).is_err() {
                    break;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn only_handled_terminal_events_are_forwarded() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(AppEvent::from_terminal(CtEvent::Key(key)), Some(AppEvent::Key(key)));
        assert_eq!(
            AppEvent::from_terminal(CtEvent::Resize(80, 24)),
            Some(AppEvent::Resize(80, 24))
        );
        assert_eq!(AppEvent::from_terminal(CtEvent::FocusGained), None);
    }
}
