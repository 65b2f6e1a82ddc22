//! A terminal portfolio showcase: project cards on a 3D carousel.
//!
//! Run the binary to browse the built-in portfolio, or pass `--projects`
//! with a JSON descriptor file.  `--print-layout <WIDTH>` prints the card
//! transforms for a viewport width without starting the TUI.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Paragraph, Widget},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, HitZones},
};
use crate::core::card::CardCollection;
use crate::core::data;
use crate::core::transform::{layout, Viewport};
use crate::ui::{
    detail::DetailWidget, indicator::IndicatorWidget, layout::AppLayout, preview,
    stage::StageWidget, theme::Theme,
};

/// Animation frame interval.
const FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "3D carousel portfolio for the terminal")]
struct Cli {
    /// JSON file with the projects to show (defaults to the built-in set).
    #[arg(long)]
    projects: Option<PathBuf>,

    /// Pixel width of one terminal column (overrides the config file).
    #[arg(long)]
    px_per_column: Option<u16>,

    /// Print every card's transform for a viewport this many pixels wide
    /// and exit.
    #[arg(long, value_name = "WIDTH")]
    print_layout: Option<f64>,

    /// Selected card used by `--print-layout`.
    #[arg(long, default_value_t = 0)]
    selected: usize,

    /// Write the current configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── rendering ────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let regions = AppLayout::from_area(area);
    let cells = state.cell_metrics();
    let buf = frame.buffer_mut();

    let cards = state.app.cards();
    let scene = state.app.presenter();
    let view = state.app.view_state();

    let card_hits = StageWidget {
        cards,
        scene,
        previews: &mut state.previews,
        cells,
    }
    .render_and_hit(regions.stage_area, buf);

    let dot_hits = IndicatorWidget {
        scene,
        count: cards.len(),
    }
    .render_and_hit(regions.indicator_area, buf);

    let close = scene
        .open_card()
        .and_then(|id| cards.get(id))
        .map(|card| {
            DetailWidget {
                card,
                scroll: state.detail_scroll,
            }
            .render_and_hit(regions.stage_area, buf)
            .close_rect
        });

    let hint = state.config.status_bar_hint(view.is_detail_open);
    let marker = if view.is_transitioning { '◇' } else { '◆' };
    let status = match cards.get(view.selected_index) {
        Some(card) => format!(
            " {marker} {}/{}  {}  │  {hint}",
            card.id + 1,
            cards.len(),
            card.title
        ),
        None => format!(" no projects  │  {hint}"),
    };
    Paragraph::new(status)
        .style(Theme::status_bar_style())
        .render(regions.status_area, buf);

    state.hit = HitZones {
        cards: card_hits,
        dots: dot_hits,
        close,
    };
}

/// `--print-layout`: one line per card, no terminal setup.
fn layout_report(cards: &CardCollection, width: f64, selected: usize) -> Result<Vec<String>> {
    if !cards.is_empty() && selected >= cards.len() {
        bail!(
            "--selected {selected} is out of range ({} projects)",
            cards.len()
        );
    }
    let viewport = Viewport::new(width);
    let mode = if viewport.is_mobile() { "mobile" } else { "desktop" };
    let mut lines = vec![format!("viewport {width}px ({mode}), selected {selected}")];
    for (card, t) in cards.iter().zip(layout(cards.len(), selected, viewport)) {
        lines.push(format!(
            "{:>3}  opacity {:.2}  blur {:>4.1}  x {:>8.2}  y {:>4.1}  z {:>7.1}  rot {:>5.1}  scale {:.2}  {}",
            card.id,
            t.opacity,
            t.blur,
            t.translate_x,
            t.translate_y,
            t.translate_z,
            t.rotate_y,
            t.scale,
            card.title,
        ));
    }
    Ok(lines)
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut user_config = config::AppConfig::load();
    if let Some(px) = cli.px_per_column {
        user_config.px_per_column = px.clamp(1, 64);
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let descriptors = match &cli.projects {
        Some(path) => data::load_descriptors(path)
            .with_context(|| format!("loading projects from {}", path.display()))?,
        None => data::builtin_descriptors(),
    };
    let cards = CardCollection::build(descriptors);
    tracing::debug!(count = cards.len(), "cards built");

    // ── layout dump mode ──────────────────────────────────────
    if let Some(width) = cli.print_layout {
        for line in layout_report(&cards, width, cli.selected)? {
            println!("{line}");
        }
        return Ok(());
    }

    let (columns, rows) = crossterm::terminal::size()?;
    let mut state = AppState::new(cards, user_config, Rect::new(0, 0, columns, rows));
    state.previews = preview::load_previews(state.app.cards());
    tracing::debug!(count = state.previews.len(), "previews decoded");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(FRAME);
    let mut loaded = false;
    let mut dirty = true;

    // ── event loop ────────────────────────────────────────────
    loop {
        if dirty {
            terminal.draw(|frame| draw(frame, &mut state))?;
            dirty = false;
        }

        // The first frame is on screen: one extra layout pass.
        if !loaded {
            state.app.on_load();
            loaded = true;
            dirty = true;
        }

        tokio::select! {
            Some(event) = events.recv() => {
                let now = state.now_ms();
                let redraw = match event {
                    AppEvent::Key(k) => {
                        handler::handle_key(&mut state, k, now);
                        true
                    }
                    AppEvent::Mouse(m) => {
                        handler::handle_mouse(&mut state, m, now);
                        true
                    }
                    AppEvent::Resize(w, h) => {
                        handler::handle_resize(&mut state, w, h);
                        true
                    }
                    AppEvent::Frame => {
                        let before = state.app.view_state();
                        let was_animating = state.app.presenter().is_animating();
                        state.app.advance(now);
                        state.app.presenter_mut().tick();
                        // Idle frames with nothing easing skip the redraw.
                        was_animating
                            || state.app.presenter().is_animating()
                            || state.app.view_state() != before
                    }
                };
                dirty |= redraw;
            }
            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> CardCollection {
        CardCollection::build(data::builtin_descriptors())
    }

    #[test]
    fn layout_report_lists_every_card() {
        let cards = cards();
        let lines = layout_report(&cards, 1024.0, 1).unwrap();
        assert_eq!(lines.len(), cards.len() + 1);
        assert!(lines[0].contains("desktop"));
    }

    #[test]
    fn selection_past_the_last_card_is_rejected() {
        let cards = cards();
        let err = layout_report(&cards, 1024.0, cards.len()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(layout_report(&cards, 500.0, cards.len() - 1).is_ok());
    }
}
