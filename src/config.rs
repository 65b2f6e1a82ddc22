//! User configuration — keybindings, input scaling and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/portfolio-deck/config.toml` (default
//! `~/.config/portfolio-deck/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextCard,
    PrevCard,
    OpenCard,
    CloseDetail,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when saving).
    pub const ALL: &[Action] = &[
        Action::NextCard,
        Action::PrevCard,
        Action::OpenCard,
        Action::CloseDetail,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::NextCard => "next_card",
            Action::PrevCard => "prev_card",
            Action::OpenCard => "open_card",
            Action::CloseDetail => "close_detail",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys shared by the config format and the status bar:
/// `(code, config name, short display)`.
const NAMED_KEYS: &[(KeyCode, &str, &str)] = &[
    (KeyCode::Char(' '), "Space", "Space"),
    (KeyCode::Up, "Up", "↑"),
    (KeyCode::Down, "Down", "↓"),
    (KeyCode::Left, "Left", "←"),
    (KeyCode::Right, "Right", "→"),
    (KeyCode::Enter, "Enter", "Enter"),
    (KeyCode::Esc, "Esc", "Esc"),
    (KeyCode::Tab, "Tab", "Tab"),
    (KeyCode::Backspace, "Backspace", "Bksp"),
    (KeyCode::Home, "Home", "Home"),
    (KeyCode::End, "End", "End"),
    (KeyCode::PageUp, "PageUp", "PgUp"),
    (KeyCode::PageDown, "PageDown", "PgDn"),
];

/// A single key binding: key code plus modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        self.render(|&(_, _, short)| short)
    }

    /// Config-file form (e.g. `"Down"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        self.render(|&(_, name, _)| name)
    }

    fn render(&self, pick: impl Fn(&(KeyCode, &'static str, &'static str)) -> &'static str) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        match NAMED_KEYS.iter().find(|(code, _, _)| *code == self.code) {
            Some(entry) => s.push_str(pick(entry)),
            None => match self.code {
                KeyCode::Char(c) => s.push(c),
                KeyCode::F(n) => s.push_str(&format!("F{n}")),
                other => s.push_str(&format!("{other:?}")),
            },
        }
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Down"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key_part.to_lowercase();
        let code = match lower.as_str() {
            "return" => KeyCode::Enter,
            "escape" => KeyCode::Esc,
            s if s.starts_with('f') && s.len() > 1 && s[1..].chars().all(|c| c.is_ascii_digit()) => {
                KeyCode::F(s[1..].parse().ok()?)
            }
            _ => {
                if let Some((code, _, _)) = NAMED_KEYS
                    .iter()
                    .find(|(_, name, _)| name.eq_ignore_ascii_case(key_part))
                {
                    *code
                } else {
                    let mut chars = key_part.chars();
                    let c = chars.next()?;
                    if chars.next().is_some() {
                        return None;
                    }
                    KeyCode::Char(c)
                }
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and input scaling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Pixel width of one terminal column, for viewport breakpoints.
    pub px_per_column: u16,
    /// Pixel height of one terminal row, for swipe distances.
    pub px_per_row: u16,
    /// Wheel delta reported per mouse scroll notch.
    pub wheel_notch_px: u16,
    /// Fraction of the remaining distance covered per frame when easing
    /// cards toward their new pose.
    pub ease_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            px_per_column: 8,
            px_per_row: 16,
            wheel_notch_px: 100,
            ease_speed: 0.3,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(
            NextCard,
            vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n), KeyBind::new(PageDown, n)],
        );
        m.insert(
            PrevCard,
            vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n), KeyBind::new(PageUp, n)],
        );
        m.insert(OpenCard, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(CloseDetail, vec![KeyBind::new(Esc, n), KeyBind::new(Backspace, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self, detail_open: bool) -> String {
        if detail_open {
            format!(
                "{}: close | {}: quit",
                self.short_binding(Action::CloseDetail),
                self.short_binding(Action::Quit),
            )
        } else {
            format!(
                "{}/{}: browse | {}: open | 1-9: jump | {}: quit",
                self.short_binding(Action::NextCard),
                self.short_binding(Action::PrevCard),
                self.short_binding(Action::OpenCard),
                self.short_binding(Action::Quit),
            )
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                tracing::debug!(path = %path.display(), "loaded config");
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk, returning where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "px_per_column" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.px_per_column = v.clamp(1, 64);
                    }
                    continue;
                }
                "px_per_row" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.px_per_row = v.clamp(1, 128);
                    }
                    continue;
                }
                "wheel_notch_px" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.wheel_notch_px = v.clamp(1, 1000);
                    }
                    continue;
                }
                "ease_speed" => {
                    // `nan` and `inf` parse as floats but would poison every pose.
                    match value.parse::<f64>() {
                        Ok(v) if v.is_finite() => config.ease_speed = v.clamp(0.05, 1.0),
                        _ => {}
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# portfolio-deck configuration".to_string(),
            String::new(),
            "# Input scaling (terminal cells -> pixels)".to_string(),
            format!("px_per_column = {}", self.px_per_column),
            format!("px_per_row = {}", self.px_per_row),
            format!("wheel_notch_px = {}", self.wheel_notch_px),
            format!("ease_speed = {}", self.ease_speed),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/portfolio-deck/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("portfolio-deck").join("config.toml")
}
