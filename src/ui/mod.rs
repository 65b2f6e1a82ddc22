//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer turns the scene the controller presents into cells on the
//! terminal.  The only I/O here is decoding local preview images.

pub mod detail;
pub mod easing;
pub mod indicator;
pub mod layout;
pub mod preview;
pub mod scene;
pub mod stage;
pub mod theme;
