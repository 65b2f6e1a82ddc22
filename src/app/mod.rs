//! Application orchestration — the carousel controller, its scheduler, the
//! event loop plumbing and input handling.

pub mod controller;
pub mod event;
pub mod handler;
pub mod presenter;
pub mod scheduler;
pub mod state;
