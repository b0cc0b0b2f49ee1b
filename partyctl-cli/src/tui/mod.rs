//! Party TUI
//!
//! - Left pane: numbered party list
//! - Right pane: selected member with its name input and move checklist
//! - Name and move edits can be parked (Tab) and resumed independently

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
