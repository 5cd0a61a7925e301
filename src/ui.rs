//! Ratatui front-end. The app state machine lives in `app`, the modal form
//! state in `forms`, per-screen cursors in `screens`, and the terminal setup
//! and event loop in `terminal`.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
