//! Rendering layer. Everything in here is presentation only; record state
//! lives in the session controller and the TUI just drives its operations.

mod app;
mod helpers;
mod terminal;
mod theme;

pub use app::App;
pub use terminal::run_app;
