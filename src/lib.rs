//! Core library surface for the Case Reviewer TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` targets as well as the integration tests can reuse the same pieces:
//! the store owns the backing table, the session layer owns navigation and
//! edit buffering, and everything visual stays behind `ui`.

pub mod config;
pub mod docs;
pub mod errors;
pub mod models;
pub mod session;
pub mod sheets;
pub mod store;
pub mod ui;

/// The persistence entry point used by `main.rs` and the tests.
pub use store::RecordStore;

/// The session state machine and its navigation policy.
pub use session::{NavigationPolicy, SessionController};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
