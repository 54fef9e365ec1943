//! Session layer: the per-record edit buffer and the controller state machine
//! that mediates between it and the store.

mod buffer;
mod controller;

pub use buffer::EditBuffer;
pub use controller::{
    CloseOutcome, NavOutcome, NavigationPolicy, PromptChoice, PromptResolution, SessionController,
    SessionState,
};
