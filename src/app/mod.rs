//! Application orchestration: state, the event loop's inputs, and
//! background logo decoding.

pub mod event;
pub mod handler;
pub mod loader;
pub mod state;
