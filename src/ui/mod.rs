//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* page document and turns it into cells on the
//! terminal.  No file I/O happens here.

pub mod button;
pub mod element;
pub mod halfblocks;
pub mod hero;
pub mod layout;
pub mod orbs;
pub mod popup;
pub mod scroller;
pub mod theme;
