//! Core page logic – the element tree, scroller population, interactions.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All page
//! logic goes through the [`view::View`] trait, so the in-memory
//! [`document::Document`] doubles as the test fake.

pub mod animation;
pub mod document;
pub mod interactions;
pub mod logos;
pub mod orbs;
pub mod page;
pub mod parallax;
pub mod placeholder;
pub mod scroller;
pub mod view;
