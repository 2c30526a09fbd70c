//! LearnBase end-to-end test support
//!
//! - `harness`: an in-memory note store driving the scheduler on a
//!   controllable clock
//! - `mocks`: factories for scheduling states and rating sequences

pub mod harness;
pub mod mocks;

pub use harness::TestNoteStore;
pub use mocks::{BatchConfig, TestDataFactory};
