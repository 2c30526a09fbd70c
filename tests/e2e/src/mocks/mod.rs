//! Test data factories

mod fixtures;

pub use fixtures::{BatchConfig, TestDataFactory};
