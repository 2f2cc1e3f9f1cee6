//! Shared helpers for integration tests

#![allow(dead_code)]

mod fetch;

pub use fetch::*;
