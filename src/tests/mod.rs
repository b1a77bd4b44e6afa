//! Shared test fixtures and end-to-end tests.

pub mod support;
