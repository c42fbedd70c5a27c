//! Crate-level tests for pipwright-parse.

mod behaviour;
