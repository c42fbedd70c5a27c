//! Crate-level tests for the helper runtime.
