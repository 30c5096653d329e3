//! Crate-level tests for weft.
