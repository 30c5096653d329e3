//! Crate-level tests for weft-core.

mod behaviour;
mod unit;
