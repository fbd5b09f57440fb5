//! Top-level orchestration: source → tracker → sink.

mod field_system;

pub use field_system::{FieldSystem, RunSummary};
