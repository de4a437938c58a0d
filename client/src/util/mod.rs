//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure decisions
//! from page logic to improve reuse and testability.

pub mod cancel;
pub mod guard;
pub mod storage;
pub mod validate;
