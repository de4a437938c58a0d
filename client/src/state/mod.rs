//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `notice`, `bookmarks`,
//! `navigation`) so views depend on small focused handles. Every handle is a
//! `Copy` wrapper around a signal and is passed to views explicitly.

pub mod bookmarks;
pub mod navigation;
pub mod notice;
pub mod session;
