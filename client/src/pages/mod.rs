//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page receives the `AppContext` as a prop, owns its route-scoped data
//! fetching (cancelled on teardown) and delegates shared rendering to
//! `components`.

pub mod admin;
pub mod course;
pub mod home;
pub mod institution;
pub mod institutions;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;
