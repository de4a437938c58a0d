//! Networking modules for the Buddie REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the configured client and its response interceptor, `api` maps
//! backend endpoints onto it, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
