//! Client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so the backend
//! origin is baked in at compile time from `BUDDIE_API_ORIGIN`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend origin used when `BUDDIE_API_ORIGIN` is not set at build time.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8080";

/// Static configuration shared by the HTTP client and image URLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash, e.g. `http://localhost:8080`.
    pub api_origin: String,
}

impl ClientConfig {
    /// Build the config from compile-time environment.
    pub fn from_build_env() -> Self {
        Self::with_origin(option_env!("BUDDIE_API_ORIGIN").unwrap_or(DEFAULT_API_ORIGIN))
    }

    pub fn with_origin(origin: &str) -> Self {
        Self { api_origin: normalize_origin(origin) }
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_origin)
        } else {
            format!("{}/{path}", self.api_origin)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn normalize_origin(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_ORIGIN.to_owned()
    } else {
        trimmed.to_owned()
    }
}
