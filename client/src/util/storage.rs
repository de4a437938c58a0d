//! Browser `localStorage` helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hydrate-only read/write of small JSON values. Server rendering and tests
//! see an empty store and writes are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: DeserializeOwned>(
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))] key: &str,
) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = local_storage()?;
        let raw = match storage.get_item(key) {
            Ok(raw) => raw?,
            Err(e) => {
                leptos::logging::warn!("localStorage read failed for {key}: {e:?}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                leptos::logging::warn!("discarding unreadable localStorage entry {key}: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Save a JSON value to `localStorage` for `key`.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                leptos::logging::warn!("cannot serialize localStorage entry {key}: {e}");
                return;
            }
        };
        if storage.set_item(key, &raw).is_err() {
            leptos::logging::warn!("localStorage write failed for {key}");
        }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            leptos::logging::warn!("localStorage unavailable: {e:?}");
            None
        }
    }
}
