//! Bookmarked courses.
//!
//! The set is mirrored to `localStorage` on every change so anonymous
//! visitors keep their bookmarks across reloads. Signed-in users are also
//! synced with the backend's saved-course list.

#[cfg(test)]
#[path = "bookmarks_test.rs"]
mod bookmarks_test;

use std::collections::BTreeSet;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::util::storage;

pub const STORAGE_KEY: &str = "buddie_saved_courses";

/// Ordered set of bookmarked course ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet(BTreeSet<i64>);

impl BookmarkSet {
    pub fn contains(&self, course_id: i64) -> bool {
        self.0.contains(&course_id)
    }

    /// Flip membership; returns whether the course is now bookmarked.
    pub fn toggle(&mut self, course_id: i64) -> bool {
        if self.0.remove(&course_id) {
            false
        } else {
            self.0.insert(course_id);
            true
        }
    }

    pub fn set(&mut self, course_id: i64, saved: bool) {
        if saved {
            self.0.insert(course_id);
        } else {
            self.0.remove(&course_id);
        }
    }

    pub fn replace<I: IntoIterator<Item = i64>>(&mut self, ids: I) {
        self.0 = ids.into_iter().collect();
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reactive bookmark handle backed by `localStorage`.
#[derive(Clone, Copy, Debug)]
pub struct Bookmarks(RwSignal<BookmarkSet>);

impl Bookmarks {
    /// Restore from `localStorage` (empty outside the browser).
    pub fn load() -> Self {
        Self::with_set(storage::load_json(STORAGE_KEY).unwrap_or_default())
    }

    pub fn with_set(set: BookmarkSet) -> Self {
        Self(RwSignal::new(set))
    }

    pub fn contains(&self, course_id: i64) -> bool {
        self.0.with(|s| s.contains(course_id))
    }

    pub fn snapshot_untracked(&self) -> BookmarkSet {
        self.0.get_untracked()
    }

    pub fn toggle(&self, course_id: i64) -> bool {
        let mut saved = false;
        self.mutate(|s| saved = s.toggle(course_id));
        saved
    }

    pub fn set(&self, course_id: i64, saved: bool) {
        self.mutate(|s| s.set(course_id, saved));
    }

    /// Adopt the backend's list as the source of truth.
    pub fn replace(&self, ids: Vec<i64>) {
        self.mutate(|s| s.replace(ids));
    }

    /// Forget every bookmark; used when the session ends so the next user
    /// starts from an empty set.
    pub fn clear(&self) {
        if !self.0.with_untracked(BookmarkSet::is_empty) {
            self.mutate(|s| s.replace(Vec::new()));
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut BookmarkSet)) {
        self.0.update(f);
        self.0.with_untracked(|s| storage::save_json(STORAGE_KEY, s));
    }
}

/// Push one bookmark change to the backend.
///
/// # Errors
///
/// Propagates client failures; the caller reverts the local change.
pub async fn sync_bookmark(api: &ApiClient, course_id: i64, saved: bool) -> Result<(), ApiError> {
    if saved {
        api::save_course(api, course_id).await
    } else {
        api::unsave_course(api, course_id).await
    }
}

/// Adopt the signed-in user's saved-course list from the backend.
///
/// # Errors
///
/// Propagates client failures; the local set is left untouched.
pub async fn pull_saved_courses(api: &ApiClient, bookmarks: Bookmarks) -> Result<(), ApiError> {
    let courses = api::saved_courses(api).await?;
    bookmarks.replace(courses.iter().map(|c| c.id).collect());
    Ok(())
}
