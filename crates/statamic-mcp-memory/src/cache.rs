// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A cache collaborator that tracks segment state and records every clear.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use statamic_mcp_core::traits::CacheInvalidator;
use statamic_mcp_core::types::CacheSegmentStatus;
use statamic_mcp_core::RepositoryError;

/// Segments a fresh install knows about.
pub const DEFAULT_SEGMENTS: [&str; 5] = ["stache", "static", "glide", "views", "application"];

/// In-memory cache namespace.
///
/// Clearing a segment zeroes its item count and stamps `last_cleared`.
/// Unknown segment names are recorded but otherwise ignored.
#[derive(Debug)]
pub struct MemoryCache {
    segments: Mutex<BTreeMap<String, CacheSegmentStatus>>,
    clears: Mutex<Vec<Vec<String>>>,
    failing: AtomicBool,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS)
    }
}

impl MemoryCache {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(|name| {
                let name = name.into();
                let status = CacheSegmentStatus {
                    name: name.clone(),
                    items: 0,
                    last_cleared: None,
                };
                (name, status)
            })
            .collect();
        Self {
            segments: Mutex::new(segments),
            clears: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Sets the approximate item count of a known segment.
    pub fn fill(&self, segment: &str, items: u64) {
        if let Ok(mut segments) = self.segments.lock()
            && let Some(status) = segments.get_mut(segment)
        {
            status.items = items;
        }
    }

    /// Every `clear` call received so far, in order.
    pub fn clears(&self) -> Vec<Vec<String>> {
        self.clears.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Makes subsequent `clear` calls fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl CacheInvalidator for MemoryCache {
    fn clear(&self, segments: &[String]) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("cache backend unavailable".into()));
        }
        let poisoned = || RepositoryError::Storage("cache lock poisoned".into());
        self.clears
            .lock()
            .map_err(|_| poisoned())?
            .push(segments.to_vec());

        let now = Utc::now();
        let mut known = self.segments.lock().map_err(|_| poisoned())?;
        for name in segments {
            if let Some(status) = known.get_mut(name) {
                status.items = 0;
                status.last_cleared = Some(now);
            }
        }
        tracing::debug!(segments = ?segments, "cache segments cleared");
        Ok(())
    }

    fn status(&self) -> Result<Vec<CacheSegmentStatus>, RepositoryError> {
        let segments = self
            .segments
            .lock()
            .map_err(|_| RepositoryError::Storage("cache lock poisoned".into()))?;
        Ok(segments.values().cloned().collect())
    }
}
