//! Common types for the shared crate
//!
//! Pagination and write-result shapes used by every resource endpoint.

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

/// Resolved pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Records per page, at least 1
    pub page_size: u32,
    /// 1-based page number
    pub page: u32,
    /// Explicit offset, overrides `page` when present
    pub start_index: Option<u64>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
            start_index: None,
        }
    }
}

impl PageRequest {
    /// Build from raw query-string values.
    ///
    /// Unparsable or non-positive `recordPerPage` / `page` fall back to
    /// 10 / 1. A negative or unparsable `startIndex` is ignored.
    pub fn from_raw(
        record_per_page: Option<&str>,
        page: Option<&str>,
        start_index: Option<&str>,
    ) -> Self {
        let page_size = record_per_page
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .map(|n| n.min(u32::MAX as i64) as u32)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let page = page
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .map(|n| n.min(u32::MAX as i64) as u32)
            .unwrap_or(DEFAULT_PAGE);
        let start_index = start_index
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|n| *n >= 0)
            .map(|n| n as u64);

        Self {
            page_size,
            page,
            start_index,
        }
    }

    /// Number of records to skip, saturating at `u64::MAX`
    pub fn offset(&self) -> u64 {
        self.start_index.unwrap_or_else(|| {
            u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
        })
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

/// One page of a listing plus the size of the full matched set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Outcome of an upsert / update by filter
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

/// Outcome of a single insert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertOneResult {
    pub inserted_id: String,
}

/// Outcome of a bulk insert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsertManyResult {
    pub inserted_ids: Vec<String>,
}

/// Outcome of a delete by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: u64,
}
