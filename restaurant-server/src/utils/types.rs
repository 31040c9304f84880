//! Shared Types
//!
//! Common types used across the API layer

use serde::Deserialize;
use shared::types::PageRequest;

/// Pagination query parameters (`?recordPerPage=&page=&startIndex=`)
///
/// Kept as raw strings so a malformed value falls back to its default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::from_raw(
            self.record_per_page.as_deref(),
            self.page.as_deref(),
            self.start_index.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_names() {
        let q: PageQuery =
            serde_json::from_str(r#"{"recordPerPage":"3","page":"2","startIndex":"x"}"#).unwrap();
        let req = q.to_request();
        assert_eq!(req.page_size, 3);
        assert_eq!(req.offset(), 3);
    }
}
