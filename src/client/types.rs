use serde::{Deserialize, Serialize};

/// Query parameters for listing flats. Sorting and filtering are opaque
/// expressions interpreted by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListParams {
    /// 1-based page number
    pub page: u32,
    /// Sort expression, e.g. `id` or `area,desc`
    pub sort: String,
    /// Filter expression; `None` or `"none"` disables filtering
    pub filter: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            sort: "id".to_string(),
            filter: None,
        }
    }
}

impl ListParams {
    /// Query pairs in the order the server expects them
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("sort", self.sort.clone())];
        if let Some(filter) = self.filter.as_deref().filter(|f| *f != "none") {
            pairs.push(("filter", filter.to_string()));
        }
        pairs
    }
}
