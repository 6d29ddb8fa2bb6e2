//! Product categories for the category block's item picker.
//!
//! The categories endpoint has shipped several response shapes. All of them
//! are accepted:
//!
//! ```json
//! [{ "id": 1, "name": "Shoes" }]
//! { "items": [{ "_id": "c1", "title": "Shoes" }] }
//! { "data":  [{ "id": "c1", "name": "Shoes" }] }
//! ```

use crate::http::{authorize, build_client, check_response, read_json};
use crate::{ApiConfig, ApiResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const CATEGORIES_PATH: &str = "/api/admin/categories";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

pub struct CategoryClient {
    config: ApiConfig,
    client: Client,
}

impl CategoryClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let request = self.client.get(self.config.url(CATEGORIES_PATH));
        let response = authorize(request, &self.config).send().await?;
        let response = check_response(response, "", None).await?;
        let body: Value = read_json(response).await?;

        let categories = normalize_categories(&body);
        debug!(count = categories.len(), "loaded categories");
        Ok(categories)
    }
}

/// Flatten any accepted response shape into `Category` values.
///
/// Entries without a usable id are dropped. A missing name falls back to
/// the id.
pub fn normalize_categories(body: &Value) -> Vec<Category> {
    let entries: &[Value] = match body {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(map) => match map.get("items").or_else(|| map.get("data")) {
            Some(Value::Array(entries)) => entries.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    entries.iter().filter_map(normalize_entry).collect()
}

fn normalize_entry(entry: &Value) -> Option<Category> {
    let id = match entry.get("id").or_else(|| entry.get("_id"))? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let name = entry
        .get("name")
        .or_else(|| entry.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    Some(Category { id, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_bare_array() {
        let body = json!([{ "id": 7, "name": "Shoes" }, { "id": "c2", "name": "Bags" }]);
        assert_eq!(
            normalize_categories(&body),
            vec![category("7", "Shoes"), category("c2", "Bags")]
        );
    }

    #[test]
    fn test_items_envelope_with_mongo_ids() {
        let body = json!({ "items": [{ "_id": "abc", "title": "Hats" }] });
        assert_eq!(normalize_categories(&body), vec![category("abc", "Hats")]);
    }

    #[test]
    fn test_data_envelope() {
        let body = json!({ "data": [{ "id": "c1", "name": "Shoes" }] });
        assert_eq!(normalize_categories(&body), vec![category("c1", "Shoes")]);
    }

    #[test]
    fn test_unusable_entries_dropped() {
        let body = json!([
            { "name": "No id" },
            { "id": "", "name": "Empty id" },
            { "id": true, "name": "Bool id" },
            { "id": "c9" }
        ]);
        assert_eq!(normalize_categories(&body), vec![category("c9", "c9")]);
    }

    #[test]
    fn test_unexpected_shape_is_empty() {
        assert!(normalize_categories(&json!({ "total": 3 })).is_empty());
        assert!(normalize_categories(&json!("nope")).is_empty());
    }
}
