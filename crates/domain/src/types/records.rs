//! Bitable record payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name to value mapping for one bitable row.
pub type Record = Map<String, Value>;

/// A listed record as returned by the records endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordItem {
    /// Record id (`rec...`).
    pub record_id: String,
    /// Field values.
    #[serde(default)]
    pub fields: Record,
}

/// One page of a record listing.
///
/// `items` is `None` when the response carried no `items` key at all, which
/// the drain loop treats differently from an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Records on this page.
    pub items: Option<Vec<RecordItem>>,
    /// Total rows reported by the API.
    pub total: i64,
    /// Whether more rows exist beyond this page.
    pub has_more: bool,
    /// Cursor for the next page, unused by the drain.
    pub page_token: Option<String>,
}

impl PageResult {
    /// Read a page out of a raw `{data:{...}}` response.
    ///
    /// Lenient: missing or mistyped counters default to zero/false, and
    /// items without a string `record_id` are skipped.
    pub fn from_response(response: &Value) -> Self {
        let Some(data) = response.get("data") else {
            return Self::default();
        };

        let items = data.get("items").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let record_id = item.get("record_id")?.as_str()?.to_owned();
                    let fields = item
                        .get("fields")
                        .and_then(Value::as_object)
                        .cloned()
                        .unwrap_or_default();
                    Some(RecordItem { record_id, fields })
                })
                .collect()
        });

        Self {
            items,
            total: data.get("total").and_then(Value::as_i64).unwrap_or(0),
            has_more: data.get("has_more").and_then(Value::as_bool).unwrap_or(false),
            page_token: data.get("page_token").and_then(Value::as_str).map(str::to_owned),
        }
    }

    /// Ids of the records on this page.
    pub fn record_ids(&self) -> Vec<String> {
        self.items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|item| item.record_id.clone())
            .collect()
    }
}
