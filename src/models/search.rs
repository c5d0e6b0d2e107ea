use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One queued hostname lookup and, once a search has run, its result.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub host: String,
    pub identifier: Uuid,
    pub result: Option<ServiceResult>,
}

impl SearchEntry {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            identifier: Uuid::new_v4(),
            result: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }
}

/// Result object returned by the service for a single search item.
///
/// Only `identifier` and `service` are interpreted; every other field the
/// service sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceResult(Map<String, Value>);

impl ServiceResult {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn identifier(&self) -> Option<&str> {
        self.0.get("identifier").and_then(Value::as_str)
    }

    pub fn service(&self) -> Option<&Value> {
        self.0.get("service")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

#[derive(Debug, Serialize)]
pub struct SearchItem<'a> {
    pub host: &'a str,
    pub identifier: Uuid,
}

impl<'a> From<&'a SearchEntry> for SearchItem<'a> {
    fn from(entry: &'a SearchEntry) -> Self {
        Self {
            host: &entry.host,
            identifier: entry.identifier,
        }
    }
}

/// Body of the `params` form field sent to the submit endpoint.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub search: Vec<SearchItem<'a>>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub id: Option<Value>,
}

impl SubmitResponse {
    /// Search job id as it should appear in the results query string.
    pub fn job_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    pub results: Option<Vec<ServiceResult>>,
}
