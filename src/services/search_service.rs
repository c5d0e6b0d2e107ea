use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, SearchError};
use crate::models::{
    ResultsResponse, SearchEntry, SearchItem, SearchRequest, ServiceResult, SubmitResponse,
};

/// Batches hostname lookups against the service-map search API.
///
/// Hosts are queued with [`add_host`](Self::add_host) and resolved together by
/// [`execute`](Self::execute), which submits one search job and then fetches
/// its results. Entries are never removed; running `execute` again re-submits
/// every queued host and replaces the stored results.
#[derive(Debug)]
pub struct SearchClient {
    base_url: String,
    http: reqwest::Client,
    searches: Vec<SearchEntry>,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>, verify_tls: bool) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self {
            base_url,
            http,
            searches: Vec::new(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.verify_tls)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn add_host(&mut self, hostname: impl Into<String>) {
        let entry = SearchEntry::new(hostname);
        debug!(host = %entry.host, identifier = %entry.identifier, "queued host");
        self.searches.push(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &SearchEntry> {
        self.searches.iter()
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    /// `service` value of the first resolved entry for `hostname`.
    pub fn result_for_host(&self, hostname: &str) -> Option<&Value> {
        self.result_record_for_host(hostname)
            .and_then(ServiceResult::service)
    }

    /// Full result object of the first resolved entry for `hostname`.
    pub fn result_record_for_host(&self, hostname: &str) -> Option<&ServiceResult> {
        self.searches
            .iter()
            .filter(|entry| entry.host == hostname)
            .find_map(|entry| entry.result.as_ref())
    }

    /// Submits every queued host as one search job and attaches the results.
    ///
    /// Does nothing when no hosts are queued. Results are only attached once
    /// both requests succeeded and every returned identifier matched a queued
    /// entry.
    pub async fn execute(&mut self) -> Result<()> {
        if self.searches.is_empty() {
            debug!("no hosts queued, skipping search");
            return Ok(());
        }

        let job_id = self.submit().await?;
        let results = self.fetch_results(&job_id).await?;
        let count = results.len();
        self.merge(results)?;

        info!(job_id = %job_id, hosts = self.searches.len(), results = count, "search complete");
        Ok(())
    }

    async fn submit(&self) -> Result<String> {
        let request = SearchRequest {
            search: self.searches.iter().map(SearchItem::from).collect(),
        };
        let params = serde_json::to_string(&request).map_err(|source| SearchError::Parse {
            context: "search request",
            source,
        })?;

        let url = format!("{}/search", self.base_url);
        debug!(url = %url, hosts = self.searches.len(), "submitting search");

        let response = self
            .http
            .post(&url)
            .form(&[("params", params)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, "search submission rejected");
            return Err(SearchError::submission(status, &body));
        }

        let submitted: SubmitResponse = parse_json("search", &body)?;
        submitted.job_id().ok_or(SearchError::MissingField {
            context: "search",
            field: "id",
        })
    }

    async fn fetch_results(&self, job_id: &str) -> Result<Vec<ServiceResult>> {
        let url = format!("{}/search/results/id", self.base_url);
        debug!(url = %url, job_id, "fetching search results");

        let response = self
            .http
            .get(&url)
            .query(&[("id", job_id)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, job_id, "search results request failed");
            return Err(SearchError::results(status, &body));
        }

        let fetched: ResultsResponse = parse_json("search results", &body)?;
        fetched.results.ok_or(SearchError::MissingField {
            context: "search results",
            field: "results",
        })
    }

    fn merge(&mut self, results: Vec<ServiceResult>) -> Result<()> {
        // Keyed by the hyphenated text sent in the search request.
        let index: HashMap<String, usize> = self
            .searches
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.identifier.to_string(), position))
            .collect();

        // Resolve every target first so a bad identifier leaves all entries untouched.
        let mut targets = Vec::with_capacity(results.len());
        for result in &results {
            let identifier = result.identifier().ok_or(SearchError::MissingField {
                context: "search results",
                field: "identifier",
            })?;
            let position = index
                .get(identifier)
                .copied()
                .ok_or_else(|| SearchError::UnknownIdentifier(identifier.to_string()))?;
            targets.push(position);
        }

        for (position, result) in targets.into_iter().zip(results) {
            self.searches[position].result = Some(result);
        }
        Ok(())
    }
}

fn parse_json<T: DeserializeOwned>(context: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| SearchError::Parse { context, source })
}
