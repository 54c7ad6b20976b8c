//! # Blocking API Client
//!
//! Thin wrapper over `reqwest::blocking::Client` for the endpoints the CLI
//! drives. Every call maps transport failures, non-2xx responses, and
//! undecodable bodies to a distinct [`ClientError`] variant that names the
//! endpoint.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use sas_core::AssessmentResult;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{endpoint}: request failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint}: server returned {status} {code}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error("{endpoint}: unexpected response body: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API token: {0}")]
    InvalidToken(String),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Body of `POST /tasks`.
#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub name: &'a str,
    pub template_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedTask {
    pub id: i64,
    pub message: String,
}

/// One item as returned inside a task detail.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskItem {
    pub id: i64,
    pub dimension: String,
    pub control_item: String,
    pub level: String,
    pub rating: String,
    pub rating_label: String,
    pub score: f64,
    pub max_score: f64,
    pub has_attachment: bool,
}

/// `GET /tasks/{id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDetail {
    pub id: i64,
    pub name: String,
    pub template_id: String,
    pub template_name: String,
    pub organization: Option<String>,
    pub status: String,
    pub total_score: f64,
    pub compliance_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<TaskItem>,
}

impl TaskDetail {
    /// Item counts keyed by dimension id.
    pub fn items_per_dimension(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.dimension.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Client for the assessment API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` (including the `/api` prefix). When a
    /// token is given, every request carries `Authorization: Bearer <token>`.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /tasks`
    pub fn create_task(&self, task: &NewTask<'_>) -> Result<CreatedTask, ClientError> {
        let endpoint = "POST /tasks";
        let resp = self
            .http
            .post(self.url("/tasks"))
            .json(task)
            .send()
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        decode(endpoint, resp)
    }

    /// `GET /tasks/{id}`
    pub fn task(&self, id: i64) -> Result<TaskDetail, ClientError> {
        self.get(&format!("/tasks/{id}"))
    }

    /// `GET /tasks/{id}/result`
    pub fn task_result(&self, id: i64) -> Result<AssessmentResult, ClientError> {
        self.get(&format!("/tasks/{id}/result"))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let endpoint = format!("GET {path}");
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        decode(&endpoint, resp)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(env) => (env.error.code, env.error.message),
            Err(_) => (String::from("UNKNOWN"), body),
        };
        return Err(ClientError::Api {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            code,
            message,
        });
    }

    resp.json().map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}
