//! HTTP client for the journal server.
//!
//! Every call returns the server's answer as a value; deciding what counts as
//! an application failure is left to the controllers.

use crate::diary_entry::{DiaryEntry, EntryId, EntryPayload};
use crate::error::{ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Reply to `/login` and `/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply body to entry create/update/delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub status: StatusCode,
    pub body: MutationResponse,
}

impl MutationOutcome {
    /// Either the body says so or the status is 2xx.
    pub fn succeeded(&self) -> bool {
        self.body.success || self.status.is_success()
    }

    pub fn confirmation_text(&self) -> String {
        self.body
            .response
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| {
                self.body
                    .message
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
            })
            .unwrap_or("Entry saved.")
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default)]
    pub avg_sentiment: Option<f64>,
    #[serde(default)]
    pub mood_distribution: Option<Vec<MoodCount>>,
    #[serde(default)]
    pub sentiment_trends: Option<Vec<SentimentTrend>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoodCount {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SentimentTrend {
    #[serde(default, alias = "date")]
    pub entry_date: Option<String>,
    #[serde(default)]
    pub avg_sentiment: Option<f64>,
    #[serde(default)]
    pub entry_count: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct JournalClient {
    http: Client,
    base_url: String,
}

impl JournalClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.post_auth("/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.post_auth("/register", request).await
    }

    /// The body is interpreted whatever the status, since failures carry `error`.
    async fn post_auth<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<AuthResponse> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%status, path, "auth response");
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn list_entries(&self) -> ClientResult<Vec<DiaryEntry>> {
        let response = self.http.get(self.url("/api/entries")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn create_entry(&self, payload: &EntryPayload) -> ClientResult<MutationOutcome> {
        self.mutation(self.http.post(self.url("/api/entries")).json(payload))
            .await
    }

    pub async fn update_entry(
        &self,
        id: EntryId,
        payload: &EntryPayload,
    ) -> ClientResult<MutationOutcome> {
        self.mutation(
            self.http
                .put(self.url(&format!("/api/entries/{id}")))
                .json(payload),
        )
        .await
    }

    pub async fn delete_entry(&self, id: EntryId) -> ClientResult<MutationOutcome> {
        self.mutation(self.http.delete(self.url(&format!("/api/entries/{id}"))))
            .await
    }

    /// A 2xx with an empty body is accepted; anything else must be JSON.
    async fn mutation(&self, request: RequestBuilder) -> ClientResult<MutationOutcome> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if status.is_success() && bytes.iter().all(u8::is_ascii_whitespace) {
            MutationResponse::default()
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(MutationOutcome { status, body })
    }

    pub async fn analysis(&self) -> ClientResult<AnalysisSummary> {
        let response = self.http.get(self.url("/api/analysis")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
