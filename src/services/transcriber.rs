//! HTTP client for the transcription backend.
//!
//! The backend owns the heavy lifting (fetching the recording, transcription,
//! summarization, thread generation) and writes its results into the document
//! store. This client only triggers jobs and reports acceptance.

use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct TranscriberClient {
    base_url: String,
    http: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpaceJobRequest<'a> {
    space_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct BackendAck {
    status: String,
}

impl TranscriberClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Ask the backend to fetch and transcribe a recorded space. Single
    /// attempt; the caller decides whether to retry.
    pub async fn transcribe_recorded_space(&self, space_id: &str) -> Result<(), TranscriberError> {
        self.trigger_job("transcribe-recorded-space", space_id).await
    }

    /// Ask the backend to generate the shareable thread for a space it has
    /// already transcribed.
    pub async fn generate_twitter_thread(&self, space_id: &str) -> Result<(), TranscriberError> {
        self.trigger_job("generate-twitter-thread", space_id).await
    }

    async fn trigger_job(&self, endpoint: &str, space_id: &str) -> Result<(), TranscriberError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let resp = self
            .http
            .post(&url)
            .json(&SpaceJobRequest { space_id })
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(TranscriberError::Backend(text));
        }

        let ack: BackendAck = resp.json().await?;
        if ack.status != "success" {
            return Err(TranscriberError::Backend(ack.status));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum TranscriberError {
    Http(reqwest::Error),
    Backend(String),
}

impl From<reqwest::Error> for TranscriberError {
    fn from(e: reqwest::Error) -> Self {
        TranscriberError::Http(e)
    }
}

impl std::fmt::Display for TranscriberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriberError::Http(e) => write!(f, "HTTP error: {}", e),
            TranscriberError::Backend(s) => write!(f, "Backend error: {}", s),
        }
    }
}

impl std::error::Error for TranscriberError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = TranscriberClient::new("http://jam.example.com/");
        assert_eq!(client.base_url, "http://jam.example.com");
    }
}
