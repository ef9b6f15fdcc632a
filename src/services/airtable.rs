//! Contact-form intake via the Airtable REST API.

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub telegram: String,
    pub message: String,
}

#[derive(Serialize)]
struct CreateRecords<'a> {
    records: Vec<Record<'a>>,
}

#[derive(Serialize)]
struct Record<'a> {
    fields: Fields<'a>,
}

#[derive(Serialize)]
struct Fields<'a> {
    name: &'a str,
    email: &'a str,
    telegram: &'a str,
    message: &'a str,
    timestamp: String,
}

#[derive(Clone, Debug)]
pub struct AirtableClient {
    api_key: String,
    base_id: String,
    table_name: String,
    http: Client,
}

impl AirtableClient {
    /// Fails when any of the three required values is blank, before any
    /// network call is possible.
    pub fn new(api_key: &str, base_id: &str, table_name: &str) -> Result<Self, AirtableError> {
        if api_key.is_empty() {
            return Err(AirtableError::MissingConfig("Airtable API key is missing"));
        }
        if base_id.is_empty() {
            return Err(AirtableError::MissingConfig("Airtable base ID is missing"));
        }
        if table_name.is_empty() {
            return Err(AirtableError::MissingConfig(
                "Airtable table name is missing",
            ));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            base_id: base_id.to_string(),
            table_name: table_name.to_string(),
            http: Client::new(),
        })
    }

    pub fn from_env() -> Result<Self, AirtableError> {
        let api_key = std::env::var("AIRTABLE_API_KEY").unwrap_or_default();
        let base_id = std::env::var("AIRTABLE_BASE_ID").unwrap_or_default();
        let table_name = std::env::var("AIRTABLE_TABLE_NAME").unwrap_or_default();
        Self::new(&api_key, &base_id, &table_name)
    }

    /// Create one intake record, stamped with the submission time.
    pub async fn submit(&self, form: &ContactForm) -> Result<(), AirtableError> {
        let url = format!(
            "https://api.airtable.com/v0/{}/{}",
            self.base_id, self.table_name
        );

        let body = CreateRecords {
            records: vec![Record {
                fields: Fields {
                    name: &form.name,
                    email: &form.email,
                    telegram: &form.telegram,
                    message: &form.message,
                    timestamp: Utc::now().to_rfc3339(),
                },
            }],
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AirtableError::NotAuthorized);
        }
        if !status.is_success() {
            let text = resp.text().await?;
            return Err(AirtableError::Api(text));
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum AirtableError {
    MissingConfig(&'static str),
    NotAuthorized,
    Http(reqwest::Error),
    Api(String),
}

impl From<reqwest::Error> for AirtableError {
    fn from(e: reqwest::Error) -> Self {
        AirtableError::Http(e)
    }
}

impl std::fmt::Display for AirtableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AirtableError::MissingConfig(what) => write!(f, "{}", what),
            AirtableError::NotAuthorized => {
                write!(f, "Invalid Airtable API key or permissions")
            }
            AirtableError::Http(e) => write!(f, "HTTP error: {}", e),
            AirtableError::Api(s) => write!(f, "Airtable API error: {}", s),
        }
    }
}

impl std::error::Error for AirtableError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_config_names_the_gap() {
        let err = AirtableClient::new("", "base", "table").unwrap_err();
        assert_eq!(err.to_string(), "Airtable API key is missing");

        let err = AirtableClient::new("key", "", "table").unwrap_err();
        assert_eq!(err.to_string(), "Airtable base ID is missing");

        let err = AirtableClient::new("key", "base", "").unwrap_err();
        assert_eq!(err.to_string(), "Airtable table name is missing");
    }

    #[test]
    fn test_complete_config_is_accepted() {
        assert!(AirtableClient::new("key", "base", "table").is_ok());
    }
}
