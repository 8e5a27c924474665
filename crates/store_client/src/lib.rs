//! Read-only client for the examination record store.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, RequestBuilder, Response};
use shared::{
    domain::{Examination, ResultRecord},
    error::{RowError, StoreErrorBody},
    protocol::{ExaminationRow, LookupQuery, ResultRow},
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod config;

pub use config::{load_settings, ConfigDiagnostics, StoreConfig};

const EXAMINATIONS_TABLE: &str = "examinations";
const RESULTS_TABLE: &str = "results";
const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store is not configured: missing {missing}")]
    NotConfigured { missing: &'static str },
    #[error("no matching row")]
    NoRows,
    #[error("request to record store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("record store returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("undecodable response from record store: {0}")]
    Decode(#[source] reqwest::Error),
    #[error(transparent)]
    Row(#[from] RowError),
}

impl StoreError {
    /// The query was well formed but matched nothing.
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }
}

/// The two read operations the lookup workflow needs from the store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All examinations, newest year first.
    async fn list_examinations(&self) -> Result<Vec<Examination>, StoreError>;
    /// Exactly one record matching the query, or [`StoreError::NoRows`].
    async fn find_result(&self, query: &LookupQuery) -> Result<ResultRecord, StoreError>;
}

pub struct HttpRecordStore {
    http: Client,
    config: StoreConfig,
}

impl HttpRecordStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn get(&self, table: &str) -> Result<RequestBuilder, StoreError> {
        let endpoint = self
            .config
            .endpoint
            .as_ref()
            .ok_or(StoreError::NotConfigured { missing: "endpoint" })?;
        let credential = self
            .config
            .credential
            .as_deref()
            .ok_or(StoreError::NotConfigured {
                missing: "credential",
            })?;
        let url = format!(
            "{}/rest/v1/{table}",
            endpoint.as_str().trim_end_matches('/')
        );
        Ok(self
            .http
            .get(url)
            .header("apikey", credential)
            .bearer_auth(credential))
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<StoreErrorBody>(&raw).unwrap_or_else(|_| StoreErrorBody {
        message: raw.clone(),
        ..StoreErrorBody::default()
    });
    if body.is_no_rows() {
        return Err(StoreError::NoRows);
    }
    Err(StoreError::Status {
        status: status.as_u16(),
        code: body.code,
        message: body.message,
    })
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_examinations(&self) -> Result<Vec<Examination>, StoreError> {
        let response = self
            .get(EXAMINATIONS_TABLE)?
            .query(&[("select", "*"), ("order", "year.desc")])
            .send()
            .await?;
        let rows: Vec<ExaminationRow> = check_status(response)
            .await?
            .json()
            .await
            .map_err(StoreError::Decode)?;
        info!(count = rows.len(), "store: examinations loaded");
        Ok(rows.into_iter().map(Examination::from).collect())
    }

    async fn find_result(&self, query: &LookupQuery) -> Result<ResultRecord, StoreError> {
        let examination_filter = format!("eq.{}", query.examination_id);
        let roll_filter = format!("eq.{}", query.roll_number);
        let dob_filter = format!("eq.{}", query.dob);
        let response = self
            .get(RESULTS_TABLE)?
            .header(ACCEPT, SINGLE_OBJECT_MEDIA_TYPE)
            .query(&[
                ("select", "*"),
                ("examination_id", examination_filter.as_str()),
                ("roll_no", roll_filter.as_str()),
                ("dob", dob_filter.as_str()),
            ])
            .send()
            .await?;

        let response = match check_status(response).await {
            Ok(response) => response,
            Err(StoreError::NoRows) => {
                debug!(
                    examination_id = %query.examination_id,
                    "store: no result row matched lookup"
                );
                return Err(StoreError::NoRows);
            }
            Err(err) => {
                warn!(examination_id = %query.examination_id, error = %err, "store: lookup failed");
                return Err(err);
            }
        };

        let row: ResultRow = response.json().await.map_err(StoreError::Decode)?;
        Ok(ResultRecord::try_from(row)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
