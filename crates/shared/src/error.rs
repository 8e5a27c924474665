use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code the store returns when a single-object request matches no row.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// JSON body the record store attaches to failed requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl StoreErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn no_rows() -> Self {
        Self {
            details: Some("The result contains 0 rows".into()),
            ..Self::new(
                NO_ROWS_CODE,
                "JSON object requested, multiple (or no) rows returned",
            )
        }
    }

    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(NO_ROWS_CODE)
    }
}

/// A row came back from the store but could not be turned into a domain value.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("invalid date '{value}' in column {column}")]
    InvalidDate { column: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_body_is_recognized() {
        assert!(StoreErrorBody::no_rows().is_no_rows());
        assert!(!StoreErrorBody::new("42P01", "relation does not exist").is_no_rows());
        assert!(!StoreErrorBody::default().is_no_rows());
    }

    #[test]
    fn body_without_code_parses() {
        let body: StoreErrorBody =
            serde_json::from_str(r#"{"message":"upstream down"}"#).expect("parse body");
        assert_eq!(body.code, None);
        assert_eq!(body.message, "upstream down");
    }
}
