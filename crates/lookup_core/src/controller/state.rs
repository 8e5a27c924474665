//! Workflow states and the fixed messages shown for them.

use shared::domain::ResultRecord;

pub const FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const NO_RESULTS: &str = "No results found for the provided details";
pub const LOOKUP_FAILED: &str = "An error occurred while fetching your result";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Searching,
    Found(ResultRecord),
    NotFound,
    Errored(String),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Searching)
    }

    pub fn result(&self) -> Option<&ResultRecord> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }

    /// Inline message for the active view, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound => Some(NO_RESULTS),
            Self::Errored(message) => Some(message.as_str()),
            Self::Idle | Self::Searching | Self::Found(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Found(_) => "found",
            Self::NotFound => "not_found",
            Self::Errored(_) => "errored",
        }
    }
}
