use std::cmp::Reverse;

use shared::domain::{Examination, ExaminationId};
use store_client::RecordStore;
use tracing::{debug, error, info};

pub const CATALOG_LOAD_FAILED: &str = "Failed to load examinations. Please try again.";

/// Examinations offered in the selector, loaded once per controller.
#[derive(Debug, Default)]
pub struct Catalog {
    examinations: Vec<Examination>,
    error: Option<String>,
    attempted: bool,
}

impl Catalog {
    /// Fetches the full list on the first call. Later calls do nothing, even
    /// after a failure; the selector then stays empty.
    pub async fn load(&mut self, store: &dyn RecordStore) {
        if self.attempted {
            debug!("catalog: load already attempted; skipping");
            return;
        }
        self.attempted = true;

        match store.list_examinations().await {
            Ok(mut examinations) => {
                examinations.sort_by_key(|exam| Reverse(exam.year));
                info!(count = examinations.len(), "catalog: examinations ready");
                self.examinations = examinations;
            }
            Err(err) => {
                error!(error = %err, "catalog: error fetching examinations");
                self.error = Some(CATALOG_LOAD_FAILED.to_string());
            }
        }
    }

    pub fn examinations(&self) -> &[Examination] {
        &self.examinations
    }

    pub fn find(&self, id: &ExaminationId) -> Option<&Examination> {
        self.examinations.iter().find(|exam| &exam.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Hides the load error. The catalog stays empty; the load is not retried.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_attempted(&self) -> bool {
        self.attempted
    }
}
