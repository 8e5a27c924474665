//! Controller layer: form inputs, workflow transitions, and lookup orchestration.

pub mod events;
pub mod state;

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    domain::{ExaminationId, ResultRecord},
    protocol::LookupQuery,
};
use store_client::{HttpRecordStore, RecordStore, StoreConfig, StoreError};
use tracing::{debug, error, info, warn};

use crate::{
    catalog::Catalog,
    dob::{local_today, DatePart, DobBuilder},
    view::{FormView, ResultView, View},
};

use self::{
    events::{FormEvent, PendingLookup},
    state::{WorkflowState, FILL_ALL_FIELDS, LOOKUP_FAILED},
};

pub struct LookupController {
    store: Arc<dyn RecordStore>,
    catalog: Catalog,
    selected_examination: Option<ExaminationId>,
    roll_number: String,
    dob: DobBuilder,
    state: WorkflowState,
    in_flight: Option<u64>,
    next_token: u64,
    today: fn() -> NaiveDate,
}

impl LookupController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            catalog: Catalog::default(),
            selected_examination: None,
            roll_number: String::new(),
            dob: DobBuilder::new(),
            state: WorkflowState::Idle,
            in_flight: None,
            next_token: 0,
            today: local_today,
        }
    }

    /// Builds the HTTP store from `config`. Missing parameters do not fail
    /// here; they make every query fail instead.
    pub fn from_config(config: StoreConfig) -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(HttpRecordStore::new(config)?)))
    }

    /// Replaces the clock used to seed the first date-of-birth edit.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Loads the examination catalog. Runs once per controller.
    pub async fn initialize(&mut self) {
        self.catalog.load(self.store.as_ref()).await;
    }

    pub async fn handle(&mut self, event: FormEvent) {
        debug!(
            event = event.name(),
            state = self.state.name(),
            "controller: event"
        );
        match event {
            FormEvent::SelectExamination(id) => self.select_examination(id),
            FormEvent::SetRollNumber(roll_number) => self.set_roll_number(roll_number),
            FormEvent::SetDatePart { part, value } => {
                self.set_date_part(part, &value);
            }
            FormEvent::Submit => self.search().await,
            FormEvent::Reset => self.reset(),
        }
    }

    pub fn select_examination(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.selected_examination = if id.is_empty() {
            None
        } else {
            Some(ExaminationId(id))
        };
    }

    pub fn set_roll_number(&mut self, roll_number: impl Into<String>) {
        self.roll_number = roll_number.into();
    }

    /// Returns whether the edit was accepted; rejected edits change nothing.
    pub fn set_date_part(&mut self, part: DatePart, value: &str) -> bool {
        let accepted = self.dob.set_part(part, value, (self.today)());
        if !accepted {
            debug!(%part, "controller: rejected out-of-range date field");
        }
        accepted
    }

    /// Validates the form and moves to `Searching`.
    ///
    /// Returns `None` when a lookup is already in flight or a field is
    /// missing; the latter leaves the controller in the validation error state.
    /// Any catalog load error is dismissed once the submit is accepted.
    pub fn begin_search(&mut self) -> Option<PendingLookup> {
        if self.state.is_loading() {
            debug!("controller: submit ignored while a lookup is in flight");
            return None;
        }
        self.catalog.dismiss_error();

        let dob = self.dob.resolve();
        let (Some(examination_id), false, Some(dob)) = (
            self.selected_examination.clone(),
            self.roll_number.is_empty(),
            dob,
        ) else {
            self.state = WorkflowState::Errored(FILL_ALL_FIELDS.to_string());
            return None;
        };

        self.next_token += 1;
        let token = self.next_token;
        self.in_flight = Some(token);
        self.state = WorkflowState::Searching;

        let query = LookupQuery::new(examination_id, self.roll_number.clone(), dob);
        info!(
            token,
            examination_id = %query.examination_id,
            dob = %query.dob,
            "controller: lookup issued"
        );
        Some(PendingLookup { token, query })
    }

    /// Applies the outcome of `pending`. Returns `false` if the lookup was
    /// superseded by a reset and the outcome was dropped.
    pub fn settle(
        &mut self,
        pending: PendingLookup,
        outcome: Result<ResultRecord, StoreError>,
    ) -> bool {
        if self.in_flight != Some(pending.token) {
            warn!(
                token = pending.token,
                "controller: dropping outcome of superseded lookup"
            );
            return false;
        }
        self.in_flight = None;

        self.state = match outcome {
            Ok(record) => {
                info!(token = pending.token, outcome = %record.outcome, "controller: result found");
                WorkflowState::Found(record)
            }
            Err(err) if err.is_no_rows() => {
                info!(token = pending.token, "controller: no matching result");
                WorkflowState::NotFound
            }
            Err(err) => {
                error!(token = pending.token, error = %err, "controller: error fetching result");
                WorkflowState::Errored(LOOKUP_FAILED.to_string())
            }
        };
        true
    }

    /// Submit: validate, query the store, and apply the outcome.
    pub async fn search(&mut self) {
        let Some(pending) = self.begin_search() else {
            return;
        };
        let outcome = self.store.find_result(&pending.query).await;
        self.settle(pending, outcome);
    }

    /// Back to the form. Inputs are kept; any result, message (catalog load
    /// error included), or in-flight lookup is discarded.
    pub fn reset(&mut self) {
        self.catalog.dismiss_error();
        self.in_flight = None;
        self.state = WorkflowState::Idle;
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected_examination(&self) -> Option<&ExaminationId> {
        self.selected_examination.as_ref()
    }

    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    pub fn dob(&self) -> &DobBuilder {
        &self.dob
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading()
            && self.selected_examination.is_some()
            && !self.roll_number.is_empty()
            && self.dob.is_present()
    }

    /// The form is shown unless a result is held.
    pub fn view(&self) -> View<'_> {
        if let WorkflowState::Found(record) = &self.state {
            return View::Result(ResultView {
                record,
                examination: self
                    .selected_examination
                    .as_ref()
                    .and_then(|id| self.catalog.find(id)),
            });
        }

        View::Form(FormView {
            examinations: self.catalog.examinations(),
            selected_examination: self.selected_examination.as_ref(),
            roll_number: &self.roll_number,
            day: self.dob.field(DatePart::Day),
            month: self.dob.field(DatePart::Month),
            year: self.dob.field(DatePart::Year),
            catalog_error: self.catalog.error(),
            message: self.state.message(),
            loading: self.is_loading(),
            submit_enabled: self.can_submit(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
