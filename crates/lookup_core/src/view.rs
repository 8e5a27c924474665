//! What the user sees: exactly one of the form or the result.

use shared::domain::{Examination, ExaminationId, ResultRecord};

pub const PASS_BANNER: &str = "Congratulations!";
pub const FAIL_BANNER: &str = "Better luck next time";

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Form(FormView<'a>),
    Result(ResultView<'a>),
}

impl View<'_> {
    pub fn is_form(&self) -> bool {
        matches!(self, Self::Form(_))
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView<'a> {
    pub examinations: &'a [Examination],
    pub selected_examination: Option<&'a ExaminationId>,
    pub roll_number: &'a str,
    pub day: Option<i32>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    /// Shown next to the examination selector.
    pub catalog_error: Option<&'a str>,
    /// Validation, not-found, or lookup failure message.
    pub message: Option<&'a str>,
    pub loading: bool,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    pub record: &'a ResultRecord,
    pub examination: Option<&'a Examination>,
}

impl ResultView<'_> {
    /// e.g. `Jun 15, 2005`
    pub fn dob_display(&self) -> String {
        self.record.dob.format("%b %-d, %Y").to_string()
    }

    pub fn banner(&self) -> &'static str {
        if self.record.outcome.is_pass() {
            PASS_BANNER
        } else {
            FAIL_BANNER
        }
    }
}
