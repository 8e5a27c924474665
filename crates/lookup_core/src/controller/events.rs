//! User actions accepted by the lookup controller.

use shared::protocol::LookupQuery;

use crate::dob::DatePart;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SelectExamination(String),
    SetRollNumber(String),
    SetDatePart { part: DatePart, value: String },
    Submit,
    Reset,
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectExamination(_) => "select_examination",
            Self::SetRollNumber(_) => "set_roll_number",
            Self::SetDatePart { .. } => "set_date_part",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

/// A lookup that has been issued but not yet settled.
///
/// The token ties the eventual outcome to the submission that produced it;
/// outcomes for a superseded submission are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub(crate) token: u64,
    pub query: LookupQuery,
}

impl PendingLookup {
    pub fn token(&self) -> u64 {
        self.token
    }
}
