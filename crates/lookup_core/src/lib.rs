//! Result lookup workflow: examination catalog, date-of-birth entry, and the
//! form/result state machine driven by user actions.

pub mod catalog;
pub mod controller;
pub mod dob;
pub mod view;

pub use catalog::{Catalog, CATALOG_LOAD_FAILED};
pub use controller::{
    events::{FormEvent, PendingLookup},
    state::{WorkflowState, FILL_ALL_FIELDS, LOOKUP_FAILED, NO_RESULTS},
    LookupController,
};
pub use dob::{DatePart, DateParts, DobBuilder};
pub use view::{FormView, ResultView, View};
