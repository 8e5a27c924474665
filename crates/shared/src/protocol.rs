use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    domain::{Examination, ExaminationId, Marks, Outcome, ResultRecord},
    error::RowError,
};

/// Wire format of the `dob` column and of the lookup filter.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Identifiers may be stored as text (uuid) or as integers.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExaminationRow {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub year: i32,
}

impl From<ExaminationRow> for Examination {
    fn from(row: ExaminationRow) -> Self {
        Self {
            id: ExaminationId(row.id),
            name: row.name,
            year: row.year,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub roll_no: String,
    pub dob: String,
    pub marks: f64,
    pub result: String,
    #[serde(default)]
    pub division: Option<String>,
}

impl TryFrom<ResultRow> for ResultRecord {
    type Error = RowError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        // Date columns may be serialized with a time component.
        let date_part = row.dob.get(..10).unwrap_or(&row.dob);
        let dob = NaiveDate::parse_from_str(date_part, DOB_FORMAT).map_err(|_| {
            RowError::InvalidDate {
                column: "dob",
                value: row.dob.clone(),
            }
        })?;
        Ok(Self {
            roll_number: row.roll_no,
            dob,
            marks_obtained: Marks(row.marks),
            outcome: Outcome::from(row.result),
            division: row.division.filter(|d| !d.is_empty()),
        })
    }
}

/// Exact-match key for a single result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    pub examination_id: ExaminationId,
    pub roll_number: String,
    /// `yyyy-MM-dd`
    pub dob: String,
}

impl LookupQuery {
    pub fn new(
        examination_id: ExaminationId,
        roll_number: impl Into<String>,
        dob: NaiveDate,
    ) -> Self {
        Self {
            examination_id,
            roll_number: roll_number.into(),
            dob: dob.format(DOB_FORMAT).to_string(),
        }
    }
}
