use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ExaminationId);

/// Read-only reference data listed in the examination selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examination {
    pub id: ExaminationId,
    pub name: String,
    pub year: i32,
}

impl Examination {
    /// Label shown for this examination in the selector.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.year)
    }
}

/// Pass/fail status stored with a result. Values outside the known set are
/// kept verbatim so a new status on the store side still renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    Pass,
    Fail,
    Other(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for Outcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pass" => Self::Pass,
            "Fail" => Self::Fail,
            _ => Self::Other(value),
        }
    }
}

impl From<Outcome> for String {
    fn from(value: Outcome) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks as stored; integral values display without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marks(pub f64);

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.is_finite() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub roll_number: String,
    pub dob: NaiveDate,
    pub marks_obtained: Marks,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_keeps_unknown_values_verbatim() {
        assert_eq!(Outcome::from("Pass".to_string()), Outcome::Pass);
        assert_eq!(Outcome::from("Fail".to_string()), Outcome::Fail);
        let other = Outcome::from("Withheld".to_string());
        assert_eq!(other, Outcome::Other("Withheld".into()));
        assert_eq!(other.to_string(), "Withheld");
        assert!(!other.is_pass());
    }

    #[test]
    fn integral_marks_display_without_fraction() {
        assert_eq!(Marks(410.0).to_string(), "410");
        assert_eq!(Marks(72.5).to_string(), "72.5");
    }

    #[test]
    fn examination_label_includes_year() {
        let exam = Examination {
            id: ExaminationId::new("e1"),
            name: "Board Exam".into(),
            year: 2023,
        };
        assert_eq!(exam.label(), "Board Exam (2023)");
    }
}
