//! Plain-text rendering of the form, the result, and the environment check.

use std::fmt;

use lookup_core::{FormView, ResultView, View};
use store_client::ConfigDiagnostics;

pub const TITLE: &str = "Examination Results";

pub fn render_view(view: &View<'_>) -> String {
    match view {
        View::Form(form) => render_form(form),
        View::Result(result) => render_result(result),
    }
}

pub fn render_form(form: &FormView<'_>) -> String {
    FormText(form).to_string()
}

pub fn render_result(result: &ResultView<'_>) -> String {
    ResultText(result).to_string()
}

pub fn render_diagnostics(diagnostics: &ConfigDiagnostics) -> String {
    DiagnosticsText(diagnostics).to_string()
}

fn date_field(value: Option<i32>, placeholder: &str, width: usize) -> String {
    match value {
        Some(v) => format!("{v:0width$}"),
        None => placeholder.to_string(),
    }
}

struct FormText<'a, 'v>(&'a FormView<'v>);

impl fmt::Display for FormText<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        writeln!(f, "{TITLE}")?;
        writeln!(f)?;
        writeln!(f, "Select Examination")?;
        if form.examinations.is_empty() {
            writeln!(f, "  (no examinations available)")?;
        }
        for (index, exam) in form.examinations.iter().enumerate() {
            let marker = if form.selected_examination == Some(&exam.id) {
                "*"
            } else {
                " "
            };
            writeln!(f, " {marker}{:>2}) {}", index + 1, exam.label())?;
        }
        if let Some(err) = form.catalog_error {
            writeln!(f, "  ! {err}")?;
        }

        let roll = if form.roll_number.is_empty() {
            "<enter your roll number>"
        } else {
            form.roll_number
        };
        writeln!(f, "Roll Number: {roll}")?;
        writeln!(
            f,
            "Date of Birth: {} / {} / {}",
            date_field(form.day, "DD", 2),
            date_field(form.month, "MM", 2),
            date_field(form.year, "YYYY", 4),
        )?;

        if let Some(message) = form.message {
            writeln!(f, "! {message}")?;
        }

        let action = if form.loading {
            "[ Searching... ]"
        } else if form.submit_enabled {
            "[ Find Results ]"
        } else {
            "[ Find Results ] (fill all fields)"
        };
        writeln!(f, "{action}")
    }
}

struct ResultText<'a, 'v>(&'a ResultView<'v>);

impl fmt::Display for ResultText<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let record = result.record;
        writeln!(f, "Result Details")?;
        if let Some(exam) = result.examination {
            writeln!(f, "Examination: {}", exam.label())?;
        }
        writeln!(f, "Roll Number: {}", record.roll_number)?;
        writeln!(f, "Date of Birth: {}", result.dob_display())?;
        writeln!(f, "Marks Obtained: {}", record.marks_obtained)?;
        writeln!(f, "Result: {}", record.outcome)?;
        if let Some(division) = &record.division {
            writeln!(f, "Division: {division}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", result.banner())
    }
}

struct DiagnosticsText<'a>(&'a ConfigDiagnostics);

impl fmt::Display for DiagnosticsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Environment Variables Check")?;
        for (name, configured) in self.0.entries() {
            let status = if configured { "Configured" } else { "Missing" };
            writeln!(f, "  {name:<20} {status}")?;
        }
        if self.0.all_configured() {
            writeln!(
                f,
                "All required environment variables are configured correctly."
            )
        } else {
            writeln!(
                f,
                "Some environment variables are missing. Please check your configuration."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::domain::{Examination, ExaminationId, Marks, Outcome, ResultRecord};

    use super::*;

    fn exams() -> Vec<Examination> {
        vec![Examination {
            id: ExaminationId::new("e1"),
            name: "Board Exam".into(),
            year: 2023,
        }]
    }

    fn empty_form(examinations: &[Examination]) -> FormView<'_> {
        FormView {
            examinations,
            selected_examination: None,
            roll_number: "",
            day: None,
            month: None,
            year: None,
            catalog_error: None,
            message: None,
            loading: false,
            submit_enabled: false,
        }
    }

    #[test]
    fn form_shows_placeholders_and_disabled_submit() {
        let exams = exams();
        let text = render_form(&empty_form(&exams));
        assert!(text.contains("1) Board Exam (2023)"));
        assert!(text.contains("Date of Birth: DD / MM / YYYY"));
        assert!(text.contains("(fill all fields)"));
    }

    #[test]
    fn form_shows_selection_dates_and_message() {
        let exams = exams();
        let id = ExaminationId::new("e1");
        let form = FormView {
            selected_examination: Some(&id),
            roll_number: "12345",
            day: Some(5),
            month: Some(6),
            year: Some(2005),
            message: Some("No results found for the provided details"),
            submit_enabled: true,
            ..empty_form(&exams)
        };
        let text = render_form(&form);
        assert!(text.contains("* 1) Board Exam (2023)"));
        assert!(text.contains("Roll Number: 12345"));
        assert!(text.contains("Date of Birth: 05 / 06 / 2005"));
        assert!(text.contains("! No results found for the provided details"));
        assert!(text.contains("[ Find Results ]\n"));
    }

    #[test]
    fn catalog_error_is_shown_under_selector() {
        let form = FormView {
            catalog_error: Some("Failed to load examinations. Please try again."),
            ..empty_form(&[])
        };
        let text = render_form(&form);
        assert!(text.contains("(no examinations available)"));
        assert!(text.contains("! Failed to load examinations. Please try again."));
    }

    #[test]
    fn result_lists_marks_outcome_division_and_banner() {
        let exams = exams();
        let record = ResultRecord {
            roll_number: "12345".into(),
            dob: NaiveDate::from_ymd_opt(2005, 6, 15).expect("date"),
            marks_obtained: Marks(410.0),
            outcome: Outcome::Pass,
            division: Some("First".into()),
        };
        let text = render_result(&ResultView {
            record: &record,
            examination: exams.first(),
        });
        assert!(text.contains("Examination: Board Exam (2023)"));
        assert!(text.contains("Date of Birth: Jun 15, 2005"));
        assert!(text.contains("Marks Obtained: 410"));
        assert!(text.contains("Result: Pass"));
        assert!(text.contains("Division: First"));
        assert!(text.contains("Congratulations!"));
    }

    #[test]
    fn failing_result_without_division() {
        let record = ResultRecord {
            roll_number: "7".into(),
            dob: NaiveDate::from_ymd_opt(2004, 1, 2).expect("date"),
            marks_obtained: Marks(120.0),
            outcome: Outcome::Fail,
            division: None,
        };
        let text = render_result(&ResultView {
            record: &record,
            examination: None,
        });
        assert!(!text.contains("Division"));
        assert!(text.contains("Better luck next time"));
    }

    #[test]
    fn diagnostics_report_missing_parameters() {
        let text = render_diagnostics(&ConfigDiagnostics {
            endpoint_configured: true,
            credential_configured: false,
        });
        assert!(text.contains("SUPABASE_URL"));
        assert!(text.contains("Configured"));
        assert!(text.contains("Missing"));
        assert!(text.contains("Some environment variables are missing"));
    }

    #[test]
    fn diagnostics_print_one_line_per_parameter() {
        let text = render_diagnostics(&ConfigDiagnostics {
            endpoint_configured: true,
            credential_configured: true,
        });
        assert_eq!(
            text,
            "Environment Variables Check\n\
             \x20 SUPABASE_URL         Configured\n\
             \x20 SUPABASE_ANON_KEY    Configured\n\
             All required environment variables are configured correctly.\n"
        );
    }

    #[test]
    fn empty_form_renders_every_section_in_order() {
        let text = render_form(&empty_form(&[]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                TITLE,
                "",
                "Select Examination",
                "  (no examinations available)",
                "Roll Number: <enter your roll number>",
                "Date of Birth: DD / MM / YYYY",
                "[ Find Results ] (fill all fields)",
            ]
        );
    }
}
