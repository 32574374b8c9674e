use crate::domain::model::Findings;
use std::fmt::Write;

const SIZE_HEADING: &str = "SIZE ERROR";
const NOT_NULL_HEADING: &str = "NOT-NULL CONSTRAINT ERROR";
const SUPERKEY_HEADING: &str = "SUPERKEY ERROR";
const TYPE_HEADING: &str = "TYPE ERROR";
const SUPERKEY_MESSAGE: &str = "\tThe candidate set of columns is not a superkey.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Summary,
    Detail,
}

impl AnalysisType {
    pub fn suffix(&self) -> &'static str {
        match self {
            AnalysisType::Summary => "summary",
            AnalysisType::Detail => "detail",
        }
    }

    pub fn output_file(&self, output_dir: &str, table_name: &str) -> String {
        format!("{}/{}-{}.txt", output_dir.trim_end_matches('/'), table_name, self.suffix())
    }
}

pub fn render(findings: &Findings, analysis_type: AnalysisType) -> String {
    match analysis_type {
        AnalysisType::Summary => render_summary(findings),
        AnalysisType::Detail => render_detail(findings),
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}\n{}", title, "-".repeat(title.len()));
}

/// Lists the failing columns only; an empty string means no errors.
pub fn render_summary(findings: &Findings) -> String {
    let mut out = String::new();

    if !findings.size_errors.is_empty() {
        heading(&mut out, SIZE_HEADING);
        for column in &findings.size_errors {
            let _ = writeln!(out, "\t{}", column);
        }
        out.push('\n');
    }

    if !findings.not_null_errors.is_empty() {
        heading(&mut out, NOT_NULL_HEADING);
        for column in &findings.not_null_errors {
            let _ = writeln!(out, "\t{}", column);
        }
        out.push('\n');
    }

    if findings.superkey_error {
        heading(&mut out, SUPERKEY_HEADING);
        out.push_str(SUPERKEY_MESSAGE);
    }

    if !findings.type_errors.is_empty() {
        separate(&mut out);
        heading(&mut out, TYPE_HEADING);
        for (column, _) in &findings.type_errors {
            let _ = writeln!(out, "\t{}", column);
        }
        out.push('\n');
    }

    out
}

/// Lists measured sizes and NULL counts for every relevant column.
pub fn render_detail(findings: &Findings) -> String {
    let width = name_width(findings);
    let mut out = String::new();

    if !findings.max_sizes.is_empty() {
        heading(&mut out, SIZE_HEADING);
        let _ = writeln!(out, "\t{:<width$}  MAX SIZE", "COLUMN", width = width);
        for (column, size) in &findings.max_sizes {
            if let Some(size) = size.measured() {
                let _ = writeln!(out, "\t{:<width$}: {}", column, size, width = width);
            }
        }
        out.push('\n');
    }

    if !findings.null_counts.is_empty() {
        heading(&mut out, NOT_NULL_HEADING);
        let _ = writeln!(out, "\t{:<width$}  NULL COUNT", "COLUMN", width = width);
        for (column, nulls) in &findings.null_counts {
            let _ = writeln!(out, "\t{:<width$}: {}", column, nulls, width = width);
        }
        out.push('\n');
    }

    if findings.superkey_error {
        heading(&mut out, SUPERKEY_HEADING);
        out.push_str(SUPERKEY_MESSAGE);
    }

    if !findings.type_errors.is_empty() {
        separate(&mut out);
        heading(&mut out, TYPE_HEADING);
        let _ = writeln!(out, "\t{:<width$}  INVALID COUNT", "COLUMN", width = width);
        for (column, invalid) in &findings.type_errors {
            let _ = writeln!(out, "\t{:<width$}: {}", column, invalid, width = width);
        }
        out.push('\n');
    }

    out
}

/// The superkey message has no trailing newline; sections after it need one.
fn separate(out: &mut String) {
    if out.ends_with(SUPERKEY_MESSAGE) {
        out.push_str("\n\n");
    }
}

fn name_width(findings: &Findings) -> usize {
    findings
        .max_sizes
        .iter()
        .map(|(column, _)| column.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MaxSize;

    fn findings() -> Findings {
        Findings {
            table_name: "colors".to_string(),
            row_count: 3,
            max_sizes: vec![
                ("color_name".to_string(), MaxSize::Measured(17)),
                ("hex".to_string(), MaxSize::Measured(7)),
                ("realnumber".to_string(), MaxSize::NotMeasured),
                ("all_null".to_string(), MaxSize::AllNull),
            ],
            size_errors: vec!["color_name".to_string()],
            null_counts: vec![("hex".to_string(), 0), ("all_null".to_string(), 3)],
            not_null_errors: vec!["all_null".to_string()],
            superkey_error: true,
            type_errors: vec![],
        }
    }

    #[test]
    fn test_render_summary() {
        let expected = "SIZE ERROR\n\
----------\n\
\tcolor_name\n\
\n\
NOT-NULL CONSTRAINT ERROR\n\
-------------------------\n\
\tall_null\n\
\n\
SUPERKEY ERROR\n\
--------------\n\
\tThe candidate set of columns is not a superkey.";
        assert_eq!(render(&findings(), AnalysisType::Summary), expected);
    }

    #[test]
    fn test_render_detail() {
        let expected = "SIZE ERROR\n\
----------\n\
\tCOLUMN      MAX SIZE\n\
\tcolor_name: 17\n\
\thex       : 7\n\
\n\
NOT-NULL CONSTRAINT ERROR\n\
-------------------------\n\
\tCOLUMN      NULL COUNT\n\
\thex       : 0\n\
\tall_null  : 3\n\
\n\
SUPERKEY ERROR\n\
--------------\n\
\tThe candidate set of columns is not a superkey.";
        assert_eq!(render(&findings(), AnalysisType::Detail), expected);
    }

    #[test]
    fn test_summary_without_errors_is_empty() {
        let mut clean = findings();
        clean.size_errors.clear();
        clean.not_null_errors.clear();
        clean.superkey_error = false;
        assert_eq!(render_summary(&clean), "");
    }

    #[test]
    fn test_summary_starts_with_first_present_section() {
        let mut only_nulls = findings();
        only_nulls.size_errors.clear();
        only_nulls.superkey_error = false;
        assert_eq!(
            render_summary(&only_nulls),
            "NOT-NULL CONSTRAINT ERROR\n-------------------------\n\tall_null\n\n"
        );
    }

    #[test]
    fn test_type_errors_follow_superkey_section() {
        let mut typed = findings();
        typed.type_errors = vec![("hex".to_string(), 2)];

        let summary = render_summary(&typed);
        assert!(summary.ends_with("superkey.\n\nTYPE ERROR\n----------\n\thex\n\n"));

        let detail = render_detail(&typed);
        assert!(detail.ends_with("TYPE ERROR\n----------\n\tCOLUMN      INVALID COUNT\n\thex       : 2\n\n"));
    }

    #[test]
    fn test_output_file() {
        assert_eq!(
            AnalysisType::Summary.output_file("output/", "colors"),
            "output/colors-summary.txt"
        );
        assert_eq!(AnalysisType::Detail.output_file("out", "colors"), "out/colors-detail.txt");
    }
}
