//! Object key layout.
//!
//! ```text
//! training-progress/{userId}/{courseId}/{moduleId}/{ts}.json
//! quiz-results/{userId}/{courseId}/{moduleId}/{ts}.json
//! training-reports/{userId}/{reportType}/{ts}.json
//! training-reports/pdf/{userId}/{reportType}-{ts}.pdf
//! health-check/{ts}.json
//! ```
//!
//! `ts` is epoch milliseconds.

/// Root of progress snapshots.
pub const PROGRESS_ROOT: &str = "training-progress/";
/// Root of quiz results.
pub const QUIZ_ROOT: &str = "quiz-results/";
/// Root of reports (JSON and PDF).
pub const REPORTS_ROOT: &str = "training-reports/";
/// Root of connectivity probes.
pub const HEALTH_ROOT: &str = "health-check/";

/// Key of a progress snapshot.
pub fn progress(user_id: &str, course_id: &str, module_id: &str, ts: i64) -> String {
    format!("{PROGRESS_ROOT}{user_id}/{course_id}/{module_id}/{ts}.json")
}

/// Key of a quiz result.
pub fn quiz_result(user_id: &str, course_id: &str, module_id: &str, ts: i64) -> String {
    format!("{QUIZ_ROOT}{user_id}/{course_id}/{module_id}/{ts}.json")
}

/// Key of a JSON report.
pub fn report(user_id: &str, report_type: &str, ts: i64) -> String {
    format!("{REPORTS_ROOT}{user_id}/{report_type}/{ts}.json")
}

/// Key of a PDF report.
pub fn pdf_report(user_id: &str, report_type: &str, ts: i64) -> String {
    format!("{REPORTS_ROOT}pdf/{user_id}/{report_type}-{ts}.pdf")
}

/// Key of a connectivity probe.
pub fn health_check(ts: i64) -> String {
    format!("{HEALTH_ROOT}{ts}.json")
}

/// Prefix selecting one user's progress, optionally narrowed to a course.
/// A blank course id means no filter.
pub fn progress_prefix(user_id: &str, course_id: Option<&str>) -> String {
    match non_blank(course_id) {
        Some(course) => format!("{PROGRESS_ROOT}{user_id}/{course}/"),
        None => format!("{PROGRESS_ROOT}{user_id}/"),
    }
}

/// Prefix selecting one user's quiz results, optionally narrowed to a
/// course and then a module. A module without a course is ignored, and
/// blank ids count as absent.
pub fn quiz_prefix(user_id: &str, course_id: Option<&str>, module_id: Option<&str>) -> String {
    match (non_blank(course_id), non_blank(module_id)) {
        (Some(course), Some(module)) => format!("{QUIZ_ROOT}{user_id}/{course}/{module}/"),
        (Some(course), None) => format!("{QUIZ_ROOT}{user_id}/{course}/"),
        _ => format!("{QUIZ_ROOT}{user_id}/"),
    }
}

fn non_blank(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

/// User id of a common prefix such as `training-progress/u1/`.
pub fn user_from_prefix<'a>(root: &str, prefix: &'a str) -> Option<&'a str> {
    prefix
        .strip_prefix(root)?
        .strip_suffix('/')
        .filter(|user| !user.is_empty() && !user.contains('/'))
}

/// Millisecond timestamp embedded in the last path segment of `key`.
pub fn timestamp_of(key: &str) -> Option<i64> {
    let file = key.rsplit('/').next()?;
    let stem = file.split('.').next()?;
    let digits = stem.rsplit('-').next()?;
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(
            progress("u1", "aws-101", "3", 1700000000000),
            "training-progress/u1/aws-101/3/1700000000000.json"
        );
        assert_eq!(
            quiz_result("u1", "c", "m", 5),
            "quiz-results/u1/c/m/5.json"
        );
        assert_eq!(report("u1", "summary", 5), "training-reports/u1/summary/5.json");
        assert_eq!(
            pdf_report("u1", "certificate", 5),
            "training-reports/pdf/u1/certificate-5.pdf"
        );
        assert_eq!(health_check(5), "health-check/5.json");
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(progress_prefix("u1", None), "training-progress/u1/");
        assert_eq!(progress_prefix("u1", Some("c")), "training-progress/u1/c/");
        assert_eq!(quiz_prefix("u1", None, Some("m")), "quiz-results/u1/");
        assert_eq!(quiz_prefix("u1", Some("c"), Some("m")), "quiz-results/u1/c/m/");
        assert_eq!(user_from_prefix(PROGRESS_ROOT, "training-progress/u1/"), Some("u1"));
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        assert_eq!(progress_prefix("u1", Some("")), "training-progress/u1/");
        assert_eq!(progress_prefix("u1", Some("  ")), "training-progress/u1/");
        assert_eq!(quiz_prefix("u1", Some(""), Some("m")), "quiz-results/u1/");
        assert_eq!(quiz_prefix("u1", Some("c"), Some("")), "quiz-results/u1/c/");
        assert_eq!(user_from_prefix(PROGRESS_ROOT, "quiz-results/u1/"), None);
    }

    #[test]
    fn test_timestamp_of() {
        assert_eq!(timestamp_of("training-progress/u/c/m/1700.json"), Some(1700));
        assert_eq!(timestamp_of("training-reports/pdf/u/cert-42.pdf"), Some(42));
        assert_eq!(timestamp_of("training-reports/u/x/notes.json"), None);
    }
}
