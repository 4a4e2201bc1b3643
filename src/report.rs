use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{AttendanceResult, MedicalResult, Subject, ThresholdSummary};

pub fn summarize_threshold(results: &[AttendanceResult]) -> ThresholdSummary {
    let above = results
        .iter()
        .filter(|result| result.percentage >= 75.0)
        .count();

    ThresholdSummary {
        above_threshold: above,
        below_threshold: results.len() - above,
    }
}

pub fn attendance_advice(result: &AttendanceResult) -> String {
    if result.remaining_classes > 0 {
        format!(
            "You need to attend {} more classes to reach 75%.",
            result.remaining_classes
        )
    } else {
        "Attendance is above 75%!".to_string()
    }
}

pub fn medical_advice(result: &MedicalResult) -> String {
    if result.medical_days > 0 {
        format!(
            "You need to apply for {} medical days to reach 75%.",
            result.medical_days
        )
    } else {
        "No medical days needed or attendance is below 65%.".to_string()
    }
}

pub fn build_report(
    generated_on: NaiveDate,
    subjects: &[Subject],
    results: &[AttendanceResult],
    medical_results: &[MedicalResult],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Attendance Report");
    let _ = writeln!(
        output,
        "Generated on {} for {} subjects",
        generated_on,
        subjects.len()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Hours Breakdown");

    if results.is_empty() {
        let _ = writeln!(output, "No attendance results calculated.");
    } else {
        for result in results {
            let _ = writeln!(
                output,
                "- {}: attended {} of {} hours",
                result.name, result.attended_hours, result.max_hours
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Attendance Overview");

    if results.is_empty() {
        let _ = writeln!(output, "No attendance results calculated.");
    } else {
        let summary = summarize_threshold(results);
        let _ = writeln!(output, "- At or above 75%: {}", summary.above_threshold);
        let _ = writeln!(output, "- Below 75%: {}", summary.below_threshold);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Attendance Results");

    if results.is_empty() {
        let _ = writeln!(output, "No attendance results calculated.");
    } else {
        for result in results {
            let _ = writeln!(
                output,
                "- {} ({:.2}%): {}",
                result.name,
                result.percentage,
                attendance_advice(result)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Medical Days");

    if medical_results.is_empty() {
        let _ = writeln!(output, "No medical day results calculated.");
    } else {
        for result in medical_results {
            let _ = writeln!(
                output,
                "- {} ({:.2}%): {}",
                result.name,
                result.percentage,
                medical_advice(result)
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn attendance_result(name: &str, percentage: f64, remaining: i64) -> AttendanceResult {
        AttendanceResult {
            id: Uuid::new_v4(),
            name: name.to_string(),
            percentage,
            attended_hours: 10,
            max_hours: 20,
            remaining_classes: remaining,
        }
    }

    #[test]
    fn exactly_seventy_five_counts_as_above() {
        let results = vec![
            attendance_result("Math", 75.0, 0),
            attendance_result("Bio", 74.99, 1),
        ];
        let summary = summarize_threshold(&results);
        assert_eq!(summary.above_threshold, 1);
        assert_eq!(summary.below_threshold, 1);
    }

    #[test]
    fn advice_reflects_the_remaining_gap() {
        assert_eq!(
            attendance_advice(&attendance_result("Math", 50.0, 20)),
            "You need to attend 20 more classes to reach 75%."
        );
        assert_eq!(
            attendance_advice(&attendance_result("Math", 80.0, 0)),
            "Attendance is above 75%!"
        );
    }

    #[test]
    fn report_carries_every_section() {
        let generated_on = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let subject = Subject::new("Math");
        let results = vec![attendance_result("Math", 50.0, 20)];
        let medical = vec![MedicalResult {
            id: results[0].id,
            name: "Math".to_string(),
            percentage: 70.0,
            medical_days: 1,
        }];

        let report = build_report(generated_on, &[subject], &results, &medical);

        assert!(report.contains("# Attendance Report"));
        assert!(report.contains("Generated on 2026-08-07 for 1 subjects"));
        assert!(report.contains("## Hours Breakdown"));
        assert!(report.contains("- Math: attended 10 of 20 hours"));
        assert!(report.contains("## Attendance Overview"));
        assert!(report.contains("- Below 75%: 1"));
        assert!(report.contains("- Math (50.00%): You need to attend 20 more classes"));
        assert!(report.contains("## Medical Days"));
        assert!(report.contains("You need to apply for 1 medical days"));
    }

    #[test]
    fn empty_inputs_produce_empty_state_lines() {
        let generated_on = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let report = build_report(generated_on, &[], &[], &[]);
        assert!(report.contains("No attendance results calculated."));
        assert!(report.contains("No medical day results calculated."));
    }
}
