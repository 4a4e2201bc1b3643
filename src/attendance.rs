use crate::models::{AttendanceResult, MedicalResult, Subject};

pub const PASS_THRESHOLD: f64 = 75.0;
pub const MEDICAL_FLOOR: f64 = 65.0;

pub fn parse_hours(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Unrounded percentage; threshold checks use this value and only the
/// reported figure is rounded. Non-finite divisions collapse to 0.
fn raw_percentage(attended: i64, max: i64) -> f64 {
    let percentage = (attended as f64 / max as f64) * 100.0;
    if percentage.is_finite() {
        percentage
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute_attendance(subjects: &[Subject]) -> Vec<AttendanceResult> {
    subjects
        .iter()
        .map(|subject| {
            let max_hours = parse_hours(&subject.max_hours);
            let attended_hours = parse_hours(&subject.attended_hours);
            let percentage = raw_percentage(attended_hours, max_hours);

            let remaining_classes = if percentage < PASS_THRESHOLD {
                // x solving (attended + x) / (max + x) >= 0.75; not clamped
                ((0.75 * max_hours as f64 - attended_hours as f64) / 0.25).ceil() as i64
            } else {
                0
            };

            AttendanceResult {
                id: subject.id,
                name: subject.name.clone(),
                percentage: round2(percentage),
                attended_hours,
                max_hours,
                remaining_classes,
            }
        })
        .collect()
}

pub fn compute_medical_days(subjects: &[Subject]) -> Vec<MedicalResult> {
    subjects
        .iter()
        .map(|subject| {
            let max_hours = parse_hours(&subject.max_hours);
            let attended_hours = parse_hours(&subject.attended_hours);
            let percentage = raw_percentage(attended_hours, max_hours);

            // hours-equivalent shortfall, a coarser measure than the
            // remaining-classes gap
            let medical_days = if percentage >= MEDICAL_FLOOR && percentage < PASS_THRESHOLD {
                (0.75 * max_hours as f64 - attended_hours as f64).ceil() as i64
            } else {
                0
            };

            MedicalResult {
                id: subject.id,
                name: subject.name.clone(),
                percentage: round2(percentage),
                medical_days,
            }
        })
        .collect()
}
