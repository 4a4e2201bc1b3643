use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    /// Raw field text; parsed only when a calculation runs.
    pub max_hours: String,
    pub attended_hours: String,
}

impl Subject {
    pub fn new(name: &str) -> Self {
        Subject {
            id: Uuid::new_v4(),
            name: name.to_string(),
            max_hours: String::new(),
            attended_hours: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceResult {
    pub id: Uuid,
    pub name: String,
    pub percentage: f64,
    pub attended_hours: i64,
    pub max_hours: i64,
    pub remaining_classes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalResult {
    pub id: Uuid,
    pub name: String,
    pub percentage: f64,
    pub medical_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSummary {
    pub above_threshold: usize,
    pub below_threshold: usize,
}
