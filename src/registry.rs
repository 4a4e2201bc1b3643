use thiserror::Error;
use uuid::Uuid;

use crate::attendance;
use crate::highlight::HighlightPulse;
use crate::models::{AttendanceResult, MedicalResult, Subject};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("subject name cannot be empty")]
    EmptyName,
    #[error("subject \"{0}\" already exists")]
    DuplicateName(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourField {
    Max,
    Attended,
}

/// Owns the whole tracker state: the subject list, the last-computed
/// result snapshots, and the transient highlight flag.
#[derive(Debug, Default)]
pub struct SubjectRegistry {
    subjects: Vec<Subject>,
    results: Vec<AttendanceResult>,
    medical_results: Vec<MedicalResult>,
    pulse: HighlightPulse,
}

impl SubjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subject(&mut self, name: &str) -> Result<Uuid, RegistryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let lowered = trimmed.to_lowercase();
        if self
            .subjects
            .iter()
            .any(|subject| subject.name.to_lowercase() == lowered)
        {
            return Err(RegistryError::DuplicateName(trimmed.to_string()));
        }

        let subject = Subject::new(trimmed);
        let id = subject.id;
        self.subjects.push(subject);
        Ok(id)
    }

    /// Overwrites a raw hours field. Unknown ids are ignored; values are
    /// never validated here, parsing happens at calculation time.
    pub fn update_field(&mut self, id: Uuid, field: HourField, value: &str) {
        if let Some(subject) = self.subjects.iter_mut().find(|subject| subject.id == id) {
            match field {
                HourField::Max => subject.max_hours = value.to_string(),
                HourField::Attended => subject.attended_hours = value.to_string(),
            }
        }
    }

    pub fn delete_subject(&mut self, id: Uuid) {
        self.subjects.retain(|subject| subject.id != id);
        // Result entries survive only while a live subject still matches
        // them by id and name; the deleted subject's rows and any stale
        // leftovers drop out together.
        let subjects = &self.subjects;
        self.results
            .retain(|result| subjects.iter().any(|s| s.id == result.id && s.name == result.name));
        self.medical_results
            .retain(|result| subjects.iter().any(|s| s.id == result.id && s.name == result.name));
    }

    /// Replaces the attendance snapshot wholesale and arms the highlight.
    pub fn calculate_attendance(&mut self) -> &[AttendanceResult] {
        self.results = attendance::compute_attendance(&self.subjects);
        self.pulse.trigger();
        &self.results
    }

    /// Replaces the medical-day snapshot wholesale and arms the highlight.
    pub fn calculate_medical_days(&mut self) -> &[MedicalResult] {
        self.medical_results = attendance::compute_medical_days(&self.subjects);
        self.pulse.trigger();
        &self.medical_results
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn results(&self) -> &[AttendanceResult] {
        &self.results
    }

    pub fn medical_results(&self) -> &[MedicalResult] {
        &self.medical_results
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Subject> {
        let needle = name.trim().to_lowercase();
        self.subjects
            .iter()
            .find(|subject| subject.name.to_lowercase() == needle)
    }

    pub fn highlight_active(&self) -> bool {
        self.pulse.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let mut registry = SubjectRegistry::new();
        registry.add_subject("Math").unwrap();
        let err = registry.add_subject("math").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("math".to_string()));
        assert_eq!(registry.subjects().len(), 1);
    }

    #[test]
    fn rejects_blank_names() {
        let mut registry = SubjectRegistry::new();
        assert_eq!(registry.add_subject("   ").unwrap_err(), RegistryError::EmptyName);
        assert!(registry.subjects().is_empty());
    }

    #[test]
    fn trims_names_on_add() {
        let mut registry = SubjectRegistry::new();
        registry.add_subject("  Math  ").unwrap();
        assert_eq!(registry.subjects()[0].name, "Math");
    }

    #[test]
    fn updates_hours_on_matching_subject_only() {
        let mut registry = SubjectRegistry::new();
        let id = registry.add_subject("Math").unwrap();
        registry.update_field(id, HourField::Max, "20");
        registry.update_field(id, HourField::Attended, "10");
        registry.update_field(Uuid::new_v4(), HourField::Max, "99");

        let subject = &registry.subjects()[0];
        assert_eq!(subject.max_hours, "20");
        assert_eq!(subject.attended_hours, "10");
    }

    #[test]
    fn calculation_replaces_the_snapshot_and_pulses() {
        let mut registry = SubjectRegistry::new();
        let id = registry.add_subject("Math").unwrap();
        registry.update_field(id, HourField::Max, "20");
        registry.update_field(id, HourField::Attended, "10");

        registry.calculate_attendance();
        assert_eq!(registry.results().len(), 1);
        assert_eq!(registry.results()[0].remaining_classes, 20);
        assert!(registry.highlight_active());

        registry.update_field(id, HourField::Attended, "16");
        registry.calculate_attendance();
        assert_eq!(registry.results().len(), 1);
        assert_eq!(registry.results()[0].remaining_classes, 0);
    }

    #[test]
    fn deleting_a_subject_drops_only_its_results() {
        let mut registry = SubjectRegistry::new();
        let math = registry.add_subject("Math").unwrap();
        let bio = registry.add_subject("Bio").unwrap();
        registry.update_field(math, HourField::Max, "20");
        registry.update_field(math, HourField::Attended, "10");
        registry.update_field(bio, HourField::Max, "20");
        registry.update_field(bio, HourField::Attended, "14");
        registry.calculate_attendance();
        registry.calculate_medical_days();

        registry.delete_subject(math);

        assert_eq!(registry.subjects().len(), 1);
        assert_eq!(registry.results().len(), 1);
        assert_eq!(registry.results()[0].name, "Bio");
        assert_eq!(registry.medical_results().len(), 1);
        assert_eq!(registry.medical_results()[0].name, "Bio");
    }

    #[test]
    fn deleting_an_unknown_id_changes_nothing() {
        let mut registry = SubjectRegistry::new();
        let id = registry.add_subject("Math").unwrap();
        registry.update_field(id, HourField::Max, "20");
        registry.calculate_attendance();

        registry.delete_subject(Uuid::new_v4());

        assert_eq!(registry.subjects().len(), 1);
        assert_eq!(registry.results().len(), 1);
    }

    #[test]
    fn finds_subjects_by_name_case_insensitively() {
        let mut registry = SubjectRegistry::new();
        let id = registry.add_subject("Math").unwrap();
        assert_eq!(registry.find_by_name(" MATH ").map(|s| s.id), Some(id));
        assert!(registry.find_by_name("Bio").is_none());
    }
}
