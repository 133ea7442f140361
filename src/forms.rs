//! Editable drafts behind the modal forms. Fields hold raw text as typed;
//! `validate` turns a draft into the request body or says what is wrong.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::time::{add_minutes_to_time, minutes_to_time, parse_hhmm, time_to_minutes};
use crate::api::*;

pub const ROOM_TYPES: [&str; 3] = ["Lecture Classroom", "Computer Lab", "Seminar"];
pub const MODULE_CATEGORIES: [&str; 3] = ["Core", "Shared", "Elective"];
pub const ASSESSMENT_TYPES: [&str; 6] = [
    "Written Exam",
    "Presentation",
    "Project",
    "Report",
    "Documentation",
    "Oral Exam",
];
pub const PROGRAM_LEVELS: [&str; 2] = ["Bachelor", "Master"];
pub const CAMPUSES: [&str; 3] = ["Berlin", "Dusseldorf", "Munich"];
pub const EMPLOYMENT_TYPES: [&str; 2] = ["Full time", "Freelance"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be a whole number (got \"{value}\")")]
    NotAnInteger { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{field} must be a time between 00:00 and 23:59 (got \"{value}\")")]
    InvalidTime { field: &'static str, value: String },
    #[error("End time must be after the start time")]
    EndBeforeStart,
    #[error("Select at least 1 group")]
    NoGroups,
    #[error("Assessment weights must add up to 100% (currently {0}%)")]
    AssessmentWeights(i64),
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn integer(value: &str, field: &'static str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: value.trim().to_string(),
        })
}

fn positive(value: &str, field: &'static str) -> Result<i64, ValidationError> {
    let n = integer(value, field)?;
    if n <= 0 {
        Err(ValidationError::NotPositive(field))
    } else {
        Ok(n)
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// --- Rooms ---

#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    pub name: String,
    pub capacity: String,
    pub room_type: String,
    pub available: bool,
    pub equipment: String,
    pub location: String,
}

impl RoomDraft {
    pub fn new(location: Option<&str>) -> Self {
        Self {
            name: String::new(),
            capacity: String::new(),
            room_type: ROOM_TYPES[0].to_string(),
            available: true,
            equipment: String::new(),
            location: location.unwrap_or_default().to_string(),
        }
    }

    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            capacity: room.capacity.to_string(),
            room_type: room.room_type.clone(),
            available: room.status,
            equipment: room.equipment.clone().unwrap_or_default(),
            location: room.location.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<RoomPayload, ValidationError> {
        Ok(RoomPayload {
            name: required(&self.name, "Room name")?,
            capacity: positive(&self.capacity, "Capacity")?,
            room_type: required(&self.room_type, "Room type")?,
            status: self.available,
            equipment: optional(&self.equipment),
            location: optional(&self.location),
        })
    }
}

// --- Modules ---

/// One weighted part of a module's assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub weight: i64,
}

impl AssessmentItem {
    fn default_exam() -> Self {
        Self {
            kind: ASSESSMENT_TYPES[0].to_string(),
            weight: 100,
        }
    }
}

/// The service stores the breakdown as a JSON string in `assessment_type`;
/// older records hold a plain assessment name, read as a single 100% item.
pub fn parse_assessments(value: Option<&str>) -> Vec<AssessmentItem> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return vec![AssessmentItem::default_exam()];
    };
    match serde_json::from_str::<Vec<AssessmentItem>>(raw) {
        Ok(items) if !items.is_empty() => items,
        _ => vec![AssessmentItem {
            kind: raw.to_string(),
            weight: 100,
        }],
    }
}

pub fn encode_assessments(items: &[AssessmentItem]) -> String {
    let clean: Vec<AssessmentItem> = items
        .iter()
        .filter(|i| !i.kind.trim().is_empty())
        .map(|i| AssessmentItem {
            kind: i.kind.trim().to_string(),
            weight: i.weight,
        })
        .collect();
    let items = if clean.is_empty() {
        vec![AssessmentItem::default_exam()]
    } else {
        clean
    };
    serde_json::to_string(&items).unwrap_or_default()
}

/// "Written Exam (70%), Documentation (30%)"
pub fn describe_assessments(value: Option<&str>) -> String {
    parse_assessments(value)
        .iter()
        .map(|i| format!("{} ({}%)", i.kind, i.weight))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDraft {
    pub module_code: String,
    pub name: String,
    pub ects: String,
    pub room_type: String,
    pub semester: String,
    pub category: String,
    pub program_id: Option<i64>,
    pub specialization_ids: Vec<i64>,
    pub assessments: Vec<AssessmentItem>,
}

impl Default for ModuleDraft {
    fn default() -> Self {
        Self {
            module_code: String::new(),
            name: String::new(),
            ects: "5".to_string(),
            room_type: ROOM_TYPES[0].to_string(),
            semester: "1".to_string(),
            category: MODULE_CATEGORIES[0].to_string(),
            program_id: None,
            specialization_ids: Vec::new(),
            assessments: vec![AssessmentItem::default_exam()],
        }
    }
}

impl ModuleDraft {
    pub fn from_module(module: &Module) -> Self {
        Self {
            module_code: module.module_code.clone(),
            name: module.name.clone(),
            ects: module.ects.to_string(),
            room_type: module.room_type.clone(),
            semester: module.semester.to_string(),
            category: module.category.clone().unwrap_or_else(|| MODULE_CATEGORIES[0].to_string()),
            program_id: module.program_id,
            specialization_ids: module.specialization_ids.clone(),
            assessments: parse_assessments(module.assessment_type.as_deref()),
        }
    }

    pub fn toggle_specialization(&mut self, id: i64) {
        if let Some(pos) = self.specialization_ids.iter().position(|&s| s == id) {
            self.specialization_ids.remove(pos);
        } else {
            self.specialization_ids.push(id);
        }
    }

    pub fn validate(&self) -> Result<ModulePayload, ValidationError> {
        let total: i64 = self
            .assessments
            .iter()
            .filter(|i| !i.kind.trim().is_empty())
            .map(|i| i.weight)
            .sum();
        if !self.assessments.is_empty() && total != 100 {
            return Err(ValidationError::AssessmentWeights(total));
        }
        Ok(ModulePayload {
            module_code: required(&self.module_code, "Module code")?,
            name: required(&self.name, "Module name")?,
            ects: integer(&self.ects, "ECTS")?,
            room_type: required(&self.room_type, "Room type")?,
            assessment_type: Some(encode_assessments(&self.assessments)),
            semester: positive(&self.semester, "Semester")?,
            category: optional(&self.category),
            program_id: self.program_id,
            specialization_ids: self.specialization_ids.clone(),
        })
    }
}

// --- Programs and specializations ---

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramDraft {
    pub name: String,
    pub acronym: String,
    pub head_of_program: String,
    pub total_ects: String,
    pub level: String,
    pub active: bool,
    pub start_date: String,
    pub location: String,
}

impl Default for ProgramDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            acronym: String::new(),
            head_of_program: String::new(),
            total_ects: "180".to_string(),
            level: PROGRAM_LEVELS[0].to_string(),
            active: true,
            start_date: String::new(),
            location: String::new(),
        }
    }
}

impl ProgramDraft {
    pub fn from_program(program: &StudyProgram) -> Self {
        Self {
            name: program.name.clone(),
            acronym: program.acronym.clone(),
            head_of_program: program.head_of_program.clone(),
            total_ects: program.total_ects.to_string(),
            level: program.level.clone(),
            active: program.status,
            start_date: program.start_date.clone(),
            location: program.location.clone().unwrap_or_default(),
        }
    }

    /// An empty start date becomes `today`
    pub fn validate(&self, today: NaiveDate) -> Result<ProgramPayload, ValidationError> {
        let start_date = optional(&self.start_date)
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
        Ok(ProgramPayload {
            name: required(&self.name, "Program name")?,
            acronym: required(&self.acronym, "Acronym")?,
            head_of_program: self.head_of_program.trim().to_string(),
            status: self.active,
            start_date,
            total_ects: positive(&self.total_ects, "Total ECTS")?,
            location: optional(&self.location),
            level: required(&self.level, "Level")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecializationDraft {
    pub name: String,
    pub acronym: String,
    /// Start date and status of the record being edited
    pub existing: Option<(String, bool)>,
}

impl SpecializationDraft {
    pub fn from_specialization(spec: &Specialization) -> Self {
        Self {
            name: spec.name.clone(),
            acronym: spec.acronym.clone(),
            existing: Some((spec.start_date.clone(), spec.status)),
        }
    }

    /// A blank acronym is derived from the first three letters of the name.
    /// New specializations start today and are active.
    pub fn validate(&self, program_id: i64, today: NaiveDate) -> Result<SpecializationPayload, ValidationError> {
        let name = required(&self.name, "Specialization name")?;
        let acronym = optional(&self.acronym)
            .unwrap_or_else(|| name.chars().take(3).collect::<String>().to_uppercase());
        let (start_date, status) = match &self.existing {
            Some((start, status)) if !start.trim().is_empty() => (start.trim().to_string(), *status),
            Some((_, status)) => (today.format("%Y-%m-%d").to_string(), *status),
            None => (today.format("%Y-%m-%d").to_string(), true),
        };
        Ok(SpecializationPayload {
            program_id,
            name,
            acronym,
            start_date,
            status,
        })
    }
}

// --- Directory: lecturers, groups, semesters ---

#[derive(Debug, Clone, PartialEq)]
pub struct LecturerDraft {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub employment_type: String,
    pub email: String,
    pub location: String,
}

impl Default for LecturerDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            title: String::new(),
            employment_type: "Full time".to_string(),
            email: String::new(),
            location: String::new(),
        }
    }
}

impl LecturerDraft {
    pub fn from_lecturer(lecturer: &Lecturer) -> Self {
        Self {
            first_name: lecturer.first_name.clone(),
            last_name: lecturer.last_name.clone().unwrap_or_default(),
            title: lecturer.title.clone(),
            employment_type: lecturer.employment_type.clone(),
            email: lecturer.mdh_email.clone().unwrap_or_default(),
            location: lecturer.location.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<LecturerPayload, ValidationError> {
        Ok(LecturerPayload {
            first_name: required(&self.first_name, "First name")?,
            last_name: optional(&self.last_name),
            title: self.title.trim().to_string(),
            employment_type: required(&self.employment_type, "Employment type")?,
            personal_email: None,
            mdh_email: optional(&self.email),
            phone: None,
            location: optional(&self.location),
            teaching_load: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupDraft {
    pub name: String,
    pub size: String,
    pub program: String,
    pub description: String,
}

impl GroupDraft {
    pub fn from_group(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            size: group.size.to_string(),
            program: group.program.clone().unwrap_or_default(),
            description: group.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<GroupPayload, ValidationError> {
        Ok(GroupPayload {
            name: required(&self.name, "Group name")?,
            size: positive(&self.size, "Group size")?,
            description: optional(&self.description),
            email: None,
            program: optional(&self.program),
            parent_group: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterDraft {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl SemesterDraft {
    pub fn from_semester(semester: &Semester) -> Self {
        Self {
            name: semester.name.clone(),
            start_date: semester.start_date.clone().unwrap_or_default(),
            end_date: semester.end_date.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<SemesterPayload, ValidationError> {
        let name = required(&self.name, "Semester name")?;
        let start = optional(&self.start_date);
        let end = optional(&self.end_date);
        if let (Some(s), Some(e)) = (start.as_deref(), end.as_deref()) {
            match (NaiveDate::parse_from_str(s, "%Y-%m-%d"), NaiveDate::parse_from_str(e, "%Y-%m-%d")) {
                (Ok(s), Ok(e)) if e <= s => return Err(ValidationError::EndBeforeStart),
                _ => {}
            }
        }
        Ok(SemesterPayload {
            name,
            start_date: start,
            end_date: end,
        })
    }
}

// --- Timetable entries ---

/// A new class, opened from a clicked cell of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntryDraft {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub offered_module_id: Option<i64>,
    pub room_id: Option<i64>,
    pub group_ids: Vec<i64>,
}

impl ScheduleEntryDraft {
    /// End time defaults to one hour after the clicked slot
    pub fn at(day_of_week: &str, start_time: &str) -> Self {
        Self {
            day_of_week: day_of_week.to_string(),
            start_time: start_time.to_string(),
            end_time: add_minutes_to_time(start_time, 60),
            offered_module_id: None,
            room_id: None,
            group_ids: Vec::new(),
        }
    }

    /// Rooms come back by name only, so the caller resolves the id
    pub fn from_entry(entry: &ScheduleEntry, room_id: Option<i64>) -> Self {
        Self {
            day_of_week: entry.day_of_week.clone(),
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            offered_module_id: entry.offered_module_id,
            room_id,
            group_ids: entry.group_ids.clone(),
        }
    }

    pub fn toggle_group(&mut self, id: i64) {
        if let Some(pos) = self.group_ids.iter().position(|&g| g == id) {
            self.group_ids.remove(pos);
        } else {
            self.group_ids.push(id);
        }
    }

    pub fn validate(&self, semester: &str) -> Result<ScheduleEntryPayload, ValidationError> {
        let offered_module_id = self.offered_module_id.ok_or(ValidationError::Required("Module"))?;
        let room_id = self.room_id.ok_or(ValidationError::Required("Room"))?;
        let end = required(&self.end_time, "End time")?;
        let end_minutes = parse_hhmm(&end).ok_or(ValidationError::InvalidTime {
            field: "End time",
            value: end.clone(),
        })?;
        let end_time = minutes_to_time(end_minutes);
        if end_minutes <= time_to_minutes(&self.start_time) {
            return Err(ValidationError::EndBeforeStart);
        }
        if self.group_ids.is_empty() {
            return Err(ValidationError::NoGroups);
        }
        Ok(ScheduleEntryPayload {
            offered_module_id,
            room_id: Some(room_id),
            day_of_week: required(&self.day_of_week, "Day")?,
            start_time: required(&self.start_time, "Start time")?,
            end_time,
            semester: required(semester, "Semester")?,
            group_ids: self.group_ids.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 16).unwrap()
    }

    #[test]
    fn room_capacity_must_be_a_positive_integer() {
        let mut draft = RoomDraft::new(Some("Berlin"));
        draft.name = "A-101".into();
        draft.capacity = "abc".into();
        assert!(matches!(draft.validate(), Err(ValidationError::NotAnInteger { .. })));
        draft.capacity = "0".into();
        assert_eq!(draft.validate(), Err(ValidationError::NotPositive("Capacity")));
        draft.capacity = " 40 ".into();
        let payload = draft.validate().unwrap();
        assert_eq!(payload.capacity, 40);
        assert_eq!(payload.location.as_deref(), Some("Berlin"));
        assert_eq!(payload.room_type, "Lecture Classroom");
    }

    #[test]
    fn room_name_is_required() {
        let mut draft = RoomDraft::new(None);
        draft.capacity = "10".into();
        assert_eq!(draft.validate(), Err(ValidationError::Required("Room name")));
    }

    #[test]
    fn module_numbers_are_validated() {
        let mut draft = ModuleDraft {
            module_code: "CS101".into(),
            name: "Databases".into(),
            ..ModuleDraft::default()
        };
        draft.ects = "five".into();
        assert!(matches!(draft.validate(), Err(ValidationError::NotAnInteger { field: "ECTS", .. })));
        draft.ects = "6".into();
        let payload = draft.validate().unwrap();
        assert_eq!(payload.ects, 6);
        assert_eq!(payload.semester, 1);
        assert_eq!(
            payload.assessment_type.as_deref(),
            Some(r#"[{"type":"Written Exam","weight":100}]"#)
        );
    }

    #[test]
    fn assessment_weights_must_total_100() {
        let mut draft = ModuleDraft {
            module_code: "CS101".into(),
            name: "Databases".into(),
            ..ModuleDraft::default()
        };
        draft.assessments = vec![
            AssessmentItem { kind: "Written Exam".into(), weight: 70 },
            AssessmentItem { kind: "Project".into(), weight: 20 },
        ];
        assert_eq!(draft.validate(), Err(ValidationError::AssessmentWeights(90)));
    }

    #[test]
    fn assessment_strings_in_both_formats() {
        let items = parse_assessments(Some(r#"[{"type":"Written Exam","weight":70},{"type":"Documentation","weight":30}]"#));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].weight, 30);
        assert_eq!(
            describe_assessments(Some("Oral Exam")),
            "Oral Exam (100%)"
        );
        assert_eq!(parse_assessments(None), vec![AssessmentItem::default_exam()]);
        assert_eq!(encode_assessments(&[]), r#"[{"type":"Written Exam","weight":100}]"#);
    }

    #[test]
    fn specialization_toggle() {
        let mut draft = ModuleDraft::default();
        draft.toggle_specialization(3);
        draft.toggle_specialization(5);
        draft.toggle_specialization(3);
        assert_eq!(draft.specialization_ids, vec![5]);
    }

    #[test]
    fn program_defaults_start_date_to_today() {
        let draft = ProgramDraft {
            name: "Computer Science".into(),
            acronym: "CS".into(),
            ..ProgramDraft::default()
        };
        let payload = draft.validate(today()).unwrap();
        assert_eq!(payload.start_date, "2025-10-16");
        assert_eq!(payload.total_ects, 180);
        assert_eq!(payload.level, "Bachelor");
    }

    #[test]
    fn specialization_acronym_is_derived() {
        let draft = SpecializationDraft {
            name: "Data Science".into(),
            ..SpecializationDraft::default()
        };
        let payload = draft.validate(4, today()).unwrap();
        assert_eq!(payload.acronym, "DAT");
        assert_eq!(payload.program_id, 4);
        assert!(payload.status);
    }

    #[test]
    fn edited_specialization_keeps_start_and_status() {
        let spec = Specialization {
            id: 9,
            program_id: Some(4),
            name: "Data Science".into(),
            acronym: "DS".into(),
            start_date: "2023-04-01".into(),
            status: false,
            study_program: None,
        };
        let payload = SpecializationDraft::from_specialization(&spec).validate(4, today()).unwrap();
        assert_eq!(payload.start_date, "2023-04-01");
        assert!(!payload.status);
        assert_eq!(payload.acronym, "DS");
    }

    #[test]
    fn semester_dates_must_be_ordered() {
        let draft = SemesterDraft {
            name: "Winter 2025".into(),
            start_date: "2026-02-28".into(),
            end_date: "2025-10-01".into(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn group_size_must_be_positive() {
        let draft = GroupDraft {
            name: "CS-1".into(),
            size: "-3".into(),
            ..GroupDraft::default()
        };
        assert_eq!(draft.validate(), Err(ValidationError::NotPositive("Group size")));
    }

    #[test]
    fn new_entry_defaults_to_one_hour() {
        let draft = ScheduleEntryDraft::at("Monday", "09:30");
        assert_eq!(draft.end_time, "10:30");
    }

    #[test]
    fn entry_validation_order() {
        let mut draft = ScheduleEntryDraft::at("Monday", "09:00");
        assert_eq!(draft.validate("Winter 2025"), Err(ValidationError::Required("Module")));
        draft.offered_module_id = Some(3);
        assert_eq!(draft.validate("Winter 2025"), Err(ValidationError::Required("Room")));
        draft.room_id = Some(8);
        assert_eq!(draft.validate("Winter 2025"), Err(ValidationError::NoGroups));
        draft.toggle_group(2);
        draft.end_time = "09:00".into();
        assert_eq!(draft.validate("Winter 2025"), Err(ValidationError::EndBeforeStart));
        draft.end_time = "10:15".into();
        let payload = draft.validate("Winter 2025").unwrap();
        assert_eq!(payload.group_ids, vec![2]);
        assert_eq!(payload.room_id, Some(8));
        assert_eq!(payload.semester, "Winter 2025");
    }

    #[test]
    fn entry_rejects_out_of_range_end_times() {
        let mut draft = ScheduleEntryDraft::at("Monday", "09:00");
        draft.offered_module_id = Some(3);
        draft.room_id = Some(8);
        draft.toggle_group(2);
        for bad in ["10:99", "25:00", "99:00", "99999999:00", "ten"] {
            draft.end_time = bad.into();
            assert_eq!(
                draft.validate("Winter 2025"),
                Err(ValidationError::InvalidTime { field: "End time", value: bad.into() }),
            );
        }
    }

    #[test]
    fn entry_end_time_is_normalised() {
        let mut draft = ScheduleEntryDraft::at("Monday", "09:00");
        draft.offered_module_id = Some(3);
        draft.room_id = Some(8);
        draft.toggle_group(2);
        draft.end_time = "9:45".into();
        assert_eq!(draft.validate("Winter 2025").unwrap().end_time, "09:45");
        draft.end_time = "11:30:00".into();
        assert_eq!(draft.validate("Winter 2025").unwrap().end_time, "11:30");
    }
}
