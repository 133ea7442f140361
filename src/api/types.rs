use serde::{Deserialize, Deserializer, Serialize};

use super::time::time_to_minutes;

/// Accept `null` (or a missing field, with `#[serde(default)]`) as an empty list
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `null` as an empty string
fn null_as_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub lecturer_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Me {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub lecturer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyProgram {
    pub id: i64,
    pub name: String,
    pub acronym: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub head_of_program: String,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub start_date: String,
    #[serde(default)]
    pub total_ects: i64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "Bachelor".to_string()
}

/// Request body for creating or updating a study program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramPayload {
    pub name: String,
    pub acronym: String,
    pub head_of_program: String,
    pub status: bool,
    pub start_date: String,
    pub total_ects: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: i64,
    pub program_id: Option<i64>,
    pub name: String,
    pub acronym: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub start_date: String,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default)]
    pub study_program: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationPayload {
    pub program_id: i64,
    pub name: String,
    pub acronym: String,
    pub start_date: String,
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub module_code: String,
    pub name: String,
    #[serde(default)]
    pub ects: i64,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub room_type: String,
    #[serde(default)]
    pub assessment_type: Option<String>,
    #[serde(default)]
    pub semester: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub program_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specialization_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulePayload {
    pub module_code: String,
    pub name: String,
    pub ects: i64,
    pub room_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<String>,
    pub semester: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub program_id: Option<i64>,
    pub specialization_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(rename = "type", default, deserialize_with = "null_as_blank")]
    pub room_type: String,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPayload {
    pub name: String,
    pub capacity: i64,
    #[serde(rename = "type")]
    pub room_type: String,
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub employment_type: String,
    #[serde(default)]
    pub personal_email: Option<String>,
    #[serde(default)]
    pub mdh_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub teaching_load: Option<String>,
}

impl Lecturer {
    /// "First Last", the same join the schedule endpoint uses for `lecturer_name`
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name.trim(), last),
            _ => self.first_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LecturerPayload {
    pub first_name: String,
    pub last_name: Option<String>,
    pub title: String,
    pub employment_type: String,
    pub personal_email: Option<String>,
    pub mdh_email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub teaching_load: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub parent_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPayload {
    pub name: String,
    pub size: i64,
    pub description: Option<String>,
    pub email: Option<String>,
    pub program: Option<String>,
    pub parent_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterPayload {
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferedModule {
    pub id: i64,
    #[serde(default)]
    pub module_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub module_name: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub lecturer_name: String,
    #[serde(default)]
    pub semester: Option<String>,
}

/// One scheduled session in the weekly timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    #[serde(default)]
    pub offered_module_id: Option<i64>,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub module_name: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub lecturer_name: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub room_name: String,
    #[serde(default, deserialize_with = "null_as_blank")]
    pub semester: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub group_ids: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub group_names: Vec<String>,
}

impl ScheduleEntry {
    pub fn start_minutes(&self) -> u32 {
        time_to_minutes(&self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        time_to_minutes(&self.end_time)
    }
}

/// Request body for `POST /schedule/` and `PUT /schedule/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntryPayload {
    pub offered_module_id: i64,
    pub room_id: Option<i64>,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub semester: String,
    pub group_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadComparison {
    pub name: String,
    #[serde(default)]
    pub needed: f64,
    #[serde(default)]
    pub scheduled: f64,
}

/// Semester planning KPIs and chart series
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalyticsMetrics {
    pub missing_units: i64,
    pub pending_requests: i64,
    pub planning_progress: i64,
    pub total_modules: i64,
    pub staff_composition: Vec<NamedValue>,
    pub teaching_load_comparison: Vec<LoadComparison>,
}

#[derive(Debug, Default, Deserialize)]
struct Kpis {
    #[serde(default)]
    missing_units: Option<i64>,
    #[serde(default)]
    pending_requests: Option<i64>,
    #[serde(default)]
    planning_progress: Option<i64>,
    #[serde(default)]
    total_modules: Option<i64>,
}

/// The service has shipped both a flat and a `kpis`-nested shape; read either.
#[derive(Debug, Default, Deserialize)]
struct RawMetrics {
    #[serde(default)]
    kpis: Option<Kpis>,
    #[serde(flatten)]
    flat: Kpis,
    #[serde(default, alias = "lecturer_stats", deserialize_with = "null_as_empty")]
    staff_composition: Vec<NamedValue>,
    #[serde(default, alias = "bar_data", deserialize_with = "null_as_empty")]
    teaching_load_comparison: Vec<LoadComparison>,
}

impl<'de> Deserialize<'de> for AnalyticsMetrics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMetrics::deserialize(deserializer)?;
        let kpis = raw.kpis.unwrap_or_default();
        let pick = |nested: Option<i64>, flat: Option<i64>| nested.or(flat).unwrap_or(0);
        Ok(Self {
            missing_units: pick(kpis.missing_units, raw.flat.missing_units),
            pending_requests: pick(kpis.pending_requests, raw.flat.pending_requests),
            planning_progress: pick(kpis.planning_progress, raw.flat.planning_progress).clamp(0, 100),
            total_modules: pick(kpis.total_modules, raw.flat.total_modules),
            staff_composition: raw.staff_composition,
            teaching_load_comparison: raw.teaching_load_comparison,
        })
    }
}

/// Decode a list response, treating anything that is not an array as empty
pub fn list_or_empty<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    log::warn!("Skipping malformed list item: {}", e);
                    None
                }
            })
            .collect(),
        other => {
            if !other.is_null() {
                log::warn!("Expected a JSON array, got {}", other);
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schedule_entry_tolerates_null_groups() {
        let entry: ScheduleEntry = serde_json::from_value(json!({
            "id": 7,
            "offered_module_id": 3,
            "module_name": "Databases",
            "lecturer_name": "Ada Lovelace",
            "room_name": "B-101",
            "day_of_week": "Tuesday",
            "start_time": "09:00",
            "end_time": "10:30",
            "semester": "Winter 2025",
            "group_ids": null,
            "group_names": null
        }))
        .unwrap();
        assert!(entry.group_ids.is_empty());
        assert!(entry.group_names.is_empty());
        assert_eq!(entry.start_minutes(), 540);
        assert_eq!(entry.end_minutes(), 630);
    }

    #[test]
    fn schedule_entry_tolerates_missing_optional_fields() {
        let entry: ScheduleEntry = serde_json::from_value(json!({
            "id": 1,
            "day_of_week": "Monday",
            "start_time": "08:00",
            "end_time": "09:00"
        }))
        .unwrap();
        assert_eq!(entry.module_name, "");
        assert_eq!(entry.offered_module_id, None);
    }

    #[test]
    fn analytics_reads_flat_shape() {
        let metrics: AnalyticsMetrics = serde_json::from_value(json!({
            "missing_units": 2,
            "pending_requests": 1,
            "planning_progress": 40,
            "total_modules": 10,
            "staff_composition": [{"name": "Full time", "value": 4}],
            "teaching_load_comparison": [{"name": "Math", "needed": 2, "scheduled": 1}]
        }))
        .unwrap();
        assert_eq!(metrics.missing_units, 2);
        assert_eq!(metrics.planning_progress, 40);
        assert_eq!(metrics.staff_composition.len(), 1);
        assert_eq!(metrics.teaching_load_comparison[0].scheduled, 1.0);
    }

    #[test]
    fn analytics_reads_nested_shape() {
        let metrics: AnalyticsMetrics = serde_json::from_value(json!({
            "kpis": {
                "missing_units": 3,
                "pending_requests": 0,
                "planning_progress": 250,
                "total_modules": 12
            },
            "lecturer_stats": [{"name": "Freelance", "value": 2}],
            "bar_data": null
        }))
        .unwrap();
        assert_eq!(metrics.missing_units, 3);
        assert_eq!(metrics.total_modules, 12);
        assert_eq!(metrics.planning_progress, 100);
        assert_eq!(metrics.staff_composition[0].name, "Freelance");
        assert!(metrics.teaching_load_comparison.is_empty());
    }

    #[test]
    fn list_guard_drops_non_arrays_and_bad_items() {
        let rooms: Vec<Room> = list_or_empty(json!({"detail": "oops"}));
        assert!(rooms.is_empty());

        let rooms: Vec<Room> = list_or_empty(json!([
            {"id": 1, "name": "A-1", "capacity": 30, "type": "Lab", "status": true},
            {"name": "missing id"}
        ]));
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_type, "Lab");
    }

    #[test]
    fn lecturer_display_name() {
        let mut lecturer: Lecturer = serde_json::from_value(json!({
            "id": 1,
            "first_name": "Grace",
            "last_name": "Hopper",
            "title": "Dr.",
            "employment_type": "Full time"
        }))
        .unwrap();
        assert_eq!(lecturer.display_name(), "Grace Hopper");
        lecturer.last_name = None;
        assert_eq!(lecturer.display_name(), "Grace");
    }
}
