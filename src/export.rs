use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{AnalyticsMetrics, LoadComparison, NamedValue};

#[derive(Serialize)]
pub struct AnalyticsReport<'a> {
    pub semester: &'a str,
    pub exported_at: String,
    pub missing_units: i64,
    pub pending_requests: i64,
    pub planning_progress: i64,
    pub total_modules: i64,
    pub staff_composition: &'a [NamedValue],
    pub teaching_load_comparison: &'a [LoadComparison],
}

impl<'a> AnalyticsReport<'a> {
    pub fn new(metrics: &'a AnalyticsMetrics, semester: &'a str) -> Self {
        Self {
            semester,
            exported_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            missing_units: metrics.missing_units,
            pending_requests: metrics.pending_requests,
            planning_progress: metrics.planning_progress,
            total_modules: metrics.total_modules,
            staff_composition: &metrics.staff_composition,
            teaching_load_comparison: &metrics.teaching_load_comparison,
        }
    }
}

/// `Analytics_Report_<semester>.json`, with anything but letters, digits,
/// `-` and `_` replaced so the name is safe on every platform
pub fn report_filename(semester: &str) -> String {
    let safe: String = semester
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if safe.is_empty() {
        "Analytics_Report.json".to_string()
    } else {
        format!("Analytics_Report_{}.json", safe)
    }
}

/// Write the report into `dir`, creating it if needed
pub fn write_report(dir: &Path, metrics: &AnalyticsMetrics, semester: &str) -> Result<PathBuf, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create reports directory: {}", e))?;

    let file_path = dir.join(report_filename(semester));
    let report = AnalyticsReport::new(metrics, semester);

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Failed to serialize: {}", e))?;
    fs::write(&file_path, json)
        .map_err(|e| format!("Failed to write file: {}", e))?;

    log::info!("Exported analytics report to {}", file_path.display());
    Ok(file_path)
}

/// Export the current analytics to `reports/` next to the executable.
/// Returns the path of the created file on success.
pub fn export_analytics(metrics: &AnalyticsMetrics, semester: &str) -> Result<PathBuf, String> {
    let exe_path = std::env::current_exe()
        .map_err(|e| format!("Failed to get exe path: {}", e))?;
    let exe_dir = exe_path.parent()
        .ok_or("Failed to get exe directory")?;

    write_report(&exe_dir.join("reports"), metrics, semester)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(report_filename("Winter 2025/26"), "Analytics_Report_Winter_2025_26.json");
        assert_eq!(report_filename("   "), "Analytics_Report.json");
    }

    #[test]
    fn writes_pretty_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let metrics = AnalyticsMetrics {
            missing_units: 4,
            planning_progress: 60,
            total_modules: 20,
            staff_composition: vec![NamedValue { name: "Full time".into(), value: 7.0 }],
            ..AnalyticsMetrics::default()
        };

        let path = write_report(&dir.path().join("reports"), &metrics, "Summer 2026").unwrap();
        assert!(path.ends_with("Analytics_Report_Summer_2026.json"));

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["semester"], "Summer 2026");
        assert_eq!(written["missing_units"], 4);
        assert_eq!(written["staff_composition"][0]["name"], "Full time");
        assert!(written["teaching_load_comparison"].as_array().unwrap().is_empty());
    }
}
