use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::time::DayWindow;

/// Overrides `api_url` when set, handy for pointing a build at a local service
pub const API_URL_ENV: &str = "CAMPUS_PLANNER_API_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockFormat {
    #[default]
    Hour24,      // "14:30"
    Hour12,      // "2:30pm"
}

/// Which calendar the timetable opens with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StartView {
    Day,
    #[default]
    Week,
    Month,
    Semester,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub api_token: Option<String>,
    /// Role and lecturer link from the last sign-in
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub lecturer_id: Option<i64>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default)]
    pub clock_format: ClockFormat,
    #[serde(default)]
    pub start_view: StartView,
    #[serde(default)]
    pub list_view: bool,
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u8,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u8,
    /// Campus preselected in the rooms panel
    #[serde(default)]
    pub default_location: Option<String>,
    #[serde(default)]
    pub last_semester: Option<String>,
}

fn default_request_timeout() -> u64 {
    20
}

fn default_font_scale() -> f32 {
    1.0
}

fn default_day_start_hour() -> u8 {
    8  // 8am
}

fn default_day_end_hour() -> u8 {
    20  // 8pm
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            email: String::new(),
            api_token: None,
            role: None,
            lecturer_id: None,
            request_timeout_secs: default_request_timeout(),
            font_scale: default_font_scale(),
            clock_format: ClockFormat::Hour24,
            start_view: StartView::Week,
            list_view: false,
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            default_location: None,
            last_semester: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Missing file means first run: defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        log::info!("Saved settings to {}", path.display());

        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url().is_empty() && self.is_signed_in()
    }

    pub fn is_signed_in(&self) -> bool {
        self.api_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Forget the token and everything derived from it
    pub fn sign_out(&mut self) {
        self.api_token = None;
        self.role = None;
        self.lecturer_id = None;
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "campus", "campus-planner")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Service root without a trailing slash. A bare host gets `https://`.
    pub fn base_url(&self) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        normalize_base_url(from_env.as_deref().unwrap_or(&self.api_url))
    }

    pub fn day_window(&self) -> DayWindow {
        DayWindow::from_hours(self.day_start_hour, self.day_end_hour)
    }
}

fn normalize_base_url(raw: &str) -> String {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_teaching_day() {
        let config = Config::default();
        assert_eq!(config.day_window(), DayWindow::from_hours(8, 20));
        assert_eq!(config.start_view, StartView::Week);
        assert!(!config.is_signed_in());
    }

    #[test]
    fn base_url_normalization() {
        assert_eq!(normalize_base_url("  planner.example.edu/api/ "), "https://planner.example.edu/api");
        assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base_url("https://x.edu"), "https://x.edu");
        assert_eq!(normalize_base_url("   "), "");
    }

    #[test]
    fn older_files_fill_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"api_url": "x.edu", "email": "a@x.edu"}"#).unwrap();
        assert_eq!(config.request_timeout_secs, 20);
        assert_eq!(config.day_start_hour, 8);
        assert_eq!(config.font_scale, 1.0);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn saves_and_loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert_eq!(Config::load_from(&path).unwrap().api_url, "");

        let config = Config {
            api_url: "planner.example.edu".into(),
            api_token: Some("tok".into()),
            role: Some("pm".into()),
            lecturer_id: Some(4),
            list_view: true,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, "planner.example.edu");
        assert_eq!(loaded.role.as_deref(), Some("pm"));
        assert_eq!(loaded.lecturer_id, Some(4));
        assert!(loaded.list_view);
        assert!(loaded.is_signed_in());
    }

    #[test]
    fn sign_out_clears_credentials() {
        let mut config = Config {
            api_token: Some("tok".into()),
            role: Some("admin".into()),
            ..Config::default()
        };
        config.sign_out();
        assert!(!config.is_signed_in());
        assert!(config.role.is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
