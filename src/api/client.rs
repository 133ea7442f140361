use anyhow::{Context, Result};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::types::*;
use crate::config::Config;

pub struct PlannerClient {
    client: Client,
    base_url: String,
    auth_header: Option<String>,
}

impl PlannerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url();
        if base_url.is_empty() {
            anyhow::bail!("Service URL not configured");
        }

        let auth_header = config
            .api_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|token| format!("Bearer {}", token));

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(header::ACCEPT, "application/json");
        match &self.auth_header {
            Some(auth) => request.header(header::AUTHORIZATION, auth),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = match self.authorized(request).send().await {
            Ok(r) => r,
            Err(e) => {
                return Err(match ApiError::from_transport(&e) {
                    Some(api_err) => api_err.into(),
                    None => anyhow::Error::new(e),
                });
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, body).into());
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        log::debug!("GET {}", endpoint);
        let response = self.send(self.client.get(self.url(endpoint))).await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    /// GET a collection; non-array payloads become an empty list
    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let value: serde_json::Value = self.get(endpoint).await?;
        Ok(list_or_empty(value))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        log::debug!("POST {}", endpoint);
        let response = self
            .send(self.client.post(self.url(endpoint)).json(body))
            .await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        log::debug!("PUT {}", endpoint);
        let response = self
            .send(self.client.put(self.url(endpoint)).json(body))
            .await?;
        let result = response.json::<T>().await?;
        Ok(result)
    }

    async fn delete(&self, endpoint: &str) -> Result<()> {
        log::debug!("DELETE {}", endpoint);
        self.send(self.client.delete(self.url(endpoint))).await?;
        Ok(())
    }

    // --- Auth ---

    /// Exchange credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &request)
            .await
            .context("Sign-in failed")
    }

    pub async fn me(&self) -> Result<Me> {
        self.get("/auth/me").await
    }

    // --- Study programs ---

    pub async fn get_programs(&self) -> Result<Vec<StudyProgram>> {
        self.get_list("/study-programs/").await
    }

    pub async fn create_program(&self, payload: &ProgramPayload) -> Result<StudyProgram> {
        self.post("/study-programs/", payload).await
    }

    pub async fn update_program(&self, id: i64, payload: &ProgramPayload) -> Result<StudyProgram> {
        self.put(&format!("/study-programs/{}", id), payload).await
    }

    pub async fn delete_program(&self, id: i64) -> Result<()> {
        self.delete(&format!("/study-programs/{}", id)).await
    }

    // --- Specializations ---

    pub async fn get_specializations(&self) -> Result<Vec<Specialization>> {
        self.get_list("/specializations/").await
    }

    pub async fn create_specialization(&self, payload: &SpecializationPayload) -> Result<Specialization> {
        self.post("/specializations/", payload).await
    }

    pub async fn update_specialization(&self, id: i64, payload: &SpecializationPayload) -> Result<Specialization> {
        self.put(&format!("/specializations/{}", id), payload).await
    }

    pub async fn delete_specialization(&self, id: i64) -> Result<()> {
        self.delete(&format!("/specializations/{}", id)).await
    }

    // --- Modules ---

    pub async fn get_modules(&self) -> Result<Vec<Module>> {
        self.get_list("/modules/").await
    }

    pub async fn create_module(&self, payload: &ModulePayload) -> Result<Module> {
        self.post("/modules/", payload).await
    }

    pub async fn update_module(&self, code: &str, payload: &ModulePayload) -> Result<Module> {
        self.put(&format!("/modules/{}", urlencoding::encode(code)), payload).await
    }

    pub async fn delete_module(&self, code: &str) -> Result<()> {
        self.delete(&format!("/modules/{}", urlencoding::encode(code))).await
    }

    // --- Rooms ---

    pub async fn get_rooms(&self) -> Result<Vec<Room>> {
        self.get_list("/rooms/").await
    }

    pub async fn create_room(&self, payload: &RoomPayload) -> Result<Room> {
        self.post("/rooms/", payload).await
    }

    pub async fn update_room(&self, id: i64, payload: &RoomPayload) -> Result<Room> {
        self.put(&format!("/rooms/{}", id), payload).await
    }

    pub async fn delete_room(&self, id: i64) -> Result<()> {
        self.delete(&format!("/rooms/{}", id)).await
    }

    // --- Lecturers ---

    pub async fn get_lecturers(&self) -> Result<Vec<Lecturer>> {
        self.get_list("/lecturers/").await
    }

    pub async fn create_lecturer(&self, lecturer: &LecturerPayload) -> Result<Lecturer> {
        self.post("/lecturers/", lecturer).await
    }

    pub async fn update_lecturer(&self, id: i64, lecturer: &LecturerPayload) -> Result<Lecturer> {
        self.put(&format!("/lecturers/{}", id), lecturer).await
    }

    pub async fn delete_lecturer(&self, id: i64) -> Result<()> {
        self.delete(&format!("/lecturers/{}", id)).await
    }

    // --- Groups ---

    pub async fn get_groups(&self) -> Result<Vec<Group>> {
        self.get_list("/groups/list").await
    }

    pub async fn create_group(&self, group: &GroupPayload) -> Result<Group> {
        self.post("/groups/", group).await
    }

    pub async fn update_group(&self, id: i64, group: &GroupPayload) -> Result<Group> {
        self.put(&format!("/groups/{}", id), group).await
    }

    pub async fn delete_group(&self, id: i64) -> Result<()> {
        self.delete(&format!("/groups/{}", id)).await
    }

    // --- Semesters ---

    pub async fn get_semesters(&self) -> Result<Vec<Semester>> {
        self.get_list("/semesters/").await
    }

    pub async fn create_semester(&self, semester: &SemesterPayload) -> Result<Semester> {
        self.post("/semesters/", semester).await
    }

    pub async fn update_semester(&self, id: i64, semester: &SemesterPayload) -> Result<Semester> {
        self.put(&format!("/semesters/{}", id), semester).await
    }

    pub async fn delete_semester(&self, id: i64) -> Result<()> {
        self.delete(&format!("/semesters/{}", id)).await
    }

    // --- Schedule ---

    /// Modules offered in a semester, each bound to a lecturer
    pub async fn get_offered_modules(&self, semester: &str) -> Result<Vec<OfferedModule>> {
        self.get_list(&format!("/offered-modules/?semester={}", urlencoding::encode(semester)))
            .await
    }

    pub async fn get_schedule(&self, semester: &str) -> Result<Vec<ScheduleEntry>> {
        self.get_list(&format!("/schedule/?semester={}", urlencoding::encode(semester)))
            .await
    }

    /// Schedule of one lecturer. Narrowed locally as well, in case the
    /// service ignores the lecturer parameter.
    pub async fn get_lecturer_schedule(&self, semester: &str, lecturer_name: &str) -> Result<Vec<ScheduleEntry>> {
        let endpoint = format!(
            "/schedule/?semester={}&lecturer={}",
            urlencoding::encode(semester),
            urlencoding::encode(lecturer_name)
        );
        let entries: Vec<ScheduleEntry> = self.get_list(&endpoint).await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.lecturer_name == lecturer_name)
            .collect())
    }

    pub async fn create_schedule_entry(&self, payload: &ScheduleEntryPayload) -> Result<ScheduleEntry> {
        self.post("/schedule/", payload).await
    }

    pub async fn update_schedule_entry(&self, id: i64, payload: &ScheduleEntryPayload) -> Result<ScheduleEntry> {
        self.put(&format!("/schedule/{}", id), payload).await
    }

    pub async fn delete_schedule_entry(&self, id: i64) -> Result<()> {
        self.delete(&format!("/schedule/{}", id)).await
    }

    // --- Analytics ---

    pub async fn get_analytics_metrics(&self, semester_id: i64) -> Result<AnalyticsMetrics> {
        self.get(&format!("/analytics/metrics?semester_id={}", semester_id))
            .await
            .context("Failed to load analytics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(url: &str, token: Option<&str>) -> Config {
        Config {
            api_url: url.to_string(),
            api_token: token.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn requires_a_service_url() {
        assert!(PlannerClient::new(&config_with("", None)).is_err());
    }

    #[test]
    fn builds_urls_from_normalized_base() {
        let client = PlannerClient::new(&config_with("planner.example.edu/api/", Some("abc"))).unwrap();
        assert_eq!(client.url("/rooms/"), "https://planner.example.edu/api/rooms/");
        assert_eq!(client.auth_header.as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn empty_token_sends_no_auth_header() {
        let client = PlannerClient::new(&config_with("http://localhost:8000", Some(""))).unwrap();
        assert!(client.auth_header.is_none());
        assert_eq!(client.url("/auth/login"), "http://localhost:8000/auth/login");
    }
}
