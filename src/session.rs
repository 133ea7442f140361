//! Who is signed in and what they may touch.
//!
//! The app owns one `Session` and hands it to each screen by reference.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::api::LoginResponse;
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    /// Planning manager
    Pm,
    /// Head of study program
    Hosp,
    Lecturer,
    #[default]
    Student,
}

impl Role {
    /// Unknown role names get the least privileged role
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "pm" => Role::Pm,
            "hosp" => Role::Hosp,
            "lecturer" => Role::Lecturer,
            _ => Role::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Pm => "pm",
            Role::Hosp => "hosp",
            Role::Lecturer => "lecturer",
            Role::Student => "student",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Pm => "Planning Manager",
            Role::Hosp => "Head of Program",
            Role::Lecturer => "Lecturer",
            Role::Student => "Student",
        }
    }

    fn is_planner(&self) -> bool {
        matches!(self, Role::Admin | Role::Pm)
    }

    pub fn can_edit_schedule(&self) -> bool {
        *self != Role::Student
    }

    pub fn can_manage_programs(&self) -> bool {
        self.is_planner() || *self == Role::Hosp
    }

    pub fn can_manage_modules(&self) -> bool {
        self.is_planner() || *self == Role::Hosp
    }

    pub fn can_manage_rooms(&self) -> bool {
        self.is_planner()
    }

    pub fn can_manage_lecturers(&self) -> bool {
        self.is_planner()
    }

    pub fn can_manage_groups(&self) -> bool {
        self.is_planner() || *self == Role::Hosp
    }

    pub fn can_manage_semesters(&self) -> bool {
        self.is_planner()
    }

    pub fn can_view_analytics(&self) -> bool {
        self.is_planner() || *self == Role::Hosp
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub role: Role,
    pub lecturer_id: Option<i64>,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    lecturer_id: Option<i64>,
}

/// Read the claims segment of a JWT without verifying it
fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

impl Session {
    /// Restore the last sign-in from persisted settings
    pub fn from_config(config: &Config) -> Self {
        if !config.is_signed_in() {
            return Self {
                email: config.email.clone(),
                ..Self::default()
            };
        }
        let claims = config.api_token.as_deref().and_then(decode_claims);
        let role = config
            .role
            .clone()
            .or_else(|| claims.as_ref().and_then(|c| c.role.clone()));
        Self {
            role: role.as_deref().map(Role::parse).unwrap_or_default(),
            lecturer_id: config
                .lecturer_id
                .or_else(|| claims.as_ref().and_then(|c| c.lecturer_id)),
            email: config.email.clone(),
        }
    }

    /// Build from a fresh login; missing fields are recovered from the token claims
    pub fn from_login(email: &str, login: &LoginResponse) -> Self {
        let claims = decode_claims(&login.access_token);
        let role = login
            .role
            .clone()
            .or_else(|| claims.as_ref().and_then(|c| c.role.clone()));
        let lecturer_id = login
            .lecturer_id
            .or_else(|| claims.as_ref().and_then(|c| c.lecturer_id));
        let email = if email.trim().is_empty() {
            claims.and_then(|c| c.sub).unwrap_or_default()
        } else {
            email.trim().to_string()
        };
        Self {
            role: role.as_deref().map(Role::parse).unwrap_or_default(),
            lecturer_id,
            email,
        }
    }

    /// Copy this session into the settings that get persisted
    pub fn store(&self, config: &mut Config) {
        config.role = Some(self.role.as_str().to_string());
        config.lecturer_id = self.lecturer_id;
        config.email = self.email.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    fn login(token: String, role: Option<&str>, lecturer_id: Option<i64>) -> LoginResponse {
        LoginResponse {
            access_token: token,
            token_type: Some("bearer".into()),
            role: role.map(String::from),
            lecturer_id,
        }
    }

    #[test]
    fn role_parsing_is_case_insensitive_and_safe() {
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse("hosp"), Role::Hosp);
        assert_eq!(Role::parse("superuser"), Role::Student);
    }

    #[test]
    fn permissions_by_role() {
        assert!(!Role::Student.can_edit_schedule());
        assert!(Role::Lecturer.can_edit_schedule());
        assert!(Role::Pm.can_manage_rooms());
        assert!(!Role::Hosp.can_manage_rooms());
        assert!(Role::Hosp.can_manage_programs());
        assert!(!Role::Lecturer.can_view_analytics());
    }

    #[test]
    fn login_response_fields_win() {
        let token = token_with(r#"{"sub":"x@uni.edu","role":"student"}"#);
        let session = Session::from_login("pm@uni.edu", &login(token, Some("pm"), None));
        assert_eq!(session.role, Role::Pm);
        assert_eq!(session.email, "pm@uni.edu");
    }

    #[test]
    fn claims_fill_in_missing_fields() {
        let token = token_with(r#"{"sub":"ada@uni.edu","role":"lecturer","lecturer_id":12}"#);
        let session = Session::from_login("", &login(token, None, None));
        assert_eq!(session.role, Role::Lecturer);
        assert_eq!(session.lecturer_id, Some(12));
        assert_eq!(session.email, "ada@uni.edu");
    }

    #[test]
    fn opaque_token_defaults_to_student() {
        let session = Session::from_login("s@uni.edu", &login("not-a-jwt".into(), None, None));
        assert_eq!(session.role, Role::Student);
        assert_eq!(session.lecturer_id, None);
    }

    #[test]
    fn restores_from_config_round_trip() {
        let session = Session {
            role: Role::Hosp,
            lecturer_id: Some(3),
            email: "h@uni.edu".into(),
        };
        let mut config = Config {
            api_token: Some("opaque".into()),
            ..Config::default()
        };
        session.store(&mut config);

        let restored = Session::from_config(&config);
        assert_eq!(restored.role, Role::Hosp);
        assert_eq!(restored.lecturer_id, Some(3));

        config.sign_out();
        assert_eq!(Session::from_config(&config).role, Role::Student);
    }
}
