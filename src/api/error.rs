use reqwest::StatusCode;
use thiserror::Error;

/// Failures the UI treats differently: offline gets a banner, the rest an alert
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Cannot reach the scheduling service: {0}")]
    Offline(String),
    #[error("Not signed in or not permitted ({0})")]
    Unauthorized(StatusCode),
    #[error("Not found")]
    NotFound,
    #[error("API request failed: {status} - {body}")]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(status),
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Status {
                status,
                body: detail_message(&body),
            },
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Option<Self> {
        if err.is_connect() || err.is_timeout() {
            Some(Self::Offline(err.to_string()))
        } else {
            None
        }
    }
}

/// FastAPI-style bodies carry the message in `detail`; fall back to the raw body
fn detail_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// True when an error chain bottoms out in a connectivity failure
pub fn is_offline(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::Offline(_))))
}

/// True when the service rejected the stored token
pub fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, String::new()),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, String::new()),
            ApiError::NotFound
        ));
    }

    #[test]
    fn detail_is_extracted_from_json_bodies() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "end_time must be after start_time"}"#.to_string(),
        );
        assert_eq!(
            err.to_string(),
            "API request failed: 422 Unprocessable Entity - end_time must be after start_time"
        );

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down\n".to_string());
        assert!(err.to_string().ends_with("upstream down"));
    }

    #[test]
    fn offline_detection_walks_the_chain() {
        let err = anyhow::Error::new(ApiError::Offline("refused".into())).context("Loading rooms");
        assert!(is_offline(&err));
        let err = anyhow::anyhow!("connection wording alone is not enough");
        assert!(!is_offline(&err));
    }

    #[test]
    fn unauthorized_detection_survives_context() {
        let err = anyhow::Error::new(ApiError::Unauthorized(StatusCode::UNAUTHORIZED)).context("Loading rooms");
        assert!(is_unauthorized(&err));
        assert!(!is_offline(&err));
        let err = anyhow::Error::new(ApiError::NotFound);
        assert!(!is_unauthorized(&err));
    }
}
