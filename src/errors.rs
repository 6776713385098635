use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no data returned by {url}")]
    NoData { url: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid commit date {raw:?}: {source}")]
    Date {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::NoData { .. } => Self {
                status: StatusCode::BAD_GATEWAY,
                message: err.to_string(),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_is_a_bad_gateway() {
        let err = AppError::from(DashboardError::NoData {
            url: "https://api.github.com/repos/x/y/commits".to_string(),
        });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.message.ends_with("/commits"));

        let err = AppError::from(DashboardError::Io(std::io::Error::other("disk full")));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "storage error: disk full");
    }
}
