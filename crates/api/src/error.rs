//! Boundary error mapping.
//!
//! Every failure leaves the API as `{status: "error", message, error}` with
//! the status code of the underlying [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use salesdash_core::dashboard::DashboardError;
use salesdash_core::facts::FactError;
use salesdash_shared::{AppError, JwtError, ScopeError};
use tracing::{error, warn};

use crate::response::ErrorBody;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Short summary shown in `message`.
    const fn summary(&self) -> &'static str {
        match self.0 {
            AppError::Unauthorized(_) => "Authentication required",
            AppError::Forbidden(_) => "Access denied",
            AppError::NotFound(_) => "Resource not found",
            AppError::Validation(_) => "Invalid request parameters",
            AppError::Database(_) => "Failed to load sales data",
            AppError::Timeout(_) => "Report took too long to assemble",
            AppError::Internal(_) => "An unexpected error occurred",
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::InvalidInput(msg) => Self(AppError::Validation(msg)),
            DashboardError::Repository(e) => {
                error!(error = %e, "Report aborted by fact store failure");
                Self(AppError::Database(e.to_string()))
            }
            DashboardError::DeadlineExceeded(limit) => {
                warn!(deadline = ?limit, "Report deadline exceeded");
                Self(AppError::Timeout(format!(
                    "report not ready within {}ms",
                    limit.as_millis()
                )))
            }
        }
    }
}

impl From<FactError> for ApiError {
    fn from(err: FactError) -> Self {
        match err {
            FactError::Rejected(msg) => Self(AppError::Validation(msg)),
            other => {
                error!(error = %other, "Fact store write failed");
                Self(AppError::Database(other.to_string()))
            }
        }
    }
}

impl From<ScopeError> for ApiError {
    fn from(err: ScopeError) -> Self {
        Self(AppError::Forbidden(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        let detail = match err {
            JwtError::Expired => "Token has expired".to_string(),
            _ => "Invalid or malformed token".to_string(),
        };
        Self(AppError::Unauthorized(detail))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            status: "error",
            message: self.summary(),
            error: self.0.detail().to_string(),
            code: self.0.error_code(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case(DashboardError::InvalidInput("bad date".into()), 400)]
    #[case(DashboardError::Repository(FactError::Unavailable("down".into())), 500)]
    #[case(DashboardError::DeadlineExceeded(Duration::from_secs(30)), 504)]
    fn test_dashboard_errors_map_to_status(#[case] err: DashboardError, #[case] status: u16) {
        assert_eq!(ApiError::from(err).0.status_code(), status);
    }

    #[test]
    fn test_rejected_write_is_a_validation_error() {
        let err = ApiError::from(FactError::Rejected("unknown province".into()));
        assert_eq!(err.0.status_code(), 400);
        assert_eq!(err.0.detail(), "unknown province");
    }

    #[test]
    fn test_scope_error_is_forbidden() {
        let err = ApiError::from(ScopeError::NoAssignedProvince("ASM".into()));
        assert_eq!(err.0.status_code(), 403);
    }
}
