// Handler errors and their HTTP mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::cluster_source::ClusterUnavailable;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    ClusterUnavailable(#[from] ClusterUnavailable),
    #[error("cluster {0} not found")]
    ClusterNotFound(i64),
    #[error("cluster catalog is not configured")]
    CatalogDisabled,
    #[error("cluster catalog error: {0}")]
    Catalog(String),
}

impl ApiError {
    pub(crate) fn catalog(e: anyhow::Error) -> Self {
        ApiError::Catalog(format!("{:#}", e))
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::ClusterUnavailable(_) | ApiError::CatalogDisabled => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::ClusterNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, status = status.as_u16(), "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
