use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use moneytracker_repo::category_repo::CategoryRepoError;
use moneytracker_repo::geo_repo::GeoRepoError;
use moneytracker_repo::transaction_repo::TransactionRepoError;
use moneytracker_repo::user_repo::UserRepoError;
use thiserror::Error;

/// Central error taxonomy for the handler layer. Every repository error is
/// converted here and mapped to exactly one response status; nothing is
/// swallowed along the way.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TransactionRepoError> for HandlerError {
    fn from(e: TransactionRepoError) -> Self {
        match e {
            TransactionRepoError::TransactionNotFound(_) => HandlerError::NotFound(e.to_string()),
            TransactionRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<CategoryRepoError> for HandlerError {
    fn from(e: CategoryRepoError) -> Self {
        match e {
            CategoryRepoError::CategoryNotFound(_) => HandlerError::NotFound(e.to_string()),
            CategoryRepoError::CategoryAlreadyExists(_) => HandlerError::Conflict(e.to_string()),
            CategoryRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<UserRepoError> for HandlerError {
    fn from(e: UserRepoError) -> Self {
        match e {
            UserRepoError::UserNotFound(_) => HandlerError::NotFound(e.to_string()),
            UserRepoError::UserAlreadyExists(_) => HandlerError::Conflict(e.to_string()),
            UserRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<GeoRepoError> for HandlerError {
    fn from(e: GeoRepoError) -> Self {
        match e {
            GeoRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::Validation(_) => StatusCode::BAD_REQUEST,
            HandlerError::Forbidden(_) => StatusCode::FORBIDDEN,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Conflict(_) => StatusCode::CONFLICT,
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let HandlerError::Other(e) = self {
            // The cause is logged; the caller only sees a generic failure.
            ::tracing::error!(error = ?e, "request failed");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "internal server error" }));
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}
