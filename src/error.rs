use std::{collections::BTreeMap, error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::utils::{error_fmt_chain, PoolGetError};

// Per-field error messages, serialized as {"field": ["message", ...]}
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self{
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>){
        self.0.entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn require<T>(&mut self, field: &str, value: &Option<T>){
        if value.is_none() {
            self.add(field, "This field is required.");
        }
    }

    pub fn from_validator(result: Result<(), ValidationErrors>) -> Self{
        let mut errors = Self::default();

        if let Err(e) = result {
            for (field, field_errors) in e.field_errors() {
                for error in field_errors.iter() {
                    let message = match &error.message {
                        Some(m) => m.to_string(),
                        None => format!("Invalid value ({}).", error.code)
                    };
                    errors.add(&field.to_string(), message);
                }
            }
        }

        errors
    }

    pub fn is_empty(&self) -> bool{
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>>{
        self.0.get(field)
    }

    pub fn into_result(self) -> Result<(), FieldErrors>{
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<String> = self.0.iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", fields.join("; "))
    }
}

#[derive(Error)]
pub enum ApiError{
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotAuthenticated(String),
    #[error("Token is invalid or expired")]
    InvalidToken,
    #[error("Not found.")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("Unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotAuthenticated(_) | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let mut response = HttpResponse::build(self.status_code());

        match self {
            ApiError::Validation(errors) => response.json(errors),
            ApiError::InvalidToken => response.json(json!({
                "detail": self.to_string(),
                "code": "token_not_valid"
            })),
            ApiError::UnexpectedError(_) => {
                tracing::error!(error = ?self, "Request failed");
                response.json(json!({ "detail": "A server error occurred." }))
            },
            _ => response.json(json!({ "detail": self.to_string() }))
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match e {
            DieselError::NotFound => ApiError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ApiError::Conflict(format!("Uniqueness violation: {}", info.message()))
            },
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
                ApiError::Conflict("Concurrent update detected, retry the request.".to_string())
            },
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                ApiError::Validation(FieldErrors::single("non_field_errors", info.message()))
            },
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                ApiError::Validation(FieldErrors::single("non_field_errors", info.message()))
            },
            other => ApiError::UnexpectedError(
                anyhow::Error::new(other).context("Failed to run query")
            )
        }
    }
}

impl From<PoolGetError> for ApiError {
    fn from(e: PoolGetError) -> Self {
        ApiError::UnexpectedError(anyhow::Error::new(e))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::UnexpectedError(
            anyhow::Error::new(e).context("Failed due to threadpool error")
        )
    }
}
