//! Failure taxonomy shared by the server and the client.
//!
//! The server answers every failed request with an [`ErrorBody`]; the client
//! decodes it back into an [`ApiError`]. Neither side ever forwards raw
//! database or transport error text to the user.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Validation,
    NotFound,
    Internal,
}

/// One violated bound on one field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// The JSON body returned for every failed request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorBody {
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            code: ErrorCode::Validation,
            message: String::from("validation failed"),
            fields: field_errors(errors),
        }
    }

    pub fn not_found(id: Uuid) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: format!("todo {id} not found"),
            fields: Vec::new(),
        }
    }

    pub fn internal() -> Self {
        Self {
            code: ErrorCode::Internal,
            message: String::from("internal server error"),
            fields: Vec::new(),
        }
    }
}

/// What a caller of the v1 interface can observe going wrong.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("todo not found")]
    NotFound,
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(field_errors(&errors))
    }
}

impl From<ErrorBody> for ApiError {
    fn from(body: ErrorBody) -> Self {
        match body.code {
            ErrorCode::Validation => ApiError::Validation(body.fields),
            ErrorCode::NotFound => ApiError::NotFound,
            ErrorCode::Internal => ApiError::Transport(body.message),
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();

    // HashMap iteration order is arbitrary
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::{TodoDraft, Validate};

    #[test]
    fn validation_body_names_the_offending_fields() {
        let errors = TodoDraft::default().validate().unwrap_err();
        let body = ErrorBody::validation(&errors);

        assert_eq!(body.code, ErrorCode::Validation);
        let fields: Vec<_> = body.fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["description", "title"]);
        assert!(body.fields[1].message.contains("5 to 32"));
    }

    #[test]
    fn body_round_trips_through_json() {
        let body = ErrorBody::not_found(Uuid::new_v4());
        let json = serde_json::to_string(&body).unwrap();

        assert!(json.contains("\"NOT_FOUND\""));
        assert!(!json.contains("fields"));

        let decoded: ErrorBody = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn decoding_maps_codes_onto_the_taxonomy() {
        assert_eq!(
            ApiError::from(ErrorBody::not_found(Uuid::new_v4())),
            ApiError::NotFound
        );

        let errors = TodoDraft::default().validate().unwrap_err();
        match ApiError::from(ErrorBody::validation(&errors)) {
            ApiError::Validation(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }

        match ApiError::from(ErrorBody::internal()) {
            ApiError::Transport(message) => assert_eq!(message, "internal server error"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
