pub mod error;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::{ApiError, ErrorBody, ErrorCode, FieldError};
pub use validator::{Validate, ValidationErrors};

/// Inclusive bounds on the editable fields, in characters.
pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 32;
pub const DESCRIPTION_MIN: usize = 20;
pub const DESCRIPTION_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created: DateTime<Utc>,
}

/// The editable fields of a [`Todo`], submitted on both create and update.
///
/// Lengths are counted in Unicode scalar values (`str::chars`), not bytes;
/// the bounds are inclusive on both ends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TodoDraft {
    #[validate(length(min = 5, max = 32, message = "title must be 5 to 32 characters"))]
    pub title: String,
    #[validate(length(min = 20, max = 100, message = "description must be 20 to 100 characters"))]
    pub description: String,
}
