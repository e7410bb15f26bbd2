//! Member model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Member record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i64,
    pub name: String,
    /// Unique across members; used as the lookup key for update and delete
    pub email: String,
}

/// Add member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Update member request, keyed by email
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// New name; the stored one is kept when absent
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
}

/// Delete member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MemberEmail {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Member search result: either the matches or a "no matches" message
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum MemberSearchResponse {
    Matches { members: Vec<Member> },
    NoMatches { message: String },
}
