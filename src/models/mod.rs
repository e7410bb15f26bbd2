//! Data models for the library server

pub mod book;
pub mod member;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export commonly used types
pub use book::{Book, BookSearchResponse, CreateBook, UpdateBook};
pub use member::{CreateMember, Member, MemberEmail, MemberSearchResponse, UpdateMember};

/// Plain success body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Search request body shared by books and members
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Substring looked up in the searchable columns
    #[serde(default)]
    pub query: String,
}
