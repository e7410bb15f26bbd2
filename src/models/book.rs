//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year_of_publication: i64,
    /// Copies held; stored as given
    pub book_count: i64,
}

/// Add book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub year_of_publication: i64,
    pub book_count: i64,
}

/// Update book request; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    pub year_of_publication: Option<i64>,
    pub book_count: Option<i64>,
}

impl UpdateBook {
    /// Overlay the provided fields on `current`
    pub fn apply_to(&self, current: &Book) -> Book {
        Book {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            author: self.author.clone().unwrap_or_else(|| current.author.clone()),
            year_of_publication: self
                .year_of_publication
                .unwrap_or(current.year_of_publication),
            book_count: self.book_count.unwrap_or(current.book_count),
        }
    }
}

/// Book search result: either the matches or a "no matches" message
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum BookSearchResponse {
    Matches { books: Vec<Book> },
    NoMatches { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year_of_publication: 1965,
            book_count: 3,
        }
    }

    #[test]
    fn test_apply_only_book_count() {
        let update = UpdateBook {
            book_count: Some(10),
            ..Default::default()
        };
        let updated = update.apply_to(&dune());
        assert_eq!(updated, Book { book_count: 10, ..dune() });
    }

    #[test]
    fn test_apply_empty_update_is_identity() {
        assert_eq!(UpdateBook::default().apply_to(&dune()), dune());
    }

    #[test]
    fn test_empty_title_rejected() {
        let book = CreateBook {
            title: String::new(),
            author: "Herbert".to_string(),
            year_of_publication: 1965,
            book_count: 1,
        };
        assert!(book.validate().is_err());
    }
}
