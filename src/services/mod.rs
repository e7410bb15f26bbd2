//! Business logic services

pub mod books;
pub mod members;

use crate::repository::Repository;

pub(crate) const EMPTY_QUERY: &str = "Please provide a search query";

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub members: members::MembersService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            repository,
        }
    }
}
