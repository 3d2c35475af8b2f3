//! Repository layer for book storage

pub mod books;

use books::BookStore;

/// Main repository struct holding the book store
#[derive(Clone)]
pub struct Repository {
    pub books: BookStore,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(books: BookStore) -> Self {
        Self { books }
    }
}
