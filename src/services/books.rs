//! Book catalog service

use std::collections::BTreeMap;

use crate::{
    error::AppResult,
    models::book::{Book, BookId, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> BTreeMap<BookId, Book> {
        self.repository.books.list_all().await
    }

    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }

    pub async fn get_by_id(&self, id: BookId) -> AppResult<Book> {
        Ok(self.repository.books.get(id).await?)
    }

    /// Create a book, rejecting names already in the catalog
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        match self.repository.books.create(data).await {
            Ok(book) => {
                tracing::info!(book_id = book.id, name = %book.name, "Book created");
                Ok(book)
            }
            Err(e) => {
                tracing::warn!(name = %data.name, "Book creation rejected: {}", e);
                Err(e.into())
            }
        }
    }

    /// Apply a partial update, returning a confirmation message
    pub async fn update(&self, id: BookId, data: &UpdateBook) -> AppResult<String> {
        let message = self.repository.books.update(id, data).await.map_err(|e| {
            tracing::warn!(book_id = id, "Book update rejected: {}", e);
            e
        })?;
        tracing::info!(book_id = id, "Book updated");
        Ok(message)
    }

    pub async fn delete(&self, id: BookId) -> AppResult<String> {
        let message = self.repository.books.delete(id).await.map_err(|e| {
            tracing::warn!(book_id = id, "Book deletion rejected: {}", e);
            e
        })?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(message)
    }
}
