//! In-memory book store

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::book::{Book, BookId, CreateBook, UpdateBook};

/// Validation failures raised by the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookStoreError {
    #[error("Book with ID {0} not found")]
    NotFound(BookId),

    #[error("Book '{0}' already exists")]
    DuplicateName(String),
}

pub type StoreResult<T> = Result<T, BookStoreError>;

const SEED: [(&str, &str, &str); 3] = [
    ("Marina", "Carlos Ruiz Zafón", "1999"),
    ("Neuromancer", "William Gibson", "1984"),
    ("O Fantasma de Canterville", "Oscar Wilde", "1887"),
];

/// Book collection keyed by id.
///
/// Every operation holds the single store lock for its whole duration, so
/// id assignment and the duplicate-name check never race with other writers.
#[derive(Clone, Default)]
pub struct BookStore {
    books: Arc<Mutex<BTreeMap<BookId, Book>>>,
}

impl BookStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the three seed books (ids 1..=3)
    pub fn seeded() -> Self {
        let books = SEED
            .iter()
            .zip(1..)
            .map(|(&(name, author, date), id)| {
                let book = Book {
                    id,
                    name: name.to_string(),
                    author: author.to_string(),
                    date: date.to_string(),
                };
                (id, book)
            })
            .collect();

        Self {
            books: Arc::new(Mutex::new(books)),
        }
    }

    /// Snapshot of every book, ordered by id
    pub async fn list_all(&self) -> BTreeMap<BookId, Book> {
        self.books.lock().await.clone()
    }

    /// Number of books currently stored
    pub async fn count(&self) -> usize {
        self.books.lock().await.len()
    }

    /// Get a single book
    pub async fn get(&self, id: BookId) -> StoreResult<Book> {
        self.books
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(BookStoreError::NotFound(id))
    }

    /// Fail with `NotFound` unless `id` is present.
    ///
    /// `update` and `delete` run the same check while holding their lock.
    pub async fn exists_or_fail(&self, id: BookId) -> StoreResult<()> {
        let books = self.books.lock().await;
        ensure_exists(&books, id)
    }

    /// Insert a new book under `max(id) + 1` (1 when empty).
    ///
    /// Names are unique case-insensitively. Deleting the highest id and
    /// creating again hands that id out a second time.
    pub async fn create(&self, data: &CreateBook) -> StoreResult<Book> {
        let mut books = self.books.lock().await;

        let wanted = data.name.to_lowercase();
        if books.values().any(|book| book.name.to_lowercase() == wanted) {
            return Err(BookStoreError::DuplicateName(data.name.clone()));
        }

        let id = books.keys().next_back().map_or(1, |max| max + 1);
        let book = Book {
            id,
            name: data.name.clone(),
            author: data.author.clone(),
            date: data.date.clone(),
        };
        books.insert(id, book.clone());
        Ok(book)
    }

    /// Overwrite the provided, non-empty fields of an existing book.
    ///
    /// Renames are not checked against other names.
    pub async fn update(&self, id: BookId, data: &UpdateBook) -> StoreResult<String> {
        let mut books = self.books.lock().await;
        ensure_exists(&books, id)?;

        if let Some(book) = books.get_mut(&id) {
            macro_rules! patch_field {
                ($field:ident) => {
                    if let Some(value) = data.$field.as_deref().filter(|v| !v.is_empty()) {
                        book.$field = value.to_string();
                    }
                };
            }

            patch_field!(name);
            patch_field!(author);
            patch_field!(date);
        }

        Ok(format!("Book with ID {} updated successfully", id))
    }

    /// Remove a book
    pub async fn delete(&self, id: BookId) -> StoreResult<String> {
        let mut books = self.books.lock().await;
        ensure_exists(&books, id)?;
        books.remove(&id);
        Ok(format!("Book with ID {} removed successfully", id))
    }
}

fn ensure_exists(books: &BTreeMap<BookId, Book>, id: BookId) -> StoreResult<()> {
    if books.contains_key(&id) {
        Ok(())
    } else {
        Err(BookStoreError::NotFound(id))
    }
}
