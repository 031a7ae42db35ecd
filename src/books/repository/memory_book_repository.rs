use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// Ordered in-memory shelf. Every operation holds the single lock for its whole duration.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: Mutex<Vec<BookEntity>>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {
            books: Mutex::new(vec![]),
        }
    }
}

fn position(books: &[BookEntity], id: &str) -> LibraryResult<usize> {
    books.iter().position(|b| b.id() == id)
        .ok_or_else(|| LibraryError::not_found("Id not found"))
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.lock().await;
        if books.iter().any(|b| b.id() == entity.id()) {
            return Err(LibraryError::duplicate_key(format!("book {} already exists", entity.id()).as_str()));
        }
        books.push(entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.lock().await;
        let ndx = position(&books, entity.id())?;
        books[ndx].replace_details(entity);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let books = self.books.lock().await;
        let ndx = position(&books, id)?;
        Ok(books[ndx].clone())
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut books = self.books.lock().await;
        let ndx = position(&books, id)?;
        books.remove(ndx);
        Ok(1)
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find(&self, filter: &BookFilter) -> LibraryResult<Vec<BookEntity>> {
        let books = self.books.lock().await;
        Ok(books.iter().filter(|b| filter.matches(*b)).cloned().collect())
    }
}
