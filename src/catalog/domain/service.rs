use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info};
use crate::books::domain::read_page_exceeds;
use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookSummaryDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) const MISSING_NAME: &str = "Please provide the book name";
pub(crate) const READ_PAGE_EXCEEDS_PAGE_COUNT: &str = "readPage must not be greater than pageCount";

pub(crate) struct CatalogServiceImpl {
    book_repository: Arc<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Arc<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

fn validate(book: &BookDto) -> LibraryResult<()> {
    if book.name.is_empty() {
        return Err(LibraryError::validation(MISSING_NAME, Some("name".to_string())));
    }
    if read_page_exceeds(book.read_page.as_ref(), book.page_count.as_ref()) {
        return Err(LibraryError::validation(READ_PAGE_EXCEEDS_PAGE_COUNT, Some("readPage".to_string())));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate(book)?;
        let _ = self.book_repository.create(&BookEntity::from(book)).await?;
        info!(book_id = book.id.as_str(), name = book.name.as_str(), "book added");
        Ok(book.clone())
    }

    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookSummaryDto>> {
        let res = self.book_repository.find(filter).await?;
        debug!(?filter, matched = res.len(), "books listed");
        Ok(res.iter().map(|b| BookSummaryDto::from(&BookDto::from(b))).collect())
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    // Existence is checked before the payload; `finished` and `updated_at` keep their values.
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let _ = self.book_repository.get(book.id.as_str()).await?;
        validate(book)?;
        let _ = self.book_repository.update(&BookEntity::from(book)).await?;
        info!(book_id = book.id.as_str(), "book updated");
        self.find_book_by_id(book.id.as_str()).await
    }

    async fn remove_book(&self, id: &str) -> LibraryResult<()> {
        let _ = self.book_repository.delete(id).await?;
        info!(book_id = id, "book removed");
        Ok(())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.book_id.to_string(),
            name: other.name.to_string(),
            year: other.year.clone(),
            author: other.author.clone(),
            summary: other.summary.clone(),
            publisher: other.publisher.clone(),
            page_count: other.page_count.clone(),
            read_page: other.read_page.clone(),
            finished: other.finished,
            reading: other.reading,
            inserted_at: other.inserted_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.id.to_string(),
            name: other.name.to_string(),
            year: other.year.clone(),
            author: other.author.clone(),
            summary: other.summary.clone(),
            publisher: other.publisher.clone(),
            page_count: other.page_count.clone(),
            read_page: other.read_page.clone(),
            finished: other.finished,
            reading: other.reading,
            inserted_at: other.inserted_at,
            updated_at: other.updated_at,
        }
    }
}
