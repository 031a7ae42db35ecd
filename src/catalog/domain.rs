pub mod service;

use async_trait::async_trait;
use crate::books::domain::filter::BookFilter;
use crate::books::dto::{BookDto, BookSummaryDto};
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookSummaryDto>>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: &str) -> LibraryResult<()>;
}
