pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::filter::BookFilter;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // matching books in insertion order
    async fn find(&self, filter: &BookFilter) -> LibraryResult<Vec<BookEntity>>;
}
