use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookPayload};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::utils::date::now;

pub(crate) const UPDATE_BOOK_FAILED: &str = "Failed to update book";

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: String,
    pub book: BookPayload,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: &str, book: BookPayload) -> Self {
        Self {
            book_id: book_id.to_string(),
            book,
        }
    }
    // the stored record keeps its own timestamps and `finished`, see CatalogService::update_book
    pub fn build_book(&self) -> BookDto {
        BookDto::with_id(self.book_id.as_str(), &self.book, now())
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.update_book(&book).await
            .map_err(|err| CommandError::from(err).context(UPDATE_BOOK_FAILED))
            .map(UpdateBookCommandResponse::new)
    }
}
