use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookPayload};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) const ADD_BOOK_FAILED: &str = "Failed to add book";

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) book: BookPayload,
}

impl AddBookCommandRequest {
    pub fn new(book: BookPayload) -> Self {
        Self {
            book,
        }
    }
    pub fn build_book(&self) -> BookDto {
        BookDto::new(&self.book)
    }
}


#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddBookCommandResponse {
    pub book_id: String,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book_id: book.id,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.add_book(&book).await
            .map_err(|err| CommandError::from(err).context(ADD_BOOK_FAILED))
            .map(AddBookCommandResponse::new)
    }
}
