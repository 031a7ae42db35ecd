use async_trait::async_trait;
use serde::Serialize;
use crate::books::domain::filter::BookFilter;
use crate::books::dto::BookSummaryDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) const LIST_BOOKS_FAILED: &str = "Failed to list books";

pub(crate) struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// Raw query string values, e.g. `?name=web&reading=1`
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ListBooksCommandRequest {
    pub(crate) name: Option<String>,
    pub(crate) reading: Option<String>,
    pub(crate) finished: Option<String>,
}

impl ListBooksCommandRequest {
    // A key given more than once keeps all its values joined by ",", so `reading=1&reading=0`
    // reads as "1,0" and filters like any other value that is not "1". Unknown keys are ignored.
    pub fn from_query_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut req = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut req.name,
                "reading" => &mut req.reading,
                "finished" => &mut req.finished,
                _ => continue,
            };
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(value.as_str());
                }
                None => *slot = Some(value),
            }
        }
        req
    }

    pub fn build_filter(&self) -> BookFilter {
        BookFilter::from_query(self.name.as_deref(), self.reading.as_deref(), self.finished.as_deref())
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookSummaryDto>,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<BookSummaryDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.catalog_service.find_books(&req.build_filter())
            .await.map_err(CommandError::from).map(ListBooksCommandResponse::new)
    }
}
