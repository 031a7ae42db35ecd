use chrono::{DateTime, Utc};
use serde_json::{Number, Value};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;

// BookEntity is the stored form of a book on the shelf. `finished`, `inserted_at` and
// `updated_at` are fixed when the book is added; updates only replace the descriptive fields.
// `year`, `author`, `summary` and `publisher` are kept exactly as the client sent them.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BookEntity {
    pub book_id: String,
    pub name: String,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: Option<Number>,
    pub read_page: Option<Number>,
    pub finished: bool,
    pub reading: Option<bool>,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookEntity {
    pub fn replace_details(&mut self, other: &BookEntity) {
        self.name = other.name.to_string();
        self.year = other.year.clone();
        self.author = other.author.clone();
        self.summary = other.summary.clone();
        self.publisher = other.publisher.clone();
        self.page_count = other.page_count.clone();
        self.read_page = other.read_page.clone();
        self.reading = other.reading;
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> &str {
        self.book_id.as_str()
    }
}

impl Book for BookEntity {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn reading(&self) -> Option<bool> {
        self.reading
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
