use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use crate::books::domain::same_page;
use crate::utils::date::{now, serializer};
use crate::utils::id::{BOOK_ID_LENGTH, generate_id};

// BookPayload is the client-supplied body of add and update requests.
// `year`, `author`, `summary` and `publisher` accept any JSON value and are never inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookPayload {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opaque")]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "opaque")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "opaque")]
    pub summary: Option<Value>,
    #[serde(default, deserialize_with = "opaque")]
    pub publisher: Option<Value>,
    pub page_count: Option<Number>,
    pub read_page: Option<Number>,
    pub reading: Option<bool>,
}

#[cfg(test)]
impl BookPayload {
    pub fn new(name: &str, page_count: i64, read_page: i64) -> Self {
        Self {
            name: Some(name.to_string()),
            page_count: Some(Number::from(page_count)),
            read_page: Some(Number::from(read_page)),
            ..Default::default()
        }
    }
}

// A present key keeps its value, `null` included; only a missing key is None.
fn opaque<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// BookDto is a data transfer object for the Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookDto {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "opaque", skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "opaque", skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "opaque", skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, deserialize_with = "opaque", skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_page: Option<Number>,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<bool>,
    #[serde(with = "serializer")]
    pub inserted_at: DateTime<Utc>,
    #[serde(with = "serializer")]
    pub updated_at: DateTime<Utc>,
}

impl BookDto {
    // A new book gets a fresh id and `updated_at == inserted_at`.
    pub fn new(payload: &BookPayload) -> BookDto {
        let inserted_at = now();
        BookDto::with_id(generate_id(BOOK_ID_LENGTH).as_str(), payload, inserted_at)
    }

    pub fn with_id(id: &str, payload: &BookPayload, inserted_at: DateTime<Utc>) -> BookDto {
        BookDto {
            id: id.to_string(),
            name: payload.name.clone().unwrap_or_default(),
            year: payload.year.clone(),
            author: payload.author.clone(),
            summary: payload.summary.clone(),
            publisher: payload.publisher.clone(),
            page_count: payload.page_count.clone(),
            read_page: payload.read_page.clone(),
            finished: same_page(payload.page_count.as_ref(), payload.read_page.as_ref()),
            reading: payload.reading,
            inserted_at,
            updated_at: inserted_at,
        }
    }
}

// BookSummaryDto is the projection returned by the list operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookSummaryDto {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "opaque", skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Value>,
}

impl From<&BookDto> for BookSummaryDto {
    fn from(other: &BookDto) -> Self {
        Self {
            id: other.id.to_string(),
            name: other.name.to_string(),
            publisher: other.publisher.clone(),
        }
    }
}
