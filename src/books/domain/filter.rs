use crate::books::domain::Book;

// BookFilter narrows the list operation. Every supplied predicate must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BookFilter {
    // lower-cased substring of the book name
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    /// Builds a filter from raw query values. Empty values are ignored; `reading` and
    /// `finished` are `true` only for the literal `"1"`, any other value filters on `false`.
    pub fn from_query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> Self {
        Self {
            name: non_empty(name).map(str::to_lowercase),
            reading: non_empty(reading).map(|v| v == "1"),
            finished: non_empty(finished).map(|v| v == "1"),
        }
    }

    pub fn matches<B: Book + ?Sized>(&self, book: &B) -> bool {
        if let Some(ref name) = self.name {
            if !book.name().to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            // an unset flag matches neither true nor false
            if book.reading() != Some(reading) {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.is_finished() != finished {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
