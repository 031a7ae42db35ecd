use serde_json::Number;
use crate::core::domain::Identifiable;

pub mod filter;
pub mod model;

pub(crate) trait Book: Identifiable {
    fn name(&self) -> &str;
    // None when the client never said
    fn reading(&self) -> Option<bool>;
    fn is_finished(&self) -> bool;
}

// Page counts are compared numerically, so 500 and 500.0 are the same page.
pub(crate) fn same_page(a: Option<&Number>, b: Option<&Number>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.as_f64() == b.as_f64(),
        (None, None) => true,
        _ => false,
    }
}

// Nothing to compare unless both counts were supplied.
pub(crate) fn read_page_exceeds(read_page: Option<&Number>, page_count: Option<&Number>) -> bool {
    match (read_page.and_then(Number::as_f64), page_count.and_then(Number::as_f64)) {
        (Some(read_page), Some(page_count)) => read_page > page_count,
        _ => false,
    }
}
